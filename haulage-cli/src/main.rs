//! Entry point for the `haulage` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = haulage_cli::run() {
        eprintln!("haulage: {err}");
        std::process::exit(1);
    }
}
