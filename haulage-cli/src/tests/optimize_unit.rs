//! Focused unit tests covering optimize configuration and report output.

use super::helpers::{stdout_text, temp_root, write_demo_snapshot};
use super::*;
use haulage_core::{AllocationOutcome, Allocator, FleetRegistry};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

use crate::fleet_file::load_registry;
use crate::optimize::{
    OptimizeArgs, OptimizeConfig, ReportFormat, config_from_layers_for_test, run_optimize_with,
};
use haulage_allocator::FirstFitAllocator;

/// Leaves every client where it is and reports all of them unplaced.
struct IdleAllocator;

impl Allocator for IdleAllocator {
    fn allocate(&self, registry: &mut FleetRegistry) -> AllocationOutcome {
        AllocationOutcome {
            unallocated: registry
                .clients()
                .iter()
                .map(|client| client.name().to_owned())
                .collect(),
            ..AllocationOutcome::default()
        }
    }
}

#[rstest]
fn converting_optimize_without_snapshot_errors() {
    let args = OptimizeArgs {
        snapshot: None,
        ..OptimizeArgs::default()
    };

    let err = OptimizeConfig::try_from(args).expect_err("missing snapshot should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_OPTIMIZE_SNAPSHOT);
            assert_eq!(env, ENV_OPTIMIZE_SNAPSHOT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn optimize_config_defaults_to_json_without_saving() {
    let (_tmp, root) = temp_root();
    let snapshot = root.join("fleet.json");
    let args = OptimizeArgs {
        snapshot: Some(snapshot.clone()),
        ..OptimizeArgs::default()
    };

    let config = OptimizeConfig::try_from(args).expect("config should build");
    assert_eq!(config.snapshot, snapshot);
    assert_eq!(config.format, ReportFormat::Json);
    assert!(!config.save);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "snapshot": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let (_tmp, root) = temp_root();
    let env_snapshot = root.join("from-env.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "snapshot": root.join("from-file.json").as_str(),
            "format": "csv",
        }),
        None,
    );
    composer.push_environment(json!({ "snapshot": env_snapshot.as_str() }));
    composer.push_cli(json!({ "save": true }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.snapshot, env_snapshot);
    assert_eq!(config.format, ReportFormat::Csv);
    assert!(config.save);
}

#[rstest]
fn json_report_describes_the_demo_distribution() {
    let (_tmp, root) = temp_root();
    let snapshot = root.join("fleet.json");
    write_demo_snapshot(&snapshot);

    let args = OptimizeArgs {
        snapshot: Some(snapshot),
        format: Some(ReportFormat::Json),
        save: false,
    };
    let mut out = Vec::new();
    run_optimize_with(args, &FirstFitAllocator::new(), &mut out).expect("optimize succeeds");

    let report: serde_json::Value =
        serde_json::from_str(&stdout_text(out)).expect("report is JSON");
    assert_eq!(
        report["opened_vehicles"],
        json!(["VHC-00000001", "TRN-00000002", "AIR-00000003"])
    );
    assert_eq!(
        report["distribution"][0]["clients"],
        json!(["Maria Sidorova", "Olga Smirnova"])
    );
    assert_eq!(
        report["distribution"][1]["clients"],
        json!(["Alexey Ivanov", "Ivan Petrov"])
    );
    assert_eq!(
        report["distribution"][2]["clients"],
        json!(["Dmitry Kuznetsov"])
    );
    assert_eq!(report["unallocated"], json!([]));
    assert_eq!(report["statistics"]["clients_loaded"], 5);
}

#[rstest]
fn csv_report_lists_statistics_then_vehicles() {
    let (_tmp, root) = temp_root();
    let snapshot = root.join("fleet.json");
    write_demo_snapshot(&snapshot);

    let args = OptimizeArgs {
        snapshot: Some(snapshot),
        format: Some(ReportFormat::Csv),
        save: false,
    };
    let mut out = Vec::new();
    run_optimize_with(args, &FirstFitAllocator::new(), &mut out).expect("optimize succeeds");

    let text = stdout_text(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"metric,value"));
    assert!(lines.contains(&"company_name,Demo Haulage"));
    assert!(lines.contains(&"opened_vehicles,3"));
    assert!(lines.contains(&"vehicle,kind,capacity,current_load,load_percent,clients"));
    assert!(lines.contains(&"VHC-00000001,Plain,5.0,3.9,78.0,Maria Sidorova; Olga Smirnova"));
    assert!(lines.contains(&"TRN-00000002,Train,10.0,7.7,77.0,Alexey Ivanov; Ivan Petrov"));
    assert!(!text.contains("unallocated,"));
}

#[rstest]
fn csv_report_lists_unplaced_clients() {
    let (_tmp, root) = temp_root();
    let snapshot = root.join("fleet.json");
    write_demo_snapshot(&snapshot);

    let args = OptimizeArgs {
        snapshot: Some(snapshot),
        format: Some(ReportFormat::Csv),
        save: false,
    };
    let mut out = Vec::new();
    run_optimize_with(args, &IdleAllocator, &mut out).expect("optimize succeeds");

    let text = stdout_text(out);
    assert!(text.contains("opened_vehicles,0"));
    assert!(text.contains("unallocated,Ivan Petrov"));
    assert!(text.contains("unallocated,Dmitry Kuznetsov"));
}

#[rstest]
#[case(false)]
#[case(true)]
fn save_flag_controls_persistence(#[case] save: bool) {
    let (_tmp, root) = temp_root();
    let snapshot = root.join("fleet.json");
    write_demo_snapshot(&snapshot);

    let args = OptimizeArgs {
        snapshot: Some(snapshot.clone()),
        format: None,
        save,
    };
    run_optimize_with(args, &FirstFitAllocator::new(), &mut Vec::new())
        .expect("optimize succeeds");

    let registry = load_registry(&snapshot).expect("snapshot loads");
    assert_eq!(registry.unloaded_clients().count(), if save { 0 } else { 5 });
    assert_eq!(
        registry.owner_of("Dmitry Kuznetsov").map(ToString::to_string),
        save.then(|| "AIR-00000003".to_owned())
    );
}
