//! Test helpers for building snapshot files in temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use haulage_core::{FleetRegistry, SequentialIds};
use tempfile::TempDir;

use crate::demo::demo_fleet;
use crate::fleet_file::save_registry;

/// Temporary directory plus its UTF-8 path.
pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Demo fleet with sequential ids: `VHC-00000001`, `TRN-00000002` and
/// `AIR-00000003`.
pub(super) fn demo_registry() -> FleetRegistry {
    demo_fleet("Demo Haulage", &mut SequentialIds::default()).expect("demo fleet")
}

pub(super) fn write_demo_snapshot(path: &Utf8Path) {
    save_registry(path, &demo_registry()).expect("save demo snapshot");
}

/// Snapshot text whose manifests both claim the same client.
pub(super) const DOUBLE_ASSIGNED: &str = r#"{
  "company_name": "Broken",
  "clients": [{ "name": "a", "weight": 1.0, "vip": false, "loaded": true }],
  "vehicles": [
    { "id": "VHC-1", "kind": "Plain", "capacity": 5.0, "current_load": 1.0, "assigned": ["a"] },
    { "id": "VHC-2", "kind": "Plain", "capacity": 5.0, "current_load": 1.0, "assigned": ["a"] }
  ]
}"#;

pub(super) fn stdout_text(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("stdout utf-8")
}
