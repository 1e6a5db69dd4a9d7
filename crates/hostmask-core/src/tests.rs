use std::collections::HashSet;

use crate::{derive_status, descriptor, EngineConfig, OperationStatus, Severity, StatusCode, CATALOG};

#[test]
fn catalog_ids_and_names_are_unique() {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for entry in CATALOG {
        assert!(ids.insert(entry.id), "duplicate operation id: {}", entry.id);
        assert!(names.insert(entry.name), "duplicate operation name: {}", entry.name);
        assert!(!entry.fields.is_empty(), "operation {} has no fields", entry.name);
    }
}

#[test]
fn catalog_lookup_by_id() {
    let entry = descriptor(3).expect("operation 3 must exist");
    assert_eq!(entry.name, "RegistryHWID");
    assert!(entry.supports_restore);
    assert_eq!(entry.fields, ["MachineGuid", "HwProfileGuid"]);
    assert_eq!(entry.primary_field(), "MachineGuid");

    assert!(descriptor(0).is_none());
    assert!(descriptor(99).is_none());
}

#[test]
fn restore_support_matches_catalog() {
    let restorable: Vec<u32> = CATALOG
        .iter()
        .filter(|entry| entry.supports_restore)
        .map(|entry| entry.id)
        .collect();
    assert_eq!(restorable, vec![3, 5, 6, 7, 8, 9]);
}

#[test]
fn status_codes_are_stable() {
    assert_eq!(StatusCode::Success.code(), 0);
    assert_eq!(StatusCode::Failure.code(), 1);
    assert_eq!(StatusCode::NotImplemented.code(), 2);
    assert_eq!(StatusCode::NoBackup.code(), 3);
    assert_eq!(StatusCode::InvalidOperation.code(), 4);
    assert!(StatusCode::Success.is_success());
    assert!(!StatusCode::NoBackup.is_success());
}

#[test]
fn operation_status_codes_are_stable() {
    assert_eq!(OperationStatus::NoBackup.code(), 0);
    assert_eq!(OperationStatus::Modified.code(), 1);
    assert_eq!(OperationStatus::Restored.code(), 2);
    assert_eq!(Severity::Info.code(), 0);
    assert_eq!(Severity::Error.code(), 2);
}

#[test]
fn derive_status_without_original_is_no_backup() {
    assert_eq!(derive_status(None, None), OperationStatus::NoBackup);
    assert_eq!(derive_status(None, Some("anything")), OperationStatus::NoBackup);
    assert_eq!(derive_status(None, Some("")), OperationStatus::NoBackup);
}

#[test]
fn derive_status_with_matching_values_is_restored() {
    assert_eq!(derive_status(Some("abc"), Some("abc")), OperationStatus::Restored);
    assert_eq!(derive_status(Some(""), Some("")), OperationStatus::Restored);
}

#[test]
fn derive_status_without_current_is_restored() {
    assert_eq!(derive_status(Some("abc"), None), OperationStatus::Restored);
}

#[test]
fn derive_status_with_differing_values_is_modified() {
    assert_eq!(derive_status(Some("abc"), Some("def")), OperationStatus::Modified);
    assert_eq!(derive_status(Some("abc"), Some("")), OperationStatus::Modified);
    assert_eq!(derive_status(Some(""), Some("abc")), OperationStatus::Modified);
}

#[test]
fn config_parses_full_document() {
    let raw = r#"
state_root = "/var/lib/hostmask"
identity_dir = "/etc/hostmask/identity"
tool_dirs = ["/opt/hostmask/tools"]
snapshot_tool = "snapshot-helper"
uninstall_tool = "revo-uninstaller"

[settings]
Language = "en"
"#;
    let config = EngineConfig::from_toml_str(raw).expect("must parse");
    assert_eq!(config.state_root.as_deref(), Some("/var/lib/hostmask"));
    assert_eq!(config.identity_dir.as_deref(), Some("/etc/hostmask/identity"));
    assert_eq!(config.tool_dirs, vec!["/opt/hostmask/tools"]);
    assert_eq!(config.snapshot_tool.as_deref(), Some("snapshot-helper"));
    assert_eq!(config.settings.get("Language").map(String::as_str), Some("en"));
}

#[test]
fn config_defaults_to_empty() {
    let config = EngineConfig::from_toml_str("").expect("must parse");
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn config_rejects_empty_values() {
    let err = EngineConfig::from_toml_str("state_root = \"\"\n").expect_err("must reject");
    assert!(err.to_string().contains("state_root"));

    let err = EngineConfig::from_toml_str("tool_dirs = [\" \"]\n").expect_err("must reject");
    assert!(err.to_string().contains("tool_dirs"));
}
