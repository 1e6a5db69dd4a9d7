use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};

use hostmask_core::{descriptor, OperationStatus, CATALOG};

use crate::{BackupStore, FsKvStore, KvStore, StateLayout, SETTINGS_NAMESPACE};

static TEST_ROOT_SEQ: AtomicU64 = AtomicU64::new(0);

fn test_layout() -> StateLayout {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let seq = TEST_ROOT_SEQ.fetch_add(1, Ordering::Relaxed);
    StateLayout::new(std::env::temp_dir().join(format!(
        "hostmask-store-test-{}-{nanos}-{seq}",
        std::process::id()
    )))
}

fn test_store() -> BackupStore {
    BackupStore::new(Box::new(FsKvStore::new(test_layout())))
}

#[test]
fn layout_value_paths_follow_namespace_scheme() {
    let layout = test_layout();
    assert_eq!(
        layout.value_path("RegistryHWID", "MachineGuid_Original"),
        layout.root().join("RegistryHWID").join("MachineGuid_Original")
    );
    assert_eq!(
        layout.value_path(SETTINGS_NAMESPACE, "Language"),
        layout.root().join("Settings").join("Language")
    );
}

#[test]
fn settings_namespace_is_disjoint_from_operations() {
    for entry in CATALOG {
        assert_ne!(entry.name, SETTINGS_NAMESPACE);
    }
}

#[test]
fn kv_read_missing_value_is_absent() {
    let kv = FsKvStore::new(test_layout());
    assert!(kv.read("RegistryHWID", "MachineGuid_Original").expect("must read").is_none());
}

#[test]
fn kv_round_trips_values_verbatim() {
    let kv = FsKvStore::new(test_layout());
    kv.write("RegistryHWID", "MachineGuid_Original", "{AAAA-BBBB}").expect("must write");
    assert_eq!(
        kv.read("RegistryHWID", "MachineGuid_Original").expect("must read").as_deref(),
        Some("{AAAA-BBBB}")
    );

    kv.write("RegistryHWID", "MachineGuid_Original", "").expect("must write empty");
    assert_eq!(
        kv.read("RegistryHWID", "MachineGuid_Original").expect("must read").as_deref(),
        Some("")
    );

    let _ = fs::remove_dir_all(kv.layout().root());
}

#[test]
fn kv_rejects_path_like_tokens() {
    let kv = FsKvStore::new(test_layout());
    assert!(kv.read("", "key").is_err());
    assert!(kv.read("ns", " ").is_err());
    assert!(kv.write("..", "key", "value").is_err());
    assert!(kv.write("ns", "a/b", "value").is_err());
    assert!(kv.remove_namespace("a\\b").is_err());
}

#[test]
fn kv_remove_missing_namespace_is_ok() {
    let kv = FsKvStore::new(test_layout());
    kv.remove_namespace("RegistryHWID").expect("must treat missing as removed");
}

#[test]
fn save_original_captures_only_the_first_value() {
    let store = test_store();
    let operation = descriptor(3).expect("operation 3 must exist");

    store.save_original(operation, "MachineGuid", "first").expect("must save");
    store.save_original(operation, "MachineGuid", "second").expect("must be a no-op");

    assert_eq!(
        store.original(operation, "MachineGuid").expect("must read").as_deref(),
        Some("first")
    );
}

#[test]
fn save_original_preserves_captured_empty_value() {
    let store = test_store();
    let operation = descriptor(5).expect("operation 5 must exist");

    store.save_original(operation, "Value", "").expect("must save");
    store.save_original(operation, "Value", "later").expect("must be a no-op");

    assert_eq!(store.original(operation, "Value").expect("must read").as_deref(), Some(""));
}

#[test]
fn save_current_always_overwrites() {
    let store = test_store();
    let operation = descriptor(3).expect("operation 3 must exist");

    store.save_current(operation, "MachineGuid", "one").expect("must save");
    store.save_current(operation, "MachineGuid", "two").expect("must overwrite");

    assert_eq!(
        store.current(operation, "MachineGuid").expect("must read").as_deref(),
        Some("two")
    );
}

#[test]
fn fields_are_independent_within_an_operation() {
    let store = test_store();
    let operation = descriptor(3).expect("operation 3 must exist");

    store.save_original(operation, "MachineGuid", "a").expect("must save");
    store.save_original(operation, "HwProfileGuid", "b").expect("must save");
    store.save_current(operation, "MachineGuid", "a2").expect("must save");

    assert_eq!(store.field_status(operation, "MachineGuid").expect("must derive"), OperationStatus::Modified);
    assert_eq!(store.field_status(operation, "HwProfileGuid").expect("must derive"), OperationStatus::Restored);
}

#[test]
fn operation_status_follows_the_primary_field() {
    let store = test_store();
    let operation = descriptor(3).expect("operation 3 must exist");

    assert_eq!(store.operation_status(operation).expect("must derive"), OperationStatus::NoBackup);

    store.save_original(operation, "MachineGuid", "orig").expect("must save");
    assert_eq!(store.operation_status(operation).expect("must derive"), OperationStatus::Restored);

    store.save_current(operation, "MachineGuid", "new").expect("must save");
    assert_eq!(store.operation_status(operation).expect("must derive"), OperationStatus::Modified);

    store.save_current(operation, "MachineGuid", "orig").expect("must save");
    assert_eq!(store.operation_status(operation).expect("must derive"), OperationStatus::Restored);
}

#[test]
fn clear_operation_destroys_records_and_is_idempotent() {
    let store = test_store();
    let operation = descriptor(3).expect("operation 3 must exist");

    store.save_original(operation, "MachineGuid", "orig").expect("must save");
    store.save_current(operation, "MachineGuid", "new").expect("must save");

    store.clear_operation(operation).expect("must clear");
    assert!(store.original(operation, "MachineGuid").expect("must read").is_none());
    assert!(store.current(operation, "MachineGuid").expect("must read").is_none());
    assert_eq!(store.operation_status(operation).expect("must derive"), OperationStatus::NoBackup);

    store.clear_operation(operation).expect("must treat nothing-to-delete as success");
}

#[test]
fn settings_round_trip_with_default_fallback() {
    let store = test_store();

    assert_eq!(store.setting("Language", "en").expect("must read"), "en");

    store.save_setting("Language", "de").expect("must save");
    assert_eq!(store.setting("Language", "en").expect("must read"), "de");

    store.save_setting("Language", "fr").expect("must overwrite");
    assert_eq!(store.setting("Language", "en").expect("must read"), "fr");
}
