use anyhow::Result;
use hostmask_core::{derive_status, OperationDescriptor, OperationStatus};

use crate::KvStore;

pub const SETTINGS_NAMESPACE: &str = "Settings";

const ORIGINAL_SUFFIX: &str = "_Original";
const CURRENT_SUFFIX: &str = "_Current";

pub struct BackupStore {
    kv: Box<dyn KvStore>,
}

impl BackupStore {
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn save_original(
        &self,
        operation: &OperationDescriptor,
        field: &str,
        value: &str,
    ) -> Result<()> {
        let key = format!("{field}{ORIGINAL_SUFFIX}");
        if self.kv.read(operation.name, &key)?.is_some() {
            return Ok(());
        }
        self.kv.write(operation.name, &key, value)
    }

    pub fn save_current(
        &self,
        operation: &OperationDescriptor,
        field: &str,
        value: &str,
    ) -> Result<()> {
        self.kv
            .write(operation.name, &format!("{field}{CURRENT_SUFFIX}"), value)
    }

    pub fn original(&self, operation: &OperationDescriptor, field: &str) -> Result<Option<String>> {
        self.kv
            .read(operation.name, &format!("{field}{ORIGINAL_SUFFIX}"))
    }

    pub fn current(&self, operation: &OperationDescriptor, field: &str) -> Result<Option<String>> {
        self.kv
            .read(operation.name, &format!("{field}{CURRENT_SUFFIX}"))
    }

    pub fn clear_operation(&self, operation: &OperationDescriptor) -> Result<()> {
        self.kv.remove_namespace(operation.name)
    }

    pub fn field_status(
        &self,
        operation: &OperationDescriptor,
        field: &str,
    ) -> Result<OperationStatus> {
        let original = self.original(operation, field)?;
        let current = self.current(operation, field)?;
        Ok(derive_status(original.as_deref(), current.as_deref()))
    }

    pub fn operation_status(&self, operation: &OperationDescriptor) -> Result<OperationStatus> {
        self.field_status(operation, operation.primary_field())
    }

    pub fn save_setting(&self, name: &str, value: &str) -> Result<()> {
        self.kv.write(SETTINGS_NAMESPACE, name, value)
    }

    pub fn setting(&self, name: &str, default: &str) -> Result<String> {
        Ok(self
            .kv
            .read(SETTINGS_NAMESPACE, name)?
            .unwrap_or_else(|| default.to_string()))
    }
}
