mod launch;
mod registry_hwid;
mod stub;

use std::collections::BTreeMap;

use anyhow::Result;
use hostmask_core::{OperationDescriptor, OperationId, StatusCode};
use hostmask_store::BackupStore;

use crate::host::Host;
use crate::observer::Observers;

pub use launch::{SnapshotMutator, ToolLaunchMutator};
pub use registry_hwid::RegistryHwidMutator;
pub use stub::StubMutator;

pub struct OpContext<'a> {
    pub operation: &'a OperationDescriptor,
    pub backups: &'a BackupStore,
    pub host: &'a Host,
    pub observers: &'a Observers,
}

pub trait Mutator {
    fn apply(&self, ctx: &OpContext<'_>, params: &str) -> Result<StatusCode>;

    fn restore(&self, ctx: &OpContext<'_>) -> Result<StatusCode> {
        let _ = ctx;
        Ok(StatusCode::InvalidOperation)
    }
}

pub(crate) fn builtin_mutators(uninstall_tool: &str) -> BTreeMap<OperationId, Box<dyn Mutator>> {
    let mut table: BTreeMap<OperationId, Box<dyn Mutator>> = BTreeMap::new();
    table.insert(1, Box::new(SnapshotMutator));
    table.insert(2, Box::new(ToolLaunchMutator::detached(uninstall_tool)));
    table.insert(3, Box::new(RegistryHwidMutator));
    for id in [4, 5, 6, 7, 8, 9, 10] {
        table.insert(id, Box::new(StubMutator));
    }
    table
}
