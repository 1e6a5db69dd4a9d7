use std::collections::BTreeMap;

use hostmask_core::{descriptor, OperationId, Severity, StatusCode};
use hostmask_store::BackupStore;

use crate::host::Host;
use crate::mutators::{builtin_mutators, Mutator, OpContext};
use crate::observer::Observers;

pub(crate) struct DispatchOutcome {
    pub code: StatusCode,
    pub error: Option<String>,
}

impl DispatchOutcome {
    fn clean(code: StatusCode) -> Self {
        Self { code, error: None }
    }

    fn with_error(code: StatusCode, error: String) -> Self {
        Self {
            code,
            error: Some(error),
        }
    }
}

pub(crate) struct Dispatcher {
    mutators: BTreeMap<OperationId, Box<dyn Mutator>>,
}

impl Dispatcher {
    pub fn builtin(uninstall_tool: &str) -> Self {
        Self {
            mutators: builtin_mutators(uninstall_tool),
        }
    }

    pub fn apply(
        &self,
        backups: &BackupStore,
        host: &Host,
        observers: &Observers,
        id: OperationId,
        params: &str,
    ) -> DispatchOutcome {
        let Some(operation) = descriptor(id) else {
            return DispatchOutcome::with_error(
                StatusCode::InvalidOperation,
                format!("unknown operation id: {id}"),
            );
        };
        let Some(mutator) = self.mutators.get(&id) else {
            return DispatchOutcome::with_error(
                StatusCode::InvalidOperation,
                format!("no handler registered for operation id: {id}"),
            );
        };

        observers.log(&format!("applying {}", operation.name), Severity::Info);
        let ctx = OpContext {
            operation,
            backups,
            host,
            observers,
        };
        normalize(mutator.apply(&ctx, params), observers)
    }

    pub fn restore(
        &self,
        backups: &BackupStore,
        host: &Host,
        observers: &Observers,
        id: OperationId,
    ) -> DispatchOutcome {
        let Some(operation) = descriptor(id) else {
            return DispatchOutcome::with_error(
                StatusCode::InvalidOperation,
                format!("unknown operation id: {id}"),
            );
        };
        if !operation.supports_restore {
            return DispatchOutcome::with_error(
                StatusCode::InvalidOperation,
                format!("operation {} does not support restore", operation.name),
            );
        }
        let Some(mutator) = self.mutators.get(&id) else {
            return DispatchOutcome::with_error(
                StatusCode::InvalidOperation,
                format!("no handler registered for operation id: {id}"),
            );
        };

        match backups.original(operation, operation.primary_field()) {
            Ok(Some(_)) => {}
            Ok(None) => {
                observers.log(
                    &format!("no backup recorded for {}", operation.name),
                    Severity::Warning,
                );
                return DispatchOutcome::clean(StatusCode::NoBackup);
            }
            Err(err) => {
                let message = format!("{err:#}");
                observers.log(&message, Severity::Error);
                return DispatchOutcome::with_error(StatusCode::Failure, message);
            }
        }

        observers.log(&format!("restoring {}", operation.name), Severity::Info);
        let ctx = OpContext {
            operation,
            backups,
            host,
            observers,
        };
        normalize(mutator.restore(&ctx), observers)
    }
}

fn normalize(result: anyhow::Result<StatusCode>, observers: &Observers) -> DispatchOutcome {
    match result {
        Ok(code) => DispatchOutcome::clean(code),
        Err(err) => {
            let message = format!("{err:#}");
            observers.log(&message, Severity::Error);
            DispatchOutcome::with_error(StatusCode::Failure, message)
        }
    }
}
