use anyhow::{anyhow, Result};
use hostmask_core::{descriptor, OperationId, OperationStatus, StatusCode};
use hostmask_store::BackupStore;

use crate::batch::BatchRun;
use crate::dispatch::Dispatcher;
use crate::host::Host;
use crate::observer::{LogFn, Observers, ProgressFn};

pub const ABSENT_VALUE: &str = "-";

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub uninstall_tool: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            uninstall_tool: "RevoUninstaller".to_string(),
        }
    }
}

pub struct Engine {
    dispatcher: Dispatcher,
    backups: BackupStore,
    host: Host,
    observers: Observers,
    last_error: String,
}

impl Engine {
    pub fn new(backups: BackupStore, host: Host) -> Self {
        Self::with_options(backups, host, EngineOptions::default())
    }

    pub fn with_options(backups: BackupStore, host: Host, options: EngineOptions) -> Self {
        Self {
            dispatcher: Dispatcher::builtin(&options.uninstall_tool),
            backups,
            host,
            observers: Observers::default(),
            last_error: String::new(),
        }
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    pub fn set_progress_observer(&mut self, observer: Option<ProgressFn>) {
        self.observers.set_progress(observer);
    }

    pub fn set_log_observer(&mut self, observer: Option<LogFn>) {
        self.observers.set_log(observer);
    }

    pub fn last_error_message(&self) -> &str {
        &self.last_error
    }

    pub fn apply(&mut self, id: OperationId, params: &str) -> StatusCode {
        self.last_error.clear();
        let outcome = self
            .dispatcher
            .apply(&self.backups, &self.host, &self.observers, id, params);
        if let Some(error) = outcome.error {
            self.last_error = error;
        }
        outcome.code
    }

    pub fn restore(&mut self, id: OperationId) -> StatusCode {
        self.last_error.clear();
        let outcome = self
            .dispatcher
            .restore(&self.backups, &self.host, &self.observers, id);
        if let Some(error) = outcome.error {
            self.last_error = error;
        }
        outcome.code
    }

    pub fn status(&self, id: OperationId) -> Result<OperationStatus> {
        match descriptor(id) {
            Some(operation) => self.backups.operation_status(operation),
            None => Ok(OperationStatus::NoBackup),
        }
    }

    pub fn current_value(&self, id: OperationId) -> Result<String> {
        let Some(operation) = descriptor(id) else {
            return Ok(ABSENT_VALUE.to_string());
        };
        Ok(self
            .backups
            .current(operation, operation.primary_field())?
            .unwrap_or_else(|| ABSENT_VALUE.to_string()))
    }

    pub fn original_value(&self, id: OperationId) -> Result<String> {
        let Some(operation) = descriptor(id) else {
            return Ok(ABSENT_VALUE.to_string());
        };
        Ok(self
            .backups
            .original(operation, operation.primary_field())?
            .unwrap_or_else(|| ABSENT_VALUE.to_string()))
    }

    pub fn clear_backup(&mut self, id: OperationId) -> Result<()> {
        let operation = descriptor(id).ok_or_else(|| anyhow!("unknown operation id: {id}"))?;
        self.backups.clear_operation(operation)
    }

    pub fn execute_batch(&mut self, ids: &[OperationId], params: &str) -> StatusCode {
        let mut run = BatchRun::new(ids.len());
        for id in ids {
            let name = descriptor(*id).map_or("unknown operation", |operation| operation.name);
            self.observers
                .report_progress(&format!("applying {name}"), run.next_percent());
            let code = self.apply(*id, params);
            run.record(code);
        }
        self.observers.report_progress("complete", 100);

        if run.failed() > 0 {
            self.last_error = format!("{} of {} operations failed", run.failed(), run.total());
        }
        run.outcome()
    }
}
