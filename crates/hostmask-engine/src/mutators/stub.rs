use anyhow::Result;
use hostmask_core::{Severity, StatusCode};

use crate::mutators::{Mutator, OpContext};

pub struct StubMutator;

impl Mutator for StubMutator {
    fn apply(&self, ctx: &OpContext<'_>, _params: &str) -> Result<StatusCode> {
        ctx.observers.log(
            &format!("{} is not implemented yet", ctx.operation.name),
            Severity::Info,
        );
        Ok(StatusCode::NotImplemented)
    }

    fn restore(&self, ctx: &OpContext<'_>) -> Result<StatusCode> {
        ctx.observers.log(
            &format!("restore of {} is not implemented yet", ctx.operation.name),
            Severity::Info,
        );
        Ok(StatusCode::NotImplemented)
    }
}
