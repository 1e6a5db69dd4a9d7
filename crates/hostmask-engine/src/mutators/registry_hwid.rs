use anyhow::{anyhow, Result};
use hostmask_core::{Severity, StatusCode};

use crate::host::generate_guid;
use crate::mutators::{Mutator, OpContext};

pub struct RegistryHwidMutator;

impl Mutator for RegistryHwidMutator {
    fn apply(&self, ctx: &OpContext<'_>, _params: &str) -> Result<StatusCode> {
        for field in ctx.operation.fields {
            let live = ctx
                .host
                .identity
                .read(field)?
                .ok_or_else(|| anyhow!("failed to read live value for {field}"))?;
            ctx.backups.save_original(ctx.operation, field, &live)?;

            let fresh = generate_guid();
            ctx.host.identity.write(field, &fresh)?;
            ctx.backups.save_current(ctx.operation, field, &fresh)?;
            ctx.observers
                .log(&format!("new {field}: {fresh}"), Severity::Info);
        }
        Ok(StatusCode::Success)
    }

    fn restore(&self, ctx: &OpContext<'_>) -> Result<StatusCode> {
        let mut captured = Vec::new();
        for field in ctx.operation.fields {
            match ctx.backups.original(ctx.operation, field)? {
                Some(value) => captured.push((*field, value)),
                None => return Ok(StatusCode::NoBackup),
            }
        }

        for (field, value) in captured {
            ctx.host.identity.write(field, &value)?;
            ctx.backups.save_current(ctx.operation, field, &value)?;
        }
        Ok(StatusCode::Success)
    }
}
