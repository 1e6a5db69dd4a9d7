use anyhow::{anyhow, Result};
use hostmask_core::{Severity, StatusCode};

use crate::mutators::{Mutator, OpContext};

const SNAPSHOT_DESCRIPTION: &str = "hostmask - before identity changes";

pub struct SnapshotMutator;

impl Mutator for SnapshotMutator {
    fn apply(&self, ctx: &OpContext<'_>, _params: &str) -> Result<StatusCode> {
        ctx.observers.log("creating system snapshot", Severity::Info);
        ctx.host.snapshots.create(SNAPSHOT_DESCRIPTION)?;
        ctx.observers.log("system snapshot created", Severity::Info);
        Ok(StatusCode::Success)
    }
}

pub struct ToolLaunchMutator {
    tool: String,
    wait: bool,
}

impl ToolLaunchMutator {
    pub fn detached(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            wait: false,
        }
    }
}

impl Mutator for ToolLaunchMutator {
    fn apply(&self, ctx: &OpContext<'_>, _params: &str) -> Result<StatusCode> {
        ctx.observers
            .log(&format!("launching {}", self.tool), Severity::Info);
        let status = ctx.host.tools.launch(&self.tool, &[], self.wait)?;
        if self.wait && status != 0 {
            return Err(anyhow!("{} exited with status {status}", self.tool));
        }
        Ok(StatusCode::Success)
    }
}
