use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

pub trait MachineIdentity {
    fn read(&self, field: &str) -> Result<Option<String>>;
    fn write(&self, field: &str, value: &str) -> Result<()>;
}

pub trait Snapshots {
    fn create(&self, description: &str) -> Result<()>;
}

pub trait ToolRunner {
    fn launch(&self, tool: &str, args: &[&str], wait: bool) -> Result<i32>;
}

pub struct Host {
    pub identity: Box<dyn MachineIdentity>,
    pub snapshots: Box<dyn Snapshots>,
    pub tools: Box<dyn ToolRunner>,
}

#[derive(Debug, Clone)]
pub struct FileIdentity {
    root: PathBuf,
}

impl FileIdentity {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MachineIdentity for FileIdentity {
    fn read(&self, field: &str) -> Result<Option<String>> {
        let path = self.root.join(field);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw.trim_end_matches(['\r', '\n']).to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read identity value: {}", path.display())),
        }
    }

    fn write(&self, field: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.root.join(field);
        fs::write(&path, value.as_bytes())
            .with_context(|| format!("failed to write identity value: {}", path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SystemTools {
    search_dirs: Vec<PathBuf>,
}

impl SystemTools {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    fn locate(&self, tool: &str) -> Result<PathBuf> {
        for dir in &self.search_dirs {
            let candidate = dir.join(tool);
            if candidate.exists() {
                return Ok(candidate);
            }
            if cfg!(windows) {
                let candidate = dir.join(format!("{tool}.exe"));
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }
        Err(anyhow!(
            "tool '{tool}' was not found in any configured tool directory"
        ))
    }
}

impl ToolRunner for SystemTools {
    fn launch(&self, tool: &str, args: &[&str], wait: bool) -> Result<i32> {
        let path = self.locate(tool)?;
        let mut command = Command::new(&path);
        command.args(args);

        if wait {
            let status = command
                .status()
                .with_context(|| format!("failed to run {}", path.display()))?;
            return Ok(status.code().unwrap_or(-1));
        }

        command
            .spawn()
            .with_context(|| format!("failed to launch {}", path.display()))?;
        Ok(0)
    }
}

pub struct ToolSnapshots {
    runner: SystemTools,
    tool: Option<String>,
}

impl ToolSnapshots {
    pub fn new(runner: SystemTools, tool: Option<String>) -> Self {
        Self { runner, tool }
    }
}

impl Snapshots for ToolSnapshots {
    fn create(&self, description: &str) -> Result<()> {
        let Some(tool) = &self.tool else {
            return Err(anyhow!("no snapshot tool is configured"));
        };

        let status = self.runner.launch(tool, &[description], true)?;
        if status != 0 {
            return Err(anyhow!("snapshot tool exited with status {status}"));
        }
        Ok(())
    }
}

pub fn generate_guid() -> String {
    format!("{{{}}}", Uuid::new_v4()).to_uppercase()
}
