use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hostmask_core::{descriptor, EngineConfig, StatusCode, CATALOG};
use hostmask_engine::{
    Engine, EngineOptions, Host, SystemTools, ToolSnapshots, ABSENT_VALUE,
};
use hostmask_store::{default_user_prefix, BackupStore, FsKvStore, StateLayout};
use serde::Serialize;

use crate::render::{progress_observer, render_status_line, OutputStyle};

pub struct ResolvedPaths {
    pub prefix: PathBuf,
    pub state_root: PathBuf,
    pub identity_dir: PathBuf,
    pub tool_dirs: Vec<PathBuf>,
}

pub fn resolved_prefix(prefix: Option<PathBuf>) -> Result<PathBuf> {
    match prefix {
        Some(prefix) => Ok(prefix),
        None => default_user_prefix(),
    }
}

pub fn load_config(prefix: &Path) -> Result<EngineConfig> {
    let path = prefix.join("config.toml");
    match fs::read_to_string(&path) {
        Ok(raw) => EngineConfig::from_toml_str(&raw)
            .with_context(|| format!("failed to load {}", path.display())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(EngineConfig::default()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

pub fn resolve_paths(prefix: PathBuf, config: &EngineConfig) -> ResolvedPaths {
    let state_root = config
        .state_root
        .as_ref()
        .map_or_else(|| prefix.join("state"), PathBuf::from);
    let identity_dir = config
        .identity_dir
        .as_ref()
        .map_or_else(|| prefix.join("identity"), PathBuf::from);
    let tool_dirs = if config.tool_dirs.is_empty() {
        vec![prefix.join("tools")]
    } else {
        config.tool_dirs.iter().map(PathBuf::from).collect()
    };

    ResolvedPaths {
        prefix,
        state_root,
        identity_dir,
        tool_dirs,
    }
}

pub fn build_engine(prefix: Option<PathBuf>) -> Result<Engine> {
    let prefix = resolved_prefix(prefix)?;
    let config = load_config(&prefix)?;
    let paths = resolve_paths(prefix, &config);

    let layout = StateLayout::new(&paths.state_root);
    layout.ensure_base_dirs()?;
    let backups = BackupStore::new(Box::new(FsKvStore::new(layout)));

    let host = Host {
        identity: build_identity(&paths),
        snapshots: Box::new(ToolSnapshots::new(
            SystemTools::new(paths.tool_dirs.clone()),
            config.snapshot_tool.clone(),
        )),
        tools: Box::new(SystemTools::new(paths.tool_dirs.clone())),
    };

    let mut options = EngineOptions::default();
    if let Some(tool) = config.uninstall_tool {
        options.uninstall_tool = tool;
    }

    Ok(Engine::with_options(backups, host, options))
}

#[cfg(windows)]
fn build_identity(_paths: &ResolvedPaths) -> Box<dyn hostmask_engine::MachineIdentity> {
    Box::new(hostmask_engine::RegistryIdentity)
}

#[cfg(not(windows))]
fn build_identity(paths: &ResolvedPaths) -> Box<dyn hostmask_engine::MachineIdentity> {
    Box::new(hostmask_engine::FileIdentity::new(&paths.identity_dir))
}

#[derive(Debug, Serialize)]
pub struct ListRow {
    pub id: u32,
    pub name: &'static str,
    pub status: &'static str,
    pub restorable: bool,
    pub current: String,
    pub original: String,
}

pub fn collect_rows(engine: &Engine) -> Result<Vec<ListRow>> {
    let mut rows = Vec::with_capacity(CATALOG.len());
    for entry in CATALOG {
        rows.push(ListRow {
            id: entry.id,
            name: entry.name,
            status: engine.status(entry.id)?.as_str(),
            restorable: entry.supports_restore,
            current: engine.current_value(entry.id)?,
            original: engine.original_value(entry.id)?,
        });
    }
    Ok(rows)
}

pub fn format_list_lines(rows: &[ListRow]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            format!(
                "{:>2}  {:<13} {:<10} {:<10} current={} original={}",
                row.id,
                row.name,
                row.status,
                if row.restorable { "restorable" } else { "-" },
                row.current,
                row.original
            )
        })
        .collect()
}

pub fn format_list_json(rows: &[ListRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("failed to serialize operation listing")
}

pub fn format_status_lines(engine: &Engine, id: u32) -> Result<Vec<String>> {
    let Some(operation) = descriptor(id) else {
        return Ok(vec![format!("unknown operation: {id}")]);
    };

    let mut lines = vec![
        format!("operation: {} ({})", operation.name, operation.id),
        format!("status: {}", engine.status(id)?.as_str()),
    ];
    for field in operation.fields {
        let original = engine
            .backups()
            .original(operation, field)?
            .unwrap_or_else(|| ABSENT_VALUE.to_string());
        let current = engine
            .backups()
            .current(operation, field)?
            .unwrap_or_else(|| ABSENT_VALUE.to_string());
        lines.push(format!("{field}: original={original} current={current}"));
    }
    Ok(lines)
}

pub fn outcome_line(style: OutputStyle, action: &str, id: u32, code: StatusCode) -> String {
    let name = descriptor(id).map_or_else(|| format!("operation {id}"), |entry| entry.name.to_string());
    render_status_line(style, code.as_str(), &format!("{action} {name}"))
}

pub fn run_batch(engine: &mut Engine, style: OutputStyle, ids: &[u32], params: &str) -> StatusCode {
    engine.set_progress_observer(Some(progress_observer(style)));
    let code = engine.execute_batch(ids, params);
    engine.set_progress_observer(None);
    code
}

pub fn format_doctor_lines(prefix: &Path, config: &EngineConfig) -> Vec<String> {
    let paths = resolve_paths(prefix.to_path_buf(), config);
    let tool_dirs = paths
        .tool_dirs
        .iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!("prefix: {}", paths.prefix.display()),
        format!("state: {}", paths.state_root.display()),
        format!("identity: {}", identity_summary(&paths)),
        format!("tools: {tool_dirs}"),
        format!(
            "snapshot tool: {}",
            config.snapshot_tool.as_deref().unwrap_or("(none)")
        ),
        format!("engine: {}", Engine::version()),
    ]
}

#[cfg(windows)]
fn identity_summary(_paths: &ResolvedPaths) -> String {
    "windows registry".to_string()
}

#[cfg(not(windows))]
fn identity_summary(paths: &ResolvedPaths) -> String {
    paths.identity_dir.display().to_string()
}
