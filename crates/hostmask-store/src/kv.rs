use std::fs;
use std::io;

use anyhow::{anyhow, Context, Result};

use crate::StateLayout;

pub trait KvStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<String>>;
    fn write(&self, namespace: &str, key: &str, value: &str) -> Result<()>;
    fn remove_namespace(&self, namespace: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FsKvStore {
    layout: StateLayout,
}

impl FsKvStore {
    pub fn new(layout: StateLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &StateLayout {
        &self.layout
    }
}

impl KvStore for FsKvStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let namespace = validated_token(namespace, "namespace")?;
        let key = validated_token(key, "key")?;
        let path = self.layout.value_path(namespace, key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read stored value: {}", path.display()))
            }
        }
    }

    fn write(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let namespace = validated_token(namespace, "namespace")?;
        let key = validated_token(key, "key")?;
        let dir = self.layout.namespace_dir(namespace);
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

        let path = self.layout.value_path(namespace, key);
        fs::write(&path, value.as_bytes())
            .with_context(|| format!("failed to write stored value: {}", path.display()))?;
        Ok(())
    }

    fn remove_namespace(&self, namespace: &str) -> Result<()> {
        let namespace = validated_token(namespace, "namespace")?;
        let dir = self.layout.namespace_dir(namespace);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", dir.display()))
            }
        }
    }
}

fn validated_token<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(anyhow!("store {what} must not be empty"));
    }
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(anyhow!("store {what} must be a plain name: {value}"));
    }
    Ok(value)
}
