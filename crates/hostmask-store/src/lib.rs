mod backup;
mod kv;
mod layout;

pub use backup::{BackupStore, SETTINGS_NAMESPACE};
pub use kv::{FsKvStore, KvStore};
pub use layout::{default_user_prefix, StateLayout};

#[cfg(test)]
mod tests;
