mod batch;
mod dispatch;
mod engine;
mod host;
mod mutators;
mod observer;
#[cfg(windows)]
mod registry;

pub use engine::{Engine, EngineOptions, ABSENT_VALUE};
pub use host::{
    generate_guid, FileIdentity, Host, MachineIdentity, Snapshots, SystemTools, ToolRunner,
    ToolSnapshots,
};
pub use mutators::{Mutator, OpContext};
pub use observer::{LogFn, Observers, ProgressFn};
#[cfg(windows)]
pub use registry::RegistryIdentity;
