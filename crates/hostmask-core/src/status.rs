#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    Failure,
    NotImplemented,
    NoBackup,
    InvalidOperation,
}

impl StatusCode {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::NotImplemented => 2,
            Self::NoBackup => 3,
            Self::InvalidOperation => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::NotImplemented => "not-implemented",
            Self::NoBackup => "no-backup",
            Self::InvalidOperation => "invalid-operation",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    NoBackup,
    Modified,
    Restored,
}

impl OperationStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::NoBackup => 0,
            Self::Modified => 1,
            Self::Restored => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoBackup => "no-backup",
            Self::Modified => "modified",
            Self::Restored => "restored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn code(self) -> i32 {
        match self {
            Self::Info => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

pub fn derive_status(original: Option<&str>, current: Option<&str>) -> OperationStatus {
    let Some(original) = original else {
        return OperationStatus::NoBackup;
    };

    match current {
        Some(current) if current != original => OperationStatus::Modified,
        _ => OperationStatus::Restored,
    }
}
