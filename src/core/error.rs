use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HealthError {
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Inconsistent snapshot: {0}")]
    InconsistentSnapshot(String),

    #[error("Unknown health status '{0}'")]
    UnknownStatus(String),

    #[error("Invalid index metadata: {0}")]
    InvalidMetadata(String),
}

pub type Result<T> = std::result::Result<T, HealthError>;

impl HealthError {
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptData(message.into())
    }
}
