use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistError {
    #[error("IO error at {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DistError {
    /// 包裝 IO 錯誤並附上出錯的路徑
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DistError::IoError {
            path: path.into(),
            source,
        }
    }

    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DistError::IoError { path, source } => {
                format!("Filesystem operation failed on {}: {}", path.display(), source)
            }
            DistError::WalkError(e) => format!("Could not scan directory tree: {}", e),
            DistError::ConfigError { message } => format!("Invalid configuration: {}", message),
            DistError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DistError::IoError { .. } | DistError::WalkError(_) => {
                "Check permissions on the dist/ tree and re-run the code generation step"
            }
            DistError::ConfigError { .. }
            | DistError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or remove it to fall back to the defaults"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DistError>;
