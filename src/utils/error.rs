use thiserror::Error;

/// 傳輸層錯誤：在取得 payload 之前就失敗
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid target URL: {0}")]
    InvalidTarget(#[from] url::ParseError),
}

/// 解碼錯誤：payload 已取得但結構不符
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty payload")]
    Empty,
}

/// 回報給 `load()` 呼叫者的失敗
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Selection {index} is out of range ({len} users loaded)")]
    SelectionError { index: usize, len: usize },
}

impl From<TransportError> for FeedError {
    fn from(e: TransportError) -> Self {
        FeedError::Load(LoadError::Transport(e))
    }
}

impl From<DecodeError> for FeedError {
    fn from(e: DecodeError) -> Self {
        FeedError::Load(LoadError::Decode(e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::Load(LoadError::Transport(_)) => ErrorCategory::Network,
            FeedError::Load(LoadError::Decode(_)) => ErrorCategory::Data,
            FeedError::IoError(_) => ErrorCategory::System,
            FeedError::ConfigError { .. }
            | FeedError::ConfigValidationError { .. }
            | FeedError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FeedError::SelectionError { .. } => ErrorCategory::Usage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Usage => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FeedError::Load(LoadError::Transport(TransportError::Status { status, .. })) => {
                format!("The server answered with HTTP {}", status)
            }
            FeedError::Load(LoadError::Transport(_)) => {
                "Could not reach the user service".to_string()
            }
            FeedError::Load(LoadError::Decode(_)) => {
                "The user service returned data in an unexpected format".to_string()
            }
            FeedError::SelectionError { index, len } => {
                format!("There is no user #{} (only {} loaded)", index, len)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and --base-url, then try again",
            ErrorCategory::Data => "Verify that the endpoint serves the expected user JSON",
            ErrorCategory::Configuration => "Fix the configuration value and rerun",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Usage => "Pick an index from the printed list",
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
