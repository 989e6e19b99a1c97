//! Domain error types.

/// Top-level error type for stockpick.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("fetch failed for {ticker}: {reason}")]
    Fetch { ticker: String, reason: String },

    #[error("no stored data for {ticker}")]
    NoData { ticker: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PickerError> for std::process::ExitCode {
    fn from(err: &PickerError) -> Self {
        let code: u8 = match err {
            PickerError::Io(_) => 1,
            PickerError::ConfigParse { .. }
            | PickerError::ConfigMissing { .. }
            | PickerError::ConfigInvalid { .. }
            | PickerError::InvalidArgument { .. } => 2,
            PickerError::Database { .. } | PickerError::DatabaseQuery { .. } => 3,
            PickerError::Fetch { .. } => 4,
            PickerError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
