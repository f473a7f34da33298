//! Domain error types.

/// Top-level error type for carteira.
#[derive(Debug, thiserror::Error)]
pub enum CarteiraError {
    #[error("unknown field for duplicate filtering: {field}")]
    InvalidField { field: String },

    #[error("indicator not available in universe data: {indicator}")]
    MissingIndicator { indicator: String },

    #[error("invalid portfolio size: {count} (must be at least 1)")]
    InvalidCount { count: usize },

    #[error("no universe data for {as_of}")]
    NoData { as_of: chrono::NaiveDate },

    #[error("feed error: {reason}")]
    Feed { reason: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CarteiraError> for std::process::ExitCode {
    fn from(err: &CarteiraError) -> Self {
        let code: u8 = match err {
            CarteiraError::Io(_) => 1,
            CarteiraError::ConfigParse { .. }
            | CarteiraError::ConfigMissing { .. }
            | CarteiraError::ConfigInvalid { .. } => 2,
            CarteiraError::Feed { .. } => 3,
            CarteiraError::InvalidField { .. }
            | CarteiraError::MissingIndicator { .. }
            | CarteiraError::InvalidCount { .. } => 4,
            CarteiraError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
