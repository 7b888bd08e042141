use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssessError>;

#[derive(Error, Debug)]
pub enum AssessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Findings document is inconsistent: {field} says {declared}, findings list has {actual}"
    )]
    TallyMismatch {
        field: String,
        declared: usize,
        actual: usize,
    },

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AssessError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
