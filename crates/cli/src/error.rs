use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Input ended (Ctrl-D or a closed pipe).
    #[error("end of input")]
    Eof,

    #[error("terminal io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render json: {0}")]
    Json(#[from] serde_json::Error),
}
