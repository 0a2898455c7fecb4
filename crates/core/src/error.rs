#[derive(Debug, thiserror::Error)]
pub enum NotetakerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] notetaker_types::TextError),

    #[error("failed to load sentiment model '{model}' after {attempts} attempts: {source}")]
    ModelLoad {
        model: String,
        attempts: u32,
        #[source]
        source: Box<NotetakerError>,
    },
    #[error("sentiment model file not found: {}", .0.display())]
    ModelNotFound(std::path::PathBuf),
    #[error("sentiment model could not be initialised: {0}")]
    ModelInit(String),
    #[error("sentiment model request failed: {0}")]
    ModelRequest(#[from] reqwest::Error),
    #[error("unexpected sentiment model response: {0}")]
    ModelResponse(String),
}

pub type NotetakerResult<T> = std::result::Result<T, NotetakerError>;
