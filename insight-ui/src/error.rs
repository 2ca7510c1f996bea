use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to start speech program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
}
