use thiserror::Error;

/// Error types for building, rendering, solving and decoding programs
#[derive(Debug, Error)]
pub enum AspError {
    /// Invalid combination of parameters, raised while building a value
    #[error("Construction error: {0}")]
    Construction(String),

    /// Text could not be rendered (missing head, operator, bound or elements)
    #[error("Render error: {0}")]
    Render(String),

    /// The solver exited with one of the codes it reserves for errors
    #[error("Solver error (exit code {exit_code}): {stderr}")]
    Process { exit_code: i32, stderr: String },

    /// An atom string did not match the schema it was decoded with
    #[error("Decode error: {0}")]
    Decode(String),

    /// The solver output was not the structured result that was requested
    #[error("Unexpected solver output: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AspError {
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<serde_json::Error> for AspError {
    fn from(err: serde_json::Error) -> Self {
        AspError::Output(format!("JSON parse error: {}", err))
    }
}

impl From<std::fmt::Error> for AspError {
    fn from(err: std::fmt::Error) -> Self {
        AspError::Render(format!("Format error: {}", err))
    }
}
