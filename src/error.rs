use thiserror::Error;

/// Everything that can stop an export from reaching the host.
///
/// There is no validation of the payload or the name, so every variant
/// describes the environment rather than the input.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("host capability unavailable: no {0}")]
    HostUnavailable(&'static str),
    #[error("host rejected {op}: {message}")]
    HostPrimitive { op: &'static str, message: String },
    #[error("not a json data uri: {0}")]
    MalformedDataUri(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn primitive(op: &'static str, message: impl Into<String>) -> Self {
        ExportError::HostPrimitive {
            op,
            message: message.into(),
        }
    }
}
