use std::fmt;

use selprobe::DocumentError;

use crate::commands::utils::SourceError;

/// Command-line error carrying the process exit code
#[derive(Debug)]
pub enum SelprobeError {
    /// Locating selector matched nothing or the index is out of range (exit code 2)
    TargetNotFound(String),
    /// Locating or checked selector does not parse (exit code 3)
    InvalidSelector(String),
    /// The HTML source could not be read or fetched (exit code 4)
    SourceUnavailable(String),
    /// Generic error (exit code 1)
    Other(anyhow::Error),
}

impl SelprobeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SelprobeError::TargetNotFound(_) => 2,
            SelprobeError::InvalidSelector(_) => 3,
            SelprobeError::SourceUnavailable(_) => 4,
            SelprobeError::Other(_) => 1,
        }
    }
}

impl fmt::Display for SelprobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelprobeError::TargetNotFound(msg) => write!(f, "{}", msg),
            SelprobeError::InvalidSelector(msg) => write!(f, "{}", msg),
            SelprobeError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            SelprobeError::Other(err) => write!(f, "{:#}", err),
        }
    }
}

impl std::error::Error for SelprobeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelprobeError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for SelprobeError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(document_err) = err.chain().find_map(|e| e.downcast_ref::<DocumentError>()) {
            return match document_err {
                DocumentError::InvalidSelector { .. } => {
                    SelprobeError::InvalidSelector(document_err.to_string())
                }
                DocumentError::NoMatch(_) | DocumentError::IndexOutOfRange { .. } => {
                    SelprobeError::TargetNotFound(document_err.to_string())
                }
            };
        }

        if let Some(source_err) = err.chain().find_map(|e| e.downcast_ref::<SourceError>()) {
            return SelprobeError::SourceUnavailable(source_err.to_string());
        }

        SelprobeError::Other(err)
    }
}
