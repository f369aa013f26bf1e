use crate::mcp::errors;

/// Failures surfaced by the document layer and the tools built on it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DocsError {
    /// A caller-supplied value failed local validation. Nothing was sent.
    #[error("{0}")]
    InvalidParameter(String),

    /// A table, row, column or paragraph index does not exist in the
    /// freshly fetched document.
    #[error("{0}")]
    AddressResolution(String),

    /// The Docs API rejected a call or could not be reached.
    #[error("{operation} failed for document '{document_id}': {detail}")]
    Remote {
        document_id: String,
        operation: &'static str,
        detail: String,
    },

    /// A multi-step operation failed after earlier steps were applied.
    #[error(
        "operation partially completed (done: {}); failed while trying to {failed_step}: {source}",
        .completed.join(", ")
    )]
    PartialCompletion {
        completed: Vec<String>,
        failed_step: &'static str,
        #[source]
        source: Box<DocsError>,
    },
}

impl DocsError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn unresolved(message: impl Into<String>) -> Self {
        Self::AddressResolution(message.into())
    }

    /// Wraps a failure from a later step, recording which steps already landed.
    pub fn partial(completed: Vec<String>, failed_step: &'static str, source: DocsError) -> Self {
        Self::PartialCompletion {
            completed,
            failed_step,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => errors::INVALID_PARAMETER,
            Self::AddressResolution(_) => errors::ADDRESS_RESOLUTION,
            Self::Remote { .. } => errors::REMOTE_OPERATION,
            Self::PartialCompletion { .. } => errors::PARTIAL_COMPLETION,
        }
    }
}
