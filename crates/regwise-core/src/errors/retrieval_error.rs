/// Retrieval subsystem errors.
///
/// An empty result set is not an error; it produces the fallback answer.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("knowledge engine failed to initialize: {reason}")]
    InitializationFailed { reason: String },
}
