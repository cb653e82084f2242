use thiserror::Error;

/// Failures with defined taxonomy; everything else surfaces as `anyhow`
/// errors with context.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The sample was too irregular to infer a consistent dialect. Fatal,
    /// no fallback dialect is defined.
    #[error("could not determine a consistent delimiter/quote dialect: {reason}")]
    DialectDetection { reason: String },

    /// None of the requested permission columns matched a header, exactly
    /// or by substring.
    #[error("could not identify any of the requested permission columns {requested:?} in the input headers")]
    ColumnResolution { requested: Vec<String> },
}
