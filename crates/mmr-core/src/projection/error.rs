use thiserror::Error;

/// Errors returned when a projection tree cannot be rendered to text.
///
/// # Examples
/// ```
/// use mmr_core::RenderError;
///
/// let err = RenderError::from(String::from_utf8(vec![0xff]).unwrap_err());
/// assert!(err.to_string().starts_with("failed to render region"));
/// ```
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render region: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render region: output is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
