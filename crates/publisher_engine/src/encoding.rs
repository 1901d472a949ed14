use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid base64 input: {0}")]
    InvalidBase64(String),
    #[error("decoded bytes are not valid utf-8")]
    InvalidUtf8,
}

/// Encodes arbitrary Unicode text as standard Base64 over its UTF-8 bytes.
///
/// Multi-byte characters survive unchanged: `to_base64("你好世界")` is
/// `"5L2g5aW95LiW55WM"`.
pub fn to_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Exact inverse of [`to_base64`].
pub fn from_base64(input: &str) -> Result<String, EncodingError> {
    let bytes = STANDARD
        .decode(input)
        .map_err(|err| EncodingError::InvalidBase64(err.to_string()))?;
    String::from_utf8(bytes).map_err(|_| EncodingError::InvalidUtf8)
}

/// Returns true iff decoding then re-encoding reproduces `input` exactly.
/// Malformed input yields `false`, never an error.
pub fn is_valid_base64(input: &str) -> bool {
    match STANDARD.decode(input) {
        Ok(bytes) => STANDARD.encode(bytes) == input,
        Err(_) => false,
    }
}
