/// Errors raised while setting up rendering surfaces and glyph data.
///
/// Rendering itself never fails; these only come from constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlintError {
    /// A surface was requested with a zero dimension.
    InvalidSurfaceSize { width: u32, height: u32 },

    /// Alpha mask data does not match its declared size or the canvas.
    AlphaMaskSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
        data_len: usize,
    },

    /// Glyph bitmap buffer is inconsistent with its dimensions.
    InvalidBitmap(String),
}

impl std::fmt::Display for GlintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlintError::InvalidSurfaceSize { width, height } => {
                write!(f, "Invalid surface size: {}x{}", width, height)
            }
            GlintError::AlphaMaskSizeMismatch {
                expected_width,
                expected_height,
                width,
                height,
                data_len,
            } => write!(
                f,
                "Alpha mask size mismatch: expected {}x{}, got {}x{} with {} bytes",
                expected_width, expected_height, width, height, data_len
            ),
            GlintError::InvalidBitmap(msg) => write!(f, "Invalid glyph bitmap: {}", msg),
        }
    }
}

impl std::error::Error for GlintError {}

/// Result type for glint operations.
pub type GlintResult<T> = Result<T, GlintError>;
