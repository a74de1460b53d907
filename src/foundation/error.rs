/// Convenience result type used across Glyphfall.
pub type GlyphfallResult<T> = Result<T, GlyphfallError>;

/// Top-level error taxonomy used by scene and formation APIs.
///
/// Asset load failures are not represented here: they are absorbed by the procedural fallbacks
/// in [`crate::assets`] and only logged.
#[derive(thiserror::Error, Debug)]
pub enum GlyphfallError {
    /// Invalid caller-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a message to an alpha grid.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors while decoding or synthesizing textures.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rendering a preview frame.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphfallError {
    /// Build a [`GlyphfallError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphfallError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`GlyphfallError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`GlyphfallError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
