pub mod decode;
pub mod textures;

use std::sync::Arc;

/// Decoded image ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl TextureImage {
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(vec![0; width as usize * height as usize * 4]),
        }
    }
}
