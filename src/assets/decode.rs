use std::sync::Arc;

use anyhow::Context;

use crate::{assets::TextureImage, foundation::error::GlyphfallResult};

/// Decode an encoded image (PNG, JPEG, ...) into premultiplied RGBA8.
///
/// Images whose longer side exceeds `max_side` are downscaled, keeping aspect.
pub fn decode_image(bytes: &[u8], max_side: u32) -> GlyphfallResult<TextureImage> {
    let mut dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    if max_side > 0 && dyn_img.width().max(dyn_img.height()) > max_side {
        dyn_img = dyn_img.thumbnail(max_side, max_side);
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(TextureImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
