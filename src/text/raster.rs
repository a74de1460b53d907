use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{GlyphfallError, GlyphfallResult},
};

/// Row-major grid of 8-bit alpha values produced by rasterizing a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaGrid {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaGrid {
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> GlyphfallResult<Self> {
        Canvas::new(width, height)?;
        if alpha.len() != width as usize * height as usize {
            return Err(GlyphfallError::validation(format!(
                "alpha grid length {} does not match {width}x{height}",
                alpha.len()
            )));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell. Handy for synthetic glyphs.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> GlyphfallResult<Self> {
        let mut alpha = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                alpha.push(f(x, y));
            }
        }
        Self::new(width, height, alpha)
    }

    /// Keep only the alpha channel of an RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> GlyphfallResult<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(GlyphfallError::raster("rgba buffer length mismatch"));
        }
        Self::new(width, height, rgba.chunks_exact(4).map(|px| px[3]).collect())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.alpha
    }

    /// Number of cells whose alpha exceeds `threshold`.
    pub fn covered(&self, threshold: u8) -> usize {
        self.alpha.iter().filter(|&&a| a > threshold).count()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: String,
}

/// One stroke drawn around the glyphs after the main fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlinePass {
    pub width_px: f32,
    pub color: String,
}

/// Soft halo behind the main fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlowPass {
    pub blur_px: f32,
    pub color: String,
    pub opacity: f32,
}

/// Slightly smaller fill drawn last to brighten the glyph cores.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HighlightPass {
    pub color: String,
    pub opacity: f32,
    pub size_delta_px: f32,
    pub font_families: Vec<String>,
}

/// Styling of the offscreen message image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size_px: f32,
    pub font_weight: u16,
    pub font_families: Vec<String>,
    pub gradient: Vec<GradientStop>,
    pub glow: Option<GlowPass>,
    pub outline_passes: Vec<OutlinePass>,
    pub highlight: Option<HighlightPass>,
    /// Opacity of a black rectangle behind the text. Any value that pushes the backdrop alpha
    /// above the sampling threshold makes the whole canvas sample as text.
    pub backdrop_opacity: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        fn stop(offset: f32, color: &str) -> GradientStop {
            GradientStop {
                offset,
                color: color.to_string(),
            }
        }

        Self {
            font_size_px: 280.0,
            font_weight: 700,
            font_families: vec![
                "Impact".to_string(),
                "Arial Black".to_string(),
                "sans-serif".to_string(),
            ],
            gradient: vec![
                stop(0.0, "#ff1694"),
                stop(0.3, "#ff69b4"),
                stop(0.5, "#ffffff"),
                stop(0.7, "#ff69b4"),
                stop(1.0, "#ff1694"),
            ],
            glow: Some(GlowPass {
                blur_px: 25.0,
                color: "#ff0080".to_string(),
                opacity: 0.9,
            }),
            outline_passes: vec![
                OutlinePass {
                    width_px: 10.0,
                    color: "#ffffff".to_string(),
                },
                OutlinePass {
                    width_px: 5.0,
                    color: "#ff3399".to_string(),
                },
            ],
            highlight: Some(HighlightPass {
                color: "#ffffff".to_string(),
                opacity: 0.9,
                size_delta_px: -5.0,
                font_families: vec![
                    "Consolas".to_string(),
                    "Monaco".to_string(),
                    "monospace".to_string(),
                ],
            }),
            backdrop_opacity: 0.0,
        }
    }
}

impl TextStyle {
    pub fn validate(&self) -> GlyphfallResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GlyphfallError::validation(
                "text font_size_px must be finite and > 0",
            ));
        }
        if self.font_families.is_empty() {
            return Err(GlyphfallError::validation(
                "text font_families must not be empty",
            ));
        }
        for stop in &self.gradient {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(GlyphfallError::validation(
                    "gradient stop offset must be in [0, 1]",
                ));
            }
            validate_hex_color(&stop.color)?;
        }
        for pass in &self.outline_passes {
            if !pass.width_px.is_finite() || pass.width_px <= 0.0 {
                return Err(GlyphfallError::validation("outline width must be > 0"));
            }
            validate_hex_color(&pass.color)?;
        }
        if let Some(glow) = &self.glow {
            validate_hex_color(&glow.color)?;
        }
        if let Some(hl) = &self.highlight {
            validate_hex_color(&hl.color)?;
            if self.font_size_px + hl.size_delta_px <= 0.0 {
                return Err(GlyphfallError::validation(
                    "highlight font size must stay > 0",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(GlyphfallError::validation(
                "backdrop_opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

fn validate_hex_color(s: &str) -> GlyphfallResult<()> {
    let ok = s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !ok {
        return Err(GlyphfallError::validation(format!(
            "expected #rrggbb color, got '{s}'"
        )));
    }
    Ok(())
}

/// Turns a message into an alpha grid.
///
/// Implementations must be deterministic: the same message, canvas and style always produce
/// the same grid, since target sampling is built on top of it. Text wider than the canvas is
/// clipped, never reflowed.
pub trait MessageRasterizer {
    fn rasterize(
        &self,
        message: &str,
        canvas: Canvas,
        style: &TextStyle,
    ) -> GlyphfallResult<AlphaGrid>;
}

/// Rasterizer that lays the message out as SVG text and renders it with resvg.
pub struct SvgTextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for SvgTextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgTextRasterizer")
            .field("faces", &self.face_count())
            .finish()
    }
}

impl Default for SvgTextRasterizer {
    fn default() -> Self {
        Self::with_font_dirs(&[])
    }
}

impl SvgTextRasterizer {
    /// System fonts plus every `.ttf`/`.otf`/`.ttc` file found directly inside `dirs`.
    pub fn with_font_dirs(dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        let rasterizer = Self {
            fontdb: Arc::new(db),
        };
        if rasterizer.face_count() == 0 {
            tracing::warn!("no font faces available; messages will rasterize empty");
        }
        rasterizer
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// Render an SVG document to premultiplied RGBA8 at `canvas` size.
    pub fn render_svg(&self, svg: &str, canvas: Canvas) -> GlyphfallResult<Vec<u8>> {
        canvas.validate()?;
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts).context("parse text svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| GlyphfallError::raster("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.take())
    }

    /// Plain single-color label, used for the ring sprites.
    pub fn label_svg_document(
        text: &str,
        canvas: Canvas,
        font_size_px: f32,
        font_families: &[String],
        color: &str,
    ) -> String {
        let (w, h) = (canvas.width, canvas.height);
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{font_size_px}" fill="{color}">{}</text></svg>"#,
            f64::from(w) / 2.0,
            f64::from(h) / 2.0,
            font_family_list(font_families),
            escape_xml(text)
        )
    }

    /// SVG document drawn for `message`. Passes are layered in the same order as the canvas
    /// effect: glow fill, strokes, gradient re-fill, highlight.
    pub fn svg_document(message: &str, canvas: Canvas, style: &TextStyle) -> String {
        let (w, h) = (canvas.width, canvas.height);
        let cx = f64::from(w) / 2.0;
        let cy = f64::from(h) / 2.0;
        let text = escape_xml(message);
        let families = font_family_list(&style.font_families);

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        svg.push_str("<defs>");
        let _ = write!(
            svg,
            r#"<linearGradient id="fill" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="{w}" y2="0">"#
        );
        for stop in &style.gradient {
            let _ = write!(
                svg,
                r#"<stop offset="{}" stop-color="{}"/>"#,
                stop.offset, stop.color
            );
        }
        svg.push_str("</linearGradient>");
        if let Some(glow) = &style.glow {
            // Canvas shadowBlur is twice the gaussian standard deviation.
            let _ = write!(
                svg,
                r#"<filter id="glow" x="-20%" y="-20%" width="140%" height="140%"><feDropShadow dx="0" dy="0" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#,
                glow.blur_px / 2.0,
                glow.color,
                glow.opacity
            );
        }
        svg.push_str("</defs>");

        if style.backdrop_opacity > 0.0 {
            let _ = write!(
                svg,
                r##"<rect width="{w}" height="{h}" fill="#000000" fill-opacity="{}"/>"##,
                style.backdrop_opacity
            );
        }

        let text_attrs = |size: f32, families: &str| {
            format!(
                r#"x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="central" font-family="{families}" font-size="{size}" font-weight="{}""#,
                style.font_weight
            )
        };
        let main_attrs = text_attrs(style.font_size_px, &families);

        let glow_attr = if style.glow.is_some() {
            r#" filter="url(#glow)""#
        } else {
            ""
        };
        let _ = write!(
            svg,
            r#"<text {main_attrs} fill="url(#fill)"{glow_attr}>{text}</text>"#
        );
        for pass in &style.outline_passes {
            let _ = write!(
                svg,
                r#"<text {main_attrs} fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round">{text}</text>"#,
                pass.color, pass.width_px
            );
        }
        let _ = write!(svg, r#"<text {main_attrs} fill="url(#fill)">{text}</text>"#);
        if let Some(hl) = &style.highlight {
            let hl_attrs = text_attrs(
                style.font_size_px + hl.size_delta_px,
                &font_family_list(&hl.font_families),
            );
            let _ = write!(
                svg,
                r#"<text {hl_attrs} fill="{}" fill-opacity="{}">{text}</text>"#,
                hl.color, hl.opacity
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

impl MessageRasterizer for SvgTextRasterizer {
    #[tracing::instrument(skip(self, style), fields(len = message.len()))]
    fn rasterize(
        &self,
        message: &str,
        canvas: Canvas,
        style: &TextStyle,
    ) -> GlyphfallResult<AlphaGrid> {
        canvas.validate()?;
        style.validate()?;

        let svg = Self::svg_document(message, canvas, style);
        let rgba = self.render_svg(&svg, canvas)?;
        let grid = AlphaGrid::from_rgba8(canvas.width, canvas.height, &rgba)?;
        tracing::debug!(covered = grid.covered(0), "rasterized message");
        Ok(grid)
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), "skipping font: {e}");
        }
    }
}

fn font_family_list(families: &[String]) -> String {
    const GENERIC: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];
    families
        .iter()
        .map(|f| {
            if GENERIC.contains(&f.as_str()) {
                f.clone()
            } else {
                format!("'{}'", escape_xml(f))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
