/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! SVG QR renderer.
//!
//! Encodes the payload bytes with the `qrcode` crate and emits a standalone
//! SVG document. The quiet zone is exactly [`RenderOptions::margin`] modules
//! wide on every side. Vector output ignores [`RenderOptions::quality`].

use crate::traits::{ErrorCorrection, QrRenderer, RenderOptions};
use async_trait::async_trait;
use pixcode_core::error::RenderError;
use pixcode_core::types::{ImageFormat, QrImage};
use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write as _;

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => Self::L,
            ErrorCorrection::Medium => Self::M,
            ErrorCorrection::Quartile => Self::Q,
            ErrorCorrection::High => Self::H,
        }
    }
}

/// Renders payloads as SVG documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgQrRenderer;

impl SvgQrRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders synchronously.
    ///
    /// The document's `viewBox` is measured in modules, symbol plus margin
    /// on both sides. Its pixel size is the smallest whole multiple of that
    /// count reaching [`RenderOptions::width`].
    ///
    /// # Errors
    /// Returns `RenderError::UnsupportedFormat` for non-SVG formats and
    /// `RenderError::Encode` if the text does not fit in a QR symbol.
    pub fn render_svg(
        &self,
        text: &str,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        if options.format != ImageFormat::Svg {
            return Err(RenderError::UnsupportedFormat(options.format.to_string()));
        }

        let code =
            QrCode::with_error_correction_level(text.as_bytes(), options.error_correction.into())
                .map_err(|e| RenderError::Encode(e.to_string()))?;

        let modules = code.width();
        let margin = options.margin as usize;
        let size = modules + 2 * margin;
        let scale = (options.width as usize).div_ceil(size).max(1);
        let pixels = size * scale;

        let mut path = String::new();
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color == Color::Dark {
                let x = i % modules + margin;
                let y = i / modules + margin;
                // writing to a String cannot fail
                let _ = write!(path, "M{x} {y}h1v1h-1z");
            }
        }

        Ok(format!(
            concat!(
                r#"<?xml version="1.0" standalone="yes"?>"#,
                r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" "#,
                r#"width="{pixels}" height="{pixels}" viewBox="0 0 {size} {size}" "#,
                r#"shape-rendering="crispEdges">"#,
                r#"<rect x="0" y="0" width="{size}" height="{size}" fill="{light}"/>"#,
                r#"<path fill="{dark}" d="{path}"/>"#,
                "</svg>"
            ),
            pixels = pixels,
            size = size,
            light = options.light_color,
            dark = options.dark_color,
            path = path,
        ))
    }
}

#[async_trait]
impl QrRenderer for SvgQrRenderer {
    async fn render(&self, text: &str, options: &RenderOptions) -> Result<QrImage, RenderError> {
        let svg = self.render_svg(text, options)?;
        Ok(QrImage::new(ImageFormat::Svg, svg.into_bytes()))
    }
}
