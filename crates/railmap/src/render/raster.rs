#![forbid(unsafe_code)]

use crate::render::{HeadlessError, SvgRenderOptions};
use railmap_core::{Color, ConfigFormat};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("invalid raster scale {0}: must be positive")]
    InvalidScale(f32),
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color: {0}")]
    Background(String),
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Multiplier applied on top of `dpi`.
    pub scale: f32,
    /// Pixels per physical inch. The SVG root is sized in inches, so this fixes the pixel size.
    pub dpi: f32,
    /// `transparent`, a palette color name, or `#rgb` / `#rgba` / `#rrggbb` / `#rrggbbaa`.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            dpi: 96.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

pub fn render_png_sync(
    text: &str,
    format: ConfigFormat,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(text, format, svg_options)?;
    svg_to_png(&svg, raster)
}

pub fn render_jpeg_sync(
    text: &str,
    format: ConfigFormat,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(text, format, svg_options)?;
    svg_to_jpeg(&svg, raster)
}

pub fn render_pdf_sync(
    text: &str,
    format: ConfigFormat,
    svg_options: &SvgRenderOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(text, format, svg_options)?;
    svg_to_pdf(&svg)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = options
        .background
        .as_deref()
        .map(|bg| parse_background(bg).ok_or_else(|| RasterError::Background(bg.to_string())))
        .transpose()?;
    let pixmap = svg_to_pixmap(svg, options, background)?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_background(bg) else {
        return Err(RasterError::Background(bg.to_string()));
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options, Some(color))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // Opaque fill underneath everything: alpha is always 255 and can be dropped.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst.copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

/// Converts to a single-page PDF with the page sized to the SVG's physical size.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

fn svg_to_pixmap(
    svg: &str,
    options: &RasterOptions,
    background: Option<tiny_skia::Color>,
) -> Result<tiny_skia::Pixmap> {
    if !(options.scale.is_finite() && options.scale > 0.0) {
        return Err(RasterError::InvalidScale(options.scale));
    }

    let mut opt = usvg::Options::default();
    opt.dpi = options.dpi;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // usvg resolves the `in` root size with `dpi` and maps the viewBox onto it.
    let size = tree.size();
    let width_px = (size.width() * options.scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * options.scale).ceil().max(1.0) as u32;
    tracing::debug!(width_px, height_px, "rasterizing svg");

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background {
        pixmap.fill(color);
    }

    let transform = tiny_skia::Transform::from_scale(options.scale, options.scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

fn parse_background(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    if s == "transparent" {
        return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0));
    }
    if let Ok(named) = s.parse::<Color>() {
        let [r, g, b] = named.rgb();
        return Some(tiny_skia::Color::from_rgba8(r, g, b, 255));
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    let [r, g, b, a] = match bytes.len() {
        3 | 4 => [
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            bytes.get(3).map_or(Some(255), |c| hex1(*c))?,
        ],
        6 | 8 => [
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            bytes.get(6..8).map_or(Some(255), hex2)?,
        ],
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1in" height="0.5in" viewBox="0 0 25.4 12.7"><rect width="25.4" height="12.7" fill="black"/></svg>"#;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn svg_to_jpeg_produces_jpeg_signature() {
        let bytes = svg_to_jpeg(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn jpeg_rejects_transparent_background() {
        let options = RasterOptions {
            background: Some("transparent".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &options),
            Err(RasterError::JpegOpaqueBackgroundRequired)
        ));
    }

    #[test]
    fn svg_to_pdf_produces_pdf_signature() {
        let bytes = svg_to_pdf(SQUARE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn pixmap_is_sized_from_physical_inches() {
        let pixmap = svg_to_pixmap(SQUARE, &RasterOptions::default(), None).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (96, 48));
        let doubled = RasterOptions {
            scale: 2.0,
            ..Default::default()
        };
        let pixmap = svg_to_pixmap(SQUARE, &doubled, None).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (192, 96));
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let options = RasterOptions {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            svg_to_png(SQUARE, &options),
            Err(RasterError::InvalidScale(_))
        ));
    }

    #[test]
    fn background_accepts_palette_names_and_hex() {
        let grey = parse_background("Grey").unwrap();
        assert_eq!(grey.to_color_u8().red(), 128);
        let c = parse_background("#ff000080").unwrap().to_color_u8();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (255, 0, 0, 128));
        let c = parse_background("#0f0").unwrap().to_color_u8();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0, 255, 0, 255));
        assert!(parse_background("teal").is_none());
        assert!(parse_background("#12345").is_none());
        assert!(matches!(
            svg_to_png(
                SQUARE,
                &RasterOptions {
                    background: Some("teal".to_string()),
                    ..Default::default()
                }
            ),
            Err(RasterError::Background(_))
        ));
    }
}
