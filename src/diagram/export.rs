//! Image export
//!
//! Writes a rendered diagram to disk. The format follows the file
//! extension: `.svg` is written as-is, `.png` goes through resvg.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::graph::Diagram;
use super::svg::SvgRenderer;
use crate::error::{Error, Result};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Rasterize an SVG document to PNG bytes
pub fn rasterize(svg: &str, scale: f32, font_family: &str) -> Result<Vec<u8>> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(Error::Render(format!(
            "scale must be a positive number, got {scale}"
        )));
    }

    let mut options = resvg::usvg::Options::default();
    options.font_family = font_family.to_string();
    options.fontdb_mut().load_system_fonts();

    let tree = resvg::usvg::Tree::from_str(svg, &options)
        .map_err(|e| Error::Render(format!("failed to parse generated SVG: {e}")))?;

    let size = tree.size().to_int_size();
    let width = ((size.width() as f32) * scale).ceil();
    let height = ((size.height() as f32) * scale).ceil();
    if width < 1.0 || height < 1.0 || width > u32::MAX as f32 || height > u32::MAX as f32 {
        return Err(Error::Render(format!(
            "scaled size {width}x{height} is out of range"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width as u32, height as u32).ok_or_else(|| {
        Error::Render(format!("failed to allocate {width}x{height} surface"))
    })?;

    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| Error::Render(format!("failed to encode PNG: {e}")))
}

/// Render `diagram` and write it to `path`.
///
/// Nothing is retried; the file is written in one call.
pub fn write_image(
    diagram: &Diagram,
    renderer: &SvgRenderer,
    path: &Path,
    scale: f32,
) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    let svg = renderer.render(diagram)?;

    let bytes = match format {
        ImageFormat::Svg => svg.into_bytes(),
        ImageFormat::Png => rasterize(&svg, scale, renderer.theme.primary_font())?,
    };
    debug!(?format, bytes = bytes.len(), "encoded image");

    fs::write(path, &bytes)?;
    info!("Wrote diagram to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("dir/a.SVG")).unwrap(), ImageFormat::Svg);
        assert!(matches!(
            ImageFormat::from_path(&PathBuf::from("a.gif")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(ImageFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_rasterize_rejects_bad_scale() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#;
        assert!(matches!(rasterize(svg, 0.0, "sans-serif"), Err(Error::Render(_))));
        assert!(matches!(rasterize(svg, f32::NAN, "sans-serif"), Err(Error::Render(_))));
    }

    #[test]
    fn test_rasterize_scales_output() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="8"><rect width="10" height="8" fill="#ffffff"/></svg>"##;
        let png = rasterize(svg, 2.0, "sans-serif").unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
