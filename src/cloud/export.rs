//! Saving the cloud as SVG or PNG

use crate::utils::premul_to_straight;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("invalid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("cannot allocate a {width}x{height} image")]
    Pixmap { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn write_svg(svg: &str, path: &Path) -> Result<(), ExportError> {
    if svg.is_empty() {
        return Err(ExportError::Empty);
    }
    std::fs::write(path, svg)?;
    info!(path = %path.display(), "Word cloud exported as SVG");
    Ok(())
}

/// Rasterize `svg` at `scale`, returning straight-alpha RGBA pixels.
pub fn rasterize(svg: &str, scale: f32) -> Result<(Vec<u8>, u32, u32), ExportError> {
    if svg.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    debug!(faces = options.fontdb.len(), "System fonts loaded for export");

    let tree = resvg::usvg::Tree::from_str(svg, &options)?;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::Pixmap { width, height })?;
    // Opaque white background
    pixmap.fill(resvg::tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok((premul_to_straight(&pixmap), width, height))
}

pub fn write_png(svg: &str, path: &Path, scale: f32) -> Result<(), ExportError> {
    let (pixels, width, height) = rasterize(svg, scale)?;
    let img = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or(ExportError::Pixmap { width, height })?;
    img.save_with_format(path, image::ImageFormat::Png)?;
    info!(path = %path.display(), width, height, "Word cloud exported as PNG");
    Ok(())
}
