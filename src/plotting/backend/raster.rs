//! Raster output: rasterize the SVG document with resvg, encode with image.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use image::{DynamicImage, RgbaImage};
use log::debug;
use resvg::{tiny_skia, usvg};

use super::OutputFormat;
use crate::plotting::error::{PlotError, PlotResult};

/// DPI at which one SVG user unit equals one pixel.
pub const BASE_DPI: f64 = 100.0;

// System fonts are scanned once per process.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            debug!("Loaded {} font faces for rasterization", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG document at `dpi`.
pub fn rasterize(svg: &str, dpi: f64) -> PlotResult<RgbaImage> {
    if !(dpi.is_finite() && dpi > 0.0) {
        return Err(PlotError::InvalidConfig(format!("dpi must be positive, got {}", dpi)));
    }

    let mut options = usvg::Options::default();
    options.fontdb = font_database();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| PlotError::Render(format!("failed to parse SVG: {}", e)))?;

    let scale = (dpi / BASE_DPI) as f32;
    let size = tree.size();
    let width = (size.width() * scale).round().max(1.0) as u32;
    let height = (size.height() * scale).round().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        PlotError::Render(format!("cannot allocate {}x{} pixmap", width, height))
    })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha.
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    debug!("Rasterized figure to {}x{} at {} dpi", width, height, dpi);
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| PlotError::Render("pixel buffer size mismatch".to_string()))
}

/// Rasterize and write an SVG document in a raster `format`.
pub fn write_raster(svg: &str, path: &Path, format: OutputFormat, dpi: f64) -> PlotResult<()> {
    let image_format = format
        .image_format()
        .ok_or_else(|| PlotError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    let image = rasterize(svg, dpi)?;

    // JPEG and BMP have no alpha channel support worth keeping here.
    let image = match format {
        OutputFormat::Jpeg | OutputFormat::Bmp => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(image),
    };

    image
        .save_with_format(path, image_format)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => PlotError::Io(io),
            other => PlotError::Render(format!("failed to encode {}: {}", path.display(), other)),
        })
}
