//! Output backends: the SVG document builder and the raster encoder.

mod raster;
mod svg;

pub use raster::{rasterize, write_raster, BASE_DPI};
pub use svg::{escape_xml, SvgBackend};

use std::path::Path;

use crate::plotting::error::{PlotError, PlotResult};

/// File formats a figure can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Infer the format from a path's extension, ignoring case.
    pub fn from_path(path: &Path) -> PlotResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let format = match ext.as_deref() {
            Some("svg") => OutputFormat::Svg,
            Some("png") => OutputFormat::Png,
            Some("jpg") | Some("jpeg") => OutputFormat::Jpeg,
            Some("bmp") => OutputFormat::Bmp,
            Some("tif") | Some("tiff") => OutputFormat::Tiff,
            _ => {
                return Err(PlotError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        Ok(format)
    }

    pub fn is_raster(&self) -> bool {
        !matches!(self, OutputFormat::Svg)
    }

    pub(crate) fn image_format(&self) -> Option<image::ImageFormat> {
        match self {
            OutputFormat::Svg => None,
            OutputFormat::Png => Some(image::ImageFormat::Png),
            OutputFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            OutputFormat::Bmp => Some(image::ImageFormat::Bmp),
            OutputFormat::Tiff => Some(image::ImageFormat::Tiff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        let cases = [
            ("a.svg", OutputFormat::Svg),
            ("a.PNG", OutputFormat::Png),
            ("dir.d/a.jpg", OutputFormat::Jpeg),
            ("a.JPEG", OutputFormat::Jpeg),
            ("a.bmp", OutputFormat::Bmp),
            ("a.tif", OutputFormat::Tiff),
            ("a.tiff", OutputFormat::Tiff),
        ];
        for (path, expected) in cases {
            assert_eq!(OutputFormat::from_path(Path::new(path)).unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_extension() {
        for path in ["a.pdf", "noext", "a."] {
            let err = OutputFormat::from_path(Path::new(path)).unwrap_err();
            assert!(matches!(err, PlotError::UnsupportedFormat { .. }));
        }
    }
}
