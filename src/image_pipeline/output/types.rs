//! Output format types

use std::path::Path;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Container written for a demodulated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Headerless row-major bytes
    #[default]
    Raw,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Guesses the format from a file extension, falling back to raw.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("bmp") => OutputFormat::Bmp,
            Some("tif") | Some("tiff") => OutputFormat::Tiff,
            _ => OutputFormat::Raw,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
        }
    }
}
