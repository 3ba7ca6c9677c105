//! Types for debayering operations

/// RGB image data after debayering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...]
    pub data: Vec<u8>,
}

/// Colour filter layout of the top-left 2x2 cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BayerPattern {
    #[default]
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl BayerPattern {
    pub(crate) fn cfa(self) -> bayer::CFA {
        match self {
            BayerPattern::Rggb => bayer::CFA::RGGB,
            BayerPattern::Bggr => bayer::CFA::BGGR,
            BayerPattern::Grbg => bayer::CFA::GRBG,
            BayerPattern::Gbrg => bayer::CFA::GBRG,
        }
    }
}
