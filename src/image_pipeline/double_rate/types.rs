//! Frame types on either side of the codec

/// A frame as captured in double-rate mode, 8 bits per sample, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulatedImage {
    /// Samples per row (twice the sensor width)
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// `width * height` samples, no header
    pub data: Vec<u8>,
}

/// A reconstructed sensor frame, 8 bits per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemodulatedImage {
    /// Pixels per row (the camera's `Window_W`)
    pub width: usize,
    /// Number of rows, identical to the modulated source
    pub height: usize,
    /// `width * height` pixels
    pub data: Vec<u8>,
}

impl ModulatedImage {
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.width.max(1))
    }
}

impl DemodulatedImage {
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.width.max(1))
    }
}
