use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::double_rate::types::ModulatedImage;

pub trait ModulatedImageReader {
    fn read_modulated(&self, data: &[u8]) -> Result<ModulatedImage>;

    /// Like [`read_modulated`](Self::read_modulated) for a buffer the caller
    /// no longer needs; readers that keep the bytes as-is can take ownership.
    fn read_modulated_owned(&self, data: Vec<u8>) -> Result<ModulatedImage> {
        self.read_modulated(&data)
    }
}
