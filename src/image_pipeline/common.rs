//! Common utilities module
//!
//! Error types shared by the codec, the readers/writers and the pipeline.

pub mod error;

pub use error::{DemodError, Result};
