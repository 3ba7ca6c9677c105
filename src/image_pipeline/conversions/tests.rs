use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{DemodError, Result};
use crate::image_pipeline::conversions::{DemodulatePipeline, DemodulationConfig};
use crate::image_pipeline::debayer::types::{BayerPattern, RgbImageData};
use crate::image_pipeline::double_rate::{DemodulatedImage, DoubleRateCodec, ModulatedImage};
use crate::image_pipeline::output::{ImageWriter, RawWriter, StandardTiffWriter, TiffCompression};
use crate::image_pipeline::raw::{ModulatedImageReader, RawFrameReader};

struct MockReader {
    should_fail: bool,
    mock_data: Option<ModulatedImage>,
}

impl ModulatedImageReader for MockReader {
    fn read_modulated(&self, _data: &[u8]) -> Result<ModulatedImage> {
        if self.should_fail {
            return Err(DemodError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or(ModulatedImage {
            width: 200,
            height: 100,
            data: vec![0u8; 200 * 100],
        }))
    }
}

#[derive(Default)]
struct Written {
    gray: Vec<DemodulatedImage>,
    rgb: Vec<RgbImageData>,
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Written>>,
}

impl ImageWriter for MockWriter {
    fn write_gray(
        &self,
        image: &DemodulatedImage,
        _output: &mut dyn Write,
        _config: &DemodulationConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(DemodError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().gray.push(image.clone());
        Ok(())
    }

    fn write_rgb(
        &self,
        image: &RgbImageData,
        _output: &mut dyn Write,
        _config: &DemodulationConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(DemodError::EncodeError("Mock encode error".to_string()));
        }
        self.written.lock().unwrap().rgb.push(image.clone());
        Ok(())
    }
}

fn pipeline(
    reader: MockReader,
    writer_fails: bool,
    config: DemodulationConfig,
) -> (DemodulatePipeline<MockReader, MockWriter>, Arc<Mutex<Written>>) {
    let written = Arc::new(Mutex::new(Written::default()));
    let writer = MockWriter {
        should_fail: writer_fails,
        written: written.clone(),
    };
    (DemodulatePipeline::with_custom(reader, writer, config), written)
}

fn ok_reader() -> MockReader {
    MockReader {
        should_fail: false,
        mock_data: None,
    }
}

#[test]
fn test_config_builder() {
    let config = DemodulationConfig::builder()
        .color_variant(true)
        .demodulated_width(Some(2048))
        .parallel(false)
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .debayer(Some(BayerPattern::Gbrg))
        .build();

    assert!(config.color_variant);
    assert_eq!(config.demodulated_width, Some(2048));
    assert!(!config.parallel);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
    assert_eq!(config.debayer, Some(BayerPattern::Gbrg));
}

#[test]
fn test_successful_conversion() {
    let (pipeline, written) = pipeline(ok_reader(), false, DemodulationConfig::default());

    let mut output = Cursor::new(Vec::new());
    let summary = pipeline.convert(b"fake dr1 data", &mut output).unwrap();

    assert_eq!(summary.modulated_width, 200);
    assert_eq!(summary.demodulated_width, 100);
    assert_eq!(summary.height, 100);
    assert!(!summary.debayered);

    let written = written.lock().unwrap();
    assert_eq!(written.gray.len(), 1);
    assert_eq!(written.gray[0].data.len(), 100 * 100);
}

#[test]
fn test_reader_failure() {
    let reader = MockReader {
        should_fail: true,
        mock_data: None,
    };
    let (pipeline, written) = pipeline(reader, false, DemodulationConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(result.unwrap_err(), DemodError::DecodeError(_)));
    assert!(written.lock().unwrap().gray.is_empty());
}

#[test]
fn test_writer_failure() {
    let (pipeline, _) = pipeline(ok_reader(), true, DemodulationConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(result.unwrap_err(), DemodError::EncodeError(_)));
}

#[test]
fn test_explicit_width_must_match_frame() {
    let config = DemodulationConfig::builder()
        .demodulated_width(Some(64))
        .build();
    let (pipeline, _) = pipeline(ok_reader(), false, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(result.unwrap_err(), DemodError::InvalidWidth(200)));
}

#[test]
fn test_dimension_validation_failure() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(ModulatedImage {
            width: 8000,
            height: 2,
            data: vec![0u8; 8000 * 2],
        }),
    };
    let config = DemodulationConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(5000))
        .build();
    let (pipeline, _) = pipeline(reader, false, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(
        result.unwrap_err(),
        DemodError::InvalidDimensions(8000, 2, 4000)
    ));
}

#[test]
fn test_dimension_validation_disabled() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(ModulatedImage {
            width: 8000,
            height: 2,
            data: vec![0u8; 8000 * 2],
        }),
    };
    let config = DemodulationConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(5000))
        .build();
    let (pipeline, _) = pipeline(reader, false, config);

    let mut output = Cursor::new(Vec::new());
    assert!(pipeline.convert(b"fake dr1 data", &mut output).is_ok());
}

#[test]
fn test_debayer_writes_rgb() {
    let config = DemodulationConfig::builder()
        .color_variant(true)
        .debayer(Some(BayerPattern::Rggb))
        .build();
    let (pipeline, written) = pipeline(ok_reader(), false, config);

    let mut output = Cursor::new(Vec::new());
    let summary = pipeline.convert(b"fake dr1 data", &mut output).unwrap();
    assert!(summary.debayered);

    let written = written.lock().unwrap();
    assert!(written.gray.is_empty());
    assert_eq!(written.rgb.len(), 1);
    assert_eq!(written.rgb[0].data.len(), 100 * 100 * 3);
}

#[test]
fn test_color_variant_selects_interleave_order() {
    let codec = DoubleRateCodec::new();
    let sensor = DemodulatedImage {
        width: 8,
        height: 2,
        data: (0..16).map(|v| v * 16 + 15 - v).collect(),
    };
    let modulated = codec.modulate(&sensor, true).unwrap();

    let reader = MockReader {
        should_fail: false,
        mock_data: Some(modulated),
    };
    let config = DemodulationConfig::builder().color_variant(true).build();
    let (pipeline, written) = pipeline(reader, false, config);

    let mut output = Cursor::new(Vec::new());
    pipeline.convert(b"fake dr1 data", &mut output).unwrap();
    assert_eq!(written.lock().unwrap().gray[0], sensor);
}

#[test]
fn test_dr1_file_to_raw_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("image.dr1");
    let output = dir.path().join("image.raw");
    std::fs::write(&input, vec![0x80u8; 4096 * 100]).unwrap();

    let config = DemodulationConfig::builder()
        .demodulated_width(Some(2048))
        .build();
    let summary = DemodulatePipeline::new(4096, config)
        .convert_file(&input, &output)
        .unwrap();

    assert_eq!(summary.demodulated_width, 2048);
    assert_eq!(summary.height, 100);
    let written = std::fs::read(&output).unwrap();
    assert_eq!(written.len(), 2048 * 100);
    // coarse 0x80 and fine 0x80 give 0x80 | 0x08
    assert!(written.iter().all(|&b| b == 0x88));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = DemodulatePipeline::new(4096, DemodulationConfig::default())
        .convert_file(dir.path().join("missing.dr1"), dir.path().join("image.raw"));

    assert!(matches!(result.unwrap_err(), DemodError::InputReadError(_)));
}

#[test]
fn test_failed_conversion_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("image.dr1");
    let output = dir.path().join("image.raw");
    // Not a whole number of 4096-byte rows.
    std::fs::write(&input, vec![0u8; 4096 * 3 + 17]).unwrap();

    let pipeline = DemodulatePipeline::with_custom(
        RawFrameReader::new(4096),
        RawWriter,
        DemodulationConfig::default(),
    );
    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result.unwrap_err(), DemodError::SizeMismatch { .. }));
    assert!(!output.exists());
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name() != "image.dr1")
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_set_config_switches_parallelism() {
    let (mut pipeline, _) = pipeline(ok_reader(), false, DemodulationConfig::default());
    pipeline.set_config(DemodulationConfig::builder().parallel(false).build());
    assert!(!pipeline.config().parallel);
}

fn tiff_compression_tag(encoded: Vec<u8>) -> u32 {
    let mut decoder = tiff::decoder::Decoder::new(Cursor::new(encoded)).unwrap();
    decoder.get_tag_u32(tiff::tags::Tag::Compression).unwrap()
}

#[test]
fn test_tiff_compression_follows_config() {
    let input = vec![0x5Au8; 256 * 8];

    for (compression, tag) in [
        (TiffCompression::None, 1u32),
        (TiffCompression::Lzw, 5),
        (TiffCompression::DeflateFast, 8),
    ] {
        let config = DemodulationConfig::builder().compression(compression).build();
        let pipeline =
            DemodulatePipeline::with_custom(RawFrameReader::new(256), StandardTiffWriter, config);

        let mut output = Cursor::new(Vec::new());
        pipeline.convert(&input, &mut output).unwrap();

        assert_eq!(tiff_compression_tag(output.into_inner()), tag);
    }
}

#[test]
fn test_set_config_changes_tiff_compression() {
    let input = vec![0x5Au8; 256 * 8];
    let mut pipeline = DemodulatePipeline::with_custom(
        RawFrameReader::new(256),
        StandardTiffWriter,
        DemodulationConfig::default(),
    );
    pipeline.set_config(
        DemodulationConfig::builder()
            .compression(TiffCompression::Lzw)
            .build(),
    );

    let mut output = Cursor::new(Vec::new());
    pipeline.convert(&input, &mut output).unwrap();

    assert_eq!(tiff_compression_tag(output.into_inner()), 5);
}

fn frame_reader(width: usize, height: usize) -> MockReader {
    MockReader {
        should_fail: false,
        mock_data: Some(ModulatedImage {
            width,
            height,
            data: vec![0u8; width * height],
        }),
    }
}

#[test]
fn test_zero_width_frame_rejected_as_dimensions() {
    let (pipeline, written) = pipeline(frame_reader(0, 10), false, DemodulationConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(
        result.unwrap_err(),
        DemodError::InvalidDimensions(0, 10, 0)
    ));
    assert!(written.lock().unwrap().gray.is_empty());
}

#[test]
fn test_zero_height_frame_rejected_as_dimensions() {
    let (pipeline, _) = pipeline(frame_reader(64, 0), false, DemodulationConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(
        result.unwrap_err(),
        DemodError::InvalidDimensions(64, 0, 32)
    ));
}

#[test]
fn test_zero_width_frame_without_validation() {
    let config = DemodulationConfig::builder()
        .validate_dimensions(false)
        .build();
    let (pipeline, _) = pipeline(frame_reader(0, 10), false, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dr1 data", &mut output);

    assert!(matches!(result.unwrap_err(), DemodError::InvalidWidth(0)));
}
