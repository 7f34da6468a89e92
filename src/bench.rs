//! Benchmark/verification harness.
//!
//! Drives one encoder/decoder pair through N sequential round trips over a
//! single input image: encode, optionally persist the first codestream,
//! decode, verify the decoded digest against the source digest. Timing
//! samples isolate exactly one codec call each, which is why repetitions run
//! strictly sequentially with nothing else in flight.
//!
//! Any codec failure or digest mismatch aborts the run. There are no
//! retries: a retried call would not represent the codec's single-call cost,
//! and a correctness failure must never be silently swallowed.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use crate::format::{ComponentSet, PixelFormat};
use crate::image::Image;
use crate::report::BenchmarkResult;

/// Parameters for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of encode/decode round trips. 0 produces an empty result.
    pub repetitions: u32,

    /// When set, the first repetition's payload is written into this
    /// directory, named by the source image's hex digest.
    pub codestream_dir: Option<PathBuf>,
}

impl BenchConfig {
    /// A run with the given repetition count and no persistence.
    #[must_use]
    pub fn new(repetitions: u32) -> Self {
        Self {
            repetitions,
            codestream_dir: None,
        }
    }

    /// Persist the first codestream under the given directory.
    #[must_use]
    pub fn with_codestream_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.codestream_dir = Some(dir.into());
        self
    }
}

/// Which capability pair an image format routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    Rgb8,
    Rgba8,
    Yuv,
}

/// Map an image format to the capability pair that will handle it.
///
/// 3-component packed 8-bit routes to the RGB8 operations, 4-component
/// packed 8-bit to RGBA8, planar YUV to the YUV operations. Anything else is
/// a configuration error, raised before any codec call.
fn select_dispatch(format: &PixelFormat) -> Result<Dispatch> {
    if format.is_planar {
        if format.components == ComponentSet::YUV {
            return Ok(Dispatch::Yuv);
        }
    } else if format.bit_depth == 8 {
        if format.components == ComponentSet::RGB {
            return Ok(Dispatch::Rgb8);
        }
        if format.components == ComponentSet::RGBA {
            return Ok(Dispatch::Rgba8);
        }
    }
    Err(Error::Configuration(format!(
        "no encode/decode dispatch for {}-bit {} {} layout",
        format.bit_depth,
        format.components.name(),
        if format.is_planar { "planar" } else { "packed" },
    )))
}

/// Run `config.repetitions` encode/decode round trips and assemble the
/// result record.
///
/// The adapter pair is exclusively owned by this run; each returned
/// codestream and image is fully consumed (persisted, decoded, hashed)
/// before the next call is issued.
pub fn run(
    encoder: &dyn Encoder,
    decoder: &dyn Decoder,
    image: &Image,
    config: &BenchConfig,
) -> Result<BenchmarkResult> {
    let dispatch = select_dispatch(image.format())?;
    let source_digest = image.digest();

    let repetitions = config.repetitions as usize;
    let mut encode_times = Vec::with_capacity(repetitions);
    let mut decode_times = Vec::with_capacity(repetitions);
    let mut codestream_size = 0u64;
    let mut codestream_path = None;

    for i in 0..repetitions {
        let start = Instant::now();
        let codestream = match dispatch {
            Dispatch::Rgb8 => encoder.encode_rgb8(image),
            Dispatch::Rgba8 => encoder.encode_rgba8(image),
            Dispatch::Yuv => encoder.encode_yuv(image),
        }?;
        encode_times.push(start.elapsed());

        if i == 0 {
            codestream_size = codestream.total_size() as u64;

            if let Some(dir) = &config.codestream_dir {
                fs::create_dir_all(dir)?;
                let path = dir.join(source_digest.to_hex());
                fs::write(&path, codestream.payload())?;
                codestream_path = Some(path);
            }
        }

        let start = Instant::now();
        let decoded = match dispatch {
            Dispatch::Rgb8 => decoder.decode_rgb8(&codestream),
            Dispatch::Rgba8 => decoder.decode_rgba8(&codestream),
            Dispatch::Yuv => decoder.decode_yuv(&codestream),
        }?;
        decode_times.push(start.elapsed());

        let decoded_digest = decoded.digest();
        if decoded_digest != source_digest {
            return Err(Error::RoundTripMismatch {
                expected: source_digest,
                actual: decoded_digest,
            });
        }
    }

    Ok(BenchmarkResult {
        decode_times,
        encode_times,
        image_size: image.total_bytes(),
        codestream_size,
        image_width: image.width(),
        image_height: image.height(),
        codec: encoder.name().to_string(),
        source_digest: source_digest.to_hex(),
        codestream_path,
        timestamp: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::codec::{StoreDecoder, StoreEncoder};
    use crate::codestream::{Codestream, SideInfo};

    /// 8x8 packed RGB8 filled with (x + y) mod 256 per channel.
    fn checker_image() -> Image {
        let mut data = Vec::with_capacity(8 * 8 * 3);
        for y in 0u32..8 {
            for x in 0u32..8 {
                let v = ((x + y) % 256) as u8;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Image::packed(8, 8, PixelFormat::RGB8, data).unwrap()
    }

    /// Decoder stub that flips the last payload byte before reconstructing.
    struct CorruptingDecoder;

    impl Decoder for CorruptingDecoder {
        fn name(&self) -> &'static str {
            "corrupting-stub"
        }

        fn decode_rgb8(&self, codestream: &Codestream) -> Result<Image> {
            let mut payload = codestream.payload().to_vec();
            *payload.last_mut().unwrap() ^= 1;
            let corrupted = Codestream::with_side_info(
                payload,
                codestream.side_info().unwrap().clone(),
            );
            StoreDecoder.decode_rgb8(&corrupted)
        }
    }

    /// Encoder stub counting how often the codec was actually invoked.
    struct CountingEncoder {
        calls: Cell<u32>,
    }

    impl Encoder for CountingEncoder {
        fn name(&self) -> &'static str {
            "counting-stub"
        }

        fn encode_rgb8(&self, image: &Image) -> Result<Codestream> {
            self.calls.set(self.calls.get() + 1);
            Ok(Codestream::with_side_info(
                image.plane(0).to_vec(),
                SideInfo::for_image(image),
            ))
        }
    }

    #[test]
    fn pass_through_run_produces_three_samples() {
        let image = checker_image();
        let result = run(
            &StoreEncoder,
            &StoreDecoder,
            &image,
            &BenchConfig::new(3),
        )
        .unwrap();

        assert_eq!(result.encode_times.len(), 3);
        assert_eq!(result.decode_times.len(), 3);
        assert_eq!(result.image_size, 192);
        assert_eq!(result.image_width, 8);
        assert_eq!(result.image_height, 8);
        assert_eq!(result.codec, "store");
        // store payload is the raw plane plus a side-channel record
        assert!(result.codestream_size > 192);
        assert_eq!(result.source_digest, image.digest().to_hex());
    }

    #[test]
    fn mismatch_aborts_on_first_repetition() {
        let encoder = CountingEncoder {
            calls: Cell::new(0),
        };
        let err = run(
            &encoder,
            &CorruptingDecoder,
            &checker_image(),
            &BenchConfig::new(3),
        )
        .unwrap_err();

        assert!(matches!(err, Error::RoundTripMismatch { .. }));
        // Repetition 0 failed verification, so repetitions 1 and 2 never ran.
        assert_eq!(encoder.calls.get(), 1);
    }

    #[test]
    fn zero_repetitions_is_an_empty_valid_result() {
        let image = checker_image();
        let result = run(
            &StoreEncoder,
            &StoreDecoder,
            &image,
            &BenchConfig::new(0),
        )
        .unwrap();

        assert!(result.encode_times.is_empty());
        assert!(result.decode_times.is_empty());
        assert_eq!(result.codestream_size, 0);
        assert_eq!(result.image_size, 192);
    }

    #[test]
    fn unrecognized_layout_fails_before_any_codec_call() {
        // 2-component packed is not a routable layout.
        let format = PixelFormat::packed(8, ComponentSet::new("YA", 2));
        let image = Image::packed(4, 4, format, vec![0; 32]).unwrap();

        let encoder = CountingEncoder {
            calls: Cell::new(0),
        };
        let err = run(&encoder, &StoreDecoder, &image, &BenchConfig::new(2)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(encoder.calls.get(), 0);
    }

    #[test]
    fn dispatch_routes_by_components_and_layout() {
        assert_eq!(select_dispatch(&PixelFormat::RGB8).unwrap(), Dispatch::Rgb8);
        assert_eq!(
            select_dispatch(&PixelFormat::RGBA8).unwrap(),
            Dispatch::Rgba8
        );
        assert_eq!(
            select_dispatch(&PixelFormat::YUV422P10).unwrap(),
            Dispatch::Yuv
        );
        // 10-bit packed RGB has no dispatch.
        assert!(select_dispatch(&PixelFormat::packed(10, ComponentSet::RGB)).is_err());
        // Planar RGB has no dispatch either.
        let mut planar_rgb = PixelFormat::RGB8;
        planar_rgb.is_planar = true;
        assert!(select_dispatch(&planar_rgb).is_err());
    }

    #[test]
    fn first_codestream_is_persisted_under_hex_digest() {
        let dir = tempfile::tempdir().unwrap();
        let image = checker_image();
        let result = run(
            &StoreEncoder,
            &StoreDecoder,
            &image,
            &BenchConfig::new(2).with_codestream_dir(dir.path()),
        )
        .unwrap();

        let expected = dir.path().join(image.digest().to_hex());
        assert_eq!(result.codestream_path.as_deref(), Some(expected.as_path()));
        let written = fs::read(&expected).unwrap();
        // Only the payload is written, not the side-channel record.
        assert_eq!(written, image.plane(0));
    }
}
