//! # codec-bench
//!
//! Correctness and performance benchmark harness for lossless image codecs.
//!
//! The library loads a raw image, repeatedly drives it through a pluggable
//! codec adapter, times each encode and decode, verifies every round trip is
//! bit-exact via content digests, and reports compressed size and timing as
//! a structured JSON record.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use codec_bench::{bench, codec, load, BenchConfig};
//!
//! let image = load::load_image("photo.png".as_ref())?;
//! let (encoder, decoder) = codec::create("qoi")?;
//! let result = bench::run(
//!     encoder.as_ref(),
//!     decoder.as_ref(),
//!     &image,
//!     &BenchConfig::new(5),
//! )?;
//! println!("{}", result.to_json_pretty()?);
//! ```
//!
//! ## Modules
//!
//! - [`format`]: pixel format model (components, bit depth, subsampling)
//! - [`image`]: plane buffers, layout arithmetic and content digests
//! - [`codestream`]: compressed payload plus side-channel container
//! - [`codec`]: the encoder/decoder capability interface and registry
//! - [`bench`]: the round-trip benchmark/verification harness
//! - [`load`]: PNG and raw planar YUV input loading
//! - [`report`]: the serialized result record
//! - [`error`]: error types for the library

pub mod bench;
pub mod codec;
pub mod codestream;
pub mod digest;
pub mod error;
pub mod format;
pub mod image;
pub mod load;
pub mod report;

// Re-export commonly used types
pub use bench::BenchConfig;
pub use codec::{CodecOp, Decoder, Encoder};
pub use codestream::{Codestream, SideInfo};
pub use digest::Digest;
pub use error::{Error, Result};
pub use format::{ComponentSet, PixelFormat};
pub use image::Image;
pub use report::BenchmarkResult;
