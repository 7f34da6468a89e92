//! Uniform codec adapter contract and the codec registry.
//!
//! Every wrapped codec implements the small [`Encoder`]/[`Decoder`]
//! capability interface. An adapter implements only the operations its
//! wrapped codec supports; the remaining methods fall through to default
//! bodies that return a typed [`Error::Unsupported`], which keeps the
//! harness's dispatch logic uniform across codecs.
//!
//! For a claimed-lossless codec, `decode(encode(image))` must reproduce the
//! input digest-exactly, and a decoder must consume the whole
//! [`Codestream`] it is handed (side-channel record included), never just
//! the payload.

use std::fmt;

use crate::codestream::Codestream;
use crate::error::{Error, Result};
use crate::image::Image;

mod store;
pub use store::{StoreDecoder, StoreEncoder};

mod png;
pub use png::{PngDecoder, PngEncoder};

#[cfg(feature = "qoi")]
mod qoi;
#[cfg(feature = "qoi")]
pub use qoi::{QoiDecoder, QoiEncoder};

/// The capability operations, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecOp {
    /// Encode an 8-bit packed RGB image.
    EncodeRgb8,
    /// Encode an 8-bit packed RGBA image.
    EncodeRgba8,
    /// Encode a planar YUV image.
    EncodeYuv,
    /// Decode to an 8-bit packed RGB image.
    DecodeRgb8,
    /// Decode to an 8-bit packed RGBA image.
    DecodeRgba8,
    /// Decode to a planar YUV image.
    DecodeYuv,
}

impl CodecOp {
    /// Operation name as reported in errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EncodeRgb8 => "encodeRGB8",
            Self::EncodeRgba8 => "encodeRGBA8",
            Self::EncodeYuv => "encodeYUV",
            Self::DecodeRgb8 => "decodeRGB8",
            Self::DecodeRgba8 => "decodeRGBA8",
            Self::DecodeYuv => "decodeYUV",
        }
    }
}

impl fmt::Display for CodecOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn unsupported(codec: &str, operation: CodecOp) -> Error {
    Error::Unsupported {
        codec: codec.to_string(),
        operation,
    }
}

/// Encoding half of a codec adapter.
pub trait Encoder {
    /// Codec identifier used in errors and reports.
    fn name(&self) -> &'static str;

    /// Encode an 8-bit packed RGB image.
    fn encode_rgb8(&self, image: &Image) -> Result<Codestream> {
        let _ = image;
        Err(unsupported(self.name(), CodecOp::EncodeRgb8))
    }

    /// Encode an 8-bit packed RGBA image.
    fn encode_rgba8(&self, image: &Image) -> Result<Codestream> {
        let _ = image;
        Err(unsupported(self.name(), CodecOp::EncodeRgba8))
    }

    /// Encode a planar YUV image.
    fn encode_yuv(&self, image: &Image) -> Result<Codestream> {
        let _ = image;
        Err(unsupported(self.name(), CodecOp::EncodeYuv))
    }
}

/// Decoding half of a codec adapter.
pub trait Decoder {
    /// Codec identifier used in errors and reports.
    fn name(&self) -> &'static str;

    /// Decode to an 8-bit packed RGB image.
    fn decode_rgb8(&self, codestream: &Codestream) -> Result<Image> {
        let _ = codestream;
        Err(unsupported(self.name(), CodecOp::DecodeRgb8))
    }

    /// Decode to an 8-bit packed RGBA image.
    fn decode_rgba8(&self, codestream: &Codestream) -> Result<Image> {
        let _ = codestream;
        Err(unsupported(self.name(), CodecOp::DecodeRgba8))
    }

    /// Decode to a planar YUV image.
    fn decode_yuv(&self, codestream: &Codestream) -> Result<Image> {
        let _ = codestream;
        Err(unsupported(self.name(), CodecOp::DecodeYuv))
    }
}

/// Identifiers accepted by [`create`].
#[must_use]
pub fn known_ids() -> &'static [&'static str] {
    &[
        "store",
        "png",
        #[cfg(feature = "qoi")]
        "qoi",
    ]
}

/// Instantiate the encoder/decoder pair for a codec identifier.
pub fn create(id: &str) -> Result<(Box<dyn Encoder>, Box<dyn Decoder>)> {
    match id {
        "store" => Ok((Box::new(StoreEncoder), Box::new(StoreDecoder))),
        "png" => Ok((Box::new(PngEncoder), Box::new(PngDecoder))),
        #[cfg(feature = "qoi")]
        "qoi" => Ok((Box::new(QoiEncoder), Box::new(QoiDecoder))),
        _ => Err(Error::Configuration(format!(
            "unknown codec {id:?} (known: {})",
            known_ids().join(", ")
        ))),
    }
}
