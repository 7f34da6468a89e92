//! QOI adapter backed by `rapid-qoi`.
//!
//! QOI headers carry dimensions and channel count, so no side-channel record
//! is produced. RGB8 and RGBA8 capabilities only.

use rapid_qoi::{Colors, Qoi};

use crate::codec::{CodecOp, Decoder, Encoder};
use crate::codestream::Codestream;
use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::image::Image;

/// Encoder half of the QOI adapter.
pub struct QoiEncoder;

/// Decoder half of the QOI adapter.
pub struct QoiDecoder;

fn codec_error(operation: CodecOp, message: impl ToString) -> Error {
    Error::Codec {
        codec: "qoi".to_string(),
        operation,
        message: message.to_string(),
    }
}

fn encode(image: &Image, colors: Colors, operation: CodecOp) -> Result<Codestream> {
    let qoi = Qoi {
        width: image.width(),
        height: image.height(),
        colors,
    };
    let payload = qoi
        .encode_alloc(image.plane(0))
        .map_err(|e| codec_error(operation, format!("{e:?}")))?;
    Ok(Codestream::new(payload))
}

fn decode(
    codestream: &Codestream,
    channels: usize,
    format: PixelFormat,
    operation: CodecOp,
) -> Result<Image> {
    let (qoi, pixels) = Qoi::decode_alloc(codestream.payload())
        .map_err(|e| codec_error(operation, format!("{e:?}")))?;
    if qoi.colors.channels() != channels {
        return Err(codec_error(
            operation,
            format!(
                "expected {channels}-channel stream, got {}",
                qoi.colors.channels()
            ),
        ));
    }
    Image::packed(qoi.width, qoi.height, format, pixels)
}

impl Encoder for QoiEncoder {
    fn name(&self) -> &'static str {
        "qoi"
    }

    fn encode_rgb8(&self, image: &Image) -> Result<Codestream> {
        encode(image, Colors::Srgb, CodecOp::EncodeRgb8)
    }

    fn encode_rgba8(&self, image: &Image) -> Result<Codestream> {
        encode(image, Colors::SrgbLinA, CodecOp::EncodeRgba8)
    }
}

impl Decoder for QoiDecoder {
    fn name(&self) -> &'static str {
        "qoi"
    }

    fn decode_rgb8(&self, codestream: &Codestream) -> Result<Image> {
        decode(codestream, 3, PixelFormat::RGB8, CodecOp::DecodeRgb8)
    }

    fn decode_rgba8(&self, codestream: &Codestream) -> Result<Image> {
        decode(codestream, 4, PixelFormat::RGBA8, CodecOp::DecodeRgba8)
    }
}
