//! Identity "codec": the payload is the concatenated plane bytes.
//!
//! Serves as the baseline adapter and exercises the side-channel contract:
//! the payload alone carries no geometry, so decoding requires the
//! [`SideInfo`] record produced at encode time. Supports every capability,
//! including planar YUV.

use crate::codec::{CodecOp, Decoder, Encoder};
use crate::codestream::{Codestream, SideInfo};
use crate::error::{Error, Result};
use crate::image::Image;

/// Encoder half of the store codec.
pub struct StoreEncoder;

/// Decoder half of the store codec.
pub struct StoreDecoder;

fn store(image: &Image) -> Codestream {
    let total: usize = (0..image.format().num_planes())
        .map(|i| image.plane_size(i))
        .sum();
    let mut payload = Vec::with_capacity(total);
    for plane in image.planes() {
        payload.extend_from_slice(plane);
    }
    Codestream::with_side_info(payload, SideInfo::for_image(image))
}

fn unstore(codestream: &Codestream, operation: CodecOp) -> Result<Image> {
    let codec_error = |message: String| Error::Codec {
        codec: "store".to_string(),
        operation,
        message,
    };

    let side = codestream
        .side_info()
        .ok_or_else(|| codec_error("missing side info".to_string()))?;

    let mut planes = Vec::with_capacity(side.format.num_planes());
    let mut offset = 0usize;
    let payload = codestream.payload();
    for i in 0..side.format.num_planes() {
        let size = side.format.plane_size(side.width, side.height, i);
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= payload.len())
            .ok_or_else(|| codec_error("payload shorter than plane layout".to_string()))?;
        planes.push(payload[offset..end].to_vec());
        offset = end;
    }
    if offset != payload.len() {
        return Err(codec_error(format!(
            "payload has {} trailing byte(s)",
            payload.len() - offset
        )));
    }

    Image::new(side.width, side.height, side.format, planes)
}

impl Encoder for StoreEncoder {
    fn name(&self) -> &'static str {
        "store"
    }

    fn encode_rgb8(&self, image: &Image) -> Result<Codestream> {
        Ok(store(image))
    }

    fn encode_rgba8(&self, image: &Image) -> Result<Codestream> {
        Ok(store(image))
    }

    fn encode_yuv(&self, image: &Image) -> Result<Codestream> {
        Ok(store(image))
    }
}

impl Decoder for StoreDecoder {
    fn name(&self) -> &'static str {
        "store"
    }

    fn decode_rgb8(&self, codestream: &Codestream) -> Result<Image> {
        unstore(codestream, CodecOp::DecodeRgb8)
    }

    fn decode_rgba8(&self, codestream: &Codestream) -> Result<Image> {
        unstore(codestream, CodecOp::DecodeRgba8)
    }

    fn decode_yuv(&self, codestream: &Codestream) -> Result<Image> {
        unstore(codestream, CodecOp::DecodeYuv)
    }
}
