//! PNG adapter backed by the pure-Rust `png` crate.
//!
//! The PNG codestream is self-describing, so no side-channel record is
//! produced. RGB8 and RGBA8 capabilities only.

use std::io::Cursor;

use crate::codec::{CodecOp, Decoder, Encoder};
use crate::codestream::Codestream;
use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::image::Image;

/// Encoder half of the PNG adapter.
pub struct PngEncoder;

/// Decoder half of the PNG adapter.
pub struct PngDecoder;

fn codec_error(operation: CodecOp, message: impl ToString) -> Error {
    Error::Codec {
        codec: "png".to_string(),
        operation,
        message: message.to_string(),
    }
}

fn encode(image: &Image, color: png::ColorType, operation: CodecOp) -> Result<Codestream> {
    let mut payload = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut payload, image.width(), image.height());
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| codec_error(operation, e))?;
        writer
            .write_image_data(image.plane(0))
            .map_err(|e| codec_error(operation, e))?;
        writer.finish().map_err(|e| codec_error(operation, e))?;
    }
    Ok(Codestream::new(payload))
}

fn decode(
    codestream: &Codestream,
    color: png::ColorType,
    format: PixelFormat,
    operation: CodecOp,
) -> Result<Image> {
    let decoder = png::Decoder::new(Cursor::new(codestream.payload()));
    let mut reader = decoder
        .read_info()
        .map_err(|e| codec_error(operation, e))?;
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| codec_error(operation, "output buffer size unavailable"))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| codec_error(operation, e))?;

    if info.color_type != color || info.bit_depth != png::BitDepth::Eight {
        return Err(codec_error(
            operation,
            format!(
                "unexpected PNG layout: {:?}/{:?}",
                info.color_type, info.bit_depth
            ),
        ));
    }

    buf.truncate(format.plane_size(info.width, info.height, 0));
    Image::packed(info.width, info.height, format, buf)
}

impl Encoder for PngEncoder {
    fn name(&self) -> &'static str {
        "png"
    }

    fn encode_rgb8(&self, image: &Image) -> Result<Codestream> {
        encode(image, png::ColorType::Rgb, CodecOp::EncodeRgb8)
    }

    fn encode_rgba8(&self, image: &Image) -> Result<Codestream> {
        encode(image, png::ColorType::Rgba, CodecOp::EncodeRgba8)
    }
}

impl Decoder for PngDecoder {
    fn name(&self) -> &'static str {
        "png"
    }

    fn decode_rgb8(&self, codestream: &Codestream) -> Result<Image> {
        decode(
            codestream,
            png::ColorType::Rgb,
            PixelFormat::RGB8,
            CodecOp::DecodeRgb8,
        )
    }

    fn decode_rgba8(&self, codestream: &Codestream) -> Result<Image> {
        decode(
            codestream,
            png::ColorType::Rgba,
            PixelFormat::RGBA8,
            CodecOp::DecodeRgba8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width as usize * height as usize * channels);
        for y in 0..height as usize {
            for x in 0..width as usize {
                for c in 0..channels {
                    data.push(((x + y * 3 + c * 17) % 256) as u8);
                }
            }
        }
        data
    }

    #[test]
    fn rgb8_round_trip_is_bit_exact() {
        let image =
            Image::packed(16, 9, PixelFormat::RGB8, gradient(16, 9, 3)).unwrap();
        let cs = PngEncoder.encode_rgb8(&image).unwrap();
        assert!(cs.side_info().is_none());

        let decoded = PngDecoder.decode_rgb8(&cs).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 9);
        assert_eq!(decoded.digest(), image.digest());
    }

    #[test]
    fn rgba8_round_trip_is_bit_exact() {
        let image =
            Image::packed(7, 5, PixelFormat::RGBA8, gradient(7, 5, 4)).unwrap();
        let cs = PngEncoder.encode_rgba8(&image).unwrap();
        let decoded = PngDecoder.decode_rgba8(&cs).unwrap();
        assert_eq!(decoded.digest(), image.digest());
    }

    #[test]
    fn yuv_is_unsupported() {
        let image = Image::new(
            2,
            2,
            PixelFormat::YUV422P10,
            vec![vec![0; 8], vec![0; 4], vec![0; 4]],
        )
        .unwrap();
        assert!(matches!(
            PngEncoder.encode_yuv(&image),
            Err(Error::Unsupported { .. })
        ));
    }

    #[test]
    fn garbage_payload_is_a_codec_error() {
        let cs = Codestream::new(vec![0x42; 32]);
        assert!(matches!(
            PngDecoder.decode_rgb8(&cs),
            Err(Error::Codec { .. })
        ));
    }

    #[test]
    fn color_type_mismatch_is_a_codec_error() {
        let image =
            Image::packed(4, 4, PixelFormat::RGBA8, gradient(4, 4, 4)).unwrap();
        let cs = PngEncoder.encode_rgba8(&image).unwrap();
        assert!(matches!(
            PngDecoder.decode_rgb8(&cs),
            Err(Error::Codec { .. })
        ));
    }
}
