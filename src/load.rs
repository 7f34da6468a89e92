//! Input image loading.
//!
//! Two containers are recognized: 8-bit RGB/RGBA PNG rasters and raw planar
//! YUV files whose geometry is encoded in the file name as
//! `…<width>x<height>.<pixel-format-tag>.yuv` (e.g.
//! `clip.1920x1080.yuv422p10le.yuv`). Anything else is a load error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::image::Image;

fn load_error(path: &Path, reason: impl ToString) -> Error {
    Error::Load {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Load an image, selecting the container by file extension.
pub fn load_image(path: &Path) -> Result<Image> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => load_png(path),
        Some("yuv") => load_yuv(path),
        _ => Err(load_error(path, "image file must be PNG or YUV")),
    }
}

fn load_png(path: &Path) -> Result<Image> {
    let file = File::open(path).map_err(|e| load_error(path, e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder.read_info().map_err(|e| load_error(path, e))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| load_error(path, "PNG output buffer size unavailable"))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| load_error(path, e))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(load_error(
            path,
            format!("only 8-bit PNG is supported, got {:?}", info.bit_depth),
        ));
    }
    let format = match info.color_type {
        png::ColorType::Rgb => PixelFormat::RGB8,
        png::ColorType::Rgba => PixelFormat::RGBA8,
        other => {
            return Err(load_error(
                path,
                format!("only RGB or RGBA PNG is supported, got {other:?}"),
            ));
        }
    };

    buf.truncate(format.plane_size(info.width, info.height, 0));
    Image::packed(info.width, info.height, format, buf)
}

/// Geometry parsed from a raw YUV file name.
#[derive(Debug, PartialEq, Eq)]
struct YuvName {
    width: u32,
    height: u32,
    format: PixelFormat,
}

/// Parse `…<width>x<height>.<pixel-format-tag>.yuv`.
fn parse_yuv_name(file_name: &str) -> Option<YuvName> {
    let stem = file_name.strip_suffix(".yuv")?;
    let (rest, tag) = stem.rsplit_once('.')?;
    let format = match tag {
        "yuv422p10le" => PixelFormat::YUV422P10,
        _ => return None,
    };

    // The dimension field is the last dot-separated component of the rest.
    let dims = rest.rsplit('.').next()?;
    let (width, height) = dims.split_once('x')?;
    Some(YuvName {
        width: width.parse().ok().filter(|&w| w > 0)?,
        height: height.parse().ok().filter(|&h| h > 0)?,
        format,
    })
}

fn load_yuv(path: &Path) -> Result<Image> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| load_error(path, "file name is not valid UTF-8"))?;
    let name = parse_yuv_name(file_name).ok_or_else(|| {
        load_error(
            path,
            "YUV file name must end in <width>x<height>.<pixel-format-tag>.yuv",
        )
    })?;

    let file = File::open(path).map_err(|e| load_error(path, e))?;
    let mut reader = BufReader::new(file);

    let mut planes = Vec::with_capacity(name.format.num_planes());
    for i in 0..name.format.num_planes() {
        let size = name.format.plane_size(name.width, name.height, i);
        let mut plane = vec![0u8; size];
        reader
            .read_exact(&mut plane)
            .map_err(|e| load_error(path, format!("reading plane {i}: {e}")))?;
        planes.push(plane);
    }

    Image::new(name.width, name.height, name.format, planes)
}
