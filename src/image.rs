//! Raster image with up to four owned plane buffers.
//!
//! Plane memory is always stored as bytes; formats deeper than 8 bits keep
//! little-endian u16 samples, matching the raw planar YUV container the
//! loader reads. All layout arithmetic (plane sizes, strides, nominal bit
//! count) is derived here from the [`PixelFormat`], and codec adapters rely
//! on these formulas rather than recomputing their own.

use crate::digest::{Digest, DigestBuilder};
use crate::error::{Error, Result};
use crate::format::{MAX_PLANES, PixelFormat};

/// An image: dimensions, pixel format and owned plane buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    planes: Vec<Vec<u8>>,
}

impl Image {
    /// Build an image from per-plane byte buffers.
    ///
    /// The plane count must equal `format.num_planes()` and each buffer must
    /// be exactly the derived plane size for its index.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        planes: Vec<Vec<u8>>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Configuration(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if format.num_planes() > MAX_PLANES {
            return Err(Error::Configuration(format!(
                "format requires {} planes, at most {MAX_PLANES} are supported",
                format.num_planes()
            )));
        }
        for i in 0..format.num_planes() {
            if format.x_subsample[i] == 0 || format.y_subsample[i] == 0 {
                return Err(Error::Configuration(format!(
                    "subsample factor for plane {i} is zero"
                )));
            }
        }
        if planes.len() != format.num_planes() {
            return Err(Error::Configuration(format!(
                "expected {} plane(s), got {}",
                format.num_planes(),
                planes.len()
            )));
        }

        let image = Self {
            width,
            height,
            format,
            planes,
        };
        for i in 0..image.format.num_planes() {
            let expected = image.plane_size(i);
            let actual = image.planes[i].len();
            if actual != expected {
                return Err(Error::Configuration(format!(
                    "plane {i} is {actual} bytes, expected {expected}"
                )));
            }
        }
        Ok(image)
    }

    /// Build a packed single-plane image from interleaved sample bytes.
    pub fn packed(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, format, vec![data])
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The pixel format describing this image's layout.
    #[must_use]
    pub const fn format(&self) -> &PixelFormat {
        &self.format
    }

    /// Plane `i` as bytes.
    #[must_use]
    pub fn plane(&self, i: usize) -> &[u8] {
        &self.planes[i]
    }

    /// Iterate over the valid planes in order.
    pub fn planes(&self) -> impl Iterator<Item = &[u8]> {
        self.planes.iter().map(Vec::as_slice)
    }

    /// Samples per row of plane `i`, before the per-sample byte width.
    #[must_use]
    pub fn plane_width(&self, i: usize) -> usize {
        self.width as usize / self.format.x_subsample[i] as usize
    }

    /// Rows in plane `i`.
    #[must_use]
    pub fn plane_height(&self, i: usize) -> usize {
        self.height as usize / self.format.y_subsample[i] as usize
    }

    /// Row stride of plane `i` in bytes.
    #[must_use]
    pub fn line_size(&self, i: usize) -> usize {
        self.plane_width(i) * self.format.plane_components() * self.format.sample_width()
    }

    /// Size of plane `i` in bytes.
    #[must_use]
    pub fn plane_size(&self, i: usize) -> usize {
        self.format.plane_size(self.width, self.height, i)
    }

    /// Nominal uncompressed size in bits, at the format's stated bit depth
    /// rather than the stored sample width. Used only to report image size,
    /// never to size buffers.
    #[must_use]
    pub fn total_bits(&self) -> u64 {
        let mut total = 0u64;
        for i in 0..self.format.num_planes() {
            total += self.plane_width(i) as u64
                * self.plane_height(i) as u64
                * self.format.plane_components() as u64
                * u64::from(self.format.bit_depth);
        }
        total
    }

    /// Nominal uncompressed size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bits() / 8
    }

    /// Content digest over all valid plane bytes in plane order.
    ///
    /// This is the correctness oracle for round-trip verification: a decode
    /// is accepted iff its digest equals the source image's digest.
    #[must_use]
    pub fn digest(&self) -> Digest {
        let mut builder = DigestBuilder::new();
        for plane in self.planes() {
            builder.update(plane);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ComponentSet;

    fn rgb_test_image(width: u32, height: u32) -> Image {
        let data: Vec<u8> = (0..width as usize * height as usize * 3)
            .map(|i| (i % 256) as u8)
            .collect();
        Image::packed(width, height, PixelFormat::RGB8, data).unwrap()
    }

    fn yuv422p10_test_image(width: u32, height: u32) -> Image {
        let format = PixelFormat::YUV422P10;
        let mut planes = Vec::new();
        for i in 0..format.num_planes() {
            let samples = (width as usize / format.x_subsample[i] as usize)
                * (height as usize / format.y_subsample[i] as usize);
            let mut plane = Vec::with_capacity(samples * 2);
            for s in 0..samples {
                let value = (s % 1024) as u16;
                plane.extend_from_slice(&value.to_le_bytes());
            }
            planes.push(plane);
        }
        Image::new(width, height, format, planes).unwrap()
    }

    #[test]
    fn packed_rgb8_layout() {
        let img = rgb_test_image(8, 8);
        assert_eq!(img.plane_size(0), 8 * 8 * 3);
        assert_eq!(img.line_size(0), 8 * 3);
        assert_eq!(img.plane_height(0), 8);
        assert_eq!(img.total_bits(), 8 * 8 * 3 * 8);
        assert_eq!(img.total_bytes(), 192);
    }

    #[test]
    fn planar_yuv422p10_layout() {
        let img = yuv422p10_test_image(16, 8);
        // Full-resolution luma, half-width chroma, two bytes per sample.
        assert_eq!(img.plane_size(0), 16 * 8 * 2);
        assert_eq!(img.plane_size(1), 8 * 8 * 2);
        assert_eq!(img.plane_size(2), 8 * 8 * 2);
        assert_eq!(img.line_size(1), 8 * 2);
        // Nominal size counts 10 bits per sample.
        assert_eq!(img.total_bits(), (16 * 8 + 8 * 8 + 8 * 8) * 10);
    }

    #[test]
    fn plane_sizes_sum_to_total_bits_at_8bit() {
        let packed = rgb_test_image(12, 7);
        let sum: u64 = (0..packed.format().num_planes())
            .map(|i| packed.plane_size(i) as u64)
            .sum();
        assert_eq!(sum * 8, packed.total_bits());

        let planar8 = Image::new(
            4,
            4,
            PixelFormat {
                bit_depth: 8,
                components: ComponentSet::YUV,
                is_planar: true,
                x_subsample: [1, 2, 2, 1],
                y_subsample: [1, 2, 2, 1],
            },
            vec![vec![0; 16], vec![0; 4], vec![0; 4]],
        )
        .unwrap();
        let sum: u64 = (0..planar8.format().num_planes())
            .map(|i| planar8.plane_size(i) as u64)
            .sum();
        assert_eq!(sum * 8, planar8.total_bits());
    }

    #[test]
    fn constructor_rejects_bad_planes() {
        assert!(Image::packed(0, 8, PixelFormat::RGB8, vec![]).is_err());
        assert!(Image::packed(2, 2, PixelFormat::RGB8, vec![0; 11]).is_err());
        assert!(Image::new(2, 2, PixelFormat::RGB8, vec![vec![0; 12], vec![0; 12]]).is_err());
        assert!(Image::new(2, 2, PixelFormat::YUV422P10, vec![vec![0; 8]]).is_err());
    }

    #[test]
    fn constructor_rejects_formats_with_too_many_planes() {
        // A planar 5-component set needs more planes than an image can hold;
        // this must surface as a configuration error, not a panic. The name
        // "YUV" keeps the set comparing equal to the well-known one, so only
        // the plane-count guard stands between this format and the planes.
        let mut format = PixelFormat::packed(8, ComponentSet::new("YUV", 5));
        format.is_planar = true;
        let planes = vec![vec![0u8; 16]; 5];
        assert!(matches!(
            Image::new(4, 4, format, planes),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn digest_is_stable_and_sensitive() {
        let img = rgb_test_image(8, 8);
        assert_eq!(img.digest(), img.digest());
        assert_eq!(img.digest(), rgb_test_image(8, 8).digest());

        let mut data: Vec<u8> = (0..8 * 8 * 3).map(|i| (i % 256) as u8).collect();
        data[100] ^= 1;
        let flipped = Image::packed(8, 8, PixelFormat::RGB8, data).unwrap();
        assert_ne!(img.digest(), flipped.digest());
    }

    #[test]
    fn digest_covers_all_planes() {
        let a = yuv422p10_test_image(8, 4);
        let mut planes: Vec<Vec<u8>> = a.planes().map(<[u8]>::to_vec).collect();
        let last = planes[2].len() - 1;
        planes[2][last] ^= 0x80;
        let b = Image::new(8, 4, PixelFormat::YUV422P10, planes).unwrap();
        assert_ne!(a.digest(), b.digest());
    }
}
