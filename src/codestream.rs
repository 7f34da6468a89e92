//! Compressed-payload container and its side-channel record.
//!
//! Some codecs transmit decoder initialization parameters out of band rather
//! than inside the compressed payload. [`SideInfo`] carries that data as an
//! explicit, byte-serializable record, so a decoder consumes the whole
//! container rather than assuming the payload alone suffices, and the
//! contract holds across process boundaries.

use crate::error::{Error, Result};
use crate::format::{ComponentSet, MAX_PLANES, PixelFormat};

/// Out-of-band decoder initialization data: image geometry, pixel format and
/// codec-specific configuration bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel format of the encoded image.
    pub format: PixelFormat,
    /// Codec-specific extension bytes, opaque to the harness.
    pub extra: Vec<u8>,
}

impl SideInfo {
    /// Side info describing an image, with no codec-specific extension.
    #[must_use]
    pub fn for_image(image: &crate::Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            format: *image.format(),
            extra: Vec::new(),
        }
    }

    /// Serialized length in bytes. Counted into the reported codestream size.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        // width + height + depth + planar flag + name length + name
        // + subsample arrays + extra length + extra
        4 + 4 + 1 + 1 + 1 + self.format.components.name().len() + 2 * MAX_PLANES + 4
            + self.extra.len()
    }

    /// Serialize to a stable little-endian byte layout.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let name = self.format.components.name().as_bytes();
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(self.format.bit_depth);
        out.push(u8::from(self.format.is_planar));
        out.push(name.len() as u8);
        out.extend_from_slice(name);
        out.extend_from_slice(&self.format.x_subsample);
        out.extend_from_slice(&self.format.y_subsample);
        out.extend_from_slice(&(self.extra.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.extra);
        out
    }

    /// Reconstruct from [`Self::to_bytes`] output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor { bytes, pos: 0 };
        let width = u32::from_le_bytes(cursor.take::<4>()?);
        let height = u32::from_le_bytes(cursor.take::<4>()?);
        let bit_depth = cursor.take::<1>()?[0];
        let is_planar = cursor.take::<1>()?[0] != 0;
        let name_len = cursor.take::<1>()?[0] as usize;
        let name = std::str::from_utf8(cursor.take_slice(name_len)?)
            .map_err(|_| malformed("component name is not UTF-8"))?;
        let components = ComponentSet::by_name(name)
            .ok_or_else(|| malformed(&format!("unknown component set {name:?}")))?;
        let x_subsample = cursor.take::<MAX_PLANES>()?;
        let y_subsample = cursor.take::<MAX_PLANES>()?;
        let extra_len = u32::from_le_bytes(cursor.take::<4>()?) as usize;
        let extra = cursor.take_slice(extra_len)?.to_vec();

        Ok(Self {
            width,
            height,
            format: PixelFormat {
                bit_depth,
                components,
                is_planar,
                x_subsample,
                y_subsample,
            },
            extra,
        })
    }
}

fn malformed(reason: &str) -> Error {
    Error::Configuration(format!("malformed side info: {reason}"))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| malformed("truncated record"))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take_slice(N)?);
        Ok(out)
    }
}

/// An encoded image: compressed payload plus optional side-channel record.
///
/// Every encode call returns a freshly owned container; nothing here aliases
/// adapter-internal state, so holding one across later calls is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codestream {
    payload: Vec<u8>,
    side: Option<SideInfo>,
}

impl Codestream {
    /// A container holding only a compressed payload.
    #[must_use]
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            side: None,
        }
    }

    /// A container with out-of-band decoder initialization data.
    #[must_use]
    pub fn with_side_info(payload: Vec<u8>, side: SideInfo) -> Self {
        Self {
            payload,
            side: Some(side),
        }
    }

    /// The compressed payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The side-channel record, if the producing codec needs one.
    #[must_use]
    pub fn side_info(&self) -> Option<&SideInfo> {
        self.side.as_ref()
    }

    /// Serialized side-channel length in bytes, 0 when absent.
    #[must_use]
    pub fn side_size(&self) -> usize {
        self.side.as_ref().map_or(0, SideInfo::encoded_len)
    }

    /// Payload plus side-channel size; the reported codestream size.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.payload.len() + self.side_size()
    }
}
