//! Pixel format description: component sets, bit depth, planar layout and
//! per-plane chroma subsampling.
//!
//! A [`PixelFormat`] is a pure value type. All layout arithmetic that depends
//! on concrete image dimensions lives on [`crate::Image`].

/// Maximum number of planes an image can carry.
pub const MAX_PLANES: usize = 4;

/// A named, fixed-cardinality set of color/luma components.
///
/// Two sets compare equal iff their names match; the name identifies the
/// component semantics, not just the count.
#[derive(Debug, Clone, Copy, Eq)]
pub struct ComponentSet {
    name: &'static str,
    count: u8,
}

impl std::hash::Hash for ComponentSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Equality is by name, so the hash is too.
        std::hash::Hash::hash(self.name, state);
    }
}

impl ComponentSet {
    /// Red, green, blue.
    pub const RGB: Self = Self::new("RGB", 3);

    /// Red, green, blue, alpha.
    pub const RGBA: Self = Self::new("RGBA", 4);

    /// Luma and two chroma components.
    pub const YUV: Self = Self::new("YUV", 3);

    /// Create a component set with the given name and cardinality.
    #[must_use]
    pub const fn new(name: &'static str, count: u8) -> Self {
        Self { name, count }
    }

    /// Look up one of the well-known component sets by name.
    ///
    /// Used when reconstructing a [`crate::codestream::SideInfo`] record
    /// from its byte serialization.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "RGB" => Some(Self::RGB),
            "RGBA" => Some(Self::RGBA),
            "YUV" => Some(Self::YUV),
            _ => None,
        }
    }

    /// Component set name, e.g. `"RGB"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of components in the set.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }
}

impl PartialEq for ComponentSet {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Memory-layout description of an image.
///
/// Equality is by value across all fields, so two independently constructed
/// formats describing the same layout compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    /// Bits per sample. 8 and 10 are exercised by the bundled formats, but
    /// any integer depth is representable.
    pub bit_depth: u8,
    /// Which components the image carries.
    pub components: ComponentSet,
    /// Planar (one plane per component) vs. packed (interleaved) layout.
    pub is_planar: bool,
    /// Horizontal subsampling divisor per plane. 1 = no subsampling.
    pub x_subsample: [u8; MAX_PLANES],
    /// Vertical subsampling divisor per plane. 1 = no subsampling.
    pub y_subsample: [u8; MAX_PLANES],
}

impl PixelFormat {
    /// 8-bit packed RGB.
    pub const RGB8: Self = Self::packed(8, ComponentSet::RGB);

    /// 8-bit packed RGBA.
    pub const RGBA8: Self = Self::packed(8, ComponentSet::RGBA);

    /// 10-bit planar YUV with 4:2:2 chroma subsampling.
    pub const YUV422P10: Self = Self {
        bit_depth: 10,
        components: ComponentSet::YUV,
        is_planar: true,
        x_subsample: [1, 2, 2, 1],
        y_subsample: [1, 1, 1, 1],
    };

    /// A packed format with no subsampling.
    #[must_use]
    pub const fn packed(bit_depth: u8, components: ComponentSet) -> Self {
        Self {
            bit_depth,
            components,
            is_planar: false,
            x_subsample: [1; MAX_PLANES],
            y_subsample: [1; MAX_PLANES],
        }
    }

    /// Number of planes: one per component for planar layouts, a single
    /// interleaved plane otherwise.
    #[must_use]
    pub const fn num_planes(&self) -> usize {
        if self.is_planar {
            self.components.count() as usize
        } else {
            1
        }
    }

    /// Components stored per plane: 1 for planar layouts, the full component
    /// count for packed ones.
    #[must_use]
    pub const fn plane_components(&self) -> usize {
        if self.is_planar {
            1
        } else {
            self.components.count() as usize
        }
    }

    /// Bytes per stored sample: 1 for depths up to 8 bits, 2 otherwise.
    #[must_use]
    pub const fn sample_width(&self) -> usize {
        if self.bit_depth > 8 { 2 } else { 1 }
    }

    /// Size in bytes of plane `i` for an image of the given dimensions.
    ///
    /// Adapter and loader code derives plane layout from this formula rather
    /// than recomputing its own.
    #[must_use]
    pub fn plane_size(&self, width: u32, height: u32, i: usize) -> usize {
        (width as usize / self.x_subsample[i] as usize)
            * (height as usize / self.y_subsample[i] as usize)
            * self.plane_components()
            * self.sample_width()
    }
}
