use crate::error::ValidationError;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A 4-byte chunk type code.
///
/// The bytes are the big-endian representation of the `u32` type code, so
/// `IHDR` is both `*b"IHDR"` and `1229472850`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    // -- Critical chunks --
    /// Image header
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Palette
    pub const PLTE: ChunkType = ChunkType(*b"PLTE");
    /// Image data
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Image trailer
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    // -- Ancillary chunks --
    /// Physical pixel dimensions
    #[allow(non_upper_case_globals)]
    pub const pHYs: ChunkType = ChunkType(*b"pHYs");
    /// Image gamma
    #[allow(non_upper_case_globals)]
    pub const gAMA: ChunkType = ChunkType(*b"gAMA");
    /// Image last-modification time
    #[allow(non_upper_case_globals)]
    pub const tIME: ChunkType = ChunkType(*b"tIME");
    /// Textual data
    #[allow(non_upper_case_globals)]
    pub const tEXt: ChunkType = ChunkType(*b"tEXt");
    /// Compressed textual data
    #[allow(non_upper_case_globals)]
    pub const zTXt: ChunkType = ChunkType(*b"zTXt");
    /// International textual data
    #[allow(non_upper_case_globals)]
    pub const iTXt: ChunkType = ChunkType(*b"iTXt");

    /// Creates a chunk type from its numeric code.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::ChunkType;
    ///
    /// assert_eq!(ChunkType::from_u32(1229278788), ChunkType::IEND);
    /// ```
    #[inline]
    pub const fn from_u32(code: u32) -> Self {
        Self(code.to_be_bytes())
    }

    /// Returns the numeric code of this chunk type.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Returns the raw bytes of this chunk type.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Ancillary bit: bit 5 of the first byte.
    #[inline]
    pub const fn is_ancillary(self) -> bool {
        self.0[0] & 0x20 != 0
    }

    /// Returns `true` when the chunk is necessary for display, i.e. not ancillary.
    #[inline]
    pub const fn is_critical(self) -> bool {
        !self.is_ancillary()
    }

    /// Private bit: bit 5 of the second byte.
    #[inline]
    pub const fn is_private(self) -> bool {
        self.0[1] & 0x20 != 0
    }

    /// Reserved bit: bit 5 of the third byte. Must be zero in valid PNG streams.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0[2] & 0x20 != 0
    }

    /// Safe-to-copy bit: bit 5 of the fourth byte.
    #[inline]
    pub const fn is_safe_to_copy(self) -> bool {
        self.0[3] & 0x20 != 0
    }
}

impl From<u32> for ChunkType {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<ChunkType> for u32 {
    #[inline]
    fn from(value: ChunkType) -> Self {
        value.to_u32()
    }
}

impl Display for ChunkType {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Latin-1, so every byte maps to exactly one char and back.
        for b in self.0 {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl FromStr for ChunkType {
    type Err = ValidationError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidChunkType(s.into());
        let mut bytes = [0u8; 4];
        let mut chars = s.chars();
        for b in &mut bytes {
            let c = chars.next().ok_or_else(invalid)?;
            *b = u8::try_from(c).map_err(|_| invalid())?;
        }
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(bytes))
    }
}
