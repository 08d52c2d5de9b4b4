use crate::{chunk::Chunk, error::ValidationError};

/// Decoded fields of an `IHDR` chunk.
///
/// This is a read-only view; changing it does not touch the chunk it came from.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PngHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per sample or per palette index.
    pub bit_depth: u8,
    /// Colour type code.
    pub color_type: u8,
    /// Compression method, 0 (deflate) in standard PNG.
    pub compression_method: u8,
    /// Filter method, 0 (adaptive) in standard PNG.
    pub filter_method: u8,
    /// Interlace method: 0 for none, 1 for Adam7.
    pub interlace_method: u8,
}

impl PngHeader {
    /// Size of the `IHDR` data in bytes.
    pub const SIZE: usize = 13;

    /// Decodes the first 13 bytes of `IHDR` data. Extra bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HeaderTooShort`] when fewer than 13 bytes are given.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::PngHeader;
    ///
    /// let header = PngHeader::try_from_bytes(&[0, 0, 0, 10, 0, 0, 0, 20, 8, 2, 0, 0, 0]).unwrap();
    /// assert_eq!(header.width, 10);
    /// assert_eq!(header.height, 20);
    /// assert_eq!(header.bit_depth, 8);
    /// assert_eq!(header.color_type, 2);
    /// ```
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        let Some((
            &[
                w0,
                w1,
                w2,
                w3,
                h0,
                h1,
                h2,
                h3,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            ],
            _,
        )) = bytes.split_first_chunk::<{ Self::SIZE }>()
        else {
            return Err(ValidationError::HeaderTooShort(bytes.len()));
        };
        Ok(Self {
            width: u32::from_be_bytes([w0, w1, w2, w3]),
            height: u32::from_be_bytes([h0, h1, h2, h3]),
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
        })
    }

    /// Returns `true` when the image uses Adam7 interlacing.
    #[inline]
    pub const fn is_interlaced(&self) -> bool {
        self.interlace_method == 1
    }
}

/// Decodes an `IHDR` chunk.
///
/// Only the data length is checked; the chunk type is not.
///
/// # Errors
///
/// Returns [`ValidationError::HeaderTooShort`] when the data is shorter than 13 bytes.
#[inline]
pub fn decode_header<C: Chunk>(chunk: C) -> Result<PngHeader, ValidationError> {
    PngHeader::try_from_bytes(chunk.data())
}
