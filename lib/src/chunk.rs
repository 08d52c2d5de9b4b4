mod crc;
mod read;
mod traits;
mod types;
mod write;

use self::crc::Crc32;
pub(crate) use self::read::{ChunkReader, read_chunk_from_slice, read_up_to};
pub use self::{traits::*, types::*, write::ChunkStreamWriter};
use crate::error::{Result, ValidationError};
use std::{
    fmt::{self, Display, Formatter},
    io::{self, Write},
    mem,
    ops::Deref,
};

/// Minimum required size of bytes to represent [`Chunk`].
/// length:4 + chunk type:4 + data:0 + crc:4
pub const MIN_CHUNK_BYTES_SIZE: usize =
    mem::size_of::<u32>() + mem::size_of::<ChunkType>() + mem::size_of::<u32>();

/// Largest data length a chunk may declare (2^31-1).
pub const MAX_CHUNK_LENGTH: u32 = i32::MAX as u32;

/// Computes the CRC-32/IEEE checksum of a chunk: the 4 type bytes followed by the data.
///
/// # Examples
/// ```
/// use libpngmeta::{ChunkType, checksum_of};
///
/// assert_eq!(checksum_of(ChunkType::IEND, &[]), 0xAE42_6082);
/// ```
#[inline]
pub fn checksum_of(ty: ChunkType, data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(&ty.0);
    crc.update(data);
    crc.finalize()
}

pub(crate) trait ChunkExt: Chunk {
    /// byte size of chunk
    #[inline]
    fn bytes_len(&self) -> usize {
        MIN_CHUNK_BYTES_SIZE + self.data().len()
    }

    /// check the chunk type is pixel data chunk
    #[inline]
    fn is_image_data(&self) -> bool {
        self.ty() == ChunkType::IDAT
    }

    /// Fails when the length field disagrees with the data size.
    #[inline]
    fn check_length(&self) -> Result<(), ValidationError> {
        let actual = self.data().len();
        if self.length() as usize != actual {
            return Err(ValidationError::LengthMismatch {
                ty: self.ty(),
                length: self.length(),
                actual,
            });
        }
        Ok(())
    }

    #[inline]
    fn write_chunk_in<W: Write>(&self, writer: &mut W) -> Result<usize> {
        self.check_length()?;
        writer.write_all(&self.length().to_be_bytes())?;
        writer.write_all(&self.ty().0)?;
        writer.write_all(self.data())?;
        writer.write_all(&self.crc().to_be_bytes())?;
        Ok(self.bytes_len())
    }
}

impl<T> ChunkExt for T where T: Chunk {}

/// Represents a raw chunk
///
/// `length` and `crc` are stored as read from the stream (or as stamped by the
/// builder) and are not re-derived from `data` on access.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct RawChunk<D = Vec<u8>> {
    pub(crate) length: u32,
    pub(crate) ty: ChunkType,
    pub(crate) data: D,
    pub(crate) crc: u32,
}

impl<'d> RawChunk<&'d [u8]> {
    pub(crate) fn from_slice(ty: ChunkType, data: &'d [u8]) -> Self {
        let chunk = (ty, data);
        Self {
            length: chunk.length(),
            crc: chunk.crc(),
            ty,
            data,
        }
    }

    /// Copies the borrowed data into an owned [`RawChunk`].
    #[inline]
    pub fn to_owned(&self) -> RawChunk<Vec<u8>> {
        RawChunk {
            length: self.length,
            ty: self.ty,
            data: self.data.to_vec(),
            crc: self.crc,
        }
    }
}

impl<D> RawChunk<D>
where
    Self: Chunk,
{
    /// Borrows this chunk's data.
    #[inline]
    pub fn as_ref(&self) -> RawChunk<&[u8]> {
        RawChunk {
            length: self.length,
            ty: self.ty,
            data: self.data(),
            crc: self.crc,
        }
    }

    /// Returns `true` when the stored length and checksum both match the data.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::{ChunkType, RawChunk};
    ///
    /// let mut chunk = RawChunk::from_data(ChunkType::tEXt, *b"a\0b");
    /// assert!(chunk.is_consistent());
    /// chunk.replace_data_unchecked(*b"a\0c");
    /// assert!(!chunk.is_consistent());
    /// ```
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.length as usize == self.data().len() && self.crc == checksum_of(self.ty, self.data())
    }

    /// Encodes this chunk into its wire representation:
    /// length, type, data and checksum.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LengthMismatch`] when the stored length disagrees with the data size.
    #[inline]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut vec = Vec::with_capacity(self.bytes_len());
        self.write_chunk_in(&mut vec)?;
        Ok(vec)
    }
}

/// Summarizes the chunk as its type and stored length, without the data.
///
/// ```
/// use libpngmeta::{ChunkType, RawChunk};
///
/// let chunk = RawChunk::from_data(ChunkType::IHDR, [0u8; 13]);
/// assert_eq!(chunk.to_string(), "Chunk(type: IHDR, length: 13)");
/// ```
impl<D> Display for RawChunk<D>
where
    Self: Chunk,
{
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk(type: {}, length: {})", self.ty, self.length)
    }
}

impl Chunk for RawChunk<&[u8]> {
    #[inline]
    fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    fn ty(&self) -> ChunkType {
        self.ty
    }

    #[inline]
    fn data(&self) -> &[u8] {
        self.data
    }

    #[inline]
    fn crc(&self) -> u32 {
        self.crc
    }
}

impl RawChunk {
    /// Create a new [`RawChunk`] from given [`ChunkType`] and bytes.
    ///
    /// Length and checksum are computed from `data`.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::{prelude::*, ChunkType, RawChunk};
    ///
    /// let chunk = RawChunk::from_data(ChunkType::IEND, *b"");
    ///
    /// assert_eq!(chunk.length(), 0);
    /// assert_eq!(chunk.ty(), ChunkType::IEND);
    /// assert_eq!(chunk.data(), b"");
    /// assert_eq!(chunk.crc(), 0xAE42_6082);
    /// ```
    #[inline]
    pub fn from_data<T: Into<Vec<u8>>>(ty: ChunkType, data: T) -> Self {
        #[inline]
        fn inner(ty: ChunkType, data: Vec<u8>) -> RawChunk {
            let chunk = (ty, &data[..]);
            RawChunk {
                length: chunk.length(),
                crc: chunk.crc(),
                ty,
                data,
            }
        }
        inner(ty, data.into())
    }

    /// Like [`RawChunk::from_data`], but rejects data longer than [`MAX_CHUNK_LENGTH`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PayloadTooLarge`] for oversized data.
    #[inline]
    pub fn try_from_data<T: Into<Vec<u8>>>(
        ty: ChunkType,
        data: T,
    ) -> Result<Self, ValidationError> {
        let data = data.into();
        if data.len() > MAX_CHUNK_LENGTH as usize {
            return Err(ValidationError::PayloadTooLarge(data.len()));
        }
        Ok(Self::from_data(ty, data))
    }

    /// Replaces the data in place without touching the stored length or checksum.
    ///
    /// The chunk is only writable again if the new data has the old length,
    /// and it only survives a reload if the checksum still matches. Use
    /// [`RawChunk::from_data`] to build a consistent replacement instead.
    #[inline]
    pub fn replace_data_unchecked<T: Into<Vec<u8>>>(&mut self, data: T) {
        self.data = data.into();
    }

    /// Consumes the chunk, returning its data.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Chunk for RawChunk {
    #[inline]
    fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    fn ty(&self) -> ChunkType {
        self.ty
    }

    #[inline]
    fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn crc(&self) -> u32 {
        self.crc
    }
}

impl<T: Deref<Target = [u8]>> Chunk for (ChunkType, T) {
    #[inline]
    fn ty(&self) -> ChunkType {
        self.0
    }

    #[inline]
    fn data(&self) -> &[u8] {
        &self.1
    }
}

impl<T: Chunk> Chunk for &T {
    #[inline]
    fn length(&self) -> u32 {
        (*self).length()
    }

    #[inline]
    fn ty(&self) -> ChunkType {
        (*self).ty()
    }

    #[inline]
    fn data(&self) -> &[u8] {
        (*self).data()
    }

    #[inline]
    fn crc(&self) -> u32 {
        (*self).crc()
    }
}

impl From<RawChunk<&[u8]>> for RawChunk {
    #[inline]
    fn from(value: RawChunk<&[u8]>) -> Self {
        value.to_owned()
    }
}

#[inline]
pub(crate) fn read_be_u32(bytes: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*bytes)
}

#[inline]
pub(crate) fn unexpected_eof() -> io::Error {
    io::Error::from(io::ErrorKind::UnexpectedEof)
}
