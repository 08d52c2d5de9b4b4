use crate::{
    chunk::{ChunkType, MAX_CHUNK_LENGTH, RawChunk, crc::Crc32, read_be_u32, unexpected_eof},
    error::{FormatError, Result},
};
use std::{
    io::{self, Read},
    mem,
};

/// Upper bound of the buffer reserved up front for chunk data.
const INITIAL_DATA_CAPACITY: u32 = 64 * 1024;

pub(crate) struct ChunkReader<R> {
    r: R,
    max_length: u32,
}

impl<R> ChunkReader<R> {
    #[inline]
    pub(crate) fn with_max_length(reader: R, max_length: u32) -> Self {
        Self {
            r: reader,
            max_length,
        }
    }
}

impl<R: Read> ChunkReader<R> {
    /// Reads and verifies the next frame.
    ///
    /// Returns `Ok(None)` when the stream ends exactly at a frame boundary.
    pub(crate) fn read_chunk(&mut self) -> Result<Option<RawChunk>> {
        let mut crc_hasher = Crc32::new();

        // read chunk length
        let mut length = [0u8; mem::size_of::<u32>()];
        if !read_exact_or_eof(&mut self.r, &mut length)? {
            return Ok(None);
        }
        let length = read_be_u32(&length);

        // read a chunk type
        let mut ty = [0u8; mem::size_of::<ChunkType>()];
        self.r.read_exact(&mut ty)?;
        let ty = ChunkType(ty);
        if length > self.max_length {
            return Err(FormatError::ChunkTooLarge { ty, length }.into());
        }

        crc_hasher.update(&ty.0);

        // read chunk data, growing the buffer only as bytes arrive
        let mut data = Vec::with_capacity(length.min(INITIAL_DATA_CAPACITY) as usize);
        (&mut self.r)
            .take(u64::from(length))
            .read_to_end(&mut data)?;
        if data.len() != length as usize {
            return Err(unexpected_eof().into());
        }

        crc_hasher.update(&data);

        // read crc sum
        let mut crc = [0u8; mem::size_of::<u32>()];
        self.r.read_exact(&mut crc)?;
        let crc = read_be_u32(&crc);

        verify_crc(ty, crc, crc_hasher.finalize())?;
        Ok(Some(RawChunk {
            length,
            ty,
            data,
            crc,
        }))
    }
}

impl<R> From<R> for ChunkReader<R> {
    #[inline]
    fn from(reader: R) -> Self {
        Self::with_max_length(reader, MAX_CHUNK_LENGTH)
    }
}

#[inline]
fn verify_crc(ty: ChunkType, expected: u32, actual: u32) -> Result<(), FormatError> {
    if expected != actual {
        return Err(FormatError::ChecksumMismatch {
            ty,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Reads until `buf` is full or the reader ends, returning the number of bytes read.
pub(crate) fn read_up_to<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Fills `buf` completely, or returns `Ok(false)` if the reader is already at its end.
///
/// Running out of input after the first byte is an [`io::ErrorKind::UnexpectedEof`].
fn read_exact_or_eof<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    match read_up_to(r, buf)? {
        0 if !buf.is_empty() => Ok(false),
        n if n == buf.len() => Ok(true),
        _ => Err(unexpected_eof()),
    }
}

/// Parses and verifies the frame at the start of `bytes`.
///
/// Returns `Ok(None)` when `bytes` is empty, otherwise the chunk borrowing
/// from `bytes` and the remaining input.
pub(crate) fn read_chunk_from_slice(
    bytes: &[u8],
    max_length: u32,
) -> Result<Option<(RawChunk<&[u8]>, &[u8])>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let mut crc_hasher = Crc32::new();

    // read chunk length
    let (length, r) = bytes
        .split_first_chunk::<{ mem::size_of::<u32>() }>()
        .ok_or_else(unexpected_eof)?;
    let length = read_be_u32(length);

    // read a chunk type
    let (ty, r) = r
        .split_first_chunk::<{ mem::size_of::<ChunkType>() }>()
        .ok_or_else(unexpected_eof)?;
    let ty = ChunkType(*ty);
    if length > max_length {
        return Err(FormatError::ChunkTooLarge { ty, length }.into());
    }
    crc_hasher.update(&ty.0);

    // read chunk data
    let (data, r) = r
        .split_at_checked(length as usize)
        .ok_or_else(unexpected_eof)?;
    crc_hasher.update(data);

    // read crc sum
    let (crc, r) = r
        .split_first_chunk::<{ mem::size_of::<u32>() }>()
        .ok_or_else(unexpected_eof)?;
    let crc = read_be_u32(crc);

    verify_crc(ty, crc, crc_hasher.finalize())?;
    Ok(Some((
        RawChunk {
            length,
            ty,
            data,
            crc,
        },
        r,
    )))
}
