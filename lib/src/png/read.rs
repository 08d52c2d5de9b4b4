use crate::{
    chunk::{
        Chunk, ChunkReader, ChunkType, RawChunk, read_chunk_from_slice, read_up_to, unexpected_eof,
    },
    error::{FormatError, Result},
    header::PngHeader,
    png::{PNG_SIGNATURE, ReadOptions},
};
use std::io::Read;

/// A short signature is only truncation while it is still a prefix of the real one.
fn verify_signature(signature: &[u8]) -> Result<()> {
    if !PNG_SIGNATURE.starts_with(signature) {
        return Err(FormatError::InvalidSignature.into());
    }
    if signature.len() < PNG_SIGNATURE.len() {
        return Err(unexpected_eof().into());
    }
    Ok(())
}

fn read_signature<R: Read>(mut reader: R) -> Result<()> {
    let mut signature = [0u8; PNG_SIGNATURE.len()];
    let n = read_up_to(&mut reader, &mut signature)?;
    verify_signature(&signature[..n])
}

fn check_signature(bytes: &[u8]) -> Result<&[u8]> {
    let (signature, rest) = bytes.split_at(bytes.len().min(PNG_SIGNATURE.len()));
    verify_signature(signature)?;
    Ok(rest)
}

/// Reads a whole PNG chunk stream, from the signature up to and including `IEND`.
///
/// Nothing after the `IEND` frame is read. Every chunk is checked against its
/// CRC; the first failure aborts the read and no chunks are returned.
///
/// # Errors
///
/// - [`FormatError::InvalidSignature`] if the stream does not start with the PNG signature.
/// - [`FormatError::ChecksumMismatch`] if a stored CRC is wrong.
/// - [`FormatError::MissingTerminator`] if the stream ends cleanly before `IEND`.
/// - An I/O error (see [`Error::is_truncated`](crate::Error::is_truncated)) if reading fails.
///
/// # Examples
/// ```
/// use libpngmeta::{ChunkStreamWriter, ChunkType, RawChunk, read_chunks};
///
/// # fn main() -> libpngmeta::Result<()> {
/// let mut writer = ChunkStreamWriter::write_signature(Vec::new())?;
/// writer.write_new_chunk(ChunkType::IEND, &[])?;
/// let bytes = writer.into_inner();
///
/// let chunks = read_chunks(bytes.as_slice())?;
/// assert_eq!(chunks.len(), 1);
/// # Ok(())
/// # }
/// ```
#[inline]
pub fn read_chunks<R: Read>(reader: R) -> Result<Vec<RawChunk>> {
    read_chunks_with_options(reader, &ReadOptions::default())
}

/// Like [`read_chunks`], with explicit [`ReadOptions`].
pub fn read_chunks_with_options<R: Read>(
    mut reader: R,
    options: &ReadOptions,
) -> Result<Vec<RawChunk>> {
    read_signature(&mut reader)?;
    let mut chunk_reader = ChunkReader::with_max_length(reader, options.max_chunk_length());
    let mut chunks = Vec::new();
    loop {
        let chunk = chunk_reader
            .read_chunk()?
            .ok_or(FormatError::MissingTerminator)?;
        log::debug!("read {} chunk ({} bytes)", chunk.ty(), chunk.length());
        let is_end = chunk.ty() == ChunkType::IEND;
        chunks.push(chunk);
        if is_end {
            return Ok(chunks);
        }
    }
}

/// Parses a PNG chunk stream held in memory; chunks borrow their data from `bytes`.
///
/// Follows the same rules as [`read_chunks`]. Bytes after `IEND` are ignored.
pub fn read_chunks_from_slice(bytes: &[u8]) -> Result<Vec<RawChunk<&[u8]>>> {
    read_chunks_from_slice_with_options(bytes, &ReadOptions::default())
}

/// Like [`read_chunks_from_slice`], with explicit [`ReadOptions`].
pub fn read_chunks_from_slice_with_options<'b>(
    bytes: &'b [u8],
    options: &ReadOptions,
) -> Result<Vec<RawChunk<&'b [u8]>>> {
    let mut rest = check_signature(bytes)?;
    let mut chunks = Vec::new();
    loop {
        let (chunk, r) = read_chunk_from_slice(rest, options.max_chunk_length())?
            .ok_or(FormatError::MissingTerminator)?;
        log::debug!("read {} chunk ({} bytes)", chunk.ty(), chunk.length());
        rest = r;
        let is_end = chunk.ty() == ChunkType::IEND;
        chunks.push(chunk);
        if is_end {
            return Ok(chunks);
        }
    }
}

/// Reads the signature and the first chunk only, which must be `IHDR`.
///
/// Nothing after the first frame is read.
///
/// # Errors
///
/// Returns [`FormatError::UnexpectedLeadChunk`] when the first chunk is not `IHDR`,
/// plus the errors of [`read_chunks`] for the signature and the frame itself.
pub fn read_lead_chunk<R: Read>(mut reader: R) -> Result<RawChunk> {
    read_signature(&mut reader)?;
    let chunk = ChunkReader::from(reader)
        .read_chunk()?
        .ok_or_else(unexpected_eof)?;
    if chunk.ty() != ChunkType::IHDR {
        return Err(FormatError::UnexpectedLeadChunk(chunk.ty()).into());
    }
    Ok(chunk)
}

/// Reads only as far as the `IHDR` chunk and decodes it.
///
/// # Examples
/// ```
/// use libpngmeta::{ChunkStreamWriter, ChunkType, read_header};
///
/// # fn main() -> libpngmeta::Result<()> {
/// let mut writer = ChunkStreamWriter::write_signature(Vec::new())?;
/// writer.write_new_chunk(ChunkType::IHDR, &[0, 0, 0, 10, 0, 0, 0, 20, 8, 2, 0, 0, 0])?;
/// let bytes = writer.into_inner();
///
/// let header = read_header(bytes.as_slice())?;
/// assert_eq!((header.width, header.height), (10, 20));
/// # Ok(())
/// # }
/// ```
#[inline]
pub fn read_header<R: Read>(reader: R) -> Result<PngHeader> {
    let chunk = read_lead_chunk(reader)?;
    Ok(PngHeader::try_from_bytes(chunk.data())?)
}
