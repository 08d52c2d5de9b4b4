use crate::{chunk::ChunkType, png::Region};
use std::io;

/// A specialized [`Result`](std::result::Result) type for chunk stream operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while reading, editing or writing a chunk stream.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The byte stream is not a well-formed PNG chunk stream.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The underlying reader or writer failed, including truncated input.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A value handed to the library is out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A region query found no chunk of the requested type.
    #[error("{region} region does not contain a {ty} chunk")]
    NotFound {
        /// Requested chunk type.
        ty: ChunkType,
        /// Region that was searched.
        region: Region,
    },
    /// No region of the stream contains a chunk of the requested type.
    #[error("stream does not contain a {0} chunk")]
    MissingChunk(ChunkType),
}

impl Error {
    /// Returns `true` when the input ended in the middle of the signature or a chunk frame.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Returns `true` for [`Error::NotFound`] and [`Error::MissingChunk`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingChunk(_))
    }
}

impl From<Error> for io::Error {
    #[inline]
    fn from(value: Error) -> Self {
        match value {
            Error::Io(e) => e,
            e @ (Error::NotFound { .. } | Error::MissingChunk(_)) => {
                io::Error::new(io::ErrorKind::NotFound, e)
            }
            e => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// The byte stream violates the chunk stream format.
#[derive(thiserror::Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FormatError {
    /// The first 8 bytes are not the PNG signature.
    #[error("not a PNG; invalid signature")]
    InvalidSignature,
    /// The stored CRC does not match the one computed over type and data.
    #[error("checksum mismatch in {ty} chunk (stored {expected:#010x}, computed {actual:#010x})")]
    ChecksumMismatch {
        /// Type of the broken chunk.
        ty: ChunkType,
        /// Checksum stored in the stream.
        expected: u32,
        /// Checksum computed from the frame.
        actual: u32,
    },
    /// The first chunk after the signature is not `IHDR`.
    #[error("unexpected chunk `{0}`, expected IHDR")]
    UnexpectedLeadChunk(ChunkType),
    /// The stream ended cleanly before an `IEND` chunk was read.
    #[error("stream ended before IEND chunk")]
    MissingTerminator,
    /// A frame declares a data length above the configured maximum.
    #[error("{ty} chunk declares {length} bytes of data, above the allowed maximum")]
    ChunkTooLarge {
        /// Type of the oversized chunk.
        ty: ChunkType,
        /// Declared length.
        length: u32,
    },
}

/// A value is outside the range the format allows.
#[derive(thiserror::Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValidationError {
    /// Chunk data longer than 2^31-1 bytes.
    #[error("chunk data of {0} bytes exceeds length limit of 2^31-1 bytes")]
    PayloadTooLarge(usize),
    /// `IHDR` data shorter than 13 bytes.
    #[error("IHDR chunk data is {0} bytes, at least 13 required")]
    HeaderTooShort(usize),
    /// `pHYs` data shorter than 9 bytes.
    #[error("pHYs chunk data is {0} bytes, at least 9 required")]
    PhysTooShort(usize),
    /// Unknown `pHYs` unit specifier.
    #[error("unknown pHYs unit specifier {0}")]
    UnknownUnit(u8),
    /// Stored length differs from the actual data size.
    #[error("{ty} chunk stores length {length} but holds {actual} bytes")]
    LengthMismatch {
        /// Type of the inconsistent chunk.
        ty: ChunkType,
        /// Stored length field.
        length: u32,
        /// Actual data size.
        actual: usize,
    },
    /// A string that is not a 4 character chunk type.
    #[error("invalid chunk type `{0}`")]
    InvalidChunkType(String),
}
