use super::ChunkType;

/// A trait representing a chunk in a PNG stream.
///
/// A chunk is the basic unit of a PNG stream. Each chunk consists of:
/// - A length field (4 bytes)
/// - A chunk type (4 bytes)
/// - The chunk data (variable length)
/// - A CRC32 checksum over type and data (4 bytes)
///
/// # Examples
/// ```no_run
/// use libpngmeta::{Chunk, ChunkType, RawChunk};
///
/// fn process_chunk<C: Chunk>(chunk: &C) {
///     println!("Chunk type: {}", chunk.ty());
///     println!("Data length: {}", chunk.length());
///     println!("CRC32: {:08x}", chunk.crc());
/// }
/// ```
pub trait Chunk {
    /// Returns the length of the chunk data in bytes.
    #[inline]
    fn length(&self) -> u32 {
        self.data().len() as u32
    }

    /// Returns the type of the chunk.
    fn ty(&self) -> ChunkType;

    /// Returns the data of the chunk.
    fn data(&self) -> &[u8];

    /// Returns the CRC32 checksum of the chunk.
    ///
    /// The default implementation computes it from [`Chunk::ty`] and [`Chunk::data`].
    #[inline]
    fn crc(&self) -> u32 {
        super::checksum_of(self.ty(), self.data())
    }
}
