use crate::{
    chunk::{ChunkExt, ChunkType, RawChunk},
    error::Result,
    png::PNG_SIGNATURE,
};
use std::io::Write;

/// Serializes a PNG signature followed by chunk frames.
///
/// Any write failure is returned as is; whatever was already written stays
/// in the destination.
///
/// # Examples
/// ```
/// use libpngmeta::{ChunkStreamWriter, ChunkType, RawChunk};
///
/// # fn main() -> libpngmeta::Result<()> {
/// let mut writer = ChunkStreamWriter::write_signature(Vec::new())?;
/// writer.write_chunk(&RawChunk::from_data(ChunkType::IEND, *b""))?;
/// let bytes = writer.into_inner();
/// assert_eq!(bytes.len(), 8 + 12);
/// # Ok(())
/// # }
/// ```
pub struct ChunkStreamWriter<W> {
    w: W,
}

impl<W: Write> ChunkStreamWriter<W> {
    /// Writes the 8-byte PNG signature and returns a writer for the chunks that follow.
    #[inline]
    pub fn write_signature(mut writer: W) -> Result<Self> {
        writer.write_all(PNG_SIGNATURE)?;
        Ok(Self { w: writer })
    }

    /// Writes one chunk using its stored length and checksum.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Fails when the stored length disagrees with the data size, or when the
    /// underlying writer fails.
    #[inline]
    pub fn write_chunk(&mut self, chunk: &RawChunk) -> Result<usize> {
        let written = chunk.write_chunk_in(&mut self.w)?;
        log::debug!("wrote {} chunk ({} bytes)", chunk.ty, chunk.length);
        Ok(written)
    }

    /// Writes a new chunk frame, computing length and checksum from `data`.
    #[inline]
    pub fn write_new_chunk(&mut self, ty: ChunkType, data: &[u8]) -> Result<usize> {
        let chunk = (ty, data);
        let written = chunk.write_chunk_in(&mut self.w)?;
        log::debug!("wrote {} chunk ({} bytes)", ty, data.len());
        Ok(written)
    }

    /// Writes every chunk in order, stopping at the first failure.
    #[inline]
    pub fn write_chunks<'c, I>(&mut self, chunks: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'c RawChunk>,
    {
        let mut written = 0;
        for chunk in chunks {
            written += self.write_chunk(chunk)?;
        }
        Ok(written)
    }

    /// Flushes and returns the underlying writer.
    #[inline]
    pub fn finish(mut self) -> Result<W> {
        self.w.flush()?;
        Ok(self.w)
    }
}

impl<W> ChunkStreamWriter<W> {
    /// Returns the underlying writer without flushing it.
    #[inline]
    pub fn into_inner(self) -> W {
        self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn write_iend_chunk() {
        let mut writer = ChunkStreamWriter::write_signature(Vec::new()).unwrap();
        assert_eq!(writer.write_new_chunk(ChunkType::IEND, &[]).unwrap(), 12);
        assert_eq!(
            writer.into_inner(),
            [
                137, 80, 78, 71, 13, 10, 26, 10, // signature
                0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130, // IEND
            ]
        );
    }

    #[test]
    fn new_chunk_matches_built_chunk() {
        let mut a = ChunkStreamWriter::write_signature(Vec::new()).unwrap();
        a.write_new_chunk(ChunkType::tEXt, b"text data").unwrap();
        let mut b = ChunkStreamWriter::write_signature(Vec::new()).unwrap();
        b.write_chunk(&RawChunk::from_data(ChunkType::tEXt, *b"text data"))
            .unwrap();
        assert_eq!(a.into_inner(), b.into_inner());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_surfaced() {
        let err = ChunkStreamWriter::write_signature(FailingWriter)
            .err()
            .unwrap();
        assert!(matches!(err, crate::Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
