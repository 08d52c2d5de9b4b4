use crate::{
    chunk::ChunkStreamWriter,
    error::Result,
    png::{Png, Region},
};
use std::io::Write;

impl Png {
    /// Writes the signature followed by the begin, data and end regions.
    ///
    /// Stops at the first failure; bytes already written are left in `writer`.
    ///
    /// # Errors
    ///
    /// Fails if `writer` fails, or if a chunk changed through
    /// [`Png::set_chunk_unchecked`] no longer matches its stored length.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::{ChunkType, Png, Region};
    ///
    /// # fn main() -> libpngmeta::Result<()> {
    /// let mut png = Png::new();
    /// png.add_chunk(ChunkType::IEND, *b"", Region::End)?;
    /// let mut out = Vec::new();
    /// png.write(&mut out)?;
    /// assert_eq!(Png::load(out.as_slice())?, png);
    /// # Ok(())
    /// # }
    /// ```
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = ChunkStreamWriter::write_signature(writer)?;
        let mut written = 0;
        for region in Region::ALL {
            written += writer.write_chunks(self.region(region))?;
        }
        writer.finish()?;
        log::debug!("wrote {} chunks ({} bytes)", self.len(), written);
        Ok(())
    }

    /// Writes the stream into a new buffer.
    #[inline]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }
}
