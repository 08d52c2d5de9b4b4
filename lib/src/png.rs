mod options;
mod read;
mod region;
mod write;

pub use self::{options::*, read::*, region::Region};
use crate::{
    chunk::{Chunk, ChunkType, RawChunk},
    error::{Error, Result},
    header::PngHeader,
    phys::PhysicalDimensions,
};
use std::io::Read;

/// The magic number of Portable Network Graphics
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1A\n";

/// A PNG chunk stream split into [`Region`]s.
///
/// The split happens once, when the model is built. Chunks added afterwards
/// stay in the region they were added to.
///
/// # Examples
/// ```no_run
/// use libpngmeta::{ChunkType, Png, Region};
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut png = Png::load(File::open("in.png")?)?;
/// png.add_chunk(ChunkType::tEXt, *b"Comment\0edited", Region::End)?;
/// png.write(File::create("out.png")?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Png {
    begin: Vec<RawChunk>,
    data: Vec<RawChunk>,
    end: Vec<RawChunk>,
}

impl Png {
    /// Creates a model with all regions empty.
    #[inline]
    pub const fn new() -> Self {
        Self {
            begin: Vec::new(),
            data: Vec::new(),
            end: Vec::new(),
        }
    }

    /// Reads a whole chunk stream and partitions it.
    ///
    /// # Errors
    ///
    /// Fails with any error of [`read_chunks`].
    #[inline]
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_chunks(read_chunks(reader)?))
    }

    /// Like [`Png::load`], with explicit [`ReadOptions`].
    #[inline]
    pub fn load_with_options<R: Read>(reader: R, options: &ReadOptions) -> Result<Self> {
        Ok(Self::from_chunks(read_chunks_with_options(reader, options)?))
    }

    /// Parses an in-memory chunk stream and partitions it.
    #[inline]
    pub fn load_from_slice(bytes: &[u8]) -> Result<Self> {
        let chunks = read_chunks_from_slice(bytes)?;
        Ok(Self::from_chunks(
            chunks.into_iter().map(|c| c.to_owned()).collect(),
        ))
    }

    /// Partitions a flat chunk sequence into begin, data and end regions.
    ///
    /// `data` runs from the first `IDAT` to the last one. A sequence with no
    /// `IDAT` at all gets an empty `begin`, every chunk but the last in `data`,
    /// and the last chunk in `end`.
    ///
    /// # Examples
    /// ```
    /// use libpngmeta::{ChunkType, Png, RawChunk, Region};
    ///
    /// let chunks = [ChunkType::IHDR, ChunkType::pHYs, ChunkType::IDAT, ChunkType::IEND]
    ///     .into_iter()
    ///     .map(|ty| RawChunk::from_data(ty, *b""))
    ///     .collect();
    /// let png = Png::from_chunks(chunks);
    /// assert_eq!(png.region(Region::Begin).len(), 2);
    /// assert_eq!(png.region(Region::Data).len(), 1);
    /// assert_eq!(png.region(Region::End).len(), 1);
    /// ```
    #[inline]
    pub fn from_chunks(chunks: Vec<RawChunk>) -> Self {
        let (begin, data, end) = region::partition(chunks);
        Self { begin, data, end }
    }

    /// Returns the chunks of one region, in order.
    #[inline]
    pub fn region(&self, region: Region) -> &[RawChunk] {
        match region {
            Region::Begin => &self.begin,
            Region::Data => &self.data,
            Region::End => &self.end,
        }
    }

    #[inline]
    fn region_mut(&mut self, region: Region) -> &mut Vec<RawChunk> {
        match region {
            Region::Begin => &mut self.begin,
            Region::Data => &mut self.data,
            Region::End => &mut self.end,
        }
    }

    /// Iterates over all chunks in stream order: begin, data, then end.
    #[inline]
    pub fn chunks(&self) -> impl Iterator<Item = &RawChunk> {
        self.begin.iter().chain(&self.data).chain(&self.end)
    }

    /// Returns copies of all chunks in stream order.
    #[inline]
    pub fn flatten(&self) -> Vec<RawChunk> {
        self.chunks().cloned().collect()
    }

    /// Consumes the model, returning all chunks in stream order.
    #[inline]
    pub fn into_chunks(self) -> Vec<RawChunk> {
        let Self {
            mut begin,
            data,
            end,
        } = self;
        begin.reserve(data.len() + end.len());
        begin.extend(data);
        begin.extend(end);
        begin
    }

    /// Total number of chunks in all regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.begin.len() + self.data.len() + self.end.len()
    }

    /// Returns `true` if no region holds a chunk.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a new chunk with freshly computed length and checksum to `region`.
    ///
    /// The chunk is appended to [`Region::Begin`] and [`Region::Data`], and
    /// prepended to [`Region::End`] so that `IEND` stays last.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PayloadTooLarge`](crate::ValidationError::PayloadTooLarge)
    /// if `data` is longer than 2^31-1 bytes.
    pub fn add_chunk<T: Into<Vec<u8>>>(
        &mut self,
        ty: ChunkType,
        data: T,
        region: Region,
    ) -> Result<()> {
        let chunk = RawChunk::try_from_data(ty, data)?;
        log::trace!("adding {} chunk to {} region", ty, region);
        let chunks = self.region_mut(region);
        match region {
            Region::Begin | Region::Data => chunks.push(chunk),
            Region::End => chunks.insert(0, chunk),
        }
        Ok(())
    }

    /// Replaces the first `ty` chunk in `region` with a consistent chunk built
    /// from `data`, or adds one if the region has none.
    ///
    /// # Errors
    ///
    /// Same as [`Png::add_chunk`].
    pub fn set_chunk<T: Into<Vec<u8>>>(
        &mut self,
        ty: ChunkType,
        data: T,
        region: Region,
    ) -> Result<()> {
        match self.region_mut(region).iter_mut().find(|c| c.ty == ty) {
            Some(chunk) => {
                log::trace!("replacing {} chunk in {} region", ty, region);
                *chunk = RawChunk::try_from_data(ty, data)?;
                Ok(())
            }
            None => self.add_chunk(ty, data, region),
        }
    }

    /// Replaces only the data of the first `ty` chunk in `region`, leaving its
    /// stored length and checksum untouched; adds a chunk if the region has none.
    ///
    /// The caller is responsible for keeping the chunk consistent. Writing fails
    /// if the data size no longer matches the stored length, and a stale checksum
    /// makes the written stream fail to load. Prefer [`Png::set_chunk`].
    ///
    /// # Errors
    ///
    /// Same as [`Png::add_chunk`] when a chunk has to be added.
    pub fn set_chunk_unchecked<T: Into<Vec<u8>>>(
        &mut self,
        ty: ChunkType,
        data: T,
        region: Region,
    ) -> Result<()> {
        match self.region_mut(region).iter_mut().find(|c| c.ty == ty) {
            Some(chunk) => {
                chunk.replace_data_unchecked(data);
                if !chunk.is_consistent() {
                    log::warn!(
                        "{} chunk in {} region no longer matches its length or checksum",
                        ty,
                        region
                    );
                }
                Ok(())
            }
            None => self.add_chunk(ty, data, region),
        }
    }

    /// Removes and returns the first `ty` chunk in `region`.
    #[inline]
    pub fn remove_chunk(&mut self, ty: ChunkType, region: Region) -> Option<RawChunk> {
        let chunks = self.region_mut(region);
        let index = chunks.iter().position(|c| c.ty == ty)?;
        log::trace!("removing {} chunk from {} region", ty, region);
        Some(chunks.remove(index))
    }

    /// Returns the first `ty` chunk in `region`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the region has no such chunk.
    #[inline]
    pub fn get_chunk(&self, ty: ChunkType, region: Region) -> Result<&RawChunk> {
        self.region(region)
            .iter()
            .find(|c| c.ty == ty)
            .ok_or(Error::NotFound { ty, region })
    }

    /// Returns every `ty` chunk in `region`, in order.
    #[inline]
    pub fn get_chunks(&self, ty: ChunkType, region: Region) -> Vec<&RawChunk> {
        self.region(region).iter().filter(|c| c.ty == ty).collect()
    }

    /// Decodes the first `IHDR` chunk in stream order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingChunk`] if there is no `IHDR`, or a validation error
    /// if its data is too short.
    pub fn header(&self) -> Result<PngHeader> {
        let chunk = self
            .chunks()
            .find(|c| c.ty() == ChunkType::IHDR)
            .ok_or(Error::MissingChunk(ChunkType::IHDR))?;
        Ok(PngHeader::try_from_bytes(chunk.data())?)
    }

    /// Decodes the first `pHYs` chunk of the begin region.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is none.
    #[inline]
    pub fn physical_dimensions(&self) -> Result<PhysicalDimensions> {
        let chunk = self.get_chunk(ChunkType::pHYs, Region::Begin)?;
        Ok(PhysicalDimensions::try_from_bytes(chunk.data())?)
    }

    /// Stores a `pHYs` chunk with both axes set to `ppm` pixels per meter,
    /// replacing the first one in the begin region.
    #[inline]
    pub fn set_physical_dimensions(&mut self, ppm: f64) -> Result<()> {
        let phys = PhysicalDimensions::from_pixels_per_meter(ppm);
        self.set_chunk(ChunkType::pHYs, phys.to_bytes(), Region::Begin)
    }
}

impl From<Vec<RawChunk>> for Png {
    #[inline]
    fn from(value: Vec<RawChunk>) -> Self {
        Self::from_chunks(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn png(types: &[ChunkType]) -> Png {
        Png::from_chunks(
            types
                .iter()
                .map(|ty| RawChunk::from_data(*ty, *b""))
                .collect(),
        )
    }

    fn types(chunks: &[RawChunk]) -> Vec<ChunkType> {
        chunks.iter().map(|c| c.ty()).collect()
    }

    fn typical() -> Png {
        png(&[
            ChunkType::IHDR,
            ChunkType::pHYs,
            ChunkType::IDAT,
            ChunkType::IDAT,
            ChunkType::IEND,
        ])
    }

    #[test]
    fn flatten_keeps_order() {
        let png = typical();
        assert_eq!(
            types(&png.flatten()),
            [
                ChunkType::IHDR,
                ChunkType::pHYs,
                ChunkType::IDAT,
                ChunkType::IDAT,
                ChunkType::IEND
            ]
        );
        assert_eq!(png.len(), 5);
        assert_eq!(png.clone().into_chunks(), png.flatten());
    }

    #[test]
    fn new_is_empty() {
        let png = Png::new();
        assert!(png.is_empty());
        assert!(png.flatten().is_empty());
    }

    #[test]
    fn add_to_end_keeps_iend_last() {
        let mut png = typical();
        png.add_chunk(ChunkType::tEXt, *b"a\0b", Region::End).unwrap();
        assert_eq!(
            types(png.region(Region::End)),
            [ChunkType::tEXt, ChunkType::IEND]
        );
        png.add_chunk(ChunkType::tIME, [0u8; 7], Region::End).unwrap();
        assert_eq!(
            types(png.region(Region::End)),
            [ChunkType::tIME, ChunkType::tEXt, ChunkType::IEND]
        );
    }

    #[test]
    fn add_appends_to_begin_and_data() {
        let mut png = typical();
        png.add_chunk(ChunkType::gAMA, [0u8, 0, 0xB1, 0x8F], Region::Begin)
            .unwrap();
        png.add_chunk(ChunkType::IDAT, *b"more", Region::Data).unwrap();
        assert_eq!(
            types(png.region(Region::Begin)),
            [ChunkType::IHDR, ChunkType::pHYs, ChunkType::gAMA]
        );
        assert_eq!(png.region(Region::Data).last().unwrap().data(), b"more");
    }

    #[test]
    fn added_chunk_is_consistent() {
        let mut png = Png::new();
        png.add_chunk(ChunkType::tEXt, *b"k\0v", Region::Begin).unwrap();
        let chunk = png.get_chunk(ChunkType::tEXt, Region::Begin).unwrap();
        assert_eq!(chunk.length(), 3);
        assert!(chunk.is_consistent());
    }

    #[test]
    fn get_missing_chunk() {
        let png = typical();
        let err = png.get_chunk(ChunkType::tEXt, Region::Begin).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                ty: ChunkType::tEXt,
                region: Region::Begin
            }
        ));
        // present, but in another region
        assert!(png.get_chunk(ChunkType::IEND, Region::Begin).is_err());
    }

    #[test]
    fn get_chunks_in_order() {
        let mut png = typical();
        png.add_chunk(ChunkType::tEXt, *b"1", Region::End).unwrap();
        png.add_chunk(ChunkType::tEXt, *b"2", Region::End).unwrap();
        let found = png.get_chunks(ChunkType::tEXt, Region::End);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].data(), b"2");
        assert_eq!(found[1].data(), b"1");
        assert!(png.get_chunks(ChunkType::zTXt, Region::End).is_empty());
    }

    #[test]
    fn set_chunk_replaces_first_match() {
        let mut png = typical();
        png.add_chunk(ChunkType::tEXt, *b"old", Region::Begin).unwrap();
        png.add_chunk(ChunkType::tEXt, *b"other", Region::Begin).unwrap();
        png.set_chunk(ChunkType::tEXt, *b"newer", Region::Begin)
            .unwrap();
        let found = png.get_chunks(ChunkType::tEXt, Region::Begin);
        assert_eq!(found[0].data(), b"newer");
        assert_eq!(found[0].length(), 5);
        assert!(found[0].is_consistent());
        assert_eq!(found[1].data(), b"other");
    }

    #[test]
    fn set_chunk_adds_when_missing() {
        let mut png = typical();
        png.set_chunk(ChunkType::tEXt, *b"x", Region::End).unwrap();
        assert_eq!(
            types(png.region(Region::End)),
            [ChunkType::tEXt, ChunkType::IEND]
        );
    }

    #[test]
    fn set_chunk_unchecked_keeps_length_and_crc() {
        let mut png = typical();
        let before = png.get_chunk(ChunkType::pHYs, Region::Begin).unwrap().clone();
        png.set_chunk_unchecked(ChunkType::pHYs, [1u8; 9], Region::Begin)
            .unwrap();
        let after = png.get_chunk(ChunkType::pHYs, Region::Begin).unwrap();
        assert_eq!(after.data(), &[1u8; 9]);
        assert_eq!(after.length(), before.length());
        assert_eq!(after.crc(), before.crc());
        assert!(!after.is_consistent());
    }

    #[test]
    fn set_chunk_unchecked_adds_when_missing() {
        let mut png = typical();
        png.set_chunk_unchecked(ChunkType::tEXt, *b"k\0v", Region::Begin)
            .unwrap();
        let chunk = png.get_chunk(ChunkType::tEXt, Region::Begin).unwrap();
        assert!(chunk.is_consistent());
    }

    #[test]
    fn remove_chunk() {
        let mut png = typical();
        let removed = png.remove_chunk(ChunkType::pHYs, Region::Begin).unwrap();
        assert_eq!(removed.ty(), ChunkType::pHYs);
        assert_eq!(types(png.region(Region::Begin)), [ChunkType::IHDR]);
        assert!(png.remove_chunk(ChunkType::pHYs, Region::Begin).is_none());
    }

    #[test]
    fn header_without_ihdr() {
        let png = png(&[ChunkType::IDAT, ChunkType::IEND]);
        let err = png.header().unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::MissingChunk(ChunkType::IHDR)));
    }

    #[test]
    fn header_too_short() {
        let png = typical();
        let err = png.header().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::HeaderTooShort(0))
        ));
    }

    #[test]
    fn physical_dimensions_round_trip() {
        let mut png = typical();
        png.remove_chunk(ChunkType::pHYs, Region::Begin);
        assert!(png.physical_dimensions().unwrap_err().is_not_found());
        png.set_physical_dimensions(2834.6).unwrap();
        let phys = png.physical_dimensions().unwrap();
        assert_eq!((phys.x, phys.y), (2835, 2835));
        assert_eq!(
            types(png.region(Region::Begin)),
            [ChunkType::IHDR, ChunkType::pHYs]
        );
    }
}
