use crate::chunk::{ChunkExt, RawChunk};
use std::fmt::{self, Display, Formatter};

/// One of the three ordered partitions of a PNG chunk sequence.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Region {
    /// Chunks before the image data (`IHDR`, `PLTE`, `pHYs`, ...).
    Begin,
    /// The run of `IDAT` chunks.
    Data,
    /// Chunks after the image data, ending with `IEND`.
    End,
}

impl Region {
    /// All regions in stream order.
    pub const ALL: [Region; 3] = [Region::Begin, Region::Data, Region::End];
}

impl Display for Region {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Begin => "begin",
            Self::Data => "data",
            Self::End => "end",
        })
    }
}

/// Splits a flat chunk sequence into `(begin, data, end)` around the `IDAT` run.
///
/// `data` starts at the first `IDAT` (index 0 when there is none) and ends
/// after the last `IDAT` found scanning backward from the end, not looking at
/// index 0. When that scan finds nothing, `data` ends before the last chunk,
/// so a stream without `IDAT` puts everything but its last chunk into `data`.
pub(crate) fn partition(
    mut chunks: Vec<RawChunk>,
) -> (Vec<RawChunk>, Vec<RawChunk>, Vec<RawChunk>) {
    if chunks.is_empty() {
        return (Vec::new(), Vec::new(), Vec::new());
    }
    let idat_start = chunks
        .iter()
        .position(|c| c.is_image_data())
        .unwrap_or(0);
    let last = chunks.len() - 1;
    let idat_end = (1..=last)
        .rev()
        .find(|&i| chunks[i].is_image_data())
        .map_or(last, |i| i + 1);

    let end = chunks.split_off(idat_end.max(idat_start));
    let data = chunks.split_off(idat_start);
    log::debug!(
        "partitioned chunks: begin={}, data={}, end={}",
        chunks.len(),
        data.len(),
        end.len()
    );
    (chunks, data, end)
}
