use crate::chunk::MAX_CHUNK_LENGTH;

/// Options for reading a PNG chunk stream.
///
/// # Examples
/// ```
/// use libpngmeta::ReadOptions;
///
/// let options = ReadOptions::builder().max_chunk_length(1 << 20).build();
/// assert_eq!(options.max_chunk_length(), 1 << 20);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ReadOptions {
    max_chunk_length: u32,
}

impl ReadOptions {
    /// Returns a builder for [ReadOptions].
    ///
    /// # Returns
    ///
    /// [ReadOptionsBuilder]: Builder object for [ReadOptions].
    #[inline]
    pub const fn builder() -> ReadOptionsBuilder {
        ReadOptionsBuilder::new()
    }

    /// Converts [ReadOptions] into a [ReadOptionsBuilder].
    #[inline]
    pub fn into_builder(self) -> ReadOptionsBuilder {
        self.into()
    }

    /// Largest data length a chunk frame may declare.
    #[inline]
    pub const fn max_chunk_length(&self) -> u32 {
        self.max_chunk_length
    }
}

impl Default for ReadOptions {
    #[inline]
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A builder for creating [`ReadOptions`].
///
/// # Examples
///
/// ```
/// use libpngmeta::ReadOptions;
///
/// let read_options = ReadOptions::builder()
///     .max_chunk_length(64 * 1024)
///     .build();
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ReadOptionsBuilder {
    max_chunk_length: u32,
}

impl Default for ReadOptionsBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<ReadOptions> for ReadOptionsBuilder {
    #[inline]
    fn from(value: ReadOptions) -> Self {
        Self {
            max_chunk_length: value.max_chunk_length,
        }
    }
}

impl ReadOptionsBuilder {
    #[inline]
    const fn new() -> Self {
        Self {
            max_chunk_length: MAX_CHUNK_LENGTH,
        }
    }

    /// Sets the largest data length accepted for a single chunk.
    ///
    /// Values above 2^31-1 are clamped, since PNG does not allow longer chunks.
    #[inline]
    pub fn max_chunk_length(&mut self, length: u32) -> &mut Self {
        self.max_chunk_length = length.min(MAX_CHUNK_LENGTH);
        self
    }

    /// Creates a new [`ReadOptions`] from this builder.
    #[inline]
    pub fn build(&self) -> ReadOptions {
        ReadOptions {
            max_chunk_length: self.max_chunk_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_png_maximum() {
        assert_eq!(ReadOptions::default().max_chunk_length(), MAX_CHUNK_LENGTH);
    }

    #[test]
    fn clamps_to_png_maximum() {
        let options = ReadOptions::builder().max_chunk_length(u32::MAX).build();
        assert_eq!(options.max_chunk_length(), MAX_CHUNK_LENGTH);
    }

    #[test]
    fn into_builder_keeps_values() {
        let options = ReadOptions::builder().max_chunk_length(42).build();
        assert_eq!(options.into_builder().build(), options);
    }
}
