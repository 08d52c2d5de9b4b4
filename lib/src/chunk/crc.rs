/// Incremental CRC-32/IEEE hasher used for chunk checksums.
#[derive(Clone, Default, Debug)]
pub(crate) struct Crc32(crc32fast::Hasher);

impl Crc32 {
    #[inline]
    pub(crate) fn new() -> Self {
        Self(crc32fast::Hasher::new())
    }

    #[inline]
    pub(crate) fn update(&mut self, buf: &[u8]) {
        self.0.update(buf)
    }

    #[inline]
    pub(crate) fn finalize(self) -> u32 {
        self.0.finalize()
    }
}
