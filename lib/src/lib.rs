//! A library for reading, editing and writing the chunk stream of PNG images
//!
//! This library parses a PNG byte stream into its chunks, verifying the
//! signature and every chunk's CRC, and splits them into three [`Region`]s:
//! the metadata before the image data, the `IDAT` run, and the metadata after
//! it. Chunks can then be queried, added or replaced per region, and the
//! result written back as a valid stream. Pixel data is never decompressed.
//!
//! # Examples
//! ```
//! use libpngmeta::{ChunkStreamWriter, ChunkType, Png, Region};
//!
//! # fn main() -> libpngmeta::Result<()> {
//! # let mut writer = ChunkStreamWriter::write_signature(Vec::new())?;
//! # writer.write_new_chunk(ChunkType::IHDR, &[0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0])?;
//! # writer.write_new_chunk(ChunkType::IDAT, &[0x78, 0x9C])?;
//! # writer.write_new_chunk(ChunkType::IEND, &[])?;
//! # let input = writer.into_inner();
//! let mut png = Png::load(input.as_slice())?;
//! png.set_physical_dimensions(72.0 / 0.0254)?;
//! png.add_chunk(ChunkType::tEXt, *b"Software\0libpngmeta", Region::End)?;
//!
//! let mut output = Vec::new();
//! png.write(&mut output)?;
//!
//! let png = Png::load(output.as_slice())?;
//! assert_eq!(png.header()?.width, 1);
//! assert_eq!(png.physical_dimensions()?.x, 2835);
//! # Ok(())
//! # }
//! ```
#![doc(html_root_url = "https://docs.rs/libpngmeta/0.1.0")]
pub(crate) mod chunk;
pub(crate) mod error;
pub(crate) mod header;
pub(crate) mod phys;
pub(crate) mod png;
pub mod prelude;

pub use chunk::*;
pub use error::*;
pub use header::*;
pub use phys::*;
pub use png::*;
