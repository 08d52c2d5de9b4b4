//! Libpngmeta Prelude.
//!
//! The purpose of this module is to alleviate imports of the [`Chunk`] trait,
//! needed to call its accessors on [`RawChunk`](crate::RawChunk), by adding a
//! glob import to modules:
//!
//! ```
//! # #![allow(unused_imports)]
//! use libpngmeta::prelude::*;
//! ```
pub use crate::chunk::Chunk;
