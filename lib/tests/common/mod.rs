#![allow(dead_code)]

use libpngmeta::{ChunkStreamWriter, ChunkType};

pub const IHDR_DATA: [u8; 13] = [0, 0, 0, 10, 0, 0, 0, 20, 8, 2, 0, 0, 0];

/// Serializes `chunks` behind a PNG signature with fresh lengths and checksums.
pub fn build_png(chunks: &[(ChunkType, &[u8])]) -> Vec<u8> {
    let mut writer = ChunkStreamWriter::write_signature(Vec::new()).unwrap();
    for (ty, data) in chunks {
        writer.write_new_chunk(*ty, data).unwrap();
    }
    writer.into_inner()
}

/// IHDR, gAMA, pHYs, three IDAT, tEXt, IEND.
pub fn sample_png() -> Vec<u8> {
    build_png(&[
        (ChunkType::IHDR, &IHDR_DATA[..]),
        (ChunkType::gAMA, &[0, 0, 0xB1, 0x8F][..]),
        (ChunkType::pHYs, &[0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1][..]),
        (ChunkType::IDAT, &[0x78, 0x9C, 0x62, 0x60][..]),
        (ChunkType::IDAT, &[0x60, 0x60, 0x00, 0x00][..]),
        (ChunkType::IDAT, &[0x00, 0x05, 0x00, 0x01][..]),
        (ChunkType::tEXt, &b"Comment\0sample"[..]),
        (ChunkType::IEND, &[][..]),
    ])
}
