#![no_main]

use libfuzzer_sys::fuzz_target;
use libpngmeta::{ChunkType, Png, Region, prelude::*};

fuzz_target!(|input: (u32, u8, &[u8])| {
    let (ty, region, data) = input;
    let ty = ChunkType::from_u32(ty);
    let region = Region::ALL[region as usize % Region::ALL.len()];

    let mut png = Png::new();
    png.add_chunk(ChunkType::IEND, *b"", Region::End).unwrap();
    png.set_chunk(ty, data, region).unwrap();
    assert_eq!(png.get_chunk(ty, region).unwrap().data(), data);

    // an early IEND would cut the reload short
    if ty == ChunkType::IEND {
        return;
    }
    assert_eq!(png.chunks().last().unwrap().ty(), ChunkType::IEND);
    let bytes = png.to_bytes().unwrap();
    let reloaded = Png::load(bytes.as_slice()).unwrap();
    assert_eq!(reloaded.flatten(), png.flatten());
});
