mod common;

use common::{IHDR_DATA, build_png, sample_png};
use libpngmeta::{ChunkType, Error, FormatError, Png, prelude::*, read_chunks};

#[test]
fn load_write_load() {
    let src = sample_png();
    let png = Png::load(src.as_slice()).unwrap();
    let mut dist = Vec::new();
    png.write(&mut dist).unwrap();
    assert_eq!(src, dist);

    let reloaded = Png::load(dist.as_slice()).unwrap();
    assert_eq!(reloaded.flatten(), png.flatten());
}

#[test]
fn flatten_matches_stream_order() {
    let src = sample_png();
    let chunks = read_chunks(src.as_slice()).unwrap();
    let png = Png::load(src.as_slice()).unwrap();
    assert_eq!(png.flatten(), chunks);
    assert_eq!(png.into_chunks(), chunks);
}

#[test]
fn slice_and_reader_agree() {
    let src = sample_png();
    assert_eq!(
        Png::load_from_slice(&src).unwrap(),
        Png::load(src.as_slice()).unwrap()
    );
}

#[test]
fn bytes_after_iend_are_dropped() {
    let mut src = sample_png();
    let len = src.len();
    src.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    let png = Png::load(src.as_slice()).unwrap();
    assert_eq!(png.to_bytes().unwrap(), &src[..len]);
}

#[test]
fn any_flipped_type_or_data_byte_is_detected() {
    let src = build_png(&[
        (ChunkType::IHDR, &IHDR_DATA[..]),
        (ChunkType::IEND, &[][..]),
    ]);
    // IHDR frame: length at 8..12, type at 12..16, data at 16..29
    for i in 12..29 {
        let mut broken = src.clone();
        broken[i] ^= 0x01;
        let err = Png::load(broken.as_slice()).unwrap_err();
        assert!(
            matches!(err, Error::Format(FormatError::ChecksumMismatch { .. })),
            "byte {i}: {err}"
        );
    }
}

#[test]
fn broken_stored_crc_is_detected() {
    let mut src = sample_png();
    let last = src.len() - 1;
    src[last] ^= 0x80;
    let err = Png::load(src.as_slice()).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::ChecksumMismatch {
            ty: ChunkType::IEND,
            ..
        })
    ));
}

#[test]
fn invalid_signature() {
    let mut src = sample_png();
    src[0] = 0x88;
    let err = Png::load(src.as_slice()).unwrap_err();
    assert!(matches!(err, Error::Format(FormatError::InvalidSignature)));
}

#[test]
fn truncated_input_returns_no_chunks() {
    let src = sample_png();
    for len in [8 + 3, 8 + 12 + 5, src.len() - 1] {
        let err = Png::load(&src[..len]).unwrap_err();
        assert!(err.is_truncated(), "len {len}: {err}");
    }
}

#[test]
fn loaded_chunks_are_consistent() {
    let png = Png::load(sample_png().as_slice()).unwrap();
    for chunk in png.chunks() {
        assert!(chunk.is_consistent(), "{}", chunk.ty());
        assert_eq!(chunk.length() as usize, chunk.data().len());
    }
}
