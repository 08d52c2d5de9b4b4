#![no_main]

use libfuzzer_sys::fuzz_target;
use libpngmeta::Png;

fuzz_target!(|data: &[u8]| {
    let Ok(png) = Png::load(data) else {
        return;
    };
    assert_eq!(Png::load_from_slice(data).unwrap(), png);

    let bytes = png.to_bytes().unwrap();
    let reloaded = Png::load(bytes.as_slice()).unwrap();
    assert_eq!(reloaded.flatten(), png.flatten());
});
