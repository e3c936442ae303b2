#![no_main]

use bundlescope::{io::EndianReader, BundleManifest};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut reader = EndianReader::new(Cursor::new(data));
    let _ = BundleManifest::read(&mut reader);
});
