#![no_main]

use bundlescope::{bundle::BUNDLE_SIGNATURE, SingleFileBundle};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Give the input a signature so discovery reaches the manifest decoder
    let mut host = data.to_vec();
    if host.len() >= 8 {
        host.splice(8..8, BUNDLE_SIGNATURE);
    }

    if let Ok(Some(bundle)) = SingleFileBundle::from_mem(host) {
        for index in 0..bundle.manifest().entries().len() {
            let _ = bundle.read_entry(index);
        }
    }
});
