//! Fuzz target for the reference file loader.
//!
//! Malformed files must produce errors, never panics.

#![no_main]

use std::io::Write;

use hsn::Loader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let _ = Loader::new().load_bytes(data);

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let _ = Loader::new().load_file(temp_file.path());
        }
    }
});
