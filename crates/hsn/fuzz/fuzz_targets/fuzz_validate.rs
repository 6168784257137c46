//! Fuzz target for code validation.
//!
//! Validation must never panic, and every fallback must be a strictly
//! shorter prefix of the input that exists in the table.

#![no_main]

use std::sync::{Arc, OnceLock};

use hsn::{CodeEntry, HsnAgent, ReferenceStore, Validator};
use libfuzzer_sys::fuzz_target;

fn store() -> Arc<ReferenceStore> {
    static STORE: OnceLock<Arc<ReferenceStore>> = OnceLock::new();
    Arc::clone(STORE.get_or_init(|| {
        let entries = vec![
            CodeEntry::new("01", "LIVE ANIMALS"),
            CodeEntry::new("0101", "LIVE HORSES, ASSES, MULES AND HINNIES"),
            CodeEntry::new("01012100", "PURE-BRED BREEDING HORSES"),
            CodeEntry::new("99", "MISCELLANEOUS"),
        ];
        Arc::new(ReferenceStore::from_entries(entries).unwrap())
    }))
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let validator = Validator::new(store());
        for result in validator.validate(input) {
            if result.valid {
                assert_eq!(result.nearest.as_deref(), Some(result.input_code.as_str()));
            } else if let Some(nearest) = &result.nearest {
                assert!(nearest.len() < result.input_code.len());
                assert!(result.input_code.starts_with(nearest.as_str()));
            }
        }

        let _ = HsnAgent::new(store()).handle_message(input);
    }
});
