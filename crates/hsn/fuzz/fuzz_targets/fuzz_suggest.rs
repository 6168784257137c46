//! Fuzz target for description suggestions.

#![no_main]

use std::sync::{Arc, OnceLock};

use hsn::{CodeEntry, ReferenceStore, Suggester};
use libfuzzer_sys::fuzz_target;

fn suggester() -> &'static Suggester {
    static SUGGESTER: OnceLock<Suggester> = OnceLock::new();
    SUGGESTER.get_or_init(|| {
        let entries = vec![
            CodeEntry::new("01", "LIVE ANIMALS"),
            CodeEntry::new("0101", "LIVE HORSES, ASSES, MULES AND HINNIES"),
            CodeEntry::new("02", "MEAT AND EDIBLE MEAT OFFAL"),
            CodeEntry::new("8517", "TELEPHONE SETS, INCLUDING SMARTPHONES"),
        ];
        Suggester::new(Arc::new(ReferenceStore::from_entries(entries).unwrap()))
    })
}

fuzz_target!(|data: &[u8]| {
    // Scoring is quadratic in query length
    if data.len() > 2_000 {
        return;
    }

    if let Ok(input) = std::str::from_utf8(data) {
        let results = suggester().suggest(input, 5);
        assert!(results.len() <= 5);
        for s in &results {
            assert!(s.confidence > 0.0 && s.confidence <= 1.0);
        }
    }
});
