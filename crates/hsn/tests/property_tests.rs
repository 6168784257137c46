//! Property-based tests for HSN validation and suggestion.
//!
//! These tests use proptest to generate random inputs and verify that
//! the validator and suggester keep their invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p hsn --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p hsn --test property_tests
//! ```

use std::sync::Arc;

use proptest::prelude::*;

use hsn::{CodeEntry, HsnAgent, QueryRequest, ReferenceStore, Suggester, Validator};

// =============================================================================
// Fixtures and Strategies
// =============================================================================

fn store() -> Arc<ReferenceStore> {
    let entries = vec![
        CodeEntry::new("01", "LIVE ANIMALS"),
        CodeEntry::new("0101", "LIVE HORSES, ASSES, MULES AND HINNIES"),
        CodeEntry::new("010121", "PURE-BRED BREEDING ANIMALS"),
        CodeEntry::new("01012100", "PURE-BRED BREEDING HORSES"),
        CodeEntry::new("0105", "LIVE POULTRY"),
        CodeEntry::new("02", "MEAT AND EDIBLE MEAT OFFAL"),
        CodeEntry::new("0201", "MEAT OF BOVINE ANIMALS, FRESH OR CHILLED"),
        CodeEntry::new("17", "SUGARS AND SUGAR CONFECTIONERY"),
        CodeEntry::new("1701", "CANE OR BEET SUGAR"),
        CodeEntry::new("85", "ELECTRICAL MACHINERY AND EQUIPMENT"),
        CodeEntry::new("8517", "TELEPHONE SETS, INCLUDING SMARTPHONES"),
        CodeEntry::new("99", "MISCELLANEOUS"),
    ];
    Arc::new(ReferenceStore::from_entries(entries).expect("fixture is valid"))
}

/// Strings made only of digits, of any length.
fn digit_string() -> impl Strategy<Value = String> {
    "[0-9]{0,12}"
}

/// Well-formed codes, biased toward the fixture's chapters.
fn well_formed_code() -> impl Strategy<Value = String> {
    prop_oneof![
        "(01|02|17|85|99)([0-9]{2}){0,3}",
        "([0-9]{2}){1,4}",
    ]
}

/// Comma-separated queries with blanks and noise.
fn code_query() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            well_formed_code(),
            digit_string(),
            "[a-zA-Z0-9 \\-]{0,10}",
            Just(String::new()),
        ],
        0..8,
    )
    .prop_map(|parts| parts.join(","))
}

/// Free-text descriptions.
fn description() -> impl Strategy<Value = String> {
    "[a-zA-Z ,\\-]{0,60}"
}

/// Arbitrary UTF-8.
fn random_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..200)
        .prop_filter_map("valid UTF-8", |bytes| String::from_utf8(bytes).ok())
}

// =============================================================================
// Validator Properties
// =============================================================================

mod validator_tests {
    use super::*;

    proptest! {
        /// Validator never panics on arbitrary text.
        #[test]
        fn never_panics_on_random_text(input in random_text()) {
            let validator = Validator::new(store());
            let _ = validator.validate(&input);
        }

        /// One result per non-empty comma-separated piece, in order.
        #[test]
        fn one_result_per_token(query in code_query()) {
            let validator = Validator::new(store());
            let results = validator.validate(&query);
            let tokens: Vec<&str> = query
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();

            prop_assert_eq!(results.len(), tokens.len());
            for (result, token) in results.iter().zip(tokens) {
                prop_assert_eq!(result.input_code.as_str(), token);
            }
        }

        /// Validation is deterministic.
        #[test]
        fn validation_is_deterministic(query in code_query()) {
            let validator = Validator::new(store());
            prop_assert_eq!(validator.validate(&query), validator.validate(&query));
        }

        /// Valid results point at themselves and carry no error.
        #[test]
        fn valid_results_are_self_consistent(code in well_formed_code()) {
            let store = store();
            let result = Validator::new(Arc::clone(&store)).validate_code(&code);

            prop_assert_eq!(result.valid, store.contains(&code));
            if result.valid {
                prop_assert_eq!(result.nearest.as_deref(), Some(code.as_str()));
                prop_assert!(result.error.is_none());
                prop_assert!(result.description.is_some());
            }
        }

        /// A fallback is always a strictly shorter prefix present in the table.
        #[test]
        fn nearest_is_present_strict_prefix(code in well_formed_code()) {
            let store = store();
            let result = Validator::new(Arc::clone(&store)).validate_code(&code);

            if !result.valid {
                prop_assert!(result.error.is_some());
                if let Some(nearest) = &result.nearest {
                    prop_assert!(nearest.len() < code.len());
                    prop_assert!(code.starts_with(nearest.as_str()));
                    prop_assert!(store.contains(nearest));
                    prop_assert!(result.error.as_deref().unwrap().contains(nearest.as_str()));
                }
            }
        }

        /// The fallback is the longest present prefix.
        #[test]
        fn nearest_is_longest_present_prefix(code in well_formed_code()) {
            let store = store();
            let result = Validator::new(Arc::clone(&store)).validate_code(&code);

            if !result.valid {
                let expected = store
                    .ancestors(&code)
                    .into_iter()
                    .find(|prefix| store.contains(prefix));
                prop_assert_eq!(result.nearest, expected);
            }
        }

        /// Malformed digit strings report a format error and no fallback.
        #[test]
        fn malformed_codes_have_format_errors(code in digit_string()) {
            prop_assume!(code.is_empty() || code.len() % 2 == 1 || code.len() > 8);
            let result = Validator::new(store()).validate_code(&code);

            prop_assert!(!result.valid);
            prop_assert!(result.nearest.is_none());
            prop_assert!(result.error.as_deref().unwrap().starts_with("Invalid format"));
        }
    }
}

// =============================================================================
// Suggester Properties
// =============================================================================

mod suggester_tests {
    use super::*;

    proptest! {
        /// Suggester never panics on arbitrary text.
        #[test]
        fn never_panics_on_random_text(input in random_text(), top_k in 0usize..20) {
            let suggester = Suggester::new(store());
            let _ = suggester.suggest(&input, top_k);
        }

        /// Never more than top_k results, sorted by descending confidence.
        #[test]
        fn bounded_and_sorted(query in description(), top_k in 0usize..20) {
            let results = Suggester::new(store()).suggest(&query, top_k);

            prop_assert!(results.len() <= top_k);
            for pair in results.windows(2) {
                prop_assert!(pair[0].confidence >= pair[1].confidence);
            }
            for s in &results {
                prop_assert!(s.confidence > 0.0 && s.confidence <= 1.0);
            }
        }

        /// Suggestion is deterministic.
        #[test]
        fn suggestion_is_deterministic(query in description()) {
            let suggester = Suggester::new(store());
            prop_assert_eq!(suggester.suggest(&query, 5), suggester.suggest(&query, 5));
        }

        /// An exact description ranks its code first with full confidence.
        #[test]
        fn exact_description_ranks_first(idx in 0usize..12) {
            let store = store();
            let entry = store.entries()[idx].clone();
            let results = Suggester::new(store).suggest(&entry.description.to_lowercase(), 3);

            prop_assert_eq!(&results[0].code, &entry.code);
            prop_assert_eq!(results[0].confidence, 1.0);
        }
    }
}

// =============================================================================
// Agent Properties
// =============================================================================

mod agent_tests {
    use super::*;

    proptest! {
        /// Free-text messages never panic and always get a response.
        #[test]
        fn messages_never_panic(message in random_text()) {
            let agent = HsnAgent::new(store());
            let _ = agent.handle_message(&message);
        }

        /// Validation responses serialize to one key per distinct token.
        #[test]
        fn validate_response_keys(query in code_query()) {
            let agent = HsnAgent::new(store());
            let json = serde_json::to_value(agent.handle(&QueryRequest::validate(query.clone()))).unwrap();
            let mut tokens: Vec<&str> = query
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            tokens.sort_unstable();
            tokens.dedup();

            prop_assert_eq!(json.as_object().unwrap().len(), tokens.len());
        }
    }
}
