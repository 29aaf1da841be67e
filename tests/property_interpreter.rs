// tests/property_interpreter.rs

//! Property tests for the progress interpreter.

use proptest::prelude::*;

use clipfetch::progress::{ProgressEvent, ProgressInterpreter};

proptest! {
    // Lowercase letters only: no digits, no '%', no '=', and none of the
    // recognized phrases (they all contain spaces or capitals), so every
    // such line must pass through untouched.
    #[test]
    fn unrecognized_lines_round_trip(line in "[a-z]{0,40}") {
        let mut interp = ProgressInterpreter::new();
        match interp.interpret(&line) {
            ProgressEvent::RawLine(out) => prop_assert_eq!(out, line),
            other => prop_assert!(false, "expected pass-through, got {:?}", other),
        }
    }

    // Whatever sequence of percent tokens arrives, the reported percentages
    // never move backwards.
    #[test]
    fn reported_percentages_never_regress(
        values in proptest::collection::vec(0u32..=100, 1..20)
    ) {
        let mut interp = ProgressInterpreter::new();
        let mut last = -1.0_f64;

        for v in values {
            let line = format!("[download]  {v}.0% of 10.00MiB");
            if let ProgressEvent::Percent(p) = interp.interpret(&line) {
                prop_assert!(p >= last, "percent regressed: {} after {}", p, last);
                last = p;
            }
        }
    }

    // Every line yields exactly one event and never panics, whatever the
    // input looks like.
    #[test]
    fn no_line_is_ever_dropped_or_fatal(line in "\\PC{0,60}") {
        let mut interp = ProgressInterpreter::new();
        match interp.interpret(&line) {
            ProgressEvent::Percent(p) => prop_assert!((0.0..=100.0).contains(&p)),
            ProgressEvent::Status(s) => prop_assert_eq!(s, line),
            ProgressEvent::RawLine(s) => prop_assert_eq!(s, line),
        }
    }
}
