use proptest::prelude::*;
use regen_core::{CapturePolicy, Generator, GeneratorConfig, RegenError};
use regex::Regex;
use std::collections::HashSet;

const TRIALS: usize = 500;

fn seeded(pattern: &str, seed: u64) -> Generator {
    let config = GeneratorConfig::builder().seed(seed).build();
    Generator::with_config(pattern, &config).unwrap()
}

fn full_match(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).unwrap()
}

#[test]
fn test_output_rematches_pattern() {
    let patterns = [
        "a+",
        "[0-9]{3}",
        "(a|b)c",
        r"[A-Z][a-z]{2,4}\d{2}",
        r"\w+@\w+\.(com|org|net)",
        "(foo|bar)*baz?",
        "[^a-z]{5}",
        ".{1,8}",
        "(?s).{3}",
        r"\d{3}-\d{4}",
        "[[:alpha:]]+[[:punct:]]",
        "(?i)hello",
        "(ab){2}(cd)?",
        r"[\s]{2}",
        "x{2,}y{0,}",
        "(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)",
    ];

    for pattern in patterns {
        let re = full_match(pattern);
        let mut generator = seeded(pattern, 7);
        for _ in 0..TRIALS {
            let value = generator.generate();
            assert!(
                re.is_match(&value),
                "pattern {pattern:?} generated {value:?} which does not match"
            );
        }
    }
}

#[test]
fn test_plus_of_single_char() {
    for value in seeded("a+", 1).take(TRIALS) {
        assert!((1..=10).contains(&value.len()), "got {value:?}");
        assert!(value.chars().all(|c| c == 'a'));
    }
}

#[test]
fn test_fixed_digit_count() {
    for value in seeded("[0-9]{3}", 2).take(TRIALS) {
        assert_eq!(value.len(), 3);
        assert!(value.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_bounded_repeat_above_cap() {
    let lengths: HashSet<usize> = seeded("z{12,15}", 13).take(TRIALS).map(|v| v.len()).collect();
    assert_eq!(lengths, (12..=15).collect());
}

#[test]
fn test_alternation_reaches_every_branch() {
    let seen: HashSet<String> = seeded("(a|b)c", 3).take(TRIALS).collect();
    assert_eq!(seen, HashSet::from(["ac".to_string(), "bc".to_string()]));
}

#[test]
fn test_alternation_of_words_reaches_every_branch() {
    let seen: HashSet<String> = seeded("cat|dog|bird", 3).take(TRIALS).collect();
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_backreference_literal_repeats_capture() {
    let mut generator = seeded("(abc)<g1>", 4);
    for _ in 0..10 {
        assert_eq!(generator.generate(), "abcabc");
    }
}

#[test]
fn test_backreference_to_random_group() {
    for value in seeded("([a-z]{4})<g1>", 5).take(TRIALS) {
        assert_eq!(value.len(), 8);
        let (left, right) = value.split_at(4);
        assert_eq!(left, right);
    }
}

#[test]
fn test_backreference_without_group_uses_octal() {
    assert_eq!(seeded("<g101>", 6).generate(), "A");
    assert_eq!(seeded("(x)<g2>", 6).generate(), "x\u{2}");
}

#[test]
fn test_adjacent_text_disables_directive() {
    assert_eq!(seeded("(x)-<g1>", 6).generate(), "x-<g1>");
}

#[test]
fn test_dot_never_emits_newline() {
    for value in seeded(".", 8).take(TRIALS * 4) {
        assert_eq!(value.chars().count(), 1);
        assert_ne!(value, "\n");
    }
}

#[test]
fn test_dot_all_emits_newline_sometimes() {
    let values: Vec<String> = seeded("(?s).", 9).take(TRIALS * 10).collect();
    assert!(values.iter().all(|v| v.chars().count() == 1));
    assert!(values.iter().any(|v| v == "\n"));
}

#[test]
fn test_assertions_contribute_nothing() {
    assert_eq!(seeded(r"^\bword\b$", 10).generate(), "word");
}

#[test]
fn test_persisted_captures_cross_calls() {
    let config = GeneratorConfig::builder()
        .seed(11)
        .capture_policy(CapturePolicy::Persist)
        .build();
    let mut generator = Generator::with_config("<g1>([xy])", &config).unwrap();

    let mut previous = generator.generate().pop().unwrap();
    for _ in 0..20 {
        let value = generator.generate();
        assert!(value.starts_with(previous), "{value:?} should start with {previous:?}");
        previous = value.chars().last().unwrap();
    }
}

#[test]
fn test_syntax_errors_are_passed_through() {
    for pattern in ["(abc", "[b-a]", "a{3,1}"] {
        let err = Generator::new(pattern).unwrap_err();
        assert!(matches!(err, RegenError::Parse(_)), "{pattern:?}: {err:?}");
    }
}

#[test]
fn test_case_insensitive_config() {
    let config = GeneratorConfig::builder()
        .seed(12)
        .case_insensitive(true)
        .build();
    let seen: HashSet<String> = Generator::with_config("a", &config)
        .unwrap()
        .take(TRIALS)
        .collect();
    assert_eq!(seen, HashSet::from(["a".to_string(), "A".to_string()]));
}

#[test]
fn test_convenience_generate() {
    assert_eq!(regen_core::generate("fixed").unwrap(), "fixed");
}

proptest! {
    #[test]
    fn prop_independent_generators_both_match(first in any::<u64>(), second in any::<u64>()) {
        let pattern = r"[a-f0-9]{8}-(dev|prod)_\d+";
        let re = full_match(pattern);
        prop_assert!(re.is_match(&seeded(pattern, first).generate()));
        prop_assert!(re.is_match(&seeded(pattern, second).generate()));
    }

    #[test]
    fn prop_bounded_repeat_stays_in_bounds(seed in any::<u64>(), min in 0u32..6, extra in 0u32..6) {
        let max = min + extra;
        let value = seeded(&format!("z{{{min},{max}}}"), seed).generate();
        let len = value.len() as u32;
        prop_assert!(min <= len && len <= max);
    }

    #[test]
    fn prop_unbounded_repeat_is_capped(seed in any::<u64>(), min in 0u32..10) {
        let value = seeded(&format!("z{{{min},}}"), seed).generate();
        let len = value.len() as u32;
        prop_assert!(min <= len && len <= 10);
    }
}
