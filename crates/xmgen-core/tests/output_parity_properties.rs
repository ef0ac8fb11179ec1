//! Property-based tests for cross-artifact parity and separator placement
//!
//! All declared outputs of one invocation must render the same number of
//! body units, in the same group order, because they share one
//! classification. Separators land strictly between units.

use proptest::prelude::*;
use xmgen_core::{GenError, Generator, GeneratorSpec, Invocation};

const MAX_REPEATS: usize = 12;

/// Two outputs with distinctive unit markers: `E:<tag>` per enum unit,
/// `T:<tag>=<value>` per table unit, `|` as the separator in both.
fn spec() -> GeneratorSpec {
    let text = format!(
        r#"
[common]
prefix = "P_"
max_repeats = {MAX_REPEATS}

[core]
invocation = "parity_check"
named_args = ["name"]
group_size = 2

[[outputs]]
preamble = "enum {{{{name}}}} ["
body = "E:{{{{@prefix}}}}{{{{0}}}}"
separator = "|"
postamble = "]"

[outputs.fallbacks]
empty = "EMPTY"
unparity = "UNPARITY"

[[outputs]]
preamble = "table {{{{name}}}} ["
body = "T:{{{{@prefix}}}}{{{{0}}}}={{{{1}}}}"
separator = "|"
postamble = "]"

[outputs.fallbacks]
empty = "EMPTY"
unparity = "UNPARITY"
"#
    );
    GeneratorSpec::parse(&text).unwrap()
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,6}".prop_map(|s| s.to_string())
}

fn tail_from(pairs: &[(String, String)]) -> Vec<String> {
    pairs
        .iter()
        .flat_map(|(tag, value)| [tag.clone(), value.clone()])
        .collect()
}

proptest! {
    /// Both artifacts render exactly k units, and the i-th unit of each
    /// names the same tag.
    #[test]
    fn prop_artifacts_stay_in_lockstep(
        pairs in prop::collection::vec((tag_strategy(), tag_strategy()), 1..=MAX_REPEATS),
    ) {
        let generator = Generator::new(spec());
        let invocation = Invocation::new(["demo"], tail_from(&pairs));
        let output = generator.generate(&invocation).unwrap();

        let artifacts: Vec<&str> = output.trim_end().split("\n\n").collect();
        prop_assert_eq!(artifacts.len(), 2);

        let enum_tags: Vec<&str> = artifacts[0]
            .split("E:P_")
            .skip(1)
            .map(|unit| unit.split(['|', ']']).next().unwrap())
            .collect();
        let table_tags: Vec<&str> = artifacts[1]
            .split("T:P_")
            .skip(1)
            .map(|unit| unit.split('=').next().unwrap())
            .collect();

        prop_assert_eq!(enum_tags.len(), pairs.len());
        prop_assert_eq!(table_tags.len(), pairs.len());
        for (index, (tag, _)) in pairs.iter().enumerate() {
            prop_assert_eq!(enum_tags[index], tag.as_str());
            prop_assert_eq!(table_tags[index], tag.as_str());
        }
    }

    /// k units carry exactly k-1 separators, none leading or trailing.
    #[test]
    fn prop_separator_lands_between_units_only(
        pairs in prop::collection::vec((tag_strategy(), tag_strategy()), 1..=MAX_REPEATS),
    ) {
        let generator = Generator::new(spec());
        let invocation = Invocation::new(["demo"], tail_from(&pairs));
        let output = generator.generate(&invocation).unwrap();

        for artifact in output.trim_end().split("\n\n") {
            prop_assert_eq!(artifact.matches('|').count(), pairs.len() - 1);
            let inner = artifact
                .split('[')
                .nth(1)
                .unwrap()
                .trim_end_matches(']');
            prop_assert!(!inner.starts_with('|'));
            prop_assert!(!inner.ends_with('|'));
        }
    }

    /// Rendering the same (spec, invocation) twice is byte-identical.
    #[test]
    fn prop_generation_is_deterministic(
        pairs in prop::collection::vec((tag_strategy(), tag_strategy()), 1..=MAX_REPEATS),
    ) {
        let generator = Generator::new(spec());
        let invocation = Invocation::new(["demo"], tail_from(&pairs));
        let first = generator.generate(&invocation).unwrap();
        let second = generator.generate(&invocation).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Any group count past the ceiling is a hard error, never partial
    /// output.
    #[test]
    fn prop_ceiling_is_enforced(extra in 1usize..8) {
        let generator = Generator::new(spec());
        let pairs: Vec<(String, String)> = (0..MAX_REPEATS + extra)
            .map(|i| (format!("TAG{i}"), format!("V{i}")))
            .collect();
        let invocation = Invocation::new(["demo"], tail_from(&pairs));
        match generator.generate(&invocation) {
            Err(GenError::ArityExceeded { groups, max_repeats }) => {
                prop_assert_eq!(groups, MAX_REPEATS + extra);
                prop_assert_eq!(max_repeats, MAX_REPEATS);
            }
            other => {
                prop_assert!(false, "expected ArityExceeded, got {:?}", other.is_ok());
            }
        }
    }
}
