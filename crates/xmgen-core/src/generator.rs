//! Generation driver and output aggregator
//!
//! One [`Generator`] owns a loaded spec plus the arity ladder built for it.
//! Per invocation it classifies the variadic tail exactly once, renders
//! every declared output against that single classification in declaration
//! order, and either aggregates the artifacts or fails with a diagnostic.
//! Generation is atomic: a failed invocation emits nothing.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::classify::{classify, Classification};
use crate::error::GenError;
use crate::ladder::Ladder;
use crate::render::{render_fallback, render_normal, FallbackKind};
use crate::spec::GeneratorSpec;

/// One call site: named-argument values plus the variadic tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Named-argument values, positionally matching `core.named_args`
    pub named: Vec<String>,
    /// The flat variadic tail
    pub tail: Vec<String>,
}

impl Invocation {
    /// Build an invocation from anything string-like.
    pub fn new<N: Into<String>, T: Into<String>>(
        named: impl IntoIterator<Item = N>,
        tail: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            named: named.into_iter().map(Into::into).collect(),
            tail: tail.into_iter().map(Into::into).collect(),
        }
    }
}

/// The generation driver. Built once per loaded spec; immutable and safe
/// to share across threads afterwards.
#[derive(Debug, Clone)]
pub struct Generator {
    spec: GeneratorSpec,
    ladder: Ladder,
}

impl Generator {
    /// Wrap a loaded spec, building its arity ladder.
    pub fn new(spec: GeneratorSpec) -> Self {
        let ladder = Ladder::build(spec.max_repeats());
        Self { spec, ladder }
    }

    /// The spec this generator was built from.
    pub fn spec(&self) -> &GeneratorSpec {
        &self.spec
    }

    /// Generate the aggregated text for one invocation.
    ///
    /// Successful artifacts are separated by a blank line and the result
    /// ends with a newline. On an empty or unpaired tail, every output's
    /// configured fallback is rendered and returned inside the error;
    /// nothing partial is ever produced.
    pub fn generate(&self, invocation: &Invocation) -> Result<String, GenError> {
        if invocation.named.len() != self.spec.named_args().len() {
            return Err(GenError::NamedArgumentCount {
                expected: self.spec.named_args().len(),
                actual: invocation.named.len(),
            });
        }

        let named: HashMap<String, String> = self
            .spec
            .named_args()
            .iter()
            .cloned()
            .zip(invocation.named.iter().cloned())
            .collect();

        let classification = classify(&invocation.tail, self.spec.group_size());
        debug!(
            invocation = %self.spec.invocation(),
            tail_len = invocation.tail.len(),
            groups = ?classification.group_count(),
            "classified variadic tail"
        );

        match classification {
            Classification::Normal { groups } => {
                let rule = self.ladder.rule(groups.len()).ok_or(GenError::ArityExceeded {
                    groups: groups.len(),
                    max_repeats: self.ladder.max_repeats(),
                })?;

                let mut artifacts = Vec::with_capacity(self.spec.outputs().len());
                for output in self.spec.outputs() {
                    artifacts.push(render_normal(
                        output,
                        &named,
                        self.spec.constants(),
                        &groups,
                        rule,
                    )?);
                }
                Ok(assemble(artifacts))
            }
            Classification::Empty => {
                let diagnostic = self.render_diagnostic(&named, FallbackKind::Empty)?;
                Err(GenError::EmptyInvocation { diagnostic })
            }
            Classification::Unparity { len } => {
                let diagnostic = self.render_diagnostic(&named, FallbackKind::Unparity)?;
                Err(GenError::Unparity {
                    len,
                    group_size: self.spec.group_size(),
                    diagnostic,
                })
            }
        }
    }

    /// Generate for many independent invocations in parallel.
    ///
    /// Results come back in input order; one invocation's failure does not
    /// affect any other.
    pub fn generate_many(&self, invocations: &[Invocation]) -> Vec<Result<String, GenError>> {
        invocations
            .par_iter()
            .map(|invocation| self.generate(invocation))
            .collect()
    }

    /// Render every output's fallback for a malformed tail. Parity holds
    /// for diagnostics too: each declared output contributes one unit.
    fn render_diagnostic(
        &self,
        named: &HashMap<String, String>,
        kind: FallbackKind,
    ) -> Result<String, GenError> {
        let mut texts = Vec::with_capacity(self.spec.outputs().len());
        for output in self.spec.outputs() {
            texts.push(render_fallback(output, named, self.spec.constants(), kind)?);
        }
        Ok(assemble(texts))
    }
}

/// Join rendered outputs: one artifact per paragraph, trailing newline.
fn assemble(artifacts: Vec<String>) -> String {
    if artifacts.is_empty() {
        return String::new();
    }
    let mut text = artifacts.join("\n\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r#"
[common]
prefix = "YA_HELLO_"
max_repeats = 4

[core]
invocation = "error_codes"
named_args = ["lowercase_name", "uppercase_name"]
group_size = 2

[[outputs]]
preamble = "enum ya_{{lowercase_name}}_error_codes {"
body = "{{@prefix}}{{0}}"
separator = ","
postamble = "};"

[outputs.fallbacks]
empty = "no members were specified for this enum type"
unparity = "error code doesn't have its message pair"

[[outputs]]
preamble = "const char *ya_{{lowercase_name}}_conversion_table[] = {"
body = "[{{@prefix}}{{0}}] = {{1}}"
separator = ", "
postamble = "};"

[outputs.fallbacks]
empty = "no members were specified for this enum type"
unparity = "error code doesn't have its message pair"
"#;

    fn generator() -> Generator {
        Generator::new(GeneratorSpec::parse(SPEC).unwrap())
    }

    #[test]
    fn test_generate_worked_example() {
        let output = generator()
            .generate(&Invocation::new(["hello", "HELLO"], ["HI", "\"HI\""]))
            .unwrap();
        assert_eq!(
            output,
            "enum ya_hello_error_codes {YA_HELLO_HI};\n\n\
             const char *ya_hello_conversion_table[] = {[YA_HELLO_HI] = \"HI\"};\n"
        );
    }

    #[test]
    fn test_generate_two_groups_keeps_parity() {
        let output = generator()
            .generate(&Invocation::new(
                ["hello", "HELLO"],
                ["HI", "\"HI\"", "BYE", "\"BYE\""],
            ))
            .unwrap();
        assert!(output.contains("YA_HELLO_HI,YA_HELLO_BYE"));
        assert!(output.contains("[YA_HELLO_HI] = \"HI\", [YA_HELLO_BYE] = \"BYE\""));
    }

    #[test]
    fn test_empty_tail_fails_with_every_fallback() {
        let err = generator()
            .generate(&Invocation::new(["hello", "HELLO"], Vec::<String>::new()))
            .unwrap_err();
        match err {
            GenError::EmptyInvocation { diagnostic } => {
                assert_eq!(
                    diagnostic
                        .matches("no members were specified for this enum type")
                        .count(),
                    2
                );
                assert!(diagnostic.starts_with("enum ya_hello_error_codes {"));
            }
            other => panic!("expected EmptyInvocation, got {other:?}"),
        }
    }

    #[test]
    fn test_odd_tail_fails_with_unparity_diagnostic() {
        let err = generator()
            .generate(&Invocation::new(["hello", "HELLO"], ["HI"]))
            .unwrap_err();
        match err {
            GenError::Unparity {
                len,
                group_size,
                diagnostic,
            } => {
                assert_eq!(len, 1);
                assert_eq!(group_size, 2);
                assert!(diagnostic.contains("error code doesn't have its message pair"));
            }
            other => panic!("expected Unparity, got {other:?}"),
        }
    }

    #[test]
    fn test_ceiling_is_enforced() {
        let tail: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let err = generator()
            .generate(&Invocation::new(["hello", "HELLO"], tail))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::ArityExceeded {
                groups: 5,
                max_repeats: 4
            }
        ));
    }

    #[test]
    fn test_named_arity_is_checked() {
        let err = generator()
            .generate(&Invocation::new(["hello"], ["HI", "\"HI\""]))
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::NamedArgumentCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let generator = generator();
        let invocation = Invocation::new(["hello", "HELLO"], ["HI", "\"HI\""]);
        let first = generator.generate(&invocation).unwrap();
        let second = generator.generate(&invocation).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_many_preserves_input_order() {
        let generator = generator();
        let invocations = vec![
            Invocation::new(["a", "A"], ["X", "\"X\""]),
            Invocation::new(["b", "B"], ["Y"]),
            Invocation::new(["c", "C"], ["Z", "\"Z\""]),
        ];
        let results = generator.generate_many(&invocations);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().contains("ya_a_error_codes"));
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().contains("ya_c_error_codes"));
    }
}
