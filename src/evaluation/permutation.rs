use indexmap::IndexMap;
use smol_str::SmolStr;

use super::{EvaluationContext, TemplatePart, split_template};
use crate::base::Name;
use crate::expression::from_msbuild_path;

/// Expands templates over the values known for each property.
///
/// A property with several values contributes one path per value; when a
/// template references several such properties the result is their cross
/// product, the first property varying slowest. A property with no known
/// value evaluates to the empty string.
#[derive(Clone, Debug, Default)]
pub struct PermutationEvaluator {
    values: IndexMap<Name, Vec<SmolStr>>,
}

impl PermutationEvaluator {
    pub fn new(values: IndexMap<Name, Vec<SmolStr>>) -> Self {
        Self { values }
    }

    /// Record the possible values of `property`, replacing earlier ones.
    pub fn set(&mut self, property: impl Into<Name>, values: Vec<SmolStr>) {
        self.values.insert(property.into(), values);
    }

    pub fn values(&self, property: &str) -> &[SmolStr] {
        self.values
            .get(&Name::new(property))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Every string `template` can expand to, without path handling.
    pub fn permutations(&self, template: &str) -> Permutations<'_> {
        Permutations::new(self, split_template(template))
    }
}

impl EvaluationContext for PermutationEvaluator {
    fn evaluate_path_with_permutation<'a>(
        &'a self,
        template: &str,
        base_dir: &str,
    ) -> Box<dyn Iterator<Item = String> + 'a> {
        let base_dir = base_dir.to_string();
        Box::new(
            self.permutations(template)
                .filter_map(move |path| from_msbuild_path(&path, &base_dir)),
        )
    }
}

const EMPTY: &[SmolStr] = &[SmolStr::new_static("")];

/// Lazy cross product over a template's property values.
#[derive(Clone, Debug)]
pub struct Permutations<'a> {
    parts: Vec<TemplatePart>,
    /// Values of each distinct property, in order of first reference.
    choices: Vec<(Name, &'a [SmolStr])>,
    counters: Vec<usize>,
    done: bool,
}

impl<'a> Permutations<'a> {
    fn new(evaluator: &'a PermutationEvaluator, parts: Vec<TemplatePart>) -> Self {
        let mut choices: Vec<(Name, &'a [SmolStr])> = Vec::new();
        for part in &parts {
            let TemplatePart::Property(name) = part else { continue };
            let name = Name::from(name.clone());
            if choices.iter().any(|(known, _)| *known == name) {
                continue;
            }
            let values = evaluator.values(name.as_str());
            let values = if values.is_empty() { EMPTY } else { values };
            choices.push((name, values));
        }
        let counters = vec![0; choices.len()];
        Self {
            parts,
            choices,
            counters,
            done: false,
        }
    }

    fn current(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Property(name) => {
                    let index = self
                        .choices
                        .iter()
                        .position(|(known, _)| known.matches(name))
                        .unwrap_or_default();
                    let (_, values) = self.choices[index];
                    out.push_str(&values[self.counters[index]]);
                }
            }
        }
        out
    }

    /// Advance the odometer; the last property turns fastest.
    fn advance(&mut self) {
        for i in (0..self.counters.len()).rev() {
            self.counters[i] += 1;
            if self.counters[i] < self.choices[i].1.len() {
                return;
            }
            self.counters[i] = 0;
        }
        self.done = true;
    }
}

impl Iterator for Permutations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let value = self.current();
        self.advance();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> PermutationEvaluator {
        let mut eval = PermutationEvaluator::default();
        eval.set("Configuration", vec!["Debug".into(), "Release".into()]);
        eval.set("Platform", vec!["AnyCPU".into(), "x64".into()]);
        eval
    }

    #[test]
    fn test_cross_product_first_property_slowest() {
        let eval = evaluator();
        let all: Vec<String> = eval.permutations("$(Configuration)|$(Platform)").collect();
        assert_eq!(
            all,
            vec!["Debug|AnyCPU", "Debug|x64", "Release|AnyCPU", "Release|x64"]
        );
    }

    #[test]
    fn test_repeated_property_uses_same_value() {
        let eval = evaluator();
        let all: Vec<String> = eval.permutations("$(Configuration)-$(configuration)").collect();
        assert_eq!(all, vec!["Debug-Debug", "Release-Release"]);
    }

    #[test]
    fn test_unknown_property_is_empty() {
        let eval = evaluator();
        let all: Vec<String> = eval.permutations("a$(Nope)b").collect();
        assert_eq!(all, vec!["ab"]);
    }

    #[test]
    fn test_literal_template_yields_once() {
        let eval = evaluator();
        assert_eq!(eval.permutations("plain").count(), 1);
    }

    #[test]
    fn test_restartable() {
        let eval = evaluator();
        let first = eval.permutations(r"bin\$(Configuration)");
        let second = first.clone();
        assert_eq!(first.count(), 2);
        assert_eq!(second.count(), 2);
    }
}
