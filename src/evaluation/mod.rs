//! Just enough evaluation to turn templated paths into concrete candidates.
//!
//! Projects are never built. A path template such as
//! `bin\$(Configuration)\$(Platform)` is expanded over every value each
//! referenced property can take, producing one path per combination.

mod permutation;

use smol_str::SmolStr;

pub use permutation::{PermutationEvaluator, Permutations};

/// Expands property references in a path template.
pub trait EvaluationContext: Send + Sync {
    /// Every concrete path `template` can denote, resolved against `base_dir`.
    ///
    /// The template may contain `$(Name)` references; all other text is
    /// literal. Paths that cannot be made concrete are skipped.
    fn evaluate_path_with_permutation<'a>(
        &'a self,
        template: &str,
        base_dir: &str,
    ) -> Box<dyn Iterator<Item = String> + 'a>;
}

/// One piece of a path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TemplatePart {
    Literal(String),
    Property(SmolStr),
}

/// Split a template into literal runs and `$(Name)` references.
///
/// An unterminated `$(` is kept as literal text.
pub(crate) fn split_template(template: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = template;
    while let Some(start) = rest.find("$(") {
        let after = &rest[start + 2..];
        let Some(end) = after.find(')') else { break };
        literal.push_str(&rest[..start]);
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
        }
        parts.push(TemplatePart::Property(SmolStr::new(after[..end].trim())));
        rest = &after[end + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_template() {
        let parts = split_template(r"bin\$(Configuration)\$(Platform)");
        assert_eq!(
            parts,
            vec![
                TemplatePart::Literal(r"bin\".into()),
                TemplatePart::Property("Configuration".into()),
                TemplatePart::Literal(r"\".into()),
                TemplatePart::Property("Platform".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_reference_is_literal() {
        assert_eq!(
            split_template("a$(B"),
            vec![TemplatePart::Literal("a$(B".into())]
        );
    }
}
