//! MSBuild expression syntax.
//!
//! Attribute values and element text are expressions: literal text mixed
//! with `$(Property)`, `@(Item)` and `%(Metadata)` references, optionally
//! split into a `;`-separated list. The tree is immutable once parsed and
//! ranges are absolute offsets into the project text.

mod escape;
mod lexer;
mod parser;

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize, range_touches};

pub use escape::{escape, from_msbuild_path, normalize_path, unescape};
pub use parser::parse_expression;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpressionNode {
    Text(ExpressionText),
    Property(ExpressionProperty),
    Item(ExpressionItem),
    Metadata(ExpressionMetadata),
    /// Property, static or item function call. Never evaluated.
    Function(ExpressionFunction),
    Concat(ConcatExpression),
    List(ListExpression),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionText {
    pub range: TextRange,
    /// Source text, still escaped.
    pub raw: SmolStr,
}

impl ExpressionText {
    pub fn unescaped_value(&self) -> String {
        unescape(&self.raw)
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionProperty {
    pub range: TextRange,
    pub name: SmolStr,
    pub name_range: TextRange,
    /// False while the closing `)` has not been typed yet.
    pub is_complete: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionItem {
    pub range: TextRange,
    pub name: SmolStr,
    pub name_range: TextRange,
    /// `->'%(Filename)'` transforms and `->Distinct()` item functions, in order.
    pub transforms: Vec<ExpressionNode>,
    pub separator: Option<SmolStr>,
    pub is_complete: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionMetadata {
    pub range: TextRange,
    /// `Compile` in `%(Compile.Link)`; absent for unqualified `%(Link)`.
    pub item_name: Option<SmolStr>,
    pub item_range: Option<TextRange>,
    pub metadata_name: SmolStr,
    pub metadata_range: TextRange,
    pub is_complete: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionTarget {
    /// `$(Foo.Replace(...))`
    Property(SmolStr),
    /// `$([System.IO.Path]::Combine(...))`
    Class(SmolStr),
    /// `@(Foo->Distinct())`
    Item(SmolStr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionFunction {
    pub range: TextRange,
    pub target: FunctionTarget,
    pub target_range: TextRange,
    pub name: SmolStr,
    pub name_range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcatExpression {
    pub range: TextRange,
    pub nodes: Vec<ExpressionNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListExpression {
    pub range: TextRange,
    pub nodes: Vec<ExpressionNode>,
}

impl ExpressionNode {
    pub fn range(&self) -> TextRange {
        match self {
            ExpressionNode::Text(n) => n.range,
            ExpressionNode::Property(n) => n.range,
            ExpressionNode::Item(n) => n.range,
            ExpressionNode::Metadata(n) => n.range,
            ExpressionNode::Function(n) => n.range,
            ExpressionNode::Concat(n) => n.range,
            ExpressionNode::List(n) => n.range,
        }
    }

    /// Direct children of composite nodes.
    pub fn children(&self) -> &[ExpressionNode] {
        match self {
            ExpressionNode::Concat(n) => &n.nodes,
            ExpressionNode::List(n) => &n.nodes,
            ExpressionNode::Item(n) => &n.transforms,
            _ => &[],
        }
    }

    pub fn as_text(&self) -> Option<&ExpressionText> {
        match self {
            ExpressionNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True for a text node with no characters.
    pub fn is_empty_text(&self) -> bool {
        self.as_text().is_some_and(ExpressionText::is_empty)
    }

    /// The innermost node whose range touches `offset`.
    ///
    /// Leaf references win over the composite nodes that contain them, so an
    /// offset inside `$(Foo)` in `bin\$(Foo)` yields the property node.
    pub fn find_at_offset(&self, offset: TextSize) -> Option<&ExpressionNode> {
        if !range_touches(self.range(), offset) {
            return None;
        }
        // adjacent siblings share a boundary; prefer the reference over text
        let mut best = None;
        for child in self.children() {
            if let Some(found) = child.find_at_offset(offset) {
                let is_text = matches!(found, ExpressionNode::Text(_));
                if best.is_none() || !is_text {
                    best = Some(found);
                }
            }
        }
        best.or(Some(self))
    }

    /// The node that ends the expression: the last list entry, or the node itself.
    pub fn last_list_entry(&self) -> &ExpressionNode {
        match self {
            ExpressionNode::List(list) => list.nodes.last().unwrap_or(self),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_at_offset_prefers_reference() {
        let expr = parse_expression(r"bin\$(Configuration)", TextSize::new(0));
        let found = expr.find_at_offset(TextSize::new(7)).unwrap();
        assert!(matches!(found, ExpressionNode::Property(p) if p.name == "Configuration"));

        // boundary between text and property resolves to the property
        let found = expr.find_at_offset(TextSize::new(4)).unwrap();
        assert!(matches!(found, ExpressionNode::Property(_)));

        let found = expr.find_at_offset(TextSize::new(1)).unwrap();
        assert!(matches!(found, ExpressionNode::Text(_)));
    }

    #[test]
    fn test_last_list_entry() {
        let expr = parse_expression("a.cs;b", TextSize::new(0));
        let last = expr.last_list_entry().as_text().unwrap();
        assert_eq!(last.raw, "b");
    }

    #[test]
    fn test_offset_outside_expression() {
        let expr = parse_expression("abc", TextSize::new(10));
        assert!(expr.find_at_offset(TextSize::new(2)).is_none());
        assert!(expr.find_at_offset(TextSize::new(13)).is_some());
    }
}
