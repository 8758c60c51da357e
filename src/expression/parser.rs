//! Recursive-descent parser for MSBuild expressions.
//!
//! Tolerates incomplete input: a reference that is still being typed
//! (`$(Conf`) becomes a reference node flagged incomplete rather than text,
//! so completion can tell what the cursor is in.

use smol_str::SmolStr;

use super::lexer::{Token, TokenKind, tokenize};
use super::{
    ConcatExpression, ExpressionFunction, ExpressionItem, ExpressionMetadata, ExpressionNode,
    ExpressionProperty, ExpressionText, FunctionTarget, ListExpression,
};
use crate::base::{TextRange, TextSize};

/// Parse `text`, whose first byte is at `base` in the project text.
pub fn parse_expression(text: &str, base: TextSize) -> ExpressionNode {
    let tokens = tokenize(text, base);
    let mut parser = Parser {
        tokens,
        pos: 0,
        src: text,
        base,
    };
    parser.parse_list()
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    src: &'a str,
    base: TextSize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.eat(TokenKind::Whitespace) {}
    }

    /// Offset just past the last consumed token, or where the next one starts.
    fn offset(&self) -> TextSize {
        if self.pos == 0 {
            return self
                .tokens
                .first()
                .map_or(self.base, |t| t.range.start());
        }
        self.tokens[self.pos - 1].range.end()
    }

    fn slice(&self, range: TextRange) -> &str {
        let start = usize::from(range.start() - self.base);
        let end = usize::from(range.end() - self.base);
        &self.src[start..end]
    }

    fn parse_list(&mut self) -> ExpressionNode {
        let start = self.offset();
        let mut nodes = vec![self.parse_concat(None, true)];
        while self.eat(TokenKind::Semicolon) {
            nodes.push(self.parse_concat(None, true));
        }
        if nodes.len() == 1 {
            return nodes.pop().unwrap_or_else(|| empty_text(start));
        }
        let range = TextRange::new(start, self.offset());
        ExpressionNode::List(ListExpression { range, nodes })
    }

    /// Parse literal text and references up to `stop`, a `;` (when
    /// `split_lists`), or the end of input.
    fn parse_concat(&mut self, stop: Option<TokenKind>, split_lists: bool) -> ExpressionNode {
        let start = self.offset();
        let mut parts = Vec::new();
        let mut text_start: Option<TextSize> = None;

        while let Some(kind) = self.peek() {
            if Some(kind) == stop || (split_lists && kind == TokenKind::Semicolon) {
                break;
            }
            let node = match kind {
                TokenKind::PropertyOpen => self.parse_property(),
                TokenKind::ItemOpen => self.parse_item(),
                TokenKind::MetadataOpen => self.parse_metadata(),
                _ => {
                    let token_start = self.tokens[self.pos].range.start();
                    text_start.get_or_insert(token_start);
                    self.pos += 1;
                    continue;
                }
            };
            if let Some(text_start) = text_start.take() {
                let range = TextRange::new(text_start, node.range().start());
                parts.push(self.text_node(range));
            }
            parts.push(node);
        }
        if let Some(text_start) = text_start {
            let range = TextRange::new(text_start, self.offset());
            parts.push(self.text_node(range));
        }

        match parts.len() {
            0 => empty_text(start),
            1 => parts.pop().unwrap_or_else(|| empty_text(start)),
            _ => {
                let range = TextRange::new(parts[0].range().start(), self.offset());
                ExpressionNode::Concat(ConcatExpression {
                    range,
                    nodes: parts,
                })
            }
        }
    }

    fn text_node(&self, range: TextRange) -> ExpressionNode {
        ExpressionNode::Text(ExpressionText {
            range,
            raw: SmolStr::new(self.slice(range)),
        })
    }

    fn ident(&mut self) -> Option<(SmolStr, TextRange)> {
        if !self.at(TokenKind::Ident) {
            return None;
        }
        let token = self.bump()?;
        Some((SmolStr::new(token.text), token.range))
    }

    /// Skip to just past the `)` closing an already-open paren.
    /// Quoted strings are skipped whole. Returns false at end of input.
    fn skip_balanced(&mut self) -> bool {
        let mut depth = 1usize;
        while let Some(kind) = self.peek() {
            self.pos += 1;
            match kind {
                TokenKind::PropertyOpen
                | TokenKind::ItemOpen
                | TokenKind::MetadataOpen
                | TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                TokenKind::Quote => {
                    while let Some(inner) = self.peek() {
                        self.pos += 1;
                        if inner == TokenKind::Quote {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn parse_property(&mut self) -> ExpressionNode {
        let start = self.tokens[self.pos].range.start();
        self.pos += 1;
        self.skip_whitespace();

        if self.eat(TokenKind::LBracket) {
            return self.parse_static_function(start);
        }

        let Some((name, name_range)) = self.ident() else {
            let name_range = TextRange::empty(self.offset());
            let is_complete = self.eat(TokenKind::RParen) || (self.peek().is_some() && self.skip_balanced());
            return ExpressionNode::Property(ExpressionProperty {
                range: TextRange::new(start, self.offset()),
                name: SmolStr::default(),
                name_range,
                is_complete,
            });
        };

        self.skip_whitespace();
        if self.eat(TokenKind::Dot) {
            let (func, func_range) = self
                .ident()
                .unwrap_or_else(|| (SmolStr::default(), TextRange::empty(self.offset())));
            let _ = self.skip_balanced();
            return ExpressionNode::Function(ExpressionFunction {
                range: TextRange::new(start, self.offset()),
                target: FunctionTarget::Property(name),
                target_range: name_range,
                name: func,
                name_range: func_range,
            });
        }

        let is_complete = self.eat(TokenKind::RParen) || (self.peek().is_some() && self.skip_balanced());
        ExpressionNode::Property(ExpressionProperty {
            range: TextRange::new(start, self.offset()),
            name,
            name_range,
            is_complete,
        })
    }

    fn parse_static_function(&mut self, start: TextSize) -> ExpressionNode {
        let class_start = self.offset();
        while let Some(kind) = self.peek() {
            if !matches!(kind, TokenKind::Ident | TokenKind::Dot) {
                break;
            }
            self.pos += 1;
        }
        let target_range = TextRange::new(class_start, self.offset());
        let class = SmolStr::new(self.slice(target_range));
        self.eat(TokenKind::RBracket);

        let (name, name_range) = if self.eat(TokenKind::ColonColon) {
            self.ident()
                .unwrap_or_else(|| (SmolStr::default(), TextRange::empty(self.offset())))
        } else {
            (SmolStr::default(), TextRange::empty(self.offset()))
        };
        let _ = self.skip_balanced();
        ExpressionNode::Function(ExpressionFunction {
            range: TextRange::new(start, self.offset()),
            target: FunctionTarget::Class(class),
            target_range,
            name,
            name_range,
        })
    }

    fn parse_item(&mut self) -> ExpressionNode {
        let start = self.tokens[self.pos].range.start();
        self.pos += 1;
        self.skip_whitespace();
        let (name, name_range) = self
            .ident()
            .unwrap_or_else(|| (SmolStr::default(), TextRange::empty(self.offset())));

        let mut transforms = Vec::new();
        let mut separator = None;
        loop {
            self.skip_whitespace();
            if self.eat(TokenKind::Arrow) {
                self.skip_whitespace();
                if self.eat(TokenKind::Quote) {
                    transforms.push(self.parse_concat(Some(TokenKind::Quote), false));
                    self.eat(TokenKind::Quote);
                } else if let Some((func, func_range)) = self.ident() {
                    let func_start = func_range.start();
                    if self.eat(TokenKind::LParen) {
                        let _ = self.skip_balanced();
                    }
                    transforms.push(ExpressionNode::Function(ExpressionFunction {
                        range: TextRange::new(func_start, self.offset()),
                        target: FunctionTarget::Item(name.clone()),
                        target_range: name_range,
                        name: func,
                        name_range: func_range,
                    }));
                }
                continue;
            }
            if self.eat(TokenKind::Comma) {
                self.skip_whitespace();
                if self.eat(TokenKind::Quote) {
                    let sep_start = self.offset();
                    while self.peek().is_some_and(|k| k != TokenKind::Quote) {
                        self.pos += 1;
                    }
                    let sep_range = TextRange::new(sep_start, self.offset());
                    separator = Some(SmolStr::new(self.slice(sep_range)));
                    self.eat(TokenKind::Quote);
                }
                continue;
            }
            break;
        }

        let is_complete = self.eat(TokenKind::RParen) || (self.peek().is_some() && self.skip_balanced());
        ExpressionNode::Item(ExpressionItem {
            range: TextRange::new(start, self.offset()),
            name,
            name_range,
            transforms,
            separator,
            is_complete,
        })
    }

    fn parse_metadata(&mut self) -> ExpressionNode {
        let start = self.tokens[self.pos].range.start();
        self.pos += 1;
        self.skip_whitespace();
        let first = self
            .ident()
            .unwrap_or_else(|| (SmolStr::default(), TextRange::empty(self.offset())));

        let (item, (metadata_name, metadata_range)) = if self.eat(TokenKind::Dot) {
            let second = self
                .ident()
                .unwrap_or_else(|| (SmolStr::default(), TextRange::empty(self.offset())));
            (Some(first), second)
        } else {
            (None, first)
        };

        self.skip_whitespace();
        let is_complete = self.eat(TokenKind::RParen) || (self.peek().is_some() && self.skip_balanced());
        let (item_name, item_range) = match item {
            Some((name, range)) => (Some(name), Some(range)),
            None => (None, None),
        };
        ExpressionNode::Metadata(ExpressionMetadata {
            range: TextRange::new(start, self.offset()),
            item_name,
            item_range,
            metadata_name,
            metadata_range,
            is_complete,
        })
    }
}

fn empty_text(at: TextSize) -> ExpressionNode {
    ExpressionNode::Text(ExpressionText {
        range: TextRange::empty(at),
        raw: SmolStr::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ExpressionNode {
        parse_expression(text, TextSize::new(0))
    }

    #[test]
    fn test_plain_text() {
        let expr = parse(r"src\Foo.cs");
        let text = expr.as_text().unwrap();
        assert_eq!(text.raw, r"src\Foo.cs");
    }

    #[test]
    fn test_empty_is_empty_text() {
        assert!(parse("").is_empty_text());
    }

    #[test]
    fn test_concat_of_text_and_properties() {
        let expr = parse(r"bin\$(Configuration)\$(Platform)");
        let ExpressionNode::Concat(concat) = expr else {
            panic!("expected concat, got {expr:?}");
        };
        assert_eq!(concat.nodes.len(), 4);
        assert!(matches!(&concat.nodes[1], ExpressionNode::Property(p) if p.name == "Configuration" && p.is_complete));
        assert!(matches!(&concat.nodes[2], ExpressionNode::Text(t) if t.raw == r"\"));
    }

    #[test]
    fn test_list_keeps_trailing_empty_entry() {
        let expr = parse("a;b;");
        let ExpressionNode::List(list) = expr else {
            panic!("expected list");
        };
        assert_eq!(list.nodes.len(), 3);
        assert!(list.nodes[2].is_empty_text());
    }

    #[test]
    fn test_incomplete_property() {
        let expr = parse("$(Conf");
        let ExpressionNode::Property(p) = expr else {
            panic!("expected property");
        };
        assert_eq!(p.name, "Conf");
        assert!(!p.is_complete);
        assert_eq!(p.range.end(), TextSize::new(6));
    }

    #[test]
    fn test_property_function() {
        let expr = parse("$(Foo.Replace('a', 'b'))");
        let ExpressionNode::Function(f) = expr else {
            panic!("expected function");
        };
        assert_eq!(f.target, FunctionTarget::Property("Foo".into()));
        assert_eq!(f.name, "Replace");
        assert_eq!(f.range.end(), TextSize::new(24));
    }

    #[test]
    fn test_static_function() {
        let expr = parse("$([System.IO.Path]::Combine($(A), 'b'))");
        let ExpressionNode::Function(f) = expr else {
            panic!("expected function");
        };
        assert_eq!(f.target, FunctionTarget::Class("System.IO.Path".into()));
        assert_eq!(f.name, "Combine");
    }

    #[test]
    fn test_item_with_transform_and_separator() {
        let expr = parse("@(Compile->'%(Filename)', ' ')");
        let ExpressionNode::Item(item) = expr else {
            panic!("expected item");
        };
        assert_eq!(item.name, "Compile");
        assert_eq!(item.separator.as_deref(), Some(" "));
        assert!(matches!(&item.transforms[0], ExpressionNode::Metadata(m) if m.metadata_name == "Filename"));
        assert!(item.is_complete);
    }

    #[test]
    fn test_item_function() {
        let expr = parse("@(Compile->Distinct())");
        let ExpressionNode::Item(item) = expr else {
            panic!("expected item");
        };
        assert!(matches!(&item.transforms[0], ExpressionNode::Function(f) if f.name == "Distinct"));
    }

    #[test]
    fn test_qualified_metadata() {
        let expr = parse("%(Compile.Link)");
        let ExpressionNode::Metadata(m) = expr else {
            panic!("expected metadata");
        };
        assert_eq!(m.item_name.as_deref(), Some("Compile"));
        assert_eq!(m.metadata_name, "Link");
    }

    #[test]
    fn test_ranges_are_absolute() {
        let expr = parse_expression("x$(A)", TextSize::new(100));
        assert_eq!(expr.range(), TextRange::new(TextSize::new(100), TextSize::new(105)));
    }
}
