//! Logos-based lexer for MSBuild expressions.

use logos::Logos;

use crate::base::{TextRange, TextSize};

/// A token with its kind, text, and absolute range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[token("$(")]
    PropertyOpen,

    #[token("@(")]
    ItemOpen,

    #[token("%(")]
    MetadataOpen,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("::")]
    ColonColon,

    #[token(".")]
    Dot,

    #[token("->")]
    Arrow,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("'")]
    Quote,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Runs of characters with no meaning to the expression grammar.
    #[regex(r"[^$@%()\[\]:.,;'>\- \t\r\nA-Za-z_]+")]
    Text,

    /// A lone `$`, `@`, `%`, `:`, `-` or `>`: plain text to the parser.
    Stray,
}

/// Tokenize `input`, whose first byte sits at `base` in the project text.
pub fn tokenize(input: &str, base: TextSize) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(
            base + TextSize::new(span.start as u32),
            base + TextSize::new(span.end as u32),
        );
        tokens.push(Token {
            kind: result.unwrap_or(TokenKind::Stray),
            text: lexer.slice(),
            range,
        });
    }
    tokens
}
