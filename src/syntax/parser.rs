//! Lenient builder from project text to [`XDocument`].
//!
//! Completion runs against documents that are being typed, so this accepts
//! unterminated tags, unterminated attribute values and missing closing
//! tags. It does not validate; anything it cannot make sense of is skipped.

use smol_str::SmolStr;

use super::tree::{XAttribute, XDocument, XDocumentBuilder};
use crate::base::{TextRange, TextSize};

pub fn parse_document(text: &str) -> XDocument {
    let mut scanner = Scanner {
        text,
        pos: 0,
        builder: XDocument::builder(),
    };
    scanner.run();
    scanner.builder.finish(TextSize::of(text))
}

fn is_name_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || matches!(c, '-' | '.' | ':')
}

fn size(offset: usize) -> TextSize {
    TextSize::new(offset as u32)
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(size(start), size(end))
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    builder: XDocumentBuilder,
}

impl Scanner<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    /// Advance past `terminator`, or to the end of the text.
    fn skip_past(&mut self, terminator: &str) -> usize {
        match self.rest().find(terminator) {
            Some(i) => {
                let inner_end = self.pos + i;
                self.pos = inner_end + terminator.len();
                inner_end
            }
            None => {
                self.pos = self.text.len();
                self.pos
            }
        }
    }

    fn read_name(&mut self) -> (SmolStr, TextRange) {
        let start = self.pos;
        let mut chars = self.rest().char_indices();
        let mut end = 0;
        if let Some((_, c)) = chars.next() {
            if is_name_start(c) {
                end = c.len_utf8();
                for (i, c) in chars {
                    if !is_name_char(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                }
            }
        }
        self.pos += end;
        (SmolStr::new(&self.text[start..self.pos]), range(start, self.pos))
    }

    fn run(&mut self) {
        let mut text_start = 0;
        while let Some(lt) = self.rest().find('<') {
            let tag_start = self.pos + lt;
            self.flush_text(text_start, tag_start);
            self.pos = tag_start;

            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_past("-->");
            } else if rest.starts_with("<![CDATA[") {
                self.pos += "<![CDATA[".len();
                let content_start = self.pos;
                let content_end = self.skip_past("]]>");
                let content = &self.text[content_start..content_end];
                self.builder
                    .add_text(content, range(content_start, content_end));
            } else if rest.starts_with("<?") || rest.starts_with("<!") {
                self.skip_past(">");
            } else if rest.starts_with("</") {
                self.closing_tag(tag_start);
            } else {
                self.start_tag(tag_start);
            }
            text_start = self.pos;
        }
        self.flush_text(text_start, self.text.len());
    }

    fn flush_text(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let raw = &self.text[start..end];
        if raw.trim().is_empty() {
            return;
        }
        self.builder.add_text(raw, range(start, end));
    }

    fn closing_tag(&mut self, tag_start: usize) {
        self.pos = tag_start + 2;
        let (name, _) = self.read_name();
        self.skip_whitespace();
        if self.peek() == Some('>') {
            self.pos += 1;
        }
        self.builder.end_element(&name, range(tag_start, self.pos));
    }

    fn start_tag(&mut self, tag_start: usize) {
        self.pos = tag_start + 1;
        let (name, name_span) = self.read_name();
        self.builder
            .start_element(name, name_span, size(tag_start));

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() || rest.starts_with('<') {
                // unterminated start tag; the element stays open
                self.builder.extend_start_tag(size(self.pos));
                return;
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                self.builder.end_start_tag(size(self.pos), true);
                return;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                self.builder.end_start_tag(size(self.pos), false);
                return;
            }
            match self.peek() {
                Some(c) if is_name_start(c) => {
                    let attribute = self.attribute();
                    self.builder.add_attribute(attribute);
                }
                Some(c) => self.pos += c.len_utf8(),
                None => return,
            }
        }
    }

    fn attribute(&mut self) -> XAttribute {
        let start = self.pos;
        let (name, name_span) = self.read_name();
        let mut attribute = XAttribute {
            name,
            name_span,
            value: None,
            value_span: None,
            span: name_span,
            value_closed: false,
        };

        let before_eq = self.pos;
        self.skip_whitespace();
        if self.peek() != Some('=') {
            self.pos = before_eq;
            return attribute;
        }
        self.pos += 1;
        self.skip_whitespace();

        let Some(quote @ ('"' | '\'')) = self.peek() else {
            attribute.span = range(start, self.pos);
            return attribute;
        };
        self.pos += 1;
        let value_start = self.pos;
        let rest = self.rest();
        let stop = rest.find(|c| c == quote || c == '<').unwrap_or(rest.len());
        let value_end = value_start + stop;
        let closed = rest[stop..].starts_with(quote);
        self.pos = if closed { value_end + 1 } else { value_end };

        attribute.value = Some(SmolStr::new(&self.text[value_start..value_end]));
        attribute.value_span = Some(range(value_start, value_end));
        attribute.value_closed = closed;
        attribute.span = range(start, self.pos);
        attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let text = r#"<Project Sdk="Microsoft.NET.Sdk"><PropertyGroup><Foo>bar</Foo></PropertyGroup></Project>"#;
        let doc = parse_document(text);
        let root = doc.root_element().unwrap();
        let project = doc.element(root).unwrap();
        assert_eq!(project.name, "Project");
        assert_eq!(project.attribute("sdk").unwrap().value.as_deref(), Some("Microsoft.NET.Sdk"));
        assert!(project.is_closed());

        let group = doc.child_elements(root).next().unwrap();
        let foo = doc.child_elements(group).next().unwrap();
        assert_eq!(doc.element_name(foo), Some("Foo"));
        let text_node = doc.children(foo)[0];
        assert_eq!(doc.text(text_node).unwrap().text, "bar");
        assert_eq!(doc.span(root), TextRange::up_to(TextSize::of(text)));
    }

    #[test]
    fn test_attribute_spans() {
        let text = r#"<Compile Include="a.cs" />"#;
        let doc = parse_document(text);
        let el = doc.element(doc.root_element().unwrap()).unwrap();
        let att = &el.attributes[0];
        assert_eq!(&text[att.name_span], "Include");
        assert_eq!(&text[att.value_span.unwrap()], "a.cs");
        assert!(att.value_closed);
        assert!(el.is_self_closing);
    }

    #[test]
    fn test_unterminated_attribute_value() {
        let text = "<Project>\n  <Compile Include=\"src\\";
        let doc = parse_document(text);
        let compile = doc.descendant_elements(doc.root_element().unwrap())[0];
        let el = doc.element(compile).unwrap();
        let att = el.attribute("Include").unwrap();
        assert!(!att.value_closed);
        assert_eq!(att.value.as_deref(), Some("src\\"));
        assert!(!el.is_closed());
        assert_eq!(doc.span(compile).end(), TextSize::of(text));
    }

    #[test]
    fn test_bare_open_bracket_makes_nameless_element() {
        let text = "<Project><";
        let doc = parse_document(text);
        let root = doc.root_element().unwrap();
        let child = doc.child_elements(root).next().unwrap();
        let el = doc.element(child).unwrap();
        assert!(el.name.is_empty());
        assert!(el.name_span.is_empty());
    }

    #[test]
    fn test_comments_and_declaration_skipped() {
        let text = "<?xml version=\"1.0\"?>\n<!-- c <Fake/> -->\n<Project/>";
        let doc = parse_document(text);
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.element_name(doc.root_element().unwrap()), Some("Project"));
    }

    #[test]
    fn test_stray_closing_tag_ignored() {
        let doc = parse_document("<Project></Target></Project>");
        let root = doc.element(doc.root_element().unwrap()).unwrap();
        assert!(root.is_closed());
        assert!(root.children.is_empty());
    }
}
