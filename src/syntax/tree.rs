//! Element/attribute tree for MSBuild project files.
//!
//! Nodes live in a flat arena in document order, so a node's index is also
//! its position in a pre-order walk. Spans are byte offsets into the source
//! text; the tree does not own the text.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize, range_touches};

/// Index of a node in an [`XDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct XNodeId(u32);

impl XNodeId {
    fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XNode {
    pub parent: Option<XNodeId>,
    /// Full extent: `<Foo ...>...</Foo>` for elements, the raw run for text.
    pub span: TextRange,
    pub data: XNodeData,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XNodeData {
    Element(XElement),
    Text(XText),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XElement {
    pub name: SmolStr,
    /// Empty when the user has typed `<` and nothing else.
    pub name_span: TextRange,
    pub attributes: Vec<XAttribute>,
    pub children: Vec<XNodeId>,
    /// `<Foo a="b">`, or as far as it got when the tag is unterminated.
    pub start_tag: TextRange,
    pub start_tag_closed: bool,
    pub is_self_closing: bool,
    pub closing_tag: Option<TextRange>,
}

impl XElement {
    /// True if the element ends with `/>` or a matching closing tag.
    pub fn is_closed(&self) -> bool {
        self.is_self_closing || self.closing_tag.is_some()
    }

    /// Case-insensitive attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&XAttribute> {
        self.attributes
            .iter()
            .find(|att| att.name.eq_ignore_ascii_case(name))
    }

    pub fn name_is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Range between the start tag and the closing tag, if the start tag is complete.
    pub fn content_range(&self, span: TextRange) -> Option<TextRange> {
        if !self.start_tag_closed || self.is_self_closing {
            return None;
        }
        let end = self.closing_tag.map_or(span.end(), |tag| tag.start());
        Some(TextRange::new(self.start_tag.end(), end.max(self.start_tag.end())))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XAttribute {
    pub name: SmolStr,
    pub name_span: TextRange,
    /// Raw value text between the quotes.
    pub value: Option<SmolStr>,
    pub value_span: Option<TextRange>,
    pub span: TextRange,
    /// False when the closing quote is missing.
    pub value_closed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XText {
    pub text: SmolStr,
}

impl XText {
    /// The text with the predefined XML entities decoded.
    pub fn decoded(&self) -> String {
        decode_entities(&self.text)
    }
}

/// Decode the five predefined XML entities and numeric character references.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else { break };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// A parsed project document: an arena of element and text nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XDocument {
    nodes: Vec<XNode>,
    roots: Vec<XNodeId>,
    len: TextSize,
}

impl XDocument {
    pub fn builder() -> XDocumentBuilder {
        XDocumentBuilder::default()
    }

    pub fn node(&self, id: XNodeId) -> &XNode {
        &self.nodes[id.index()]
    }

    pub fn element(&self, id: XNodeId) -> Option<&XElement> {
        match &self.nodes.get(id.index())?.data {
            XNodeData::Element(el) => Some(el),
            XNodeData::Text(_) => None,
        }
    }

    pub fn text(&self, id: XNodeId) -> Option<&XText> {
        match &self.nodes.get(id.index())?.data {
            XNodeData::Text(text) => Some(text),
            XNodeData::Element(_) => None,
        }
    }

    pub fn span(&self, id: XNodeId) -> TextRange {
        self.nodes[id.index()].span
    }

    pub fn parent(&self, id: XNodeId) -> Option<XNodeId> {
        self.nodes.get(id.index())?.parent
    }

    /// The parent node if it is an element.
    pub fn parent_element(&self, id: XNodeId) -> Option<XNodeId> {
        let parent = self.parent(id)?;
        self.element(parent).map(|_| parent)
    }

    pub fn element_name(&self, id: XNodeId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    /// The first top-level element.
    pub fn root_element(&self) -> Option<XNodeId> {
        self.roots
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    pub fn roots(&self) -> &[XNodeId] {
        &self.roots
    }

    pub fn children(&self, id: XNodeId) -> &[XNodeId] {
        self.element(id).map_or(&[][..], |el| el.children.as_slice())
    }

    pub fn child_elements(&self, id: XNodeId) -> impl Iterator<Item = XNodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    /// Next sibling element under the same parent.
    pub fn next_sibling_element(&self, id: XNodeId) -> Option<XNodeId> {
        let siblings = match self.parent(id) {
            Some(parent) => self.children(parent),
            None => self.roots.as_slice(),
        };
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|&s| self.element(s).is_some())
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: XNodeId) -> impl Iterator<Item = XNodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Every node in document order.
    pub fn all_descendant_nodes(&self) -> impl Iterator<Item = XNodeId> + '_ {
        (0..self.nodes.len()).map(XNodeId::new)
    }

    /// Element descendants of `id` in document order, excluding `id`.
    pub fn descendant_elements(&self, id: XNodeId) -> Vec<XNodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<XNodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.element(next).is_some() {
                out.push(next);
                stack.extend(self.children(next).iter().rev().copied());
            }
        }
        out
    }

    /// The innermost element whose extent covers `offset`.
    ///
    /// An offset on the opening `<` belongs to the parent. An offset right
    /// after the final `>` of a closed element also belongs to the parent,
    /// but an unterminated element keeps its end so completion can continue
    /// typing into it.
    pub fn innermost_element_at(&self, offset: TextSize) -> Option<XNodeId> {
        let mut found = None;
        for id in self.all_descendant_nodes() {
            let Some(el) = self.element(id) else { continue };
            let span = self.span(id);
            let covers = span.start() < offset
                && (offset < span.end() || (offset == span.end() && !el.is_closed()));
            if covers {
                found = Some(id);
            } else if span.start() >= offset {
                break;
            }
        }
        found
    }

    /// Attribute index whose name or value touches `offset`.
    pub fn attribute_at(&self, id: XNodeId, offset: TextSize) -> Option<usize> {
        let el = self.element(id)?;
        el.attributes.iter().position(|att| {
            range_touches(att.name_span, offset)
                || att.value_span.is_some_and(|v| range_touches(v, offset))
        })
    }

    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Incremental construction of an [`XDocument`] in document order.
///
/// This is the contract a tokenizer drives: open an element, attach its
/// attributes, finish its start tag, add text, close it.
#[derive(Debug, Default)]
pub struct XDocumentBuilder {
    nodes: Vec<XNode>,
    roots: Vec<XNodeId>,
    stack: Vec<XNodeId>,
}

impl XDocumentBuilder {
    fn push(&mut self, node: XNode) -> XNodeId {
        let id = XNodeId::new(self.nodes.len());
        match node.parent {
            Some(parent) => {
                if let XNodeData::Element(el) = &mut self.nodes[parent.index()].data {
                    el.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }

    fn element_mut(&mut self, id: XNodeId) -> Option<&mut XElement> {
        match &mut self.nodes[id.index()].data {
            XNodeData::Element(el) => Some(el),
            XNodeData::Text(_) => None,
        }
    }

    /// Open an element whose `<` is at `tag_start`.
    pub fn start_element(
        &mut self,
        name: impl Into<SmolStr>,
        name_span: TextRange,
        tag_start: TextSize,
    ) -> XNodeId {
        let start_tag = TextRange::new(tag_start, name_span.end());
        let id = self.push(XNode {
            parent: self.stack.last().copied(),
            span: start_tag,
            data: XNodeData::Element(XElement {
                name: name.into(),
                name_span,
                attributes: Vec::new(),
                children: Vec::new(),
                start_tag,
                start_tag_closed: false,
                is_self_closing: false,
                closing_tag: None,
            }),
        });
        self.stack.push(id);
        id
    }

    /// Attach an attribute to the element currently being opened.
    pub fn add_attribute(&mut self, attribute: XAttribute) {
        let Some(&id) = self.stack.last() else { return };
        let end = attribute.span.end();
        if let Some(el) = self.element_mut(id) {
            el.start_tag = el.start_tag.cover_offset(end);
            el.attributes.push(attribute);
        }
        let node = &mut self.nodes[id.index()];
        node.span = node.span.cover_offset(end);
    }

    /// Finish the start tag at `end`; a self-closing tag also closes the element.
    pub fn end_start_tag(&mut self, end: TextSize, self_closing: bool) {
        let Some(&id) = self.stack.last() else { return };
        if let Some(el) = self.element_mut(id) {
            el.start_tag = el.start_tag.cover_offset(end);
            el.start_tag_closed = true;
            el.is_self_closing = self_closing;
        }
        let node = &mut self.nodes[id.index()];
        node.span = node.span.cover_offset(end);
        if self_closing {
            self.stack.pop();
        }
    }

    /// Extend the open start tag without closing it (unterminated tag).
    pub fn extend_start_tag(&mut self, end: TextSize) {
        let Some(&id) = self.stack.last() else { return };
        if let Some(el) = self.element_mut(id) {
            el.start_tag = el.start_tag.cover_offset(end);
        }
        let node = &mut self.nodes[id.index()];
        node.span = node.span.cover_offset(end);
    }

    pub fn add_text(&mut self, text: impl Into<SmolStr>, span: TextRange) {
        self.push(XNode {
            parent: self.stack.last().copied(),
            span,
            data: XNodeData::Text(XText { text: text.into() }),
        });
    }

    /// Close the innermost open element named `name` with a closing tag.
    ///
    /// Open elements nested inside it are left unclosed and end where the
    /// closing tag starts. A closing tag with no matching open element is
    /// ignored.
    pub fn end_element(&mut self, name: &str, closing_tag: TextRange) {
        let Some(depth) = self.stack.iter().rposition(|&id| {
            matches!(&self.nodes[id.index()].data, XNodeData::Element(el) if el.name == name)
        }) else {
            return;
        };
        while self.stack.len() > depth + 1 {
            if let Some(id) = self.stack.pop() {
                let node = &mut self.nodes[id.index()];
                node.span = node.span.cover_offset(closing_tag.start());
            }
        }
        if let Some(id) = self.stack.pop() {
            if let Some(el) = self.element_mut(id) {
                el.closing_tag = Some(closing_tag);
            }
            let node = &mut self.nodes[id.index()];
            node.span = node.span.cover(closing_tag);
        }
    }

    /// Leave every still-open element unclosed, extending it to `end`.
    pub fn finish(mut self, end: TextSize) -> XDocument {
        while let Some(id) = self.stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.span = node.span.cover_offset(end);
        }
        XDocument {
            nodes: self.nodes,
            roots: self.roots,
            len: end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_builder_nesting_and_spans() {
        // <A><B/></A>
        let mut b = XDocument::builder();
        let a = b.start_element("A", range(1, 2), TextSize::new(0));
        b.end_start_tag(TextSize::new(3), false);
        let inner = b.start_element("B", range(4, 5), TextSize::new(3));
        b.end_start_tag(TextSize::new(7), true);
        b.end_element("A", range(7, 11));
        let doc = b.finish(TextSize::new(11));

        assert_eq!(doc.root_element(), Some(a));
        assert_eq!(doc.parent_element(inner), Some(a));
        assert_eq!(doc.span(a), range(0, 11));
        assert_eq!(doc.span(inner), range(3, 7));
        assert!(doc.element(inner).unwrap().is_self_closing);
        assert_eq!(doc.all_descendant_nodes().count(), 2);
    }

    #[test]
    fn test_mismatched_close_leaves_inner_open() {
        let mut b = XDocument::builder();
        b.start_element("A", range(1, 2), TextSize::new(0));
        b.end_start_tag(TextSize::new(3), false);
        let inner = b.start_element("B", range(4, 5), TextSize::new(3));
        b.end_start_tag(TextSize::new(6), false);
        b.end_element("A", range(6, 10));
        let doc = b.finish(TextSize::new(10));

        let el = doc.element(inner).unwrap();
        assert!(!el.is_closed());
        assert_eq!(doc.span(inner).end(), TextSize::new(6));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;x&gt;"), "<x>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
    }
}
