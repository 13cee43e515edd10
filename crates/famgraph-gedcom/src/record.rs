//! Raw record tree produced by the builder.
//!
//! A [`RawNode`] is one GEDCOM line plus its nested lines. Repeated tags are
//! kept as repeated children in source order, so a field is never sometimes a
//! scalar and sometimes a list.

use famgraph::OpaqueField;

/// Value carried on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Free text, continuation lines already joined, `@@` decoded
    Text(String),
    /// A bare `@id@` pointer to another record (delimiters removed)
    Pointer(String),
}

impl RawValue {
    /// Classify a raw line value.
    pub fn parse(raw: &str) -> Self {
        match pointer_id(raw) {
            Some(id) => RawValue::Pointer(id.to_string()),
            None => RawValue::Text(raw.replace("@@", "@")),
        }
    }

    /// The text, or the pointer in `@id@` form.
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Pointer(id) => format!("@{id}@"),
        }
    }
}

/// The id inside a value that is exactly one `@id@` pointer.
fn pointer_id(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix('@')?.strip_suffix('@')?;
    if inner.is_empty() || inner.contains('@') || inner.starts_with('#') {
        None
    } else {
        Some(inner)
    }
}

/// One line of a record and everything nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    /// Tag, upper case
    pub tag: String,
    /// Cross-reference id defined on this line
    pub xref: Option<String>,
    /// Line value
    pub value: Option<RawValue>,
    /// Nested lines in source order
    pub children: Vec<RawNode>,
    /// 1-based source line
    pub line: usize,
}

impl RawNode {
    /// Create a node without children.
    pub fn new(tag: impl Into<String>, xref: Option<String>, value: Option<RawValue>, line: usize) -> Self {
        Self {
            tag: tag.into(),
            xref,
            value,
            children: Vec::new(),
            line,
        }
    }

    /// First child with `tag`.
    pub fn first(&self, tag: &str) -> Option<&RawNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All children with `tag`, in order.
    pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a RawNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text of this node's value; pointers yield `None`.
    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            Some(RawValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Pointer id of this node's value.
    pub fn pointer(&self) -> Option<&str> {
        match &self.value {
            Some(RawValue::Pointer(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// Non-blank text value of the first child with `tag`.
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.first(tag)
            .and_then(RawNode::text_value)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Owned variant of [`RawNode::text`].
    pub fn text_owned(&self, tag: &str) -> Option<String> {
        self.text(tag).map(str::to_string)
    }

    /// Mutable text of this node, if it carries text.
    pub(crate) fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.value {
            Some(RawValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Keep the subtree as an opaque field.
    pub fn to_opaque(&self) -> OpaqueField {
        OpaqueField {
            tag: self.tag.clone(),
            xref: self.xref.clone(),
            value: self.value.as_ref().map(RawValue::to_text),
            children: self.children.iter().map(RawNode::to_opaque).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_detection() {
        assert_eq!(RawValue::parse("@N1@"), RawValue::Pointer("N1".into()));
        assert_eq!(RawValue::parse(" @N1@ "), RawValue::Pointer("N1".into()));
        assert_eq!(
            RawValue::parse("see @N1@ here"),
            RawValue::Text("see @N1@ here".into())
        );
        // Calendar escapes are not pointers
        assert_eq!(
            RawValue::parse("@#DJULIAN@"),
            RawValue::Text("@#DJULIAN@".into())
        );
    }

    #[test]
    fn test_double_at_decodes() {
        assert_eq!(
            RawValue::parse("me@@example.com"),
            RawValue::Text("me@example.com".into())
        );
    }

    #[test]
    fn test_lookups() {
        let mut node = RawNode::new("BIRT", None, None, 1);
        node.children.push(RawNode::new("DATE", None, Some(RawValue::parse("1 JAN 1900")), 2));
        node.children.push(RawNode::new("NOTE", None, Some(RawValue::parse("a")), 3));
        node.children.push(RawNode::new("NOTE", None, Some(RawValue::parse("@N1@")), 4));

        assert_eq!(node.text("DATE"), Some("1 JAN 1900"));
        assert_eq!(node.all("NOTE").count(), 2);
        assert_eq!(node.all("NOTE").nth(1).and_then(RawNode::pointer), Some("N1"));
        assert_eq!(node.text("PLAC"), None);
    }

    #[test]
    fn test_to_opaque() {
        let mut node = RawNode::new("_CUSTOM", None, Some(RawValue::parse("x")), 1);
        node.children.push(RawNode::new("_SUB", None, Some(RawValue::parse("@P1@")), 2));
        let opaque = node.to_opaque();
        assert_eq!(opaque.tag, "_CUSTOM");
        assert_eq!(opaque.children[0].value.as_deref(), Some("@P1@"));
    }
}
