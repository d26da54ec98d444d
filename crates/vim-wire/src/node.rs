//! Format-neutral value tree shared by the JSON and XML adapters.
//!
//! Encoders build a [`Node`] from typed values and the adapters render it;
//! parsers produce a [`Node`] that decoders walk. Parsed documents carry raw
//! scalars ([`Node::Bool`], [`Node::Number`], [`Node::Text`]) because the
//! wire alone does not say which Rust type a token belongs to.

use crate::primitive::Primitive;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Value(Primitive),
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Struct(StructNode),
    List(Vec<Node>),
    /// A value carrying an explicit discriminator (`xsi:type` or `_typeName`).
    Tagged(String, Box<Node>),
}

impl Node {
    pub fn tagged(name: impl Into<String>, value: Node) -> Self {
        Node::Tagged(name.into(), Box::new(value))
    }

    /// Short description used in type-mismatch errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Value(_) => "typed scalar",
            Node::Bool(_) => "boolean token",
            Node::Number(_) => "number token",
            Node::Text(_) => "text",
            Node::Struct(_) => "structure",
            Node::List(_) => "list",
            Node::Tagged(_, _) => "tagged value",
        }
    }

    /// The discriminator attached to this node, if any.
    pub fn discriminator(&self) -> Option<&str> {
        match self {
            Node::Tagged(name, _) => Some(name),
            Node::Struct(node) => node.type_name.as_deref(),
            _ => None,
        }
    }

    /// The node with any discriminator envelope removed.
    pub fn untagged(&self) -> &Node {
        match self {
            Node::Tagged(_, inner) => inner.untagged(),
            other => other,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self.untagged(),
            Node::Value(_) | Node::Bool(_) | Node::Number(_) | Node::Text(_)
        )
    }

    /// Text form of a scalar node, as written into XML.
    pub fn scalar_text(&self) -> Option<String> {
        match self.untagged() {
            Node::Value(value) => Some(value.lexical()),
            Node::Bool(value) => Some(value.to_string()),
            Node::Number(value) => Some(value.to_string()),
            Node::Text(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Placement of a struct field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Element,
    Attribute,
    /// XML character data of the enclosing element; a plain key in JSON.
    Text,
    /// Payload of an array wrapper: repeated elements in XML, `_value` in JSON.
    Items,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub value: Node,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, value: Node) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructNode {
    pub type_name: Option<String>,
    pub fields: Vec<Field>,
}

impl StructNode {
    pub fn new(type_name: Option<String>) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, kind: FieldKind, value: Node) {
        self.fields.push(Field::new(name, kind, value));
    }

    /// Every value written under `name`, in document order.
    pub fn occurrences(&self, name: &str) -> Vec<&Node> {
        self.fields
            .iter()
            .filter(|field| field.name == name)
            .map(|field| &field.value)
            .collect()
    }

    pub fn text(&self) -> Option<&Node> {
        self.fields
            .iter()
            .find(|field| field.kind == FieldKind::Text)
            .map(|field| &field.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_strips_nested_envelopes() {
        let node = Node::tagged("short", Node::tagged("short", Node::Text("300".into())));
        assert_eq!(node.discriminator(), Some("short"));
        assert_eq!(node.untagged(), &Node::Text("300".into()));
        assert!(node.is_scalar());
        assert_eq!(node.scalar_text().as_deref(), Some("300"));
    }

    #[test]
    fn occurrences_keep_document_order() {
        let mut node = StructNode::new(Some("VirtualMachineAffinityInfo".into()));
        node.push("affinitySet", FieldKind::Element, Node::Text("1".into()));
        node.push("other", FieldKind::Element, Node::Null);
        node.push("affinitySet", FieldKind::Element, Node::Text("2".into()));
        let values = node.occurrences("affinitySet");
        assert_eq!(values, vec![&Node::Text("1".into()), &Node::Text("2".into())]);
        assert!(node.text().is_none());
    }
}
