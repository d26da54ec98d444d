//! Parsing of XML into the node tree.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::constants::{XSI_NAMESPACE, XSI_PREFIX};
use crate::error::DecodeError;
use crate::node::{FieldKind, Node, StructNode};
use crate::primitive::{parse_bool, PrimitiveKind};
use crate::registry::local_name;

/// A parsed element, before namespace-aware conversion.
#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let mut element = Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            ..Element::default()
        };
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| DecodeError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| DecodeError::Xml(e.to_string()))?
                .into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }
}

/// Parses every top-level element of a document or fragment.
pub(crate) fn parse_elements(xml: &str) -> Result<Vec<Element>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut roots = Vec::new();
    loop {
        let event = reader.read_event().map_err(|e| {
            DecodeError::Xml(format!("{e} at byte {}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                attach(&mut stack, &mut roots, element);
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(DecodeError::Xml("unbalanced closing tag".to_owned()));
                };
                attach(&mut stack, &mut roots, element);
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| DecodeError::Xml(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(open) = stack.last() {
        return Err(DecodeError::Xml(format!(
            "unexpected end of document inside `{}`",
            open.name
        )));
    }
    Ok(roots)
}

fn attach(stack: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}

/// Prefix bindings in scope at an element.
#[derive(Debug, Clone, Default)]
pub(crate) struct Namespaces {
    bindings: Vec<(String, String)>,
}

impl Namespaces {
    /// The scope inside `element`, including its own declarations.
    pub fn enter(&self, element: &Element) -> Cow<'_, Namespaces> {
        let declared: Vec<(String, String)> = element
            .attributes
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix("xmlns:")
                    .map(|prefix| (prefix.to_owned(), value.clone()))
            })
            .collect();
        if declared.is_empty() {
            return Cow::Borrowed(self);
        }
        let mut scope = self.clone();
        scope.bindings.extend(declared);
        Cow::Owned(scope)
    }

    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Whether `prefix` names the schema-instance namespace. An unbound
    /// `xsi` prefix is accepted as well.
    pub(crate) fn is_schema_instance(&self, prefix: &str) -> bool {
        match self.resolve(prefix) {
            Some(uri) => uri == XSI_NAMESPACE,
            None => prefix == XSI_PREFIX,
        }
    }

    /// Value of a schema-instance attribute (`type`, `nil`) on `element`.
    pub fn schema_attribute<'e>(&self, element: &'e Element, local: &str) -> Option<&'e str> {
        element.attributes.iter().find_map(|(key, value)| {
            let (prefix, name) = key.split_once(':')?;
            (name == local && self.is_schema_instance(prefix)).then_some(value.as_str())
        })
    }
}

/// Converts an element, resolving `xsi:type` and `xsi:nil` against the
/// namespaces in scope. Namespace declarations and attributes from other
/// namespaces are dropped.
pub(crate) fn element_to_node(element: &Element, parent: &Namespaces) -> Node {
    let scope = parent.enter(element);
    if scope
        .schema_attribute(element, "nil")
        .and_then(parse_bool)
        .unwrap_or(false)
    {
        return Node::Null;
    }
    let type_name = scope
        .schema_attribute(element, "type")
        .map(|name| local_name(name).to_owned());
    let attributes: Vec<&(String, String)> = element
        .attributes
        .iter()
        .filter(|(key, _)| key != "xmlns" && !key.contains(':'))
        .collect();

    if element.children.is_empty() && attributes.is_empty() {
        let text = Node::Text(element.text.clone());
        return match type_name {
            Some(name)
                if PrimitiveKind::from_wire_name(&name).is_none()
                    && element.text.trim().is_empty() =>
            {
                Node::Struct(StructNode::new(Some(name)))
            }
            Some(name) => Node::Tagged(name, Box::new(text)),
            None => text,
        };
    }

    let mut node = StructNode::new(type_name);
    for (key, value) in attributes {
        node.push(key.as_str(), FieldKind::Attribute, Node::Text(value.clone()));
    }
    if !element.text.trim().is_empty() {
        node.push("", FieldKind::Text, Node::Text(element.text.clone()));
    }
    for child in &element.children {
        node.push(
            child.local_name(),
            FieldKind::Element,
            element_to_node(child, &scope),
        );
    }
    Node::Struct(node)
}

/// Parses a document with exactly one root element.
pub(crate) fn node_from_str(xml: &str) -> Result<Node, DecodeError> {
    let mut roots = parse_elements(xml)?;
    if roots.len() != 1 {
        return Err(DecodeError::Xml(format!(
            "expected one root element, found {}",
            roots.len()
        )));
    }
    let root = roots.remove(0);
    Ok(element_to_node(&root, &Namespaces::default()))
}
