//! Rendering of the node tree as XML.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::constants::{XSD_NAMESPACE, XSD_PREFIX, XSI_NAMESPACE};
use crate::error::EncodeError;
use crate::node::{FieldKind, Node, StructNode};
use crate::primitive::PrimitiveKind;

use super::XmlOptions;

pub(crate) type Attributes<'a> = [(&'a str, &'a str)];

pub(crate) fn new_writer(options: &XmlOptions) -> Result<Writer<Cursor<Vec<u8>>>, EncodeError> {
    let cursor = Cursor::new(Vec::new());
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(cursor, b' ', width),
        None => Writer::new(cursor),
    };
    if options.declaration {
        write_event(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
    }
    Ok(writer)
}

/// Writes `node` as the document element `root`, declaring the schema
/// namespaces when any descendant needs them.
pub(crate) fn write_document(
    root: &str,
    node: &Node,
    options: &XmlOptions,
) -> Result<Vec<u8>, EncodeError> {
    let mut writer = new_writer(options)?;
    let namespaces: &Attributes<'_> = if needs_schema_namespaces(node) {
        &[("xmlns:xsi", XSI_NAMESPACE), ("xmlns:xsd", XSD_NAMESPACE)]
    } else {
        &[]
    };
    write_element(&mut writer, root, node, namespaces)?;
    Ok(writer.into_inner().into_inner())
}

/// Writes one element per list item, or a single element otherwise.
pub(crate) fn write_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    node: &Node,
    extra: &Attributes<'_>,
) -> Result<(), EncodeError> {
    if let Node::List(items) = node {
        for item in items {
            write_element(writer, name, item, extra)?;
        }
        return Ok(());
    }

    let mut start = BytesStart::new(name);
    for attribute in extra {
        start.push_attribute(*attribute);
    }
    let body = match node {
        Node::Tagged(type_name, inner) => {
            start.push_attribute(("xsi:type", qualified_type(type_name).as_str()));
            inner.untagged()
        }
        other => other,
    };

    match body {
        Node::Null => {
            start.push_attribute(("xsi:nil", "true"));
            write_event(writer, Event::Empty(start))
        }
        Node::Struct(fields) => write_struct(writer, name, start, fields),
        Node::List(_) => Err(EncodeError::Xml(format!(
            "element `{name}` cannot hold a nested list"
        ))),
        scalar => {
            let text = scalar.scalar_text().unwrap_or_default();
            write_event(writer, Event::Start(start))?;
            write_event(writer, Event::Text(BytesText::new(&text)))?;
            write_event(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_struct<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    mut start: BytesStart<'_>,
    node: &StructNode,
) -> Result<(), EncodeError> {
    let mut text = None;
    let mut children = Vec::new();
    for field in &node.fields {
        match field.kind {
            FieldKind::Attribute => {
                let value = field
                    .value
                    .scalar_text()
                    .ok_or_else(|| EncodeError::NotScalar {
                        field: field.name.clone(),
                        kind: "attribute",
                    })?;
                start.push_attribute((field.name.as_str(), value.as_str()));
            }
            FieldKind::Text => text = field.value.scalar_text(),
            FieldKind::Element | FieldKind::Items => children.push(field),
        }
    }

    let empty = text.is_none()
        && children
            .iter()
            .all(|field| matches!(&field.value, Node::List(items) if items.is_empty()));
    if empty {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    if let Some(text) = text {
        write_event(writer, Event::Text(BytesText::new(&text)))?;
    }
    for field in children {
        write_element(writer, &field.name, &field.value, &[])?;
    }
    write_event(writer, Event::End(BytesEnd::new(name)))
}

/// Primitive discriminators live in the schema namespace.
fn qualified_type(name: &str) -> String {
    if !name.contains(':') && PrimitiveKind::from_wire_name(name).is_some() {
        format!("{XSD_PREFIX}:{name}")
    } else {
        name.to_owned()
    }
}

pub(crate) fn needs_schema_namespaces(node: &Node) -> bool {
    match node {
        Node::Null | Node::Tagged(_, _) => true,
        Node::List(items) => items.iter().any(needs_schema_namespaces),
        Node::Struct(fields) => fields
            .fields
            .iter()
            .any(|field| needs_schema_namespaces(&field.value)),
        _ => false,
    }
}

pub(crate) fn write_event<'a, W: Write>(
    writer: &mut Writer<W>,
    event: Event<'a>,
) -> Result<(), EncodeError> {
    writer
        .write_event(event)
        .map_err(|e| EncodeError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;

    fn render(root: &str, node: &Node) -> String {
        let bytes = write_document(root, node, &XmlOptions::default()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn attributes_and_text() {
        let mut node = StructNode::new(Some("ManagedObjectReference".into()));
        node.push("type", FieldKind::Attribute, Node::Value(Primitive::String("fake".into())));
        node.push("value", FieldKind::Text, Node::Value(Primitive::String("fake".into())));
        assert_eq!(
            render("ManagedObjectReference", &Node::Struct(node)),
            r#"<ManagedObjectReference type="fake">fake</ManagedObjectReference>"#
        );
    }

    #[test]
    fn tagged_primitives_declare_the_schema_namespaces() {
        let mut node = StructNode::new(Some("OptionValue".into()));
        node.push(
            "value",
            FieldKind::Element,
            Node::tagged("short", Node::Value(Primitive::Short(300))),
        );
        assert_eq!(
            render("OptionValue", &Node::Struct(node)),
            concat!(
                r#"<OptionValue xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
                r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema">"#,
                r#"<value xsi:type="xsd:short">300</value></OptionValue>"#
            )
        );
    }

    #[test]
    fn lists_repeat_the_element_and_nulls_are_nil() {
        let mut node = StructNode::new(None);
        node.push(
            "affinitySet",
            FieldKind::Element,
            Node::List(vec![Node::Value(Primitive::Int(1)), Node::Value(Primitive::Int(2))]),
        );
        node.push("unitNumber", FieldKind::Element, Node::Null);
        let xml = render("obj", &Node::Struct(node));
        assert!(xml.contains("<affinitySet>1</affinitySet><affinitySet>2</affinitySet>"));
        assert!(xml.contains(r#"<unitNumber xsi:nil="true"/>"#));
    }

    #[test]
    fn text_is_escaped() {
        let xml = render("name", &Node::Text("a<b & c".into()));
        assert_eq!(xml, "<name>a&lt;b &amp; c</name>");
    }
}
