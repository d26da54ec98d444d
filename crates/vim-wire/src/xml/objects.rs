//! Streams of self-describing objects: every element carries its own
//! `xsi:type`, as in vCenter inventory dumps.

use std::collections::VecDeque;

use crate::codec::{Decoder, Encoder};
use crate::constants::{
    WireFormat, VIM25_NAMESPACE, VIM25_PREFIX, XSD_NAMESPACE, XSI_NAMESPACE,
};
use crate::discriminator;
use crate::error::{DecodeError, EncodeError};
use crate::node::Node;
use crate::object::DataObject;
use crate::registry::{local_name, Registry};

use super::reader::{element_to_node, parse_elements, Element, Namespaces};
use super::writer::{needs_schema_namespaces, new_writer, write_element};
use super::XmlOptions;

const OBJECT_ELEMENT: &str = "obj";

/// Writes each object as an `<obj xsi:type="vim25:...">` element.
pub fn objects_to_string(
    objects: &[&dyn DataObject],
    registry: &Registry,
    options: &XmlOptions,
) -> Result<String, EncodeError> {
    let enc = Encoder::new(registry, WireFormat::Xml);
    let mut writer = new_writer(options)?;
    for object in objects {
        let Node::Tagged(name, node) = discriminator::encode_tagged(*object, &enc)? else {
            return Err(EncodeError::Custom("object encoded without a type".to_owned()));
        };
        let type_name = format!("{VIM25_PREFIX}:{name}");
        let mut attributes = vec![
            ("xmlns:vim25", VIM25_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
        ];
        if needs_schema_namespaces(&node) {
            attributes.push(("xmlns:xsd", XSD_NAMESPACE));
        }
        attributes.push(("xsi:type", type_name.as_str()));
        write_element(&mut writer, OBJECT_ELEMENT, node.untagged(), &attributes)?;
    }
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| EncodeError::Xml(e.to_string()))
}

/// Collects every typed element of `xml`. The type comes from `xsi:type`,
/// or from a plain `type` attribute when there is none. Untyped elements are
/// descended into; typed ones are decoded whole.
pub fn objects_from_str<'r>(
    xml: &str,
    registry: &'r Registry,
) -> Result<ObjectStream<'r>, DecodeError> {
    let roots = parse_elements(xml)?;
    let mut pending = VecDeque::new();
    let scope = Namespaces::default();
    for root in &roots {
        collect_typed(root, &scope, &mut pending);
    }
    Ok(ObjectStream { registry, pending })
}

fn collect_typed(element: &Element, parent: &Namespaces, out: &mut VecDeque<Node>) {
    let scope = parent.enter(element);
    if scope.schema_attribute(element, "type").is_some() {
        out.push_back(element_to_node(element, parent));
        return;
    }
    if let Some(name) = plain_type_attribute(element, &scope) {
        log::trace!("element `{}` typed by its `type` attribute", element.name);
        out.push_back(Node::tagged(local_name(name), element_to_node(element, parent)));
        return;
    }
    log::trace!("descending into untyped element `{}`", element.name);
    for child in &element.children {
        collect_typed(child, &scope, out);
    }
}

fn plain_type_attribute<'e>(element: &'e Element, scope: &Namespaces) -> Option<&'e str> {
    element.attributes.iter().find_map(|(key, value)| {
        let local = match key.split_once(':') {
            Some(("xmlns", _)) => return None,
            Some((prefix, _)) if scope.is_schema_instance(prefix) => return None,
            Some((_, local)) => local,
            None => key.as_str(),
        };
        (local == "type" && !value.is_empty()).then_some(value.as_str())
    })
}

/// Iterator over the objects of a document. A failed object yields an
/// error and the stream moves on to the next one.
#[derive(Debug)]
pub struct ObjectStream<'r> {
    registry: &'r Registry,
    pending: VecDeque<Node>,
}

impl ObjectStream<'_> {
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Iterator for ObjectStream<'_> {
    type Item = Result<Box<dyn DataObject>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop_front()?;
        let mut de = Decoder::new(self.registry, WireFormat::Xml);
        let name = node.discriminator().unwrap_or_default();
        Some(match self.registry.lookup(name) {
            Some(entry) => entry.decode(node.untagged(), &mut de),
            None => Err(DecodeError::UnknownType {
                name: local_name(name).to_owned(),
                path: de.path(),
            }),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}
