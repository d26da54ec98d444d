mod common;

use vim_wire::codecs::{self, Codecs, JsonWireCodec, WireCodec, XmlWireCodec};
use vim_wire::json::JsonOptions;
use vim_wire::xml::{self, XmlOptions};
use vim_wire::{
    deep_copy, must_deep_copy, AnyType, DataObject, DecodeError, RegistryBuilder, WireFormat,
};

use common::{circle, registry, square, Circle, Drawing, Shape, ShapeKind, Square};

fn drawing() -> Drawing {
    Drawing {
        title: "copy me".into(),
        primary: Some(square("base", 4).into()),
        shapes: vec![circle("a", 1.0).into(), square("b", 2).into()],
        extra: Some(AnyType::array(vec![1i32, 2, 3])),
        revision: Some(3),
        ..Drawing::default()
    }
}

fn plain_shape() -> Shape {
    Shape {
        name: "a".into(),
        layer: Some(1),
        ..Shape::default()
    }
}

#[test]
fn codecs_are_selected_by_format() {
    let codecs = Codecs::new();
    for format in [WireFormat::Json, WireFormat::Xml] {
        let codec = codecs.get(format);
        assert_eq!(codec.format(), format);
        assert_eq!(codec.id(), format.as_str());
    }
}

#[test]
fn every_codec_round_trips_the_same_value() {
    let registry = registry();
    let codecs = Codecs::default();
    let value = drawing();
    for format in [WireFormat::Json, WireFormat::Xml] {
        let codec = codecs.get(format);
        let bytes = codecs::encode(codec, &value, &registry).unwrap();
        let back: Drawing = codecs::decode(codec, &bytes, &registry).unwrap();
        assert_eq!(back, value, "{}", format.as_str());
    }
}

#[test]
fn json_pretty_output_indents_two_spaces() {
    let registry = registry();
    let codec = JsonWireCodec::with_options(JsonOptions { pretty: true });
    let bytes = codecs::encode(&codec, &plain_shape(), &registry).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "{\n  \"_typeName\": \"Shape\",\n  \"name\": \"a\",\n  \"layer\": 1\n}"
    );
}

#[test]
fn xml_options_shape_the_document() {
    let registry = registry();

    let plain = xml::to_string(&plain_shape(), &registry).unwrap();
    assert_eq!(plain, "<Shape><name>a</name><layer>1</layer></Shape>");

    let declared = xml::to_string_with(
        &plain_shape(),
        &registry,
        &XmlOptions {
            declaration: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        declared,
        r#"<?xml version="1.0" encoding="UTF-8"?><Shape><name>a</name><layer>1</layer></Shape>"#
    );

    let indented = xml::to_string_with(
        &plain_shape(),
        &registry,
        &XmlOptions {
            indent: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(indented, "<Shape>\n  <name>a</name>\n  <layer>1</layer>\n</Shape>");

    let codec = XmlWireCodec::with_options(XmlOptions {
        root: Some("figure".into()),
        ..Default::default()
    });
    let bytes = codecs::encode(&codec, &ShapeKind::from(plain_shape()), &registry).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.starts_with("<figure "), "{text}");
    assert!(text.contains(r#"xsi:type="Shape""#), "{text}");
    let back: ShapeKind = codecs::decode(&codec, &bytes, &registry).unwrap();
    assert_eq!(back, ShapeKind::from(plain_shape()));
}

#[test]
fn bare_values_need_an_explicit_root() {
    let registry = registry();
    let err = xml::to_string(&vec![1i32, 2], &registry).unwrap_err();
    assert!(err.to_string().contains("document root"));

    let text = xml::to_string_with(
        &vec![1i32, 2],
        &registry,
        &XmlOptions {
            root: Some("affinitySet".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(text, "<affinitySet>1</affinitySet><affinitySet>2</affinitySet>");
}

#[test]
fn object_streams_round_trip() {
    let registry = registry();
    let c = circle("wheel", 0.5);
    let s = square("tile", 9);
    let objects: [&dyn DataObject; 2] = [&c, &s];
    let text = xml::objects_to_string(&objects, &registry, &XmlOptions::default()).unwrap();
    assert!(text.starts_with(r#"<obj xmlns:vim25="urn:vim25""#), "{text}");
    assert!(text.contains(r#"xsi:type="vim25:Circle""#), "{text}");

    let stream = xml::objects_from_str(&text, &registry).unwrap();
    assert_eq!(stream.remaining(), 2);
    let decoded: Vec<_> = stream.collect::<Result<_, _>>().unwrap();
    assert_eq!(decoded[0].downcast_ref::<Circle>(), Some(&c));
    assert_eq!(decoded[1].downcast_ref::<Square>(), Some(&s));
}

#[test]
fn object_streams_continue_past_bad_objects() {
    let registry = registry();
    let text = concat!(
        r#"<RetrieveResult xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        r#"<objects><obj xsi:type="Circle"><name>c</name><radius>2</radius></obj></objects>"#,
        r#"<obj xsi:type="Triangle"><name>t</name></obj>"#,
        r#"<obj xsi:type="Square"><name>s</name><side>nope</side></obj>"#,
        r#"<obj xsi:type="Square"/>"#,
        r#"</RetrieveResult>"#
    );
    let results: Vec<_> = xml::objects_from_str(text, &registry).unwrap().collect();
    assert_eq!(results.len(), 4);
    assert_eq!(
        results[0].as_ref().unwrap().downcast_ref::<Circle>(),
        Some(&circle("c", 2.0))
    );
    assert!(matches!(results[1], Err(DecodeError::UnknownType { ref name, .. }) if name == "Triangle"));
    assert!(matches!(results[2], Err(DecodeError::InvalidScalar { .. })));
    assert_eq!(
        results[3].as_ref().unwrap().downcast_ref::<Square>(),
        Some(&Square::default())
    );
}

#[test]
fn object_streams_fall_back_to_a_plain_type_attribute() {
    let registry = registry();
    let text = concat!(
        r#"<RetrieveResult xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        r#"<objects><obj type="Circle"><name>c</name><radius>2</radius></obj></objects>"#,
        r#"<obj type="Circle" xsi:type="Square"><name>s</name><side>3</side></obj>"#,
        r#"<obj type=""><name>untyped</name></obj>"#,
        r#"<obj type="vim25:Triangle"><name>t</name></obj>"#,
        r#"</RetrieveResult>"#
    );
    let results: Vec<_> = xml::objects_from_str(text, &registry).unwrap().collect();
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().downcast_ref::<Circle>(),
        Some(&circle("c", 2.0))
    );
    let square = results[1].as_ref().unwrap().downcast_ref::<Square>().unwrap();
    assert_eq!((square.shape.name.as_str(), square.side), ("s", 3));
    assert!(matches!(results[2], Err(DecodeError::UnknownType { ref name, .. }) if name == "Triangle"));
}

#[test]
fn deep_copy_is_independent_of_the_source() {
    let registry = registry();
    let original = drawing();
    let mut copy = deep_copy(&original, &registry).unwrap();
    assert_eq!(copy, original);

    if let Some(ShapeKind::Square(square)) = copy.primary.as_mut() {
        square.side = 40;
    }
    copy.shapes.clear();
    assert_eq!(original, drawing());
    assert_ne!(copy, original);
}

#[test]
fn deep_copy_reports_codec_failures() {
    let mut builder = RegistryBuilder::new();
    builder.register::<Drawing>().unwrap();
    let partial = builder.build();
    let err = deep_copy(&drawing(), &partial).unwrap_err();
    assert!(err.to_string().starts_with("deep copy decode failed"), "{err}");
}

#[test]
#[should_panic(expected = "unknown wire type `Square`")]
fn must_deep_copy_panics_on_failure() {
    let mut builder = RegistryBuilder::with_builtins();
    builder.register::<Drawing>().unwrap();
    let partial = builder.build();
    must_deep_copy(&drawing(), &partial);
}
