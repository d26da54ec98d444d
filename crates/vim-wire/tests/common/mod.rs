#![allow(dead_code)]

use chrono::{DateTime, Utc};
use vim_wire::{
    abstract_type, array_element, base_accessor, wire_enum, wire_type, AnyType, Binary,
    ByteSlice, DecodeError, EncodeError, Registry, RegistryBuilder, StructReader, StructWriter,
    WireType,
};

pub trait BaseShape {
    fn get_shape(&self) -> &Shape;
    fn get_shape_mut(&mut self) -> &mut Shape;
}

wire_enum! {
    pub enum Fill {
        Solid = "solid",
        Hatched = "hatched",
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub name: String,
    pub fill: Fill,
    pub layer: Option<i32>,
}

impl WireType for Shape {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("name", &self.name)?;
        w.omit_empty("fill", &self.fill)?;
        w.field("layer", &self.layer)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: r.field("name")?,
            fill: r.field("fill")?,
            layer: r.field("layer")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    pub shape: Shape,
    pub radius: f64,
}

impl WireType for Circle {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.shape.write_fields(w)?;
        w.field("radius", &self.radius)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            shape: Shape::read_fields(r)?,
            radius: r.field("radius")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Square {
    pub shape: Shape,
    pub side: i16,
}

impl WireType for Square {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        self.shape.write_fields(w)?;
        w.field("side", &self.side)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            shape: Shape::read_fields(r)?,
            side: r.field("side")?,
        })
    }
}

base_accessor!(BaseShape::{get_shape, get_shape_mut} -> Shape {
    Shape => self;
    Circle => self.shape;
    Square => self.shape;
});

abstract_type! {
    pub enum ShapeKind: Shape => BaseShape::{get_shape, get_shape_mut} {
        Shape,
        Circle,
        Square,
    }
}

/// A drawing exercising every kind of field position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub title: String,
    pub primary: Option<ShapeKind>,
    pub shapes: Vec<ShapeKind>,
    pub extra: Option<AnyType>,
    pub thumbnail: Binary,
    pub checksum: ByteSlice,
    pub created: Option<DateTime<Utc>>,
    pub revision: Option<i64>,
    pub owner: Option<Owner>,
}

impl WireType for Drawing {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("title", &self.title)?;
        w.field("primary", &self.primary)?;
        w.field("shapes", &self.shapes)?;
        w.field("extra", &self.extra)?;
        w.omit_empty("thumbnail", &self.thumbnail)?;
        w.field("checksum", &self.checksum)?;
        w.field("created", &self.created)?;
        w.nullable("revision", &self.revision)?;
        w.field("owner", &self.owner)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            title: r.field("title")?,
            primary: r.field("primary")?,
            shapes: r.field("shapes")?,
            extra: r.field("extra")?,
            thumbnail: r.field("thumbnail")?,
            checksum: r.field("checksum")?,
            created: r.field("created")?,
            revision: r.field("revision")?,
            owner: r.field("owner")?,
        })
    }
}

/// Attribute and character-data placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Owner {
    pub kind: String,
    pub id: String,
}

impl WireType for Owner {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.attribute("kind", &self.kind)?;
        w.text("id", &self.id)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            kind: r.attribute("kind")?,
            id: r.text("id")?,
        })
    }
}

/// Receives signed byte tokens as plain unsigned bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChecksum {
    pub checksum: Vec<u8>,
}

impl WireType for RawChecksum {
    fn write_fields(&self, w: &mut StructWriter<'_, '_>) -> Result<(), EncodeError> {
        w.field("checksum", &self.checksum)
    }

    fn read_fields(r: &mut StructReader<'_, '_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            checksum: r.field("checksum")?,
        })
    }
}

wire_type!(Shape, Circle, Square, Drawing, Owner, RawChecksum);

array_element!(Circle, Square);

pub fn registry() -> Registry {
    let mut builder = RegistryBuilder::with_builtins();
    builder
        .register::<Shape>()
        .unwrap()
        .register::<Circle>()
        .unwrap()
        .register::<Square>()
        .unwrap()
        .register::<Drawing>()
        .unwrap()
        .register::<Owner>()
        .unwrap()
        .register::<vim_wire::ArrayOf<ShapeKind>>()
        .unwrap();
    builder.build()
}

pub fn circle(name: &str, radius: f64) -> Circle {
    Circle {
        shape: Shape {
            name: name.to_owned(),
            ..Shape::default()
        },
        radius,
    }
}

pub fn square(name: &str, side: i16) -> Square {
    Square {
        shape: Shape {
            name: name.to_owned(),
            fill: Fill::Hatched,
            layer: Some(2),
        },
        side,
    }
}
