//! `MESSAGEPAYLOAD` generator.
//!
//! The payload is a JSON object with a single key. Its shape is picked
//! uniformly from [`PayloadKind::ALL`], then the value is drawn from that
//! shape's domain.

use super::one_of;
use rand::Rng;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// The seven payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Foo,
    Item,
    Price,
    Quantity,
    Status,
    Reason,
    Custom,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 7] = [
        PayloadKind::Foo,
        PayloadKind::Item,
        PayloadKind::Price,
        PayloadKind::Quantity,
        PayloadKind::Status,
        PayloadKind::Reason,
        PayloadKind::Custom,
    ];

    /// The JSON key this shape uses.
    pub fn key(self) -> &'static str {
        match self {
            PayloadKind::Foo => "foo",
            PayloadKind::Item => "item",
            PayloadKind::Price => "price",
            PayloadKind::Quantity => "quantity",
            PayloadKind::Status => "status",
            PayloadKind::Reason => "reason",
            PayloadKind::Custom => "custom",
        }
    }

    /// Draw a payload of this shape.
    pub fn generate<R: Rng>(self, rng: &mut R) -> Payload {
        match self {
            PayloadKind::Foo => Payload::Foo(one_of(rng, &["bar", "baz"])),
            PayloadKind::Item => Payload::Item(one_of(rng, &["book", "pen", "laptop"])),
            PayloadKind::Price => Payload::Price(rng.gen_range(10..=1000)),
            PayloadKind::Quantity => Payload::Quantity(rng.gen_range(1..=10)),
            PayloadKind::Status => {
                Payload::Status(one_of(rng, &["pending", "approved", "rejected"]))
            }
            PayloadKind::Reason => Payload::Reason(one_of(rng, &["damaged", "late", "wrong_item"])),
            PayloadKind::Custom => Payload::Custom(format!("value_{}", rng.gen_range(1..=100))),
        }
    }
}

/// A generated payload. Serializes as a one-key JSON object, e.g. `{"price": 250}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Foo(&'static str),
    Item(&'static str),
    Price(u32),
    Quantity(u32),
    Status(&'static str),
    Reason(&'static str),
    Custom(String),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Foo(_) => PayloadKind::Foo,
            Payload::Item(_) => PayloadKind::Item,
            Payload::Price(_) => PayloadKind::Price,
            Payload::Quantity(_) => PayloadKind::Quantity,
            Payload::Status(_) => PayloadKind::Status,
            Payload::Reason(_) => PayloadKind::Reason,
            Payload::Custom(_) => PayloadKind::Custom,
        }
    }

    /// JSON text of the payload, with `", "` and `": "` separators.
    pub fn to_json(&self) -> String {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        // Serializing a newtype variant over str/u32/String cannot fail.
        if self.serialize(&mut serializer).is_err() {
            return String::new();
        }
        String::from_utf8(out).unwrap_or_default()
    }
}

/// Single-line JSON with a space after each `,` and `:`.
///
/// Existing topic consumers compare payload text byte for byte against this
/// layout.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Pick a shape uniformly and generate a payload.
pub fn generate_payload<R: Rng>(rng: &mut R) -> Payload {
    one_of(rng, &PayloadKind::ALL).generate(rng)
}
