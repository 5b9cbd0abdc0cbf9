//! Avro encoding in the schema-registry wire format.
//!
//! Every message is framed as:
//!
//! ```text
//! [0x00][schema id: u32 big-endian][Avro binary datum]
//! ```

use crate::error::ProducerError;
use apache_avro::types::Value;
use apache_avro::Schema;
use order_generator::{OrderGenerator, OrderRecord};

/// Leading byte of every framed message.
pub const MAGIC_BYTE: u8 = 0x00;

/// Schema text used for message keys.
pub const KEY_SCHEMA: &str = r#""string""#;

/// Convert a record into an Avro record value in schema field order.
pub fn record_to_avro(record: &OrderRecord) -> Value {
    Value::Record(
        record
            .fields()
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect(),
    )
}

/// Encodes values against one registered schema.
#[derive(Debug, Clone)]
pub struct AvroSerializer {
    schema: Schema,
    schema_id: u32,
}

impl AvroSerializer {
    pub fn new(schema: Schema, schema_id: u32) -> Self {
        Self { schema, schema_id }
    }

    /// Serializer for plain string keys.
    pub fn for_string_keys(schema_id: u32) -> Self {
        Self::new(Schema::String, schema_id)
    }

    pub fn schema_id(&self) -> u32 {
        self.schema_id
    }

    /// Encode and frame `value`.
    pub fn serialize(&self, value: Value) -> Result<Vec<u8>, ProducerError> {
        let datum = apache_avro::to_avro_datum(&self.schema, value)?;
        let mut framed = Vec::with_capacity(5 + datum.len());
        framed.push(MAGIC_BYTE);
        framed.extend_from_slice(&self.schema_id.to_be_bytes());
        framed.extend_from_slice(&datum);
        Ok(framed)
    }

    pub fn serialize_key(&self, key: &str) -> Result<Vec<u8>, ProducerError> {
        self.serialize(Value::String(key.to_string()))
    }

    pub fn serialize_record(&self, record: &OrderRecord) -> Result<Vec<u8>, ProducerError> {
        self.serialize(record_to_avro(record))
    }
}

/// Parse the value schema text and check that an order record encodes against it.
pub fn parse_value_schema(text: &str) -> Result<Schema, ProducerError> {
    let schema = Schema::parse_str(text)?;

    let sample = OrderGenerator::new(0).next_record();
    apache_avro::to_avro_datum(&schema, record_to_avro(&sample))
        .map_err(|e| ProducerError::SchemaMismatch(e.to_string()))?;

    Ok(schema)
}
