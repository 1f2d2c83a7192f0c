//! Request handlers, one module per resource.

pub mod loans;
pub mod properties;
pub mod status;
pub mod strategy;
pub mod wallet;

use serde::{Deserialize, Deserializer};

/// Numeric request field that clients send either as a JSON number or a
/// string. Kept as the raw decimal text so the chain-side parsers decide
/// what is acceptable.
#[derive(Debug, Clone)]
pub struct NumericField(pub String);

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = NumericField;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_str<E>(self, value: &str) -> Result<NumericField, E>
            where
                E: de::Error,
            {
                Ok(NumericField(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<NumericField, E>
            where
                E: de::Error,
            {
                Ok(NumericField(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<NumericField, E>
            where
                E: de::Error,
            {
                Ok(NumericField(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<NumericField, E>
            where
                E: de::Error,
            {
                Ok(NumericField(value.to_string()))
            }
        }

        deserializer.deserialize_any(FieldVisitor)
    }
}
