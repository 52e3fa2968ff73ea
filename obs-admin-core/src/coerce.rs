//! Structural conversion of a string-keyed form mapping into a record.
//!
//! Every value arrives as a string; the target type's `Deserialize` impl
//! decides what it wants and the string is parsed on demand. Field names
//! must match the map keys (use `#[serde(rename = ...)]` where they do not).

use crate::error::AdminError;
use crate::widget::FieldValues;
use serde::de::value::{MapDeserializer, StrDeserializer};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use std::fmt;

pub fn coerce<T: DeserializeOwned>(values: &FieldValues) -> Result<T, AdminError> {
    let entries = values
        .iter()
        .map(|(k, v)| (k.as_str(), FieldValue(v.as_str())));
    T::deserialize(MapDeserializer::<_, CoerceError>::new(entries))
        .map_err(|e| AdminError::Conversion(e.0))
}

#[derive(Debug)]
pub struct CoerceError(String);

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CoerceError {}

impl de::Error for CoerceError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        CoerceError(msg.to_string())
    }
}

/// One form value; parses itself into whatever primitive the visitor asks for
#[derive(Clone, Copy)]
struct FieldValue<'a>(&'a str);

impl<'de> IntoDeserializer<'de, CoerceError> for FieldValue<'de> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

macro_rules! parse_number {
    ($($method:ident => $visit:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, CoerceError> {
                visitor.$visit(self.parse_integral::<$ty>()?)
            }
        )*
    };
}

impl<'de> FieldValue<'de> {
    fn trimmed(&self) -> &'de str {
        self.0.trim()
    }

    /// Integers also accept whole floats such as `12.0`
    fn parse_integral<N>(&self) -> Result<N, CoerceError>
    where
        N: std::str::FromStr + TryFrom<i64> + TryFrom<u64>,
    {
        let text = self.trimmed();
        if let Ok(n) = text.parse::<N>() {
            return Ok(n);
        }
        let f = match text.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => f,
            _ => return Err(CoerceError(format!("invalid number: {:?}", self.0))),
        };
        // `as` saturates, so only cast values that fit: [0, 2^64) or [-2^63, 0)
        let converted = if f >= 0.0 && f < u64::MAX as f64 {
            N::try_from(f as u64).ok()
        } else if f < 0.0 && f >= i64::MIN as f64 {
            N::try_from(f as i64).ok()
        } else {
            None
        };
        converted.ok_or_else(|| CoerceError(format!("{} is out of range", text)))
    }

    fn parse_float(&self) -> Result<f64, CoerceError> {
        self.trimmed()
            .parse::<f64>()
            .map_err(|_| CoerceError(format!("invalid number: {:?}", self.0)))
    }
}

impl<'de> de::Deserializer<'de> for FieldValue<'de> {
    type Error = CoerceError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, CoerceError> {
        visitor.visit_borrowed_str(self.0)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, CoerceError> {
        match self.trimmed() {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            other => Err(CoerceError(format!("invalid boolean: {:?}", other))),
        }
    }

    parse_number! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, CoerceError> {
        visitor.visit_f32(self.parse_float()? as f32)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, CoerceError> {
        visitor.visit_f64(self.parse_float()?)
    }

    /// A present key is always `Some`; absent keys never reach here
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, CoerceError> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, CoerceError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, CoerceError> {
        let variant: StrDeserializer<'de, CoerceError> = self.trimmed().into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct UpdateItem {
        name: String,
        price: f64,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    enum Kind {
        T,
        W,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Movement {
        item_id: i64,
        quantity: u32,
        #[serde(rename = "type")]
        kind: Kind,
        urgent: bool,
        note: Option<String>,
    }

    #[test]
    fn test_coerce_strings_into_typed_fields() {
        let item: UpdateItem = coerce(&values(&[("name", "Widget"), ("price", "12.0")])).unwrap();
        assert_eq!(
            item,
            UpdateItem {
                name: "Widget".to_string(),
                price: 12.0
            }
        );
    }

    #[test]
    fn test_coerce_integers_enums_and_options() {
        let movement: Movement = coerce(&values(&[
            ("itemId", "7.0"),
            ("quantity", "3"),
            ("type", "W"),
            ("urgent", "false"),
        ]))
        .unwrap();
        assert_eq!(movement.item_id, 7);
        assert_eq!(movement.quantity, 3);
        assert_eq!(movement.kind, Kind::W);
        assert!(!movement.urgent);
        assert_eq!(movement.note, None);
    }

    #[test]
    fn test_unparseable_value_is_conversion_error() {
        let result: Result<UpdateItem, _> =
            coerce(&values(&[("name", "Widget"), ("price", "cheap")]));
        match result {
            Err(AdminError::Conversion(msg)) => assert!(msg.contains("cheap")),
            other => panic!("Expected Conversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field_is_conversion_error() {
        // price omitted, as happens when the number field is left empty
        let result: Result<UpdateItem, _> = coerce(&values(&[("name", "Widget")]));
        assert!(matches!(result, Err(AdminError::Conversion(msg)) if msg.contains("price")));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let item: UpdateItem = coerce(&values(&[
            ("name", "Widget"),
            ("price", "1.5"),
            ("colour", "red"),
        ]))
        .unwrap();
        assert_eq!(item.price, 1.5);
    }

    #[test]
    fn test_fractional_value_for_integer_field_fails() {
        let result: Result<Movement, _> = coerce(&values(&[
            ("itemId", "7.5"),
            ("quantity", "3"),
            ("type", "T"),
            ("urgent", "true"),
        ]));
        assert!(matches!(result, Err(AdminError::Conversion(_))));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Counters {
        qty: i64,
        big: u64,
    }

    #[test]
    fn test_whole_float_outside_integer_range_fails() {
        let too_big: Result<Counters, _> = coerce(&values(&[
            ("qty", "100000000000000000000"),
            ("big", "1.0"),
        ]));
        assert!(matches!(too_big, Err(AdminError::Conversion(msg)) if msg.contains("out of range")));

        let past_u64: Result<Counters, _> = coerce(&values(&[
            ("qty", "1"),
            ("big", "20000000000000000000.0"),
        ]));
        assert!(matches!(past_u64, Err(AdminError::Conversion(_))));

        let negative_unsigned: Result<Counters, _> =
            coerce(&values(&[("qty", "1"), ("big", "-1.0")]));
        assert!(matches!(negative_unsigned, Err(AdminError::Conversion(_))));

        let quantity: Result<Movement, _> = coerce(&values(&[
            ("itemId", "1"),
            ("quantity", "5000000000.0"),
            ("type", "T"),
            ("urgent", "true"),
        ]));
        assert!(matches!(quantity, Err(AdminError::Conversion(_))));
    }

    #[test]
    fn test_whole_float_inside_range_converts() {
        let counters: Counters = coerce(&values(&[
            ("qty", "-12.0"),
            ("big", "15000000000000000000.0"),
        ]))
        .unwrap();
        assert_eq!(counters.qty, -12);
        assert_eq!(counters.big, 15_000_000_000_000_000_000);
    }
}
