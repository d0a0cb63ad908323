//! Serde utilities for decimal fields.

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

/// Decimal quantities that the server may send as numbers or strings.
pub mod decimal {
    use super::{Deserializer, Visitor, de, fmt};

    struct DecimalVisitor;

    impl Visitor<'_> for DecimalVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string holding a decimal")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value as f64)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value as f64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value.trim().parse::<f64>().map_err(de::Error::custom)
        }
    }

    /// Deserializes an f64 from a number or decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a number nor a parseable string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    /// Optional decimals; `null` and missing fields become `None`.
    pub mod option {
        use super::{DecimalVisitor, Deserializer, Visitor, de, fmt};

        struct OptionVisitor;

        impl<'de> Visitor<'de> for OptionVisitor {
            type Value = Option<f64>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("null, a number, or a decimal string")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(DecimalVisitor).map(Some)
            }
        }

        /// Deserializes an optional f64 from null, a number, or a decimal string.
        ///
        /// # Errors
        ///
        /// Returns an error if a present value cannot be parsed.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_option(OptionVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Quantity {
        #[serde(with = "super::decimal")]
        quantity: f64,
        #[serde(default, with = "super::decimal::option")]
        in_stock: Option<f64>,
    }

    #[test]
    fn test_decimal_from_number() {
        let parsed: Quantity = serde_json::from_str(r#"{"quantity": 12.5, "in_stock": 3}"#).unwrap();
        assert!((parsed.quantity - 12.5).abs() < f64::EPSILON);
        assert_eq!(parsed.in_stock, Some(3.0));
    }

    #[test]
    fn test_decimal_from_string() {
        let parsed: Quantity = serde_json::from_str(r#"{"quantity": "4.00000", "in_stock": null}"#).unwrap();
        assert!((parsed.quantity - 4.0).abs() < f64::EPSILON);
        assert_eq!(parsed.in_stock, None);
    }

    #[test]
    fn test_decimal_missing_optional() {
        let parsed: Quantity = serde_json::from_str(r#"{"quantity": 1}"#).unwrap();
        assert_eq!(parsed.in_stock, None);
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!(serde_json::from_str::<Quantity>(r#"{"quantity": "lots"}"#).is_err());
    }
}
