// SPDX-License-Identifier: Apache-2.0

use std::convert::TryFrom;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{de, de::Visitor, Deserializer};

// This function is inspired by https://serde.rs/string-or-struct.html
pub(crate) fn option_integer_or_string<'de, D, T>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
    <T as TryFrom<u64>>::Error: std::fmt::Display,
    <T as FromStr>::Err: std::fmt::Display,
{
    struct IntegerOrString<T>(PhantomData<fn() -> Option<T>>);

    impl<'de, T> Visitor<'de> for IntegerOrString<T>
    where
        T: TryFrom<u64> + FromStr,
        <T as TryFrom<u64>>::Error: std::fmt::Display,
        <T as FromStr>::Err: std::fmt::Display,
    {
        type Value = Option<T>;

        fn expecting(
            &self,
            formatter: &mut std::fmt::Formatter,
        ) -> std::fmt::Result {
            formatter.write_str("integer or string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            if value.is_empty() {
                Ok(None)
            } else {
                FromStr::from_str(value)
                    .map_err(de::Error::custom)
                    .map(Some)
            }
        }

        fn visit_u64<E>(self, value: u64) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            TryFrom::try_from(value)
                .map_err(de::Error::custom)
                .map(Some)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            let value = u64::try_from(value).map_err(de::Error::custom)?;
            self.visit_u64(value)
        }

        fn visit_none<E>(self) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Option<T>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IntegerOrString(PhantomData))
}

// The kernel reports routing tables either by symbolic name ("main") or by
// number, keep both as string and leave the translation to the normalizer.
pub(crate) fn option_string_or_integer<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrInteger;

    impl<'de> Visitor<'de> for StringOrInteger {
        type Value = Option<String>;

        fn expecting(
            &self,
            formatter: &mut std::fmt::Formatter,
        ) -> std::fmt::Result {
            formatter.write_str("string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Option<String>, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Option<String>, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Option<String>, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Option<String>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Option<String>, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrInteger)
}

pub(crate) fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolOrString;

    impl<'de> Visitor<'de> for BoolOrString {
        type Value = bool;

        fn expecting(
            &self,
            formatter: &mut std::fmt::Formatter,
        ) -> std::fmt::Result {
            formatter.write_str("boolean or string")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<bool, E>
        where
            E: de::Error,
        {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "y" | "on" => Ok(true),
                "0" | "false" | "no" | "n" | "off" => Ok(false),
                _ => Err(de::Error::invalid_value(
                    de::Unexpected::Str(value),
                    &"true, false, yes, no, on, off",
                )),
            }
        }
    }

    deserializer.deserialize_any(BoolOrString)
}
