//! Options that govern how dynamically typed host values are converted into literals.
//!
//! Options are read from a flat string map, the way a host passes configuration across a binding
//! boundary:
//!
//! | key | value |
//! |---|---|
//! | `literal.float.allowPrecisionLoss` | `true` to accept json numbers that round when narrowed to `float` |
//! | `literal.string.maxLength` | longest accepted `string` literal, in bytes |
//! | `literal.binary.maxLength` | longest accepted `binary` literal, in bytes |

use std::collections::HashMap;

use serde::de::{self, value::MapDeserializer};
use serde::Deserialize;
use tracing::warn;

use crate::{Error, KernelResult};

/// Conversion options parsed from a string map. Unset options fall back to strict behavior.
#[derive(Deserialize, Debug, Clone, Eq, PartialEq, Default)]
#[serde(default)]
pub struct ConversionOptions {
    /// Accept json numbers that cannot be represented exactly as an f32 when building a `float`.
    #[serde(rename = "literal.float.allowPrecisionLoss")]
    #[serde(deserialize_with = "deserialize_bool")]
    pub allow_float_precision_loss: Option<bool>,

    /// Reject `string` literals longer than this many bytes.
    #[serde(rename = "literal.string.maxLength")]
    #[serde(deserialize_with = "deserialize_pos_int")]
    pub max_string_length: Option<usize>,

    /// Reject `binary` literals longer than this many bytes.
    #[serde(rename = "literal.binary.maxLength")]
    #[serde(deserialize_with = "deserialize_pos_int")]
    pub max_binary_length: Option<usize>,

    /// any unrecognized options are passed through and ignored by the parser
    #[serde(flatten)]
    pub unknown_properties: HashMap<String, String>,
}

impl ConversionOptions {
    /// Parse options from `(key, value)` pairs.
    pub fn new<'a, I>(items: I) -> KernelResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let deserializer = MapDeserializer::<_, de::value::Error>::new(items.into_iter());
        let options =
            ConversionOptions::deserialize(deserializer).map_err(Error::invalid_conversion_options)?;
        for key in options.unknown_properties.keys() {
            warn!("Ignoring unknown conversion option '{key}'");
        }
        Ok(options)
    }

    /// Parse options from a string map.
    pub fn from_map(map: &HashMap<String, String>) -> KernelResult<Self> {
        Self::new(map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub(crate) fn allows_float_precision_loss(&self) -> bool {
        self.allow_float_precision_loss.unwrap_or(false)
    }
}

fn deserialize_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    match s.as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(de::Error::unknown_variant(&s, &["true", "false"])),
    }
}

fn deserialize_pos_int<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    let n: usize = s.parse().map_err(de::Error::custom)?;
    if n == 0 {
        return Err(de::Error::custom("expected a positive integer, found 0"));
    }
    Ok(Some(n))
}
