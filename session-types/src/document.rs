//! Glue between the value types and `serde_json`'s document model.
//!
//! Documents are `serde_json::Value` trees built with `preserve_order`, so
//! keys come back out in the order they were inserted.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::error::{Error, Result};

const INDENT: &[u8] = b"    ";

/// How strictly optional keys are treated when decoding a document.
///
/// Geometry keys (`x`, `y`, `z`, `r`, `g`, `b`, `a`) are always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Every key written by `to_json_data` must be present.
    #[default]
    Strict,
    /// Missing identity and display keys fall back to constructor defaults.
    Permissive,
}

/// Encode/decode contract shared by every record type.
pub trait JsonData: Sized {
    /// Value of the `type` key.
    const TYPE: &'static str;

    fn to_json_data(&self) -> Value;

    fn from_json_data_with(data: &Value, mode: ReadMode) -> Result<Self>;

    fn from_json_data(data: &Value) -> Result<Self> {
        Self::from_json_data_with(data, ReadMode::Strict)
    }

    /// Rejects values that `to_json_data` cannot represent faithfully.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Pretty text with four-space indentation.
    fn to_json_string(&self) -> Result<String> {
        self.validate()?;
        to_pretty_string(&self.to_json_data())
    }

    fn from_json_string(text: &str) -> Result<Self> {
        let data =
            serde_json::from_str(text).map_err(|source| Error::Parse { path: None, source })?;
        Self::from_json_data(&data)
    }

    fn to_json(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        write(path, &self.to_json_data())
    }

    fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_data(&read(path)?)
    }
}

pub fn to_pretty_string(data: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut ser)
        .map_err(|source| Error::Encode { source })?;
    String::from_utf8(buf).map_err(|err| Error::Encode {
        source: serde::ser::Error::custom(err),
    })
}

/// Writes `data` to `path`, replacing any existing file.
pub fn write(path: impl AsRef<Path>, data: &Value) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "writing document");

    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    let mut writer = BufWriter::new(file);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut ser)
        .map_err(std::io::Error::from)
        .and_then(|()| writer.flush())
        .map_err(|err| Error::io(path, err))
}

pub fn read(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading document");

    let bytes = std::fs::read(path).map_err(|err| Error::io(path, err))?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
        path: Some(path.to_path_buf()),
        source,
    })
}

/// Typed access to the keys of one record.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    mode: ReadMode,
}

impl<'a> Fields<'a> {
    /// Checks that `data` is an object tagged `tag`.
    pub(crate) fn new(data: &'a Value, tag: &str, mode: ReadMode) -> Result<Self> {
        let map = data
            .as_object()
            .ok_or_else(|| Error::malformed(tag, "expected an object"))?;

        match map.get("type") {
            Some(Value::String(found)) if found == tag => {}
            Some(Value::String(found)) => {
                return Err(Error::malformed(
                    "type",
                    format!("expected \"{tag}\", found \"{found}\""),
                ));
            }
            Some(_) => return Err(Error::malformed("type", "expected a string")),
            None if mode == ReadMode::Permissive => {}
            None => return Err(Error::malformed("type", "missing")),
        }

        Ok(Self { map, mode })
    }

    pub(crate) fn mode(&self) -> ReadMode {
        self.mode
    }

    fn required(&self, key: &str) -> Result<&'a Value> {
        self.map
            .get(key)
            .ok_or_else(|| Error::malformed(key, "missing"))
    }

    /// `None` when the key is absent and the mode allows defaulting it.
    fn optional(&self, key: &str) -> Result<Option<&'a Value>> {
        match (self.map.get(key), self.mode) {
            (Some(value), _) => Ok(Some(value)),
            (None, ReadMode::Permissive) => Ok(None),
            (None, ReadMode::Strict) => Err(Error::malformed(key, "missing")),
        }
    }

    pub(crate) fn channel(&self, key: &str) -> Result<u8> {
        let value = self.required(key)?;
        match value.as_u64() {
            Some(n) => u8::try_from(n)
                .map_err(|_| Error::malformed(key, format!("{n} is outside 0..=255"))),
            None if value.is_i64() => Err(Error::malformed(
                key,
                format!("{value} is outside 0..=255"),
            )),
            None => Err(Error::malformed(key, "expected an integer")),
        }
    }

    pub(crate) fn number(&self, key: &str) -> Result<f64> {
        as_number(key, self.required(key)?)
    }

    pub(crate) fn number_or(&self, key: &str, default: f64) -> Result<f64> {
        self.optional(key)?
            .map_or(Ok(default), |value| as_number(key, value))
    }

    pub(crate) fn string_or_else(
        &self,
        key: &str,
        default: impl FnOnce() -> String,
    ) -> Result<String> {
        match self.optional(key)? {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(Error::malformed(key, "expected a string")),
            None => Ok(default()),
        }
    }

    pub(crate) fn document(&self, key: &str) -> Result<Option<&'a Value>> {
        self.optional(key)
    }
}

fn as_number(key: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::malformed(key, "expected a number"))
}
