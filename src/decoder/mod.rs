//! GeoJSON feed decoding.
//!
//! The payload is walked by hand rather than through `#[derive(Deserialize)]`
//! so that every failure can name the exact field it happened at
//! (`features[3].properties.mag`) and what was expected there.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::DecodeErrorKind;

/// One feature exactly as it appears on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeatureRecord {
    pub mag: f64,
    pub place: String,
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub coordinates: Vec<f64>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}{}", location_suffix(.path))]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    /// Dotted path of the offending field; empty when the payload as a
    /// whole could not be parsed.
    pub path: String,
    pub detail: String,
}

impl DecodeError {
    fn new(kind: DecodeErrorKind, path: &str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_string(),
            detail: detail.into(),
        }
    }

    fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Syntax => DecodeErrorKind::Corrupted,
            Category::Eof => DecodeErrorKind::UnexpectedEnd,
            Category::Data | Category::Io => DecodeErrorKind::Other,
        };
        Self::new(kind, "", err.to_string())
    }
}

fn location_suffix(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {}", path)
    }
}

/// Decodes a feed payload into its features, in feed order.
///
/// Any failure discards the whole batch.
pub fn decode(bytes: &[u8]) -> Result<Vec<RawFeatureRecord>, DecodeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(DecodeError::from_json)?;
    let root = Node::root(&value);

    root.field("features")?
        .array()?
        .into_iter()
        .map(|feature| decode_feature(&feature))
        .collect()
}

fn decode_feature(feature: &Node<'_>) -> Result<RawFeatureRecord, DecodeError> {
    let properties = feature.field("properties")?;
    let geometry = feature.field("geometry")?;

    Ok(RawFeatureRecord {
        mag: properties.field("mag")?.number()?,
        place: properties.field("place")?.string()?,
        time: properties.field("time")?.integer()?,
        coordinates: geometry
            .field("coordinates")?
            .array()?
            .iter()
            .map(Node::number)
            .collect::<Result<_, _>>()?,
    })
}

/// A JSON value together with the path it was reached by.
struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    fn describe_path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }

    fn mismatch(&self, expected: &str) -> DecodeError {
        DecodeError::new(
            DecodeErrorKind::TypeMismatch,
            self.describe_path(),
            format!("expected {}, found {}", expected, describe(self.value)),
        )
    }

    fn object(&self) -> Result<&'a Map<String, Value>, DecodeError> {
        self.value.as_object().ok_or_else(|| self.mismatch("object"))
    }

    fn field(&self, name: &str) -> Result<Node<'a>, DecodeError> {
        let path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        };

        match self.object()?.get(name) {
            Some(value) => Ok(Node { value, path }),
            None => Err(DecodeError::new(
                DecodeErrorKind::MissingKey,
                &path,
                format!("missing key `{}`", name),
            )),
        }
    }

    fn array(&self) -> Result<Vec<Node<'a>>, DecodeError> {
        let items = self.value.as_array().ok_or_else(|| self.mismatch("array"))?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, value)| Node {
                value,
                path: format!("{}[{}]", self.describe_path(), i),
            })
            .collect())
    }

    fn number(&self) -> Result<f64, DecodeError> {
        self.value.as_f64().ok_or_else(|| self.mismatch("number"))
    }

    fn integer(&self) -> Result<i64, DecodeError> {
        self.value.as_i64().ok_or_else(|| self.mismatch("integer"))
    }

    fn string(&self) -> Result<String, DecodeError> {
        self.value
            .as_str()
            .map(String::from)
            .ok_or_else(|| self.mismatch("string"))
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
