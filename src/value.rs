use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;

/// A predicate document: operator or field keys mapped to values, in
/// insertion order.
pub type Document = IndexMap<String, Value>;

/// A value inside a predicate document.
///
/// Besides the JSON scalar types this carries the two MongoDB-specific kinds
/// the translator produces: 12-byte object identifiers and regular
/// expressions.
///
/// # Examples
///
/// ```
/// use odata_mongo::value::{Document, Value};
///
/// let mut condition = Document::new();
/// condition.insert("$gt".to_string(), Value::Integer(5));
///
/// let mut filter = Document::new();
/// filter.insert("Age".to_string(), Value::Document(condition));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// 12-byte object identifier
    ObjectId(ObjectId),

    /// Regular expression with options
    Regex(Regex),

    /// Array of values
    Array(Vec<Value>),

    /// Nested document
    Document(Document),
}

impl Value {
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<&Regex> {
        match self {
            Value::Regex(regex) => Some(regex),
            _ => None,
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectIdError {
    #[error("object id must be 24 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("object id is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// 12-byte MongoDB object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId(bytes)
    }

    pub fn bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Lowercase 24-character hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = hex::decode(s)?;
        let bytes: [u8; 12] = decoded
            .try_into()
            .map_err(|bytes: Vec<u8>| ObjectIdError::InvalidLength(bytes.len() * 2))?;
        Ok(ObjectId(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Extended JSON form: `{"$oid": "<hex>"}`.
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("$oid", &self.to_hex())?;
        map.end()
    }
}

/// Options attached to every pattern built by the translator.
///
/// `g` has no universal meaning across query engines. MongoDB itself does not
/// define it, so its effect depends on the engine consuming the document.
pub const DEFAULT_REGEX_OPTIONS: &str = "g";

/// Regular expression value, serialized as `{"$regex": ..., "$options": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regex {
    #[serde(rename = "$regex")]
    pub pattern: String,
    #[serde(rename = "$options")]
    pub options: String,
}

impl Regex {
    pub fn new(pattern: impl Into<String>, options: impl Into<String>) -> Self {
        Regex {
            pattern: pattern.into(),
            options: options.into(),
        }
    }

    /// Compiles the pattern for local matching.
    ///
    /// The `i`, `m`, `s` and `x` options map to the same inline flags; any
    /// other option (including `g`) is ignored.
    pub fn compile(&self) -> Result<regex::Regex, regex::Error> {
        let mut builder = regex::RegexBuilder::new(&self.pattern);
        for option in self.options.chars() {
            match option {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                _ => &mut builder,
            };
        }
        builder.build()
    }
}
