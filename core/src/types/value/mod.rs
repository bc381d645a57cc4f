//! Property values.
//!
//! `RawValue` is what the platform hands us: untyped, possibly carrying
//! booleans encoded as tagged numbers, binary blobs, dates and objects we
//! don't understand. `PropertyValue` is the closed six-variant type every
//! consumer works with. Conversion happens once, at ingestion, and is total.

use crate::types::PathSegment;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::slice;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// A normalized property-list value.
///
/// Mapping keys are unique and iterate in ascending order. Sequence
/// elements keep source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Mapping(BTreeMap<String, PropertyValue>),
    Sequence(Vec<PropertyValue>),
}

/// A value as delivered by the platform, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    /// `boolean_tagged` marks numbers the platform uses to carry booleans.
    Number {
        value: RawNumber,
        boolean_tagged: bool,
    },
    String(String),
    /// Keys are untyped too; non-string keys are stringified on ingestion.
    Dictionary(Vec<(RawValue, RawValue)>),
    Array(Vec<RawValue>),
    Data(Vec<u8>),
    Date(SystemTime),
    /// Anything else, carried as its platform description.
    Opaque(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawNumber {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl RawNumber {
    fn is_zero(self) -> bool {
        match self {
            RawNumber::Integer(i) => i == 0,
            RawNumber::Unsigned(u) => u == 0,
            RawNumber::Float(f) => f == 0.0,
        }
    }

    fn into_property(self) -> PropertyValue {
        match self {
            RawNumber::Integer(i) => PropertyValue::Number(i.into()),
            RawNumber::Unsigned(u) => PropertyValue::Number(u.into()),
            RawNumber::Float(f) => match Number::from_f64(f) {
                Some(n) => PropertyValue::Number(n),
                None => {
                    debug!(value = %f, "non-finite number rendered as string");
                    PropertyValue::String(f.to_string())
                }
            },
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => RawValue::Null,
            Json::Bool(b) => RawValue::Bool(b),
            Json::Number(n) => {
                let value = if let Some(u) = n.as_u64() {
                    RawNumber::Unsigned(u)
                } else if let Some(i) = n.as_i64() {
                    RawNumber::Integer(i)
                } else {
                    RawNumber::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                RawValue::Number {
                    value,
                    boolean_tagged: false,
                }
            }
            Json::String(s) => RawValue::String(s),
            Json::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Json::Object(entries) => RawValue::Dictionary(
                entries
                    .into_iter()
                    .map(|(k, v)| (RawValue::String(k), RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Ingestion.
impl PropertyValue {
    /// Normalizes a platform value. Never fails: anything outside the
    /// six-variant model degrades to a string.
    pub fn from_raw(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => PropertyValue::Null,
            RawValue::Bool(b) => PropertyValue::Bool(b),
            RawValue::Number {
                value,
                boolean_tagged: true,
            } => PropertyValue::Bool(!value.is_zero()),
            RawValue::Number { value, .. } => value.into_property(),
            RawValue::String(s) => PropertyValue::String(s),
            RawValue::Dictionary(entries) => {
                let mut mapping = BTreeMap::new();
                for (key, value) in entries {
                    // Last occurrence of a duplicate key wins.
                    mapping.insert(key_text(key), PropertyValue::from_raw(value));
                }
                PropertyValue::Mapping(mapping)
            }
            RawValue::Array(items) => {
                PropertyValue::Sequence(items.into_iter().map(PropertyValue::from_raw).collect())
            }
            RawValue::Data(bytes) => {
                debug!(len = bytes.len(), "data value rendered as string");
                PropertyValue::String(format!("<{} bytes>", bytes.len()))
            }
            RawValue::Date(at) => {
                debug!("date value rendered as string");
                PropertyValue::String(date_text(at))
            }
            RawValue::Opaque(description) => {
                debug!(%description, "unsupported value rendered as string");
                PropertyValue::String(description)
            }
        }
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        PropertyValue::from_raw(RawValue::from(value))
    }
}

fn key_text(key: RawValue) -> String {
    match PropertyValue::from_raw(key) {
        PropertyValue::String(s) => s,
        other => other.display_value(),
    }
}

fn date_text(at: SystemTime) -> String {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => format!("@{}", since.as_secs()),
        Err(before) => format!("@-{}", before.duration().as_secs()),
    }
}

/// Formatting and structure.
impl PropertyValue {
    /// Canonical text for a value. Search, copy and the row subtitle all use it.
    pub fn display_value(&self) -> String {
        match self {
            PropertyValue::Null => "null".to_string(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::String(s) => format!("\"{s}\""),
            PropertyValue::Mapping(m) => format!("Dictionary ({} items)", m.len()),
            PropertyValue::Sequence(s) => format!("Array ({} items)", s.len()),
        }
    }

    /// Direct child count; 0 for scalars.
    pub fn child_count(&self) -> usize {
        match self {
            PropertyValue::Mapping(m) => m.len(),
            PropertyValue::Sequence(s) => s.len(),
            _ => 0,
        }
    }

    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    pub fn is_container(&self) -> bool {
        matches!(self, PropertyValue::Mapping(_) | PropertyValue::Sequence(_))
    }

    /// Direct children with the path segment that reaches each one.
    pub fn children(&self) -> Children<'_> {
        match self {
            PropertyValue::Mapping(m) => Children::Mapping(m.iter()),
            PropertyValue::Sequence(s) => Children::Sequence(s.iter().enumerate()),
            _ => Children::Empty,
        }
    }

    pub fn child(&self, segment: &PathSegment) -> Option<&PropertyValue> {
        match (self, segment) {
            (PropertyValue::Mapping(m), PathSegment::Key(key)) => m.get(key),
            (PropertyValue::Sequence(s), PathSegment::Index(index)) => s.get(*index),
            _ => None,
        }
    }

    /// Follows `segments` down from this value.
    pub fn resolve<'a, I>(&self, segments: I) -> Option<&PropertyValue>
    where
        I: IntoIterator<Item = &'a PathSegment>,
    {
        segments
            .into_iter()
            .try_fold(self, |value, segment| value.child(segment))
    }
}

/// Iterator over a value's direct children.
pub enum Children<'a> {
    Mapping(btree_map::Iter<'a, String, PropertyValue>),
    Sequence(std::iter::Enumerate<slice::Iter<'a, PropertyValue>>),
    Empty,
}

impl<'a> Iterator for Children<'a> {
    type Item = (PathSegment, &'a PropertyValue);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Mapping(iter) => iter
                .next()
                .map(|(key, value)| (PathSegment::Key(key.clone()), value)),
            Children::Sequence(iter) => iter
                .next()
                .map(|(index, value)| (PathSegment::Index(index), value)),
            Children::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests;
