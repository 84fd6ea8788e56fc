//! # Named-Value Sets
//!
//! Ordered, case-insensitive property sets with typed values. Items carry two
//! of them (application and system properties) and the settings tracker uses
//! one per application.
//!
//! ## Text Form
//!
//! ```text
//! name/type=value|name/type=value
//! ```
//!
//! Reserved characters (`% | / = :` and line breaks) inside names and values
//! are written as `%XX`. Every array element is terminated by `:`, so an
//! empty array (``) and an array holding one empty string (`:`) differ.

use crate::errors::NamedValueError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const SEP_LIST: char = '|';
const SEP_TYPE: char = '/';
const SEP_PAIR: char = '=';
const SEP_ELEM: char = ':';
const ESC_CHAR: char = '%';

fn is_reserved(ch: char) -> bool {
    matches!(ch, ESC_CHAR | SEP_LIST | SEP_TYPE | SEP_PAIR | SEP_ELEM | '\r' | '\n')
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_reserved(ch) {
            out.push(ESC_CHAR);
            out.push_str(&format!("{:02X}", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

fn unescape(text: &str) -> Result<String, NamedValueError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != ESC_CHAR {
            out.push(ch);
            continue;
        }
        let hex: String = chars.by_ref().take(2).collect();
        let code = if hex.len() == 2 {
            u8::from_str_radix(&hex, 16).ok()
        } else {
            None
        };
        match code {
            Some(code) => out.push(char::from(code)),
            None => return Err(NamedValueError::BadEscape(text.to_string())),
        }
    }
    Ok(out)
}

// =============================================================================
// VALUES
// =============================================================================

/// The type of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `bool`
    Bool,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `f64`
    Double,
    /// `String`
    Text,
    /// `Uuid`
    Guid,
    /// UTC timestamp
    DateTime,
    /// `Vec<String>`
    TextArray,
}

impl ValueType {
    /// Type tag used in the text form.
    pub fn tag(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Double => "double",
            ValueType::Text => "string",
            ValueType::Guid => "guid",
            ValueType::DateTime => "datetime",
            ValueType::TextArray => "string[]",
        }
    }

    /// Resolve a type tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Some(ValueType::Bool),
            "int32" | "int" => Some(ValueType::Int32),
            "int64" | "long" => Some(ValueType::Int64),
            "double" => Some(ValueType::Double),
            "string" => Some(ValueType::Text),
            "guid" => Some(ValueType::Guid),
            "datetime" | "datetimeoffset" => Some(ValueType::DateTime),
            "string[]" => Some(ValueType::TextArray),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Floating point number.
    Double(f64),
    /// Free text.
    Text(String),
    /// 128-bit identifier.
    Guid(Uuid),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// List of strings.
    TextArray(Vec<String>),
}

impl Value {
    /// The type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Double(_) => ValueType::Double,
            Value::Text(_) => ValueType::Text,
            Value::Guid(_) => ValueType::Guid,
            Value::DateTime(_) => ValueType::DateTime,
            Value::TextArray(_) => ValueType::TextArray,
        }
    }

    fn to_plain_text(&self) -> String {
        match self {
            Value::Bool(v) => v.to_string(),
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            Value::Text(v) => v.clone(),
            Value::Guid(v) => v.to_string(),
            Value::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::TextArray(v) => v.join(","),
        }
    }

    fn to_escaped_text(&self) -> String {
        match self {
            Value::TextArray(elems) => elems.iter().fold(String::new(), |mut out, e| {
                out.push_str(&escape(e));
                out.push(SEP_ELEM);
                out
            }),
            other => escape(&other.to_plain_text()),
        }
    }

    fn parse(name: &str, value_type: ValueType, text: &str) -> Result<Self, NamedValueError> {
        let bad = || NamedValueError::BadValue {
            name: name.to_string(),
            type_name: value_type.tag().to_string(),
            text: text.to_string(),
        };
        if value_type == ValueType::TextArray {
            let elems = text
                .split_terminator(SEP_ELEM)
                .map(unescape)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Value::TextArray(elems));
        }
        let plain = unescape(text)?;
        let value = match value_type {
            ValueType::Bool => Value::Bool(plain.trim().to_ascii_lowercase().parse().map_err(|_| bad())?),
            ValueType::Int32 => Value::Int32(plain.trim().parse().map_err(|_| bad())?),
            ValueType::Int64 => Value::Int64(plain.trim().parse().map_err(|_| bad())?),
            ValueType::Double => Value::Double(plain.trim().parse().map_err(|_| bad())?),
            ValueType::Text => Value::Text(plain),
            ValueType::Guid => Value::Guid(Uuid::parse_str(plain.trim()).map_err(|_| bad())?),
            ValueType::DateTime => Value::DateTime(
                DateTime::parse_from_rfc3339(plain.trim())
                    .map_err(|_| bad())?
                    .with_timezone(&Utc),
            ),
            ValueType::TextArray => unreachable!("handled above"),
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_text())
    }
}

/// Rust types that can be stored in a `NamedValueSet`.
pub trait NamedValueType: Sized {
    /// The stored type tag for this Rust type.
    const VALUE_TYPE: ValueType;

    /// Wrap into a `Value`.
    fn into_value(self) -> Value;

    /// Extract from a `Value`; `None` when the stored type differs.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_named_value_type {
    ($ty:ty, $variant:ident, $value_type:ident) => {
        impl NamedValueType for $ty {
            const VALUE_TYPE: ValueType = ValueType::$value_type;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_named_value_type!(bool, Bool, Bool);
impl_named_value_type!(i32, Int32, Int32);
impl_named_value_type!(i64, Int64, Int64);
impl_named_value_type!(f64, Double, Double);
impl_named_value_type!(String, Text, Text);
impl_named_value_type!(Uuid, Guid, Guid);
impl_named_value_type!(DateTime<Utc>, DateTime, DateTime);
impl_named_value_type!(Vec<String>, TextArray, TextArray);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

// =============================================================================
// NAMED VALUE
// =============================================================================

/// A single `name → value` pair. The name keeps its original spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    name: String,
    value: Value,
}

impl NamedValue {
    /// Create a named value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The name as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Text form: `name/type=value`.
    pub fn serialise(&self) -> String {
        format!(
            "{}{}{}{}{}",
            escape(&self.name),
            SEP_TYPE,
            self.value.value_type().tag(),
            SEP_PAIR,
            self.value.to_escaped_text()
        )
    }
}

impl fmt::Display for NamedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}={}", self.name, self.value.value_type(), self.value)
    }
}

impl FromStr for NamedValue {
    type Err = NamedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, value_text) = s
            .split_once(SEP_PAIR)
            .ok_or_else(|| NamedValueError::Malformed(s.to_string()))?;
        let (raw_name, type_tag) = head
            .split_once(SEP_TYPE)
            .ok_or_else(|| NamedValueError::Malformed(s.to_string()))?;
        let name = unescape(raw_name.trim())?;
        if name.trim().is_empty() {
            return Err(NamedValueError::InvalidName(name));
        }
        let value_type =
            ValueType::from_tag(type_tag.trim()).ok_or_else(|| NamedValueError::UnknownType {
                name: name.clone(),
                type_name: type_tag.trim().to_string(),
            })?;
        let value = Value::parse(&name, value_type, value_text)?;
        Ok(Self { name, value })
    }
}

// =============================================================================
// NAMED VALUE SET
// =============================================================================

/// An ordered, case-insensitive set of named values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NamedValueSet {
    /// Lower-cased name → value.
    values: BTreeMap<String, NamedValue>,
}

impl NamedValueSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_lowercase()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the set has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when a value with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&Self::key(name))
    }

    /// The named value, if present.
    pub fn get(&self, name: &str) -> Option<&NamedValue> {
        self.values.get(&Self::key(name))
    }

    /// The raw value, if present.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(NamedValue::value)
    }

    /// The stored type of a value, if present.
    pub fn value_type(&self, name: &str) -> Option<ValueType> {
        self.value(name).map(Value::value_type)
    }

    /// Typed lookup. Absent values and values of another type both yield `None`.
    pub fn get_value<T: NamedValueType>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(T::from_value)
    }

    /// Typed lookup with a fallback.
    pub fn get_value_or<T: NamedValueType>(&self, name: &str, default: T) -> T {
        self.get_value(name).unwrap_or(default)
    }

    /// Insert or replace a value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.set_named(NamedValue::new(name, value));
    }

    /// Insert or replace a named value.
    pub fn set_named(&mut self, nv: NamedValue) {
        self.values.insert(Self::key(&nv.name), nv);
    }

    /// Remove a value, returning it.
    pub fn remove(&mut self, name: &str) -> Option<NamedValue> {
        self.values.remove(&Self::key(name))
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Overlay `other` onto this set; values in `other` win.
    pub fn merge(&mut self, other: &NamedValueSet) {
        for nv in other.iter() {
            self.set_named(nv.clone());
        }
    }

    /// A new set holding `self` overlaid with `other`.
    #[must_use]
    pub fn merged(&self, other: &NamedValueSet) -> NamedValueSet {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Values in key order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedValue> {
        self.values.values()
    }

    /// Names (original spelling) in key order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|nv| nv.name.clone()).collect()
    }

    /// Serialise to the text form.
    pub fn serialise(&self) -> String {
        self.iter()
            .map(NamedValue::serialise)
            .collect::<Vec<_>>()
            .join(&SEP_LIST.to_string())
    }

    /// Length of the serialised text form, in characters.
    pub fn serialised_len(&self) -> usize {
        self.serialise().chars().count()
    }

    /// Parse the text form. Blank entries and line breaks are ignored.
    pub fn parse(text: &str) -> Result<Self, NamedValueError> {
        let mut set = NamedValueSet::new();
        for part in text.split(|c| c == SEP_LIST || c == '\r' || c == '\n') {
            if part.trim().is_empty() {
                continue;
            }
            set.set_named(part.parse()?);
        }
        Ok(set)
    }
}

impl fmt::Display for NamedValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialise())
    }
}

impl FromStr for NamedValueSet {
    type Err = NamedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NamedValueSet> for String {
    fn from(set: NamedValueSet) -> Self {
        set.serialise()
    }
}

impl TryFrom<String> for NamedValueSet {
    type Error = NamedValueError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl FromIterator<NamedValue> for NamedValueSet {
    fn from_iter<I: IntoIterator<Item = NamedValue>>(iter: I) -> Self {
        let mut set = NamedValueSet::new();
        for nv in iter {
            set.set_named(nv);
        }
        set
    }
}
