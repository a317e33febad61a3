use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// A GraphQL argument value.
///
/// String literals, enum literals, and variable references are distinct
/// variants: `String` holds unescaped content, `Enum` holds the bare token
/// text, and `Variable` holds the variable name without its `$` sigil. The
/// renderer re-applies quoting and sigils.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ArgValue {
    /// A `$name` variable reference (name stored without the sigil).
    Variable(String),
    Int(i64),
    Float(f64),
    /// A string literal's unescaped content.
    String(String),
    Boolean(bool),
    Null,
    /// A bare enum literal.
    Enum(String),
    /// An ordered list of values.
    List(Vec<ArgValue>),
    /// An input object; insertion order is rendering order.
    Object(IndexMap<String, ArgValue>),
}

impl ArgValue {
    /// Builds a [`ArgValue::Variable`], accepting the name with or without
    /// its leading `$`.
    pub fn variable(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        ArgValue::Variable(name.strip_prefix('$').unwrap_or(name).to_string())
    }

    /// Builds an [`ArgValue::Enum`] from bare token text.
    pub fn enum_value(name: impl Into<String>) -> Self {
        ArgValue::Enum(name.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Boolean(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(values: Vec<T>) -> Self {
        ArgValue::List(values.into_iter().map(Into::into).collect())
    }
}
