//! # Query Parameters
//!
//! Typed query-string parameters for CoinGecko requests.
//!
//! Entries whose value is null or an empty string are skipped when the query
//! string is built, so callers can pass optional filters without branching.
//! Keys are emitted in sorted order and both keys and values are
//! percent-encoded.
//!
//! ```rust
//! use lib_coingecko::QueryParams;
//!
//! let params = QueryParams::new()
//!     .with("vs_currency", "usd")
//!     .with("page", 2)
//!     .with("category", None::<&str>)
//!     .with("order", "");
//!
//! assert_eq!(params.to_query_string(), "page=2&vs_currency=usd");
//! ```

use std::collections::BTreeMap;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    /// Whether this value survives serialization.
    pub fn is_present(&self) -> bool {
        match self {
            ParamValue::Null => false,
            ParamValue::Text(text) => !text.is_empty(),
            _ => true,
        }
    }

    fn render(&self) -> String {
        match self {
            ParamValue::Null => String::new(),
            ParamValue::Text(text) => text.clone(),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::Float(n) => n.to_string(),
            ParamValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

macro_rules! integer_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Integer(value as i64)
                }
            }
        )*
    };
}

integer_param!(i32, i64, u8, u16, u32);

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Null)
    }
}

/// Name → value mapping serialized into a request's query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Entries that will be serialized, in key order.
    pub fn present(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .iter()
            .filter(|(_, value)| value.is_present())
            .map(|(key, value)| (key.as_str(), value.render()))
    }

    /// True when nothing would be serialized.
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Serialize to `a=1&b=2` form, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.present()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(&value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
