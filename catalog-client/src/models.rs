//! Wire types for the product catalog REST API.
//!
//! Backends differ in how they serialise keys and decimal columns (an integer
//! `id`, a `"9.99"` price string), so the deserialisers here accept either
//! representation and normalise to one Rust type.

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Backend-assigned product identifier.
///
/// Held as text so integer and string keys compare the same way; the value is
/// only ever echoed back in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Int(id) => Ok(Self::from(id)),
            RawId::Text(id) if id.trim().is_empty() => {
                Err(de::Error::custom("product id must not be empty"))
            }
            RawId::Text(id) => Ok(Self(id)),
        }
    }
}

/// Product price as the backend sent it.
///
/// The amount drives validation and request bodies. The text is what gets
/// shown, so a `"120.50"` from a decimal column keeps its trailing zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    amount: f64,
    text: String,
}

impl Price {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self {
            amount,
            text: amount.to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Number(f64),
            Text(String),
        }

        match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(amount) => Ok(Self::from(amount)),
            RawPrice::Text(text) => {
                let text = text.trim().to_string();
                let amount: f64 = text.parse().map_err(de::Error::custom)?;
                if !amount.is_finite() {
                    return Err(de::Error::custom(format!("price is not finite: {text}")));
                }
                Ok(Self { amount, text })
            }
        }
    }
}

/// A catalog item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    pub price: Price,
    #[serde(deserialize_with = "number_or_string")]
    pub stock: i64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Body sent on create (`POST /products`) and update (`PATCH /products/{id}`).
///
/// `description` and `image` go out as plain strings, empty when blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub image: String,
}

/// `{ "product": { ... } }` wrapper returned by create and update.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: Product,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        Text(String),
    }

    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}
