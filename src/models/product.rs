use serde::{Deserialize, Deserializer, Serialize};

/// Product as returned by the API. `id` is assigned by the server and never edited.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub sku: String,
    #[serde(default, deserialize_with = "quantity_from_json")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "price_from_json")]
    pub price: f64,
}

impl Product {
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            sku: self.sku.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }

    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Request body for create and update (everything but `id`).
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ProductFields {
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: f64,
}

/// Responses come either wrapped as `{"data": ...}` or bare.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

// Decimal columns often come back as strings ("2.50").
fn price_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    if value < 0.0 || !value.is_finite() {
        return Err(serde::de::Error::custom(format!("invalid price {}", value)));
    }
    Ok(value)
}

fn quantity_from_json<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!("invalid quantity {}", value)));
    }
    Ok(value as u32)
}
