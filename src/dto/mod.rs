use serde::{Deserialize, Deserializer, de};

pub mod orders;
pub mod products;
pub mod users;

/// Accepts an id sent either as a JSON number or as a numeric string.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i32),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse::<i32>()
            .map_err(|_| de::Error::custom(format!("invalid id `{text}`"))),
    }
}
