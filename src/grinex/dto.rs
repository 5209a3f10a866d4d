use serde::{
    Deserialize,
    Deserializer,
};



/// Deserialized response of Grinex `/api/v2/depth` endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DepthResponse {
    pub timestamp: i64,
    pub asks: Vec<DecodedOrder>,
    pub bids: Vec<DecodedOrder>,
}



/// Single order book level as returned by Grinex.
///
/// Grinex encodes numbers as JSON strings, but we also accept plain JSON
/// numbers. Those go through f64, so the last significant digit may differ
/// from what exchange has in its books. String encoded values are kept
/// verbatim.
///
/// Only `price` is required. Missing `volume`, `amount`, `factor` or `type`
/// become empty strings rather than "0", so an absent value can not be
/// mistaken for a real zero. Nothing downstream reads them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DecodedOrder {
    #[serde(deserialize_with = "decimal")]
    pub price: String,

    #[serde(default, deserialize_with = "decimal")]
    pub volume: String,

    #[serde(default, deserialize_with = "decimal")]
    pub amount: String,

    #[serde(default, deserialize_with = "decimal")]
    pub factor: String,

    #[serde(default, rename(deserialize = "type"))]
    pub kind: String,
}



fn decimal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(val) => val,
        Raw::Number(val) => val.to_string(),
    })
}
