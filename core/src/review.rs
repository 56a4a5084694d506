use serde::{Deserialize, Deserializer};

/// One product review, loaded once and never mutated.
///
/// Upstream data is noisy: ratings and vote counts arrive as numbers, numeric
/// strings, empty strings or nulls depending on the export. Fields that fail to
/// parse coerce to 0 (or false) instead of failing the whole load.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    #[serde(rename = "review_id")]
    pub id: String,
    #[serde(rename = "review_text", default)]
    pub text: String,
    #[serde(rename = "review_title", default, deserialize_with = "opt_string")]
    pub title: Option<String>,
    #[serde(rename = "customer_review_rating", default, deserialize_with = "lenient_u32")]
    pub rating: u32,
    #[serde(rename = "helpful_count", default, deserialize_with = "lenient_u32")]
    pub helpful: u32,
    #[serde(rename = "out_of_helpful_count", default, deserialize_with = "lenient_u32")]
    pub out_of_helpful: u32,
    #[serde(rename = "amazon_verified_purchase", default, deserialize_with = "lenient_bool")]
    pub verified_purchase: bool,
}

impl Review {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        title: Option<&str>,
        rating: u32,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            title: title.map(|t| t.to_string()),
            rating,
            helpful: 0,
            out_of_helpful: 0,
            verified_purchase: false,
        }
    }

    /// Fraction of helpfulness votes that were positive; 0.0 when unvoted.
    pub fn helpful_ratio(&self) -> f64 {
        if self.out_of_helpful == 0 {
            0.0
        } else {
            f64::from(self.helpful) / f64::from(self.out_of_helpful)
        }
    }
}

fn opt_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let v = Option::<String>::deserialize(de)?;
    Ok(v.filter(|s| !s.is_empty()))
}

/// Accept a JSON number, numeric string, null or garbage; anything unparseable is 0.
fn lenient_u32<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let v = serde_json::Value::deserialize(de)?;
    Ok(match v {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| u32::try_from(n).unwrap_or(0))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    let v = serde_json::Value::deserialize(de)?;
    Ok(match v {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "true" | "1")
        }
        serde_json::Value::Number(n) => n.as_u64() == Some(1),
        _ => false,
    })
}
