//! Raw shapes returned by the upstream cards repository.
//!
//! Deserializing into these models is the first half of the field allow-list:
//! anything not declared here is dropped before it can reach a consumer. The
//! `From<RawCard>` conversion below is the second half, normalizing the kept
//! fields into the domain [`Card`].

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::card::{Card, CardImageUris, CardPrices};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCardImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCardPrices {
    pub usd: Option<String>,
    pub eur: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCard {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub foil: Option<bool>,
    #[serde(default)]
    pub nonfoil: Option<bool>,
    #[serde(default)]
    pub games: Option<Vec<String>>,
    #[serde(default)]
    pub prices: Option<RawCardPrices>,
    #[serde(default)]
    pub image_uris: Option<RawCardImageUris>,
    /// Upstream sends this as a string that may carry a letter suffix.
    #[serde(default)]
    pub collector_number: Option<Value>,
}

/// One page of raw search results from the upstream repository.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub total_cards: u64,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub data: Vec<RawCard>,
}

/// Parses the leading decimal digits of a collector number, e.g. `"123b"`.
fn parse_collector_number(value: &Value) -> Option<u32> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

impl From<RawCard> for Card {
    fn from(raw: RawCard) -> Self {
        let uri = match raw.uri.rfind('/') {
            Some(idx) => raw.uri[idx..].to_string(),
            None => raw.uri,
        };

        let prices = raw.prices.unwrap_or_default();
        let image_uris = raw.image_uris.unwrap_or_default();

        Self {
            id: raw.id,
            name: raw.name,
            lang: raw.lang,
            released_at: raw.released_at,
            rarity: raw.rarity,
            set_name: raw.set_name,
            uri,
            foil: raw.foil == Some(true),
            nonfoil: raw.nonfoil == Some(true),
            image_uris: CardImageUris {
                small: image_uris.small,
                normal: image_uris.normal,
                large: image_uris.large,
            },
            prices: CardPrices {
                usd: prices.usd,
                eur: prices.eur,
            },
            games: raw.games.filter(|games| !games.is_empty()),
            collector_number: raw
                .collector_number
                .as_ref()
                .and_then(parse_collector_number),
        }
    }
}
