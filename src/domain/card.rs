use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image links kept for API consumers. Only the three sizes the UI renders.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CardImageUris {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

/// Prices kept for API consumers, limited to the two displayed currencies.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CardPrices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eur: Option<String>,
}

/// A single trading card as exposed by the search API.
///
/// This is the projected form of the upstream record: only the allow-listed
/// fields survive, `uri` is trimmed to its last path segment and
/// `collector_number` is parsed to an integer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub uri: String,
    pub foil: bool,
    pub nonfoil: bool,
    #[serde(default)]
    pub image_uris: CardImageUris,
    #[serde(default)]
    pub prices: CardPrices,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<u32>,
}
