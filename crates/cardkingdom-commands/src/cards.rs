//! Card lookups: query building, payload decoding and rendering.

use std::fmt;

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::api::CardApi;
use crate::error::QueryError;
use crate::pips;

const RESULT_HEADER: &str = "**cardkingdom-bot** — Result\n\n";

/// What to ask the card API for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardQuery {
    /// Exact lookup by unique id. Renders the full card details.
    ByUuid(String),
    /// Search by name. The string may carry raw `&set=` / `&page=` fragments.
    ByName(String),
}

impl CardQuery {
    pub fn is_single(&self) -> bool {
        matches!(self, CardQuery::ByUuid(_))
    }

    /// Query string (without the leading `?`) including the API token.
    ///
    /// The name is inserted as typed so user-supplied `&key=value`
    /// fragments become upstream query parameters. Only `#` is escaped, since
    /// it would otherwise start a URL fragment and cut off the token.
    pub fn query_string(&self, token: &str) -> String {
        match self {
            CardQuery::ByUuid(uuid) => format!("uuid={}&token={}", escape_hash(uuid), token),
            CardQuery::ByName(name) => format!("name={}&token={}", escape_hash(name), token),
        }
    }
}

fn escape_hash(value: &str) -> String {
    value.replace('#', "%23")
}

/// Top-level body returned by the card API.
#[derive(Debug, Deserialize)]
pub struct CardsPayload {
    /// Application-level status, independent of the HTTP status.
    pub status: i64,
    #[serde(default)]
    pub data: Vec<CardRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mana_cost: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub type_line: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flavor_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default)]
    pub prices: Option<Prices>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub set: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uuid: String,
}

/// Per-vendor price vectors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Prices {
    #[serde(rename = "cardkingdom.com", default)]
    pub cardkingdom: Option<Vec<Option<f64>>>,
}

impl CardRecord {
    pub fn tier_prices(&self) -> TierPrices {
        self.prices
            .as_ref()
            .and_then(|p| p.cardkingdom.as_deref())
            .map(TierPrices::from_vector)
            .unwrap_or_default()
    }
}

/// Condition-tier prices, always four values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierPrices {
    pub near_mint: f64,
    pub excellent: f64,
    pub very_good: f64,
    pub good: f64,
}

impl TierPrices {
    /// Missing or null tiers are zero; entries past the fourth are ignored.
    pub fn from_vector(values: &[Option<f64>]) -> Self {
        let tier = |i: usize| values.get(i).copied().flatten().unwrap_or(0.0);
        Self {
            near_mint: tier(0),
            excellent: tier(1),
            very_good: tier(2),
            good: tier(3),
        }
    }
}

impl fmt::Display for TierPrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nm: {:.2} | ex: {:.2} | vg: {:.2} | g: {:.2}",
            self.near_mint, self.excellent, self.very_good, self.good
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Run `query` against `api` and return chat-ready text.
///
/// Never fails: every error becomes its tagged user message.
pub async fn query_cards<A>(api: &A, query: &CardQuery) -> String
where
    A: CardApi + ?Sized,
{
    match fetch_cards(api, query).await {
        Ok(cards) => {
            debug!(count = cards.len(), single = query.is_single(), "cards received");
            pips::substitute(&render_cards(&cards, query.is_single()))
        }
        Err(e) => {
            warn!(tag = e.tag(), error = %e, "card query failed");
            e.user_message()
        }
    }
}

async fn fetch_cards<A>(api: &A, query: &CardQuery) -> Result<Vec<CardRecord>, QueryError>
where
    A: CardApi + ?Sized,
{
    let response = api.fetch(query).await?;
    if response.status != 200 {
        return Err(QueryError::Http {
            status: response.status,
        });
    }

    let payload: CardsPayload =
        serde_json::from_str(&response.body).map_err(|e| QueryError::Decode(e.to_string()))?;
    if payload.status != 200 {
        return Err(QueryError::Application {
            status: payload.status,
        });
    }

    Ok(payload.data)
}

/// Render the result header followed by one block per card, in order.
pub fn render_cards(cards: &[CardRecord], single: bool) -> String {
    let mut out = String::from(RESULT_HEADER);
    for card in cards {
        out.push_str(&render_card(card, single));
    }
    out
}

fn render_card(card: &CardRecord, single: bool) -> String {
    let mut block = format!("**{}**  {}\n_{}_", card.name, card.mana_cost, card.type_line);

    // Detail lines only for uuid lookups.
    if single {
        if !card.text.is_empty() {
            block.push('\n');
            block.push_str(&card.text);
        }
        if !card.flavor_text.is_empty() {
            block.push_str(&format!("\n_«{}»_", card.flavor_text));
        }
        if !card.image_url.is_empty() {
            block.push_str(&format!("\nimage: {}", card.image_url));
        }
    }

    block.push_str(&format!("\n`{}`", card.tier_prices()));
    block.push_str(&format!(
        "\n(set: **{}**, uuid: **{}**)\n\n",
        card.set, card.uuid
    ));
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> CardRecord {
        CardRecord {
            name: "Lightning Bolt".into(),
            mana_cost: "{R}".into(),
            type_line: "Instant".into(),
            text: "Lightning Bolt deals 3 damage to any target.".into(),
            flavor_text: "The sparkmage shrieked.".into(),
            image_url: "https://img.example/bolt.jpg".into(),
            prices: Some(Prices {
                cardkingdom: Some(vec![Some(4.99), Some(3.5), Some(2.0), Some(1.25)]),
            }),
            set: "LEA".into(),
            uuid: "x1".into(),
        }
    }

    #[test]
    fn query_string_by_uuid() {
        let q = CardQuery::ByUuid("abc-123".into());
        assert_eq!(q.query_string("tok"), "uuid=abc-123&token=tok");
        assert!(q.is_single());
    }

    #[test]
    fn query_string_passes_fragments_through() {
        let q = CardQuery::ByName("Lightning Bolt&set=LEA&page=2".into());
        assert_eq!(
            q.query_string("tok"),
            "name=Lightning Bolt&set=LEA&page=2&token=tok"
        );
        assert!(!q.is_single());
    }

    #[test]
    fn hash_in_argument_keeps_token() {
        let q = CardQuery::ByName("Bolt#2".into());
        let qs = q.query_string("tok");
        assert_eq!(qs, "name=Bolt%232&token=tok");
        assert!(!qs.contains('#'));

        let q = CardQuery::ByUuid("#x1".into());
        assert_eq!(q.query_string("tok"), "uuid=%23x1&token=tok");
    }

    #[test]
    fn single_card_block_has_details() {
        let text = render_cards(&[bolt()], true);
        assert_eq!(
            text,
            "**cardkingdom-bot** — Result\n\n\
             **Lightning Bolt**  {R}\n_Instant_\n\
             Lightning Bolt deals 3 damage to any target.\n\
             _«The sparkmage shrieked.»_\n\
             image: https://img.example/bolt.jpg\n\
             `nm: 4.99 | ex: 3.50 | vg: 2.00 | g: 1.25`\n\
             (set: **LEA**, uuid: **x1**)\n\n"
        );
    }

    #[test]
    fn search_block_omits_details() {
        let text = render_cards(&[bolt()], false);
        assert!(!text.contains("deals 3 damage"));
        assert!(!text.contains('«'));
        assert!(!text.contains("image:"));
        assert!(text.contains("`nm: 4.99 | ex: 3.50 | vg: 2.00 | g: 1.25`"));
    }

    #[test]
    fn empty_detail_fields_are_omitted() {
        let card = CardRecord {
            text: String::new(),
            flavor_text: String::new(),
            image_url: String::new(),
            ..bolt()
        };
        let text = render_cards(&[card], true);
        assert!(text.contains("_Instant_\n`nm:"));
    }

    #[test]
    fn blocks_keep_payload_order() {
        let second = CardRecord {
            name: "Shock".into(),
            uuid: "x2".into(),
            ..bolt()
        };
        let text = render_cards(&[bolt(), second], false);
        let first_at = text.find("Lightning Bolt").unwrap();
        let second_at = text.find("Shock").unwrap();
        assert!(first_at < second_at);
        assert!(text.starts_with(RESULT_HEADER));
        assert_eq!(text.matches("**cardkingdom-bot** — Result").count(), 1);
    }

    #[test]
    fn empty_result_is_header_only() {
        assert_eq!(render_cards(&[], false), RESULT_HEADER);
    }

    #[test]
    fn price_vector_variants() {
        assert_eq!(TierPrices::from_vector(&[]), TierPrices::default());
        let short = TierPrices::from_vector(&[Some(1.0), None]);
        assert_eq!(short.near_mint, 1.0);
        assert_eq!(short.excellent, 0.0);
        assert_eq!(short.good, 0.0);
        let long = TierPrices::from_vector(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
        assert_eq!(long.good, 4.0);
        assert_eq!(
            TierPrices::default().to_string(),
            "nm: 0.00 | ex: 0.00 | vg: 0.00 | g: 0.00"
        );
    }

    #[test]
    fn decodes_sparse_record() {
        let json = r#"{"status":200,"data":[{"name":"Bolt","text":null,"set":"LEA","uuid":"x1"}]}"#;
        let payload: CardsPayload = serde_json::from_str(json).unwrap();
        let card = &payload.data[0];
        assert_eq!(card.name, "Bolt");
        assert_eq!(card.text, "");
        assert_eq!(card.tier_prices(), TierPrices::default());
    }

    #[test]
    fn decodes_vendor_prices() {
        let json = r#"{"name":"Bolt","prices":{"cardkingdom.com":[1.5,null,0.5,0.25],"tcgplayer.com":[9]}}"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();
        let prices = card.tier_prices();
        assert_eq!(prices.near_mint, 1.5);
        assert_eq!(prices.excellent, 0.0);
        assert_eq!(prices.good, 0.25);
    }
}
