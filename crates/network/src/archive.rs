use async_trait::async_trait;
use num_bigint::BigUint;
use primitives::{
    BlockSpan, EraChangeEvent, ReportError, Result,
    records::{
        BlockActivity, BridgedMintRecord, CallRecord, ExtrinsicRecord, IssuedRecord, MintRecord,
        TransferRecord,
    },
    sources::{ArchiveQuery, EraEventLog},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::{de, graphql::GraphqlClient};

/// Event emitted when staking rewards for an era are paid, i.e. when a new era starts.
pub const ERA_CHANGE_EVENT: &str = "Staking.EraPaid";
/// Event emitted when bridged ERC20 tokens are minted.
pub const ASSETS_ISSUED_EVENT: &str = "Assets.Issued";
/// Event emitted when bridged ERC721 tokens are minted.
pub const BRIDGED_MINT_EVENT: &str = "Nft.BridgedMint";
/// Event emitted when native NFTs are minted.
pub const NFT_MINT_EVENT: &str = "Nft.Mint";

const ERA_EVENTS_QUERY: &str = r#"
{
  archive {
    event(where: {name: {_eq: "$EVENT"}}, order_by: {block_id: asc}) {
      name
      args
      block_id
    }
  }
}"#;

const SIGNED_ACTIVITY_QUERY: &str = r#"
{
  archive {
    block(where: {height: {_gte: $FROM}, _and: {height: {_lte: $TO}, extrinsics: {signature: {_is_null: false}}}}, order_by: {height: desc}) {
      height
      extrinsics {
        from: signature
        id
      }
      calls {
        name
        origin
      }
    }
  }
}"#;

const TRANSFERS_QUERY: &str = r#"
{
  balances {
    transfer(where: {block_number: {_gte: $FROM}, _and: {block_number: {_lte: $TO}}, status: {_eq: "TRANSFERRED"}}, order_by: {block_number: asc}) {
      amount
      asset_id
      status
      block_number
    }
  }
}"#;

const BRIDGE_EVENTS_QUERY: &str = r#"
{
  archive {
    block(where: {height: {_gte: $FROM}, _and: {height: {_lte: $TO}}, events: {name: {_eq: "$EVENT"}, extrinsic_id: {_is_null: true}}}) {
      id
      events {
        name
        args
      }
    }
  }
}"#;

const EVENTS_QUERY: &str = r#"
{
  archive {
    block(where: {height: {_gte: $FROM}, _and: {height: {_lte: $TO}}, events: {name: {_eq: "$EVENT"}}}) {
      id
      events {
        name
        args
      }
    }
  }
}"#;

fn scoped(template: &str, span: BlockSpan, event: &str) -> String {
    template
        .replace("$FROM", &span.start.to_string())
        .replace("$TO", &span.end.to_string())
        .replace("$EVENT", event)
}

#[derive(Debug, Deserialize)]
struct Archive<T> {
    archive: T,
}

#[derive(Debug, Deserialize)]
struct EventList {
    event: Vec<RawEraEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEraEvent {
    args: Value,
    block_id: String,
}

impl RawEraEvent {
    /// `args` is either `{ "eraIndex": n, .. }` or `[n, ..]`.
    fn era_index(&self) -> Option<u32> {
        let raw = match &self.args {
            Value::Object(map) => map.get("eraIndex"),
            Value::Array(items) => items.first(),
            _ => None,
        }?;
        match raw {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
        .and_then(|v| u32::try_from(v).ok())
    }
}

#[derive(Debug, Deserialize)]
struct BlockList<B> {
    block: Vec<B>,
}

#[derive(Debug, Deserialize)]
struct RawActivityBlock {
    #[serde(deserialize_with = "de::u64_lenient")]
    height: u64,
    #[serde(default)]
    extrinsics: Vec<RawExtrinsic>,
    #[serde(default)]
    calls: Vec<RawCall>,
}

#[derive(Debug, Deserialize)]
struct RawExtrinsic {
    #[serde(default)]
    from: Option<Value>,
}

impl RawExtrinsic {
    /// The signer address out of a signature object. Addresses show up either
    /// bare or wrapped as `{ "__kind": "Id", "value": "0x.." }`.
    fn signer(&self) -> Option<String> {
        match self.from.as_ref()?.get("address")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            wrapped => match wrapped.get("value") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => Some(wrapped.to_string()),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCall {
    #[serde(default)]
    name: String,
    #[serde(default)]
    origin: Option<Value>,
}

/// Kind of a call origin `{ "value": { "__kind": .. } }`. A present origin
/// value without a string `__kind` is rendered as raw JSON so it still counts.
fn origin_kind(origin: &Value) -> Option<String> {
    let value = origin.get("value")?;
    let empty = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    };
    if empty {
        return None;
    }
    match value.get("__kind") {
        Some(Value::String(kind)) => Some(kind.clone()),
        _ => Some(value.to_string()),
    }
}

impl From<RawActivityBlock> for BlockActivity {
    fn from(raw: RawActivityBlock) -> Self {
        Self {
            height: raw.height,
            extrinsics: raw
                .extrinsics
                .iter()
                .map(|e| ExtrinsicRecord { signer: e.signer() })
                .collect(),
            calls: raw
                .calls
                .into_iter()
                .map(|c| CallRecord {
                    origin_kind: c.origin.as_ref().and_then(origin_kind),
                    name: c.name,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Balances {
    balances: TransferList,
}

#[derive(Debug, Deserialize)]
struct TransferList {
    transfer: Vec<RawTransfer>,
}

#[derive(Debug, Deserialize)]
struct RawTransfer {
    #[serde(deserialize_with = "de::biguint")]
    amount: BigUint,
    #[serde(deserialize_with = "de::string_lenient")]
    asset_id: String,
}

#[derive(Debug, Deserialize)]
struct RawEventBlock {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssuedArgs {
    #[serde(deserialize_with = "de::u64_lenient")]
    asset_id: u64,
    #[serde(deserialize_with = "de::biguint")]
    total_supply: BigUint,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgedMintArgs {
    #[serde(deserialize_with = "de::u64_lenient")]
    collection_id: u64,
    #[serde(deserialize_with = "de::vec_u64_lenient")]
    serial_numbers: Vec<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintArgs {
    #[serde(deserialize_with = "de::u64_lenient")]
    collection_id: u64,
    #[serde(deserialize_with = "de::u64_lenient")]
    start: u64,
    #[serde(deserialize_with = "de::u64_lenient")]
    end: u64,
}

/// Client for the indexed archive GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    graphql: GraphqlClient,
}

impl ArchiveClient {
    /// Create a new archive client.
    pub fn new(url: Url) -> Self {
        Self { graphql: GraphqlClient::new("archive", url) }
    }

    /// Args of every event named `name` inside the blocks returned by `query`.
    async fn event_args<A: DeserializeOwned>(&self, query: &str, name: &str) -> Result<Vec<A>> {
        let data: Archive<BlockList<RawEventBlock>> = self.graphql.query(query).await?;
        data.archive
            .block
            .into_iter()
            .flat_map(|block| block.events)
            .filter(|event| event.name == name)
            .map(|event| {
                serde_json::from_value(event.args).map_err(|e| {
                    ReportError::query(self.graphql.name(), format!("{} args: {}", name, e))
                })
            })
            .collect()
    }
}

#[async_trait]
impl EraEventLog for ArchiveClient {
    async fn era_change_events(&self) -> Result<Vec<EraChangeEvent>> {
        let query = ERA_EVENTS_QUERY.replace("$EVENT", ERA_CHANGE_EVENT);
        let data: Archive<EventList> = self.graphql.query(&query).await?;
        data.archive
            .event
            .into_iter()
            .map(|raw| {
                let era_index = raw.era_index().ok_or_else(|| {
                    ReportError::MalformedEventData(format!(
                        "no era index in args {} at block {}",
                        raw.args, raw.block_id
                    ))
                })?;
                Ok(EraChangeEvent::new(era_index, raw.block_id))
            })
            .collect()
    }
}

#[async_trait]
impl ArchiveQuery for ArchiveClient {
    async fn signed_activity(&self, span: BlockSpan) -> Result<Vec<BlockActivity>> {
        let query = scoped(SIGNED_ACTIVITY_QUERY, span, "");
        let data: Archive<BlockList<RawActivityBlock>> = self.graphql.query(&query).await?;
        Ok(data.archive.block.into_iter().map(BlockActivity::from).collect())
    }

    async fn transfers(&self, span: BlockSpan) -> Result<Vec<TransferRecord>> {
        let query = scoped(TRANSFERS_QUERY, span, "");
        let data: Balances = self.graphql.query(&query).await?;
        Ok(data
            .balances
            .transfer
            .into_iter()
            .map(|t| TransferRecord { asset_id: t.asset_id, amount: t.amount })
            .collect())
    }

    async fn bridged_issuances(&self, span: BlockSpan) -> Result<Vec<IssuedRecord>> {
        let query = scoped(BRIDGE_EVENTS_QUERY, span, ASSETS_ISSUED_EVENT);
        let args: Vec<IssuedArgs> = self.event_args(&query, ASSETS_ISSUED_EVENT).await?;
        Ok(args
            .into_iter()
            .map(|a| IssuedRecord { asset_id: a.asset_id, total_supply: a.total_supply })
            .collect())
    }

    async fn bridged_mints(&self, span: BlockSpan) -> Result<Vec<BridgedMintRecord>> {
        let query = scoped(BRIDGE_EVENTS_QUERY, span, BRIDGED_MINT_EVENT);
        let args: Vec<BridgedMintArgs> = self.event_args(&query, BRIDGED_MINT_EVENT).await?;
        Ok(args
            .into_iter()
            .map(|a| BridgedMintRecord {
                collection_id: a.collection_id,
                serial_numbers: a.serial_numbers,
            })
            .collect())
    }

    async fn nft_mints(&self, span: BlockSpan) -> Result<Vec<MintRecord>> {
        let query = scoped(EVENTS_QUERY, span, NFT_MINT_EVENT);
        let args: Vec<MintArgs> = self.event_args(&query, NFT_MINT_EVENT).await?;
        Ok(args
            .into_iter()
            .map(|a| MintRecord { collection_id: a.collection_id, start: a.start, end: a.end })
            .collect())
    }
}
