use async_trait::async_trait;
use primitives::{BlockSpan, Result, records::EvmTransaction, sources::EvmQuery};
use serde::Deserialize;
use url::Url;

use crate::graphql::GraphqlClient;

/// Maximum number of transactions the explorer returns for a single block range.
///
/// Eras with more EVM transactions than this are undercounted; the explorer
/// offers no cursor to page past the ceiling.
pub const EVM_TRANSACTION_LIMIT: usize = 10;

const TRANSACTIONS_QUERY: &str = r#"
{
  transactions(query: {AND: [{blockNumber_gte: $FROM}, {blockNumber_lte: $TO}]}, limit: $LIMIT, sortBy: BLOCKNUMBER_DESC) {
    transactionHash
    from
  }
}"#;

#[derive(Debug, Deserialize)]
struct Transactions {
    transactions: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
    transaction_hash: String,
    from: String,
}

/// Client for the EVM explorer GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct EvmExplorerClient {
    graphql: GraphqlClient,
}

impl EvmExplorerClient {
    /// Create a new explorer client authenticating with `api_key`.
    pub fn new(url: Url, api_key: impl Into<String>) -> Self {
        Self { graphql: GraphqlClient::new("evm explorer", url).with_api_key(api_key) }
    }
}

#[async_trait]
impl EvmQuery for EvmExplorerClient {
    async fn transactions(&self, span: BlockSpan) -> Result<Vec<EvmTransaction>> {
        let query = TRANSACTIONS_QUERY
            .replace("$FROM", &span.start.to_string())
            .replace("$TO", &span.end.to_string())
            .replace("$LIMIT", &EVM_TRANSACTION_LIMIT.to_string());
        let data: Transactions = self.graphql.query(&query).await?;
        Ok(data
            .transactions
            .into_iter()
            .map(|t| EvmTransaction { hash: t.transaction_hash, from: t.from })
            .collect())
    }
}
