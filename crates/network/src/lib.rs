//! GraphQL clients for the indexed archive and the EVM explorer.
#![allow(clippy::uninlined_format_args)]

/// Indexed archive (Hasura) queries
pub mod archive;
/// Lenient deserializers for numeric fields
mod de;
/// EVM explorer queries
pub mod explorer;
/// Minimal GraphQL over HTTP client
pub mod graphql;

pub use archive::ArchiveClient;
pub use explorer::{EVM_TRANSACTION_LIMIT, EvmExplorerClient};
pub use graphql::GraphqlClient;
