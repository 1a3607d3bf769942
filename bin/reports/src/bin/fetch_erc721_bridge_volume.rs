//! Count bridged ERC721 collections and tokens per era.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::Erc721BridgeVolume).await
}
