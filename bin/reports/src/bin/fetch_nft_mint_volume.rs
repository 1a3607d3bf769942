//! Count minted collections and tokens per era.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::NftMintVolume).await
}
