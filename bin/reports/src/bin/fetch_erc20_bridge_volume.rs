//! Sum bridged ERC20 deposits per era.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::Erc20BridgeVolume).await
}
