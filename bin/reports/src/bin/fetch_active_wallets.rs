//! Count active wallets and transactions per era.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::ActiveWallets).await
}
