//! Sum transfer volume per asset per era.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::TransfersVolume).await
}
