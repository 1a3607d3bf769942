//! Read total stake and stakers per era.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::StakingVolume).await
}
