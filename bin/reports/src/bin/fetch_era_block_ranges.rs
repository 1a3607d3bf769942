//! Resolve era block ranges and write the range table.
use reports::Job;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    reports::launch(Job::EraBlockRanges).await
}
