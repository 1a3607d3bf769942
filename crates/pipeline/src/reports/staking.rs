use std::time::Duration;

use async_trait::async_trait;
use num_bigint::BigUint;
use primitives::{
    EraBlockRange, Result,
    assets::Asset,
    records::StakingSnapshot,
    reduce::count_stakers,
    sources::StakingQuery,
    units::{Precision, scale_down},
};
use tables::ReportFile;

use crate::{EraReport, job::SNAPSHOT_THROTTLE};

/// Stake and stakers of one era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakingMetrics {
    /// Total stake in base units
    pub total_stake: u128,
    /// Active validators plus their nominators
    pub stakers: usize,
}

/// Total stake and stakers per era, read from node state at the end of each era.
#[derive(Debug, Clone)]
pub struct StakingVolume<S> {
    staking: S,
}

impl<S> StakingVolume<S> {
    /// Report over `staking` snapshots.
    pub const fn new(staking: S) -> Self {
        Self { staking }
    }
}

#[async_trait]
impl<S: StakingQuery> EraReport for StakingVolume<S> {
    type Records = StakingSnapshot;
    type Metrics = StakingMetrics;

    const FILE: ReportFile = ReportFile::StakingVolume;
    const COLUMNS: &'static [&'static str] = &["Total Stake", "Total Stakers"];
    const THROTTLE: Duration = SNAPSHOT_THROTTLE;

    async fn query(&self, range: &EraBlockRange) -> Result<StakingSnapshot> {
        self.staking.staking_snapshot(&range.block_end_hash, range.era_index).await
    }

    fn reduce(&self, snapshot: StakingSnapshot) -> StakingMetrics {
        StakingMetrics {
            total_stake: snapshot.total_stake,
            stakers: count_stakers(&snapshot.exposures),
        }
    }

    fn shape(&self, metrics: StakingMetrics) -> Vec<String> {
        let stake = BigUint::from(metrics.total_stake);
        vec![scale_down(&stake, Asset::Root.decimals(), Precision::Full), metrics.stakers.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AggregationJob,
        reports::fakes::{FakeStaking, range},
    };
    use primitives::records::ValidatorExposure;
    use tokio::time::Instant;

    #[test]
    fn validator_without_own_stake_adds_no_stakers() {
        let report = StakingVolume::new(FakeStaking::default());
        let metrics = report.reduce(StakingSnapshot {
            total_stake: 2_000_000,
            exposures: vec![
                ValidatorExposure { own: 0, nominators: 2 },
                ValidatorExposure { own: 1_000_000, nominators: 3 },
            ],
        });
        assert_eq!(metrics, StakingMetrics { total_stake: 2_000_000, stakers: 4 });
        assert_eq!(report.shape(metrics), vec!["2", "4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn snapshots_are_taken_at_the_era_end_hash() {
        let era = range(7, 700, 799);
        let mut staking = FakeStaking::default();
        staking.0.insert((era.block_end_hash.clone(), 7), StakingSnapshot {
            total_stake: 12_345_678,
            exposures: vec![ValidatorExposure { own: 5, nominators: 0 }],
        });

        let rows = AggregationJob::new(StakingVolume::new(staking)).run(&[era]).await.unwrap();
        assert_eq!(rows[0].metrics, vec!["12.345678", "1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_a_full_second_between_eras() {
        let started = Instant::now();
        AggregationJob::new(StakingVolume::new(FakeStaking::default()))
            .run(&[range(1, 0, 9), range(2, 10, 19), range(3, 20, 29)])
            .await
            .unwrap();
        assert!(started.elapsed() >= 2 * SNAPSHOT_THROTTLE);
    }
}
