//! Reductions from raw records to era metrics.
use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
    hash::Hash,
};

use num_bigint::BigUint;
use tracing::warn;

use crate::records::{BridgedMintRecord, MintRecord, ValidatorExposure};

/// Number of distinct actors in a single address space.
pub fn distinct_actors<I, A>(actors: I) -> usize
where
    I: IntoIterator<Item = A>,
    A: Eq + Hash,
{
    actors.into_iter().collect::<HashSet<_>>().len()
}

/// Distinct actor count over two disjoint address spaces.
///
/// The spaces are never reconciled: the same string in both counts twice.
pub fn distinct_actors_across<N, E, A, B>(native: N, evm: E) -> usize
where
    N: IntoIterator<Item = A>,
    E: IntoIterator<Item = B>,
    A: Eq + Hash,
    B: Eq + Hash,
{
    distinct_actors(native) + distinct_actors(evm)
}

/// Per bucket sums of big integer amounts.
///
/// Records whose discriminator maps to no bucket are dropped and logged.
#[derive(Debug, Clone)]
pub struct TypedSum<B: Ord> {
    totals: BTreeMap<B, BigUint>,
    dropped: usize,
}

impl<B: Ord + Copy> TypedSum<B> {
    /// Start with every bucket in `buckets` at zero.
    pub fn new(buckets: impl IntoIterator<Item = B>) -> Self {
        Self { totals: buckets.into_iter().map(|b| (b, BigUint::default())).collect(), dropped: 0 }
    }

    /// Sum `records`, classifying each discriminator with `classify`.
    pub fn from_records<D, I, F>(buckets: impl IntoIterator<Item = B>, records: I, classify: F) -> Self
    where
        D: Display,
        I: IntoIterator<Item = (D, BigUint)>,
        F: Fn(&D) -> Option<B>,
    {
        let mut sum = Self::new(buckets);
        for (discriminator, amount) in records {
            match classify(&discriminator) {
                Some(bucket) => sum.add(bucket, &amount),
                None => sum.drop_unrecognized(&discriminator, &amount),
            }
        }
        sum
    }

    /// Add `amount` to `bucket`. Unknown buckets are dropped.
    pub fn add(&mut self, bucket: B, amount: &BigUint) {
        match self.totals.get_mut(&bucket) {
            Some(total) => *total += amount,
            None => self.dropped += 1,
        }
    }

    fn drop_unrecognized<D: Display>(&mut self, discriminator: &D, amount: &BigUint) {
        warn!(discriminator = %discriminator, amount = %amount, "Dropping record with unrecognized discriminator");
        self.dropped += 1;
    }

    /// Total of `bucket`, zero when it was never tracked.
    pub fn total(&self, bucket: B) -> BigUint {
        self.totals.get(&bucket).cloned().unwrap_or_default()
    }

    /// Number of records that were dropped.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Something that adds items to a collection.
pub trait CollectionItems {
    /// Collection the items belong to.
    fn collection_id(&self) -> u64;
    /// Number of items contributed.
    fn item_count(&self) -> u128;
}

impl CollectionItems for BridgedMintRecord {
    fn collection_id(&self) -> u64 {
        self.collection_id
    }

    fn item_count(&self) -> u128 {
        self.serial_numbers.len() as u128
    }
}

impl CollectionItems for MintRecord {
    fn collection_id(&self) -> u64 {
        self.collection_id
    }

    fn item_count(&self) -> u128 {
        if self.end < self.start {
            warn!(
                collection_id = self.collection_id,
                start = self.start,
                end = self.end,
                "Mint range ends before it starts, counting no items"
            );
            return 0;
        }
        u128::from(self.end - self.start) + 1
    }
}

/// Distinct collections touched and the total number of items across them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionTally {
    collections: HashSet<u64>,
    items: u128,
}

impl CollectionTally {
    /// Tally every record.
    pub fn from_records<'a, R, I>(records: I) -> Self
    where
        R: CollectionItems + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut tally = Self::default();
        for record in records {
            tally.add(record);
        }
        tally
    }

    /// Add one record.
    pub fn add<R: CollectionItems + ?Sized>(&mut self, record: &R) {
        self.collections.insert(record.collection_id());
        self.items = self.items.saturating_add(record.item_count());
    }

    /// Number of distinct collections.
    pub fn collections(&self) -> usize {
        self.collections.len()
    }

    /// Total number of items.
    pub const fn items(&self) -> u128 {
        self.items
    }
}

/// Stakers of an era: each validator with a non-empty own stake counts itself
/// plus its nominators. A validator with no own stake counts nothing.
pub fn count_stakers<'a, I>(exposures: I) -> usize
where
    I: IntoIterator<Item = &'a ValidatorExposure>,
{
    exposures.into_iter().filter(|e| e.own > 0).map(|e| 1 + e.nominators).sum()
}
