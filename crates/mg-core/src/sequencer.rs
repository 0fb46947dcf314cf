//! Shuffle sequencer: walks the catalog in a random order without repeats.
//!
//! Each cycle is a Fisher–Yates permutation of the catalog indices. When a
//! cycle is exhausted the next request generates a fresh permutation. The
//! last pick of one cycle may equal the first pick of the next; repeats are
//! only ruled out within a cycle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::descriptor::MicrogameDescriptor;
use crate::error::{CatalogError, CoreResult};

/// Randomized traversal state over an owned catalog.
#[derive(Debug, Clone)]
pub struct Sequencer {
    catalog: Catalog,
    order: Vec<usize>,
    cursor: usize,
    cycles: u64,
    rng: StdRng,
}

impl Sequencer {
    /// Create a sequencer with a seeded RNG.
    ///
    /// No permutation is generated yet; the first [`next`](Self::next) or an
    /// explicit [`reshuffle`](Self::reshuffle) produces one.
    pub fn new(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    /// Create a sequencer driven by an existing RNG.
    pub fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        Self {
            catalog,
            order: Vec::new(),
            cursor: 0,
            cycles: 0,
            rng,
        }
    }

    /// Generate a fresh uniform permutation and rewind the cursor.
    pub fn reshuffle(&mut self) -> CoreResult<()> {
        if self.catalog.is_empty() {
            return Err(CatalogError::Empty);
        }

        let n = self.catalog.len();
        self.order.clear();
        self.order.extend(0..n);
        for i in 0..n {
            let j = self.rng.random_range(i..n);
            self.order.swap(i, j);
        }

        self.cursor = 0;
        self.cycles += 1;
        tracing::debug!(cycle = self.cycles, microgames = n, "reshuffled play order");
        Ok(())
    }

    /// Catalog index at the cursor, advancing past it.
    ///
    /// Reshuffles first when the current cycle is exhausted.
    pub fn next_index(&mut self) -> CoreResult<usize> {
        if self.cursor >= self.order.len() {
            self.reshuffle()?;
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        Ok(index)
    }

    /// Descriptor at the cursor, advancing past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> CoreResult<&MicrogameDescriptor> {
        let index = self.next_index()?;
        self.catalog.get(index).ok_or(CatalogError::Empty)
    }

    /// Descriptor the next call to [`next`](Self::next) would return, if the
    /// current cycle is not yet exhausted.
    pub fn peek(&self) -> Option<&MicrogameDescriptor> {
        self.order
            .get(self.cursor)
            .and_then(|&i| self.catalog.get(i))
    }

    /// The catalog being sequenced.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current permutation of catalog indices (empty before the first shuffle).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Position of the next pick within the current permutation.
    ///
    /// Equal to the permutation length once a cycle is exhausted; the next
    /// pick then starts a new cycle at 0.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of permutations generated so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn catalog_of(n: usize) -> Catalog {
        Catalog::new(
            (0..n)
                .map(|i| MicrogameDescriptor::new(format!("Game{i}"), "Go!", 3.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_catalog_fails_to_reshuffle() {
        let mut seq = Sequencer::new(Catalog::default(), 42);
        assert!(matches!(seq.reshuffle(), Err(CatalogError::Empty)));
        assert!(matches!(seq.next(), Err(CatalogError::Empty)));
        assert_eq!(seq.cycles(), 0);
    }

    #[test]
    fn reshuffle_resets_cursor() {
        let mut seq = Sequencer::new(catalog_of(4), 1);
        seq.next().unwrap();
        seq.next().unwrap();
        assert_eq!(seq.cursor(), 2);
        seq.reshuffle().unwrap();
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.order().len(), 4);
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = Sequencer::new(catalog_of(8), 7);
        let mut b = Sequencer::new(catalog_of(8), 7);
        let picks_a: Vec<usize> = (0..20).map(|_| a.next_index().unwrap()).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.next_index().unwrap()).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn peek_matches_next() {
        let mut seq = Sequencer::new(catalog_of(3), 9);
        seq.reshuffle().unwrap();
        let peeked = seq.peek().unwrap().scene.clone();
        assert_eq!(seq.next().unwrap().scene, peeked);
    }

    #[test]
    fn peek_is_none_when_cycle_exhausted() {
        let mut seq = Sequencer::new(catalog_of(1), 9);
        seq.next().unwrap();
        assert!(seq.peek().is_none());
    }

    #[test]
    fn single_entry_repeats_across_cycles() {
        let mut seq = Sequencer::new(catalog_of(1), 3);
        for _ in 0..5 {
            assert_eq!(seq.next().unwrap().scene, "Game0");
        }
        assert_eq!(seq.cycles(), 5);
    }

    #[test]
    fn every_position_reachable() {
        // Over many seeds each index should show up first at least once.
        let mut firsts = HashSet::new();
        for seed in 0..200 {
            let mut seq = Sequencer::new(catalog_of(4), seed);
            firsts.insert(seq.next_index().unwrap());
        }
        assert_eq!(firsts.len(), 4);
    }

    proptest! {
        #[test]
        fn full_cycle_is_a_permutation(n in 1usize..24, seed in any::<u64>()) {
            let mut seq = Sequencer::new(catalog_of(n), seed);
            let mut seen = HashSet::new();
            for _ in 0..n {
                prop_assert!(seen.insert(seq.next_index().unwrap()));
            }
            prop_assert_eq!(seen.len(), n);
            prop_assert_eq!(seq.cycles(), 1);

            seq.next_index().unwrap();
            prop_assert_eq!(seq.cycles(), 2);
            prop_assert_eq!(seq.cursor(), 1);
        }
    }
}
