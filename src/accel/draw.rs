// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Per-row draws without replacement.
use std::{fmt, mem::MaybeUninit, str::FromStr};

use ndarray::ArrayViewMut1;
use rand::{distr::Open01, seq::index, Rng};

use crate::{errors::SampleError, source::Population};

/// Algorithm used to pick the unique positions in each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawStrategy {
    /// Partial Fisher-Yates shuffle of a position buffer.
    #[default]
    Shuffle,
    /// Reservoir sampling (Algorithm R), followed by a shuffle of the picks.
    Reservoir,
}

impl FromStr for DrawStrategy {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<DrawStrategy, SampleError> {
        match s {
            "shuffle" => Ok(DrawStrategy::Shuffle),
            "reservoir" => Ok(DrawStrategy::Reservoir),
            _ => Err(SampleError::invalid(format!(
                "unknown draw strategy {:?} (expected \"shuffle\" or \"reservoir\")",
                s
            ))),
        }
    }
}

impl fmt::Display for DrawStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStrategy::Shuffle => f.write_str("shuffle"),
            DrawStrategy::Reservoir => f.write_str("reservoir"),
        }
    }
}

/// Draws denser than `1 / DENSE_FACTOR` of the population use the reusable
/// position buffer; sparser draws never touch memory proportional to `n`.
const DENSE_FACTOR: usize = 8;

/// Draws unique positions for one row at a time.
///
/// A drawer owns its scratch space, so each worker thread needs its own;
/// reusing one drawer across rows avoids reallocating per row. The positions
/// drawn depend only on the generator and the row shape, never on the rows
/// the drawer handled before.
pub struct RowDrawer {
    strategy: DrawStrategy,
    /// Identity permutation of `0..n` between draws.
    perm: Vec<usize>,
    swaps: Vec<usize>,
    picks: Vec<usize>,
}

impl RowDrawer {
    pub fn new(strategy: DrawStrategy) -> RowDrawer {
        RowDrawer {
            strategy,
            perm: Vec::new(),
            swaps: Vec::new(),
            picks: Vec::new(),
        }
    }

    pub fn strategy(&self) -> DrawStrategy {
        self.strategy
    }

    /// Pick `k` distinct positions out of `0..n`, in draw order.
    ///
    /// # Panics
    ///
    /// Panics if `k > n`.
    pub fn draw_positions<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        n: usize,
        k: usize,
    ) -> &[usize] {
        assert!(k <= n, "cannot draw {} unique positions from {}", k, n);
        self.picks.clear();
        if k == 0 {
            return &self.picks;
        }
        match self.strategy {
            DrawStrategy::Shuffle if n <= k.saturating_mul(DENSE_FACTOR) => {
                self.shuffle_dense(rng, n, k)
            }
            DrawStrategy::Shuffle => self.sample_sparse(rng, n, k),
            DrawStrategy::Reservoir => self.reservoir(rng, n, k),
        }
        &self.picks
    }

    /// Fill `out` with distinct draws from `pop`, one per slot.
    ///
    /// # Panics
    ///
    /// Panics if `out` is longer than `pop`.
    pub fn fill_row<P, R>(
        &mut self,
        rng: &mut R,
        pop: &P,
        mut out: ArrayViewMut1<'_, MaybeUninit<P::Item>>,
    ) where
        P: Population,
        R: Rng + ?Sized,
    {
        let k = out.len();
        let positions = self.draw_positions(rng, pop.len(), k);
        debug_assert_eq!(positions.len(), k);
        for (slot, pos) in out.iter_mut().zip(positions) {
            slot.write(pop.value(*pos));
        }
    }

    /// Partial Fisher-Yates over the position buffer.
    fn shuffle_dense<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize, k: usize) {
        if self.perm.len() != n {
            self.perm.clear();
            self.perm.extend(0..n);
        }
        self.swaps.clear();
        for i in 0..k {
            let j = rng.random_range(i..n);
            self.perm.swap(i, j);
            self.swaps.push(j);
        }
        self.picks.extend_from_slice(&self.perm[..k]);

        // undo the swaps so the buffer is the identity again; otherwise a
        // row's picks would depend on which rows this drawer saw before it
        for i in (0..k).rev() {
            self.perm.swap(i, self.swaps[i]);
        }
    }

    /// Few picks from a large population, in O(k) memory.
    fn sample_sparse<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize, k: usize) {
        let picks = index::sample(rng, n, k);
        self.picks.extend(picks.iter());
    }

    /// Reservoir sampling with geometric skips (Algorithm L), so the cost
    /// grows with `k log(n / k)` rather than with `n`.
    fn reservoir<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize, k: usize) {
        let kf = k as f64;
        self.picks.extend(0..k);

        let mut w = (rng.sample::<f64, _>(Open01).ln() / kf).exp();
        let mut i = k - 1;
        loop {
            let skip = (rng.sample::<f64, _>(Open01).ln() / (-w).ln_1p()).floor();
            // float-to-int casts saturate, as does the add
            i = i.saturating_add(skip as usize).saturating_add(1);
            if i >= n {
                break;
            }
            let slot = rng.random_range(0..k);
            self.picks[slot] = i;
            w *= (rng.sample::<f64, _>(Open01).ln() / kf).exp();
        }

        // the reservoir keeps source order for untouched slots
        for i in (1..k).rev() {
            let j = rng.random_range(0..=i);
            self.picks.swap(i, j);
        }
    }
}
