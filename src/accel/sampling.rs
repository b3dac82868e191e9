// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Row-wise sampling without replacement.
//!
//! Each output row holds unique values drawn from its own population; rows
//! are independent of each other, so values may repeat across rows.
//!
//! All entry points take an explicit generator. Nothing here keeps global
//! random state, so concurrent calls need no locking as long as they do not
//! share a generator.
use log::*;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::{
    draw::{DrawStrategy, RowDrawer},
    errors::SampleError,
    parallel::{maybe_fuse, row_seeds},
    request::{SamplePlan, SampleRequest},
    source::{IntRange, Population, Source, SourceKind},
};

/// Options for a sampling call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleOptions {
    pub strategy: DrawStrategy,
    /// Fill rows concurrently on the rayon pool, each row with its own
    /// generator seeded from the caller's.
    pub parallel: bool,
}

impl SampleOptions {
    pub fn with_strategy(self, strategy: DrawStrategy) -> SampleOptions {
        SampleOptions { strategy, ..self }
    }

    pub fn with_parallel(self, parallel: bool) -> SampleOptions {
        SampleOptions { parallel, ..self }
    }
}

/// Sample `cols` unique integers from `[low, high)` for each of `rows` rows.
pub fn randint_2d<R: Rng + ?Sized>(
    low: i64,
    high: i64,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Array2<i64>, SampleError> {
    randint_2d_with(low, high, rows, cols, &SampleOptions::default(), rng)
}

/// [randint_2d] with explicit options.
pub fn randint_2d_with<R: Rng + ?Sized>(
    low: i64,
    high: i64,
    rows: usize,
    cols: usize,
    options: &SampleOptions,
    rng: &mut R,
) -> Result<Array2<i64>, SampleError> {
    let range = IntRange::new(low, high)?;
    if cols > range.len() {
        return Err(SampleError::invalid(format!(
            "randint_2d: cols ({}) is larger than high - low ({})",
            cols,
            range.len()
        )));
    }
    // the range acts as a shared vector source
    let plan = SampleRequest::new(cols, Some(rows)).plan(SourceKind::Vector(range.len()))?;
    debug!(
        "randint_2d: sampling {}x{} from [{}, {}) ({}, parallel={})",
        rows, cols, low, high, options.strategy, options.parallel
    );

    Ok(sample_rows(&plan, options, rng, |_| range))
}

/// Sample `cols` unique elements per row from a 1D or 2D source.
///
/// A 2D source yields one output row per source row, and `rows` must be
/// `None`. A 1D source is shared by all `rows` output rows, each drawn
/// independently.
pub fn choice_2d<'a, T, S, R>(
    source: S,
    cols: usize,
    rows: Option<usize>,
    rng: &mut R,
) -> Result<Array2<T>, SampleError>
where
    T: Copy + Send + Sync + 'a,
    S: Into<Source<'a, T>>,
    R: Rng + ?Sized,
{
    choice_2d_with(source, cols, rows, &SampleOptions::default(), rng)
}

/// [choice_2d] with explicit options.
pub fn choice_2d_with<'a, T, S, R>(
    source: S,
    cols: usize,
    rows: Option<usize>,
    options: &SampleOptions,
    rng: &mut R,
) -> Result<Array2<T>, SampleError>
where
    T: Copy + Send + Sync + 'a,
    S: Into<Source<'a, T>>,
    R: Rng + ?Sized,
{
    let source = source.into();
    let plan = SampleRequest::new(cols, rows).plan(source.kind())?;
    debug!(
        "choice_2d: sampling {}x{} from {:?} ({}, parallel={})",
        plan.out_rows, plan.cols, plan.kind, options.strategy, options.parallel
    );

    Ok(sample_rows(&plan, options, rng, |r| source.row(r)))
}

/// Fill a result matrix, drawing row `r` from `row_pop(r)`.
fn sample_rows<P, F, R>(
    plan: &SamplePlan,
    options: &SampleOptions,
    rng: &mut R,
    row_pop: F,
) -> Array2<P::Item>
where
    P: Population,
    P::Item: Send + Sync,
    F: Fn(usize) -> P + Sync,
    R: Rng + ?Sized,
{
    let mut result = Array2::uninit(plan.shape());

    if options.parallel {
        let seeds = row_seeds(rng, plan.out_rows);
        maybe_fuse(result.outer_iter_mut().into_par_iter().enumerate()).for_each_init(
            || RowDrawer::new(options.strategy),
            |drawer, (i, row)| {
                let mut row_rng = Pcg64::seed_from_u64(seeds[i]);
                drawer.fill_row(&mut row_rng, &row_pop(i), row);
            },
        );
    } else {
        let mut drawer = RowDrawer::new(options.strategy);
        for (i, row) in result.outer_iter_mut().enumerate() {
            drawer.fill_row(rng, &row_pop(i), row);
        }
    }

    // SAFETY: the plan guarantees cols <= population size, and fill_row
    // writes every slot of the row it is given
    unsafe { result.assume_init() }
}
