// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Structural and statistical checks on full-size sampling runs.
use std::collections::HashSet;

use ndarray::Array2;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use random_2d::{
    choice_2d, choice_2d_with, randint_2d_with, DrawStrategy, SampleError, SampleOptions,
};

const SHAPE: (usize, usize) = (200, 300);
const TOLERANCE: f64 = 3.0;

fn all_options() -> Vec<SampleOptions> {
    let mut opts = Vec::new();
    for strategy in [DrawStrategy::Shuffle, DrawStrategy::Reservoir] {
        for parallel in [false, true] {
            opts.push(SampleOptions { strategy, parallel });
        }
    }
    opts
}

fn check_moments(title: &str, result: &Array2<i64>, max: f64) {
    let values = result.mapv(|v| v as f64);
    let mean = values.mean().expect("empty result");
    let stdev = values.std(0.0);
    println!("{} succeeded: mean={} stdev={}", title, mean, stdev);

    assert!(
        (mean - max * 0.5).abs() <= TOLERANCE,
        "{}: mean {} too far from {}",
        title,
        mean,
        max * 0.5
    );
    let exp_sd = max / 12f64.sqrt();
    assert!(
        (stdev - exp_sd).abs() <= TOLERANCE,
        "{}: stdev {} too far from {}",
        title,
        stdev,
        exp_sd
    );
}

fn check_rows_unique(result: &Array2<i64>) {
    for row in result.outer_iter() {
        let u: HashSet<i64> = row.iter().copied().collect();
        assert_eq!(u.len(), row.len());
    }
}

#[test]
fn test_randint_2d() {
    let max = 1000;
    for (i, options) in all_options().into_iter().enumerate() {
        let title = format!("randint_2d ({}, parallel={})", options.strategy, options.parallel);
        let mut rng = Pcg64::seed_from_u64(1000 + i as u64);
        let result = randint_2d_with(0, max, SHAPE.0, SHAPE.1, &options, &mut rng)
            .expect("sampling failed");

        assert_eq!(result.dim(), SHAPE);
        assert!(result.iter().all(|v| *v >= 0 && *v < max));
        check_rows_unique(&result);
        check_moments(&title, &result, max as f64);
    }
}

#[test]
fn test_choice_2d() {
    let cols = 123;
    let max = SHAPE.0 * SHAPE.1;
    let array = Array2::from_shape_vec(SHAPE, (0..max as i64).collect()).expect("bad shape");

    for (i, options) in all_options().into_iter().enumerate() {
        let title = format!("choice_2d ({}, parallel={})", options.strategy, options.parallel);
        let mut rng = Pcg64::seed_from_u64(2000 + i as u64);
        let result =
            choice_2d_with(array.view(), cols, None, &options, &mut rng).expect("sampling failed");

        assert_eq!(result.dim(), (SHAPE.0, cols));
        assert!(result.iter().all(|v| *v >= 0 && *v < max as i64));
        check_rows_unique(&result);

        for (r, row) in result.outer_iter().enumerate() {
            let from = (r * SHAPE.1) as i64;
            let to = from + SHAPE.1 as i64;
            assert!(row.iter().all(|v| *v >= from && *v < to), "row {} out of range", r);
        }

        check_moments(&title, &result, max as f64);
    }
}

#[test]
fn test_choice_2d_row_five() {
    let array = Array2::from_shape_vec(SHAPE, (0..60000i64).collect()).expect("bad shape");
    let mut rng = Pcg64::seed_from_u64(5);
    let result = choice_2d(array.view(), 123, None, &mut rng).expect("sampling failed");

    assert_eq!(result.dim(), (200, 123));
    let row = result.row(5);
    assert!(row.iter().all(|v| (1500..1800).contains(v)));
    assert_eq!(row.iter().collect::<HashSet<_>>().len(), 123);
}

#[test]
fn test_invalid_calls_repeat() {
    let array = Array2::from_shape_vec(SHAPE, (0..60000i64).collect()).expect("bad shape");
    let mut rng = Pcg64::seed_from_u64(6);

    let first = choice_2d(array.view(), 301, None, &mut rng).unwrap_err();
    for _ in 0..5 {
        let again = choice_2d(array.view(), 301, None, &mut rng).unwrap_err();
        assert_eq!(again, first);
    }

    let with_rows = choice_2d(array.view(), 10, Some(200), &mut rng);
    assert!(matches!(with_rows, Err(SampleError::InvalidArgument(_))));
}
