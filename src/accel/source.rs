// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Source populations for row-wise sampling.
use ndarray::{ArrayView1, ArrayView2, ArrayViewD, Ix1, Ix2};

use crate::errors::SampleError;

/// Shape of a sampling source, resolved once when a call starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A shared 1D population of the given length.
    Vector(usize),
    /// A 2D population with one source row per output row.
    Matrix(usize, usize),
}

impl SourceKind {
    /// Number of candidate values each output row draws from.
    pub fn row_len(&self) -> usize {
        match self {
            SourceKind::Vector(len) => *len,
            SourceKind::Matrix(_, cols) => *cols,
        }
    }
}

/// A 1D or 2D array to sample from.
#[derive(Debug, Clone)]
pub enum Source<'a, T> {
    Vector(ArrayView1<'a, T>),
    Matrix(ArrayView2<'a, T>),
}

impl<'a, T> Source<'a, T> {
    /// Resolve a source from a view of arbitrary dimensionality.
    pub fn from_dyn(view: ArrayViewD<'a, T>) -> Result<Source<'a, T>, SampleError> {
        let bad_dim = |_| SampleError::invalid("source must be one- or two-dimensional");
        match view.ndim() {
            1 => Ok(Source::Vector(view.into_dimensionality::<Ix1>().map_err(bad_dim)?)),
            2 => Ok(Source::Matrix(view.into_dimensionality::<Ix2>().map_err(bad_dim)?)),
            n => Err(SampleError::invalid(format!(
                "source must be one- or two-dimensional (got {} dimensions)",
                n
            ))),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Vector(v) => SourceKind::Vector(v.len()),
            Source::Matrix(m) => SourceKind::Matrix(m.nrows(), m.ncols()),
        }
    }

    /// Get the population for output row `row`.
    ///
    /// Every row of a vector source sees the same population.
    pub fn row(&self, row: usize) -> ArrayView1<'_, T> {
        match self {
            Source::Vector(v) => v.view(),
            Source::Matrix(m) => m.row(row),
        }
    }
}

impl<'a, T> From<ArrayView1<'a, T>> for Source<'a, T> {
    fn from(view: ArrayView1<'a, T>) -> Self {
        Source::Vector(view)
    }
}

impl<'a, T> From<ArrayView2<'a, T>> for Source<'a, T> {
    fn from(view: ArrayView2<'a, T>) -> Self {
        Source::Matrix(view)
    }
}

/// An indexable population that a single row draws from.
pub trait Population {
    type Item: Copy;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at position `pos`, which must be less than [Population::len].
    fn value(&self, pos: usize) -> Self::Item;
}

impl<T: Copy> Population for ArrayView1<'_, T> {
    type Item = T;

    fn len(&self) -> usize {
        ArrayView1::len(self)
    }

    fn value(&self, pos: usize) -> T {
        self[pos]
    }
}

/// The ascending integers `low..low + len`, without materializing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    low: i64,
    len: usize,
}

impl IntRange {
    /// Create the population for the half-open range `[low, high)`.
    pub fn new(low: i64, high: i64) -> Result<IntRange, SampleError> {
        if high <= low {
            return Err(SampleError::invalid(format!(
                "randint_2d: high ({}) must be greater than low ({})",
                high, low
            )));
        }
        let size = high as i128 - low as i128;
        let len = usize::try_from(size).map_err(|_| {
            SampleError::invalid(format!("randint_2d: range size {} is too large", size))
        })?;
        Ok(IntRange { low, len })
    }
}

impl Population for IntRange {
    type Item = i64;

    fn len(&self) -> usize {
        self.len
    }

    fn value(&self, pos: usize) -> i64 {
        debug_assert!(pos < self.len);
        // low + pos < high always fits, even when pos does not fit in i64
        self.low.wrapping_add(pos as i64)
    }
}

#[cfg(test)]
mod test {
    use ndarray::{arr0, arr1, arr2, Array3};

    use super::*;

    #[test]
    fn test_vector_kind() {
        let a = arr1(&[1, 2, 3]);
        let src = Source::from_dyn(a.view().into_dyn()).expect("1D source rejected");
        assert_eq!(src.kind(), SourceKind::Vector(3));
        assert_eq!(src.kind().row_len(), 3);
        assert_eq!(src.row(17), a.view());
    }

    #[test]
    fn test_matrix_kind() {
        let a = arr2(&[[1, 2, 3], [4, 5, 6]]);
        let src = Source::from_dyn(a.view().into_dyn()).expect("2D source rejected");
        assert_eq!(src.kind(), SourceKind::Matrix(2, 3));
        assert_eq!(src.kind().row_len(), 3);
        assert_eq!(src.row(1), arr1(&[4, 5, 6]));
    }

    #[test]
    fn test_reject_scalar() {
        let a = arr0(5);
        let res = Source::from_dyn(a.view().into_dyn());
        assert!(matches!(res, Err(SampleError::InvalidArgument(_))));
    }

    #[test]
    fn test_reject_3d() {
        let a = Array3::<i32>::zeros((2, 3, 4));
        let res = Source::from_dyn(a.view().into_dyn());
        assert!(matches!(res, Err(SampleError::InvalidArgument(_))));
    }

    #[test]
    fn test_range_values() {
        let r = IntRange::new(-5, 5).expect("valid range rejected");
        assert_eq!(r.len(), 10);
        assert_eq!(r.value(0), -5);
        assert_eq!(r.value(9), 4);
    }

    #[test]
    fn test_range_empty() {
        assert!(IntRange::new(3, 3).is_err());
        assert!(IntRange::new(4, 3).is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_range_extremes() {
        let r = IntRange::new(i64::MIN, i64::MAX).expect("full range rejected");
        assert_eq!(r.len(), usize::MAX);
        assert_eq!(r.value(0), i64::MIN);
        assert_eq!(r.value(usize::MAX - 1), i64::MAX - 1);
    }
}
