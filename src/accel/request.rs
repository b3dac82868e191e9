// This file is part of random_2d.
// Copyright (C) 2024-2025 The random_2d contributors.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Validation of sample requests against source shapes.
use crate::{errors::SampleError, source::SourceKind};

/// The caller's request: how many unique values per row, and (for vector
/// sources) how many rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    pub cols: usize,
    pub rows: Option<usize>,
}

/// A validated request, ready to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePlan {
    pub kind: SourceKind,
    pub out_rows: usize,
    pub cols: usize,
}

impl SampleRequest {
    pub fn new(cols: usize, rows: Option<usize>) -> SampleRequest {
        SampleRequest { cols, rows }
    }

    /// Check this request against a source shape.
    pub fn plan(&self, kind: SourceKind) -> Result<SamplePlan, SampleError> {
        let out_rows = match (kind, self.rows) {
            (SourceKind::Matrix(..), Some(_)) => {
                return Err(SampleError::invalid(
                    "choice_2d: rows must be unset when source is two-dimensional",
                ))
            }
            (SourceKind::Matrix(n, _), None) => n,
            (SourceKind::Vector(_), Some(n)) => n,
            (SourceKind::Vector(_), None) => {
                return Err(SampleError::invalid(
                    "choice_2d: rows must be set when source is one-dimensional",
                ))
            }
        };

        let avail = kind.row_len();
        if self.cols > avail {
            return Err(SampleError::invalid(format!(
                "choice_2d: cols ({}) is larger than columns of source ({})",
                self.cols, avail
            )));
        }

        Ok(SamplePlan {
            kind,
            out_rows,
            cols: self.cols,
        })
    }
}

impl SamplePlan {
    pub fn shape(&self) -> (usize, usize) {
        (self.out_rows, self.cols)
    }
}

/// Convert a signed row or column count from a caller into a size.
pub fn count_arg(name: &str, value: i64) -> Result<usize, SampleError> {
    usize::try_from(value).map_err(|_| {
        SampleError::invalid(format!("{} must be non-negative (got {})", name, value))
    })
}

#[test]
fn test_matrix_plan() {
    let plan = SampleRequest::new(123, None)
        .plan(SourceKind::Matrix(200, 300))
        .expect("valid request rejected");
    assert_eq!(plan.shape(), (200, 123));
}

#[test]
fn test_vector_plan() {
    let plan = SampleRequest::new(300, Some(200))
        .plan(SourceKind::Vector(1000))
        .expect("valid request rejected");
    assert_eq!(plan.shape(), (200, 300));
}

#[test]
fn test_matrix_with_rows() {
    let res = SampleRequest::new(5, Some(2)).plan(SourceKind::Matrix(2, 10));
    assert!(matches!(res, Err(SampleError::InvalidArgument(_))));
}

#[test]
fn test_vector_without_rows() {
    let res = SampleRequest::new(5, None).plan(SourceKind::Vector(10));
    assert!(matches!(res, Err(SampleError::InvalidArgument(_))));
}

#[test]
fn test_too_many_cols() {
    let req = SampleRequest::new(11, Some(3));
    let err = req.plan(SourceKind::Vector(10)).unwrap_err();
    let SampleError::InvalidArgument(msg) = &err;
    assert!(msg.contains("11"));
    assert!(msg.contains("10"));

    // validation does not depend on any state
    assert_eq!(req.plan(SourceKind::Vector(10)), Err(err));
}

#[test]
fn test_full_row() {
    let plan = SampleRequest::new(10, None)
        .plan(SourceKind::Matrix(4, 10))
        .expect("full-width request rejected");
    assert_eq!(plan.shape(), (4, 10));
}

#[test]
fn test_empty_shapes() {
    let plan = SampleRequest::new(0, Some(5))
        .plan(SourceKind::Vector(0))
        .expect("empty request rejected");
    assert_eq!(plan.shape(), (5, 0));

    let plan = SampleRequest::new(3, Some(0))
        .plan(SourceKind::Vector(4))
        .expect("zero-row request rejected");
    assert_eq!(plan.shape(), (0, 3));
}

#[test]
fn test_count_arg() {
    assert_eq!(count_arg("cols", 0), Ok(0));
    assert_eq!(count_arg("rows", 200), Ok(200));
    let err = count_arg("rows", -1).unwrap_err();
    let SampleError::InvalidArgument(msg) = err;
    assert!(msg.contains("rows"));
    assert!(msg.contains("-1"));
}
