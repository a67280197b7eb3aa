// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for plot accumulation and context building.

use alloc::string::String;
use core::fmt;

use crate::scale::Axis;

/// Why an axis domain could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DomainIssue {
    /// A value `<= 0` was found on a logarithmic axis.
    NonPositive(f64),
    /// No data and no explicit limit to derive the domain from.
    Empty,
}

impl fmt::Display for DomainIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive(v) => write!(f, "value {v} cannot be shown on a log axis"),
            Self::Empty => f.write_str("no data and no explicit limits"),
        }
    }
}

/// Errors raised while accumulating plot data or building a render context.
///
/// Validation is eager: inputs are checked when they are added to a plot, and
/// derived quantities (limits, layout) are checked when the context is built.
/// Nothing is truncated or coerced to make mismatched inputs fit.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PlotError {
    /// Two inputs that must have equal length do not.
    #[error("{what} has {found} values, expected {expected}")]
    ShapeMismatch {
        /// The offending input.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// An axis domain is unusable.
    #[error("invalid domain on the {axis} axis: {reason}")]
    InvalidDomain {
        /// The affected axis.
        axis: Axis,
        /// What is wrong with it.
        reason: DomainIssue,
    },
    /// A grid's panel list does not match its shape.
    #[error("a {rows}x{columns} grid cannot hold {panels} panels")]
    Layout {
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        columns: usize,
        /// Supplied panel count.
        panels: usize,
    },
    /// A panel address lies outside the grid.
    #[error("no panel at row {row}, column {column}")]
    PanelOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
    },
    /// A placement keyword is not one of the supported locations.
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
    /// A series-relative operation was requested before any series was plotted.
    #[error("no data series to attach to, plot a series first")]
    MissingSeries,
    /// Histogram input is structurally invalid.
    #[error("invalid histogram: {0}")]
    InvalidHistogram(&'static str),
    /// A smoothing degree that the smoother cannot apply.
    #[error("cannot smooth {len} points with degree {degree}")]
    InvalidSmoothing {
        /// Requested degree.
        degree: usize,
        /// Number of input points.
        len: usize,
    },
}

/// Result type alias for plot operations.
pub type PlotResult<T> = Result<T, PlotError>;

impl PlotError {
    pub(crate) fn shape(what: &'static str, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            what,
            expected,
            found,
        }
    }

    pub(crate) fn non_positive(axis: Axis, value: f64) -> Self {
        Self::InvalidDomain {
            axis,
            reason: DomainIssue::NonPositive(value),
        }
    }
}

/// Checks that an input has the length of its reference input.
pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> PlotResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(PlotError::shape(what, expected, found))
    }
}
