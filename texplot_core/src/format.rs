// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for emitted coordinates and labels.

use alloc::format;
use alloc::string::{String, ToString};

/// Formats a number the way it should appear in PGFPlots source.
///
/// Fixed notation with at most ten decimals (trailing zeros trimmed) for ordinary
/// magnitudes, scientific notation (`1.5e-7`) for very small or very large ones.
/// Float noise such as `0.30000000000000004` is written as `0.3`.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "nan".to_string()
        } else if v > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let mag = v.abs();
    if mag == 0.0 {
        return "0".to_string();
    }
    if !(1e-4..1e15).contains(&mag) {
        return format!("{v:e}");
    }
    let fixed = format!("{v:.10}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_float_noise_and_zeros() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-1.25), "-1.25");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn extreme_magnitudes_use_exponents() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(2.5e20), "2.5e20");
    }
}
