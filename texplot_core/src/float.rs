// Copyright 2025 the texplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `libm` backed float math for builds without `std`.
//!
//! With `std` enabled the inherent `f64` methods are used and this module is
//! not compiled.

/// The subset of `f64` math used by the preparers.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn sqrt(self) -> Self;
    fn log10(self) -> Self;
    fn powf(self, n: Self) -> Self;
    fn powi(self, n: i32) -> Self;
}

macro_rules! unary {
    ($($name:ident => $libm:path),* $(,)?) => {
        $(
            fn $name(self) -> Self {
                $libm(self)
            }
        )*
    };
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    unary! {
        floor => libm::floor,
        ceil => libm::ceil,
        round => libm::round,
        sqrt => libm::sqrt,
        log10 => libm::log10,
    }

    fn powf(self, n: Self) -> Self {
        libm::pow(self, n)
    }

    // Only called with small decade exponents, where `pow` is exact.
    fn powi(self, n: i32) -> Self {
        libm::pow(self, Self::from(n))
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("texplot_core needs the `std` or the `libm` feature for float math");
