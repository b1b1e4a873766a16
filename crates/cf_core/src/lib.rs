//! cf_core — Core types for the carbon-footprint engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`cf_io`, `cf_algo`, `cf_pipeline`, `cf_report`, `cf_cli`).
//!
//! - Questionnaire labels as closed enums (`labels`)
//! - Typed `AnswerRecord` with per-field questionnaire defaults (`answers`)
//! - Versioned `EmissionFactorTable` + `validate_domains` (`factors`)
//! - Label → magnitude `Mapper` that never fails (`mapping`)
//! - Output IDs: `RES:`, `RUN:` (`ids`)
//! - Decimal rounding helpers (`rounding`)

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidId,
        InvalidHex,
        InvalidTimestamp,
        /// Label not recognized for the named answer kind.
        UnknownLabel(&'static str),
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::InvalidHex => write!(f, "invalid hex"),
                CoreError::InvalidTimestamp => write!(f, "invalid timestamp"),
                CoreError::UnknownLabel(k) => write!(f, "unknown {k} label"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod rounding {
    //! Decimal rounding on `f64` (half away from zero on the scaled value).

    /// Round `x` to `dp` decimal places.
    #[inline]
    pub fn round_dp(x: f64, dp: u32) -> f64 {
        let scale = 10f64.powi(dp as i32);
        (x * scale).round() / scale
    }

    /// Category subtotals are carried at 4 dp between estimators and aggregation.
    #[inline]
    pub fn round4(x: f64) -> f64 { round_dp(x, 4) }

    /// Output records are published at 2 dp.
    #[inline]
    pub fn round2(x: f64) -> f64 { round_dp(x, 2) }

    /// One-decimal percent string of `part / whole` ("0.0" when `whole` is zero).
    pub fn percent_one_decimal(part: f64, whole: f64) -> String {
        if whole <= 0.0 {
            return "0.0".to_string();
        }
        format!("{:.1}", round_dp(part / whole * 100.0, 1))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn rounds_to_requested_places() {
            assert_eq!(round4(2305.969_44), 2305.9694);
            assert_eq!(round2(2305.9694), 2305.97);
            assert_eq!(round2(-1.005_1), -1.01);
            assert_eq!(round_dp(0.0, 2), 0.0);
        }

        #[test]
        fn percent_handles_zero_whole() {
            assert_eq!(percent_one_decimal(1.0, 0.0), "0.0");
            assert_eq!(percent_one_decimal(1.0, 3.0), "33.3");
        }
    }
}

pub mod answers;
pub mod factors;
pub mod ids;
pub mod labels;
pub mod mapping;

pub use answers::AnswerRecord;
pub use errors::CoreError;
pub use factors::EmissionFactorTable;
pub use labels::Label;
pub use mapping::{MappingTable, Mapper};
