// crates/cf_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure estimators. Every function takes the answers by reference and the
//! factor table by reference, holds no state, and performs no I/O.

pub use cf_core::{answers::AnswerRecord, factors::EmissionFactorTable};

// ----------------------------- Calendar constants -----------------------------

pub(crate) const DAYS_PER_YEAR: f64 = 365.0;
pub(crate) const WEEKS_PER_YEAR: f64 = 52.0;
pub(crate) const MONTHS_PER_YEAR: f64 = 12.0;

// ----------------------------- Category estimators ----------------------------

pub mod food;
pub mod travel;
pub mod home;
pub mod stuff;

pub use food::estimate_food;
pub use travel::{estimate_travel, TravelParts};
pub use home::{estimate_home, HomeParts};
pub use stuff::estimate_stuff;

// ----------------------------- Aggregation ------------------------------------

pub mod aggregate;

pub use aggregate::{estimate, Breakdown, Category, FootprintResult};

// ----------------------------- Energy-use peer calculator ---------------------

#[cfg(feature = "energy_use")]
pub mod energy_use;

#[cfg(feature = "energy_use")]
pub use energy_use::{calculate_energy_use, EnergyError, EnergyReadings, EnergyTariff, EnergyUseSummary};
