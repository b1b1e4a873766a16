//! Aggregation: four category subtotals → published `FootprintResult`.
//!
//! Subtotals are carried at 4 dp. Each published category is rounded to 2 dp,
//! and the total is the 2 dp sum of the published categories, so
//! `total == round2(Σ breakdown)` holds for every result this module builds.

use serde::{Deserialize, Serialize};

use cf_core::answers::AnswerRecord;
use cf_core::factors::EmissionFactorTable;
use cf_core::rounding::round2;

use crate::{estimate_food, estimate_home, estimate_stuff, estimate_travel};

/// Footprint categories in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Travel,
    Home,
    Stuff,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Food, Category::Travel, Category::Home, Category::Stuff];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Home => "home",
            Category::Stuff => "stuff",
        }
    }
}

/// kg CO2e/year per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakdown {
    pub food: f64,
    pub travel: f64,
    pub home: f64,
    pub stuff: f64,
}

impl Breakdown {
    pub fn get(&self, c: Category) -> f64 {
        match c {
            Category::Food => self.food,
            Category::Travel => self.travel,
            Category::Home => self.home,
            Category::Stuff => self.stuff,
        }
    }

    pub fn sum(&self) -> f64 {
        self.food + self.travel + self.home + self.stuff
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self { food: f(self.food), travel: f(self.travel), home: f(self.home), stuff: f(self.stuff) }
    }
}

/// `{ breakdown: { food, travel, home, stuff }, total }` in kg CO2e/year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FootprintResult {
    pub breakdown: Breakdown,
    pub total: f64,
}

impl FootprintResult {
    /// Same shape in tonnes (÷1000, 2 dp).
    pub fn to_tonnes(&self) -> FootprintResult {
        FootprintResult {
            breakdown: self.breakdown.map(|v| round2(v / 1000.0)),
            total: round2(self.total / 1000.0),
        }
    }

    /// Total agrees with the rounded breakdown within 0.01. Results from
    /// [`aggregate`] agree exactly; the tolerance covers hand-edited documents.
    pub fn is_consistent(&self) -> bool {
        (self.total - round2(self.breakdown.sum())).abs() <= 0.01 + 1e-9
    }

    /// Largest category (first in presentation order on ties).
    pub fn dominant(&self) -> Category {
        let mut best = Category::Food;
        for c in Category::ALL {
            if self.breakdown.get(c) > self.breakdown.get(best) {
                best = c;
            }
        }
        best
    }
}

/// Per-category subtotals at 4 dp.
pub fn estimate_subtotals(a: &AnswerRecord, t: &EmissionFactorTable) -> Breakdown {
    Breakdown {
        food: estimate_food(&a.food, t),
        travel: estimate_travel(&a.travel, t),
        home: estimate_home(&a.home, t),
        stuff: estimate_stuff(&a.stuff, t),
    }
}

pub fn aggregate(subtotals: &Breakdown) -> FootprintResult {
    let breakdown = subtotals.map(round2);
    FootprintResult { breakdown, total: round2(breakdown.sum()) }
}

/// Single pure entry point: answers + table → result.
pub fn estimate(a: &AnswerRecord, t: &EmissionFactorTable) -> FootprintResult {
    aggregate(&estimate_subtotals(a, t))
}
