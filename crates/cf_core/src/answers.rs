//! Typed questionnaire answers.
//!
//! Every section defaults to empty and every single-choice field is optional:
//! an absent answer is `None` and resolves to the questionnaire default through
//! the accessor of the same name. Multi-selects are ordered sets, so repeated
//! items collapse.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::labels::*;

/// One household's answers (owned by the caller for one calculation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerRecord {
    #[serde(default)]
    pub food: FoodAnswers,
    #[serde(default)]
    pub travel: TravelAnswers,
    #[serde(default)]
    pub home: HomeAnswers,
    #[serde(default)]
    pub stuff: StuffAnswers,
}

/* ------------------------------- Food ------------------------------- */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoodAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<Diet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eating_out_spend_per_week: Option<SpendRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste_percentage: Option<WasteRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_sourcing: Option<LocalSourcing>,
}

impl FoodAnswers {
    pub fn diet(&self) -> Diet { self.diet_type.unwrap_or(Diet::MeatSomeMeals) }
    pub fn eating_out(&self) -> SpendRange { self.eating_out_spend_per_week.unwrap_or(SpendRange::Zero) }
    pub fn waste(&self) -> WasteRange { self.waste_percentage.unwrap_or(WasteRange::From10To30) }
    pub fn sourcing(&self) -> LocalSourcing { self.local_sourcing.unwrap_or(LocalSourcing::DontWorry) }
}

/* ------------------------------ Travel ------------------------------ */

/// Return-trip counts per distance band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Flights {
    pub domestic: u32,
    pub europe: u32,
    pub long_haul: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TravelAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_vehicle: Option<GeneralVehicle>,
    /// Irrelevant when `general_vehicle` is `Neither`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_vehicle: Option<SpecificVehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_hours_per_week: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_hours_per_week: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_hours_per_week: Option<TimeRange>,
    pub flights: Flights,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_offset_percentage: Option<FlightOffset>,
}

impl TravelAnswers {
    pub fn vehicle(&self) -> GeneralVehicle { self.general_vehicle.unwrap_or(GeneralVehicle::Car) }
    pub fn specific(&self) -> SpecificVehicle { self.specific_vehicle.unwrap_or(SpecificVehicle::MediumCar) }
    pub fn car_hours(&self) -> TimeRange { self.car_hours_per_week.unwrap_or(TimeRange::Under2) }
    pub fn train_hours(&self) -> TimeRange { self.train_hours_per_week.unwrap_or(TimeRange::NoTrain) }
    pub fn bus_hours(&self) -> TimeRange { self.bus_hours_per_week.unwrap_or(TimeRange::NoBus) }
    pub fn offset(&self) -> FlightOffset { self.flight_offset_percentage.unwrap_or(FlightOffset::NoneOfThem) }
}

/* ------------------------------- Home ------------------------------- */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeAnswers {
    /// Collected by the questionnaire but not used by the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_type: Option<HouseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<Bedrooms>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_count: Option<People>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating_source: Option<HeatingSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_tariff: Option<GreenTariff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lights_off: Option<LightsOff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winter_temp: Option<WinterTemp>,
    pub improvements: BTreeSet<HomeImprovement>,
}

impl HomeAnswers {
    pub fn bedroom_band(&self) -> Bedrooms { self.bedrooms.unwrap_or(Bedrooms::One) }
    pub fn people(&self) -> People { self.people_count.unwrap_or(People::One) }
    pub fn heating(&self) -> HeatingSource { self.heating_source.unwrap_or(HeatingSource::Gas) }
    pub fn tariff(&self) -> GreenTariff { self.green_tariff.unwrap_or(GreenTariff::No) }
    pub fn lights(&self) -> LightsOff { self.lights_off.unwrap_or(LightsOff::No) }
    pub fn temp(&self) -> WinterTemp { self.winter_temp.unwrap_or(WinterTemp::From18To21) }
}

/* ------------------------------- Stuff ------------------------------ */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StuffAnswers {
    pub purchases: BTreeSet<Purchase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothes_spend: Option<SpendRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_spend: Option<SpendRange>,
    #[serde(alias = "beauty_spend", skip_serializing_if = "Option::is_none")]
    pub health_spend: Option<SpendRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies_spend: Option<SpendRange>,
    /// Only presence of a non-zero band matters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contracts_spend: Option<SpendRange>,
    pub recycling: BTreeSet<Recycling>,
}

impl StuffAnswers {
    pub fn clothes(&self) -> SpendRange { self.clothes_spend.unwrap_or(SpendRange::Zero) }
    pub fn pets(&self) -> SpendRange { self.pet_spend.unwrap_or(SpendRange::Zero) }
    pub fn health(&self) -> SpendRange { self.health_spend.unwrap_or(SpendRange::Zero) }
    pub fn hobbies(&self) -> SpendRange { self.hobbies_spend.unwrap_or(SpendRange::Zero) }
    pub fn contracts(&self) -> SpendRange { self.contracts_spend.unwrap_or(SpendRange::Zero) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_degrade_to_empty() {
        let rec: AnswerRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rec, AnswerRecord::default());
        assert_eq!(rec.food.diet(), Diet::MeatSomeMeals);
        assert_eq!(rec.travel.car_hours(), TimeRange::Under2);
        assert_eq!(rec.home.people(), People::One);
        assert_eq!(rec.stuff.contracts(), SpendRange::Zero);
    }

    #[test]
    fn multi_selects_collapse_duplicates_and_beauty_alias_is_accepted() {
        let rec: AnswerRecord = serde_json::from_value(json!({
            "stuff": {
                "recycling": ["Paper", "Glass", "Paper"],
                "beauty_spend": "£10 - £60"
            }
        }))
        .unwrap();
        assert_eq!(rec.stuff.recycling.len(), 2);
        assert_eq!(rec.stuff.health(), SpendRange::TenTo60);
    }

    #[test]
    fn negative_flight_counts_and_unknown_fields_are_rejected() {
        let bad = serde_json::from_value::<AnswerRecord>(json!({
            "travel": { "flights": { "domestic": -1 } }
        }));
        assert!(bad.is_err());

        let bad = serde_json::from_value::<AnswerRecord>(json!({ "garden": {} }));
        assert!(bad.is_err());
    }

    #[test]
    fn serializes_only_answered_fields() {
        let mut rec = AnswerRecord::default();
        rec.home.heating_source = Some(HeatingSource::Oil);
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["home"]["heating_source"], "Oil");
        assert!(v["home"].get("bedrooms").is_none());
    }
}
