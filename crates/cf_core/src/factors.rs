//! factors.rs — Emission factor table (versioned, read-only configuration).
//!
//! One table holds every coefficient and every label → magnitude mapping used
//! by the estimators. `EmissionFactorTable::default()` is the built-in refined
//! UK table; a custom table can be deserialized from JSON and must then pass
//! `validate_domains()` before use. Tables are never mutated after load.
//!
//! Units: kg CO2e per unit named in each field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::labels::*;

/// Version tag of the built-in table.
pub const DEFAULT_TABLE_VERSION: &str = "uk-refined-2024";

/// ------------ Sections ------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoodFactors {
    pub diet_kg_per_day: BTreeMap<Diet, f64>,
    pub restaurant_kg_per_gbp: f64,
    pub landfill_kg_per_kg: f64,
    pub avg_waste_kg_per_person: f64,
    /// Waste intensity for "Meat in every meal".
    pub waste_scale_heavy_meat: f64,
    /// Waste intensity for vegetarian and vegan diets.
    pub waste_scale_plant_based: f64,
    pub local_sourcing_reduction: BTreeMap<LocalSourcing, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightBand {
    pub kg_per_km: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightFactors {
    pub domestic: FlightBand,
    pub europe: FlightBand,
    pub long_haul: FlightBand,
    /// Non-CO2 aviation climate impact.
    pub radiative_forcing: f64,
    /// Routing/holding distance uplift over the nominal band distance.
    pub distance_uplift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TravelFactors {
    pub vehicle_kg_per_km: BTreeMap<SpecificVehicle, f64>,
    pub bus_kg_per_km: f64,
    pub train_kg_per_km: f64,
    pub car_speed_kmh: f64,
    pub motorbike_speed_kmh: f64,
    pub bus_speed_kmh: f64,
    pub train_speed_kmh: f64,
    pub flights: FlightFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeFactors {
    pub heating_kg_per_kwh: BTreeMap<HeatingSource, f64>,
    pub grid_kg_per_kwh: f64,
    pub temp_adjustment: BTreeMap<WinterTemp, f64>,
    pub improvement_reduction: BTreeMap<HomeImprovement, f64>,
    /// Ceiling on the summed improvement reductions.
    pub improvement_cap: f64,
    pub lights_off_reduction: f64,
    /// Share of the grid factor kept on a partially renewable tariff.
    pub partial_green_share: f64,
    pub base_heating_kwh: f64,
    pub heating_kwh_per_bedroom: f64,
    pub base_electricity_kwh: f64,
    pub electricity_kwh_per_bedroom: f64,
    /// Building share not divided among occupants.
    pub fixed_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StuffFactors {
    pub item_kg_per_year: BTreeMap<Purchase, f64>,
    pub clothes_kg_per_gbp: f64,
    pub pets_kg_per_gbp: f64,
    pub health_kg_per_gbp: f64,
    pub hobbies_kg_per_gbp: f64,
    pub services_kg_per_year: f64,
    pub recycling_reduction_per_category: f64,
    pub recycling_reduction_cap: f64,
}

/// Representative magnitudes for range answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputMappings {
    /// £ midpoint (weekly or monthly depending on the question).
    pub spend_ranges: BTreeMap<SpendRange, f64>,
    /// Hours per week.
    pub time_ranges: BTreeMap<TimeRange, f64>,
    /// Percent of food wasted.
    pub waste_ranges: BTreeMap<WasteRange, f64>,
    /// Percent of flights offset.
    pub offset_percentage: BTreeMap<FlightOffset, f64>,
    /// Expected count; open top buckets use a fractional value.
    pub bedrooms: BTreeMap<Bedrooms, f64>,
    pub people: BTreeMap<People, f64>,
}

/// ------------ Table ------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmissionFactorTable {
    pub version: String,
    pub food: FoodFactors,
    pub travel: TravelFactors,
    pub home: HomeFactors,
    pub stuff: StuffFactors,
    pub mappings: InputMappings,
}

fn table<K: Ord + Copy>(rows: &[(K, f64)]) -> BTreeMap<K, f64> {
    rows.iter().copied().collect()
}

impl Default for FoodFactors {
    fn default() -> Self {
        use Diet::*;
        Self {
            diet_kg_per_day: table(&[
                (MeatEveryMeal, 12.5),
                (MeatSomeMeals, 5.6),
                (NoBeef, 4.7),
                (MeatRarely, 4.5),
                (Vegetarian, 4.2),
                (Vegan, 2.5),
            ]),
            restaurant_kg_per_gbp: 0.234,
            landfill_kg_per_kg: 1.38,
            avg_waste_kg_per_person: 70.0,
            waste_scale_heavy_meat: 1.2,
            waste_scale_plant_based: 0.8,
            local_sourcing_reduction: table(&[
                (LocalSourcing::ALot, 0.05),
                (LocalSourcing::Partly, 0.02),
                (LocalSourcing::DontWorry, 0.0),
            ]),
        }
    }
}

impl Default for TravelFactors {
    fn default() -> Self {
        use SpecificVehicle::*;
        Self {
            vehicle_kg_per_km: table(&[
                (Electric, 0.06),
                (PlugInHybrid, 0.18),
                (Hybrid, 0.18),
                (SmallCar, 0.255),
                (MediumCar, 0.275),
                (LargeCar, 0.315),
                (Motorbike, 0.11),
            ]),
            bus_kg_per_km: 0.10,
            train_kg_per_km: 0.04,
            car_speed_kmh: 35.0,
            motorbike_speed_kmh: 45.0,
            bus_speed_kmh: 20.0,
            train_speed_kmh: 60.0,
            flights: FlightFactors {
                domestic: FlightBand { kg_per_km: 0.27, distance_km: 400.0 },
                europe: FlightBand { kg_per_km: 0.16, distance_km: 1500.0 },
                long_haul: FlightBand { kg_per_km: 0.15, distance_km: 6000.0 },
                radiative_forcing: 1.9,
                distance_uplift: 1.1,
            },
        }
    }
}

impl Default for HomeFactors {
    fn default() -> Self {
        use HomeImprovement::*;
        Self {
            heating_kg_per_kwh: table(&[
                (HeatingSource::Gas, 0.20),
                (HeatingSource::Oil, 0.26),
                (HeatingSource::Electricity, 0.23),
                (HeatingSource::Wood, 0.02),
                (HeatingSource::Heatpump, 0.07),
            ]),
            grid_kg_per_kwh: 0.18,
            temp_adjustment: table(&[
                (WinterTemp::Below14, -0.20),
                (WinterTemp::From14To17, -0.10),
                (WinterTemp::From18To21, 0.0),
                (WinterTemp::Over21, 0.10),
            ]),
            improvement_reduction: table(&[
                (LoftInsulation, 0.15),
                (WallInsulation, 0.15),
                (CondensingBoiler, 0.20),
                (DoubleGlazing, 0.10),
                (SolarPanels, 0.30),
                (LowEnergyBulbs, 0.0),
            ]),
            improvement_cap: 0.8,
            lights_off_reduction: 0.05,
            partial_green_share: 0.5,
            base_heating_kwh: 7000.0,
            heating_kwh_per_bedroom: 2000.0,
            base_electricity_kwh: 1500.0,
            electricity_kwh_per_bedroom: 500.0,
            fixed_share: 0.4,
        }
    }
}

impl Default for StuffFactors {
    fn default() -> Self {
        Self {
            item_kg_per_year: table(&[
                (Purchase::Electronics, 135.0),
                (Purchase::Furniture, 65.0),
                (Purchase::Appliance, 150.0),
                (Purchase::Phone, 20.0),
            ]),
            clothes_kg_per_gbp: 0.5,
            pets_kg_per_gbp: 1.5,
            health_kg_per_gbp: 0.4,
            hobbies_kg_per_gbp: 0.45,
            services_kg_per_year: 75.0,
            recycling_reduction_per_category: 0.01,
            recycling_reduction_cap: 0.05,
        }
    }
}

impl Default for InputMappings {
    fn default() -> Self {
        use SpendRange::*;
        use TimeRange::*;
        Self {
            spend_ranges: table(&[
                (Zero, 0.0),
                (ZeroToTen, 5.0),
                (ZeroTo25, 12.5),
                (OneToTen, 5.5),
                (OneTo35, 17.5),
                (OneTo40, 20.5),
                (TenTo35, 22.5),
                (TenTo40, 25.0),
                (TenTo60, 35.0),
                (From25To50, 37.5),
                (From35To70, 52.5),
                (Over35, 45.0),
                (From40To100, 70.0),
                (From50To75, 62.5),
                (Over60, 80.0),
                (Over70, 90.0),
                (Over75, 100.0),
                (Over100, 150.0),
                (MoreThan40, 60.0),
                (NoPet, 0.0),
            ]),
            time_ranges: table(&[
                (NoTrain, 0.0),
                (NoBus, 0.0),
                (Under1, 0.5),
                (Under2, 1.0),
                (From1To3, 2.0),
                (From2To5, 3.5),
                (From3To6, 4.5),
                (From5To15, 10.0),
                (From6To10, 8.0),
                (From15To25, 20.0),
                (Over10, 15.0),
                (Over25, 30.0),
            ]),
            waste_ranges: table(&[
                (WasteRange::Nothing, 0.0),
                (WasteRange::UpTo10, 5.0),
                (WasteRange::From10To30, 20.0),
                (WasteRange::MoreThan30, 40.0),
            ]),
            offset_percentage: table(&[
                (FlightOffset::NoneOfThem, 0.0),
                (FlightOffset::Quarter, 25.0),
                (FlightOffset::Half, 50.0),
                (FlightOffset::ThreeQuarters, 75.0),
                (FlightOffset::All, 100.0),
                (FlightOffset::NotApplicable, 0.0),
            ]),
            bedrooms: table(&[
                (Bedrooms::One, 1.0),
                (Bedrooms::Two, 2.0),
                (Bedrooms::Three, 3.0),
                (Bedrooms::FourPlus, 4.5),
            ]),
            people: table(&[
                (People::One, 1.0),
                (People::Two, 2.0),
                (People::Three, 3.0),
                (People::Four, 4.0),
                (People::FivePlus, 5.5),
            ]),
        }
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self {
            version: DEFAULT_TABLE_VERSION.to_string(),
            food: FoodFactors::default(),
            travel: TravelFactors::default(),
            home: HomeFactors::default(),
            stuff: StuffFactors::default(),
            mappings: InputMappings::default(),
        }
    }
}

/// ------------ Factor lookups with defined fallbacks ------------

impl FoodFactors {
    /// Unknown diets use the "Meat in some meals" factor.
    pub fn diet_factor(&self, diet: Diet) -> f64 {
        self.diet_kg_per_day
            .get(&diet)
            .or_else(|| self.diet_kg_per_day.get(&Diet::MeatSomeMeals))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn waste_scale(&self, diet: Diet) -> f64 {
        match diet {
            Diet::MeatEveryMeal => self.waste_scale_heavy_meat,
            Diet::Vegetarian | Diet::Vegan => self.waste_scale_plant_based,
            _ => 1.0,
        }
    }

    pub fn sourcing_reduction(&self, s: LocalSourcing) -> f64 {
        self.local_sourcing_reduction.get(&s).copied().unwrap_or(0.0)
    }
}

impl TravelFactors {
    /// Unmapped vehicles use the medium petrol/diesel car factor.
    pub fn vehicle_factor(&self, v: SpecificVehicle) -> f64 {
        self.vehicle_kg_per_km
            .get(&v)
            .or_else(|| self.vehicle_kg_per_km.get(&SpecificVehicle::MediumCar))
            .copied()
            .unwrap_or(0.0)
    }
}

impl HomeFactors {
    /// Unmapped fuels use the gas factor.
    pub fn heating_factor(&self, h: HeatingSource) -> f64 {
        self.heating_kg_per_kwh
            .get(&h)
            .or_else(|| self.heating_kg_per_kwh.get(&HeatingSource::Gas))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn temp_adjustment(&self, t: WinterTemp) -> f64 {
        self.temp_adjustment.get(&t).copied().unwrap_or(0.0)
    }

    pub fn improvement(&self, i: HomeImprovement) -> f64 {
        self.improvement_reduction.get(&i).copied().unwrap_or(0.0)
    }

    /// Grid factor after the tariff: zero when fully renewable, reduced when partly.
    pub fn grid_factor(&self, tariff: GreenTariff) -> f64 {
        match tariff {
            GreenTariff::FullyRenewable => 0.0,
            GreenTariff::PartlyRenewable => self.grid_kg_per_kwh * self.partial_green_share,
            GreenTariff::No | GreenTariff::DontKnow => self.grid_kg_per_kwh,
        }
    }
}

impl StuffFactors {
    pub fn item(&self, p: Purchase) -> f64 {
        self.item_kg_per_year.get(&p).copied().unwrap_or(0.0)
    }
}

/// ------------ Validation ------------

fn non_negative(v: f64, key: &'static str) -> Result<(), CoreError> {
    if v.is_finite() && v >= 0.0 { Ok(()) } else { Err(CoreError::DomainOutOfRange(key)) }
}

fn unit_interval(v: f64, key: &'static str) -> Result<(), CoreError> {
    if v.is_finite() && (0.0..=1.0).contains(&v) { Ok(()) } else { Err(CoreError::DomainOutOfRange(key)) }
}

fn all_non_negative<K>(m: &BTreeMap<K, f64>, key: &'static str) -> Result<(), CoreError> {
    m.values().try_for_each(|v| non_negative(*v, key))
}

fn all_unit_interval<K>(m: &BTreeMap<K, f64>, key: &'static str) -> Result<(), CoreError> {
    m.values().try_for_each(|v| unit_interval(*v, key))
}

/// Check every coefficient against its domain. Run once after loading a table.
pub fn validate_domains(t: &EmissionFactorTable) -> Result<(), CoreError> {
    if t.version.trim().is_empty() {
        return Err(CoreError::DomainOutOfRange("version"));
    }

    // Food
    let f = &t.food;
    all_non_negative(&f.diet_kg_per_day, "food.diet_kg_per_day")?;
    non_negative(f.restaurant_kg_per_gbp, "food.restaurant_kg_per_gbp")?;
    non_negative(f.landfill_kg_per_kg, "food.landfill_kg_per_kg")?;
    non_negative(f.avg_waste_kg_per_person, "food.avg_waste_kg_per_person")?;
    non_negative(f.waste_scale_heavy_meat, "food.waste_scale_heavy_meat")?;
    non_negative(f.waste_scale_plant_based, "food.waste_scale_plant_based")?;
    all_unit_interval(&f.local_sourcing_reduction, "food.local_sourcing_reduction")?;

    // Travel
    let tr = &t.travel;
    all_non_negative(&tr.vehicle_kg_per_km, "travel.vehicle_kg_per_km")?;
    non_negative(tr.bus_kg_per_km, "travel.bus_kg_per_km")?;
    non_negative(tr.train_kg_per_km, "travel.train_kg_per_km")?;
    non_negative(tr.car_speed_kmh, "travel.car_speed_kmh")?;
    non_negative(tr.motorbike_speed_kmh, "travel.motorbike_speed_kmh")?;
    non_negative(tr.bus_speed_kmh, "travel.bus_speed_kmh")?;
    non_negative(tr.train_speed_kmh, "travel.train_speed_kmh")?;
    for band in [&tr.flights.domestic, &tr.flights.europe, &tr.flights.long_haul] {
        non_negative(band.kg_per_km, "travel.flights.kg_per_km")?;
        non_negative(band.distance_km, "travel.flights.distance_km")?;
    }
    non_negative(tr.flights.radiative_forcing, "travel.flights.radiative_forcing")?;
    non_negative(tr.flights.distance_uplift, "travel.flights.distance_uplift")?;

    // Home
    let h = &t.home;
    all_non_negative(&h.heating_kg_per_kwh, "home.heating_kg_per_kwh")?;
    non_negative(h.grid_kg_per_kwh, "home.grid_kg_per_kwh")?;
    if !h.temp_adjustment.values().all(|v| v.is_finite() && *v > -1.0 && *v < 1.0) {
        return Err(CoreError::DomainOutOfRange("home.temp_adjustment"));
    }
    all_unit_interval(&h.improvement_reduction, "home.improvement_reduction")?;
    unit_interval(h.improvement_cap, "home.improvement_cap")?;
    unit_interval(h.lights_off_reduction, "home.lights_off_reduction")?;
    unit_interval(h.partial_green_share, "home.partial_green_share")?;
    unit_interval(h.fixed_share, "home.fixed_share")?;
    non_negative(h.base_heating_kwh, "home.base_heating_kwh")?;
    non_negative(h.heating_kwh_per_bedroom, "home.heating_kwh_per_bedroom")?;
    non_negative(h.base_electricity_kwh, "home.base_electricity_kwh")?;
    non_negative(h.electricity_kwh_per_bedroom, "home.electricity_kwh_per_bedroom")?;

    // Stuff
    let s = &t.stuff;
    all_non_negative(&s.item_kg_per_year, "stuff.item_kg_per_year")?;
    non_negative(s.clothes_kg_per_gbp, "stuff.clothes_kg_per_gbp")?;
    non_negative(s.pets_kg_per_gbp, "stuff.pets_kg_per_gbp")?;
    non_negative(s.health_kg_per_gbp, "stuff.health_kg_per_gbp")?;
    non_negative(s.hobbies_kg_per_gbp, "stuff.hobbies_kg_per_gbp")?;
    non_negative(s.services_kg_per_year, "stuff.services_kg_per_year")?;
    unit_interval(s.recycling_reduction_per_category, "stuff.recycling_reduction_per_category")?;
    unit_interval(s.recycling_reduction_cap, "stuff.recycling_reduction_cap")?;

    // Mappings
    let m = &t.mappings;
    all_non_negative(&m.spend_ranges, "mappings.spend_ranges")?;
    all_non_negative(&m.time_ranges, "mappings.time_ranges")?;
    if !m.waste_ranges.values().all(|v| v.is_finite() && (0.0..=100.0).contains(v)) {
        return Err(CoreError::DomainOutOfRange("mappings.waste_ranges"));
    }
    if !m.offset_percentage.values().all(|v| v.is_finite() && (0.0..=100.0).contains(v)) {
        return Err(CoreError::DomainOutOfRange("mappings.offset_percentage"));
    }
    // Occupant and bedroom counts must be strictly positive: home emissions divide by people.
    if !m.bedrooms.values().all(|v| v.is_finite() && *v > 0.0) {
        return Err(CoreError::DomainOutOfRange("mappings.bedrooms"));
    }
    if !m.people.values().all(|v| v.is_finite() && *v > 0.0) {
        return Err(CoreError::DomainOutOfRange("mappings.people"));
    }

    Ok(())
}

impl EmissionFactorTable {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_domains(self)
    }
}
