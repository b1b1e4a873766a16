//! Travel estimator: private vehicle, train, bus, and flights.
//!
//! Ground travel converts weekly hours to annual kilometres through a
//! characteristic speed per mode. Flights use a nominal distance per band with
//! a routing uplift, then a radiative-forcing multiplier; offsetting applies to
//! the flight component only.

use cf_core::answers::{Flights, TravelAnswers};
use cf_core::factors::{EmissionFactorTable, FlightBand, FlightFactors};
use cf_core::labels::GeneralVehicle;
use cf_core::rounding::round4;

use crate::WEEKS_PER_YEAR;

/// Unrounded travel components, kg CO2e/year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelParts {
    pub private_vehicle: f64,
    pub train: f64,
    pub bus: f64,
    /// Flights after radiative forcing, before offsetting.
    pub flights_gross: f64,
    pub flights_net: f64,
}

impl TravelParts {
    pub fn ground(&self) -> f64 {
        self.private_vehicle + self.train + self.bus
    }

    pub fn total(&self) -> f64 {
        self.private_vehicle + self.train + self.bus + self.flights_net
    }
}

fn annual_km(hours_per_week: f64, speed_kmh: f64) -> f64 {
    hours_per_week * speed_kmh * WEEKS_PER_YEAR
}

/// Flight emissions after radiative forcing (no offset).
pub fn flight_emissions(flights: &Flights, f: &FlightFactors) -> f64 {
    let band = |trips: u32, b: &FlightBand| {
        f64::from(trips) * (b.distance_km * f.distance_uplift) * b.kg_per_km
    };
    let raw = band(flights.domestic, &f.domestic)
        + band(flights.europe, &f.europe)
        + band(flights.long_haul, &f.long_haul);
    raw * f.radiative_forcing
}

pub fn travel_parts(a: &TravelAnswers, t: &EmissionFactorTable) -> TravelParts {
    let tr = &t.travel;
    let m = t.mapper();

    // 1. Car / motorbike
    let general = a.vehicle();
    let private_vehicle = match general {
        GeneralVehicle::Neither => 0.0,
        GeneralVehicle::Car | GeneralVehicle::Motorbike => {
            let speed = if general == GeneralVehicle::Motorbike {
                tr.motorbike_speed_kmh
            } else {
                tr.car_speed_kmh
            };
            annual_km(m.time(a.car_hours()), speed) * tr.vehicle_factor(a.specific())
        }
    };

    // 2–3. Public transport; "don't travel by X" maps to zero hours.
    let train = annual_km(m.time(a.train_hours()), tr.train_speed_kmh) * tr.train_kg_per_km;
    let bus = annual_km(m.time(a.bus_hours()), tr.bus_speed_kmh) * tr.bus_kg_per_km;

    // 4. Flights, then offset
    let flights_gross = flight_emissions(&a.flights, &tr.flights);
    let offset = offset_fraction(m.offset_pct(a.offset()));
    let flights_net = flights_gross * (1.0 - offset);

    TravelParts { private_vehicle, train, bus, flights_gross, flights_net }
}

fn offset_fraction(pct: f64) -> f64 {
    (pct / 100.0).clamp(0.0, 1.0)
}

/// Annual travel emissions in kg CO2e, rounded to 4 dp.
pub fn estimate_travel(a: &TravelAnswers, t: &EmissionFactorTable) -> f64 {
    round4(travel_parts(a, t).total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::labels::*;
    use proptest::prelude::*;
    use proptest::sample::select;

    fn reference() -> TravelAnswers {
        TravelAnswers {
            general_vehicle: Some(GeneralVehicle::Car),
            specific_vehicle: Some(SpecificVehicle::MediumCar),
            car_hours_per_week: Some(TimeRange::From5To15),
            train_hours_per_week: Some(TimeRange::Under2),
            bus_hours_per_week: Some(TimeRange::From1To3),
            flights: Flights { domestic: 1, europe: 1, long_haul: 0 },
            flight_offset_percentage: Some(FlightOffset::NoneOfThem),
        }
    }

    #[test]
    fn reference_household() {
        let t = EmissionFactorTable::default();
        let p = travel_parts(&reference(), &t);
        assert!((p.private_vehicle - 5005.0).abs() < 1e-9);
        assert!((p.train - 124.8).abs() < 1e-9);
        assert!((p.bus - 208.0).abs() < 1e-9);
        assert!((p.flights_net - 727.32).abs() < 1e-9);
        assert!((estimate_travel(&reference(), &t) - 6065.12).abs() < 1e-9);
    }

    #[test]
    fn empty_answers_drive_a_medium_car_two_hours_a_week() {
        let t = EmissionFactorTable::default();
        // 1 h * 35 km/h * 52 * 0.275
        assert!((estimate_travel(&TravelAnswers::default(), &t) - 500.5).abs() < 1e-9);
    }

    #[test]
    fn motorbike_uses_motorbike_speed() {
        let t = EmissionFactorTable::default();
        let a = TravelAnswers {
            general_vehicle: Some(GeneralVehicle::Motorbike),
            specific_vehicle: Some(SpecificVehicle::Motorbike),
            car_hours_per_week: Some(TimeRange::From1To3),
            ..TravelAnswers::default()
        };
        // 2 h * 45 km/h * 52 * 0.11
        assert!((travel_parts(&a, &t).private_vehicle - 514.8).abs() < 1e-9);
    }

    #[test]
    fn long_haul_band() {
        let t = EmissionFactorTable::default();
        let f = Flights { domestic: 0, europe: 0, long_haul: 2 };
        // 2 * 6600 km * 0.15 * 1.9
        assert!((flight_emissions(&f, &t.travel.flights) - 3762.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn neither_means_no_private_vehicle(
            hours in select(TimeRange::ALL),
            spec in select(SpecificVehicle::ALL),
        ) {
            let t = EmissionFactorTable::default();
            let a = TravelAnswers {
                general_vehicle: Some(GeneralVehicle::Neither),
                specific_vehicle: Some(spec),
                car_hours_per_week: Some(hours),
                ..reference()
            };
            prop_assert_eq!(travel_parts(&a, &t).private_vehicle, 0.0);
        }

        #[test]
        fn full_offset_cancels_flights_only(
            dom in 0u32..20, eur in 0u32..20, long in 0u32..20,
            car in select(TimeRange::ALL),
        ) {
            let t = EmissionFactorTable::default();
            let base = TravelAnswers {
                car_hours_per_week: Some(car),
                flights: Flights { domestic: dom, europe: eur, long_haul: long },
                ..reference()
            };
            let offset = TravelAnswers { flight_offset_percentage: Some(FlightOffset::All), ..base.clone() };
            let p0 = travel_parts(&base, &t);
            let p1 = travel_parts(&offset, &t);
            prop_assert_eq!(p1.flights_net, 0.0);
            prop_assert_eq!(p0.ground(), p1.ground());
            prop_assert_eq!(p0.flights_gross, p1.flights_gross);
        }
    }
}
