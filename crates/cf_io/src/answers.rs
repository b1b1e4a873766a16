//! Answer ingestion: raw questionnaire JSON → typed `AnswerRecord`.
//!
//! The raw document is read with string-typed fields, then each label is
//! normalized through `Label::from_answer`. What happens to a label that
//! matches nothing is decided by the `LabelPolicy`.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use cf_core::answers::{AnswerRecord, Flights, FoodAnswers, HomeAnswers, StuffAnswers, TravelAnswers};
use cf_core::ids::Sha256;
use cf_core::labels::Label;

use crate::hasher::sha256_canonical;
use crate::loader::read_local;
use crate::{IoError, IoResult};

/// How unrecognized labels are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Fail with `IoError::Label`.
    Strict,
    /// Treat as unanswered and record a `Substitution`.
    #[default]
    Lenient,
}

/// A label that was dropped under `LabelPolicy::Lenient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// JSON Pointer into the answers document.
    pub pointer: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAnswers {
    pub record: AnswerRecord,
    pub substitutions: Vec<Substitution>,
    /// Canonical digest of the document as supplied.
    pub sha256: Sha256,
}

// ----------------------------- Raw wire shapes -----------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFood {
    diet_type: Option<String>,
    eating_out_spend_per_week: Option<String>,
    waste_percentage: Option<String>,
    local_sourcing: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFlights {
    domestic: i64,
    europe: i64,
    long_haul: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTravel {
    general_vehicle: Option<String>,
    specific_vehicle: Option<String>,
    car_hours_per_week: Option<String>,
    train_hours_per_week: Option<String>,
    bus_hours_per_week: Option<String>,
    flights: RawFlights,
    flight_offset_percentage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawHome {
    house_type: Option<String>,
    bedrooms: Option<String>,
    people_count: Option<String>,
    heating_source: Option<String>,
    green_tariff: Option<String>,
    lights_off: Option<String>,
    winter_temp: Option<String>,
    improvements: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawStuff {
    purchases: Vec<String>,
    clothes_spend: Option<String>,
    pet_spend: Option<String>,
    #[serde(alias = "beauty_spend")]
    health_spend: Option<String>,
    hobbies_spend: Option<String>,
    contracts_spend: Option<String>,
    recycling: Vec<String>,
}

const SECTIONS: [&str; 4] = ["food", "travel", "home", "stuff"];

// ----------------------------- Public API -----------------------------

/// Read, parse and normalize an answers file.
pub fn load_answers(path: &Path, policy: LabelPolicy) -> IoResult<LoadedAnswers> {
    let bytes = read_local(path)?;
    parse_answers(&bytes, policy)
}

/// Parse and normalize an answers document held in memory.
pub fn parse_answers(bytes: &[u8], policy: LabelPolicy) -> IoResult<LoadedAnswers> {
    let doc: Value = serde_json::from_slice(bytes)?;
    let obj = doc.as_object().ok_or_else(|| IoError::Json {
        pointer: "/".into(),
        msg: "answers must be a JSON object".into(),
    })?;
    if let Some(k) = obj.keys().find(|k| !SECTIONS.contains(&k.as_str())) {
        return Err(IoError::Json {
            pointer: format!("/{k}"),
            msg: "unknown section".into(),
        });
    }

    let food: RawFood = section(&doc, "food")?;
    let travel: RawTravel = section(&doc, "travel")?;
    let home: RawHome = section(&doc, "home")?;
    let stuff: RawStuff = section(&doc, "stuff")?;

    let mut n = Normalizer { policy, notes: Vec::new() };
    let record = AnswerRecord {
        food: n.food(food)?,
        travel: n.travel(travel)?,
        home: n.home(home)?,
        stuff: n.stuff(stuff)?,
    };

    Ok(LoadedAnswers {
        record,
        substitutions: n.notes,
        sha256: sha256_canonical(&doc)?,
    })
}

// ----------------------------- Internals -----------------------------

/// Deserialize one section; absent or null sections are empty.
fn section<T: DeserializeOwned + Default>(doc: &Value, name: &str) -> IoResult<T> {
    match doc.get(name) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => T::deserialize(v).map_err(|e| IoError::Json {
            pointer: format!("/{name}"),
            msg: e.to_string(),
        }),
    }
}

struct Normalizer {
    policy: LabelPolicy,
    notes: Vec<Substitution>,
}

impl Normalizer {
    fn reject(&mut self, pointer: String, label: &str) -> IoResult<()> {
        match self.policy {
            LabelPolicy::Strict => Err(IoError::Label { pointer, label: label.to_string() }),
            LabelPolicy::Lenient => {
                warn!(%pointer, label, "unrecognized answer label; treating as unanswered");
                self.notes.push(Substitution { pointer, label: label.to_string() });
                Ok(())
            }
        }
    }

    /// Single choice. A blank string counts as unanswered.
    fn one<T: Label>(&mut self, pointer: &str, raw: Option<String>) -> IoResult<Option<T>> {
        let Some(s) = raw else { return Ok(None) };
        if s.trim().is_empty() {
            return Ok(None);
        }
        match T::from_answer(&s) {
            Some(v) => Ok(Some(v)),
            None => self.reject(pointer.to_string(), &s).map(|()| None),
        }
    }

    /// Multi-select. Duplicates collapse.
    fn many<T: Label>(&mut self, pointer: &str, raw: Vec<String>) -> IoResult<BTreeSet<T>> {
        let mut out = BTreeSet::new();
        for (i, s) in raw.into_iter().enumerate() {
            match T::from_answer(&s) {
                Some(v) => {
                    out.insert(v);
                }
                None => self.reject(format!("{pointer}/{i}"), &s)?,
            }
        }
        Ok(out)
    }

    fn food(&mut self, r: RawFood) -> IoResult<FoodAnswers> {
        Ok(FoodAnswers {
            diet_type: self.one("/food/diet_type", r.diet_type)?,
            eating_out_spend_per_week: self
                .one("/food/eating_out_spend_per_week", r.eating_out_spend_per_week)?,
            waste_percentage: self.one("/food/waste_percentage", r.waste_percentage)?,
            local_sourcing: self.one("/food/local_sourcing", r.local_sourcing)?,
        })
    }

    fn travel(&mut self, r: RawTravel) -> IoResult<TravelAnswers> {
        Ok(TravelAnswers {
            general_vehicle: self.one("/travel/general_vehicle", r.general_vehicle)?,
            specific_vehicle: self.one("/travel/specific_vehicle", r.specific_vehicle)?,
            car_hours_per_week: self.one("/travel/car_hours_per_week", r.car_hours_per_week)?,
            train_hours_per_week: self.one("/travel/train_hours_per_week", r.train_hours_per_week)?,
            bus_hours_per_week: self.one("/travel/bus_hours_per_week", r.bus_hours_per_week)?,
            flights: Flights {
                domestic: count("/travel/flights/domestic", r.flights.domestic)?,
                europe: count("/travel/flights/europe", r.flights.europe)?,
                long_haul: count("/travel/flights/long_haul", r.flights.long_haul)?,
            },
            flight_offset_percentage: self
                .one("/travel/flight_offset_percentage", r.flight_offset_percentage)?,
        })
    }

    fn home(&mut self, r: RawHome) -> IoResult<HomeAnswers> {
        Ok(HomeAnswers {
            house_type: self.one("/home/house_type", r.house_type)?,
            bedrooms: self.one("/home/bedrooms", r.bedrooms)?,
            people_count: self.one("/home/people_count", r.people_count)?,
            heating_source: self.one("/home/heating_source", r.heating_source)?,
            green_tariff: self.one("/home/green_tariff", r.green_tariff)?,
            lights_off: self.one("/home/lights_off", r.lights_off)?,
            winter_temp: self.one("/home/winter_temp", r.winter_temp)?,
            improvements: self.many("/home/improvements", r.improvements)?,
        })
    }

    fn stuff(&mut self, r: RawStuff) -> IoResult<StuffAnswers> {
        Ok(StuffAnswers {
            purchases: self.many("/stuff/purchases", r.purchases)?,
            clothes_spend: self.one("/stuff/clothes_spend", r.clothes_spend)?,
            pet_spend: self.one("/stuff/pet_spend", r.pet_spend)?,
            health_spend: self.one("/stuff/health_spend", r.health_spend)?,
            hobbies_spend: self.one("/stuff/hobbies_spend", r.hobbies_spend)?,
            contracts_spend: self.one("/stuff/contracts_spend", r.contracts_spend)?,
            recycling: self.many("/stuff/recycling", r.recycling)?,
        })
    }
}

fn count(pointer: &str, v: i64) -> IoResult<u32> {
    u32::try_from(v).map_err(|_| IoError::Json {
        pointer: pointer.to_string(),
        msg: format!("flight count must be a non-negative integer, got {v}"),
    })
}
