// crates/cf_io/tests/ingest.rs
//
// File-level ingestion: answers on disk → normalized record → canonical bytes.

use std::fs;

use assert_json_diff::assert_json_eq;
use serde_json::json;

use cf_io::answers::{load_answers, LabelPolicy};
use cf_io::canonical_json::{to_canonical_bytes, write_canonical_file};
use cf_io::hasher::sha256_hex;
use cf_io::IoError;

const ANSWERS: &str = r#"{
  "food": {
    "diet_type": "Meat in some meals",
    "eating_out_spend_per_week": "£10 - £40",
    "waste_percentage": "0% - 10%",
    "local_sourcing": "Some of the food I buy is locally sourced"
  },
  "travel": {
    "general_vehicle": "Car",
    "specific_vehicle": "Medium petrol or diesel car",
    "car_hours_per_week": "5 to 15 hours",
    "train_hours_per_week": "Under 2 hours",
    "bus_hours_per_week": "1 to 3 hours",
    "flights": { "domestic": 1, "europe": 1, "long_haul": 0 },
    "flight_offset_percentage": "None of them"
  },
  "home": {
    "house_type": "Semi-detached",
    "bedrooms": "3",
    "people_count": "2",
    "heating_source": "Gas",
    "green_tariff": "Hydro, probably",
    "lights_off": "Yes",
    "winter_temp": "18° - 21°C",
    "improvements": ["Energy saving lightbulbs", "Loft insulation", "Double glazing"]
  },
  "stuff": {
    "purchases": ["Mobile phone or tablet"],
    "clothes_spend": "£40 - £100",
    "pet_spend": "I don't have a pet",
    "health_spend": "£10 - £60",
    "hobbies_spend": "£25 - £50",
    "contracts_spend": "£35 - £70",
    "recycling": ["Paper", "Tin cans", "Plastic", "Glass"]
  }
}"#;

#[test]
fn loads_normalizes_and_reserializes_with_labels() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("answers.json");
    fs::write(&p, ANSWERS).unwrap();

    let loaded = load_answers(&p, LabelPolicy::Lenient).unwrap();
    assert_eq!(loaded.substitutions.len(), 1);
    assert_eq!(loaded.substitutions[0].pointer, "/home/green_tariff");

    // The unrecognized tariff is dropped; everything else keeps its label.
    let v = serde_json::to_value(&loaded.record).unwrap();
    assert_json_eq!(
        v["home"],
        json!({
            "house_type": "Semi-detached",
            "bedrooms": "3",
            "people_count": "2",
            "heating_source": "Gas",
            "lights_off": "Yes",
            "winter_temp": "18° - 21°C",
            "improvements": ["Loft insulation", "Double glazing", "Energy saving lightbulbs"]
        })
    );
    assert_json_eq!(v["travel"]["flights"], json!({"domestic": 1, "europe": 1, "long_haul": 0}));
}

#[test]
fn strict_policy_reports_the_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("answers.json");
    fs::write(&p, ANSWERS).unwrap();

    match load_answers(&p, LabelPolicy::Strict) {
        Err(IoError::Label { pointer, label }) => {
            assert_eq!(pointer, "/home/green_tariff");
            assert_eq!(label, "Hydro, probably");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn written_canonical_file_hashes_like_its_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("answers.json");
    fs::write(&src, ANSWERS).unwrap();
    let loaded = load_answers(&src, LabelPolicy::Lenient).unwrap();

    let out = dir.path().join("normalized").join("answers.json");
    write_canonical_file(&out, &loaded.record).unwrap();
    let on_disk = fs::read(&out).unwrap();
    assert_eq!(on_disk, to_canonical_bytes(&loaded.record).unwrap());
    assert_eq!(sha256_hex(&on_disk).len(), 64);
}
