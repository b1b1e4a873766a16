//! Input mapper: categorical answer → representative magnitude.
//!
//! Lookups never fail. A label that does not parse, or a band missing from a
//! custom table, resolves to a default (the caller's for `lookup`, 0.0 or 1.0
//! for the typed accessors).

use crate::factors::{EmissionFactorTable, InputMappings};
use crate::labels::*;

/// Named mapping tables addressable by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingTable {
    SpendRanges,
    TimeRanges,
    WasteRanges,
    OffsetPercentage,
    Bedrooms,
    People,
}

/// Read-only view over a table's input mappings.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'t> {
    m: &'t InputMappings,
}

impl<'t> Mapper<'t> {
    pub fn new(m: &'t InputMappings) -> Self {
        Self { m }
    }

    pub fn spend(&self, r: SpendRange) -> f64 {
        self.m.spend_ranges.get(&r).copied().unwrap_or(0.0)
    }

    pub fn time(&self, r: TimeRange) -> f64 {
        self.m.time_ranges.get(&r).copied().unwrap_or(0.0)
    }

    pub fn waste(&self, r: WasteRange) -> f64 {
        self.m.waste_ranges.get(&r).copied().unwrap_or(0.0)
    }

    pub fn offset_pct(&self, o: FlightOffset) -> f64 {
        self.m.offset_percentage.get(&o).copied().unwrap_or(0.0)
    }

    pub fn bedrooms(&self, b: Bedrooms) -> f64 {
        self.m.bedrooms.get(&b).copied().unwrap_or(1.0)
    }

    pub fn people(&self, p: People) -> f64 {
        self.m.people.get(&p).copied().unwrap_or(1.0)
    }

    /// Resolve a raw label against the named table; unknown → `default`.
    pub fn lookup(&self, table: MappingTable, label: &str, default: f64) -> f64 {
        fn get<K: Label>(map: &std::collections::BTreeMap<K, f64>, label: &str) -> Option<f64> {
            K::from_answer(label).and_then(|k| map.get(&k).copied())
        }
        let hit = match table {
            MappingTable::SpendRanges => get(&self.m.spend_ranges, label),
            MappingTable::TimeRanges => get(&self.m.time_ranges, label),
            MappingTable::WasteRanges => get(&self.m.waste_ranges, label),
            MappingTable::OffsetPercentage => get(&self.m.offset_percentage, label),
            MappingTable::Bedrooms => get(&self.m.bedrooms, label),
            MappingTable::People => get(&self.m.people, label),
        };
        hit.unwrap_or(default)
    }
}

impl EmissionFactorTable {
    pub fn mapper(&self) -> Mapper<'_> {
        Mapper::new(&self.mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_top_buckets_use_expected_values() {
        let t = EmissionFactorTable::default();
        let m = t.mapper();
        assert_eq!(m.bedrooms(Bedrooms::FourPlus), 4.5);
        assert_eq!(m.people(People::FivePlus), 5.5);
        assert_eq!(m.spend(SpendRange::TenTo40), 25.0);
        assert_eq!(m.time(TimeRange::From5To15), 10.0);
        assert_eq!(m.waste(WasteRange::UpTo10), 5.0);
        assert_eq!(m.offset_pct(FlightOffset::All), 100.0);
    }

    #[test]
    fn lookup_by_label_falls_back_to_caller_default() {
        let t = EmissionFactorTable::default();
        let m = t.mapper();
        assert_eq!(m.lookup(MappingTable::SpendRanges, "£10 - £40", 0.0), 25.0);
        assert_eq!(m.lookup(MappingTable::SpendRanges, "a lot", 0.0), 0.0);
        assert_eq!(m.lookup(MappingTable::People, "seven", 1.0), 1.0);
        assert_eq!(m.lookup(MappingTable::Bedrooms, "4 or more", 1.0), 4.5);
        // A recognized label in the wrong table is still unknown there.
        assert_eq!(m.lookup(MappingTable::TimeRanges, "£0", -1.0), -1.0);
    }

    #[test]
    fn missing_band_in_custom_table_uses_typed_default() {
        let mut t = EmissionFactorTable::default();
        t.mappings.people.clear();
        t.mappings.time_ranges.remove(&TimeRange::Over25);
        let m = t.mapper();
        assert_eq!(m.people(People::Three), 1.0);
        assert_eq!(m.time(TimeRange::Over25), 0.0);
    }
}
