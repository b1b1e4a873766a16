//! Questionnaire answer labels as closed enums.
//!
//! The wire form of every variant is the exact human-readable label shown in the
//! questionnaire ("£10 - £40", "5 to 15 hours", ...). Serialization writes the
//! label; deserialization accepts the label (trimmed) and the few historical
//! variants handled by `from_answer`.

use core::fmt;
use core::str::FromStr;

use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// A closed set of questionnaire labels.
pub trait Label: Sized + Copy + Eq + Ord + 'static {
    /// Every variant, in questionnaire order.
    const ALL: &'static [Self];
    /// Short human name of the answer kind (used in errors and logs).
    const KIND: &'static str;

    fn label(self) -> &'static str;

    /// Exact match on the trimmed label.
    fn from_label(s: &str) -> Option<Self> {
        let t = s.trim();
        Self::ALL.iter().copied().find(|v| v.label() == t)
    }

    /// Exact match first, then any permissive matching the kind allows.
    fn from_answer(s: &str) -> Option<Self> {
        Self::from_label(s)
    }
}

/// Define a label enum with explicit wire labels.
/// An optional `fuzzy = path` adds a fallback matcher used by `from_answer`.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) => { $($variant:ident = $label:literal),+ $(,)? }
        $(, fuzzy = $fuzzy:path)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl Label for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)+];
            const KIND: &'static str = $kind;

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            $(
                fn from_answer(s: &str) -> Option<Self> {
                    Self::from_label(s).or_else(|| $fuzzy(s.trim()))
                }
            )?
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Label>::from_answer(s).ok_or(CoreError::UnknownLabel($kind))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                <Self as Label>::from_answer(&s)
                    .ok_or_else(|| D::Error::invalid_value(Unexpected::Str(&s), &concat!("a ", $kind, " label")))
            }
        }
    };
}

/* ------------------------------- Food ------------------------------- */

label_enum!(
    /// Diet categories, heaviest meat consumption first.
    Diet ("diet") => {
        MeatEveryMeal = "Meat in every meal",
        MeatSomeMeals = "Meat in some meals",
        NoBeef        = "No beef",
        MeatRarely    = "Meat very rarely",
        Vegetarian    = "Vegetarian",
        Vegan         = "Vegan",
    }
);

label_enum!(
    /// Weekly or monthly spend bands used across food and stuff questions.
    SpendRange ("spend range") => {
        Zero           = "£0",
        ZeroToTen      = "£0 - £10",
        ZeroTo25       = "£0 - £25",
        OneToTen       = "£1 - £10",
        OneTo35        = "£1 - £35",
        OneTo40        = "£1 - £40",
        TenTo35        = "£10 - £35",
        TenTo40        = "£10 - £40",
        TenTo60        = "£10 - £60",
        From25To50     = "£25 - £50",
        From35To70     = "£35 - £70",
        Over35         = "£35+",
        From40To100    = "£40 - £100",
        From50To75     = "£50 - £75",
        Over60         = "£60+",
        Over70         = "£70+",
        Over75         = "£75+",
        Over100        = "£100+",
        MoreThan40     = "More than £40",
        NoPet          = "I don't have a pet",
    }
);

label_enum!(
    WasteRange ("waste range") => {
        Nothing       = "None",
        UpTo10        = "0% - 10%",
        From10To30    = "10% - 30%",
        MoreThan30    = "More than 30%",
    }
);

label_enum!(
    LocalSourcing ("local sourcing") => {
        ALot       = "A lot of the food I buy is locally sourced",
        Partly     = "Some of the food I buy is locally sourced",
        DontWorry  = "I don't worry about where my food comes from",
    }
);

/* ------------------------------ Travel ------------------------------ */

fn general_vehicle_fuzzy(s: &str) -> Option<GeneralVehicle> {
    s.contains("Neither").then_some(GeneralVehicle::Neither)
}

label_enum!(
    /// "Neither" covers walk/cycle/public-transport-only households.
    GeneralVehicle ("general vehicle") => {
        Car       = "Car",
        Motorbike = "Motorbike",
        Neither   = "Neither",
    },
    fuzzy = general_vehicle_fuzzy
);

label_enum!(
    SpecificVehicle ("specific vehicle") => {
        Electric      = "Electric car",
        PlugInHybrid  = "Plug-in hybrid car",
        Hybrid        = "Hybrid car",
        SmallCar      = "Small petrol or diesel car",
        MediumCar     = "Medium petrol or diesel car",
        LargeCar      = "Large petrol or diesel car",
        Motorbike     = "Motorbike",
    }
);

label_enum!(
    /// Hours-per-week bands. The two "don't travel" answers map to zero.
    TimeRange ("time range") => {
        NoTrain      = "I don't travel by train",
        NoBus        = "I don't travel by bus",
        Under1       = "Under 1 hour",
        Under2       = "Under 2 hours",
        From1To3     = "1 to 3 hours",
        From2To5     = "2 to 5 hours",
        From3To6     = "3 to 6 hours",
        From5To15    = "5 to 15 hours",
        From6To10    = "6 to 10 hours",
        From15To25   = "15 to 25 hours",
        Over10       = "Over 10 hours",
        Over25       = "Over 25 hours",
    }
);

label_enum!(
    FlightOffset ("flight offset") => {
        NoneOfThem    = "None of them",
        Quarter       = "25%",
        Half          = "50%",
        ThreeQuarters = "75%",
        All           = "All of them",
        NotApplicable = "Not applicable",
    }
);

/* ------------------------------- Home ------------------------------- */

label_enum!(
    HouseType ("house type") => {
        Flat         = "Flat",
        Terraced     = "Terraced",
        SemiDetached = "Semi-detached",
        Detached     = "Detached",
    }
);

label_enum!(
    Bedrooms ("bedrooms") => {
        One       = "1",
        Two       = "2",
        Three     = "3",
        FourPlus  = "4 or more",
    }
);

label_enum!(
    People ("people count") => {
        One       = "1",
        Two       = "2",
        Three     = "3",
        Four      = "4",
        FivePlus  = "5 or more",
    }
);

label_enum!(
    HeatingSource ("heating source") => {
        Gas         = "Gas",
        Oil         = "Oil",
        Electricity = "Electricity",
        Wood        = "Wood",
        Heatpump    = "Heatpump",
    }
);

fn green_tariff_fuzzy(s: &str) -> Option<GreenTariff> {
    // Partial must be tested first: its label also contains "100%".
    if s.contains("less than 100%") {
        Some(GreenTariff::PartlyRenewable)
    } else if s.contains("100%") {
        Some(GreenTariff::FullyRenewable)
    } else {
        None
    }
}

label_enum!(
    GreenTariff ("green tariff") => {
        No              = "No",
        FullyRenewable  = "Yes, 100% renewable",
        PartlyRenewable = "Yes, less than 100% renewable",
        DontKnow        = "I don't know",
    },
    fuzzy = green_tariff_fuzzy
);

label_enum!(
    LightsOff ("lights off") => {
        Yes = "Yes",
        No  = "No",
    }
);

label_enum!(
    WinterTemp ("winter temperature") => {
        Below14    = "below 14°C",
        From14To17 = "14° - 17°C",
        From18To21 = "18° - 21°C",
        Over21     = "Over 21°C",
    }
);

label_enum!(
    HomeImprovement ("home improvement") => {
        LoftInsulation    = "Loft insulation",
        WallInsulation    = "Cavity or solid wall insulation",
        CondensingBoiler  = "Condensing boiler",
        DoubleGlazing     = "Double glazing",
        SolarPanels       = "Solar panels",
        LowEnergyBulbs    = "Energy saving lightbulbs",
    }
);

/* ------------------------------- Stuff ------------------------------ */

label_enum!(
    Purchase ("purchase") => {
        Electronics = "TV, laptop or PC",
        Furniture   = "Large item of furniture",
        Appliance   = "Washing machine, dishwasher, tumble dryer or fridge freezer",
        Phone       = "Mobile phone or tablet",
    }
);

label_enum!(
    Recycling ("recycling") => {
        Paper   = "Paper",
        TinCans = "Tin cans",
        Plastic = "Plastic",
        Glass   = "Glass",
        Food    = "Food",
    }
);
