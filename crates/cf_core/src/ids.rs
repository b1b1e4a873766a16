//! Newtypes and parsers for output/digest identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn is_lower_hex_len(s: &str, n: usize) -> bool {
    s.len() == n && is_lower_hex(s)
}

fn is_ts_utc_z(s: &str) -> bool {
    // Strict "YYYY-MM-DDTHH:MM:SSZ" (length 20)
    let b = s.as_bytes();
    if b.len() != 20 { return false; }
    b.iter().enumerate().all(|(i, c)| match i {
        4 | 7 => *c == b'-',
        10 => *c == b'T',
        13 | 16 => *c == b':',
        19 => *c == b'Z',
        _ => c.is_ascii_digit(),
    })
}

macro_rules! def_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
        }

        impl From<$name> for String {
            fn from(v: $name) -> String { v.0 }
        }
    };
}

def_id!(
    /// 64-hex lowercase digest.
    Sha256
);
def_id!(
    /// "RES:" + 64-hex (lowercase)
    ResultId
);
def_id!(
    /// "RUN:" + "<YYYY-MM-DDTHH:MM:SSZ>" + ":" + 64-hex (lowercase)
    RunId
);

impl FromStr for Sha256 {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_lower_hex_len(s, 64) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidHex) }
    }
}

impl FromStr for ResultId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("RES:").ok_or(CoreError::InvalidId)?;
        if is_lower_hex_len(rest, 64) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidId) }
    }
}

impl FromStr for RunId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("RUN:").ok_or(CoreError::InvalidId)?;
        let (ts, hash) = match (rest.get(..20), rest.get(20..)) {
            (Some(ts), Some(tail)) => (ts, tail.strip_prefix(':').ok_or(CoreError::InvalidId)?),
            _ => return Err(CoreError::InvalidId),
        };
        if !is_ts_utc_z(ts) { return Err(CoreError::InvalidTimestamp); }
        if !is_lower_hex_len(hash, 64) { return Err(CoreError::InvalidId); }
        Ok(Self(s.to_string()))
    }
}

impl ResultId {
    /// Hex digest part (after "RES:").
    pub fn digest(&self) -> &str { &self.0[4..] }
}

impl RunId {
    pub fn timestamp(&self) -> &str { &self.0[4..24] }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn parses_result_and_run_ids() {
        let res: ResultId = format!("RES:{HEX}").parse().unwrap();
        assert_eq!(res.digest(), HEX);

        let run: RunId = format!("RUN:2025-08-12T10:00:00Z:{HEX}").parse().unwrap();
        assert_eq!(run.timestamp(), "2025-08-12T10:00:00Z");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!(format!("RES:{}", HEX.to_uppercase()).parse::<ResultId>(), Err(CoreError::InvalidId));
        assert_eq!("RUN:2025-08-12T10:00:00Z:ab".parse::<RunId>(), Err(CoreError::InvalidId));
        assert_eq!(
            format!("RUN:2025-08-12T10:00:00+0:{HEX}").parse::<RunId>(),
            Err(CoreError::InvalidId)
        );
        assert_eq!(
            format!("RUN:2025-08-12X10:00:00Z:{HEX}").parse::<RunId>(),
            Err(CoreError::InvalidTimestamp)
        );
        assert!("abc".parse::<Sha256>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let res: ResultId = format!("RES:{HEX}").parse().unwrap();
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v, serde_json::Value::String(format!("RES:{HEX}")));
        assert!(serde_json::from_value::<ResultId>(serde_json::json!("RES:zz")).is_err());
    }
}
