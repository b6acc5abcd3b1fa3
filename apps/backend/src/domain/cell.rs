//! A single sheet cell.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire value used for wildcard cells.
pub const WILDCARD_WIRE: i16 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Number(u8),
    /// Pre-matched free cell; never compared against a draw.
    Wildcard,
}

impl Cell {
    pub fn number(self) -> Option<u8> {
        match self {
            Cell::Number(n) => Some(n),
            Cell::Wildcard => None,
        }
    }

    pub fn is_wildcard(self) -> bool {
        matches!(self, Cell::Wildcard)
    }

    pub fn wire_value(self) -> i16 {
        match self {
            Cell::Number(n) => i16::from(n),
            Cell::Wildcard => WILDCARD_WIRE,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i16(self.wire_value())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i16::deserialize(deserializer)?;
        match raw {
            WILDCARD_WIRE => Ok(Cell::Wildcard),
            1..=75 => Ok(Cell::Number(raw as u8)),
            _ => Err(serde::de::Error::custom(format!("Invalid cell value: {raw}"))),
        }
    }
}
