//! Robot sensor capabilities

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

bitflags! {
    /// Sensors currently fitted to a robot
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sensors: u8 {
        const DISTANCE = 1 << 0;
        const ROOM = 1 << 1;
    }
}

impl Default for Sensors {
    fn default() -> Self {
        Self::all()
    }
}

impl Serialize for Sensors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sensors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Sensors::from_bits_truncate(bits))
    }
}

/// A single sensor kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Sensor {
    Distance,
    Room,
}

impl Sensor {
    pub const fn flag(self) -> Sensors {
        match self {
            Sensor::Distance => Sensors::DISTANCE,
            Sensor::Room => Sensors::ROOM,
        }
    }
}
