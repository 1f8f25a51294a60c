//! Character races and their body gumps.

use crate::error::Error;

/// A playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    Human,
    Elf,
    Gargoyle,
}

impl Race {
    /// Looks up a race by its wire type code (1 = human, 2 = elf, 3 = gargoyle).
    pub fn from_type(race_type: u8) -> Result<Self, Error> {
        match race_type {
            1 => Ok(Self::Human),
            2 => Ok(Self::Elf),
            3 => Ok(Self::Gargoyle),
            other => Err(Error::InvalidRace(other)),
        }
    }

    pub fn race_type(self) -> u8 {
        match self {
            Self::Human => 1,
            Self::Elf => 2,
            Self::Gargoyle => 3,
        }
    }

    /// Paperdoll body gump for this race.
    pub fn body_id(self, female: bool) -> u16 {
        let male = match self {
            Self::Human => 400,
            Self::Elf => 605,
            Self::Gargoyle => 666,
        };
        if female { male + 1 } else { male }
    }
}
