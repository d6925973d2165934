//! Registry of camera log spaces.

use crate::ColorError;
use std::fmt;
use std::str::FromStr;
use unilog_primaries::{self as p, Primaries};
use unilog_transfer::Curve;

/// A camera log encoding: transfer curve plus gamut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSpace {
    /// Sony S-Log3 / S-Gamut3.
    SLog3,
    /// Sony S-Log3 / S-Gamut3.Cine.
    SLog3Cine,
    /// Fujifilm F-Log / F-Gamut.
    FLog,
    /// Fujifilm F-Log2 / F-Gamut.
    FLog2,
    /// Fujifilm F-Log2 / F-Gamut C.
    FLog2C,
    /// Canon Log 2 / Cinema Gamut.
    CLog2,
    /// Canon Log 3 / Cinema Gamut.
    CLog3,
    /// ARRI LogC3 / ARRI Wide Gamut 3.
    LogC3,
    /// ARRI LogC4 / ARRI Wide Gamut 4.
    LogC4,
    /// Panasonic V-Log / V-Gamut.
    VLog,
    /// Nikon N-Log / N-Gamut.
    NLog,
    /// Leica L-Log / BT.2020.
    LLog,
    /// DaVinci Intermediate / DaVinci Wide Gamut.
    DaVinciIntermediate,
    /// RED Log3G10 / RED Wide Gamut RGB.
    Log3G10,
}

impl LogSpace {
    /// Every registered space, in listing order.
    pub const ALL: [LogSpace; 14] = [
        LogSpace::SLog3,
        LogSpace::SLog3Cine,
        LogSpace::FLog,
        LogSpace::FLog2,
        LogSpace::FLog2C,
        LogSpace::CLog2,
        LogSpace::CLog3,
        LogSpace::LogC3,
        LogSpace::LogC4,
        LogSpace::VLog,
        LogSpace::NLog,
        LogSpace::LLog,
        LogSpace::DaVinciIntermediate,
        LogSpace::Log3G10,
    ];

    /// Canonical registry name.
    pub const fn name(self) -> &'static str {
        match self {
            LogSpace::SLog3 => "S-Log3",
            LogSpace::SLog3Cine => "S-Log3.Cine",
            LogSpace::FLog => "F-Log",
            LogSpace::FLog2 => "F-Log2",
            LogSpace::FLog2C => "F-Log2C",
            LogSpace::CLog2 => "C-Log2",
            LogSpace::CLog3 => "C-Log3",
            LogSpace::LogC3 => "LogC3",
            LogSpace::LogC4 => "LogC4",
            LogSpace::VLog => "V-Log",
            LogSpace::NLog => "N-Log",
            LogSpace::LLog => "L-Log",
            LogSpace::DaVinciIntermediate => "DaVinci Intermediate",
            LogSpace::Log3G10 => "Log3G10",
        }
    }

    /// Manufacturer and gamut, for listings.
    pub const fn full_name(self) -> &'static str {
        match self {
            LogSpace::SLog3 => "Sony S-Log3 / S-Gamut3",
            LogSpace::SLog3Cine => "Sony S-Log3 / S-Gamut3.Cine",
            LogSpace::FLog => "Fujifilm F-Log / F-Gamut",
            LogSpace::FLog2 => "Fujifilm F-Log2 / F-Gamut",
            LogSpace::FLog2C => "Fujifilm F-Log2 C / F-Gamut C",
            LogSpace::CLog2 => "Canon Log 2 / Cinema Gamut",
            LogSpace::CLog3 => "Canon Log 3 / Cinema Gamut",
            LogSpace::LogC3 => "ARRI LogC3 / ARRI Wide Gamut 3",
            LogSpace::LogC4 => "ARRI LogC4 / ARRI Wide Gamut 4",
            LogSpace::VLog => "Panasonic V-Log / V-Gamut",
            LogSpace::NLog => "Nikon N-Log / N-Gamut",
            LogSpace::LLog => "Leica L-Log / BT.2020",
            LogSpace::DaVinciIntermediate => "DaVinci Intermediate / DaVinci Wide Gamut",
            LogSpace::Log3G10 => "RED Log3G10 / RED Wide Gamut RGB",
        }
    }

    /// Transfer curve.
    pub const fn curve(self) -> Curve {
        match self {
            LogSpace::SLog3 | LogSpace::SLog3Cine => Curve::SLog3,
            LogSpace::FLog => Curve::FLog,
            LogSpace::FLog2 | LogSpace::FLog2C => Curve::FLog2,
            LogSpace::CLog2 => Curve::CLog2,
            LogSpace::CLog3 => Curve::CLog3,
            LogSpace::LogC3 => Curve::LogC3,
            LogSpace::LogC4 => Curve::LogC4,
            LogSpace::VLog => Curve::VLog,
            LogSpace::NLog => Curve::NLog,
            LogSpace::LLog => Curve::LLog,
            LogSpace::DaVinciIntermediate => Curve::DaVinciIntermediate,
            LogSpace::Log3G10 => Curve::Log3G10,
        }
    }

    /// Gamut primaries.
    pub const fn gamut(self) -> &'static Primaries {
        match self {
            LogSpace::SLog3 => &p::S_GAMUT3,
            LogSpace::SLog3Cine => &p::S_GAMUT3_CINE,
            LogSpace::FLog | LogSpace::FLog2 => &p::F_GAMUT,
            LogSpace::FLog2C => &p::F_GAMUT_C,
            LogSpace::CLog2 | LogSpace::CLog3 => &p::CINEMA_GAMUT,
            LogSpace::LogC3 => &p::AWG3,
            LogSpace::LogC4 => &p::AWG4,
            LogSpace::VLog => &p::V_GAMUT,
            LogSpace::NLog => &p::N_GAMUT,
            LogSpace::LLog => &p::BT2020,
            LogSpace::DaVinciIntermediate => &p::DAVINCI_WIDE_GAMUT,
            LogSpace::Log3G10 => &p::RED_WIDE_GAMUT,
        }
    }

    /// Name as used in file names: spaces become underscores, dots are
    /// dropped (`S-Log3.Cine` -> `S-Log3Cine`).
    pub fn file_token(self) -> String {
        self.name().replace(' ', "_").replace('.', "")
    }

    /// Comma-separated list of all names.
    pub fn available() -> String {
        Self::ALL.map(|s| s.name()).join(", ")
    }
}

/// Lowercase with spaces, dots, underscores and dashes removed.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '.' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for LogSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = lookup_key(s);
        Self::ALL
            .into_iter()
            .find(|space| lookup_key(space.name()) == key)
            .ok_or_else(|| ColorError::UnknownColorSpace {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

impl fmt::Display for LogSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
