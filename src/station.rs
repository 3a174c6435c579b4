//! Station Table
//!
//! The four parking facilities are fixed configuration, not runtime data.

use serde::{Deserialize, Serialize};

/// Stable station code (matches backend `StationCode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationCode {
    Baifu,
    Cheng,
    Xinyi,
    Sheliao,
}

/// Display order used by every station picker and dashboard tile
pub const STATIONS: [StationCode; 4] = [
    StationCode::Baifu,
    StationCode::Cheng,
    StationCode::Xinyi,
    StationCode::Sheliao,
];

/// Wire value the backend uses for "every station"
pub const ALL_STATIONS_WIRE: &str = "ALL";
/// Station name the backend uses for "every station" in `getTasks`
pub const ALL_STATIONS_NAME: &str = "全部";

impl StationCode {
    pub fn code(self) -> &'static str {
        match self {
            StationCode::Baifu => "BAIFU",
            StationCode::Cheng => "CHENG",
            StationCode::Xinyi => "XINYI",
            StationCode::Sheliao => "SHELIAO",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StationCode::Baifu => "百福立體停車場",
            StationCode::Cheng => "成功立體停車場",
            StationCode::Xinyi => "信義國小地下停車場",
            StationCode::Sheliao => "社寮橋平面停車場",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        STATIONS.into_iter().find(|s| s.code().eq_ignore_ascii_case(code))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        STATIONS.into_iter().find(|s| s.name() == name)
    }

    /// Accepts either a code or a display name
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_code(value).or_else(|| Self::from_name(value))
    }
}

/// Which stations a user may see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationScope {
    All,
    Station(StationCode),
    /// No station assigned yet (pending accounts, unknown values)
    Unassigned,
}

impl StationScope {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(ALL_STATIONS_WIRE) || value == ALL_STATIONS_NAME {
            return StationScope::All;
        }
        match StationCode::parse(value) {
            Some(code) => StationScope::Station(code),
            None => StationScope::Unassigned,
        }
    }

    /// Value sent in `updateUser` payloads
    pub fn to_wire(self) -> &'static str {
        match self {
            StationScope::All => ALL_STATIONS_WIRE,
            StationScope::Station(code) => code.code(),
            StationScope::Unassigned => "",
        }
    }

    /// `station` parameter for `getTasks`; `None` means nothing may be fetched
    pub fn fetch_param(self) -> Option<&'static str> {
        match self {
            StationScope::All => Some(ALL_STATIONS_NAME),
            StationScope::Station(code) => Some(code.name()),
            StationScope::Unassigned => None,
        }
    }

    pub fn permits(self, station: StationCode) -> bool {
        match self {
            StationScope::All => true,
            StationScope::Station(own) => own == station,
            StationScope::Unassigned => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StationScope::All => "全區",
            StationScope::Station(code) => code.name(),
            StationScope::Unassigned => "未指派",
        }
    }
}
