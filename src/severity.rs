use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;

/// Logging severity, one per entry of the classic 16-color console
/// attribute table. The discriminant is the attribute value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u16)]
pub enum Severity {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Orange,
    LightGray,
    DarkGray,
    LightBlue,
    LightGreen,
    LightCyan,
    LightRed,
    LightMagenta,
    Yellow,
    White,
}

impl Severity {
    pub const SUCCESS: Self = Self::LightGreen;
    pub const INFO: Self = Self::LightCyan;
    pub const WARN: Self = Self::Orange;
    pub const ERROR: Self = Self::Red;

    /// Converts a raw attribute value. Out-of-range values clamp to `White`.
    pub fn from_raw(raw: u16) -> Self {
        Self::from_u16(raw).unwrap_or(Self::White)
    }

    pub fn attribute(self) -> u16 {
        self as u16
    }

    /// The short title used by `report`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::LightCyan => "i",
            Self::Orange => "!",
            Self::Red => "-",
            Self::LightGreen => "+",
            _ => ">",
        }
    }
}
