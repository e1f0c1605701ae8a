//! Menu selections.

use crate::timing::FixedMode;

/// What the operator picked from the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Fixed timings: `1` Normal, `2` Rush
    Fixed(FixedMode),
    Adaptive,
    ManualOverride,
    Exit,
    /// Any integer with no menu entry
    Unknown(i64),
}

impl From<i64> for MenuChoice {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Fixed(FixedMode::Normal),
            2 => Self::Fixed(FixedMode::Rush),
            3 => Self::Adaptive,
            4 => Self::ManualOverride,
            5 => Self::Exit,
            other => Self::Unknown(other),
        }
    }
}
