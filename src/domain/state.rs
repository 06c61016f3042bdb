use serde::{Deserialize, Serialize};

/// Power availability for one queue within one slot.
///
/// `maybe*` variants are forecasts that the utility has not confirmed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisruptionState {
    Yes,
    No,
    First,
    Second,
    Maybe,
    MaybeFirst,
    MaybeSecond,
}

impl DisruptionState {
    /// Collapses half-slot forecasts into a plain `maybe`.
    pub fn simplified(self) -> Self {
        match self {
            Self::MaybeFirst | Self::MaybeSecond => Self::Maybe,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::First => "first",
            Self::Second => "second",
            Self::Maybe => "maybe",
            Self::MaybeFirst => "maybe_first",
            Self::MaybeSecond => "maybe_second",
        }
    }
}

pub const HAS_DISCONNECTION: &str = "has_disconnection";
pub const FULL_HOUR: &str = "full_hour";
pub const CONFIRM_1: &str = "confirm_1";
pub const CONFIRM_0: &str = "confirm_0";

/// Boolean markers read off a schedule cell and its two half-slot children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub has_disconnection: bool,
    pub is_full_hour: bool,
    pub is_confirm_1: bool,
    pub is_confirm_0: bool,
    pub left_has_disconnection: bool,
    pub right_has_disconnection: bool,
}

impl CellFlags {
    /// Builds flags from the class tokens of a cell and of its left/right halves.
    /// A missing half contributes no tokens.
    pub fn from_classes<'a, C, L, R>(cell: C, left: L, right: R) -> Self
    where
        C: IntoIterator<Item = &'a str>,
        L: IntoIterator<Item = &'a str>,
        R: IntoIterator<Item = &'a str>,
    {
        let mut flags = Self::default();
        for class in cell {
            match class {
                HAS_DISCONNECTION => flags.has_disconnection = true,
                FULL_HOUR => flags.is_full_hour = true,
                CONFIRM_1 => flags.is_confirm_1 = true,
                CONFIRM_0 => flags.is_confirm_0 = true,
                _ => {}
            }
        }
        flags.left_has_disconnection = left.into_iter().any(|class| class == HAS_DISCONNECTION);
        flags.right_has_disconnection = right.into_iter().any(|class| class == HAS_DISCONNECTION);
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_serialize_in_snake_case() {
        let json = serde_json::to_string(&[
            DisruptionState::Yes,
            DisruptionState::MaybeFirst,
            DisruptionState::MaybeSecond,
        ])
        .unwrap();
        assert_eq!(json, r#"["yes","maybe_first","maybe_second"]"#);
    }

    #[test]
    fn simplified_only_touches_half_slot_forecasts() {
        assert_eq!(DisruptionState::MaybeFirst.simplified(), DisruptionState::Maybe);
        assert_eq!(DisruptionState::MaybeSecond.simplified(), DisruptionState::Maybe);
        assert_eq!(DisruptionState::First.simplified(), DisruptionState::First);
        assert_eq!(DisruptionState::No.simplified(), DisruptionState::No);
    }

    #[test]
    fn flags_from_class_sets() {
        let flags = CellFlags::from_classes(
            ["disconnection-detailed-table-cell", "cell", "has_disconnection", "confirm_1"],
            ["half", "left", "has_disconnection"],
            ["half", "right"],
        );
        assert!(flags.has_disconnection);
        assert!(flags.is_confirm_1);
        assert!(!flags.is_confirm_0);
        assert!(!flags.is_full_hour);
        assert!(flags.left_has_disconnection);
        assert!(!flags.right_has_disconnection);
    }

    #[test]
    fn missing_halves_leave_sub_flags_unset() {
        let flags = CellFlags::from_classes(
            ["has_disconnection", "full_hour"],
            std::iter::empty(),
            std::iter::empty(),
        );
        assert!(flags.is_full_hour);
        assert!(!flags.left_has_disconnection);
        assert!(!flags.right_has_disconnection);
    }
}
