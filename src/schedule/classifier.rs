use crate::domain::{CellFlags, DisruptionState};

/// Folds a cell's flags into a single state.
///
/// Full-hour markers win over half-slot markers. A full-hour cell with neither
/// confirm marker falls through to the half-slot rules.
pub fn classify(flags: CellFlags) -> DisruptionState {
    use DisruptionState::*;

    if !flags.has_disconnection {
        return Yes;
    }

    if flags.is_full_hour {
        if flags.is_confirm_1 {
            return No;
        }
        if flags.is_confirm_0 {
            return Maybe;
        }
    }

    let confirmed = flags.is_confirm_1;
    match (flags.left_has_disconnection, flags.right_has_disconnection) {
        (true, true) if confirmed => No,
        (true, true) => Maybe,
        (true, false) if confirmed => First,
        (true, false) => MaybeFirst,
        (false, true) if confirmed => Second,
        (false, true) => MaybeSecond,
        (false, false) => Yes,
    }
}
