use crate::rules::TileRules;
use crate::tile::{MapObjectType, TileCell};

/// What happened to a cell during one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// No rule fired; the cell only aged.
    Aged,
    /// The cell decayed into a new kind.
    Decayed,
    /// The cell evolved into a new kind. `spread` is the kind a neighbour
    /// should be converted to, if the old kind has a spread rule.
    Evolved {
        /// Spread target carried by the evolving kind.
        spread: Option<MapObjectType>,
    },
}

/// The outcome of advancing one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The cell after the step.
    pub cell: TileCell,
    /// Which rule, if any, fired.
    pub transition: Transition,
}

impl Step {
    /// True if the cell changed kind this step.
    pub fn changed_kind(&self) -> bool {
        !matches!(self.transition, Transition::Aged)
    }
}

/// Advance a single cell by `elapsed` seconds at the given wetness.
///
/// Decay is checked first and preempts evolution: a cell that satisfies both
/// thresholds in the same step always ends up as its decay target. Any
/// transition resets the age to zero.
pub fn step(rules: &TileRules, cell: TileCell, elapsed: f64, wetness: f64) -> Step {
    let kind = cell.kind;
    let new_age = cell.age + elapsed;

    if let Some(target) = rules.decay_target(kind) {
        let rate = rules.decay_rate(kind) * rules.wetness_multiplier(kind, wetness);
        if new_age * rate >= 1.0 {
            return Step {
                cell: TileCell::new(target),
                transition: Transition::Decayed,
            };
        }
    }

    if let Some(target) = rules.evolve_target(kind) {
        if new_age >= rules.evolve_age(kind) {
            return Step {
                cell: TileCell::new(target),
                transition: Transition::Evolved {
                    spread: rules.spread(kind),
                },
            };
        }
    }

    Step {
        cell: TileCell { kind, age: new_age },
        transition: Transition::Aged,
    }
}
