//! Transition tables for map object kinds.
//!
//! Every kind may carry up to three transition rules plus a curve that
//! scales its decay rate by the local wetness:
//!
//! - *decay*: after a mean dwell time the kind becomes its decay target.
//!   Stored as a rate (`1 / dwell_time`) so wetness can scale it.
//! - *evolution*: once the cell reaches a fixed age it becomes its evolve
//!   target. Wetness has no effect.
//! - *spread*: when the cell evolves, one neighbour may be converted.
//!
//! Tables are assembled with [`TileRulesBuilder`] and validated once in
//! [`TileRulesBuilder::build`]. After that every lookup is a direct index by
//! the kind's ordinal and cannot fail.

use crate::error::{CoreError, CoreResult};
use crate::tile::MapObjectType;

/// How wetness scales a kind's decay rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WetnessCurve {
    /// Linear interpolation between the value at wetness 0 and at wetness 1.
    Linear {
        /// Multiplier when completely dry.
        zero_value: f64,
        /// Multiplier when completely wet.
        one_value: f64,
    },
    /// A parabola `(w - x_offset)^2 / scale + y_offset`.
    Bowl {
        /// Divisor for the squared term. Never zero.
        scale: f64,
        /// Wetness at the bottom of the bowl.
        x_offset: f64,
        /// Multiplier at the bottom of the bowl.
        y_offset: f64,
    },
}

impl WetnessCurve {
    /// Build a curve from a raw parameter list.
    ///
    /// Two parameters give a [`WetnessCurve::Linear`] curve, three give a
    /// [`WetnessCurve::Bowl`]. Any other count is rejected.
    pub fn from_params(kind: MapObjectType, params: &[f64]) -> CoreResult<Self> {
        let curve = match *params {
            [zero_value, one_value] => Self::Linear {
                zero_value,
                one_value,
            },
            [scale, x_offset, y_offset] => Self::Bowl {
                scale,
                x_offset,
                y_offset,
            },
            _ => {
                return Err(CoreError::MalformedWetnessCurve {
                    kind,
                    reason: format!("expected 2 or 3 parameters, got {}", params.len()),
                });
            }
        };
        curve.validate(kind)
    }

    fn validate(self, kind: MapObjectType) -> CoreResult<Self> {
        let finite = match self {
            Self::Linear {
                zero_value,
                one_value,
            } => zero_value.is_finite() && one_value.is_finite(),
            Self::Bowl {
                scale,
                x_offset,
                y_offset,
            } => [scale, x_offset, y_offset].iter().all(|p| p.is_finite()),
        };
        if !finite {
            return Err(CoreError::MalformedWetnessCurve {
                kind,
                reason: "parameters must be finite".into(),
            });
        }
        if matches!(self, Self::Bowl { scale, .. } if scale == 0.0) {
            return Err(CoreError::MalformedWetnessCurve {
                kind,
                reason: "bowl scale must be non-zero".into(),
            });
        }
        Ok(self)
    }

    /// Decay-rate multiplier at the given wetness.
    pub fn multiplier(self, wetness: f64) -> f64 {
        match self {
            Self::Linear {
                zero_value,
                one_value,
            } => zero_value * (1.0 - wetness) + one_value * wetness,
            Self::Bowl {
                scale,
                x_offset,
                y_offset,
            } => {
                let x = wetness - x_offset;
                x * x / scale + y_offset
            }
        }
    }
}

/// Time-driven transition to a more decayed kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayRule {
    /// The kind the cell becomes.
    pub target: MapObjectType,
    /// Base rate, the reciprocal of the mean dwell time.
    pub rate: f64,
}

/// Age-driven transition to a grown kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolveRule {
    /// The kind the cell becomes.
    pub target: MapObjectType,
    /// Age in seconds at which the cell evolves.
    pub age: f64,
}

/// Every rule registered for one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TileRule {
    /// Decay rule, if the kind decays.
    pub decay: Option<DecayRule>,
    /// Evolution rule, if the kind evolves.
    pub evolve: Option<EvolveRule>,
    /// Kind a neighbour is converted to when this kind evolves.
    pub spread: Option<MapObjectType>,
    /// Wetness response; absent means a constant multiplier of 1.
    pub wetness: Option<WetnessCurve>,
    /// Spread from neighbouring cells never overwrites this kind.
    pub spread_resistant: bool,
}

/// Immutable, validated rule table indexed by [`MapObjectType::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct TileRules {
    rules: [TileRule; MapObjectType::COUNT],
}

impl Default for TileRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl TileRules {
    /// Start assembling a table.
    pub fn builder() -> TileRulesBuilder {
        TileRulesBuilder::default()
    }

    /// A table with no rules at all: every cell just ages.
    pub fn inert() -> Self {
        Self {
            rules: [TileRule::default(); MapObjectType::COUNT],
        }
    }

    /// The farming ruleset: potatoes grow or rot, grass spreads while wet,
    /// walls crumble in the wet, rubble returns to dirt.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table fails validation, which is a programming
    /// error caught by the test suite.
    pub fn standard() -> Self {
        use crate::tile::MapObjectType::*;

        Self::builder()
            .decay(PotatoPlanted, OrganicRubble, 10.0)
            .decay(PotatoSapling, OrganicRubble, 20.0)
            .decay(PotatoPlant, OrganicRubble, 20.0)
            .decay(StoneWall, StoneRubble, 120.0)
            .decay(OrganicRubble, Dirt, 120.0)
            .decay(Grass, Dirt, 5.0)
            .evolve(PotatoPlanted, PotatoSapling, 15.0)
            .evolve(PotatoSapling, PotatoPlant, 15.0)
            .evolve_and_spread(Grass, Grass, Grass, 10.0)
            .wetness_linear(PotatoPlanted, 1.0, -1.0)
            .wetness_linear(PotatoSapling, 1.0, -1.0)
            .wetness_linear(PotatoPlant, 1.0, -1.0)
            .wetness_linear(Grass, 1.0, -1.0)
            .wetness_linear(StoneWall, 0.0, 1.0)
            .spread_resistant(Water)
            .spread_resistant(StoneWall)
            .build()
            .expect("standard tile rules are valid")
    }

    /// All rules registered for a kind.
    pub fn rule(&self, kind: MapObjectType) -> &TileRule {
        &self.rules[kind.index()]
    }

    /// The decay target, if the kind decays.
    pub fn decay_target(&self, kind: MapObjectType) -> Option<MapObjectType> {
        self.rule(kind).decay.map(|d| d.target)
    }

    /// Base decay rate; 0 for kinds without a decay rule.
    pub fn decay_rate(&self, kind: MapObjectType) -> f64 {
        self.rule(kind).decay.map_or(0.0, |d| d.rate)
    }

    /// The evolve target, if the kind evolves.
    pub fn evolve_target(&self, kind: MapObjectType) -> Option<MapObjectType> {
        self.rule(kind).evolve.map(|e| e.target)
    }

    /// Evolution age; infinite for kinds that never evolve.
    pub fn evolve_age(&self, kind: MapObjectType) -> f64 {
        self.rule(kind).evolve.map_or(f64::INFINITY, |e| e.age)
    }

    /// The kind spread onto a neighbour when this kind evolves.
    pub fn spread(&self, kind: MapObjectType) -> Option<MapObjectType> {
        self.rule(kind).spread
    }

    /// Decay multiplier at the given wetness; 1 without a registered curve.
    pub fn wetness_multiplier(&self, kind: MapObjectType, wetness: f64) -> f64 {
        self.rule(kind)
            .wetness
            .map_or(1.0, |curve| curve.multiplier(wetness))
    }

    /// Whether spread may overwrite a cell of this kind.
    pub fn accepts_spread(&self, kind: MapObjectType) -> bool {
        let rule = self.rule(kind);
        !rule.spread_resistant && rule.evolve.is_none()
    }
}

/// Collects rule registrations; later registrations for a kind replace
/// earlier ones. Nothing is checked until [`TileRulesBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct TileRulesBuilder {
    decay: Vec<(MapObjectType, MapObjectType, f64)>,
    evolve: Vec<(MapObjectType, MapObjectType, f64)>,
    spread: Vec<(MapObjectType, MapObjectType)>,
    wetness: Vec<(MapObjectType, Vec<f64>)>,
    resistant: Vec<MapObjectType>,
}

impl TileRulesBuilder {
    /// Register a decay from `from` to `to` after a mean dwell of `decay_time` seconds.
    pub fn decay(mut self, from: MapObjectType, to: MapObjectType, decay_time: f64) -> Self {
        self.decay.push((from, to, decay_time));
        self
    }

    /// Register an evolution from `from` to `to` at `evolve_age` seconds.
    pub fn evolve(mut self, from: MapObjectType, to: MapObjectType, evolve_age: f64) -> Self {
        self.evolve.push((from, to, evolve_age));
        self
    }

    /// Register an evolution that also converts a neighbour to `spread_as`.
    pub fn evolve_and_spread(
        mut self,
        from: MapObjectType,
        to: MapObjectType,
        spread_as: MapObjectType,
        evolve_age: f64,
    ) -> Self {
        self.evolve.push((from, to, evolve_age));
        self.spread.push((from, spread_as));
        self
    }

    /// Register a linear wetness curve.
    pub fn wetness_linear(self, kind: MapObjectType, zero_value: f64, one_value: f64) -> Self {
        self.wetness_params(kind, &[zero_value, one_value])
    }

    /// Register a bowl-shaped wetness curve.
    pub fn wetness_bowl(self, kind: MapObjectType, scale: f64, x_offset: f64, y_offset: f64) -> Self {
        self.wetness_params(kind, &[scale, x_offset, y_offset])
    }

    /// Register a wetness curve from raw parameters (2 = linear, 3 = bowl).
    pub fn wetness_params(mut self, kind: MapObjectType, params: &[f64]) -> Self {
        self.wetness.push((kind, params.to_vec()));
        self
    }

    /// Mark a kind that spread never overwrites.
    pub fn spread_resistant(mut self, kind: MapObjectType) -> Self {
        self.resistant.push(kind);
        self
    }

    /// Validate every registration and freeze the table.
    pub fn build(self) -> CoreResult<TileRules> {
        let mut rules = [TileRule::default(); MapObjectType::COUNT];

        for (from, to, time) in self.decay {
            if !(time.is_finite() && time > 0.0) {
                return Err(CoreError::InvalidDecayTime { kind: from, time });
            }
            rules[from.index()].decay = Some(DecayRule {
                target: to,
                rate: 1.0 / time,
            });
        }

        for (from, to, age) in self.evolve {
            if !(age.is_finite() && age >= 0.0) {
                return Err(CoreError::InvalidEvolveAge { kind: from, age });
            }
            rules[from.index()].evolve = Some(EvolveRule { target: to, age });
        }

        for (from, spread_as) in self.spread {
            rules[from.index()].spread = Some(spread_as);
        }

        for (kind, params) in self.wetness {
            rules[kind.index()].wetness = Some(WetnessCurve::from_params(kind, &params)?);
        }

        for kind in self.resistant {
            rules[kind.index()].spread_resistant = true;
        }

        for kind in MapObjectType::ALL {
            let rule = &rules[kind.index()];
            if rule.spread.is_some() && rule.evolve.is_none() {
                return Err(CoreError::SpreadWithoutEvolution(kind));
            }
        }

        Ok(TileRules { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::MapObjectType::*;

    #[test]
    fn standard_table_matches_farming_rules() {
        let rules = TileRules::standard();
        assert_eq!(rules.decay_target(PotatoPlanted), Some(OrganicRubble));
        assert!((rules.decay_rate(PotatoPlanted) - 0.1).abs() < 1e-12);
        assert_eq!(rules.evolve_target(PotatoPlanted), Some(PotatoSapling));
        assert_eq!(rules.evolve_age(PotatoPlanted), 15.0);
        assert_eq!(rules.decay_target(StoneWall), Some(StoneRubble));
        assert_eq!(rules.spread(Grass), Some(Grass));
        assert_eq!(rules.spread(PotatoPlant), None);
    }

    #[test]
    fn kinds_without_rules_never_transition() {
        let rules = TileRules::standard();
        for kind in [Dirt, StoneRubble, Water] {
            assert_eq!(rules.decay_rate(kind), 0.0);
            assert_eq!(rules.evolve_age(kind), f64::INFINITY);
            assert_eq!(rules.wetness_multiplier(kind, 0.7), 1.0);
        }
    }

    #[test]
    fn linear_curve_interpolates() {
        let rules = TileRules::standard();
        assert_eq!(rules.wetness_multiplier(Grass, 0.0), 1.0);
        assert_eq!(rules.wetness_multiplier(Grass, 0.5), 0.0);
        assert_eq!(rules.wetness_multiplier(Grass, 1.0), -1.0);
        assert_eq!(rules.wetness_multiplier(StoneWall, 0.0), 0.0);
        assert_eq!(rules.wetness_multiplier(StoneWall, 1.0), 1.0);
    }

    #[test]
    fn bowl_curve_is_parabolic() {
        let curve = WetnessCurve::from_params(Grass, &[0.5, 0.5, 0.25]).unwrap();
        assert!((curve.multiplier(0.5) - 0.25).abs() < 1e-12);
        assert!((curve.multiplier(1.0) - 0.75).abs() < 1e-12);
        assert!((curve.multiplier(0.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_decay_time_is_rejected() {
        let err = TileRules::builder()
            .decay(Grass, Dirt, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidDecayTime {
                kind: Grass,
                time: 0.0
            }
        );
    }

    #[test]
    fn negative_and_nan_decay_times_are_rejected() {
        assert!(TileRules::builder().decay(Grass, Dirt, -1.0).build().is_err());
        assert!(
            TileRules::builder()
                .decay(Grass, Dirt, f64::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn wrong_curve_parameter_count_is_rejected() {
        let err = TileRules::builder()
            .wetness_params(Grass, &[1.0])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::MalformedWetnessCurve { kind: Grass, .. }
        ));
        assert!(
            TileRules::builder()
                .wetness_params(Grass, &[1.0, 2.0, 3.0, 4.0])
                .build()
                .is_err()
        );
    }

    #[test]
    fn zero_scale_bowl_is_rejected() {
        let err = TileRules::builder()
            .wetness_bowl(Water, 0.0, 0.0, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::MalformedWetnessCurve { kind: Water, .. }
        ));
    }

    #[test]
    fn spread_requires_evolution() {
        let mut builder = TileRules::builder();
        builder.spread.push((Dirt, Grass));
        assert_eq!(
            builder.build().unwrap_err(),
            CoreError::SpreadWithoutEvolution(Dirt)
        );
    }

    #[test]
    fn later_registration_wins() {
        let rules = TileRules::builder()
            .decay(Grass, Dirt, 5.0)
            .decay(Grass, OrganicRubble, 2.0)
            .build()
            .unwrap();
        assert_eq!(rules.decay_target(Grass), Some(OrganicRubble));
        assert!((rules.decay_rate(Grass) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn spread_acceptance() {
        let rules = TileRules::standard();
        assert!(rules.accepts_spread(Dirt));
        assert!(rules.accepts_spread(OrganicRubble));
        assert!(!rules.accepts_spread(Water));
        assert!(!rules.accepts_spread(StoneWall));
        assert!(!rules.accepts_spread(PotatoSapling));
    }
}
