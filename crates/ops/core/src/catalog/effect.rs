//! Data-driven city effects attached to action outcomes.

/// A single change applied to the operative's current city when an action
/// resolves.
///
/// Ranged variants pick their magnitude from the outcome's variance roll, so
/// two resolutions with the same rolls produce the same change.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CityEffect {
    /// Move the estimate toward the true population by a count drawn from
    /// `[min, max]`, scaled by the estimate skill.
    ImproveEstimateByCount { min: f64, max: f64 },
    /// Move the estimate toward the true population by `percent` of itself,
    /// scaled by the estimate skill.
    ImproveEstimateByPercent { percent: f64 },
    /// Change the true population by `count`; the estimate moves equally.
    PopulationByCount { count: f64 },
    /// Change the true population by a percentage drawn from `[min, max]`.
    /// The change is never zero.
    PopulationByPercent {
        min: f64,
        max: f64,
        estimate_follows: bool,
    },
    ChaosByCount { count: f64 },
    /// Scale chaos by a percentage drawn from `[min, max]`.
    ChaosByPercent { min: f64, max: f64 },
    RemoveCommunity,
    /// With probability `chance`, migrate part of the population elsewhere.
    PotentialMigration { chance: f64 },
}

impl CityEffect {
    /// Fixed population change by percentage.
    pub const fn population_percent(percent: f64, estimate_follows: bool) -> Self {
        Self::PopulationByPercent {
            min: percent,
            max: percent,
            estimate_follows,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        let ordered = |min: f64, max: f64| min.is_finite() && max.is_finite() && min <= max;
        match *self {
            Self::ImproveEstimateByCount { min, max } if !ordered(min, max) || min < 0.0 => {
                Err("estimate count range must be finite, ordered and non-negative")
            }
            Self::ImproveEstimateByPercent { percent } if !percent.is_finite() || percent < 0.0 => {
                Err("estimate percentage must be finite and non-negative")
            }
            Self::PopulationByPercent { min, max, .. } | Self::ChaosByPercent { min, max }
                if !ordered(min, max) =>
            {
                Err("percentage range must be finite and ordered")
            }
            Self::PopulationByCount { count } | Self::ChaosByCount { count }
                if !count.is_finite() =>
            {
                Err("count must be finite")
            }
            Self::PotentialMigration { chance } if !(0.0..=1.0).contains(&chance) => {
                Err("migration chance must lie in [0, 1]")
            }
            _ => Ok(()),
        }
    }
}

/// Picks the value at fraction `roll` of `[min, max]`.
pub(crate) fn lerp(min: f64, max: f64, roll: f64) -> f64 {
    min + (max - min) * roll.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_ranges() {
        assert!(CityEffect::ChaosByPercent { min: 5.0, max: 1.0 }.validate().is_err());
        assert!(CityEffect::ChaosByPercent { min: -5.0, max: 5.0 }.validate().is_ok());
        assert!(CityEffect::PotentialMigration { chance: 1.5 }.validate().is_err());
    }

    #[test]
    fn lerp_spans_range() {
        assert_eq!(lerp(1.0, 5.0, 0.0), 1.0);
        assert_eq!(lerp(1.0, 5.0, 1.0), 5.0);
        assert_eq!(lerp(1.0, 5.0, 0.5), 3.0);
    }
}
