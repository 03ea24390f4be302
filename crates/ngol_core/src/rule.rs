//! The threshold transition rule and the custom-rule hook.
//!
//! For each channel independently, with `mid = (under + over) / 2`:
//!
//! | neighbor sum            | new value          |
//! |-------------------------|--------------------|
//! | `sum < under`           | `0` (underpopulation) |
//! | `sum > over`            | `0` (overpopulation)  |
//! | `under <= sum <= over`  | `sum / mid` (reproduction) |
//!
//! and the result is clamped into `[0.0, 1.0]`. Both bounds are inclusive
//! on the reproduction side.

use crate::error::{NgolError, Result};
use crate::neighborhood::NeighborSums;
use ngol_data::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated `(under, over)` population thresholds shared by all channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds", into = "RawThresholds")]
pub struct Thresholds {
    under: f32,
    over: f32,
}

#[derive(Serialize, Deserialize)]
struct RawThresholds {
    under: f32,
    over: f32,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = NgolError;

    fn try_from(raw: RawThresholds) -> Result<Self> {
        Thresholds::new(raw.under, raw.over)
    }
}

impl From<Thresholds> for RawThresholds {
    fn from(t: Thresholds) -> Self {
        Self {
            under: t.under,
            over: t.over,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        ThresholdPreset::StableLand.thresholds()
    }
}

impl Thresholds {
    /// Rejects non-finite values, negative `under`, `under > over`, and a
    /// zero `over` (which would make the reproduction divisor zero).
    ///
    /// Neighbor sums are never negative, so a negative `under` would act
    /// exactly like `0` for the branch test while still shrinking the
    /// reproduction divisor. Callers wanting "no lower bound" pass `0`.
    pub fn new(under: f32, over: f32) -> Result<Self> {
        let reason = if !under.is_finite() || !over.is_finite() {
            Some("thresholds must be finite")
        } else if under < 0.0 {
            Some("under must be non-negative")
        } else if under > over {
            Some("under exceeds over")
        } else if over <= 0.0 {
            Some("over must be positive")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(NgolError::InvalidThreshold {
                under,
                over,
                reason,
            }),
            None => Ok(Self { under, over }),
        }
    }

    #[inline]
    #[must_use]
    pub fn under(&self) -> f32 {
        self.under
    }

    #[inline]
    #[must_use]
    pub fn over(&self) -> f32 {
        self.over
    }

    /// Divisor of the reproduction branch.
    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> f32 {
        (self.under + self.over) / 2.0
    }

    /// Applies the rule to one channel's neighbor sum.
    #[inline]
    #[must_use]
    pub fn channel(&self, sum: f32) -> f32 {
        let value = if sum < self.under || sum > self.over {
            0.0
        } else if self.under <= sum && sum <= self.over {
            sum / self.midpoint()
        } else {
            // NaN sums land here
            0.0
        };
        value.clamp(0.0, 1.0)
    }

    /// Applies the rule to all three channels.
    #[inline]
    #[must_use]
    pub fn transition(&self, sums: NeighborSums) -> Cell {
        Cell::new(
            self.channel(sums.r),
            self.channel(sums.g),
            self.channel(sums.b),
        )
    }
}

/// Named threshold pairs with known behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPreset {
    /// 0.7 / 1.0
    SquareTrip,
    /// 1.0 / 1.0
    Trip,
    /// 2.0 / 3.0
    GameOfLife,
    /// 1.9 / 2.9
    RefinedGameOfLife,
    /// 2.5 / 4.0
    GameOfLifeVariant,
    /// 3.0 / 5.0
    BuildingSquares,
    /// 3.0 / 7.0
    NewGameOfLife,
    /// 4.0 / 9.0
    StableLand,
}

impl ThresholdPreset {
    pub const ALL: [ThresholdPreset; 8] = [
        ThresholdPreset::SquareTrip,
        ThresholdPreset::Trip,
        ThresholdPreset::GameOfLife,
        ThresholdPreset::RefinedGameOfLife,
        ThresholdPreset::GameOfLifeVariant,
        ThresholdPreset::BuildingSquares,
        ThresholdPreset::NewGameOfLife,
        ThresholdPreset::StableLand,
    ];

    #[must_use]
    pub fn pair(self) -> (f32, f32) {
        match self {
            ThresholdPreset::SquareTrip => (0.7, 1.0),
            ThresholdPreset::Trip => (1.0, 1.0),
            ThresholdPreset::GameOfLife => (2.0, 3.0),
            ThresholdPreset::RefinedGameOfLife => (1.9, 2.9),
            ThresholdPreset::GameOfLifeVariant => (2.5, 4.0),
            ThresholdPreset::BuildingSquares => (3.0, 5.0),
            ThresholdPreset::NewGameOfLife => (3.0, 7.0),
            ThresholdPreset::StableLand => (4.0, 9.0),
        }
    }

    #[must_use]
    pub fn thresholds(self) -> Thresholds {
        let (under, over) = self.pair();
        Thresholds { under, over }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ThresholdPreset::SquareTrip => "square_trip",
            ThresholdPreset::Trip => "trip",
            ThresholdPreset::GameOfLife => "game_of_life",
            ThresholdPreset::RefinedGameOfLife => "refined_game_of_life",
            ThresholdPreset::GameOfLifeVariant => "game_of_life_variant",
            ThresholdPreset::BuildingSquares => "building_squares",
            ThresholdPreset::NewGameOfLife => "new_game_of_life",
            ThresholdPreset::StableLand => "stable_land",
        }
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| format!("unknown threshold preset '{s}'"))
    }
}

/// Everything a custom rule may look at for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleInput {
    /// The cell as it is in the generation being read.
    pub cell: Cell,
    /// What the threshold rule produced for this cell.
    pub proposed: Cell,
    /// Raw neighbor sums the threshold rule saw.
    pub sums: NeighborSums,
    pub x: usize,
    pub y: usize,
    /// The same cell one generation earlier. Only set in lookback mode.
    pub previous: Option<Cell>,
}

/// Optional override applied after the threshold rule.
///
/// Its result replaces the proposed cell entirely and is clamped before it
/// is stored. Rules run concurrently across rows, so they must be pure with
/// respect to the cell they are given.
pub trait CustomRule: Send + Sync {
    fn evaluate(&self, input: &RuleInput) -> Cell;
}

impl<F> CustomRule for F
where
    F: Fn(&RuleInput) -> Cell + Send + Sync,
{
    fn evaluate(&self, input: &RuleInput) -> Cell {
        self(input)
    }
}
