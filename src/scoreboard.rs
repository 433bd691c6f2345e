//! Two-player scoreboard. Counters are plain persisted integers; totals apply the
//! per-category caps (primary 50, secondary 40, challenger 12, overall 90).

use std::fmt;

use serde::Serialize;

use crate::cache::{DocumentStore, StoreError};

const PRIMARY_CAP: i32 = 50;
const SECONDARY_CAP: i32 = 40;
const CHALLENGER_CAP: i32 = 12;
const TOTAL_CAP: i32 = 90;

pub const PLAYERS: [u8; 2] = [1, 2];

/// File extension for persisted counters, distinct from cache records.
pub const SCORE_EXTENSION: &str = "score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreCategory {
    Primary,
    Secondary,
    Challenger,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 3] = [
        ScoreCategory::Primary,
        ScoreCategory::Secondary,
        ScoreCategory::Challenger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Challenger => "Challenger",
        }
    }

    pub fn parse(value: &str) -> Option<ScoreCategory> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub player: u8,
    pub primary: i32,
    pub secondary: i32,
    pub challenger: i32,
    pub total: i32,
}

/// Capped total: each category clamps at its cap, the sum clamps at 90.
/// Summed in `i64` so stored extremes cannot overflow; negative totals floor at `i32::MIN`.
pub fn capped_total(primary: i32, secondary: i32, challenger: i32) -> i32 {
    let sum = i64::from(primary.min(PRIMARY_CAP))
        + i64::from(secondary.min(SECONDARY_CAP))
        + i64::from(challenger.min(CHALLENGER_CAP));
    i32::try_from(sum.min(i64::from(TOTAL_CAP))).unwrap_or(i32::MIN)
}

pub struct Scoreboard {
    store: Box<dyn DocumentStore>,
}

impl Scoreboard {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Scoreboard { store }
    }

    fn key(player: u8, category: ScoreCategory) -> String {
        format!("score-{player}-{category}")
    }

    /// Stored score; missing or unparsable values read as 0.
    pub fn get(&self, player: u8, category: ScoreCategory) -> i32 {
        match self.store.get(&Self::key(player, category)) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!(player, %category, error = %err, "score read failed");
                0
            }
        }
    }

    pub fn set(&self, player: u8, category: ScoreCategory, value: i32) -> Result<(), StoreError> {
        self.store.put(&Self::key(player, category), &value.to_string())
    }

    /// Add `delta` (may be negative) and return the new value.
    pub fn adjust(&self, player: u8, category: ScoreCategory, delta: i32) -> Result<i32, StoreError> {
        let value = self.get(player, category).saturating_add(delta);
        self.set(player, category, value)?;
        Ok(value)
    }

    pub fn reset(&self) -> Result<(), StoreError> {
        for player in PLAYERS {
            for category in ScoreCategory::ALL {
                self.set(player, category, 0)?;
            }
        }
        Ok(())
    }

    pub fn player(&self, player: u8) -> PlayerScore {
        let primary = self.get(player, ScoreCategory::Primary);
        let secondary = self.get(player, ScoreCategory::Secondary);
        let challenger = self.get(player, ScoreCategory::Challenger);
        PlayerScore {
            player,
            primary,
            secondary,
            challenger,
            total: capped_total(primary, secondary, challenger),
        }
    }

    pub fn standings(&self) -> Vec<PlayerScore> {
        PLAYERS.iter().map(|p| self.player(*p)).collect()
    }

    pub fn is_player(player: u8) -> bool {
        PLAYERS.contains(&player)
    }
}

impl fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scoreboard").finish_non_exhaustive()
    }
}
