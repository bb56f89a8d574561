//! Schedule-difficulty grading

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter-grade bucket for average opponent strength faced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleGrade {
    Brutal,
    Tough,
    Average,
    Easy,
    Cupcake,
    /// No recent opponent was resolvable
    Unknown,
}

impl ScheduleGrade {
    /// Bucket an average opponent strength (0.0-1.0) into a grade.
    /// Band edges are fixed constants.
    pub fn from_strength(avg_strength: f64) -> Self {
        if avg_strength >= 0.65 {
            Self::Brutal
        } else if avg_strength >= 0.60 {
            Self::Tough
        } else if avg_strength >= 0.50 {
            Self::Average
        } else if avg_strength >= 0.40 {
            Self::Easy
        } else {
            Self::Cupcake
        }
    }
}

impl fmt::Display for ScheduleGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Brutal => "A+ (Brutal)",
            Self::Tough => "A (Tough)",
            Self::Average => "B (Average)",
            Self::Easy => "C (Easy)",
            Self::Cupcake => "D (Cupcake)",
            Self::Unknown => "N/A",
        };
        f.write_str(label)
    }
}

/// Opponent-quality context for one team's recent window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDifficulty {
    /// Mean strength (0.0-1.0) of opponents faced
    pub avg_opponent_strength: f64,
    /// Points earned weighted by opponent strength, over the window maximum,
    /// 0-100
    pub quality_adjusted_points_pct: f64,
    pub grade: ScheduleGrade,
}

impl ScheduleDifficulty {
    /// Neutral stand-in when no opponent can be resolved
    pub fn neutral() -> Self {
        Self {
            avg_opponent_strength: 0.5,
            quality_adjusted_points_pct: 0.0,
            grade: ScheduleGrade::Unknown,
        }
    }
}
