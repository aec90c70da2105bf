use serde::{Deserialize, Serialize};

use super::domain::Achievement;

/// Points awarded per achievement level; D and E never score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AchievementPoints {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Lookup table converting ranks (1..=9) and achievement levels into points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTable {
    pub rank: [f64; 9],
    pub achievement: AchievementPoints,
}

impl ConversionTable {
    pub const fn new(rank: [f64; 9], achievement: AchievementPoints) -> Self {
        Self { rank, achievement }
    }

    /// Points for a rank, or `None` outside 1..=9.
    pub fn rank_points(&self, rank: u8) -> Option<f64> {
        if !(1..=9).contains(&rank) {
            return None;
        }
        self.rank.get(usize::from(rank) - 1).copied()
    }

    /// Points for an achievement level, or `None` for anything below C.
    pub fn achievement_points(&self, achievement: Achievement) -> Option<f64> {
        match achievement {
            Achievement::A => Some(self.achievement.a),
            Achievement::B => Some(self.achievement.b),
            Achievement::C => Some(self.achievement.c),
            Achievement::D | Achievement::E => None,
        }
    }

    /// Points never increase as rank worsens.
    pub fn is_monotonic(&self) -> bool {
        self.rank.windows(2).all(|pair| pair[0] >= pair[1])
    }

    /// Percentile-style table used by blended regular/elective formulas.
    pub fn blended() -> Self {
        Self::new(
            [100.0, 96.0, 89.0, 77.0, 60.0, 40.0, 23.0, 11.0, 0.0],
            AchievementPoints {
                a: 10.0,
                b: 9.0,
                c: 7.0,
            },
        )
    }

    /// Linear ten-point step table common to category-pick formulas.
    pub fn linear() -> Self {
        Self::new(
            [100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0],
            AchievementPoints {
                a: 10.0,
                b: 8.0,
                c: 6.0,
            },
        )
    }

    /// Grade-point table where the average reads directly as a 10-point mark.
    pub fn ten_point() -> Self {
        Self::new(
            [10.0, 9.7, 9.4, 9.0, 8.5, 7.5, 6.0, 4.0, 0.0],
            AchievementPoints {
                a: 10.0,
                b: 9.4,
                c: 8.5,
            },
        )
    }
}
