use serde::{Deserialize, Serialize};

/// Tolerance under which two derived scores count as the same score.
pub const DEFAULT_SCORE_EPSILON: f64 = 1e-6;

/// Standing of one score relative to a cohort of peer scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub my_rank: usize,
    pub same_score_count: usize,
    pub peer_count: usize,
}

/// Rank `my_score` against `peer_scores` sorted in descending order.
///
/// `my_rank` is the best 1-based position `my_score` can take among the peers,
/// so tied peers share it. Scores within `epsilon` are treated as equal.
/// Non-finite peer scores are ignored; an empty cohort reports zeros and rank 1.
pub fn rank_against_cohort(my_score: f64, peer_scores: &[f64], epsilon: f64) -> RankingSummary {
    let epsilon = if epsilon.is_finite() && epsilon >= 0.0 {
        epsilon
    } else {
        DEFAULT_SCORE_EPSILON
    };

    let mut peers: Vec<f64> = peer_scores
        .iter()
        .copied()
        .filter(|score| score.is_finite())
        .collect();
    peers.sort_by(|a, b| b.total_cmp(a));

    let peer_count = peers.len();
    if peer_count == 0 {
        return RankingSummary {
            min: 0.0,
            max: 0.0,
            avg: 0.0,
            my_rank: 1,
            same_score_count: 0,
            peer_count,
        };
    }

    let above = peers
        .iter()
        .take_while(|score| **score > my_score + epsilon)
        .count();
    let same_score_count = peers
        .iter()
        .filter(|score| (**score - my_score).abs() <= epsilon)
        .count();
    let sum: f64 = peers.iter().sum();

    RankingSummary {
        min: peers[peer_count - 1],
        max: peers[0],
        avg: sum / peer_count as f64,
        my_rank: above + 1,
        same_score_count,
        peer_count,
    }
}
