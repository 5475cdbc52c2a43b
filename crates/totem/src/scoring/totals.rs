use crate::error::ScoringError;
use crate::fixed::Fixed;
use crate::scoring::ScoreMatrix;
use serde::Serialize;

/// Number of finalists carried into the strength and salience views
pub const TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedAnimal {
    #[serde(rename = "ANIMAL")]
    pub animal: String,
    #[serde(rename = "TOTAL_SCORE")]
    pub total: Fixed,
    /// Position in the affinity table
    #[serde(skip)]
    pub roster_index: usize,
}

/// Sum each animal's weighted row and sort by total, descending.
///
/// Sums are exact integers in micro units. The sort is stable, so equal
/// totals keep their roster order.
pub fn rank(weighted: &ScoreMatrix<Fixed>) -> Vec<RankedAnimal> {
    let mut ranking: Vec<RankedAnimal> = weighted
        .iter()
        .enumerate()
        .map(|(roster_index, (animal, row))| RankedAnimal {
            animal: animal.to_string(),
            total: row.iter().copied().sum(),
            roster_index,
        })
        .collect();
    ranking.sort_by(|a, b| b.total.cmp(&a.total));
    ranking
}

/// First `n` entries of a ranking. Never returns fewer than asked for.
pub fn top_n(ranking: &[RankedAnimal], n: usize) -> Result<&[RankedAnimal], ScoringError> {
    if ranking.len() < n {
        return Err(ScoringError::InsufficientRoster {
            required: n,
            found: ranking.len(),
        });
    }
    Ok(&ranking[..n])
}
