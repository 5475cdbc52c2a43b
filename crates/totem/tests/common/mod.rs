#![allow(dead_code)]

use std::sync::Arc;
use totem::{
    AffinityRow, AffinityTable, Analyzer, ChartPositions, Planet, ScoringTables, Sign, WeightTable,
    PLANET_COUNT, SIGN_COUNT,
};

/// Row with the given sign scores and 0 everywhere else
pub fn row(name: &str, scores: &[(Sign, u8)]) -> AffinityRow {
    let mut out = [0u8; SIGN_COUNT];
    for (sign, score) in scores {
        out[sign.index()] = *score;
    }
    AffinityRow::new(name, out)
}

/// A: Aries 80 / Leo 20, B: Aries 20 / Leo 90, C: Aries 50 / Leo 50
pub fn abc_roster() -> AffinityTable {
    AffinityTable::new(vec![
        row("A", &[(Sign::Aries, 80), (Sign::Leo, 20)]),
        row("B", &[(Sign::Aries, 20), (Sign::Leo, 90)]),
        row("C", &[(Sign::Aries, 50), (Sign::Leo, 50)]),
    ])
    .unwrap()
}

/// Sun in Aries, Moon in Leo, everything else in Cancer (scored 0 by every
/// animal of [`abc_roster`])
pub fn sun_aries_moon_leo() -> ChartPositions {
    let mut signs = [Sign::Cancer; PLANET_COUNT];
    signs[Planet::Sun.index()] = Sign::Aries;
    signs[Planet::Moon.index()] = Sign::Leo;
    ChartPositions::new(signs)
}

pub fn analyzer(affinity: AffinityTable) -> Analyzer {
    Analyzer::new(Arc::new(ScoringTables::new(affinity, WeightTable::default(), None)))
}

/// Deterministic pseudo-random roster for property checks
pub fn generated_roster(animals: usize, seed: u64) -> AffinityTable {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) % 101) as u8
    };
    let rows = (0..animals)
        .map(|i| {
            let mut scores = [0u8; SIGN_COUNT];
            for score in scores.iter_mut() {
                *score = next();
            }
            AffinityRow::new(format!("animal_{:03}", i), scores)
        })
        .collect();
    AffinityTable::new(rows).unwrap()
}

pub fn generated_chart(seed: u64) -> ChartPositions {
    let signs = Planet::ALL.map(|p| Sign::ALL[((seed as usize) * 7 + p.index() * 5) % SIGN_COUNT]);
    ChartPositions::new(signs)
}
