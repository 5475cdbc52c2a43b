//! One birth-chart analysis, end to end.

use crate::chart::ChartPositions;
use crate::error::ScoringError;
use crate::fixed::Fixed;
use crate::scoring::salience::SalienceTable;
use crate::scoring::{
    self, PlanetMap, RankedAnimal, SalienceRow, ScoreMatrix, ScoreMatrixBuilder, StrengthTable,
    SALIENT_COUNT, TOP_N,
};
use crate::tables::ScoringTables;
use crate::zodiac::{Planet, Sign, PLANET_COUNT};
use serde::Serialize;
use std::sync::Arc;

/// Runs analyses against a shared, immutable set of tables.
#[derive(Debug, Clone)]
pub struct Analyzer {
    tables: Arc<ScoringTables>,
}

impl Analyzer {
    pub fn new(tables: Arc<ScoringTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    pub fn analyze(&self, chart: &ChartPositions) -> Result<AnalysisReport, ScoringError> {
        let matrices = ScoreMatrixBuilder::new(&self.tables).build(chart);
        let ranking = scoring::rank(&matrices.weighted);
        let top = scoring::top_n(&ranking, TOP_N)?;

        let strength = scoring::strength::compute(&matrices.weighted, top, &matrices.effective_weights);
        let salience = scoring::classify(&matrices.weighted, top);

        for (position, ranked) in top.iter().enumerate() {
            log::debug!("#{} {} ({})", position + 1, ranked.animal, ranked.total);
        }

        Ok(AnalysisReport {
            chart: *chart,
            effective_weights: matrices.effective_weights,
            raw: matrices.raw,
            weighted: matrices.weighted,
            ranking,
            strength,
            salience,
        })
    }
}

/// Combined result of one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub chart: ChartPositions,
    pub effective_weights: [Fixed; PLANET_COUNT],
    pub raw: ScoreMatrix<u8>,
    pub weighted: ScoreMatrix<Fixed>,
    /// Whole roster, highest total first
    pub ranking: Vec<RankedAnimal>,
    pub strength: StrengthTable,
    pub salience: Vec<SalienceRow>,
}

impl AnalysisReport {
    pub fn top(&self) -> &[RankedAnimal] {
        &self.ranking[..TOP_N.min(self.ranking.len())]
    }

    /// What a text generator needs to explain the winning animal: its name
    /// and the signs of its six salient planets.
    pub fn interpretation_context(&self) -> Option<InterpretationContext> {
        let row = self.salience.first()?;
        let salient: Vec<SalientPlacement> = row
            .salient()
            .map(|planet| SalientPlacement {
                planet,
                sign: self.chart.sign(planet),
            })
            .collect();
        debug_assert_eq!(salient.len(), SALIENT_COUNT);
        Some(InterpretationContext {
            animal: row.animal.clone(),
            salient,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalientPlacement {
    pub planet: Planet,
    pub sign: Sign,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretationContext {
    pub animal: String,
    pub salient: Vec<SalientPlacement>,
}

#[derive(Serialize)]
struct BirthChart<'a> {
    planet_signs: &'a ChartPositions,
}

#[derive(Serialize)]
struct Metadata<'a> {
    zero_max_planets: &'a [Planet],
}

#[derive(Serialize)]
struct ReportRecord<'a> {
    birth_chart: BirthChart<'a>,
    planet_weights: PlanetMap<'a, Fixed>,
    raw_scores: &'a ScoreMatrix<u8>,
    weighted_scores: &'a ScoreMatrix<Fixed>,
    animal_totals: &'a [RankedAnimal],
    top3_percentage_strength: &'a StrengthTable,
    top3_true_false: SalienceTable<'a>,
    metadata: Metadata<'a>,
}

impl Serialize for AnalysisReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReportRecord {
            birth_chart: BirthChart {
                planet_signs: &self.chart,
            },
            planet_weights: PlanetMap(&self.effective_weights),
            raw_scores: &self.raw,
            weighted_scores: &self.weighted,
            animal_totals: &self.ranking,
            top3_percentage_strength: &self.strength,
            top3_true_false: SalienceTable(&self.salience),
            metadata: Metadata {
                zero_max_planets: &self.strength.zero_max_planets,
            },
        }
        .serialize(serializer)
    }
}
