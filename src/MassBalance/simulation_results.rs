//! Initial and final concentrations of one simulation run, as returned by the
//! AcidWatch backend.
use crate::MassBalance::balance_scorer::{MassBalanceResult, MassBalanceScorer};
use crate::MassBalance::decomposer::ConcentrationMap;
use crate::MassBalance::errors::FormulaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConcentrations {
    pub initial: ConcentrationMap,
    #[serde(rename = "final")]
    pub final_: ConcentrationMap,
}

impl SimulationConcentrations {
    pub fn new(initial: ConcentrationMap, final_: ConcentrationMap) -> Self {
        Self { initial, final_ }
    }

    /// species of both states, sorted
    pub fn species(&self) -> Vec<String> {
        self.initial
            .keys()
            .chain(self.final_.keys())
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// `final - initial` for every species, missing entries count as 0
    pub fn changes(&self) -> ConcentrationMap {
        self.species()
            .into_iter()
            .map(|species| {
                let initial = self.initial.get(&species).copied().unwrap_or(0.0);
                let final_ = self.final_.get(&species).copied().unwrap_or(0.0);
                (species, final_ - initial)
            })
            .collect()
    }

    pub fn mass_balance(&self, scorer: &MassBalanceScorer) -> Result<MassBalanceResult, FormulaError> {
        scorer.score(&self.initial, &self.final_)
    }
}
