//! Mass balance scoring.
//!
//! Both states are decomposed into element masses. For each element the
//! discrepancy `|2 - a/b - b/a|` is computed, where `a` and `b` are the initial
//! and final masses shifted by a small epsilon. The discrepancy is zero for
//! `a == b`, symmetric under swapping `a` and `b`, and grows super-linearly with
//! the ratio. The worst element sets the score, which is then divided by the
//! threshold: a score `>= 1` is a significant imbalance. A NaN discrepancy
//! (infinite or NaN masses) makes the whole score NaN, which also counts as
//! significant.
use crate::MassBalance::decomposer::{ConcentrationMap, ElementMassMap, MassDecomposer};
use crate::MassBalance::errors::FormulaError;
use crate::MassBalance::formula_tokenizer::AtomGrammar;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// raw discrepancy that maps to a normalized score of 1
pub const ERROR_THRESHOLD: f64 = 1e-3;
/// shift applied to both masses so that elements absent from one state do not divide by zero
pub const EPSILON: f64 = 1e-9;

/// per-element discrepancy `|2 - a/b - b/a|` of the epsilon-shifted masses
pub fn element_discrepancy(initial: f64, final_: f64, epsilon: f64) -> f64 {
    let a = initial + epsilon;
    let b = final_ + epsilon;
    (2.0 - a / b - b / a).abs()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MassBalanceResult {
    /// normalized worst-case discrepancy
    pub error: f64,
    pub initial_masses: ElementMassMap,
    pub final_masses: ElementMassMap,
    /// sorted union of the element symbols of both states
    pub substances: Vec<String>,
    /// raw (not normalized) discrepancy of every element
    pub element_errors: BTreeMap<String, f64>,
}

impl MassBalanceResult {
    pub fn is_significant(&self) -> bool {
        self.error >= 1.0 || self.error.is_nan()
    }

    /// element with the largest discrepancy (NaN ranks first), None when there are no elements
    pub fn worst_element(&self) -> Option<(&str, f64)> {
        self.element_errors
            .iter()
            .fold(None, |worst: Option<(&str, f64)>, (symbol, &err)| match worst {
                Some((_, w)) if w.is_nan() || w >= err => worst,
                _ => Some((symbol.as_str(), err)),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalanceScorer {
    pub decomposer: MassDecomposer,
    pub epsilon: f64,
    pub error_threshold: f64,
}

impl Default for MassBalanceScorer {
    fn default() -> Self {
        Self {
            decomposer: MassDecomposer::default(),
            epsilon: EPSILON,
            error_threshold: ERROR_THRESHOLD,
        }
    }
}

impl MassBalanceScorer {
    pub fn new(atom_grammar: AtomGrammar, epsilon: f64, error_threshold: f64) -> Self {
        Self {
            decomposer: MassDecomposer::new(atom_grammar),
            epsilon,
            error_threshold,
        }
    }

    pub fn score(
        &self,
        initial: &ConcentrationMap,
        final_: &ConcentrationMap,
    ) -> Result<MassBalanceResult, FormulaError> {
        let initial_masses = self.decomposer.decompose_masses(initial)?;
        let final_masses = self.decomposer.decompose_masses(final_)?;

        let substances: Vec<String> = initial_masses
            .keys()
            .chain(final_masses.keys())
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let mut error: f64 = 0.0;
        let mut element_errors = BTreeMap::new();
        for symbol in &substances {
            let a = initial_masses.get(symbol).copied().unwrap_or(0.0);
            let b = final_masses.get(symbol).copied().unwrap_or(0.0);
            let discrepancy = element_discrepancy(a, b, self.epsilon);
            // f64::max would drop NaN
            if discrepancy.is_nan() || discrepancy > error {
                error = discrepancy;
            }
            element_errors.insert(symbol.clone(), discrepancy);
        }
        error /= self.error_threshold;

        let result = MassBalanceResult {
            error,
            initial_masses,
            final_masses,
            substances,
            element_errors,
        };
        if result.is_significant() {
            if let Some((symbol, _)) = result.worst_element() {
                warn!(
                    "significant mass balance error {:e}, worst element {}",
                    result.error, symbol
                );
            }
        } else {
            info!("mass balance error score {:e}", result.error);
        }
        Ok(result)
    }
}

/// Scores the mass balance between two states with the default grammar and constants.
pub fn score_mass_balance(
    initial: &ConcentrationMap,
    final_: &ConcentrationMap,
) -> Result<MassBalanceResult, FormulaError> {
    MassBalanceScorer::default().score(initial, final_)
}
