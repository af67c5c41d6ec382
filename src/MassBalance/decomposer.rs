//! Decomposition of chemical formulas into element counts.
//!
//! Nested groups are resolved with an explicit stack of partial element maps:
//! `(` pushes an empty map, `)n` pops the top map and adds it `n` times into the
//! map below. The bottom of the stack is the implicit root group, so a well-formed
//! formula ends the scan with exactly one map on the stack.
//!
//! # Examples
//! ```
//! use AcidWatch::MassBalance::decomposer::decompose_masses;
//! use std::collections::BTreeMap;
//! let concentrations = BTreeMap::from([("CH(CH3)3".to_string(), 1.5)]);
//! let masses = decompose_masses(&concentrations).unwrap();
//! assert_eq!(masses["C"], 6.0);
//! assert_eq!(masses["H"], 15.0);
//! ```
use crate::MassBalance::elements::atomic_mass;
use crate::MassBalance::errors::FormulaError;
use crate::MassBalance::formula_tokenizer::{AtomGrammar, FormulaTokenizer, Token};
use log::{debug, warn};
use nalgebra::DMatrix;
use std::collections::{BTreeMap, BTreeSet};

/// formula -> concentration
pub type ConcentrationMap = BTreeMap<String, f64>;
/// element symbol -> accumulated atom count (weighted by concentration)
pub type ElementMassMap = BTreeMap<String, f64>;

fn add_to(map: &mut ElementMassMap, symbol: &str, amount: f64) {
    *map.entry(symbol.to_string()).or_insert(0.0) += amount;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MassDecomposer {
    pub atom_grammar: AtomGrammar,
}

impl MassDecomposer {
    pub fn new(atom_grammar: AtomGrammar) -> Self {
        Self { atom_grammar }
    }

    /// Unweighted element counts of one formula.
    pub fn atom_counts(&self, formula: &str) -> Result<ElementMassMap, FormulaError> {
        let mut stack: Vec<ElementMassMap> = vec![ElementMassMap::new()];
        let mut tokens = FormulaTokenizer::new(formula, self.atom_grammar);

        while let Some(token) = tokens.next() {
            match token {
                Token::Atom(symbol, n) => {
                    if let Some(top) = stack.last_mut() {
                        add_to(top, &symbol, n);
                    }
                }
                Token::GroupOpen => stack.push(ElementMassMap::new()),
                Token::GroupClose(n) => {
                    // the root group can not be closed
                    if stack.len() < 2 {
                        return Err(FormulaError::UnbalancedGroups {
                            formula: formula.to_string(),
                        });
                    }
                    if let (Some(group), Some(parent)) = (stack.pop(), stack.last_mut()) {
                        for (symbol, count) in group {
                            add_to(parent, &symbol, count * n);
                        }
                    }
                }
                Token::Invalid(c) => {
                    return Err(FormulaError::UnrecognizedToken {
                        formula: formula.to_string(),
                        token: c,
                        position: tokens.offset(),
                    });
                }
            }
        }

        if stack.len() != 1 {
            return Err(FormulaError::UnbalancedGroups {
                formula: formula.to_string(),
            });
        }
        let counts = stack.pop().unwrap_or_default();
        debug!("formula {} decomposed into {:?}", formula, counts);
        Ok(counts)
    }

    /// Adds `weight` times the element counts of `formula` into `accumulator`.
    /// On error the accumulator is left untouched.
    pub fn accumulate(
        &self,
        formula: &str,
        weight: f64,
        accumulator: &mut ElementMassMap,
    ) -> Result<(), FormulaError> {
        let counts = self.atom_counts(formula)?;
        for (symbol, count) in counts {
            add_to(accumulator, &symbol, count * weight);
        }
        Ok(())
    }

    /// Element masses of a whole concentration map, every formula weighted by its concentration.
    pub fn decompose_masses(
        &self,
        concentrations: &ConcentrationMap,
    ) -> Result<ElementMassMap, FormulaError> {
        let mut masses = ElementMassMap::new();
        for (formula, &concentration) in concentrations {
            self.accumulate(formula, concentration, &mut masses)?;
        }
        Ok(masses)
    }

    /// Molar mass, g/mol
    pub fn molar_mass(&self, formula: &str) -> Result<f64, FormulaError> {
        let counts = self.atom_counts(formula)?;
        let mut molar_mass = 0.0;
        for (symbol, count) in &counts {
            let mass = atomic_mass(symbol).ok_or_else(|| FormulaError::UnknownElement {
                formula: formula.to_string(),
                symbol: symbol.clone(),
            })?;
            molar_mass += mass * count;
        }
        Ok(molar_mass)
    }

    pub fn calculate_molar_mass_of_vector_of_subs(
        &self,
        vec_of_formulae: &[&str],
    ) -> Result<Vec<f64>, FormulaError> {
        vec_of_formulae
            .iter()
            .map(|formula| self.molar_mass(formula))
            .collect()
    }

    /// Matrix of element counts: one row per formula (input order), one column per
    /// element (sorted). Returns the matrix and the element symbols of the columns.
    pub fn create_elem_composition_matrix(
        &self,
        vec_of_formulae: &[&str],
    ) -> Result<(DMatrix<f64>, Vec<String>), FormulaError> {
        let mut compositions = Vec::with_capacity(vec_of_formulae.len());
        let mut elements: BTreeSet<String> = BTreeSet::new();
        for formula in vec_of_formulae {
            let counts = self.atom_counts(formula)?;
            elements.extend(counts.keys().cloned());
            compositions.push(counts);
        }
        let elements: Vec<String> = elements.into_iter().collect();
        if elements.is_empty() && !vec_of_formulae.is_empty() {
            warn!("no elements found in {:?}", vec_of_formulae);
        }

        let mut matrix = DMatrix::zeros(vec_of_formulae.len(), elements.len());
        for (i, counts) in compositions.iter().enumerate() {
            for (j, element) in elements.iter().enumerate() {
                if let Some(count) = counts.get(element) {
                    matrix[(i, j)] = *count;
                }
            }
        }
        Ok((matrix, elements))
    }
}

/// Element masses of a concentration map using the periodic atom grammar.
pub fn decompose_masses(concentrations: &ConcentrationMap) -> Result<ElementMassMap, FormulaError> {
    MassDecomposer::default().decompose_masses(concentrations)
}

/// Unweighted element counts of one formula using the periodic atom grammar.
pub fn parse_formula(formula: &str) -> Result<ElementMassMap, FormulaError> {
    MassDecomposer::default().atom_counts(formula)
}
