/// Standard element symbols and atomic masses.
pub mod elements;
/// Error type shared by the tokenizer, decomposer and scorer.
pub mod errors;
/// Scans a chemical formula into atom, group and invalid tokens.
///
/// Element symbols are matched against the periodic table (or, on request, against
/// any capitalized one- or two-letter symbol). Parentheses open and close groups,
/// and digits after an element or a closing parenthesis are counts.
pub mod formula_tokenizer;
/// Turns formulas into element counts with an explicit group stack, weights them by
/// concentration and sums them over a whole concentration map. Also computes molar
/// masses and the element composition matrix of a list of species.
///
/// # Examples
/// ```
/// use AcidWatch::MassBalance::decomposer::{decompose_masses, MassDecomposer};
/// use std::collections::BTreeMap;
/// let concs = BTreeMap::from([
///     ("H2O".to_string(), 1.0),
///     ("NO2".to_string(), 2.0),
///     ("N2".to_string(), 3.0),
/// ]);
/// let masses = decompose_masses(&concs).unwrap();
/// assert_eq!(masses["N"], 8.0);
/// let molar_mass = MassDecomposer::default().molar_mass("Na(NO3)2").unwrap();
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
pub mod decomposer;
mod decomposer_tests;
/// Compares the element masses of an initial and a final state and reduces them to
/// one normalized error score. A score of 1 or more is a significant imbalance.
///
/// # Examples
/// ```
/// use AcidWatch::MassBalance::balance_scorer::score_mass_balance;
/// use std::collections::BTreeMap;
/// let initial = BTreeMap::from([("SO2".to_string(), 1.0), ("H2O".to_string(), 1.0)]);
/// let final_ = BTreeMap::from([("SO2".to_string(), 2.0), ("H2O".to_string(), 1.0)]);
/// let result = score_mass_balance(&initial, &final_).unwrap();
/// assert!(result.is_significant());
/// ```
pub mod balance_scorer;
/// Initial and final concentrations of a simulation run.
pub mod simulation_results;
pub mod species_names;
/// prettytable renderings of the results
pub mod report;
