use crate::MassBalance::decomposer::ElementMassMap;
use crate::MassBalance::errors::FormulaError;
use crate::MassBalance::formula_tokenizer::AtomGrammar;
use crate::MassBalance::report::{composition_table, concentration_table, mass_balance_report};
use crate::MassBalance::simulation_results::SimulationConcentrations;
use crate::MassBalance::species_names::species_name;
use crate::Utils::load_from_file::{LoadError, load_concentrations, load_simulation_concentrations};
use crate::settings::{Settings, SettingsError};
use log::info;
use prettytable::{Table, row};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Formula(#[from] FormulaError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("{0}")]
    Usage(String),
}

/// where the two states of a mass balance check come from
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceInput {
    Files { initial: PathBuf, final_: PathBuf },
    Simulation(PathBuf),
}

#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    pub report: String,
    pub significant: bool,
}

/// Element counts of every formula, each multiplied by `weight`.
pub fn decompose_command(
    settings: &Settings,
    formulas: &[String],
    weight: f64,
) -> Result<String, CliError> {
    let decomposer = settings.scorer().decomposer;
    let mut output = String::new();
    let mut total = ElementMassMap::new();
    for formula in formulas {
        let mut weighted = ElementMassMap::new();
        decomposer.accumulate(formula, weight, &mut weighted)?;
        output.push_str(&composition_table(formula, &weighted).to_string());
        for (symbol, amount) in weighted {
            *total.entry(symbol).or_insert(0.0) += amount;
        }
    }
    if formulas.len() > 1 {
        output.push_str(&composition_table("Total", &total).to_string());
    }
    Ok(output)
}

pub fn molar_mass_command(settings: &Settings, formulas: &[String]) -> Result<String, CliError> {
    let decomposer = settings.scorer().decomposer;
    let mut table = Table::new();
    table.add_row(row!["Formula", "Name", "Molar mass, g/mol"]);
    for formula in formulas {
        let molar_mass = decomposer.molar_mass(formula)?;
        table.add_row(row![
            formula,
            species_name(formula).unwrap_or(""),
            format!("{:.4}", molar_mass)
        ]);
    }
    Ok(table.to_string())
}

pub fn load_balance_input(input: &BalanceInput) -> Result<SimulationConcentrations, CliError> {
    let sim = match input {
        BalanceInput::Files { initial, final_ } => {
            SimulationConcentrations::new(load_concentrations(initial)?, load_concentrations(final_)?)
        }
        BalanceInput::Simulation(path) => load_simulation_concentrations(path)?,
    };
    Ok(sim)
}

pub fn balance_command(
    settings: &Settings,
    input: &BalanceInput,
    show_species: bool,
) -> Result<BalanceOutcome, CliError> {
    let sim = load_balance_input(input)?;
    let result = sim.mass_balance(&settings.scorer())?;
    let mut report = String::new();
    if show_species {
        report.push_str(&concentration_table(&sim).to_string());
    }
    report.push_str(&mass_balance_report(&result));
    Ok(BalanceOutcome {
        report,
        significant: result.is_significant(),
    })
}

pub fn show_config(settings: &Settings) -> String {
    let config = settings.config();
    let mut table = Table::new();
    table.add_row(row!["Setting", "Value"]);
    table.add_row(row!["config file", settings.config_file().display()]);
    table.add_row(row!["atom_grammar", config.atom_grammar]);
    table.add_row(row!["epsilon", format!("{:e}", config.epsilon)]);
    table.add_row(row!["error_threshold", format!("{:e}", config.error_threshold)]);
    table.add_row(row!["log_level", config.log_level]);
    table.add_row(row![
        "log_file",
        config.log_file.as_deref().unwrap_or("-")
    ]);
    table.to_string()
}

fn parse_number(key: &str, value: &str) -> Result<f64, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Usage(format!("{} expects a number, got '{}'", key, value)))
}

/// Sets one configuration key and saves the file.
pub fn set_config(settings: &mut Settings, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "atom_grammar" => {
            let grammar: AtomGrammar = value.parse().map_err(CliError::Usage)?;
            settings.set_atom_grammar(grammar)?
        }
        "epsilon" => settings.set_epsilon(parse_number(key, value)?)?,
        "error_threshold" => settings.set_error_threshold(parse_number(key, value)?)?,
        "log_level" => settings.set_log_level(value)?,
        "log_file" => {
            let log_file = match value.trim() {
                "" | "-" | "none" => None,
                path => Some(path.to_string()),
            };
            settings.set_log_file(log_file)?
        }
        other => return Err(CliError::Usage(format!("Unknown setting: {}", other))),
    }
    info!("{} set to {}", key, value);
    Ok(())
}
