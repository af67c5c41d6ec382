//! Text reports of decompositions and mass balance results.
use crate::MassBalance::balance_scorer::MassBalanceResult;
use crate::MassBalance::decomposer::ElementMassMap;
use crate::MassBalance::simulation_results::SimulationConcentrations;
use crate::MassBalance::species_names::species_name;
use prettytable::{Cell, Row, Table, row};

const SIGNIFICANT_ERROR_BANNER: &str =
    "AcidWatch has detected a large error in mass balance. Report this to the AcidWatch team!";

const EXPLANATION: &str = "In physics, the input and output should match exactly due to conservation of mass. \
However, simulations are inexact and prone to numerical errors which accumulate with the complexity of the model. \
A small error may be normal, a large error indicates a bug in the model.";

fn amount(map: &ElementMassMap, key: &str) -> String {
    map.get(key).map_or_else(|| "-".to_string(), |v| format!("{:e}", v))
}

/// rows `Element | In | Out | Error`
pub fn mass_balance_table(result: &MassBalanceResult) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Element", "In", "Out", "Error"]);
    for symbol in &result.substances {
        let error = result
            .element_errors
            .get(symbol)
            .map_or_else(String::new, |e| format!("{:e}", e));
        table.add_row(Row::new(vec![
            Cell::new(symbol),
            Cell::new(&amount(&result.initial_masses, symbol)),
            Cell::new(&amount(&result.final_masses, symbol)),
            Cell::new(&error),
        ]));
    }
    table
}

pub fn mass_balance_report(result: &MassBalanceResult) -> String {
    let mut report = String::new();
    if result.is_significant() {
        report.push_str(SIGNIFICANT_ERROR_BANNER);
        report.push('\n');
    }
    report.push_str(EXPLANATION);
    report.push('\n');
    report.push_str(&format!("Mass-balance error score: {}\n", result.error));
    report.push_str(
        "A value of 0 means the input and output correspond exactly. \
If the error is above (or close to) 1, contact the AcidWatch team.\n",
    );
    if let Some((symbol, err)) = result.worst_element() {
        report.push_str(&format!("Largest discrepancy: {} ({:e})\n", symbol, err));
    }
    report.push_str(&mass_balance_table(result).to_string());
    report
}

/// element counts of one formula
pub fn composition_table(formula: &str, counts: &ElementMassMap) -> Table {
    let mut table = Table::new();
    let title = match species_name(formula) {
        Some(name) => format!("{} ({})", formula, name),
        None => formula.to_string(),
    };
    table.add_row(row![title, "Atoms"]);
    for (symbol, count) in counts {
        table.add_row(row![symbol, count]);
    }
    table
}

/// rows `Species | Name | Initial | Final | Change`
pub fn concentration_table(sim: &SimulationConcentrations) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Species", "Name", "Initial", "Final", "Change"]);
    let changes = sim.changes();
    for species in sim.species() {
        table.add_row(Row::new(vec![
            Cell::new(&species),
            Cell::new(species_name(&species).unwrap_or("")),
            Cell::new(&amount(&sim.initial, &species)),
            Cell::new(&amount(&sim.final_, &species)),
            Cell::new(&amount(&changes, &species)),
        ]));
    }
    table
}
