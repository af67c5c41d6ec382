use crate::MassBalance::decomposer::ConcentrationMap;
use crate::MassBalance::simulation_results::SimulationConcentrations;
use log::{error, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{path}' does not exist")]
    NotFound { path: PathBuf },
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing '{path}' at line {line}, column {column}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("File '{path}' contains no simulation results")]
    NoResults { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct ConcentrationBlock {
    concentrations: ConcentrationMap,
}

#[derive(Debug, Deserialize)]
struct LegacyResults {
    initfinaldiff: SimulationConcentrations,
}

/// Result documents produced by the AcidWatch backend.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SimulationDocument {
    /// `{"input": {"concentrations": ..}, "results": [{"concentrations": .., ..}]}`
    Current {
        input: ConcentrationBlock,
        results: Vec<ConcentrationBlock>,
    },
    /// `{"results": {"initfinaldiff": {"initial": .., "final": .., "change": ..}}}`
    Legacy { results: LegacyResults },
}

fn read_json<T: DeserializeOwned>(file_name: &Path) -> Result<T, LoadError> {
    if !file_name.exists() {
        return Err(LoadError::NotFound {
            path: file_name.to_path_buf(),
        });
    }
    let content = fs::read_to_string(file_name).map_err(|source| LoadError::Io {
        path: file_name.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        let (line, column) = (e.line(), e.column());
        error!(
            "Error parsing '{}' at line {}, column {}: {}",
            file_name.display(),
            line,
            column,
            e
        );
        // show the problematic line with a pointer to the error position
        if let Some(problem_line) = content.lines().nth(line.saturating_sub(1)) {
            error!("Problematic line: {}", problem_line);
            if column >= 1 && column <= problem_line.len() {
                error!("{}^", " ".repeat(column - 1));
            }
        }
        LoadError::Json {
            path: file_name.to_path_buf(),
            line,
            column,
            source: e,
        }
    })
}

/// Warns about entries that can not be physical concentrations.
/// They are kept: simulation output may carry small negative round-off.
fn validate_concentrations(file_name: &Path, label: &str, concentrations: &ConcentrationMap) {
    if concentrations.is_empty() {
        warn!("{} concentrations in '{}' are empty", label, file_name.display());
    }
    for (species, value) in concentrations {
        if !value.is_finite() || *value < 0.0 {
            warn!(
                "{} concentration of '{}' in '{}' is {}",
                label,
                species,
                file_name.display(),
                value
            );
        }
    }
}

/// Loads a JSON object of `formula: concentration` pairs.
pub fn load_concentrations(file_name: impl AsRef<Path>) -> Result<ConcentrationMap, LoadError> {
    let file_name = file_name.as_ref();
    let concentrations: ConcentrationMap = read_json(file_name)?;
    validate_concentrations(file_name, "Input", &concentrations);
    info!(
        "Loaded {} concentrations from '{}'",
        concentrations.len(),
        file_name.display()
    );
    Ok(concentrations)
}

/// Loads the initial and final concentrations of a simulation result document.
/// Only the first result of the current document format is used.
pub fn load_simulation_concentrations(
    file_name: impl AsRef<Path>,
) -> Result<SimulationConcentrations, LoadError> {
    let file_name = file_name.as_ref();
    let document: SimulationDocument = read_json(file_name)?;
    let sim = match document {
        SimulationDocument::Current { input, results } => {
            if results.len() > 1 {
                info!(
                    "'{}' holds {} results, using the first one",
                    file_name.display(),
                    results.len()
                );
            }
            let first = results.into_iter().next().ok_or_else(|| LoadError::NoResults {
                path: file_name.to_path_buf(),
            })?;
            SimulationConcentrations::new(input.concentrations, first.concentrations)
        }
        SimulationDocument::Legacy { results } => results.initfinaldiff,
    };
    validate_concentrations(file_name, "Initial", &sim.initial);
    validate_concentrations(file_name, "Final", &sim.final_);
    info!(
        "Loaded simulation concentrations from '{}' ({} species)",
        file_name.display(),
        sim.species().len()
    );
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_load_concentrations() {
        let temp_file = temp_json(r#"{"H2O": 1, "NO2": 2.5, "N2": 3e-6}"#);
        let concs = load_concentrations(temp_file.path()).unwrap();
        assert_eq!(concs.len(), 3);
        assert_eq!(concs["NO2"], 2.5);
        assert_eq!(concs["N2"], 3e-6);
    }

    #[test]
    fn test_negative_concentrations_are_kept() {
        let temp_file = temp_json(r#"{"H2O": -1e-20}"#);
        let concs = load_concentrations(temp_file.path()).unwrap();
        assert_eq!(concs["H2O"], -1e-20);
    }

    #[test]
    fn test_missing_file() {
        let result = load_concentrations("definitely/not/here.json");
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_json_error_position() {
        let temp_file = temp_json("{\n  \"H2O\": 1,\n  \"NO2\": two\n}");
        match load_concentrations(temp_file.path()) {
            Err(LoadError::Json { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_current_result_document() {
        let temp_file = temp_json(
            r#"{
                "input": {"concentrations": {"SO2": 10e-6, "H2O": 20e-6}, "settings": {"Temperature": 300}},
                "results": [
                    {"concentrations": {"H2SO4": 10e-6, "H2O": 10e-6}, "panels": []},
                    {"concentrations": {}, "panels": []}
                ]
            }"#,
        );
        let sim = load_simulation_concentrations(temp_file.path()).unwrap();
        assert_eq!(sim.initial["SO2"], 10e-6);
        assert_eq!(sim.final_["H2SO4"], 10e-6);
        assert_eq!(sim.species(), vec!["H2O", "H2SO4", "SO2"]);
    }

    #[test]
    fn test_load_legacy_result_document() {
        let temp_file = temp_json(
            r#"{"results": {"initfinaldiff": {
                "initial": {"NO2": 2.0},
                "final": {"NO2": 1.0, "NO": 1.0},
                "change": {"NO2": -1.0, "NO": 1.0}
            }}}"#,
        );
        let sim = load_simulation_concentrations(temp_file.path()).unwrap();
        assert_eq!(sim.initial["NO2"], 2.0);
        assert_eq!(sim.changes()["NO"], 1.0);
    }

    #[test]
    fn test_result_document_without_results() {
        let temp_file = temp_json(r#"{"input": {"concentrations": {"H2O": 1}}, "results": []}"#);
        assert!(matches!(
            load_simulation_concentrations(temp_file.path()),
            Err(LoadError::NoResults { .. })
        ));
    }
}
