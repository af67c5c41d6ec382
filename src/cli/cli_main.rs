use super::cli_commands::{
    BalanceInput, CliError, balance_command, decompose_command, molar_mass_command, set_config,
    show_config,
};
use crate::settings::Settings;
use log::error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - errors

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(
        output,
        "\x1b[34m\n Welcome to AcidWatch: mass balance check of chemical reaction simulations \n\x1b[0m"
    )?;
    writeln!(output, "\x1b[33m1. Decompose formulas\x1b[0m")?;
    writeln!(output, "\x1b[33m2. Molar mass\x1b[0m")?;
    writeln!(output, "\x1b[33m3. Mass balance of two concentration files\x1b[0m")?;
    writeln!(output, "\x1b[33m4. Mass balance of a simulation result file\x1b[0m")?;
    writeln!(output, "\x1b[33m5. Settings\x1b[0m")?;
    writeln!(output, "\x1b[33m0. Exit\x1b[0m")?;
    write!(output, "\x1b[36mEnter your choice: \x1b[0m")?;
    output.flush()
}

/// None at end of input
fn get_user_input<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "\x1b[36m{}: \x1b[0m", question)?;
    output.flush()?;
    get_user_input(input)
}

fn report<W: Write>(output: &mut W, result: Result<String, CliError>) -> io::Result<()> {
    match result {
        Ok(text) => writeln!(output, "{}", text),
        Err(e) => {
            error!("{}", e);
            writeln!(output, "\x1b[31m{}\x1b[0m", e)
        }
    }
}

fn formulas_from(line: &str) -> Vec<String> {
    line.split([',', ' '])
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn settings_menu<R: BufRead, W: Write>(
    settings: &mut Settings,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(output, "\n=== Settings ===")?;
        writeln!(output, "{}", show_config(settings))?;
        writeln!(output, "1. Change a setting")?;
        writeln!(output, "2. Reset to defaults")?;
        writeln!(output, "0. Back to main menu")?;
        let Some(choice) = prompt(input, output, "Enter your choice")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                let Some(key) = prompt(input, output, "Setting name")? else {
                    return Ok(());
                };
                let Some(value) = prompt(input, output, "New value")? else {
                    return Ok(());
                };
                let result = set_config(settings, &key, &value).map(|_| format!("{} = {}", key, value));
                report(output, result)?;
            }
            "2" => {
                let result = settings
                    .reset_to_defaults()
                    .map(|_| "Settings reset to defaults".to_string())
                    .map_err(CliError::from);
                report(output, result)?;
            }
            "0" => return Ok(()),
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }
}

/// Numbered menu on `input`/`output` until the user exits or the input ends.
pub fn run_interactive_menu<R: BufRead, W: Write>(
    settings: &mut Settings,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    loop {
        show_main_menu(output)?;
        let Some(choice) = get_user_input(input)? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                if let Some(line) = prompt(input, output, "Formulas (comma or space separated)")? {
                    let result = decompose_command(settings, &formulas_from(&line), 1.0);
                    report(output, result)?;
                }
            }
            "2" => {
                if let Some(line) = prompt(input, output, "Formulas (comma or space separated)")? {
                    let result = molar_mass_command(settings, &formulas_from(&line));
                    report(output, result)?;
                }
            }
            "3" => {
                let Some(initial) = prompt(input, output, "Initial concentrations file")? else {
                    return Ok(());
                };
                let Some(final_) = prompt(input, output, "Final concentrations file")? else {
                    return Ok(());
                };
                let balance_input = BalanceInput::Files {
                    initial: PathBuf::from(initial),
                    final_: PathBuf::from(final_),
                };
                let result = balance_command(settings, &balance_input, true).map(|o| o.report);
                report(output, result)?;
            }
            "4" => {
                if let Some(path) = prompt(input, output, "Simulation result file")? {
                    let balance_input = BalanceInput::Simulation(PathBuf::from(path));
                    let result = balance_command(settings, &balance_input, true).map(|o| o.report);
                    report(output, result)?;
                }
            }
            "5" => settings_menu(settings, input, output)?,
            "0" => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run(settings: &mut Settings, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        run_interactive_menu(settings, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_decompose_and_exit() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::with_config_file(dir.path().join("config.json")).unwrap();
        let output = run(&mut settings, "1\nH2O, CH3COOH\n0\n");
        assert!(output.contains("water"));
        assert!(output.contains("acetic acid"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_errors_are_reported_and_menu_continues() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::with_config_file(dir.path().join("config.json")).unwrap();
        let output = run(&mut settings, "1\nCH(CH3\n9\n0\n");
        assert!(output.contains("Unbalanced groups in formula 'CH(CH3'"));
        assert!(output.contains("Invalid choice"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_settings_menu() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::with_config_file(dir.path().join("config.json")).unwrap();
        run(&mut settings, "5\n1\nepsilon\n1e-12\n0\n0\n");
        assert_eq!(settings.config().epsilon, 1e-12);
    }

    #[test]
    fn test_end_of_input_exits() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::with_config_file(dir.path().join("config.json")).unwrap();
        let output = run(&mut settings, "2\n");
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn test_formulas_from() {
        assert_eq!(formulas_from("H2O, NO2  N2"), vec!["H2O", "NO2", "N2"]);
    }
}
