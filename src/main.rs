#![allow(non_snake_case)]
use AcidWatch::Utils::logger::init_logging;
use AcidWatch::cli::cli_commands::{
    BalanceInput, CliError, balance_command, decompose_command, molar_mass_command, set_config,
    show_config,
};
use AcidWatch::cli::cli_main::run_interactive_menu;
use AcidWatch::settings::{DEFAULT_CONFIG_FILE, Settings};
use clap::{Parser, Subcommand};
use log::{LevelFilter, error};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// AcidWatch mass balance toolkit
///
/// Decompose chemical formulas into element counts and check the mass balance
/// between the initial and final concentrations of a simulation.
#[derive(Parser)]
#[command(name = "acidwatch", version, about, long_about = None)]
struct Cli {
    /// Path to the settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Log at debug level regardless of the settings file
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Element counts of one or more formulas
    Decompose {
        formulas: Vec<String>,
        /// Concentration each formula is weighted by
        #[arg(long, default_value_t = 1.0)]
        weight: f64,
    },
    /// Molar mass of one or more formulas
    MolarMass { formulas: Vec<String> },
    /// Mass balance between an initial and a final state
    Balance {
        /// JSON object of initial concentrations
        #[arg(long, requires = "final_file", conflicts_with = "simulation")]
        initial: Option<PathBuf>,
        /// JSON object of final concentrations
        #[arg(long = "final", id = "final_file", requires = "initial")]
        final_: Option<PathBuf>,
        /// Simulation result document holding both states
        #[arg(long)]
        simulation: Option<PathBuf>,
        /// Print the species table as well
        #[arg(long)]
        species: bool,
        /// Exit with code 2 when the imbalance is significant
        #[arg(long)]
        strict: bool,
    },
    /// Show or change the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Numbered menu on stdin
    Interactive,
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Set { key: String, value: String },
    Reset,
}

fn run(cli: Cli, settings: &mut Settings) -> Result<i32, CliError> {
    match cli.command {
        Commands::Decompose { formulas, weight } => {
            println!("{}", decompose_command(settings, &formulas, weight)?);
        }
        Commands::MolarMass { formulas } => {
            println!("{}", molar_mass_command(settings, &formulas)?);
        }
        Commands::Balance {
            initial,
            final_,
            simulation,
            species,
            strict,
        } => {
            let input = match (initial, final_, simulation) {
                (Some(initial), Some(final_), None) => BalanceInput::Files { initial, final_ },
                (None, None, Some(path)) => BalanceInput::Simulation(path),
                _ => {
                    return Err(CliError::Usage(
                        "give either --initial and --final, or --simulation".to_string(),
                    ));
                }
            };
            let outcome = balance_command(settings, &input, species)?;
            println!("{}", outcome.report);
            if strict && outcome.significant {
                return Ok(2);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => println!("{}", show_config(settings)),
            ConfigAction::Set { key, value } => {
                set_config(settings, &key, &value)?;
                println!("{}", show_config(settings));
            }
            ConfigAction::Reset => {
                settings.reset_to_defaults()?;
                println!("{}", show_config(settings));
            }
        },
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            if let Err(e) = run_interactive_menu(settings, &mut input, &mut output) {
                error!("interactive session failed: {}", e);
                return Ok(1);
            }
        }
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    let settings = Settings::with_config_file(&cli.config);

    let level = match (&settings, cli.verbose) {
        (_, true) => LevelFilter::Debug,
        (Ok(settings), false) => settings.level_filter(),
        (Err(_), false) => LevelFilter::Info,
    };
    let log_file = settings
        .as_ref()
        .ok()
        .and_then(|s| s.config().log_file.clone());
    if let Err(e) = init_logging(level, log_file.as_deref().map(Path::new)) {
        eprintln!("{}", e);
    }

    let mut settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}: {}", cli.config.display(), e);
            process::exit(1);
        }
    };

    let exit_code = match run(cli, &mut settings) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            1
        }
    };
    process::exit(exit_code);
}
