/// Commands shared by the command line and the interactive menu.
pub mod cli_commands;
/// Numbered stdin menu.
pub mod cli_main;
