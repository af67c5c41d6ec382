#![allow(non_snake_case)]
//! Chemical formula decomposition and mass balance verification for AcidWatch
//! reaction simulations.
#[allow(non_snake_case)]
pub mod MassBalance;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
