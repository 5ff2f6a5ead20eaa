//! Host side of the `notesmith` binary.
//!
//! - **`document`**: the file named on the command line as the active document
//! - **`terminal`**: stdin/stderr stand-ins for the input modal and notice area
//! - **`commands`**: `refine` and `config` subcommand handlers

pub mod commands;
pub mod document;
pub mod terminal;
