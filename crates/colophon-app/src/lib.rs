//! Everything behind the desktop window that can run headless: command line,
//! settings, logging, engine selection and the shell state machine.

pub mod cli;
pub mod engine;
pub mod logging;
pub mod settings;
pub mod shell;
