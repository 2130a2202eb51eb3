// Utility module for configuration, logging, errors and load-time validation
// Author: Gabriel Demetrios Lafis

mod config;
mod error;
mod logging;
mod validation;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use validation::*;
