//! permsweep
//!
//! Este crate actúa como la fachada de la librería de barridos:
//! - Reexporta `sweep_core` (motor de combinaciones y reescritura).
//! - Expone `config` para leer valores por defecto del entorno (.env).
//! - Expone `errors` para manejar errores de la fachada.
//! - Expone `rules_file` para leer reglas desde JSON.
//!
//! Puede usarse desde la CLI (`sweep-cli`) o desde scripts Rust propios.

pub mod config;
pub mod errors;
pub mod rules_file;

pub use errors::{CoreError, RulesFileError};
pub use rules_file::RulesFile;
pub use sweep_core::*;
