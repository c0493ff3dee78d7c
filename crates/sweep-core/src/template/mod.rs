//! Plantilla: carga, clasificación de líneas, reescritura y bitácora.

pub mod loader;
pub mod sweep_log;
pub mod matcher;
pub mod rewriter;

pub use sweep_log::SweepLog;
pub use loader::{LineEnding, Template, TemplateLine};
pub use matcher::{AssignmentMatch, LineKind, LineMatcher};
pub use rewriter::{rewrite_lines, staged_file_name, write_combination, RenderedCombination};
