//! sweep-core: generación de barridos de parámetros sobre plantillas de
//! configuración (MESA, FLASH).
//!
//! Flujo: reglas -> combinaciones numeradas -> plantilla reescrita por
//! combinación (+ bitácora) -> un directorio de ejecución por combinación.
pub mod combination;
pub mod errors;
pub mod materialize;
pub mod profile;
pub mod sweep;
pub mod template;
pub mod value;

pub use combination::{expand_rules, Combination, CombinationSpace, RuleSet, TypeMap};
pub use errors::SweepError;
pub use materialize::{RunMaterializer, StagedFile, DEFAULT_DIR_PREFIX};
pub use profile::CodeProfile;
pub use sweep::{Sweep, SweepBuilder, SweepReport};
pub use template::{LineMatcher, RenderedCombination, Template};
pub use value::{format_scientific, int_range, linspace, ParamType, ParamValue};
