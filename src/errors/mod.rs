pub mod core_error;
pub mod rules_error;

pub use core_error::CoreError;
pub use rules_error::RulesFileError;
