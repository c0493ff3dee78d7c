//! Generación de combinaciones: producto cartesiano y expansión de reglas.

pub mod expander;
pub mod generator;

pub use expander::{expand_rules, Combination, RuleSet, TypeMap};
pub use generator::{combinations, CombinationSpace, Combinations};
