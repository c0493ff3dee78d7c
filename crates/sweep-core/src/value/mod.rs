//! Valores candidatos y tipos declarados de parámetros.
//!
//! `ParamValue` es lo que el usuario provee; `ParamType` decide cómo se
//! escribe en el archivo de configuración. El tipo declarado manda: un entero
//! declarado `float` se escribe en notación científica.

pub mod format;
pub mod range;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SweepError;
use crate::profile::CodeProfile;

pub use format::format_scientific;
pub use range::{int_range, linspace};

/// Valor candidato de un parámetro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Forma textual natural (sin codificación especial).
    pub fn natural(&self) -> String {
        match self {
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Float(x) => format!("{x:?}"),
            ParamValue::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.natural())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self { ParamValue::Int(v) }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self { ParamValue::Float(v) }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self { ParamValue::Str(v.to_string()) }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self { ParamValue::Str(v) }
}

/// Tipo declarado de un parámetro; selecciona la regla de escritura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    #[serde(alias = "int")]
    Integer,
    Float,
}

impl ParamType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Float => "float",
        }
    }

    /// Escribe `value` como literal del código `profile`.
    ///
    /// `name` solo se usa para el mensaje de error.
    pub fn render(self, name: &str, value: &ParamValue, profile: CodeProfile) -> Result<String, SweepError> {
        match (self, value) {
            (ParamType::Float, ParamValue::Float(x)) => Ok(format_scientific(*x, profile.exponent_marker())),
            (ParamType::Float, ParamValue::Int(i)) => Ok(format_scientific(*i as f64, profile.exponent_marker())),
            (ParamType::Integer, ParamValue::Int(i)) => Ok(i.to_string()),
            (ParamType::String, v) => Ok(v.natural()),
            (expected, v) => Err(SweepError::TypeMismatch { name: name.to_string(),
                                                            value: v.natural(),
                                                            expected: expected.as_str() }),
        }
    }
}

impl FromStr for ParamType {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(ParamType::String),
            "integer" | "int" => Ok(ParamType::Integer),
            "float" => Ok(ParamType::Float),
            _ => Err(SweepError::UnsupportedType(s.to_string())),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
