use std::path::PathBuf;

use sweep_core::SweepError;
use thiserror::Error;

/// Errores al leer o interpretar un archivo de reglas.
#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("no se pudo leer {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("JSON inválido: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("parámetro duplicado: {0}")]
    DuplicateParameter(String),
    #[error("rango inválido para '{name}': {reason}")]
    InvalidRange { name: String, reason: String },
    #[error("{0}")]
    Sweep(#[from] SweepError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_variant_format() {
        let err = RulesFileError::DuplicateParameter("basenm".into());
        assert_eq!(err.to_string(), "parámetro duplicado: basenm");
    }

    #[test]
    fn test_invalid_range_format() {
        let err = RulesFileError::InvalidRange { name: "nend".into(), reason: "step = 0".into() };
        assert_eq!(err.to_string(), "rango inválido para 'nend': step = 0");
    }
}
