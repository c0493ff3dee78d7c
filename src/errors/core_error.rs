use sweep_core::SweepError;
use thiserror::Error;

use super::rules_error::RulesFileError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en el barrido: {0}")]
    Sweep(#[from] SweepError),
    #[error("Error en el archivo de reglas: {0}")]
    Rules(#[from] RulesFileError),
}

impl CoreError {
    /// Errores de uso/configuración (código de salida 2 en la CLI).
    pub fn is_configuration(&self) -> bool {
        match self {
            CoreError::Config(_) | CoreError::Rules(_) => true,
            CoreError::Sweep(e) => e.is_configuration(),
            CoreError::Internal(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("falta la plantilla".into());
        assert_eq!(err.to_string(), "Error de configuración: falta la plantilla");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_sweep_variant_from() {
        let err: CoreError = SweepError::EmptyRuleSet.into();
        assert_eq!(err.to_string(), "Error en el barrido: el conjunto de reglas no contiene parámetros");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_sweep_io_is_not_configuration() {
        let err: CoreError = SweepError::TemplateNotFound("inlist".into()).into();
        assert!(!err.is_configuration());
        let err: CoreError = SweepError::MissingTemplate.into();
        assert!(err.is_configuration());
    }
}
