//! Errores del motor de barridos.
//!
//! Tres familias (ver `SweepError::is_configuration`):
//! - configuración: se detectan antes de tocar el filesystem.
//! - I/O: fatales en el punto donde ocurren; lo ya escrito queda en disco.
//! - contexto: `Combination` envuelve un error con el id de la combinación
//!   que lo provocó.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("código no soportado '{name}'; opciones: {supported}")]
    UnsupportedCode { name: String, supported: String },
    #[error("tipo de parámetro no soportado: '{0}' (usar string, integer o float)")]
    UnsupportedType(String),
    #[error("el parámetro '{0}' no tiene tipo declarado")]
    MissingType(String),
    #[error("el conjunto de reglas no contiene parámetros")]
    EmptyRuleSet,
    #[error("el parámetro '{0}' no tiene valores candidatos")]
    EmptyCandidates(String),
    #[error("el barrido excede el número máximo de combinaciones representable")]
    TooManyCombinations,
    #[error("no se indicó plantilla de parámetros")]
    MissingTemplate,
    #[error("el valor '{value}' del parámetro '{name}' no es compatible con el tipo {expected}")]
    TypeMismatch { name: String, value: String, expected: &'static str },
    #[error("el directorio plantilla de ejecutables no existe: {0}")]
    ExecTemplateMissing(PathBuf),
    #[error("patrón de línea inválido: {0}")]
    Pattern(#[from] regex::Error),

    #[error("plantilla no encontrada: {0}")]
    TemplateNotFound(PathBuf),
    #[error("error leyendo plantilla {path}: {source}")]
    TemplateRead { path: PathBuf, #[source] source: std::io::Error },
    #[error("error escribiendo {path}: {source}")]
    Write { path: PathBuf, #[source] source: std::io::Error },
    #[error("el destino ya existe: {0}")]
    DestinationExists(PathBuf),
    #[error("copia interrumpida {from} -> {to}: {source}")]
    Copy { from: PathBuf, to: PathBuf, #[source] source: std::io::Error },
    #[error("no se pudo mover {from} -> {to}: {source}")]
    Move { from: PathBuf, to: PathBuf, #[source] source: std::io::Error },

    #[error("combinación {id}: {source}")]
    Combination { id: usize, #[source] source: Box<SweepError> },
}

impl SweepError {
    /// `true` para errores detectables antes de cualquier operación de I/O.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::UnsupportedCode { .. }
            | Self::UnsupportedType(_)
            | Self::MissingType(_)
            | Self::EmptyRuleSet
            | Self::EmptyCandidates(_)
            | Self::TooManyCombinations
            | Self::MissingTemplate
            | Self::TypeMismatch { .. }
            | Self::ExecTemplateMissing(_)
            | Self::Pattern(_) => true,
            Self::Combination { source, .. } => source.is_configuration(),
            _ => false,
        }
    }

    /// Envuelve el error con el id de la combinación en curso.
    pub fn in_combination(self, id: usize) -> Self {
        Self::Combination { id, source: Box::new(self) }
    }
}
