//! Registro inmutable de perfiles de código de simulación.
//!
//! Cada código soportado aporta exactamente dos convenciones de sintaxis: el
//! carácter que inicia un comentario y el carácter que reemplaza a la `e` en
//! notación científica. El conjunto es cerrado; añadir un código implica una
//! nueva variante.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SweepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeProfile {
    /// FLASH (`flash.par`).
    Flash,
    /// MESA (inlists Fortran namelist).
    Mesa,
}

impl CodeProfile {
    pub const ALL: [CodeProfile; 2] = [CodeProfile::Flash, CodeProfile::Mesa];

    pub const fn name(self) -> &'static str {
        match self {
            CodeProfile::Flash => "flash",
            CodeProfile::Mesa => "mesa",
        }
    }

    pub const fn comment_marker(self) -> char {
        match self {
            CodeProfile::Flash => '#',
            CodeProfile::Mesa => '!',
        }
    }

    pub const fn exponent_marker(self) -> char {
        match self {
            CodeProfile::Flash => 'e',
            CodeProfile::Mesa => 'd',
        }
    }

    /// Busca un perfil por nombre (sin distinguir mayúsculas).
    pub fn from_name(name: &str) -> Result<Self, SweepError> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL.iter()
                 .copied()
                 .find(|p| p.name() == wanted)
                 .ok_or_else(|| SweepError::UnsupportedCode { name: name.to_string(),
                                                              supported: Self::supported_names() })
    }

    pub fn supported_names() -> String {
        Self::ALL.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for CodeProfile {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for CodeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
