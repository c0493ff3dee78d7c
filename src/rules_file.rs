//! Archivo de reglas (JSON) para la CLI.
//!
//! Formato:
//!
//! ```json
//! {
//!   "code": "mesa",
//!   "template": "inlist_1.0",
//!   "exec_template_dir": "execs/1M_pre_ms_to_wd",
//!   "dir_prefix": "pmswd",
//!   "parameters": [
//!     { "name": "Reimers_wind_eta", "type": "float",
//!       "values": { "linspace": { "start": 0.0, "stop": 2.0, "num": 5 } } },
//!     { "name": "basenm", "type": "string", "values": ["\"run_\""] }
//!   ]
//! }
//! ```
//!
//! `parameters` es una lista para que el orden (anidamiento) sea explícito.
//! Las rutas relativas se resuelven contra el directorio del archivo.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sweep_core::{int_range, linspace, ParamType, ParamValue, RuleSet, Sweep, SweepBuilder, TypeMap};

use crate::config::AppConfig;
use crate::errors::{CoreError, RulesFileError};

#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    pub code: Option<String>,
    pub template: Option<PathBuf>,
    pub exec_template_dir: Option<PathBuf>,
    pub dir_prefix: Option<String>,
    pub parameters: Vec<ParameterSpec>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub values: ValuesSpec,
}

/// Lista literal de candidatos o un generador numérico.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValuesSpec {
    List(Vec<ParamValue>),
    Generator(GeneratorSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorSpec {
    /// `num` flotantes equiespaciados, extremos incluidos.
    Linspace { start: f64, stop: f64, num: usize },
    /// Enteros `start..stop` con paso `step` (1 por defecto).
    Range {
        start: i64,
        stop: i64,
        #[serde(default = "default_step")]
        step: i64,
    },
}

fn default_step() -> i64 {
    1
}

impl RulesFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RulesFileError::Read { path: path.to_path_buf(),
                                                                                     source })?;
        let mut parsed = Self::from_json(&text)?;
        parsed.base_dir = path.parent()
                              .filter(|p| !p.as_os_str().is_empty())
                              .map(Path::to_path_buf);
        Ok(parsed)
    }

    pub fn from_json(text: &str) -> Result<Self, RulesFileError> {
        Ok(serde_json::from_str(text)?)
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }

    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_deref().map(|p| self.resolve(p))
    }

    pub fn exec_template_path(&self) -> Option<PathBuf> {
        self.exec_template_dir.as_deref().map(|p| self.resolve(p))
    }

    /// Convierte los parámetros en reglas + tipos, en el orden del archivo.
    pub fn to_rules(&self) -> Result<(RuleSet, TypeMap), RulesFileError> {
        let mut rules = RuleSet::new();
        let mut types = TypeMap::new();
        for p in &self.parameters {
            if rules.get(&p.name).is_some() {
                return Err(RulesFileError::DuplicateParameter(p.name.clone()));
            }
            let ty: ParamType = p.ty.parse()?;
            rules.insert(p.name.clone(), p.values.expand(&p.name)?);
            types.insert(p.name.clone(), ty);
        }
        Ok((rules, types))
    }

    /// Arma un `SweepBuilder` combinando archivo y configuración de entorno.
    ///
    /// Prioridad: archivo > `config`. La plantilla es obligatoria.
    pub fn sweep_builder(&self, config: &AppConfig) -> Result<SweepBuilder, CoreError> {
        let code = self.code
                       .as_deref()
                       .or(config.default_code.as_deref())
                       .ok_or_else(|| CoreError::Config("falta 'code' (archivo de reglas o PERMSWEEP_CODE)".into()))?;
        let mut builder = Sweep::for_code(code)?;
        let (rules, types) = self.to_rules()?;
        builder = builder.rules(rules).types(types).work_dir(&config.work_dir);
        if let Some(t) = self.template_path() {
            builder = builder.template(t);
        }
        if let Some(exec) = self.exec_template_path() {
            builder = builder.exec_template(exec);
        }
        if let Some(prefix) = self.dir_prefix.as_ref().or(config.dir_prefix.as_ref()) {
            builder = builder.dir_prefix(prefix.clone());
        }
        Ok(builder)
    }
}

impl ValuesSpec {
    pub fn expand(&self, name: &str) -> Result<Vec<ParamValue>, RulesFileError> {
        match self {
            ValuesSpec::List(values) => Ok(values.clone()),
            ValuesSpec::Generator(GeneratorSpec::Linspace { start, stop, num }) => Ok(linspace(*start, *stop, *num)),
            ValuesSpec::Generator(GeneratorSpec::Range { start, stop, step }) => {
                int_range(*start, *stop, *step).ok_or_else(|| RulesFileError::InvalidRange { name: name.to_string(),
                                                                                             reason: "step = 0".into() })
            }
        }
    }
}
