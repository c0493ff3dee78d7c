//! Orquestación de un barrido completo.
//!
//! `SweepBuilder` acumula las entradas; `build` valida todo lo validable sin
//! tocar el filesystem (código, tipos, candidatos, directorio de
//! ejecutables). `Sweep::run` ejecuta: expandir reglas -> cargar plantilla ->
//! reescribir + bitácora por combinación -> materializar directorios.
//!
//! ```ignore
//! let report = Sweep::for_code("mesa")?
//!     .template("inlist_1.0")
//!     .rules(rules)
//!     .types(types)
//!     .dir_prefix("pmswd")
//!     .build()?
//!     .run()?;
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::combination::{expand_rules, RuleSet, TypeMap};
use crate::errors::SweepError;
use crate::materialize::{RunMaterializer, StagedFile, DEFAULT_DIR_PREFIX};
use crate::profile::CodeProfile;
use crate::template::{write_combination, LineMatcher, RenderedCombination, SweepLog, Template};

/// Resumen de un barrido ejecutado.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub code: CodeProfile,
    pub template: String,
    pub combinations: usize,
    pub log_path: PathBuf,
    pub root: PathBuf,
    pub run_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SweepBuilder {
    profile: CodeProfile,
    template: Option<PathBuf>,
    rules: RuleSet,
    types: TypeMap,
    exec_template: Option<PathBuf>,
    dir_prefix: Option<String>,
    work_dir: PathBuf,
}

impl SweepBuilder {
    pub fn new(profile: CodeProfile) -> Self {
        Self { profile,
               template: None,
               rules: RuleSet::new(),
               types: TypeMap::new(),
               exec_template: None,
               dir_prefix: None,
               work_dir: PathBuf::from(".") }
    }

    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn types(mut self, types: TypeMap) -> Self {
        self.types = types;
        self
    }

    pub fn exec_template(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exec_template = Some(dir.into());
        self
    }

    pub fn dir_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dir_prefix = Some(prefix.into());
        self
    }

    /// Directorio donde se escriben los archivos intermedios, la bitácora y
    /// la raíz de destino.
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Valida la configuración y devuelve el barrido listo para ejecutar.
    pub fn build(self) -> Result<Sweep, SweepError> {
        self.rules.validate(&self.types)?;
        for (name, values) in self.rules.iter() {
            if let Some(ty) = self.types.get(name) {
                for v in values {
                    ty.render(name, v, self.profile)?;
                }
            }
        }
        if let Some(exec) = &self.exec_template {
            if !exec.is_dir() {
                return Err(SweepError::ExecTemplateMissing(exec.clone()));
            }
        }
        let template = self.template.ok_or(SweepError::MissingTemplate)?;
        let matcher = LineMatcher::new(self.profile, self.rules.names())?;
        Ok(Sweep { profile: self.profile,
                   template,
                   rules: self.rules,
                   types: self.types,
                   exec_template: self.exec_template,
                   dir_prefix: self.dir_prefix.unwrap_or_else(|| DEFAULT_DIR_PREFIX.to_string()),
                   work_dir: self.work_dir,
                   matcher })
    }
}

/// Barrido validado.
#[derive(Debug, Clone)]
pub struct Sweep {
    profile: CodeProfile,
    template: PathBuf,
    rules: RuleSet,
    types: TypeMap,
    exec_template: Option<PathBuf>,
    dir_prefix: String,
    work_dir: PathBuf,
    matcher: LineMatcher,
}

impl Sweep {
    /// Selecciona el perfil por nombre; un nombre desconocido falla aquí,
    /// antes de cualquier I/O.
    pub fn for_code(name: &str) -> Result<SweepBuilder, SweepError> {
        Ok(SweepBuilder::new(CodeProfile::from_name(name)?))
    }

    pub fn builder(profile: CodeProfile) -> SweepBuilder {
        SweepBuilder::new(profile)
    }

    pub fn profile(&self) -> CodeProfile {
        self.profile
    }

    pub fn root(&self) -> PathBuf {
        self.work_dir.join(&self.dir_prefix)
    }

    pub fn template_path(&self) -> &Path {
        &self.template
    }

    /// Combinaciones ya escritas como literales, sin I/O.
    pub fn plan(&self) -> Result<Vec<RenderedCombination>, SweepError> {
        expand_rules(&self.rules)?.iter()
                                  .map(|c| RenderedCombination::render(c, &self.types, self.profile))
                                  .collect()
    }

    /// Ejecuta el barrido completo.
    ///
    /// Ante un error se detiene; lo escrito para combinaciones previas queda
    /// en disco.
    pub fn run(&self) -> Result<SweepReport, SweepError> {
        let plan = self.plan()?;
        let template = Template::load(&self.template)?;
        log::info!("barrido {}: {} combinaciones sobre {}", self.profile, plan.len(), template.name());

        let mut sweep_log = SweepLog::create(&self.work_dir, template.name())?;
        let mut staged = Vec::with_capacity(plan.len());
        for rendered in &plan {
            let id = rendered.id();
            let path = write_combination(&self.work_dir, &template, rendered, &self.matcher)
                .map_err(|e| e.in_combination(id))?;
            sweep_log.append(rendered).map_err(|e| e.in_combination(id))?;
            staged.push(StagedFile { id, path });
        }

        let materializer =
            RunMaterializer::new(self.root(), template.name()).with_exec_template(self.exec_template.clone());
        let run_dirs = materializer.materialize(&staged)?;

        Ok(SweepReport { code: self.profile,
                         template: template.name().to_string(),
                         combinations: plan.len(),
                         log_path: sweep_log.path().to_path_buf(),
                         root: self.root(),
                         run_dirs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ParamType, ParamValue};

    #[test]
    fn unknown_code_fails_before_io() {
        let err = Sweep::for_code("enzo").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn type_mismatch_detected_at_build() {
        let rules = RuleSet::new().rule("nend", [ParamValue::Float(1.5)]);
        let types = TypeMap::new().with("nend", ParamType::Integer);
        let err = Sweep::builder(CodeProfile::Flash).template("flash.par")
                                                   .rules(rules)
                                                   .types(types)
                                                   .build()
                                                   .unwrap_err();
        assert!(matches!(err, SweepError::TypeMismatch { .. }));
    }

    #[test]
    fn plan_renders_without_touching_disk() {
        let rules = RuleSet::new().rule("a", [1.0, 2.0]).rule("b", ["x"]);
        let types = TypeMap::new().with("a", ParamType::Float).with("b", ParamType::String);
        let sweep = Sweep::builder(CodeProfile::Mesa).template("/no/such/inlist")
                                                    .rules(rules)
                                                    .types(types)
                                                    .build()
                                                    .unwrap();
        let plan = sweep.plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].get("a"), Some("2.00000000000000d+00"));
        assert_eq!(sweep.root(), PathBuf::from("./rule_permutations"));
    }
}
