//! Materialización de directorios de ejecución.
//!
//! Con una sola combinación el archivo reescrito va directo a la raíz de
//! destino; con varias, cada combinación recibe su subdirectorio `c<id>`.
//! En ambos casos el directorio puede sembrarse copiando la plantilla de
//! ejecutables.

pub mod copy;

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::SweepError;

pub use copy::{copy_tree, move_file};

/// Prefijo por defecto de la raíz de destino.
pub const DEFAULT_DIR_PREFIX: &str = "rule_permutations";

/// Prefijo de los subdirectorios por combinación.
pub const RUN_DIR_PREFIX: &str = "c";

/// Archivo reescrito pendiente de colocar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub id: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunMaterializer {
    root: PathBuf,
    exec_template: Option<PathBuf>,
    template_name: String,
}

impl RunMaterializer {
    pub fn new(root: impl Into<PathBuf>, template_name: impl Into<String>) -> Self {
        Self { root: root.into(),
               exec_template: None,
               template_name: template_name.into() }
    }

    pub fn with_exec_template(mut self, dir: Option<PathBuf>) -> Self {
        self.exec_template = dir;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directorio de ejecución de la combinación `id` en un barrido de
    /// `total` combinaciones.
    pub fn run_dir(&self, id: usize, total: usize) -> PathBuf {
        if total == 1 {
            self.root.clone()
        } else {
            self.root.join(format!("{RUN_DIR_PREFIX}{id}"))
        }
    }

    /// Coloca cada archivo intermedio en su directorio de ejecución y
    /// devuelve esos directorios en orden de id.
    pub fn materialize(&self, staged: &[StagedFile]) -> Result<Vec<PathBuf>, SweepError> {
        match staged {
            [] => Ok(Vec::new()),
            [single] => self.materialize_single(single).map(|d| vec![d]),
            many => {
                create_dir_all(&self.root)?;
                many.iter()
                    .map(|s| self.materialize_one(s, many.len()).map_err(|e| e.in_combination(s.id)))
                    .collect()
            }
        }
    }

    fn materialize_single(&self, staged: &StagedFile) -> Result<PathBuf, SweepError> {
        let dir = self.root.clone();
        if dir.exists() {
            let empty = dir.is_dir()
                        && fs::read_dir(&dir).map_err(|source| SweepError::Write { path: dir.clone(),
                                                                                   source })?
                                             .next()
                                             .is_none();
            if !empty {
                return Err(SweepError::DestinationExists(dir));
            }
        } else {
            create_dir_all(&dir)?;
        }
        if let Some(exec) = &self.exec_template {
            copy_tree(exec, &dir)?;
        }
        move_file(&staged.path, &dir.join(&self.template_name))?;
        log::info!("combinación {} -> {}", staged.id, dir.display());
        Ok(dir)
    }

    fn materialize_one(&self, staged: &StagedFile, total: usize) -> Result<PathBuf, SweepError> {
        let dir = self.run_dir(staged.id, total);
        if dir.exists() {
            return Err(SweepError::DestinationExists(dir));
        }
        match &self.exec_template {
            Some(exec) => {
                copy_tree(exec, &dir)?;
            }
            None => fs::create_dir(&dir).map_err(|source| SweepError::Write { path: dir.clone(),
                                                                              source })?,
        }
        move_file(&staged.path, &dir.join(&self.template_name))?;
        log::info!("combinación {} -> {}", staged.id, dir.display());
        Ok(dir)
    }
}

fn create_dir_all(dir: &Path) -> Result<(), SweepError> {
    fs::create_dir_all(dir).map_err(|source| SweepError::Write { path: dir.to_path_buf(),
                                                                 source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(dir: &Path, name: &str, id: usize, body: &str) -> StagedFile {
        let path = dir.join(format!("{name}_c{id}"));
        fs::write(&path, body).unwrap();
        StagedFile { id, path }
    }

    #[test]
    fn single_combination_uses_root_directly() {
        let tmp = tempfile::TempDir::new().unwrap();
        let staged = vec![stage(tmp.path(), "inlist", 1, "x = 1")];
        let m = RunMaterializer::new(tmp.path().join("out"), "inlist");
        let dirs = m.materialize(&staged).unwrap();
        assert_eq!(dirs, vec![tmp.path().join("out")]);
        assert_eq!(fs::read_to_string(tmp.path().join("out/inlist")).unwrap(), "x = 1");
        assert!(!tmp.path().join("out/c1").exists());
        assert!(!staged[0].path.exists());
    }

    #[test]
    fn many_combinations_get_prefixed_subdirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let staged: Vec<_> = (1..=3).map(|i| stage(tmp.path(), "flash.par", i, &format!("n = {i}"))).collect();
        let m = RunMaterializer::new(tmp.path().join("rule_permutations"), "flash.par");
        let dirs = m.materialize(&staged).unwrap();
        assert_eq!(dirs.len(), 3);
        for i in 1..=3 {
            let f = tmp.path().join(format!("rule_permutations/c{i}/flash.par"));
            assert_eq!(fs::read_to_string(f).unwrap(), format!("n = {i}"));
        }
    }

    #[test]
    fn existing_run_dir_is_reported_with_combination() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("out/c2")).unwrap();
        let staged: Vec<_> = (1..=2).map(|i| stage(tmp.path(), "inlist", i, "")).collect();
        let m = RunMaterializer::new(tmp.path().join("out"), "inlist");
        let err = m.materialize(&staged).unwrap_err();
        match err {
            SweepError::Combination { id, source } => {
                assert_eq!(id, 2);
                assert!(matches!(*source, SweepError::DestinationExists(_)));
            }
            other => panic!("error inesperado: {other}"),
        }
        // c1 ya quedó completa; no hay rollback
        assert!(tmp.path().join("out/c1/inlist").exists());
    }

    #[test]
    fn single_combination_rejects_non_empty_root() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("out")).unwrap();
        fs::write(tmp.path().join("out/leftover"), "").unwrap();
        let staged = vec![stage(tmp.path(), "inlist", 1, "")];
        let m = RunMaterializer::new(tmp.path().join("out"), "inlist");
        assert!(matches!(m.materialize(&staged), Err(SweepError::DestinationExists(_))));
    }

    #[test]
    fn exec_template_seeds_each_run_and_placeholder_is_replaced() {
        let tmp = tempfile::TempDir::new().unwrap();
        let exec = tmp.path().join("exec");
        fs::create_dir_all(&exec).unwrap();
        fs::write(exec.join("rn"), "#!/bin/sh").unwrap();
        fs::write(exec.join("inlist"), "placeholder").unwrap();
        let staged: Vec<_> = (1..=2).map(|i| stage(tmp.path(), "inlist", i, &format!("v{i}"))).collect();
        let m = RunMaterializer::new(tmp.path().join("out"), "inlist").with_exec_template(Some(exec));
        m.materialize(&staged).unwrap();
        for i in 1..=2 {
            let run = tmp.path().join(format!("out/c{i}"));
            assert!(run.join("rn").exists());
            assert_eq!(fs::read_to_string(run.join("inlist")).unwrap(), format!("v{i}"));
        }
    }
}
