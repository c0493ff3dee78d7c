//! Bitácora del barrido: `<plantilla>.log`, un bloque por combinación.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::rewriter::RenderedCombination;
use crate::errors::SweepError;

pub const LOG_DELIMITER: &str = "-------------------------------";

/// Escritor de la bitácora; se trunca al crearla y luego solo se agrega.
#[derive(Debug)]
pub struct SweepLog {
    path: PathBuf,
    out: BufWriter<File>,
}

impl SweepLog {
    pub fn create(work_dir: &Path, template_name: &str) -> Result<Self, SweepError> {
        let path = work_dir.join(format!("{template_name}.log"));
        let file = File::create(&path).map_err(|source| SweepError::Write { path: path.clone(),
                                                                            source })?;
        Ok(Self { path,
                  out: BufWriter::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Agrega el bloque de una combinación y lo vuelca a disco.
    pub fn append(&mut self, rendered: &RenderedCombination) -> Result<(), SweepError> {
        let block = format_block(rendered);
        self.out
            .write_all(block.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|source| SweepError::Write { path: self.path.clone(),
                                                  source })
    }
}

/// Texto del bloque de una combinación.
pub fn format_block(rendered: &RenderedCombination) -> String {
    let mut block = format!("{LOG_DELIMITER}\ncomb: {}\n", rendered.id());
    for (name, value) in rendered.iter() {
        block.push_str(name);
        block.push_str(": ");
        block.push_str(value);
        block.push('\n');
    }
    block
}
