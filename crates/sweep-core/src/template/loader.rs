//! Carga de la plantilla de parámetros.
//!
//! Cada línea se guarda como bytes, sin su terminador; el terminador
//! original (`\n`, `\r\n` o ninguno en la última línea) se conserva aparte y
//! se vuelve a escribir tal cual. No se asume ninguna codificación: una
//! plantilla en Latin-1 pasa sin cambios.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::SweepError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// Última línea sin salto final.
    None,
}

impl LineEnding {
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
            LineEnding::None => b"",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLine {
    pub text: Vec<u8>,
    pub ending: LineEnding,
}

/// Plantilla cargada, de solo lectura.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    dir: PathBuf,
    lines: Vec<TemplateLine>,
}

impl Template {
    /// Lee `path` y separa sus líneas.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| match e.kind() {
                                                  ErrorKind::NotFound => SweepError::TemplateNotFound(path.to_path_buf()),
                                                  _ => SweepError::TemplateRead { path: path.to_path_buf(),
                                                                                  source: e },
                                              })?;
        let name = path.file_name()
                       .map(|n| n.to_string_lossy().into_owned())
                       .ok_or_else(|| SweepError::TemplateRead { path: path.to_path_buf(),
                                                                 source: std::io::Error::new(ErrorKind::InvalidInput,
                                                                                             "la ruta no tiene nombre de archivo") })?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        log::debug!("plantilla {} cargada ({} bytes)", path.display(), content.len());
        Ok(Self::from_parts(name, dir, &content))
    }

    /// Construye una plantilla en memoria (sin I/O).
    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        Self::from_bytes(name, content.as_bytes())
    }

    pub fn from_bytes(name: impl Into<String>, content: &[u8]) -> Self {
        Self::from_parts(name.into(), PathBuf::from("."), content)
    }

    fn from_parts(name: String, dir: PathBuf, content: &[u8]) -> Self {
        Self { name,
               dir,
               lines: split_lines(content) }
    }

    /// Nombre de archivo de la plantilla (p. ej. `inlist_1.0`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn lines(&self) -> &[TemplateLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn split_lines(content: &[u8]) -> Vec<TemplateLine> {
    content.split_inclusive(|&b| b == b'\n')
           .map(|raw| {
               if let Some(text) = raw.strip_suffix(b"\r\n") {
                   TemplateLine { text: text.to_vec(),
                                  ending: LineEnding::CrLf }
               } else if let Some(text) = raw.strip_suffix(b"\n") {
                   TemplateLine { text: text.to_vec(),
                                  ending: LineEnding::Lf }
               } else {
                   TemplateLine { text: raw.to_vec(),
                                  ending: LineEnding::None }
               }
           })
           .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_endings_per_line() {
        let t = Template::from_text("inlist", "a = 1\r\nb = 2\nc = 3");
        let endings: Vec<_> = t.lines().iter().map(|l| l.ending).collect();
        assert_eq!(endings, vec![LineEnding::CrLf, LineEnding::Lf, LineEnding::None]);
        assert_eq!(t.lines()[0].text, b"a = 1");
        assert_eq!(t.lines()[2].text, b"c = 3");
    }

    #[test]
    fn empty_lines_are_kept() {
        let t = Template::from_text("x", "\n\n  \n");
        assert_eq!(t.len(), 3);
        assert_eq!(t.lines()[2].text, b"  ");
    }

    #[test]
    fn latin1_bytes_are_kept() {
        let t = Template::from_bytes("inlist", b"! autor: Jos\xe9\r\nx = 1\n");
        assert_eq!(t.len(), 2);
        assert_eq!(t.lines()[0].text, b"! autor: Jos\xe9");
        assert_eq!(t.lines()[0].ending, LineEnding::CrLf);
    }

    #[test]
    fn load_accepts_non_utf8_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("inlist");
        fs::write(&path, b"! Jos\xe9\n").unwrap();
        let t = Template::load(&path).unwrap();
        assert_eq!(t.name(), "inlist");
        assert_eq!(t.lines()[0].text, b"! Jos\xe9");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Template::load("/definitely/not/here/inlist").unwrap_err();
        assert!(matches!(err, SweepError::TemplateNotFound(_)));
    }
}
