//! Clasificación de líneas de la plantilla.
//!
//! Dos reconocedores independientes:
//! - comentario de línea completa: `^\s*<marcador>`.
//! - asignación de un parámetro seguido: `^\s*<nombre>\s*=\s*`.
//!
//! Cuando una línea podría casar con varios nombres, gana el nombre más
//! largo; a igual longitud, el menor en orden lexicográfico. El resultado no
//! depende del orden de las reglas.
//!
//! Las líneas se tratan como bytes; los marcadores y las comillas son ASCII.

use regex::bytes::Regex;

use crate::errors::SweepError;
use crate::profile::CodeProfile;

/// Resultado de clasificar una línea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'m> {
    Comment,
    Assignment(AssignmentMatch<'m>),
    Other,
}

/// Asignación reconocida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMatch<'m> {
    /// Parámetro que casó.
    pub name: &'m str,
    /// Fin del prefijo `<indent><nombre><ws>=<ws>` (en bytes).
    pub value_start: usize,
    /// Inicio del comentario final, si existe.
    pub comment_start: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct LineMatcher {
    marker: u8,
    comment: Regex,
    assignments: Vec<(String, Regex)>,
}

impl LineMatcher {
    pub fn new<'a>(profile: CodeProfile, names: impl IntoIterator<Item = &'a str>) -> Result<Self, SweepError> {
        let marker = profile.comment_marker();
        let comment = Regex::new(&format!(r"^\s*{}", regex::escape(&marker.to_string())))?;
        // los marcadores de todos los perfiles son ASCII
        let marker = marker as u8;

        let mut sorted: Vec<&str> = names.into_iter().collect();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        sorted.dedup();

        let assignments = sorted.into_iter()
                                .map(|n| -> Result<(String, Regex), SweepError> {
                                    let re = Regex::new(&format!(r"^\s*{}\s*=\s*", regex::escape(n)))?;
                                    Ok((n.to_string(), re))
                                })
                                .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { marker,
                  comment,
                  assignments })
    }

    pub fn is_comment(&self, line: &[u8]) -> bool {
        self.comment.is_match(line)
    }

    /// Busca la primera asignación de un parámetro seguido, en el orden de
    /// prioridad del matcher.
    pub fn assignment<'m>(&'m self, line: &[u8]) -> Option<AssignmentMatch<'m>> {
        self.assignments.iter().find_map(|(name, re)| {
                                   re.find(line).map(|m| AssignmentMatch { name: name.as_str(),
                                                                           value_start: m.end(),
                                                                           comment_start: self.trailing_comment(line, m.end()) })
                               })
    }

    pub fn classify<'m>(&'m self, line: &[u8]) -> LineKind<'m> {
        if self.is_comment(line) {
            return LineKind::Comment;
        }
        match self.assignment(line) {
            Some(m) => LineKind::Assignment(m),
            None => LineKind::Other,
        }
    }

    /// Primer marcador de comentario a partir de `from` que no esté dentro de
    /// una cadena entre comillas simples o dobles.
    ///
    /// Si una comilla queda sin cerrar, vale el primer marcador a partir de
    /// `from`, esté o no dentro de la cadena.
    pub fn trailing_comment(&self, line: &[u8], from: usize) -> Option<usize> {
        let tail = line.get(from..)?;
        let mut quote: Option<u8> = None;
        for (i, &c) in tail.iter().enumerate() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == b'"' || c == b'\'' => quote = Some(c),
                None if c == self.marker => return Some(from + i),
                None => {}
            }
        }
        if quote.is_none() {
            return None;
        }
        tail.iter().position(|&c| c == self.marker).map(|i| from + i)
    }

    /// Nombres seguidos en orden de prioridad.
    pub fn priority(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|(n, _)| n.as_str())
    }
}
