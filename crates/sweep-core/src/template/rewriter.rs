//! Reescritura de la plantilla para una combinación.
//!
//! Por cada línea, en orden:
//! 1. comentario completo -> se copia tal cual.
//! 2. asignación de un parámetro seguido -> se conserva el prefijo hasta el
//!    `=` (y espacios), se escribe el valor, un espacio y el comentario final
//!    original (si lo había).
//! 3. cualquier otra línea -> se copia tal cual.
//!
//! El terminador original de cada línea se reescribe sin cambios, de modo que
//! el archivo resultante tiene las mismas líneas, en el mismo orden. Los bytes
//! fuera del valor sustituido se copian sin reinterpretar su codificación.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::loader::Template;
use super::matcher::{LineKind, LineMatcher};
use crate::combination::{Combination, TypeMap};
use crate::errors::SweepError;
use crate::profile::CodeProfile;

/// Valores de una combinación ya escritos como literales del código.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCombination {
    id: usize,
    values: IndexMap<String, String>,
}

impl RenderedCombination {
    pub fn render(combination: &Combination, types: &TypeMap, profile: CodeProfile) -> Result<Self, SweepError> {
        let mut values = IndexMap::with_capacity(combination.len());
        for (name, value) in combination.iter() {
            let ty = types.get(name).ok_or_else(|| SweepError::MissingType(name.to_string()))?;
            values.insert(name.to_string(), ty.render(name, value, profile)?);
        }
        Ok(Self { id: combination.id(),
                  values })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reescribe todas las líneas de `template` (sin I/O).
pub fn rewrite_lines(template: &Template, rendered: &RenderedCombination, matcher: &LineMatcher) -> Vec<u8> {
    let mut out = Vec::new();
    for (idx, line) in template.lines().iter().enumerate() {
        let text = line.text.as_slice();
        match matcher.classify(text) {
            LineKind::Assignment(m) => match rendered.get(m.name) {
                Some(value) => {
                    let comment = m.comment_start.map(|c| &text[c..]).unwrap_or_default();
                    log::debug!("comb {}: línea {} asigna '{}'", rendered.id(), idx + 1, m.name);
                    out.extend_from_slice(&text[..m.value_start]);
                    out.extend_from_slice(value.as_bytes());
                    out.push(b' ');
                    out.extend_from_slice(comment);
                }
                None => out.extend_from_slice(text),
            },
            LineKind::Comment | LineKind::Other => out.extend_from_slice(text),
        }
        out.extend_from_slice(line.ending.as_bytes());
    }
    out
}

/// Nombre del archivo intermedio de una combinación: `<plantilla>_c<id>`.
pub fn staged_file_name(template_name: &str, id: usize) -> String {
    format!("{template_name}_c{id}")
}

/// Escribe la plantilla reescrita en `work_dir/<plantilla>_c<id>`.
pub fn write_combination(work_dir: &Path,
                         template: &Template,
                         rendered: &RenderedCombination,
                         matcher: &LineMatcher)
                         -> Result<PathBuf, SweepError> {
    let path = work_dir.join(staged_file_name(template.name(), rendered.id()));
    let content = rewrite_lines(template, rendered, matcher);
    fs::write(&path, content).map_err(|source| SweepError::Write { path: path.clone(),
                                                                   source })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::{expand_rules, RuleSet};
    use crate::value::ParamType;

    fn render_first(rules: &RuleSet, types: &TypeMap, profile: CodeProfile) -> RenderedCombination {
        let combos = expand_rules(rules).unwrap();
        RenderedCombination::render(&combos[0], types, profile).unwrap()
    }

    fn rewrite(t: &Template, rendered: &RenderedCombination, m: &LineMatcher) -> String {
        String::from_utf8(rewrite_lines(t, rendered, m)).unwrap()
    }

    #[test]
    fn string_value_keeps_inline_comment() {
        let t = Template::from_text("flash.par", "initialWDFile = \"old.dat\" ! restart file\n");
        let rules = RuleSet::new().rule("initialWDFile", ["\"new.dat\""]);
        let types = TypeMap::new().with("initialWDFile", ParamType::String);
        let rendered = render_first(&rules, &types, CodeProfile::Mesa);
        let m = LineMatcher::new(CodeProfile::Mesa, rules.names()).unwrap();
        assert_eq!(rewrite(&t, &rendered, &m), "initialWDFile = \"new.dat\" ! restart file\n");
    }

    #[test]
    fn float_without_comment_gets_trailing_space() {
        let t = Template::from_text("inlist", "   Blocker_wind_eta=0.1d0\n");
        let rules = RuleSet::new().rule("Blocker_wind_eta", [0.5]);
        let types = TypeMap::new().with("Blocker_wind_eta", ParamType::Float);
        let rendered = render_first(&rules, &types, CodeProfile::Mesa);
        let m = LineMatcher::new(CodeProfile::Mesa, rules.names()).unwrap();
        assert_eq!(rewrite(&t, &rendered, &m), "   Blocker_wind_eta=5.00000000000000d-01 \n");
    }

    #[test]
    fn comments_and_other_lines_untouched() {
        let src = "&controls\n! Blocker_wind_eta = 9\n  ! note\n\n  Blocker_wind_eta = 1d0\n/ ! end";
        let t = Template::from_text("inlist", src);
        let rules = RuleSet::new().rule("Blocker_wind_eta", [2.0]);
        let types = TypeMap::new().with("Blocker_wind_eta", ParamType::Float);
        let rendered = render_first(&rules, &types, CodeProfile::Mesa);
        let m = LineMatcher::new(CodeProfile::Mesa, rules.names()).unwrap();
        let out = rewrite(&t, &rendered, &m);
        assert_eq!(out,
                   "&controls\n! Blocker_wind_eta = 9\n  ! note\n\n  Blocker_wind_eta = 2.00000000000000d+00 \n/ ! end");
    }

    #[test]
    fn crlf_endings_survive() {
        let t = Template::from_text("flash.par", "nend = 10\r\n# c\r\n");
        let rules = RuleSet::new().rule("nend", [20i64]);
        let types = TypeMap::new().with("nend", ParamType::Integer);
        let rendered = render_first(&rules, &types, CodeProfile::Flash);
        let m = LineMatcher::new(CodeProfile::Flash, rules.names()).unwrap();
        assert_eq!(rewrite(&t, &rendered, &m), "nend = 20 \r\n# c\r\n");
    }

    #[test]
    fn unclosed_quote_keeps_inline_comment() {
        let t = Template::from_text("inlist", "  x = 'abc ! keep me\n");
        let rules = RuleSet::new().rule("x", ["'new'"]);
        let types = TypeMap::new().with("x", ParamType::String);
        let rendered = render_first(&rules, &types, CodeProfile::Mesa);
        let m = LineMatcher::new(CodeProfile::Mesa, rules.names()).unwrap();
        assert_eq!(rewrite(&t, &rendered, &m), "  x = 'new' ! keep me\n");
    }

    #[test]
    fn latin1_lines_pass_through_byte_identical() {
        let src: &[u8] = b"! autor: Jos\xe9\n  nend = 10 ! pasos m\xe1x\n";
        let t = Template::from_bytes("flash.par", src);
        let rules = RuleSet::new().rule("nend", [20i64]);
        let types = TypeMap::new().with("nend", ParamType::Integer);
        let rendered = render_first(&rules, &types, CodeProfile::Mesa);
        let m = LineMatcher::new(CodeProfile::Mesa, rules.names()).unwrap();
        assert_eq!(rewrite_lines(&t, &rendered, &m), b"! autor: Jos\xe9\n  nend = 20 ! pasos m\xe1x\n".to_vec());
    }

    #[test]
    fn staged_name_format() {
        assert_eq!(staged_file_name("inlist_1.0", 12), "inlist_1.0_c12");
    }
}
