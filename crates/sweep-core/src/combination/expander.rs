//! Expansión de un conjunto de reglas en combinaciones numeradas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::generator::CombinationSpace;
use crate::errors::SweepError;
use crate::value::{ParamType, ParamValue};

/// Reglas: nombre de parámetro -> valores candidatos, en orden de inserción.
///
/// El orden de los nombres fija el anidamiento: el primero varía más lento.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: IndexMap<String, Vec<ParamValue>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade (o reemplaza, conservando la posición) los candidatos de `name`.
    pub fn rule<I, V>(mut self, name: impl Into<String>, values: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<ParamValue>
    {
        self.insert(name, values);
        self
    }

    pub fn insert<I, V>(&mut self, name: impl Into<String>, values: I)
        where I: IntoIterator<Item = V>,
              V: Into<ParamValue>
    {
        self.rules.insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&[ParamValue]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParamValue])> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Número de combinaciones que produce el conjunto; `None` si no cabe en
    /// `usize`.
    pub fn checked_total(&self) -> Option<usize> {
        self.rules.values().try_fold(1usize, |acc, v| acc.checked_mul(v.len()))
    }

    /// Comprueba que haya parámetros, que ninguno esté vacío, que el producto
    /// sea representable y que `types` los cubra a todos.
    pub fn validate(&self, types: &TypeMap) -> Result<(), SweepError> {
        if self.rules.is_empty() {
            return Err(SweepError::EmptyRuleSet);
        }
        for (name, values) in &self.rules {
            if values.is_empty() {
                return Err(SweepError::EmptyCandidates(name.clone()));
            }
            if types.get(name).is_none() {
                return Err(SweepError::MissingType(name.clone()));
            }
        }
        if self.checked_total().is_none() {
            return Err(SweepError::TooManyCombinations);
        }
        Ok(())
    }
}

/// Tipos declarados por parámetro.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMap {
    types: IndexMap<String, ParamType>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.types.insert(name.into(), ty);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: ParamType) {
        self.types.insert(name.into(), ty);
    }

    pub fn get(&self, name: &str) -> Option<ParamType> {
        self.types.get(name).copied()
    }
}

/// Una asignación concreta de valor a cada parámetro, con id 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    id: usize,
    values: IndexMap<String, ParamValue>,
}

impl Combination {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Pares (nombre, valor) en el orden de las reglas.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Expande las reglas en todas sus combinaciones, con ids contiguos desde 1.
///
/// Falla si no hay parámetros o si alguno no tiene candidatos; en esos casos
/// el producto sería vacío y el barrido no produciría nada.
pub fn expand_rules(rules: &RuleSet) -> Result<Vec<Combination>, SweepError> {
    if rules.is_empty() {
        return Err(SweepError::EmptyRuleSet);
    }
    if let Some((name, _)) = rules.iter().find(|(_, v)| v.is_empty()) {
        return Err(SweepError::EmptyCandidates(name.to_string()));
    }
    if rules.checked_total().is_none() {
        return Err(SweepError::TooManyCombinations);
    }

    let names: Vec<&str> = rules.names().collect();
    let sources: Vec<Vec<ParamValue>> = rules.iter().map(|(_, v)| v.to_vec()).collect();
    let space = CombinationSpace::new(&sources);

    let combos = space.iter()
                      .enumerate()
                      .map(|(idx, picked)| {
                          let values = names.iter().map(|n| n.to_string()).zip(picked).collect();
                          Combination { id: idx + 1, values }
                      })
                      .collect();
    Ok(combos)
}
