//! Producto cartesiano perezoso mediante un odómetro de índices.
//!
//! Equivale a `N` bucles anidados: la primera secuencia es el bucle externo
//! (varía más lento) y la última el interno (varía más rápido). El odómetro
//! incrementa el dígito de la derecha y acarrea hacia la izquierda, sin
//! recursión.

/// Espacio de combinaciones reiniciable: cada `iter()` empieza de cero.
#[derive(Debug, Clone)]
pub struct CombinationSpace<'a, T> {
    sources: &'a [Vec<T>],
}

impl<'a, T: Clone> CombinationSpace<'a, T> {
    pub fn new(sources: &'a [Vec<T>]) -> Self {
        Self { sources }
    }

    /// Número total de combinaciones (producto de longitudes; 0 si `N == 0`
    /// o alguna secuencia está vacía). `None` si el producto no cabe en
    /// `usize`.
    pub fn checked_total(&self) -> Option<usize> {
        if self.sources.is_empty() || self.sources.iter().any(Vec::is_empty) {
            return Some(0);
        }
        self.sources.iter().try_fold(1usize, |acc, s| acc.checked_mul(s.len()))
    }

    /// Como `checked_total`, saturando en `usize::MAX`.
    pub fn total(&self) -> usize {
        self.checked_total().unwrap_or(usize::MAX)
    }

    pub fn iter(&self) -> Combinations<'a, T> {
        let remaining = self.total();
        Combinations { sources: self.sources,
                       indices: vec![0; self.sources.len()],
                       remaining }
    }
}

impl<'a, T: Clone> IntoIterator for &CombinationSpace<'a, T> {
    type Item = Vec<T>;
    type IntoIter = Combinations<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterador sobre las combinaciones en orden de bucles anidados.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    sources: &'a [Vec<T>],
    indices: Vec<usize>,
    remaining: usize,
}

impl<T: Clone> Combinations<'_, T> {
    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.sources[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.indices
                          .iter()
                          .zip(self.sources)
                          .map(|(&i, src)| src[i].clone())
                          .collect();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Combinations<'_, T> {}

/// Atajo: todas las combinaciones de `sources` en un `Vec`.
pub fn combinations<T: Clone>(sources: &[Vec<T>]) -> Vec<Vec<T>> {
    CombinationSpace::new(sources).iter().collect()
}
