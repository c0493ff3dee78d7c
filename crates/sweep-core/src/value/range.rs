//! Generadores de rangos numéricos para reglas (`linspace`, rango entero).

use super::ParamValue;

/// `num` valores equiespaciados en `[start, stop]`; el extremo final es exacto.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<ParamValue> {
    match num {
        0 => Vec::new(),
        1 => vec![ParamValue::Float(start)],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<ParamValue> = (0..n).map(|i| ParamValue::Float(start + i as f64 * step)).collect();
            out[n - 1] = ParamValue::Float(stop);
            out
        }
    }
}

/// Enteros de `start` a `stop` (excluido) con paso `step`.
///
/// Devuelve `None` si `step == 0`. Se detiene sin desbordar en los extremos
/// de `i64`.
pub fn int_range(start: i64, stop: i64, step: i64) -> Option<Vec<ParamValue>> {
    if step == 0 {
        return None;
    }
    let mut out = Vec::new();
    let mut cur = start;
    while (step > 0 && cur < stop) || (step < 0 && cur > stop) {
        out.push(ParamValue::Int(cur));
        match cur.checked_add(step) {
            Some(next) => cur = next,
            None => break,
        }
    }
    Some(out)
}
