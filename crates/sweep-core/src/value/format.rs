//! Notación científica con marcador de exponente por código.

/// Dígitos tras el punto decimal en la mantisa.
pub const MANTISSA_DIGITS: usize = 14;

/// Formatea `x` como `d.dddddddddddddd<marker>±XX`.
///
/// El exponente lleva signo explícito y al menos dos dígitos
/// (`1.0` -> `1.00000000000000e+00`, `1.5e123` -> `1.50000000000000e+123`).
pub fn format_scientific(x: f64, marker: char) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let raw = format!("{:.*e}", MANTISSA_DIGITS, x);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(e) => format!("{mantissa}{marker}{e:+03}"),
            Err(_) => raw.replace('e', &marker.to_string()),
        },
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_in_both_markers() {
        assert_eq!(format_scientific(1.0, 'd'), "1.00000000000000d+00");
        assert_eq!(format_scientific(1.0, 'e'), "1.00000000000000e+00");
    }

    #[test]
    fn zero_and_negative_exponents() {
        assert_eq!(format_scientific(0.0, 'd'), "0.00000000000000d+00");
        assert_eq!(format_scientific(-2.5e-7, 'e'), "-2.50000000000000e-07");
        assert_eq!(format_scientific(1.23, 'd'), "1.23000000000000d+00");
    }

    #[test]
    fn three_digit_exponent() {
        assert_eq!(format_scientific(1.5e123, 'e'), "1.50000000000000e+123");
    }

    #[test]
    fn non_finite_passthrough() {
        assert_eq!(format_scientific(f64::NAN, 'd'), "NaN");
        assert_eq!(format_scientific(f64::INFINITY, 'd'), "inf");
    }
}
