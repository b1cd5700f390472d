// src/noyau/arrondi.rs
//
// Arrondi décimal exact d’un f64 (bruit flottant : sin(180°) ≈ 1.22e-16 -> 0).
// On passe par le rationnel EXACT du double, pas par x * 10^n (qui déborde / introduit
// son propre bruit). Même règle que toFixed : demi -> on s’éloigne de zéro.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Au-delà, un double n’a plus de partie fractionnaire représentable : rien à arrondir.
const SEUIL_ENTIER: f64 = 1e21;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// x -> entier “scalé” = round(x * 10^digits), calculé exactement.
fn arrondi_scaled(x: f64, digits: usize) -> Option<BigInt> {
    let r = BigRational::from_float(x)?;
    let scaled = r * BigRational::from_integer(pow10(digits));
    Some(scaled.round().to_integer())
}

/// Arrondit `x` à `digits` décimales, puis relit le décimal obtenu
/// (équivaut à `parseFloat(x.toFixed(digits))`).
///
/// Les non-finis sont rendus tels quels (l’appelant les traite comme erreur).
pub fn arrondir(x: f64, digits: usize) -> f64 {
    if !x.is_finite() || x.abs() >= SEUIL_ENTIER {
        return x;
    }

    let Some(scaled) = arrondi_scaled(x, digits) else {
        return x;
    };
    if scaled.is_zero() {
        return 0.0;
    }

    scaled_to_decimal(scaled, digits)
        .parse::<f64>()
        .unwrap_or(x)
}
