// src/noyau/jetons.rs
//
// Tokenisation de la chaîne “évaluation” (jamais de noms de fonctions ici).

use super::eval::ErreurEvaluation;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    Plus,
    Minus,
    Star,
    Slash,
    Percent, // reste flottant

    // Moins unaire : jamais produit par tokenize(), injecté par to_rpn().
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 0.5, 5., .5)
/// - exposant (ex: 1e+21, 1.5e-7) — c’est la forme affichée des très grands/petits résultats
/// - opérateurs + - * / %
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEvaluation> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }

            // exposant : e[+-]?chiffres (on ne consomme le 'e' que s’il est suivi d’un exposant valide)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let lit: String = chars[start..i].iter().collect();
            let v = lire_nombre(&lit)?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEvaluation::CaractereInattendu(c));
    }

    Ok(out)
}

/// Un littéral doit contenir au moins un chiffre et au plus un point.
fn lire_nombre(lit: &str) -> Result<f64, ErreurEvaluation> {
    let mantisse = lit.split(['e', 'E']).next().unwrap_or("");
    let points = mantisse.chars().filter(|&c| c == '.').count();
    if points > 1 || !mantisse.chars().any(|c| c.is_ascii_digit()) {
        return Err(ErreurEvaluation::NombreInvalide(lit.to_string()));
    }
    lit.parse::<f64>()
        .map_err(|_| ErreurEvaluation::NombreInvalide(lit.to_string()))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
