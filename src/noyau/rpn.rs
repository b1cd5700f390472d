// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis réduire la RPN sur une pile de flottants
//
// Règles:
// - Précédence : + - (1) < * / % (2) < moins unaire (3)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, c’est Tok::Neg (préfixe, associatif à droite)
//    - "2 * -3" => "2 3 neg *"
// - Parenthèses : doivent être équilibrées (la fermeture automatique est faite en amont,
//   par la calculatrice, pas ici).

use super::eval::ErreurEvaluation;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent => 2,
        Tok::Neg => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Neg)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, LPar, Num(3), Plus, Num(4), RPar]
///   rpn:    [Num(2), Num(3), Num(4), Plus, Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEvaluation> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    // "2 3" ou "(2)3" : pas de multiplication implicite côté évaluation
                    return Err(ErreurEvaluation::ExpressionInvalide);
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurEvaluation::ExpressionInvalide);
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    // "()" ou "(2 +)"
                    return Err(ErreurEvaluation::ExpressionInvalide);
                }
                // dépile jusqu’à '('
                let mut ouvrante_trouvee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_trouvee = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_trouvee {
                    return Err(ErreurEvaluation::ParentheseOrpheline);
                }
                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // préfixe : rien à dépiler (un unaire ne “ferme” rien à sa gauche)
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Neg => {
                if !prev_was_value {
                    // deux binaires de suite, ou binaire en tête
                    return Err(ErreurEvaluation::ExpressionInvalide);
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        // "2 +" ou chaîne vide
        return Err(if out.is_empty() && ops.is_empty() {
            ErreurEvaluation::Vide
        } else {
            ErreurEvaluation::ExpressionInvalide
        });
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEvaluation::ParenthesesNonFermees);
        }
        out.push(op);
    }

    Ok(out)
}

/// Réduit une RPN en valeur.
///
/// Ne juge pas la finitude : “1 / 0” donne +∞ ici, c’est l’appelant qui tranche.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurEvaluation> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurEvaluation::ExpressionInvalide)?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent => {
                let b = st.pop().ok_or(ErreurEvaluation::ExpressionInvalide)?;
                let a = st.pop().ok_or(ErreurEvaluation::ExpressionInvalide)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => a / b,
                    _ => a % b,
                };

                st.push(v);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurEvaluation::ExpressionInvalide),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurEvaluation::ExpressionInvalide),
    }
}
