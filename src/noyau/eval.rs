//! Noyau — évaluation arithmétique (collaborateur “Évaluateur”)
//!
//! tokenize -> RPN -> f64
//!
//! Contrat : la chaîne reçue ne contient que des littéraux numériques,
//! `+ - * / %` et des parenthèses équilibrées. Aucun nom de fonction,
//! aucune exécution de code : tout le reste est refusé.

use thiserror::Error;
use tracing::trace;

use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};

/// Échecs de l’évaluateur. Côté calculatrice, tous mènent au même état “Error”.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurEvaluation {
    #[error("expression vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseOrpheline,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("résultat non fini: {0}")]
    NonFini(f64),
}

/// Capacité d’évaluation consommée par la calculatrice.
pub trait Evaluateur {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurEvaluation>;
}

/// Évaluateur par défaut : shunting-yard sur flottants double précision.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluateurArithmetique;

impl Evaluateur for EvaluateurArithmetique {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurEvaluation> {
        let s = expression.trim();
        if s.is_empty() {
            return Err(ErreurEvaluation::Vide);
        }

        let jetons = tokenize(s)?;
        let rpn = to_rpn(&jetons)?;
        trace!(jetons = %format_tokens(&jetons), rpn = %format_tokens(&rpn), "rpn");

        let v = eval_rpn(&rpn)?;
        if !v.is_finite() {
            return Err(ErreurEvaluation::NonFini(v));
        }
        Ok(v)
    }
}
