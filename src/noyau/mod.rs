//! Noyau de la calculatrice (sans UI)
//!
//! Organisation interne :
//! - expression.rs   : suite de jetons + double rendu (affichage / évaluation)
//! - fonctions.rs    : fonctions scientifiques (degrés) + constantes
//! - arrondi.rs      : arrondi décimal exact (bruit flottant)
//! - format.rs       : nombre -> texte, taille de police
//! - jetons.rs       : tokenisation de la chaîne d’évaluation
//! - rpn.rs          : shunting-yard + réduction f64
//! - eval.rs         : trait Evaluateur + évaluateur arithmétique sûr
//! - historique.rs   : calculs réussis, plus récent en tête
//! - calculatrice.rs : machine à états (session)
//! - clavier.rs      : caractère -> Action

pub mod arrondi;
pub mod calculatrice;
pub mod clavier;
pub mod eval;
pub mod expression;
pub mod fonctions;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use calculatrice::{Action, Calculatrice};
pub use expression::{Operateur, Parenthese};
pub use fonctions::{Constante, FonctionSci};
