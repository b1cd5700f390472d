// src/noyau/clavier.rs
//
// Caractère tapé -> Action (indépendant de l’UI).
// Les touches “nommées” (Entrée, Retour arrière, Échap) sont traduites côté vue.

use super::calculatrice::Action;
use super::expression::{Operateur, Parenthese};

pub fn action_depuis_caractere(c: char) -> Option<Action> {
    if let Some(d) = c.to_digit(10) {
        return Some(Action::Chiffre(d as u8));
    }

    let a = match c {
        '.' | ',' => Action::Virgule,
        '+' => Action::Operateur(Operateur::Plus),
        '-' | '−' => Action::Operateur(Operateur::Moins),
        '*' | '×' => Action::Operateur(Operateur::Fois),
        '/' | '÷' => Action::Operateur(Operateur::Divise),
        '%' => Action::Operateur(Operateur::Modulo),
        '=' => Action::Egal,
        '(' => Action::Parenthese(Parenthese::Ouvrante),
        ')' => Action::Parenthese(Parenthese::Fermante),
        _ => return None,
    };
    Some(a)
}

/// Un événement texte peut porter plusieurs caractères (collage, IME).
pub fn actions_depuis_texte(texte: &str) -> Vec<Action> {
    texte.chars().filter_map(action_depuis_caractere).collect()
}
