//! Fonctions scientifiques unaires + constantes.
//!
//! Calcul immédiat (jamais différé dans la chaîne d’évaluation) :
//! le résultat numérique seul continue dans l’expression.

use std::f64::consts::{E, PI};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionSci {
    Sin,
    Cos,
    Tan,
    Racine,
    Carre,
    Log10,
    Ln,
}

impl FonctionSci {
    pub const TOUTES: [FonctionSci; 7] = [
        FonctionSci::Sin,
        FonctionSci::Cos,
        FonctionSci::Tan,
        FonctionSci::Racine,
        FonctionSci::Carre,
        FonctionSci::Log10,
        FonctionSci::Ln,
    ];

    /// Libellé affiché dans l’expression : `sin(30)`, `√(2)`, `sqr(4)`…
    pub fn libelle(self) -> &'static str {
        match self {
            FonctionSci::Sin => "sin",
            FonctionSci::Cos => "cos",
            FonctionSci::Tan => "tan",
            FonctionSci::Racine => "√",
            FonctionSci::Carre => "sqr",
            FonctionSci::Log10 => "log",
            FonctionSci::Ln => "ln",
        }
    }

    /// Libellé du bouton.
    pub fn touche(self) -> &'static str {
        match self {
            FonctionSci::Carre => "x²",
            autre => autre.libelle(),
        }
    }

    /// Valeur brute (non arrondie). Trig en DEGRÉS.
    /// Peut être non fini (√-1, log 0) : à l’appelant de décider.
    pub fn appliquer(self, x: f64) -> f64 {
        let rad = x * (PI / 180.0);
        match self {
            FonctionSci::Sin => rad.sin(),
            FonctionSci::Cos => rad.cos(),
            FonctionSci::Tan => rad.tan(),
            FonctionSci::Racine => x.sqrt(),
            FonctionSci::Carre => x * x,
            FonctionSci::Log10 => x.log10(),
            FonctionSci::Ln => x.ln(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => PI,
            Constante::E => E,
        }
    }

    pub fn touche(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
        }
    }
}
