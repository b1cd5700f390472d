// src/noyau/historique.rs
//
// Historique des calculs réussis : le plus récent en tête.

use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    /// Expression affichée, avec son “=” final : `5 + 3 =`.
    pub expression: String,
    pub resultat: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
    /// None = illimité.
    limite: Option<usize>,
}

impl Historique {
    pub fn new(limite: Option<usize>) -> Self {
        Self {
            entrees: VecDeque::new(),
            limite,
        }
    }

    pub fn ajouter(&mut self, entree: EntreeHistorique) {
        self.entrees.push_front(entree);
        if let Some(max) = self.limite {
            self.entrees.truncate(max);
        }
    }

    pub fn get(&self, index: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}
