//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder la session de calcul (machine à états du noyau) + les petits états
//! propres à l’écran.
//!
//! Contrats :
//! - Aucune logique de calcul ici : tout passe par `Calculatrice::appliquer`.
//! - Une seule session par fenêtre, créée au démarrage, jamais recréée (Effacer la remet à zéro).

use tracing::debug;

use crate::noyau::{Action, Calculatrice};
use crate::reglages::Reglages;

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub calc: Calculatrice,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: &Reglages) -> Self {
        Self {
            calc: Calculatrice::configuree(reglages.arrondi, reglages.historique_max),
        }
    }

    /* ------------------------ Actions (boutons + clavier) ------------------------ */

    pub fn agir(&mut self, action: Action) {
        debug!(?action, "action");
        self.calc.appliquer(action);
    }

    pub fn agir_tout(&mut self, actions: impl IntoIterator<Item = Action>) {
        for a in actions {
            self.agir(a);
        }
    }

    /// Clic sur une ligne d’historique.
    pub fn rappeler(&mut self, index: usize) {
        self.calc.rappeler(index);
    }

    pub fn vider_historique(&mut self) {
        self.calc.vider_historique();
    }
}
