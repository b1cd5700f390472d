//! Réglages de la calculatrice.
//!
//! Chargement (le plus tardif l’emporte) :
//! 1. Valeurs par défaut
//! 2. Fichier TOML désigné par `CALCULATRICE_REGLAGES` (s’il est défini)
//!
//! Exemple :
//! ```toml
//! arrondi = 8
//! historique_max = 50
//! journal = "debug"
//!
//! [fenetre]
//! largeur = 480.0
//! hauteur = 720.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::noyau::calculatrice::ARRONDI_DEFAUT;

/// Variable d’environnement : chemin du fichier de réglages.
pub const VAR_REGLAGES: &str = "CALCULATRICE_REGLAGES";

/// Garde-fou : un f64 n’a pas plus de ~17 chiffres significatifs.
const ARRONDI_MAX: usize = 20;

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture impossible de {chemin}: {1}", chemin = .0.display())]
    Lecture(PathBuf, #[source] std::io::Error),

    #[error("réglages invalides dans {chemin}: {1}", chemin = .0.display())]
    Analyse(PathBuf, String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Reglages {
    /// Décimales gardées après un calcul.
    pub arrondi: usize,
    /// Nombre max d’entrées d’historique (absent = illimité).
    pub historique_max: Option<usize>,
    /// Filtre de journal par défaut (écrasé par RUST_LOG).
    pub journal: String,
    pub fenetre: Fenetre,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fenetre {
    pub largeur: f32,
    pub hauteur: f32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            arrondi: ARRONDI_DEFAUT,
            historique_max: None,
            journal: "info".to_string(),
            fenetre: Fenetre::default(),
        }
    }
}

impl Default for Fenetre {
    fn default() -> Self {
        Self {
            largeur: 420.0,
            hauteur: 680.0,
        }
    }
}

impl Reglages {
    /// Défauts, puis fichier si `CALCULATRICE_REGLAGES` est défini.
    /// Un fichier explicitement désigné mais illisible est une erreur.
    pub fn charger() -> Result<Self, ErreurReglages> {
        match std::env::var(VAR_REGLAGES) {
            Ok(chemin) => Self::depuis_fichier(chemin),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn depuis_fichier(chemin: impl AsRef<Path>) -> Result<Self, ErreurReglages> {
        let chemin = chemin.as_ref();
        let contenu = std::fs::read_to_string(chemin)
            .map_err(|e| ErreurReglages::Lecture(chemin.to_path_buf(), e))?;
        Self::depuis_texte(&contenu)
            .map_err(|msg| ErreurReglages::Analyse(chemin.to_path_buf(), msg))
    }

    pub fn depuis_texte(contenu: &str) -> Result<Self, String> {
        let r: Reglages = toml::from_str(contenu).map_err(|e| e.to_string())?;
        Ok(r.borne())
    }

    fn borne(mut self) -> Self {
        self.arrondi = self.arrondi.min(ARRONDI_MAX);
        if self.historique_max == Some(0) {
            // 0 = pas d’historique utile ; on le traite comme 1 (le dernier calcul)
            self.historique_max = Some(1);
        }
        self
    }
}
