//! src/noyau/calculatrice.rs
//!
//! Machine à états de la calculatrice (une session = une instance).
//!
//! Rôle : transformer une suite d’actions discrètes (touches / boutons) en une expression
//! bien formée, la faire évaluer par l’`Evaluateur`, formater le résultat et l’historiser.
//!
//! Contrats :
//! - `groupes_ouverts` ne descend jamais sous 0 (fermer sans ouvrir = rien).
//! - La saisie contient au plus un point décimal.
//! - Après “=”, l’expression affichée porte un “=” final et n’est plus jamais réévaluée.
//! - L’état Erreur est terminal : seuls Effacer, Retour (= Effacer) et le rappel d’historique en sortent.
//! - Aucune erreur ne remonte à l’appelant : tout est absorbé dans `Phase::Erreur`.

use tracing::debug;

use super::arrondi::arrondir;
use super::eval::{Evaluateur, EvaluateurArithmetique};
use super::expression::{
    finit_par_fermante, finit_par_operateur, rendre, Jeton, Operateur, Parenthese, Rendu,
};
use super::fonctions::{Constante, FonctionSci};
use super::format::formater_nombre;
use super::historique::{EntreeHistorique, Historique};

/// Jeton affiché à la place du nombre en cas d’erreur.
pub const ERREUR: &str = "Error";

/// Décimales conservées après un calcul (bruit flottant au-delà).
pub const ARRONDI_DEFAUT: usize = 10;

const SAISIE_INITIALE: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Saisie en cours (vide, nombre en cours, ou opérande attendu).
    Saisie,
    /// Juste après un “=” réussi.
    Evalue,
    /// Résultat non fini ou expression refusée.
    Erreur,
}

/// Toutes les entrées possibles ; clavier et pointeur produisent les mêmes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Chiffre(u8),
    Virgule,
    Operateur(Operateur),
    Fonction(FonctionSci),
    Constante(Constante),
    Parenthese(Parenthese),
    Signe,
    Retour,
    Effacer,
    Egal,
}

#[derive(Clone, Debug)]
pub struct Calculatrice<E = EvaluateurArithmetique> {
    jetons: Vec<Jeton>,
    saisie: String,
    // faux tant que la saisie est le "0" laissé par un reset / un opérateur / une fermante
    saisie_touchee: bool,
    // notation d’affichage de la saisie quand elle sort d’une fonction (sin(30))
    notation: Option<String>,
    groupes_ouverts: usize,
    phase: Phase,
    // expression affichée figée (Evalue : "5 + 3 =", Erreur : expression tentée)
    expression_figee: String,
    historique: Historique,
    arrondi: usize,
    evaluateur: E,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculatrice {
    pub fn new() -> Self {
        Self::configuree(ARRONDI_DEFAUT, None)
    }

    pub fn configuree(arrondi: usize, historique_max: Option<usize>) -> Self {
        Self::avec_evaluateur(EvaluateurArithmetique, arrondi, historique_max)
    }
}

impl<E: Evaluateur> Calculatrice<E> {
    pub fn avec_evaluateur(evaluateur: E, arrondi: usize, historique_max: Option<usize>) -> Self {
        Self {
            jetons: Vec::new(),
            saisie: SAISIE_INITIALE.to_string(),
            saisie_touchee: false,
            notation: None,
            groupes_ouverts: 0,
            phase: Phase::Saisie,
            expression_figee: String::new(),
            historique: Historique::new(historique_max),
            arrondi,
            evaluateur,
        }
    }

    /* ------------------------ Lecture (surface de rendu) ------------------------ */

    /// Ligne du haut : expression lisible (glyphes, notation de fonction).
    pub fn texte_expression(&self) -> String {
        match self.phase {
            Phase::Saisie => {
                let mut s = rendre(&self.jetons, Rendu::Affichage);
                if let Some(n) = &self.notation {
                    s.push_str(n);
                }
                s
            }
            Phase::Evalue | Phase::Erreur => self.expression_figee.clone(),
        }
    }

    /// Même expression, côté évaluateur (sans la saisie en cours).
    pub fn texte_evaluation(&self) -> String {
        rendre(&self.jetons, Rendu::Evaluation)
    }

    /// Grand nombre affiché (ou `Error`).
    pub fn valeur_courante(&self) -> &str {
        match self.phase {
            Phase::Erreur => ERREUR,
            _ => &self.saisie,
        }
    }

    pub fn groupes_ouverts(&self) -> usize {
        self.groupes_ouverts
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Vrai juste après un “=” (réussi ou non), avant toute autre action.
    pub fn vient_d_evaluer(&self) -> bool {
        matches!(self.phase, Phase::Evalue | Phase::Erreur)
    }

    pub fn en_erreur(&self) -> bool {
        self.phase == Phase::Erreur
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    /* ------------------------ Actions ------------------------ */

    pub fn appliquer(&mut self, action: Action) {
        match action {
            Action::Chiffre(d) => self.saisir_chiffre(d),
            Action::Virgule => self.saisir_virgule(),
            Action::Operateur(op) => self.saisir_operateur(op),
            Action::Fonction(f) => self.appliquer_fonction(f),
            Action::Constante(c) => self.inserer_constante(c),
            Action::Parenthese(p) => self.inserer_parenthese(p),
            Action::Signe => self.inverser_signe(),
            Action::Retour => self.retour_arriere(),
            Action::Effacer => self.effacer(),
            Action::Egal => self.evaluer(),
        }
    }

    pub fn saisir_chiffre(&mut self, d: u8) {
        if self.en_erreur() || d > 9 {
            return;
        }
        let c = char::from(b'0' + d);

        if self.vient_d_evaluer() {
            // nouveau calcul : le résultat précédent est abandonné
            self.repartir();
            self.saisie = c.to_string();
        } else if self.saisie == SAISIE_INITIALE {
            self.saisie = c.to_string();
        } else {
            self.saisie.push(c);
        }
        self.notation = None;
        self.saisie_touchee = true;
    }

    pub fn saisir_virgule(&mut self) {
        if self.en_erreur() {
            return;
        }

        if self.vient_d_evaluer() {
            self.repartir();
            self.saisie = "0.".to_string();
        } else if !self.saisie.contains(['.', 'e']) {
            self.saisie.push('.');
        } else {
            return;
        }
        self.notation = None;
        self.saisie_touchee = true;
    }

    pub fn saisir_operateur(&mut self, op: Operateur) {
        if self.en_erreur() {
            return;
        }

        if self.vient_d_evaluer() {
            // “=” puis “+” : on enchaîne depuis le résultat affiché
            let resultat = self.vider_saisie();
            self.repartir();
            self.jetons.push(Jeton::Operande(resultat));
            self.jetons.push(Jeton::Operateur(op));
        } else if finit_par_operateur(&self.jetons) && self.saisie_vierge() {
            // deux opérateurs de suite : le second remplace le premier
            if let Some(dernier) = self.jetons.last_mut() {
                *dernier = Jeton::Operateur(op);
            }
        } else {
            self.valider_saisie();
            self.jetons.push(Jeton::Operateur(op));
        }
    }

    pub fn appliquer_fonction(&mut self, f: FonctionSci) {
        if self.en_erreur() {
            return;
        }
        // opérande illisible : ignoré
        let Ok(x) = self.saisie.parse::<f64>() else {
            return;
        };

        if self.vient_d_evaluer() {
            self.repartir();
        }

        let argument = self
            .notation
            .take()
            .unwrap_or_else(|| self.saisie.clone());
        let notation = format!("{}({argument})", f.libelle());

        let brut = f.appliquer(x);
        if !brut.is_finite() {
            let tentee = format!("{}{notation}", rendre(&self.jetons, Rendu::Affichage));
            debug!(fonction = ?f, x, "résultat non fini");
            self.passer_en_erreur(tentee);
            return;
        }

        self.saisie = formater_nombre(arrondir(brut, self.arrondi));
        self.notation = Some(notation);
        self.saisie_touchee = true;
    }

    pub fn inserer_constante(&mut self, c: Constante) {
        if self.en_erreur() {
            return;
        }
        if self.vient_d_evaluer() {
            self.repartir();
        }
        self.saisie = formater_nombre(c.valeur());
        self.notation = None;
        self.saisie_touchee = true;
    }

    pub fn inserer_parenthese(&mut self, p: Parenthese) {
        if self.en_erreur() {
            return;
        }

        match p {
            Parenthese::Ouvrante => {
                if self.vient_d_evaluer() {
                    self.repartir();
                }
                // multiplication implicite : "5(" = "5 × (" ; ")(" = ") × ("
                if !self.saisie_vierge() || finit_par_fermante(&self.jetons) {
                    self.valider_saisie();
                    self.jetons.push(Jeton::Operateur(Operateur::Fois));
                }
                self.jetons.push(Jeton::Ouvrante);
                self.groupes_ouverts += 1;
            }
            Parenthese::Fermante => {
                if self.groupes_ouverts == 0 {
                    return;
                }
                self.valider_saisie();
                self.jetons.push(Jeton::Fermante);
                self.groupes_ouverts -= 1;
            }
        }
    }

    pub fn retour_arriere(&mut self) {
        if self.en_erreur() {
            self.effacer();
            return;
        }

        if self.vient_d_evaluer() {
            // on garde le résultat, éditable chiffre par chiffre
            self.repartir();
        }

        self.notation = None;
        self.saisie.pop();
        // pas de reste illisible : "-", "1e+", "1e"
        let garde = self.saisie.trim_end_matches(['e', '+', '-']).len();
        self.saisie.truncate(garde);
        self.saisie_touchee = !self.saisie.is_empty();
        if self.saisie.is_empty() {
            self.saisie = SAISIE_INITIALE.to_string();
        }
    }

    pub fn inverser_signe(&mut self) {
        if self.en_erreur() || self.saisie == SAISIE_INITIALE {
            return;
        }
        if self.vient_d_evaluer() {
            self.repartir();
        }

        self.saisie = match self.saisie.strip_prefix('-') {
            Some(positif) => positif.to_string(),
            None => format!("-{}", self.saisie),
        };
        self.notation = None;
        self.saisie_touchee = true;
    }

    /// Remise à zéro complète (l’historique est conservé).
    pub fn effacer(&mut self) {
        self.repartir();
        self.vider_saisie();
        self.notation = None;
    }

    pub fn evaluer(&mut self) {
        if self.vient_d_evaluer() {
            return;
        }
        if self.jetons.is_empty() && self.saisie == SAISIE_INITIALE && self.notation.is_none() {
            return;
        }

        let mut complet = std::mem::take(&mut self.jetons);
        let touchee = self.saisie_touchee;
        let saisie = self.vider_saisie();
        pousser_saisie(&mut complet, saisie, self.notation.take(), touchee);

        // indulgence : les groupes encore ouverts sont fermés automatiquement
        for _ in 0..self.groupes_ouverts {
            complet.push(Jeton::Fermante);
        }
        self.groupes_ouverts = 0;

        let affichage = rendre(&complet, Rendu::Affichage);
        let chaine = rendre(&complet, Rendu::Evaluation);

        match self.evaluateur.evaluer(&chaine) {
            Ok(v) if v.is_finite() => {
                let resultat = arrondir(v, self.arrondi);
                debug!(expression = %chaine, resultat, "évaluation");

                let expression = format!("{affichage} =");
                self.historique.ajouter(EntreeHistorique {
                    expression: expression.clone(),
                    resultat,
                });

                self.expression_figee = expression;
                self.saisie = formater_nombre(resultat);
                self.saisie_touchee = true;
                self.phase = Phase::Evalue;
            }
            Ok(v) => {
                debug!(expression = %chaine, valeur = v, "résultat non fini");
                self.passer_en_erreur(affichage);
            }
            Err(e) => {
                debug!(expression = %chaine, erreur = %e, "évaluation refusée");
                self.passer_en_erreur(affichage);
            }
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Clic sur une entrée : son résultat devient la saisie d’un nouveau calcul.
    /// Retourne false si l’index n’existe pas.
    pub fn rappeler(&mut self, index: usize) -> bool {
        let Some(resultat) = self.historique.get(index).map(|e| e.resultat) else {
            return false;
        };
        self.repartir();
        self.saisie = formater_nombre(resultat);
        self.saisie_touchee = true;
        self.notation = None;
        debug!(index, resultat, "rappel historique");
        true
    }

    pub fn vider_historique(&mut self) {
        self.historique.vider();
    }

    /* ------------------------ Interne ------------------------ */

    /// "0" tel que laissé par un reset / un opérateur / une fermante (un "0" tapé ne l’est pas).
    fn saisie_vierge(&self) -> bool {
        !self.saisie_touchee && self.notation.is_none()
    }

    /// Remet la saisie au "0" vierge et rend l’ancienne.
    fn vider_saisie(&mut self) -> String {
        self.saisie_touchee = false;
        std::mem::replace(&mut self.saisie, SAISIE_INITIALE.to_string())
    }

    /// Nouvel enchaînement : expression vide, saisie conservée.
    fn repartir(&mut self) {
        self.jetons.clear();
        self.expression_figee.clear();
        self.groupes_ouverts = 0;
        self.phase = Phase::Saisie;
    }

    /// Déplace la saisie en cours dans la suite de jetons.
    fn valider_saisie(&mut self) {
        let touchee = self.saisie_touchee;
        let saisie = self.vider_saisie();
        pousser_saisie(&mut self.jetons, saisie, self.notation.take(), touchee);
    }

    fn passer_en_erreur(&mut self, expression_tentee: String) {
        self.jetons.clear();
        self.groupes_ouverts = 0;
        self.notation = None;
        self.saisie = ERREUR.to_string();
        self.saisie_touchee = false;
        self.expression_figee = expression_tentee;
        self.phase = Phase::Erreur;
    }
}

/// Après une fermante :
/// - le "0" vierge n’est pas un opérande ("(2)" puis "=" n’évalue pas "(2)0") ;
/// - un vrai opérande, "0" tapé compris, est multiplié implicitement ("(2)5" = "(2) × 5").
fn pousser_saisie(
    jetons: &mut Vec<Jeton>,
    saisie: String,
    notation: Option<String>,
    touchee: bool,
) {
    let apres_fermante = finit_par_fermante(jetons);
    let jeton = match notation {
        Some(notation) => Jeton::Fonction {
            notation,
            valeur: saisie,
        },
        None if !touchee && apres_fermante => return,
        None => Jeton::Operande(saisie),
    };
    if apres_fermante {
        jetons.push(Jeton::Operateur(Operateur::Fois));
    }
    jetons.push(jeton);
}
