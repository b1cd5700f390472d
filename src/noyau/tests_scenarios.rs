//! Tests scénarios (campagne) : les propriétés observables de la calculatrice,
//! rejouées comme un utilisateur les taperait (actions une par une).
//!
//! Notes :
//! - On passe par `Action` (même chemin que le clavier et les boutons).
//! - Les attentes portent sur ce que l’écran montre : ligne d’expression + grand nombre.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::calculatrice::{Action, Calculatrice, Phase, ERREUR};
use super::clavier::actions_depuis_texte;
use super::eval::{Evaluateur, EvaluateurArithmetique};
use super::expression::{Operateur, Parenthese};
use super::fonctions::FonctionSci;
use super::format::formater_nombre;

fn jouer(c: &mut Calculatrice, actions: &[Action]) {
    for a in actions {
        c.appliquer(*a);
    }
}

/// Raccourci : même syntaxe que le clavier ("5+3=").
fn taper(c: &mut Calculatrice, touches: &str) {
    for a in actions_depuis_texte(touches) {
        c.appliquer(a);
    }
}

fn ecran(c: &Calculatrice) -> (String, String) {
    (c.texte_expression(), c.valeur_courante().to_string())
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Saisie ------------------------ */

#[test]
fn sc_zero_initial_remplace() {
    let mut c = Calculatrice::new();
    jouer(&mut c, &[Action::Chiffre(5)]);
    assert_eq!(c.valeur_courante(), "5");

    c.appliquer(Action::Effacer);
    jouer(&mut c, &[Action::Chiffre(0), Action::Chiffre(0), Action::Chiffre(7)]);
    assert_eq!(c.valeur_courante(), "7");
}

#[test]
fn sc_une_seule_virgule() {
    let mut c = Calculatrice::new();
    for k in 0..20 {
        c.appliquer(Action::Virgule);
        c.appliquer(Action::Chiffre((k % 10) as u8));
        assert!(c.valeur_courante().matches('.').count() <= 1);
    }
    assert!(c.valeur_courante().starts_with("0.0123"));
}

#[test]
fn sc_operateur_remplace() {
    let mut c = Calculatrice::new();
    jouer(
        &mut c,
        &[
            Action::Operateur(Operateur::Plus),
            Action::Operateur(Operateur::Moins),
        ],
    );
    let (expr, _) = ecran(&c);
    assert_eq!(expr, "0 − ");
    assert_eq!(c.texte_evaluation().matches(['+', '-']).count(), 1);
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn sc_enchainement_depuis_resultat() {
    let mut c = Calculatrice::new();
    taper(&mut c, "5+3=");
    assert_eq!(ecran(&c), ("5 + 3 =".to_string(), "8".to_string()));

    taper(&mut c, "+2=");
    assert_eq!(ecran(&c), ("8 + 2 =".to_string(), "10".to_string()));
}

#[test]
fn sc_sin_180_vaut_zero() {
    let mut c = Calculatrice::new();
    taper(&mut c, "180");
    c.appliquer(Action::Fonction(FonctionSci::Sin));
    assert_eq!(c.valeur_courante(), "0");
    assert_ne!(c.valeur_courante(), formater_nombre(std::f64::consts::PI.sin()));
}

#[test]
fn sc_cos_et_tan_en_degres() {
    let mut c = Calculatrice::new();
    taper(&mut c, "60");
    c.appliquer(Action::Fonction(FonctionSci::Cos));
    assert_eq!(c.valeur_courante(), "0.5");

    c.appliquer(Action::Effacer);
    taper(&mut c, "45");
    c.appliquer(Action::Fonction(FonctionSci::Tan));
    assert_eq!(c.valeur_courante(), "1");
}

#[test]
fn sc_parentheses_fermees_automatiquement() {
    let mut c = Calculatrice::new();
    taper(&mut c, "2*(3+4");
    assert_eq!(c.texte_expression(), "2 × (3 + ");
    assert_eq!(c.groupes_ouverts(), 1);
    taper(&mut c, "=");
    assert_eq!(c.valeur_courante(), "14");
    assert_eq!(c.groupes_ouverts(), 0);
}

#[test]
fn sc_parentheses_profondes_fermees() {
    let mut c = Calculatrice::new();
    taper(&mut c, "2*((((1+1");
    assert_eq!(c.groupes_ouverts(), 4);
    taper(&mut c, "=");
    assert_eq!(c.valeur_courante(), "4");
    assert_eq!(c.texte_expression(), "2 × ((((1 + 1)))) =");
}

#[test]
fn sc_multiplication_implicite() {
    let mut c = Calculatrice::new();
    jouer(
        &mut c,
        &[
            Action::Chiffre(5),
            Action::Parenthese(Parenthese::Ouvrante),
            Action::Chiffre(2),
            Action::Parenthese(Parenthese::Fermante),
            Action::Egal,
        ],
    );
    assert_eq!(c.valeur_courante(), "10");
}

#[test]
fn sc_division_par_zero_bloque_jusqu_a_effacer() {
    let mut c = Calculatrice::new();
    taper(&mut c, "1/0=");
    assert_eq!(c.phase(), Phase::Erreur);
    assert_eq!(c.valeur_courante(), ERREUR);

    taper(&mut c, "123+(.");
    assert_eq!(c.valeur_courante(), ERREUR);
    assert_eq!(c.texte_expression(), "1 ÷ 0");

    c.appliquer(Action::Effacer);
    taper(&mut c, "4");
    assert_eq!(c.valeur_courante(), "4");
}

#[test]
fn sc_modulo() {
    let mut c = Calculatrice::new();
    taper(&mut c, "17%5=");
    assert_eq!(c.valeur_courante(), "2");
    assert_eq!(c.texte_expression(), "17 % 5 =");
}

#[test]
fn sc_precedence_respectee() {
    let mut c = Calculatrice::new();
    taper(&mut c, "2+3*4=");
    assert_eq!(c.valeur_courante(), "14");
}

/* ------------------------ Historique ------------------------ */

#[test]
fn sc_zero_tape_est_un_operande() {
    let mut c = Calculatrice::new();
    taper(&mut c, "5+0*3=");
    assert_eq!(ecran(&c), ("5 + 0 × 3 =".to_string(), "5".to_string()));

    c.appliquer(Action::Effacer);
    taper(&mut c, "(2)0=");
    assert_eq!(ecran(&c), ("(2) × 0 =".to_string(), "0".to_string()));
    assert_eq!(c.historique().get(0).map(|e| e.expression.as_str()), Some("(2) × 0 ="));
}

#[test]
fn sc_historique_aller_retour() {
    let mut c = Calculatrice::new();
    for touches in ["1+2=", "7*6=", "10/4="] {
        taper(&mut c, touches);
        let tete = c.historique().get(0).cloned().unwrap();
        assert_eq!(formater_nombre(tete.resultat), c.valeur_courante());
        assert!(tete.expression.ends_with(" ="));
    }
    assert_eq!(c.historique().len(), 3);

    // la plus ancienne (index 2) : 1 + 2
    assert!(c.rappeler(2));
    assert_eq!(ecran(&c), (String::new(), "3".to_string()));

    taper(&mut c, "*3=");
    assert_eq!(c.valeur_courante(), "9");
    assert_eq!(c.historique().len(), 4);
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sc_stress_longue_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut c = Calculatrice::new();
    for _ in 0..500 {
        taper(&mut c, "1+");
        budget(t0, max);
    }
    taper(&mut c, "1=");
    assert_eq!(c.valeur_courante(), "501");
}

#[test]
fn sc_stress_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // shunting-yard itératif : pas de récursion, pas de débordement de pile
    let expr = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
    budget(t0, max);
    assert_eq!(EvaluateurArithmetique.evaluer(&expr), Ok(1.0));
}
