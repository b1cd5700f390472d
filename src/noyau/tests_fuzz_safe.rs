//! Tests fuzz safe : robustesse + déterminisme + invariants de la machine à états.
//!
//! But : marteler la calculatrice avec des suites d’actions aléatoires sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur de suite bornée
//! - budget temps global
//! - invariants vérifiés après CHAQUE action
//! - l’évaluateur est espionné : il ne doit jamais recevoir d’expression mal formée

use std::cell::RefCell;
use std::time::{Duration, Instant};

use super::calculatrice::{Action, Calculatrice, Phase, ARRONDI_DEFAUT, ERREUR};
use super::eval::{ErreurEvaluation, Evaluateur, EvaluateurArithmetique};
use super::expression::{Operateur, Parenthese};
use super::fonctions::{Constante, FonctionSci};
use super::format::formater_nombre;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Évaluateur espion ------------------------ */

#[derive(Default)]
struct Espion {
    refus: RefCell<Vec<(String, ErreurEvaluation)>>,
}

impl Evaluateur for &Espion {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurEvaluation> {
        let r = EvaluateurArithmetique.evaluer(expression);
        if let Err(e) = &r {
            self.refus.borrow_mut().push((expression.to_string(), e.clone()));
        }
        r
    }
}

/* ------------------------ Génération d’actions ------------------------ */

const OPERATEURS: [Operateur; 5] = [
    Operateur::Plus,
    Operateur::Moins,
    Operateur::Fois,
    Operateur::Divise,
    Operateur::Modulo,
];

fn gen_action(rng: &mut Rng) -> Action {
    // chiffres majoritaires, sinon l’expression ne grossit jamais
    match rng.pick(20) {
        0..=7 => Action::Chiffre(rng.pick(10) as u8),
        8 => Action::Virgule,
        9 | 10 => Action::Operateur(OPERATEURS[rng.pick(5) as usize]),
        11 => Action::Fonction(FonctionSci::TOUTES[rng.pick(7) as usize]),
        12 => Action::Constante(if rng.pick(2) == 0 {
            Constante::Pi
        } else {
            Constante::E
        }),
        13 => Action::Parenthese(Parenthese::Ouvrante),
        14 => Action::Parenthese(Parenthese::Fermante),
        15 => Action::Signe,
        16 => Action::Retour,
        17 => {
            // effacer rare : on veut des chaînes longues
            if rng.pick(4) == 0 {
                Action::Effacer
            } else {
                Action::Chiffre(1)
            }
        }
        _ => Action::Egal,
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_invariants<E: Evaluateur>(c: &Calculatrice<E>, derniere: Action) {
    let v = c.valeur_courante();

    assert!(v.matches('.').count() <= 1, "deux points: {v:?}");
    assert_eq!(c.en_erreur(), v == ERREUR, "sentinelle Error incohérente");

    // jamais de nom de fonction ni de glyphe côté évaluateur
    let eval = c.texte_evaluation();
    assert!(
        eval.chars()
            .all(|ch| ch.is_ascii_digit() || " .+-*/%()e".contains(ch)),
        "chaîne d’évaluation suspecte: {eval:?}"
    );

    match c.phase() {
        Phase::Evalue => {
            assert!(c.texte_expression().ends_with(" ="));
            assert_eq!(c.groupes_ouverts(), 0);
            let tete = c.historique().get(0).expect("historique vide après “=”");
            assert_eq!(formater_nombre(tete.resultat), v);
        }
        Phase::Erreur => {
            assert_eq!(c.groupes_ouverts(), 0);
        }
        Phase::Saisie => {
            assert!(
                v.parse::<f64>().is_ok(),
                "saisie illisible {v:?} après {derniere:?}"
            );
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_invariants_et_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let espion = Espion::default();
    let mut c = Calculatrice::avec_evaluateur(&espion, ARRONDI_DEFAUT, None);
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus_ok = 0usize;
    let mut vus_err = 0usize;

    for _ in 0..4000 {
        budget(t0, max);

        let a = gen_action(&mut rng);
        let avant = c.historique().len();
        c.appliquer(a);
        check_invariants(&c, a);

        if a == Action::Egal {
            if c.historique().len() > avant {
                vus_ok += 1;
            } else if c.en_erreur() {
                vus_err += 1;
            }
        }
        // sortir de l’erreur de temps en temps (Retour le fait aussi)
        if c.en_erreur() && rng.pick(3) == 0 {
            c.appliquer(Action::Effacer);
        }
    }

    // seules les erreurs de domaine sont acceptables : jamais de syntaxe refusée
    for (expr, e) in espion.refus.borrow().iter() {
        assert!(
            matches!(e, ErreurEvaluation::NonFini(_)),
            "expression mal formée envoyée à l’évaluateur: {expr:?} ({e})"
        );
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(vus_ok > 10, "trop peu de succès: {vus_ok}");
    assert!(vus_err + espion.refus.borrow().len() > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let rejouer = |seed: u64| {
        let mut c = Calculatrice::new();
        let mut rng = Rng::new(seed);
        let mut traces = Vec::new();
        for _ in 0..600 {
            c.appliquer(gen_action(&mut rng));
            traces.push((c.texte_expression(), c.valeur_courante().to_string()));
        }
        traces
    };

    let a = rejouer(0xBADC0DE_u64);
    budget(t0, max);
    let b = rejouer(0xBADC0DE_u64);
    budget(t0, max);
    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_retour_ne_casse_jamais_la_saisie() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0x5EED_u64);
    for _ in 0..200 {
        budget(t0, max);

        let mut c = Calculatrice::new();
        for _ in 0..rng.pick(12) {
            let a = gen_action(&mut rng);
            c.appliquer(a);
        }
        // vider la saisie caractère par caractère
        for _ in 0..60 {
            c.appliquer(Action::Retour);
            check_invariants(&c, Action::Retour);
        }
        assert_eq!(c.valeur_courante(), "0");
    }
}
