// src/noyau/expression.rs
//
// Expression en cours = UNE suite de jetons, DEUX rendus :
// - Affichage  : glyphes typographiques (− × ÷) + notation de fonction (sin(30))
// - Évaluation : syntaxe de l’évaluateur (- * /) + valeur déjà calculée
// Les deux rendus sortent de la même suite : ils ne peuvent pas diverger.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
}

impl Operateur {
    pub fn glyphe(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "−",
            Operateur::Fois => "×",
            Operateur::Divise => "÷",
            Operateur::Modulo => "%",
        }
    }

    pub fn syntaxe(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "*",
            Operateur::Divise => "/",
            Operateur::Modulo => "%",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parenthese {
    Ouvrante,
    Fermante,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    /// Nombre tel que saisi ("12", "0.", "-3.5").
    Operande(String),
    /// Résultat d’une fonction : affiché `notation`, évalué `valeur`.
    Fonction { notation: String, valeur: String },
    Operateur(Operateur),
    Ouvrante,
    Fermante,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rendu {
    Affichage,
    Evaluation,
}

/// Rend une suite de jetons. Les opérateurs sont entourés d’espaces, pas les parenthèses :
/// `2 × (3 + 4)`.
pub fn rendre(jetons: &[Jeton], rendu: Rendu) -> String {
    let mut out = String::new();
    for j in jetons {
        match j {
            Jeton::Operande(v) => out.push_str(v),
            Jeton::Fonction { notation, valeur } => match rendu {
                Rendu::Affichage => out.push_str(notation),
                Rendu::Evaluation => out.push_str(valeur),
            },
            Jeton::Operateur(op) => {
                let s = match rendu {
                    Rendu::Affichage => op.glyphe(),
                    Rendu::Evaluation => op.syntaxe(),
                };
                out.push(' ');
                out.push_str(s);
                out.push(' ');
            }
            Jeton::Ouvrante => out.push('('),
            Jeton::Fermante => out.push(')'),
        }
    }
    out
}

/// L’expression se termine-t-elle par un opérateur (en attente d’opérande) ?
pub fn finit_par_operateur(jetons: &[Jeton]) -> bool {
    matches!(jetons.last(), Some(Jeton::Operateur(_)))
}

pub fn finit_par_fermante(jetons: &[Jeton]) -> bool {
    matches!(jetons.last(), Some(Jeton::Fermante))
}
