// src/noyau/format.rs
//
// Nombre -> texte pour l’affichage et pour la chaîne d’évaluation.
// Forme la plus courte qui relit le même double ; exposant hors de [1e-6, 1e21)
// (mêmes bornes que l’ancienne calculatrice web, pour que “1e+21” reste lisible).

/// Formate un résultat fini.
pub fn formater_nombre(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // couvre aussi -0
    if x == 0.0 {
        return "0".to_string();
    }

    let a = x.abs();
    if !(1e-6..1e21).contains(&a) {
        return formater_exposant(x);
    }

    format!("{x}")
}

/// "1e21" -> "1e+21" ; "1.5e-7" inchangé.
fn formater_exposant(x: f64) -> String {
    let s = format!("{x:e}");
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}

/// Taille de police (px) du grand affichage selon le nombre de caractères.
pub fn taille_police(longueur: usize) -> f32 {
    if longueur > 14 {
        18.0
    } else if longueur > 10 {
        26.0
    } else if longueur > 7 {
        32.0
    } else {
        38.0
    }
}
