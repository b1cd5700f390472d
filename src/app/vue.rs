// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : ligne d’expression (petite) + valeur courante (grande, police adaptative)
// - Pavé : chiffres, opérateurs, parenthèses, ±, ⌫, C, =
// - Rangée scientifique : sin cos tan √ x² log ln + π e
// - Historique cliquable (rappel du résultat)
// - Clavier : caractères -> Action, Entrée/Retour arrière/Échap traduits ici
//
// Note :
// - Un bouton cliqué rend le focus, sinon Entrée le “re-clique” en plus de évaluer.

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::clavier::actions_depuis_texte;
use crate::noyau::format::{formater_nombre, taille_police};
use crate::noyau::{Action, Constante, FonctionSci, Operateur, Parenthese};

const TOUCHE: [f32; 2] = [64.0, 44.0];
const TOUCHE_SCI: [f32; 2] = [44.0, 32.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_ecran(ui);

                ui.add_space(8.0);

                self.ui_scientifique(ui);

                ui.add_space(6.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    /* ------------------------ Clavier ------------------------ */

    /// Traduit les événements clavier de la frame en actions.
    pub fn clavier(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());

        for ev in events {
            match ev {
                egui::Event::Text(t) | egui::Event::Paste(t) => {
                    self.agir_tout(actions_depuis_texte(&t));
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => {
                    if let Some(a) = action_touche_nommee(key) {
                        self.agir(a);
                    }
                }
                _ => {}
            }
        }
    }

    /* ------------------------ Écran ------------------------ */

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        let expression = self.calc.texte_expression();
        let valeur = self.calc.valeur_courante().to_string();

        let couleur_valeur = if self.calc.en_erreur() {
            ui.visuals().error_fg_color
        } else {
            ui.visuals().strong_text_color()
        };

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // ligne vide => hauteur stable
                    let texte = if expression.is_empty() { " " } else { &expression };
                    ui.label(egui::RichText::new(texte).monospace().weak())
                        .on_hover_text(self.calc.texte_evaluation());

                    let ouverts = self.calc.groupes_ouverts();
                    if ouverts > 0 {
                        ui.label(egui::RichText::new(format!("({ouverts}")).small().weak())
                            .on_hover_text("Parenthèses ouvertes");
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let taille = taille_police(valeur.chars().count());
                    ui.label(
                        egui::RichText::new(&valeur)
                            .size(taille)
                            .monospace()
                            .color(couleur_valeur),
                    );
                });
            });
    }

    /* ------------------------ Touches ------------------------ */

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for f in FonctionSci::TOUTES {
                self.touche(ui, TOUCHE_SCI, f.touche(), Action::Fonction(f));
            }

            ui.separator();

            for c in [Constante::Pi, Constante::E] {
                self.touche(ui, TOUCHE_SCI, c.touche(), Action::Constante(c));
            }
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        use Operateur::*;

        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, TOUCHE, "C", Action::Effacer);
                self.touche(ui, TOUCHE, "⌫", Action::Retour);
                self.touche(ui, TOUCHE, "(", Action::Parenthese(Parenthese::Ouvrante));
                self.touche(ui, TOUCHE, ")", Action::Parenthese(Parenthese::Fermante));
                self.touche(ui, TOUCHE, Divise.glyphe(), Action::Operateur(Divise));
                ui.end_row();

                self.chiffres(ui, [7, 8, 9]);
                self.touche(ui, TOUCHE, Fois.glyphe(), Action::Operateur(Fois));
                self.touche(ui, TOUCHE, Modulo.glyphe(), Action::Operateur(Modulo));
                ui.end_row();

                self.chiffres(ui, [4, 5, 6]);
                self.touche(ui, TOUCHE, Moins.glyphe(), Action::Operateur(Moins));
                self.touche(ui, TOUCHE, "±", Action::Signe);
                ui.end_row();

                self.chiffres(ui, [1, 2, 3]);
                self.touche(ui, TOUCHE, Plus.glyphe(), Action::Operateur(Plus));
                ui.label("");
                ui.end_row();

                self.touche(ui, TOUCHE, "0", Action::Chiffre(0));
                self.touche(ui, TOUCHE, ".", Action::Virgule);
                ui.label("");
                ui.label("");
                self.touche(ui, TOUCHE, "=", Action::Egal);
                ui.end_row();
            });
    }

    fn chiffres(&mut self, ui: &mut egui::Ui, ds: [u8; 3]) {
        for d in ds {
            self.touche(ui, TOUCHE, &d.to_string(), Action::Chiffre(d));
        }
    }

    fn touche(&mut self, ui: &mut egui::Ui, taille: [f32; 2], libelle: &str, action: Action) {
        let resp = ui.add_sized(
            taille,
            egui::Button::new(egui::RichText::new(libelle).size(18.0)),
        );
        if resp.clicked() {
            self.agir(action);
            resp.surrender_focus();
        }
    }

    /* ------------------------ Historique ------------------------ */

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut rappel = None;
        let mut vider = false;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.calc.historique().is_empty() {
                    ui.weak("Aucun calcul");
                    return;
                }

                for (i, e) in self.calc.historique().iter().enumerate() {
                    let ligne = format!("{} {}", e.expression, formater_nombre(e.resultat));
                    let resp = ui
                        .add(
                            egui::Label::new(egui::RichText::new(ligne).monospace())
                                .sense(egui::Sense::click()),
                        )
                        .on_hover_text("Reprendre ce résultat");
                    if resp.clicked() {
                        rappel = Some(i);
                    }
                }

                ui.add_space(4.0);
                vider = ui.button("Vider l’historique").clicked();
            });

        if let Some(i) = rappel {
            self.rappeler(i);
        }
        if vider {
            self.vider_historique();
        }
    }
}

/// Touches sans caractère : Entrée, Retour arrière, Échap/Suppr.
fn action_touche_nommee(key: egui::Key) -> Option<Action> {
    match key {
        egui::Key::Enter => Some(Action::Egal),
        egui::Key::Backspace => Some(Action::Retour),
        egui::Key::Escape | egui::Key::Delete => Some(Action::Effacer),
        _ => None,
    }
}
