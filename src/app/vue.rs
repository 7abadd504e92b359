// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Deux onglets : Basique / Scientifique (comme les deux modes du noyau)
// - Clavier : Enter évalue le champ qui a le focus
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
//
// La vue ne calcule RIEN : chaque action délègue à etat.rs, qui délègue au
// noyau. En cas d’erreur, etat.rs laisse l’entrée intacte; ici on ne fait
// que l’afficher.

use eframe::egui;

use super::etat::{AppCalc, Onglet, OPERATIONS};
use crate::noyau;

/// Disposition du pavé virtuel (insertion texte, sauf ← et C).
const PAVE: [[&str; 6]; 4] = [
    ["7", "8", "9", "+", "(", ")"],
    ["4", "5", "6", "-", "π", "e"],
    ["1", "2", "3", "*", "sqrt(", "log("],
    ["0", ".", "^", "/", "←", "C"],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_onglets(ui);

                ui.add_space(8.0);

                match self.onglet {
                    Onglet::Basique => self.ui_basique(ui),
                    Onglet::Scientifique => self.ui_scientifique(ui),
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_onglets(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.onglet, Onglet::Basique, "Calculatrice basique");
            ui.selectable_value(
                &mut self.onglet,
                Onglet::Scientifique,
                "Calculatrice scientifique",
            );
        });
    }

    /* ------------------------ Onglet basique ------------------------ */

    fn ui_basique(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");
        self.champ_expression(ui, "expression_basique");

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(4.0);

        ui.label("Ou : deux nombres + opération");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut self.nombre_a).speed(0.1));

            egui::ComboBox::from_id_salt("choix_operation")
                .selected_text(OPERATIONS[self.operation.min(OPERATIONS.len() - 1)])
                .show_ui(ui, |ui| {
                    for (i, op) in OPERATIONS.iter().enumerate() {
                        ui.selectable_value(&mut self.operation, i, *op);
                    }
                });

            ui.add(egui::DragValue::new(&mut self.nombre_b).speed(0.1));

            if ui.button("Calculer").clicked() {
                self.calculer_operation();
            }
        });
    }

    /* ------------------------ Onglet scientifique ------------------------ */

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        ui.label("Appliquer une fonction :");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut self.valeur_fonction).speed(0.1));

            let noms = noyau::noms_fonctions();
            egui::ComboBox::from_id_salt("choix_fonction")
                .selected_text(noms[self.fonction_choisie.min(noms.len() - 1)])
                .show_ui(ui, |ui| {
                    for (i, nom) in noms.iter().enumerate() {
                        ui.selectable_value(&mut self.fonction_choisie, i, *nom);
                    }
                });

            if ui.button("Appliquer").clicked() {
                self.appliquer_fonction_choisie();
            }
        });

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(4.0);

        ui.label("Expression scientifique (ex: sin(pi/6) + sqrt(16)) :");
        self.champ_expression(ui, "expression_sci");

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(4.0);

        self.ui_pave(ui);
    }

    /// Champ d’expression + Enter + bouton "=".
    fn champ_expression(&mut self, ui: &mut egui::Ui, id: &str) {
        let est_basique = matches!(self.onglet, Onglet::Basique);
        let mut evaluer = false;

        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(if est_basique {
                    &mut self.expression_basique
                } else {
                    &mut self.expression_sci
                })
                .desired_width(ui.available_width() - 72.0)
                .hint_text("Ex: 2+3*4")
                .id_source(id)
                .code_editor(),
            );

            if self.focus_entree {
                resp.request_focus();
                self.focus_entree = false;
            }

            // Enter évalue, seulement si le champ a le focus (pas de
            // raccourci global : sur web/mobile le clavier est incertain).
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.has_focus() && enter {
                evaluer = true;
            }

            if ui.add_sized([64.0, 28.0], egui::Button::new("=")).clicked() {
                evaluer = true;
            }
        });

        if evaluer {
            self.evaluer_champ();
        }
    }

    /* ------------------------ Pavé virtuel ------------------------ */

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        ui.label("Pavé virtuel :");

        // Affichage du tampon (lecture seule : les mutations passent par
        // les boutons, c’est le contrat du tampon).
        Self::champ_monospace(ui, "tampon_out", &self.tampon, 1);

        egui::Grid::new("pave_virtuel")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for btn in ligne {
                        match btn {
                            "←" => self.bouton_action(
                                ui,
                                "←",
                                "Efface le dernier symbole",
                                Action::TamponRetour,
                            ),
                            "C" => self.bouton_action(
                                ui,
                                "C",
                                "Efface tout le tampon",
                                Action::TamponEffacer,
                            ),
                            _ => self.bouton_insert(ui, btn),
                        }
                    }
                    ui.end_row();
                }
            });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let eq = ui.add_sized([96.0, 32.0], egui::Button::new("Calculer ⏎"));
            if eq.clicked() {
                self.evaluer_tampon();
            }
        });
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, texte: &str) {
        let resp = ui.add_sized([52.0, 30.0], egui::Button::new(texte));
        if resp.clicked() {
            self.tampon_ajouter(texte);
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([52.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::TamponRetour => self.tampon_retour(),
                Action::TamponEffacer => self.tampon_effacer(),
            }
        }
    }

    /* ------------------------ Résultat + erreur ------------------------ */

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    /* ------------------------ Historique ------------------------ */

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.monospace("(vide)");
                } else {
                    // plus récent en premier
                    for (i, entree) in self.historique.iter().rev().enumerate() {
                        ui.monospace(format!(
                            "{}. {} = {}",
                            i + 1,
                            entree.expression,
                            entree.resultat
                        ));
                    }
                }

                ui.add_space(4.0);
                if ui.button("Vider l’historique").clicked() {
                    self.vider_historique();
                }
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    TamponRetour,
    TamponEffacer,
}
