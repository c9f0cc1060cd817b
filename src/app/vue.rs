// src/app/vue.rs
//
// Vue (UI egui)
// -------------
// Objectifs :
// - Clavier : Enter évalue (quand le champ a le focus)
// - Pavé : chiffres, opérateurs, parenthèses, virgule, "\n" littéral (pour les en-têtes)
// - Réglages de politique : négatifs, borne haute, délimiteur extra
// - Focus redonné à l’entrée après chaque clic (focus_entree)

use eframe::egui;

use super::etat::AppCalc;
use crate::console::normaliser_saisie;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("String Calculator");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_politique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Input:");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 1,2\\n3   //[***]\\n1***2   (2+3)*4")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter : seulement si le champ a (ou vient de perdre) le focus
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Clear the input", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Clear result, formula and error", Action::ClearResultats);
            self.bouton_action(ui, "AC", "Reset everything", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Delete the last symbol", Action::Backspace);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        self.ui_pave(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice_chaine")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Texte);
                self.bouton_insert(ui, "8", "8", InsertKind::Texte);
                self.bouton_insert(ui, "9", "9", InsertKind::Texte);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                self.bouton_insert(ui, "(", "(", InsertKind::Texte);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Texte);
                self.bouton_insert(ui, "5", "5", InsertKind::Texte);
                self.bouton_insert(ui, "6", "6", InsertKind::Texte);
                self.bouton_insert(ui, "*", "*", InsertKind::Op);
                self.bouton_insert(ui, ")", ")", InsertKind::Texte);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Texte);
                self.bouton_insert(ui, "2", "2", InsertKind::Texte);
                self.bouton_insert(ui, "3", "3", InsertKind::Texte);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                self.bouton_insert(ui, ",", ",", InsertKind::Texte);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Texte);
                self.bouton_insert(ui, "//", "//", InsertKind::Texte);
                self.bouton_insert(ui, "\\n", "\\n", InsertKind::Texte);
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_politique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.checkbox(&mut self.autoriser_negatifs, "Allow negatives");

            ui.separator();

            ui.label("Upper bound:");
            let borne_max = self.borne_max();
            ui.add(
                egui::DragValue::new(&mut self.borne_sup)
                    .speed(1)
                    .range(0..=borne_max),
            );

            ui.separator();

            ui.label("Extra delimiter:");
            ui.add(
                egui::TextEdit::singleline(&mut self.delimiteur_extra)
                    .desired_width(60.0)
                    .id_source("delimiteur_extra_edit")
                    .code_editor(),
            );
        });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Result:");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        ui.add_space(6.0);

        ui.label("Formula:");
        Self::champ_monospace(ui, "formule_out", &self.formule, 2);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Steps")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Delimiters", "demarche_delims", &self.demarche.delimiteurs);
                Self::champ_demarche(ui, "Tokens", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre}:"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule, cadre visuel via Frame + Label monospace.
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

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match kind {
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Texte => self.entree.push_str(to_insert),
        }

        self.focus_entree = true;
    }

    /// Backspace : retire d’un coup les motifs à deux caractères ("\n", "//").
    fn backspace_entree(&mut self) {
        for pat in ["\\n", "//"] {
            if self.entree.ends_with(pat) {
                self.entree.truncate(self.entree.len() - pat.len());
                return;
            }
        }
        self.entree.pop();
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat/formule/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let entree = normaliser_saisie(&self.entree);
        let politique = self.politique();

        match crate::noyau::add(Some(entree.as_str()), &politique) {
            Ok(calcul) => {
                log::debug!("{calcul}");
                self.set_resultats(calcul);
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Texte,
    Op,
}
