// src/app/vue.rs
//
// Vue (UI egui + egui_plot)
// -------------------------
// Objectifs :
// - Même AppGrapheur (etat.rs) pour toute la vue
// - Clavier : Enter trace (quand le champ fonction a le focus)
// - Erreur bloquante en rouge, avertissement dérivée en orange
// - La surface de tracé ne bouge pas tant qu'un tracé n'a pas réussi
//
// Note :
// - Les NaN (points masqués / hors domaine) coupent la courbe en
//   segments finis ; on ne relie jamais deux points à travers un trou.

use eframe::egui;
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, Points};

use super::etat::AppGrapheur;

/// Exemples prédéfinis (combo box), comme la liste historique.
const EXEMPLES: [&str; 9] = [
    "sin(x)/x",
    "sin(x)",
    "cos(x)",
    "tan(x)",
    "exp(-x**2)",
    "log(x)",
    "x**2",
    "1/x",
    "sqrt(x)",
];

impl AppGrapheur {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_controles(ui);

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
        if !self.avertissement.is_empty() {
            ui.colored_label(ui.visuals().warn_fg_color, &self.avertissement);
        }

        ui.separator();

        self.ui_graphique(ui);

        ui.separator();
        ui.label(&self.statut);
    }

    fn ui_controles(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("f(x) =");

            // IMPORTANT : id stable + focus contrôlé
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.champ_fonction)
                    .desired_width(280.0)
                    .hint_text("Ex: sin(x)/x, exp(-x^2), sqrt(x)")
                    .id_source("champ_fonction")
                    .code_editor(),
            );

            if self.focus_fonction {
                resp.request_focus();
                self.focus_fonction = false;
            }

            // Enter trace (seulement si le champ a le focus), pour éviter
            // les déclenchements globaux quand on clique ailleurs.
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.has_focus() && enter {
                self.tracer();
            }

            // Exemples prédéfinis
            let mut choix: Option<&str> = None;
            egui::ComboBox::from_id_salt("exemples")
                .selected_text("exemples…")
                .show_ui(ui, |ui| {
                    for ex in EXEMPLES {
                        if ui.selectable_label(false, ex).clicked() {
                            choix = Some(ex);
                        }
                    }
                });
            if let Some(ex) = choix {
                self.appliquer_exemple(ex);
            }
        });

        ui.horizontal(|ui| {
            ui.label("x min");
            ui.add(
                egui::TextEdit::singleline(&mut self.champ_x_min)
                    .desired_width(64.0)
                    .id_source("champ_x_min"),
            );

            ui.label("x max");
            ui.add(
                egui::TextEdit::singleline(&mut self.champ_x_max)
                    .desired_width(64.0)
                    .id_source("champ_x_max"),
            );

            ui.label("points");
            ui.add(
                egui::TextEdit::singleline(&mut self.champ_points)
                    .desired_width(64.0)
                    .id_source("champ_points"),
            );

            ui.separator();

            ui.checkbox(&mut self.grille, "grille");
            ui.checkbox(&mut self.avec_derivee, "dérivée");

            ui.separator();

            if ui
                .button("Tracer")
                .on_hover_text("Évalue f(x) sur le domaine et redessine")
                .clicked()
            {
                self.tracer();
            }
            if ui
                .button("Animer")
                .on_hover_text("Point mobile parcourant la courbe")
                .clicked()
            {
                self.animer();
            }
            if ui
                .button("Effacer")
                .on_hover_text("Retire la courbe (garde les champs)")
                .clicked()
            {
                self.effacer();
            }
        });
    }

    fn ui_graphique(&mut self, ui: &mut egui::Ui) {
        // hauteur restante moins la ligne de statut
        let hauteur = (ui.available_height() - 30.0).max(120.0);

        let plot = Plot::new("zone_trace")
            .legend(Legend::default())
            .show_grid(self.grille)
            .x_axis_label("x")
            .y_axis_label("f(x)")
            .height(hauteur);

        let point_anime = self.point_anime();

        plot.show(ui, |plot_ui| {
            let Some(trace) = &self.trace else {
                return;
            };

            // courbe principale (segments finis, trous sur NaN)
            let nom = format!("f(x) = {}", trace.expression);
            for (k, seg) in segments_finis(&trace.xs, &trace.ys).into_iter().enumerate() {
                // un seul nom pour la légende, les autres segments muets
                let etiquette = if k == 0 { nom.clone() } else { String::new() };
                plot_ui.line(Line::new(etiquette, seg).color(egui::Color32::from_rgb(60, 110, 220)));
            }

            // dérivée en pointillés
            if let Some(yd) = &trace.ys_derivee {
                for (k, seg) in segments_finis(&trace.xs, yd).into_iter().enumerate() {
                    let etiquette = if k == 0 { "f'(x)".to_string() } else { String::new() };
                    plot_ui.line(
                        Line::new(etiquette, seg)
                            .color(egui::Color32::from_rgb(220, 120, 40))
                            .style(LineStyle::dashed_loose()),
                    );
                }
            }

            // point mobile
            if let Some(p) = point_anime {
                plot_ui.points(
                    Points::new("point mobile", vec![p])
                        .radius(5.0)
                        .shape(MarkerShape::Circle)
                        .color(egui::Color32::RED),
                );
            }
        });
    }
}

/// Découpe (xs, ys) en segments de points finis consécutifs.
/// Les NaN/inf forment des trous : on ne trace pas à travers.
fn segments_finis(xs: &[f64], ys: &[f64]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut courant: Vec<[f64; 2]> = Vec::new();

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if y.is_finite() {
            courant.push([x, y]);
        } else if !courant.is_empty() {
            segments.push(std::mem::take(&mut courant));
        }
    }
    if !courant.is_empty() {
        segments.push(courant);
    }

    segments
}
