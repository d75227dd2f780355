// src/app.rs
//
// Grapheur Analyse — module App (racine)
// --------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppGrapheur (pour main.rs: use crate::app::AppGrapheur;)
// - Fournir l'impl eframe::App
//
// Important:
// - La gestion Enter est faite dans vue.rs (au bon endroit: quand le champ
//   fonction a le focus).
// - L'animation avance ici, une position par image, sur la courbe déjà
//   échantillonnée (O(1) par image).

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppGrapheur;`
pub use etat::AppGrapheur;

use eframe::egui;

impl eframe::App for AppGrapheur {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal :
        // ESC = efface le graphique (comme le bouton "Effacer").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.effacer(); // méthode publique de etat.rs
        }

        // Point mobile : une position par image, cadence ~20 ms.
        if self.animation.is_some() {
            self.avancer_animation();
            ctx.request_repaint_after(std::time::Duration::from_millis(20));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
