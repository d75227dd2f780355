// src/main.rs
//
// Grapheur Analyse — point d'entrée natif
// ---------------------------------------
// But:
// - Installer le journal (tracing, filtré par RUST_LOG)
// - Lancer eframe avec AppGrapheur
//
// IMPORTANT (structure projet):
// - `impl eframe::App for AppGrapheur` vit dans src/app.rs
// - Ici: point d'entrée seulement

use eframe::egui;

mod app;
mod noyau;

use app::AppGrapheur;

/// Titre unique de l'application.
const TITRE_APP: &str = "Grapheur Analyse";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppGrapheur>::default())),
    )
}
