//! src/app/etat.rs
//!
//! État UI (sans vue, sans egui).
//!
//! Rôle : contenir l'état du grapheur (champs texte, options, dernière
//! trace réussie, erreur/avertissement, animation) et les actions
//! associées (Tracer / Animer / Effacer).
//!
//! Contrats :
//! - Sur erreur fatale, `trace` reste INCHANGÉE (jamais de redraw partiel).
//! - Validation des paramètres AVANT tout parsing de l'expression.
//! - Actions déterministes, tout l'état vit sur le fil UI.

use tracing::warn;

use crate::noyau::{tracer_expression, Domaine, ErreurNoyau, Trace};

/// Nombre de positions du point mobile (indépendant de l'échantillon).
pub const POSITIONS_ANIMATION: usize = 500;

/// Point mobile parcourant la courbe déjà échantillonnée.
/// Chaque image avance d'une position : O(1) par image.
#[derive(Clone, Copy, Debug)]
pub struct Animation {
    pub position: usize, // 0..POSITIONS_ANIMATION
}

#[derive(Clone, Debug)]
pub struct AppGrapheur {
    // --- entrée utilisateur ---
    pub champ_fonction: String,
    pub champ_x_min: String,
    pub champ_x_max: String,
    pub champ_points: String,
    pub grille: bool,
    pub avec_derivee: bool,

    // --- sorties ---
    pub trace: Option<Trace>,   // dernière trace réussie
    pub erreur: String,         // erreur bloquante (trace inchangée)
    pub avertissement: String,  // dérivée non tracée (non fatal)
    pub statut: String,

    // --- animation ---
    pub animation: Option<Animation>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus au champ fonction après action.
    pub focus_fonction: bool,
}

impl Default for AppGrapheur {
    fn default() -> Self {
        Self {
            champ_fonction: "sin(x)/x".to_string(),
            champ_x_min: "-10".to_string(),
            champ_x_max: "10".to_string(),
            champ_points: "1000".to_string(),
            grille: true,
            avec_derivee: false,
            trace: None,
            erreur: String::new(),
            avertissement: String::new(),
            statut: "Prêt".to_string(),
            animation: None,
            focus_fonction: true,
        }
    }
}

impl AppGrapheur {
    /* ------------------------ Actions "boutons" (état seulement) ------------------------ */

    /// Tracer : valide les paramètres, puis pipeline complet.
    /// Sur erreur : message + trace affichée inchangée.
    pub fn tracer(&mut self) {
        self.animation = None;

        let domaine = match Domaine::depuis_champs(
            &self.champ_x_min,
            &self.champ_x_max,
            &self.champ_points,
        ) {
            Ok(d) => d,
            Err(e) => {
                self.set_erreur(e);
                return;
            }
        };

        match tracer_expression(&self.champ_fonction, &domaine, self.avec_derivee) {
            Ok(t) => {
                self.erreur.clear();
                self.avertissement = t.avertissement_derivee.clone().unwrap_or_default();
                self.trace = Some(t);
                self.statut = "Courbe tracée".to_string();
                self.focus_fonction = true;
            }
            Err(e) => self.set_erreur(e),
        }
    }

    /// Animer : (re)trace si besoin, puis lance le point mobile.
    pub fn animer(&mut self) {
        if self.trace.is_none() {
            self.tracer();
        }
        if self.trace.is_some() {
            self.animation = Some(Animation { position: 0 });
            self.statut = "Animation en cours".to_string();
        }
    }

    /// Avance le point mobile d'une position ; s'arrête en bout de courbe.
    pub fn avancer_animation(&mut self) {
        if let Some(anim) = &mut self.animation {
            if anim.position + 1 >= POSITIONS_ANIMATION {
                self.animation = None;
                self.statut = "Animation terminée".to_string();
            } else {
                anim.position += 1;
            }
        }
    }

    /// Coordonnées du point mobile sur la courbe, si traçable.
    pub fn point_anime(&self) -> Option<[f64; 2]> {
        let anim = self.animation?;
        let t = self.trace.as_ref()?;
        if t.xs.is_empty() {
            return None;
        }

        let i = anim.position * (t.xs.len() - 1) / (POSITIONS_ANIMATION - 1);
        let (x, y) = (t.xs[i], t.ys[i]);
        // point non traçable (NaN/inf) : marqueur caché cette image
        if y.is_finite() {
            Some([x, y])
        } else {
            None
        }
    }

    /// Effacer : retire la trace (les champs restent).
    pub fn effacer(&mut self) {
        self.trace = None;
        self.animation = None;
        self.erreur.clear();
        self.avertissement.clear();
        self.statut = "Graphique effacé".to_string();
        self.focus_fonction = true;
    }

    /// Remplace l'expression par un exemple prédéfini.
    pub fn appliquer_exemple(&mut self, exemple: &str) {
        self.champ_fonction = exemple.to_string();
        self.focus_fonction = true;
    }

    /// Utilitaire : placer une erreur bloquante.
    ///
    /// Choix UX :
    /// - On CONSERVE `trace` (dernier tracé) pour ne pas effacer l'écran
    ///   sur une faute de frappe.
    /// - L'animation s'arrête (elle suivrait une courbe périmée).
    fn set_erreur(&mut self, e: ErreurNoyau) {
        warn!(erreur = %e, "tracé refusé");
        self.erreur = e.to_string();
        self.avertissement.clear();
        self.animation = None;
        self.statut = "Erreur".to_string();
        self.focus_fonction = true;
    }
}
