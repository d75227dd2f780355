// src/noyau/domaine.rs
//
// Domaine d'échantillonnage : (x_min, x_max, n_points).
// Invariants:
// - bornes finies, x_max > x_min
// - POINTS_MIN <= n_points <= POINTS_MAX
// La validation se fait AVANT tout parsing d'expression (surface de
// validation des paramètres).

use super::erreurs::ErreurNoyau;

pub const POINTS_MIN: usize = 11;
pub const POINTS_MAX: usize = 2_000_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domaine {
    pub x_min: f64,
    pub x_max: f64,
    pub n_points: usize,
}

impl Domaine {
    pub fn new(x_min: f64, x_max: f64, n_points: usize) -> Result<Self, ErreurNoyau> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(ErreurNoyau::Parametres(
                "les bornes doivent être des nombres finis".into(),
            ));
        }
        if x_max <= x_min {
            return Err(ErreurNoyau::Parametres(
                "x max doit être strictement supérieur à x min".into(),
            ));
        }
        if !(POINTS_MIN..=POINTS_MAX).contains(&n_points) {
            return Err(ErreurNoyau::Parametres(format!(
                "nombre de points hors bornes : {n_points} (attendu {POINTS_MIN}..{POINTS_MAX})"
            )));
        }
        // le pas doit rester résolvable en f64 aux deux bornes, sinon
        // l'échantillon n'est plus strictement croissant (pas sous-normal
        // arrondi à 0, ou incrément sous l'ulp d'une borne)
        let pas = (x_max - x_min) / (n_points - 1) as f64;
        if x_min + pas <= x_min || x_max - pas >= x_max {
            return Err(ErreurNoyau::Parametres(format!(
                "intervalle trop étroit pour {n_points} points"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            n_points,
        })
    }

    /// Construit un domaine à partir des champs texte de l'UI.
    /// Rejette les valeurs non numériques avec un message descriptif,
    /// avant toute tentative de parsing de l'expression.
    pub fn depuis_champs(x_min: &str, x_max: &str, n_points: &str) -> Result<Self, ErreurNoyau> {
        let x_min: f64 = x_min
            .trim()
            .parse()
            .map_err(|_| ErreurNoyau::Parametres(format!("x min invalide : '{}'", x_min.trim())))?;
        let x_max: f64 = x_max
            .trim()
            .parse()
            .map_err(|_| ErreurNoyau::Parametres(format!("x max invalide : '{}'", x_max.trim())))?;
        let n_points: usize = n_points.trim().parse().map_err(|_| {
            ErreurNoyau::Parametres(format!("nombre de points invalide : '{}'", n_points.trim()))
        })?;
        Self::new(x_min, x_max, n_points)
    }

    /// Suite ordonnée de n_points valeurs équiréparties,
    /// strictement croissante, bornes exactes.
    pub fn echantillonner(&self) -> Vec<f64> {
        let n = self.n_points;
        let pas = (self.x_max - self.x_min) / (n - 1) as f64;

        let mut xs = Vec::with_capacity(n);
        for i in 0..n {
            xs.push(self.x_min + i as f64 * pas);
        }
        // borne supérieure exacte malgré l'arrondi flottant
        xs[n - 1] = self.x_max;
        xs
    }
}
