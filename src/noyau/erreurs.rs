// src/noyau/erreurs.rs
//
// Taxonomie d'erreurs du noyau.
// - Parametres / Parse / Compilation / Evaluation : bloquantes pour le tracé
//   en cours (le graphique affiché reste inchangé).
// - Derivee : non fatale, la courbe principale est tracée quand même.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurNoyau {
    #[error("paramètres invalides : {0}")]
    Parametres(String),

    #[error("erreur de parsing : {0}")]
    Parse(String),

    #[error("compilation impossible : {0}")]
    Compilation(String),

    #[error("erreur d'évaluation : {0}")]
    Evaluation(String),

    #[error("dérivée : {0}")]
    Derivee(String),
}
