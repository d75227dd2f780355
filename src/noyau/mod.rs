//! Noyau d'évaluation — du texte à la courbe échantillonnée
//!
//! Organisation interne :
//! - erreurs.rs : taxonomie d'erreurs (thiserror)
//! - jetons.rs  : tokenisation (^ et ** normalisés en exposant)
//! - rpn.rs     : mult. implicite + shunting-yard + construction Expr
//! - expr.rs    : AST symbolique + simplify + profondeur
//! - derivee.rs : dérivée symbolique d/dx
//! - domaine.rs : domaine d'échantillonnage (bornes + nombre de points)
//! - eval.rs    : pipeline complet (évaluation complexe + réconciliation)

pub mod derivee;
pub mod domaine;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use domaine::Domaine;
pub use erreurs::ErreurNoyau;
pub use eval::{tracer_expression, Trace};
