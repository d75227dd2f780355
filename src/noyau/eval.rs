//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> mult implicite -> RPN -> Expr -> garde profondeur
//!        -> échantillonnage -> évaluation complexe -> réconciliation
//!        -> (option) dérivée symbolique -> même chemin numérique
//!
//! L'évaluation se fait en Complex64 : certaines expressions (√x, log x)
//! ne sont définies que sur ℂ pour x < 0. La réconciliation ramène tout
//! sur ℝ (ou NaN) avant le tracé. NaN/inf sont des données, pas des
//! erreurs.

use num_complex::Complex64;
use tracing::{debug, warn};

use super::derivee::derivee;
use super::domaine::Domaine;
use super::erreurs::ErreurNoyau;
use super::expr::{Expr, Fct};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, inserer_mult_implicite, to_rpn};

/// Tolérance sur |Im| : en-dessous, bruit numérique ; au-dessus,
/// branche réellement complexe (point non traçable).
pub const TOL_IMAGINAIRE: f64 = 1e-9;

/// Garde-fou : profondeur maximale d'arbre acceptée à la compilation.
const PROFONDEUR_MAX: usize = 10_000;

/// Résultat d'un tracé : échantillons prêts pour la surface de dessin.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    /// Texte de l'expression tracée (pour la légende).
    pub expression: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub ys_derivee: Option<Vec<f64>>,
    /// Échec non fatal de la dérivée (la courbe principale est tracée).
    pub avertissement_derivee: Option<String>,
}

/// Parse + vérifie la compilabilité d'une expression (table de symboles fermée).
/// Pur et déterministe : même texte => même arbre.
pub fn compiler(texte: &str) -> Result<Expr, ErreurNoyau> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurNoyau::Parse("entrée vide".into()));
    }

    let jetons = inserer_mult_implicite(tokenize(s).map_err(ErreurNoyau::Parse)?);
    debug!(jetons = %format_tokens(&jetons), "tokenisation");

    let rpn = to_rpn(&jetons).map_err(ErreurNoyau::Parse)?;
    let expr = from_rpn(&rpn).map_err(ErreurNoyau::Parse)?;

    verifier_compilable(&expr)?;
    Ok(expr)
}

/// Seul cas "sans signification numérique" dans un AST fermé : un arbre
/// trop profond pour être évalué récursivement.
fn verifier_compilable(expr: &Expr) -> Result<(), ErreurNoyau> {
    let p = expr.profondeur();
    if p > PROFONDEUR_MAX {
        return Err(ErreurNoyau::Compilation(format!(
            "arbre trop profond ({p} niveaux, maximum {PROFONDEUR_MAX})"
        )));
    }
    Ok(())
}

/// Évalue l'arbre en un point complexe.
pub fn eval_complexe(expr: &Expr, x: Complex64) -> Complex64 {
    use Expr::*;

    match expr {
        Nombre(v) => Complex64::new(*v, 0.0),
        Pi => Complex64::new(std::f64::consts::PI, 0.0),
        Euler => Complex64::new(std::f64::consts::E, 0.0),
        X => x,

        Fct(f, u) => {
            let v = eval_complexe(u, x);
            match f {
                self::Fct::Sin => v.sin(),
                self::Fct::Cos => v.cos(),
                self::Fct::Tan => v.tan(),
                self::Fct::Exp => v.exp(),
                self::Fct::Log => v.ln(),
                self::Fct::Sqrt => v.sqrt(),
                self::Fct::Abs => Complex64::new(v.norm(), 0.0),
            }
        }

        Add(a, b) => eval_complexe(a, x) + eval_complexe(b, x),
        Sub(a, b) => eval_complexe(a, x) - eval_complexe(b, x),
        Mul(a, b) => eval_complexe(a, x) * eval_complexe(b, x),
        Div(a, b) => eval_complexe(a, x) / eval_complexe(b, x),

        Pow(a, b) => {
            let base = eval_complexe(a, x);
            let exp = eval_complexe(b, x);
            // exposant entier : puissance par carrés, une base réelle reste
            // exactement réelle (pas de bruit imaginaire via exp·ln)
            if exp.im == 0.0 && exp.re.fract() == 0.0 && exp.re.abs() <= i32::MAX as f64 {
                base.powi(exp.re as i32)
            } else {
                base.powc(exp)
            }
        }
    }
}

/// Évaluation vectorisée sur l'échantillon réel.
pub fn evaluer_sur(expr: &Expr, xs: &[f64]) -> Vec<Complex64> {
    xs.iter()
        .map(|&x| eval_complexe(expr, Complex64::new(x, 0.0)))
        .collect()
}

/// Réconciliation complexe -> réel.
///
/// 1. si max |Im| < tolérance sur TOUT l'échantillon : bruit numérique
///    global, on garde Re partout ;
/// 2. sinon, règle par point : Re si |Im| < tolérance, NaN ailleurs
///    (branche complexe d'une fonction multivaluée, non traçable).
///
/// Les deux branches sont volontairement distinctes (comportement
/// historique conservé tel quel).
pub fn reconcilier_complexe(valeurs: &[Complex64]) -> Vec<f64> {
    // NB: f64::max ignore NaN, un |Im| NaN ne force donc pas la branche 2
    // (le point correspondant a de toute façon un Re NaN).
    let max_im = valeurs.iter().map(|v| v.im.abs()).fold(0.0_f64, f64::max);

    if max_im < TOL_IMAGINAIRE {
        valeurs.iter().map(|v| v.re).collect()
    } else {
        valeurs
            .iter()
            .map(|v| {
                if v.im.abs() < TOL_IMAGINAIRE {
                    v.re
                } else {
                    f64::NAN
                }
            })
            .collect()
    }
}

/// API publique : pipeline complet, du texte aux échantillons traçables.
///
/// Sur erreur fatale (Parse/Compilation/Evaluation), l'appelant doit
/// laisser le graphique affiché inchangé. Un échec de dérivée est
/// rapporté en avertissement, la courbe principale est quand même
/// fournie.
pub fn tracer_expression(
    texte: &str,
    domaine: &Domaine,
    avec_derivee: bool,
) -> Result<Trace, ErreurNoyau> {
    let expr = compiler(texte)?;
    debug!(expr = %expr, "expression compilée");

    let xs = domaine.echantillonner();
    let brut = evaluer_sur(&expr, &xs);

    // défense en profondeur : la sortie doit couvrir tout le domaine
    if brut.len() != xs.len() {
        return Err(ErreurNoyau::Evaluation(format!(
            "échantillon incomplet : {} valeurs pour {} points",
            brut.len(),
            xs.len()
        )));
    }
    let ys = reconcilier_complexe(&brut);

    let (ys_derivee, avertissement_derivee) = if avec_derivee {
        match echantillonner_derivee(&expr, &xs) {
            Ok(yd) => (Some(yd), None),
            Err(e) => {
                warn!(erreur = %e, "dérivée non tracée");
                (None, Some(e.to_string()))
            }
        }
    } else {
        (None, None)
    };

    Ok(Trace {
        expression: texte.trim().to_string(),
        xs,
        ys,
        ys_derivee,
        avertissement_derivee,
    })
}

/// Dérivée symbolique recalculée à chaque tracé (pas de cache),
/// puis même chemin numérique que l'expression principale.
fn echantillonner_derivee(expr: &Expr, xs: &[f64]) -> Result<Vec<f64>, ErreurNoyau> {
    let d = derivee(expr).simplify();
    debug!(derivee = %d, "dérivée symbolique");

    verifier_compilable(&d).map_err(|e| ErreurNoyau::Derivee(e.to_string()))?;

    let brut = evaluer_sur(&d, xs);
    Ok(reconcilier_complexe(&brut))
}
