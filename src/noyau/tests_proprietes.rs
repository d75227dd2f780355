//! Tests de propriétés : invariants du pipeline, de bout en bout.
//!
//! - domaine : n points, strictement croissants, bornes exactes
//! - parsing : déterministe, ^ ≡ **, table de symboles fermée
//! - évaluation : NaN/inf = données, réconciliation complexe
//! - validation des paramètres avant tout parsing

use super::domaine::{Domaine, POINTS_MAX, POINTS_MIN};
use super::erreurs::ErreurNoyau;
use super::eval::{compiler, tracer_expression};

fn tracer(s: &str, x_min: f64, x_max: f64, n: usize) -> Vec<f64> {
    let d = Domaine::new(x_min, x_max, n).unwrap();
    tracer_expression(s, &d, false)
        .unwrap_or_else(|e| panic!("tracer({s:?}) erreur: {e}"))
        .ys
}

/// Comparaison bit à bit (NaN compris) de deux échantillons.
fn memes_echantillons(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.to_bits() == y.to_bits())
}

/* ------------------------ Domaine ------------------------ */

#[test]
fn domaine_n_points_croissants_bornes_exactes() {
    for (x_min, x_max, n) in [
        (-10.0, 10.0, POINTS_MIN),
        (0.01, 100.0, 2000),
        (-1000.0, 1000.0, 100_001),
        (-0.5, 0.5, 997),
    ] {
        let xs = Domaine::new(x_min, x_max, n).unwrap().echantillonner();
        assert_eq!(xs.len(), n);
        assert_eq!(xs[0], x_min);
        assert_eq!(*xs.last().unwrap(), x_max);
        assert!(
            xs.windows(2).all(|w| w[0] < w[1]),
            "échantillon non strictement croissant pour ({x_min}, {x_max}, {n})"
        );
    }
}

#[test]
fn points_hors_bornes_rejetes_avant_parsing() {
    // la validation des paramètres précède le parsing : une expression
    // invalide ne doit même pas être regardée
    for n in [0, 5, 10, 2_000_001, 3_000_000] {
        let e = Domaine::new(0.0, 1.0, n).unwrap_err();
        assert!(matches!(e, ErreurNoyau::Parametres(_)), "n={n}: {e}");
    }
    assert!(Domaine::new(0.0, 1.0, POINTS_MAX).is_ok());
}

/* ------------------------ Parsing ------------------------ */

#[test]
fn parsing_deterministe() {
    for s in ["sin(x)/x", "x^2 + 2x - 1", "sqrt(abs(x))"] {
        let a = compiler(s).unwrap();
        let b = compiler(s).unwrap();
        assert_eq!(a, b, "arbres différents pour {s:?}");
    }

    // même texte => échantillons identiques bit à bit
    let ys1 = tracer("exp(-x^2) * cos(3x)", -3.0, 3.0, 501);
    let ys2 = tracer("exp(-x^2) * cos(3x)", -3.0, 3.0, 501);
    assert!(memes_echantillons(&ys1, &ys2));
}

#[test]
fn caret_equivaut_double_etoile() {
    assert_eq!(compiler("x^2").unwrap(), compiler("x**2").unwrap());

    let a = tracer("x^2", -5.0, 5.0, 101);
    let b = tracer("x**2", -5.0, 5.0, 101);
    assert!(memes_echantillons(&a, &b));
}

#[test]
fn moins_unaire_adjacent_a_un_operateur() {
    // la forme compacte équivaut à la forme parenthésée
    assert_eq!(compiler("x^-2").unwrap(), compiler("x^(-2)").unwrap());
    assert_eq!(compiler("2*-x").unwrap(), compiler("2*(-x)").unwrap());
    assert_eq!(compiler("2^-1").unwrap(), compiler("2^(-1)").unwrap());

    // et la courbe est celle de 1/x² (pas (x^0) - 2)
    let ys = tracer("x^-2", 1.0, 2.0, 11);
    let attendu = tracer("1/x^2", 1.0, 2.0, 11);
    for (a, b) in ys.iter().zip(&attendu) {
        assert!((a - b).abs() < 1e-12, "a={a} b={b}");
    }
}

#[test]
fn identifiant_inconnu_est_une_erreur_de_parse() {
    for s in ["foo(x)", "y + 1", "sinus(x)", "xx"] {
        let e = compiler(s).unwrap_err();
        assert!(matches!(e, ErreurNoyau::Parse(_)), "s={s:?}: {e}");
    }
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn un_sur_x_traverse_zero_sans_erreur() {
    // domaine symétrique : x = 0 est le point médian exact
    let ys = tracer("1/x", -1.0, 1.0, 11);
    assert_eq!(ys.len(), 11);
    assert!(
        ys[5].is_nan() || ys[5].is_infinite(),
        "en x=0 : NaN ou ±inf attendu, obtenu {}",
        ys[5]
    );
    // ailleurs : valeurs réelles finies
    for (i, y) in ys.iter().enumerate() {
        if i != 5 {
            assert!(y.is_finite(), "i={i} y={y}");
        }
    }
}

#[test]
fn racine_masquee_sur_la_branche_negative() {
    // sqrt(x) sur [-4, 4] : NaN pour x < 0, √x pour x >= 0
    let d = Domaine::new(-4.0, 4.0, 17).unwrap();
    let t = tracer_expression("sqrt(x)", &d, false).unwrap();
    for (x, y) in t.xs.iter().zip(t.ys.iter()) {
        if *x < 0.0 {
            assert!(y.is_nan(), "x={x} : NaN attendu, obtenu {y}");
        } else {
            assert!((y - x.sqrt()).abs() < 1e-12, "x={x} y={y}");
        }
    }
}

#[test]
fn sinus_ne_declenche_jamais_le_masquage() {
    // sin est réel partout : aucune valeur perdue
    let ys = tracer("sin(x)", -10.0, 10.0, 1001);
    assert!(ys.iter().all(|y| y.is_finite()));
}

#[test]
fn log_negatif_masque_par_point() {
    // branche par point : log(x) complexe franc pour x < 0
    let d = Domaine::new(-4.0, 4.0, 17).unwrap();
    let t = tracer_expression("log(x)", &d, false).unwrap();
    for (x, y) in t.xs.iter().zip(t.ys.iter()) {
        if *x < 0.0 {
            assert!(y.is_nan(), "x={x} y={y}");
        } else if *x > 0.0 {
            assert!((y - x.ln()).abs() < 1e-12, "x={x} y={y}");
        }
    }
}

#[test]
fn multiplication_implicite_equivalente() {
    for (a, b) in [
        ("2x", "2*x"),
        ("2sin(x)", "2*sin(x)"),
        ("x(x+1)", "x*(x+1)"),
    ] {
        let ya = tracer(a, -5.0, 5.0, 101);
        let yb = tracer(b, -5.0, 5.0, 101);
        assert!(memes_echantillons(&ya, &yb), "{a:?} vs {b:?}");
    }
}

#[test]
fn abs_et_majuscule_equivalents() {
    let a = tracer("abs(x)", -5.0, 5.0, 101);
    let b = tracer("Abs(x)", -5.0, 5.0, 101);
    assert!(memes_echantillons(&a, &b));
}

/* ------------------------ Dérivée ------------------------ */

#[test]
fn derivee_non_fatale_courbe_principale_tracee() {
    let d = Domaine::new(0.5, 5.0, 101).unwrap();
    let t = tracer_expression("log(x)", &d, true).unwrap();
    assert_eq!(t.ys.len(), 101);
    // dérivée disponible ici : 1/x
    let yd = t.ys_derivee.expect("dérivée attendue");
    for (x, y) in t.xs.iter().zip(yd.iter()) {
        assert!((y - 1.0 / x).abs() < 1e-9, "x={x} y={y}");
    }
}

/* ------------------------ Scénario de bout en bout ------------------------ */

#[test]
fn scenario_sin_x_sur_x() {
    let d = Domaine::new(0.01, 100.0, 2000).unwrap();
    let t = tracer_expression("sin(x)/x", &d, false).unwrap();

    assert_eq!(t.xs.len(), 2000);
    assert_eq!(t.ys.len(), 2000);
    assert_eq!(t.xs[0], 0.01);
    assert_eq!(*t.xs.last().unwrap(), 100.0);
    assert!(t.xs.windows(2).all(|w| w[0] < w[1]));

    // toutes les valeurs sont réelles finies
    assert!(t.ys.iter().all(|y| y.is_finite()));

    // limite en 0+ : f(0.01) ≈ 1
    assert!(t.ys[0] > 0.99 && t.ys[0] <= 1.0);

    // amplitude décroissante vers 0 : |f| <= 1/x pour x grand
    for (x, y) in t.xs.iter().zip(t.ys.iter()).skip(1500) {
        assert!(y.abs() <= 1.0 / x + 1e-12, "x={x} y={y}");
    }
}
