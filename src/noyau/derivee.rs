// src/noyau/derivee.rs
//
// Dérivée symbolique d/dx sur l'AST fermé.
// Règles : somme, produit, quotient, chaîne pour les fonctions unaires.
// - exposant constant : règle de puissance n·u^(n-1)·u'
// - exposant général  : u^v · (v'·ln u + v·u'/u)
// - |u|' = (u/|u|)·u'  (signe ; NaN en 0, c'est une donnée)
//
// La dérivée est totale sur l'AST (jamais d'échec symbolique) ; les
// échecs possibles (profondeur, évaluation) sont gérés en aval par le
// pipeline, comme avertissement non fatal.

use super::expr::{Expr, Fct};

/// Dérivée symbolique par rapport à x (non simplifiée).
pub fn derivee(e: &Expr) -> Expr {
    use Expr::*;

    match e {
        Nombre(_) | Pi | Euler => Nombre(0.0),
        X => Nombre(1.0),

        Add(a, b) => Add(Box::new(derivee(a)), Box::new(derivee(b))),
        Sub(a, b) => Sub(Box::new(derivee(a)), Box::new(derivee(b))),

        Mul(a, b) => Add(
            Box::new(Mul(Box::new(derivee(a)), b.clone())),
            Box::new(Mul(a.clone(), Box::new(derivee(b)))),
        ),

        Div(a, b) => Div(
            Box::new(Sub(
                Box::new(Mul(Box::new(derivee(a)), b.clone())),
                Box::new(Mul(a.clone(), Box::new(derivee(b)))),
            )),
            Box::new(Pow(b.clone(), Box::new(Nombre(2.0)))),
        ),

        Pow(u, v) => match v.as_ref() {
            // exposant constant : n·u^(n-1)·u'
            Nombre(n) => Mul(
                Box::new(Mul(
                    Box::new(Nombre(*n)),
                    Box::new(Pow(u.clone(), Box::new(Nombre(n - 1.0)))),
                )),
                Box::new(derivee(u)),
            ),
            // exposant général : u^v · (v'·ln u + v·u'/u)
            _ => Mul(
                Box::new(Pow(u.clone(), v.clone())),
                Box::new(Add(
                    Box::new(Mul(
                        Box::new(derivee(v)),
                        Box::new(Fct(self::Fct::Log, u.clone())),
                    )),
                    Box::new(Mul(
                        v.clone(),
                        Box::new(Div(Box::new(derivee(u)), u.clone())),
                    )),
                )),
            ),
        },

        Fct(f, u) => {
            let du = derivee(u);
            match f {
                self::Fct::Sin => Mul(Box::new(Fct(self::Fct::Cos, u.clone())), Box::new(du)),
                self::Fct::Cos => Mul(
                    Box::new(Sub(
                        Box::new(Nombre(0.0)),
                        Box::new(Fct(self::Fct::Sin, u.clone())),
                    )),
                    Box::new(du),
                ),
                self::Fct::Tan => Div(
                    Box::new(du),
                    Box::new(Pow(
                        Box::new(Fct(self::Fct::Cos, u.clone())),
                        Box::new(Nombre(2.0)),
                    )),
                ),
                self::Fct::Exp => Mul(Box::new(Fct(self::Fct::Exp, u.clone())), Box::new(du)),
                self::Fct::Log => Div(Box::new(du), u.clone()),
                self::Fct::Sqrt => Div(
                    Box::new(du),
                    Box::new(Mul(
                        Box::new(Nombre(2.0)),
                        Box::new(Fct(self::Fct::Sqrt, u.clone())),
                    )),
                ),
                self::Fct::Abs => Mul(
                    Box::new(Div(u.clone(), Box::new(Fct(self::Fct::Abs, u.clone())))),
                    Box::new(du),
                ),
            }
        }
    }
}
