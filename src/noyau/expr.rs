// src/noyau/expr.rs
//
// AST symbolique sur une seule variable libre x.
// - Nombre : constante flottante
// - Pi / Euler : constantes nommées (π, e)
// - X : la variable
// - Fct : fonction unaire du vocabulaire fermé (sin, cos, tan, exp, log, sqrt, abs)
// - Add/Sub/Mul/Div/Pow : opérateurs binaires
//
// IMPORTANT:
// - L'arbre est une union étiquetée explicite : jamais d'évaluation de texte
//   comme code hôte.
// - simplify() reste locale et prudente : pliage de constantes + identités
//   triviales, sans réécriture heuristique.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fct {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl Fct {
    pub fn nom(&self) -> &'static str {
        match self {
            Fct::Sin => "sin",
            Fct::Cos => "cos",
            Fct::Tan => "tan",
            Fct::Exp => "exp",
            Fct::Log => "log",
            Fct::Sqrt => "sqrt",
            Fct::Abs => "abs",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Pi,
    Euler,

    X,

    Fct(Fct, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Simplification locale, sans heuristiques.
    /// Objectif: plier les constantes et retirer les identités triviales
    /// (surtout utile pour nettoyer les dérivées symboliques).
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            // Feuilles: rien à faire
            Nombre(_) | Pi | Euler | X => self,

            Fct(f, x) => Fct(f, Box::new(x.simplify())),

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Nombre(x), Nombre(y)) => Nombre(x + y),
                    (Nombre(x), _) if *x == 0.0 => b,
                    (_, Nombre(y)) if *y == 0.0 => a,
                    _ => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Nombre(x), Nombre(y)) => Nombre(x - y),
                    (_, Nombre(y)) if *y == 0.0 => a,
                    // 0 - b => on garde Sub(0,b) (forme du moins unaire)
                    _ => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Nombre(x), Nombre(y)) => Nombre(x * y),
                    (Nombre(x), _) if *x == 0.0 => Nombre(0.0),
                    (_, Nombre(y)) if *y == 0.0 => Nombre(0.0),
                    (Nombre(x), _) if *x == 1.0 => b,
                    (_, Nombre(y)) if *y == 1.0 => a,
                    _ => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    // division par zéro : on garde symbolique (l'évaluation
                    // produira NaN/inf, c'est une donnée, pas une erreur)
                    (_, Nombre(y)) if *y == 0.0 => Div(Box::new(a), Box::new(b)),
                    (Nombre(x), Nombre(y)) => Nombre(x / y),
                    (_, Nombre(y)) if *y == 1.0 => a,
                    _ => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (_, Nombre(y)) if *y == 0.0 => Nombre(1.0),
                    (_, Nombre(y)) if *y == 1.0 => a,
                    (Nombre(x), Nombre(y)) => Nombre(x.powf(*y)),
                    _ => Pow(Box::new(a), Box::new(b)),
                }
            }
        }
    }

    /// Profondeur de l'arbre (itérative, garde-fou compilation).
    pub fn profondeur(&self) -> usize {
        let mut pile: Vec<(&Expr, usize)> = vec![(self, 1)];
        let mut max = 0usize;

        while let Some((e, p)) = pile.pop() {
            if p > max {
                max = p;
            }
            match e {
                Expr::Nombre(_) | Expr::Pi | Expr::Euler | Expr::X => {}
                Expr::Fct(_, x) => pile.push((x.as_ref(), p + 1)),
                Expr::Add(a, b)
                | Expr::Sub(a, b)
                | Expr::Mul(a, b)
                | Expr::Div(a, b)
                | Expr::Pow(a, b) => {
                    pile.push((a.as_ref(), p + 1));
                    pile.push((b.as_ref(), p + 1));
                }
            }
        }

        max
    }
}

/* ------------------------ Affichage debug (journal / tests) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(v) => write!(f, "{v}"),
            Pi => write!(f, "π"),
            Euler => write!(f, "e"),
            X => write!(f, "x"),
            Fct(fct, x) => write!(f, "{}({x})", fct.nom()),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a})^({b})"),
        }
    }
}
