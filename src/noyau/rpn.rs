// src/noyau/rpn.rs
//
// Multiplication implicite -> Shunting-yard -> RPN -> AST
// Objectif:
// - Insérer les '*' implicites (2x, 2sin(x), x(x+1), (x)(x))
// - Convertir la suite de Tok en RPN (postfix)
// - Puis reconstruire Expr sous la table de symboles FERMÉE
//
// Table de symboles (fermée, immuable) :
// - fonctions : sin, cos, tan, exp, log, sqrt, abs / Abs
// - constantes : pi, E
// - variable : x
// - tout autre identifiant => erreur de parsing
//
// Règles:
// - Moins unaire:
//    - si '-' arrive quand on n'attend PAS une valeur, on injecte 0 : "-x" => "0 x -"
//    - il est empilé SANS dépiler (l'opérateur du sommet attend encore son
//      opérande) et porte sa propre précédence : plus serré que '*' et '/',
//      moins serré que '^'. Donc -x^2 = -(x^2), x^-2*3 = (x^-2)*3, 2*-x = -2x.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sont sorties après la parenthèse fermante.

use super::expr::{Expr, Fct};
use super::jetons::Tok;

/// Pile d'opérateurs du shunting-yard : les jetons binaires + '(' + fonctions,
/// et le moins unaire (même jeton Minus en sortie, précédence distincte).
#[derive(Clone, Debug, PartialEq)]
enum Op {
    Jeton(Tok),
    MoinsUnaire,
}

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn precedence_op(op: &Op) -> i32 {
    match op {
        Op::Jeton(t) => precedence(t),
        Op::MoinsUnaire => 3,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Sort un opérateur de la pile vers la RPN.
/// Le moins unaire redevient un Minus ordinaire : son 0 est déjà injecté.
fn sortir(op: Op, out: &mut Vec<Tok>) {
    match op {
        Op::Jeton(t) => out.push(t),
        Op::MoinsUnaire => out.push(Tok::Minus),
    }
}

/// Identificateurs reconnus comme fonctions (unaires).
pub(crate) fn fonction_ident(name: &str) -> Option<Fct> {
    match name {
        "sin" => Some(Fct::Sin),
        "cos" => Some(Fct::Cos),
        "tan" => Some(Fct::Tan),
        "exp" => Some(Fct::Exp),
        "log" => Some(Fct::Log),
        "sqrt" => Some(Fct::Sqrt),
        "abs" | "Abs" => Some(Fct::Abs),
        _ => None,
    }
}

fn is_fonction_ident(name: &str) -> bool {
    fonction_ident(name).is_some()
}

/// Insère les multiplications implicites.
///
/// Un '*' est injecté entre `a` et `b` quand `a` termine une valeur
/// (nombre, ')' ou identifiant non-fonction) et `b` en commence une
/// (nombre, identifiant ou '(').
///
/// Exemples:
///   "2x"      => 2 * x
///   "2sin(x)" => 2 * sin(x)
///   "x(x+1)"  => x * (x+1)
pub fn inserer_mult_implicite(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(jetons.len());

    for tok in jetons {
        let inserer = match (out.last(), &tok) {
            (Some(Tok::Num(_)) | Some(Tok::RPar), Tok::Num(_) | Tok::Ident(_) | Tok::LPar) => true,
            (Some(Tok::Ident(prev)), Tok::Num(_) | Tok::Ident(_) | Tok::LPar) => {
                // une fonction reste collée à sa parenthèse : sin(x), pas sin*(x)
                !is_fonction_ident(prev)
            }
            _ => false,
        };

        if inserer {
            out.push(Tok::Star);
        }
        out.push(tok);
    }

    out
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("x"), RPar, Slash, Ident("x")]
///   rpn:    [Ident("x"), Ident("sin"), Ident("x"), Slash]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Op::Jeton(Tok::Ident(name)));
                    prev_was_value = false;
                } else {
                    // variable/constante : sortie directe
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(Op::Jeton(tok));
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                let mut trouve = false;
                while let Some(top) = ops.pop() {
                    if top == Op::Jeton(Tok::LPar) {
                        trouve = true;
                        break;
                    }
                    sortir(top, &mut out);
                }
                if !trouve {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Op::Jeton(Tok::Ident(name))) = ops.last() {
                    if is_fonction_ident(name.as_str()) {
                        sortir(ops.pop().unwrap(), &mut out);
                    }
                }

                prev_was_value = true;
            }

            // moins unaire (préfixe) : injecte 0 et empile SANS dépiler.
            // L'opérateur du sommet attend encore son opérande droit, le
            // sortir ici le priverait de cet opérande (x^-2 deviendrait
            // (x^0)-2). Sa précédence propre s'applique aux opérateurs
            // binaires suivants via precedence_op.
            Tok::Minus if !prev_was_value => {
                out.push(Tok::Num(0.0));
                ops.push(Op::MoinsUnaire);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if let Op::Jeton(t) = top {
                        if matches!(t, Tok::LPar) {
                            break;
                        }
                        if let Tok::Ident(name) = t {
                            if is_fonction_ident(name.as_str()) {
                                break;
                            }
                        }
                    }

                    let p_top = precedence_op(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        sortir(ops.pop().unwrap(), &mut out);
                    } else {
                        break;
                    }
                }

                ops.push(Op::Jeton(tok));
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op == Op::Jeton(Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        sortir(op, &mut out);
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN, sous la table de symboles fermée.
///
/// - Ident(name):
///     - fonction connue => noeud Fct
///     - "pi" => Pi ; "E" => Euler ; "x" => X
///     - sinon => erreur (identifiant inconnu)
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::Ident(name) => {
                if let Some(f) = fonction_ident(name.as_str()) {
                    let x = st.pop().ok_or("fonction sans argument")?;
                    st.push(Expr::Fct(f, Box::new(x)));
                } else {
                    match name.as_str() {
                        "x" => st.push(Expr::X),
                        "pi" => st.push(Expr::Pi),
                        "E" => st.push(Expr::Euler),
                        _ => return Err(format!("identifiant inconnu : '{name}'")),
                    }
                }
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    Ok(st.pop().unwrap())
}
