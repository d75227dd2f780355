// src/noyau/jetons.rs

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes + variable (tout ce qui n'est pas opérateur / nombre)
    // NOTE: le parse (RPN->Expr) décidera si c'est une fonction (sin/cos/...),
    //       une constante (pi/E), la variable x, ou un identifiant inconnu (erreur).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou ** (normalisés tous deux en exposant)

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, 3.25)
/// - opérateurs + - * / ^ (et ** comme synonyme de ^)
/// - parenthèses ( )
/// - π ou pi (insensible à la casse)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (casse conservée : E, Abs)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = exposant (pré-normalisation : même jeton que '^')
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // π (équivaut à ident("pi"))
        if c == 'π' {
            out.push(Tok::Ident("pi".to_string()));
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            // "pi"/"PI"/"Pi" => ident("pi") ; sinon casse conservée (E, Abs…)
            if word.eq_ignore_ascii_case("pi") {
                out.push(Tok::Ident("pi".to_string()));
            } else {
                out.push(Tok::Ident(word));
            }
            continue;
        }

        // Nombre décimal : chiffres, point optionnel, chiffres
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                // point décimal seulement s'il est suivi d'un chiffre
                if i + 1 < chars.len() && chars[i + 1].is_ascii_digit() {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let num_str: String = chars[start..i].iter().collect();
            let v: f64 = num_str
                .parse()
                .map_err(|_| format!("nombre invalide : '{num_str}'"))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(format!("caractère inattendu : '{c}'"));
    }

    Ok(out)
}

/// Format utilitaire (debug/journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
