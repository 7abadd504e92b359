// src/noyau/jetons.rs

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes résolues au lexing (jamais par substitution de texte).
    Pi,
    E,

    // Tout mot qui n’est pas pi / e / opérateur / nombre.
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction du registre.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π ou pi, e (constantes, reconnues comme mots entiers — un `e` dans
///   `exp` n’est jamais touché)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
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
                out.push(Tok::Star);
                i += 1;
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

        // π : glyphe direct (le pavé virtuel insère le symbole tel quel)
        if c == 'π' {
            out.push(Tok::Pi);
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
        // Les constantes pi / e sont résolues ici, sur le mot ENTIER.
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::E),
                _ => out.push(Tok::Ident(w)),
            }
            continue;
        }

        // Nombre décimal : chiffres [. chiffres] — ou .5
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let num_str: String = chars[start..i].iter().collect();
            let v: f64 = num_str
                .parse()
                .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide : '{num_str}'")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Tok};

    #[test]
    fn nombres_et_operateurs() {
        let toks = tokenize("2 + 3.5*4").unwrap();
        assert_eq!(
            toks,
            vec![
                Tok::Num(2.0),
                Tok::Plus,
                Tok::Num(3.5),
                Tok::Star,
                Tok::Num(4.0),
            ]
        );
    }

    #[test]
    fn constantes_mots_entiers() {
        // `e` seul est une constante; `exp` reste un identifiant intact.
        let toks = tokenize("e + exp(1) + PI + π").unwrap();
        assert_eq!(
            toks,
            vec![
                Tok::E,
                Tok::Plus,
                Tok::Ident("exp".to_string()),
                Tok::LPar,
                Tok::Num(1.0),
                Tok::RPar,
                Tok::Plus,
                Tok::Pi,
                Tok::Plus,
                Tok::Pi,
            ]
        );
    }

    #[test]
    fn racine_unicode() {
        let toks = tokenize("√(2)").unwrap();
        assert_eq!(
            toks,
            vec![
                Tok::Ident("sqrt".to_string()),
                Tok::LPar,
                Tok::Num(2.0),
                Tok::RPar,
            ]
        );
    }

    #[test]
    fn point_initial() {
        let toks = tokenize(".5").unwrap();
        assert_eq!(toks, vec![Tok::Num(0.5)]);
    }

    #[test]
    fn caractere_interdit() {
        assert!(tokenize("2 + $").is_err());
        assert!(tokenize("import os").is_ok()); // lexé en identifiants… rejetés plus loin (Nom)
    }
}
