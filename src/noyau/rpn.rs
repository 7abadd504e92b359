// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name): doit être une fonction du registre, ET le mode scientifique
//   doit être actif — sinon erreur Nom (même réponse que pour un inconnu).
//   Un appel exige la forme name '(' expression ')'.
// - Constantes: Pi / E sortent directement en littéraux f64.
// - Signe unaire: si '-' (ou '+') arrive quand on n’attend PAS une valeur,
//   c’est un signe. Il lie plus fort que '^' : -2^2 = (-2)^2.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::ErreurEval;
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::Tok;
use super::registre;

/// Élément de la notation postfixe (sortie du shunting-yard).
#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Nombre(f64),
    Op(OpBinaire),
    MoinsUnaire,
    Fonction(String),
}

/// Pile d’opérateurs du shunting-yard.
#[derive(Clone, Debug, PartialEq)]
enum PileOp {
    Par, // '('
    Op(OpBinaire),
    MoinsUnaire,
    Fonction(String),
}

fn precedence(op: &PileOp) -> i32 {
    match op {
        PileOp::Op(OpBinaire::Plus | OpBinaire::Moins) => 1,
        PileOp::Op(OpBinaire::Fois | OpBinaire::Divise) => 2,
        PileOp::Op(OpBinaire::Puissance) => 3,
        PileOp::MoinsUnaire => 4,
        PileOp::Par | PileOp::Fonction(_) => 0,
    }
}

fn est_associatif_droite(op: &PileOp) -> bool {
    matches!(op, PileOp::Op(OpBinaire::Puissance) | PileOp::MoinsUnaire)
}

fn op_binaire(t: &Tok) -> Option<OpBinaire> {
    match t {
        Tok::Plus => Some(OpBinaire::Plus),
        Tok::Minus => Some(OpBinaire::Moins),
        Tok::Star => Some(OpBinaire::Fois),
        Tok::Slash => Some(OpBinaire::Divise),
        Tok::Caret => Some(OpBinaire::Puissance),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Nombre(π), Nombre(2), Op(Divise), Fonction("sin")]
pub fn to_rpn(tokens: &[Tok], scientifique: bool) -> Result<Vec<ElemRpn>, ErreurEval> {
    let mut out: Vec<ElemRpn> = Vec::new();
    let mut ops: Vec<PileOp> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le signe unaire.
    let mut prev_was_value = false;

    // Une fonction vient d’être empilée : le jeton suivant DOIT être '('.
    let mut fonction_en_attente: Option<String> = None;

    for tok in tokens.iter().cloned() {
        if let Some(nom) = fonction_en_attente.take() {
            if !matches!(tok, Tok::LPar) {
                return Err(ErreurEval::syntaxe(format!(
                    "appel de fonction sans parenthèse : {nom}"
                )));
            }
        }

        match tok {
            Tok::Num(v) => {
                out.push(ElemRpn::Nombre(v));
                prev_was_value = true;
            }

            // Constantes => littéraux, dès la construction.
            Tok::Pi => {
                out.push(ElemRpn::Nombre(std::f64::consts::PI));
                prev_was_value = true;
            }
            Tok::E => {
                out.push(ElemRpn::Nombre(std::f64::consts::E));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                // Catalogue fermé : tout le reste est rejeté ici, jamais
                // transmis à un interpréteur quelconque.
                if !registre::est_enregistree(&name) || !scientifique {
                    return Err(ErreurEval::nom(name));
                }
                fonction_en_attente = Some(name.clone());
                ops.push(PileOp::Fonction(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(PileOp::Par);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut trouve = false;
                while let Some(top) = ops.pop() {
                    match top {
                        PileOp::Par => {
                            trouve = true;
                            break;
                        }
                        autre => out.push(sortie(autre)),
                    }
                }
                if !trouve {
                    return Err(ErreurEval::syntaxe("parenthèse fermante inattendue"));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(PileOp::Fonction(_))) {
                    if let Some(PileOp::Fonction(nom)) = ops.pop() {
                        out.push(ElemRpn::Fonction(nom));
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // Signe unaire ?
                if !prev_was_value {
                    match tok {
                        Tok::Plus => continue, // '+' unaire : neutre
                        Tok::Minus => {
                            // lie plus fort que '^' et s’empile tel quel
                            // (associatif droite : --x ne dépile pas)
                            ops.push(PileOp::MoinsUnaire);
                            continue;
                        }
                        _ => {
                            return Err(ErreurEval::syntaxe(
                                "opérateur sans opérande à sa gauche",
                            ))
                        }
                    }
                }

                let op = match op_binaire(&tok) {
                    Some(op) => op,
                    None => unreachable!("jeton opérateur déjà filtré"),
                };
                let nouveau = PileOp::Op(op);

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (collée à son argument)
                // - et la précédence/associativité exige de sortir le sommet
                while let Some(top) = ops.last() {
                    if matches!(top, PileOp::Par | PileOp::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_nouveau = precedence(&nouveau);

                    let doit_pop = if est_associatif_droite(&nouveau) {
                        p_top > p_nouveau
                    } else {
                        p_top >= p_nouveau
                    };

                    if doit_pop {
                        if let Some(op) = ops.pop() {
                            out.push(sortie(op));
                        }
                    } else {
                        break;
                    }
                }

                ops.push(nouveau);
                prev_was_value = false;
            }
        }
    }

    if let Some(nom) = fonction_en_attente {
        return Err(ErreurEval::syntaxe(format!(
            "appel de fonction sans parenthèse : {nom}"
        )));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, PileOp::Par) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(sortie(op));
    }

    Ok(out)
}

/// PileOp -> ElemRpn (jamais appelé sur Par).
fn sortie(op: PileOp) -> ElemRpn {
    match op {
        PileOp::Op(b) => ElemRpn::Op(b),
        PileOp::MoinsUnaire => ElemRpn::MoinsUnaire,
        PileOp::Fonction(nom) => ElemRpn::Fonction(nom),
        PileOp::Par => unreachable!("'(' filtrée par l’appelant"),
    }
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for elem in rpn.iter().cloned() {
        match elem {
            ElemRpn::Nombre(v) => st.push(Expr::Nombre(v)),

            ElemRpn::Op(op) => {
                let b = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                let a = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                st.push(Expr::Binaire(op, Box::new(a), Box::new(b)));
            }

            ElemRpn::MoinsUnaire => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("signe sans opérande"))?;
                st.push(Expr::Unaire(OpUnaire::Neg, Box::new(x)));
            }

            ElemRpn::Fonction(nom) => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("fonction sans argument"))?;
                st.push(Expr::Appel(nom, Box::new(x)));
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurEval::syntaxe("expression invalide"));
    }
    st.pop()
        .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))
}

#[cfg(test)]
mod tests {
    use super::{from_rpn, to_rpn, ElemRpn};
    use crate::noyau::erreur::ErreurEval;
    use crate::noyau::expr::{Expr, OpBinaire, OpUnaire};
    use crate::noyau::jetons::tokenize;

    fn parse(s: &str) -> Result<Expr, ErreurEval> {
        let toks = tokenize(s)?;
        from_rpn(&to_rpn(&toks, true)?)
    }

    #[test]
    fn precedence_mul_sur_add() {
        let toks = tokenize("2+3*4").unwrap();
        let rpn = to_rpn(&toks, true).unwrap();
        assert_eq!(
            rpn,
            vec![
                ElemRpn::Nombre(2.0),
                ElemRpn::Nombre(3.0),
                ElemRpn::Nombre(4.0),
                ElemRpn::Op(OpBinaire::Fois),
                ElemRpn::Op(OpBinaire::Plus),
            ]
        );
    }

    #[test]
    fn puissance_associative_droite() {
        // 2^3^2 = 2^(3^2)
        let toks = tokenize("2^3^2").unwrap();
        let rpn = to_rpn(&toks, true).unwrap();
        assert_eq!(
            rpn,
            vec![
                ElemRpn::Nombre(2.0),
                ElemRpn::Nombre(3.0),
                ElemRpn::Nombre(2.0),
                ElemRpn::Op(OpBinaire::Puissance),
                ElemRpn::Op(OpBinaire::Puissance),
            ]
        );
    }

    #[test]
    fn signe_unaire_lie_plus_fort_que_puissance() {
        // -2^2 = (-2)^2
        let e = parse("-2^2").unwrap();
        assert_eq!(
            e,
            Expr::Binaire(
                OpBinaire::Puissance,
                Box::new(Expr::Unaire(OpUnaire::Neg, Box::new(Expr::Nombre(2.0)))),
                Box::new(Expr::Nombre(2.0)),
            )
        );

        // 2^-3 = 2^(-3)
        let e = parse("2^-3").unwrap();
        assert_eq!(
            e,
            Expr::Binaire(
                OpBinaire::Puissance,
                Box::new(Expr::Nombre(2.0)),
                Box::new(Expr::Unaire(OpUnaire::Neg, Box::new(Expr::Nombre(3.0)))),
            )
        );
    }

    #[test]
    fn fonction_collee_a_son_argument() {
        let e = parse("sin(1)+2").unwrap();
        assert_eq!(
            e,
            Expr::Binaire(
                OpBinaire::Plus,
                Box::new(Expr::Appel("sin".to_string(), Box::new(Expr::Nombre(1.0)))),
                Box::new(Expr::Nombre(2.0)),
            )
        );
    }

    #[test]
    fn fonction_exige_parenthese() {
        assert!(matches!(parse("sin 1"), Err(ErreurEval::Syntaxe(_))));
        assert!(matches!(parse("sqrt"), Err(ErreurEval::Syntaxe(_))));
    }

    #[test]
    fn nom_inconnu_rejete() {
        assert!(matches!(parse("foo(1)"), Err(ErreurEval::Nom(_))));
        assert!(matches!(parse("import_os"), Err(ErreurEval::Nom(_))));
    }

    #[test]
    fn mode_basique_rejette_les_fonctions() {
        let toks = tokenize("sqrt(16)").unwrap();
        assert!(matches!(to_rpn(&toks, false), Err(ErreurEval::Nom(_))));

        // … mais pas les constantes
        let toks = tokenize("2*pi").unwrap();
        assert!(to_rpn(&toks, false).is_ok());
    }

    #[test]
    fn parentheses_desordonnees() {
        // équilibre global correct, ordre faux
        let toks = tokenize(")(").unwrap();
        assert!(matches!(
            to_rpn(&toks, true),
            Err(ErreurEval::Syntaxe(_))
        ));
    }

    #[test]
    fn operateur_pendant() {
        assert!(matches!(parse("2+"), Err(ErreurEval::Syntaxe(_))));
        assert!(matches!(parse("*2"), Err(ErreurEval::Syntaxe(_))));
        assert!(matches!(parse("()"), Err(ErreurEval::Syntaxe(_))));
    }
}
