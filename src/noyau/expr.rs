// src/noyau/expr.rs
//
// AST numérique (f64) + évaluation.
// - Nombre  : littéral (les constantes pi/e sont déjà résolues en littéraux)
// - Unaire  : signe devant un primaire
// - Binaire : + - * / ^
// - Appel   : fonction du registre, un argument
//
// IMPORTANT (SAFE):
// - evaluer() ne retourne JAMAIS une valeur non finie : inf/NaN deviennent
//   une erreur Arithmetique au nœud qui les produit.
// - L’arbre appartient à UNE évaluation; rien n’est retenu entre deux appels.

use super::erreur::ErreurEval;
use super::registre;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(String, Box<Expr>),
}

impl Expr {
    /// Évaluation en profondeur d’abord (argument avant fonction).
    pub fn evaluer(&self) -> Result<f64, ErreurEval> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),

            Unaire(OpUnaire::Neg, x) => Ok(-x.evaluer()?),

            Binaire(op, a, b) => {
                let a = a.evaluer()?;
                let b = b.evaluer()?;

                let v = match op {
                    OpBinaire::Plus => a + b,
                    OpBinaire::Moins => a - b,
                    OpBinaire::Fois => a * b,
                    OpBinaire::Divise => {
                        if b == 0.0 {
                            return Err(ErreurEval::arithmetique("division par zéro"));
                        }
                        a / b
                    }
                    OpBinaire::Puissance => {
                        // pas de résultat complexe : base négative exige un
                        // exposant entier
                        if a < 0.0 && b.fract() != 0.0 {
                            return Err(ErreurEval::arithmetique(format!(
                                "exposant non entier ({b}) pour base négative ({a})"
                            )));
                        }
                        a.powf(b)
                    }
                };

                fini(v)
            }

            Appel(nom, arg) => {
                let x = arg.evaluer()?;
                registre::appliquer(nom, x)
            }
        }
    }
}

/// Garde de finitude : inf/NaN ne sortent jamais d’un nœud.
fn fini(v: f64) -> Result<f64, ErreurEval> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::arithmetique("résultat non fini"))
    }
}

#[cfg(test)]
mod tests {
    use super::{Expr, OpBinaire, OpUnaire};
    use crate::noyau::erreur::ErreurEval;

    fn num(v: f64) -> Box<Expr> {
        Box::new(Expr::Nombre(v))
    }

    #[test]
    fn division_par_zero() {
        let e = Expr::Binaire(OpBinaire::Divise, num(10.0), num(0.0));
        assert!(matches!(e.evaluer(), Err(ErreurEval::Arithmetique(_))));
    }

    #[test]
    fn puissance_base_negative() {
        // (-2)^0.5 refusé, (-2)^3 accepté
        let e = Expr::Binaire(OpBinaire::Puissance, num(-2.0), num(0.5));
        assert!(matches!(e.evaluer(), Err(ErreurEval::Arithmetique(_))));

        let e = Expr::Binaire(OpBinaire::Puissance, num(-2.0), num(3.0));
        assert_eq!(e.evaluer().unwrap(), -8.0);
    }

    #[test]
    fn debordement_en_erreur() {
        // 10^400 déborde f64 => erreur au nœud, pas inf propagé
        let e = Expr::Binaire(OpBinaire::Puissance, num(10.0), num(400.0));
        assert!(matches!(e.evaluer(), Err(ErreurEval::Arithmetique(_))));
    }

    #[test]
    fn signe_unaire() {
        let e = Expr::Unaire(OpUnaire::Neg, num(5.0));
        assert_eq!(e.evaluer().unwrap(), -5.0);
    }
}
