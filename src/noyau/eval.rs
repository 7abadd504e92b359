//! Noyau — évaluation (pipeline réel)
//!
//! vérifs préliminaires -> tokenize -> RPN -> Expr -> évaluation f64
//!
//! Le pipeline est une fonction pure : aucun état retenu entre deux appels,
//! à part le registre (lecture seule). Jamais d’interpréteur dynamique :
//! tout identifiant hors du registre est rejeté (Nom) avant toute évaluation.

use super::erreur::ErreurEval;
use super::jetons::tokenize;
use super::registre;
use super::rpn::{from_rpn, to_rpn};

/// API publique : évalue une expression et retourne un f64 FINI.
///
/// `scientifique` autorise les fonctions du registre (sin, sqrt, …).
/// Les constantes pi / e sont disponibles dans les deux modes.
pub fn evaluer(entree: &str, scientifique: bool) -> Result<f64, ErreurEval> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe("entrée vide"));
    }

    // Équilibre des parenthèses AVANT tout le reste (comptage brut).
    let ouvrantes = s.chars().filter(|c| *c == '(').count();
    let fermantes = s.chars().filter(|c| *c == ')').count();
    if ouvrantes != fermantes {
        return Err(ErreurEval::syntaxe("parenthèses non équilibrées"));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons, scientifique)?;

    // 3) AST (Expr)
    let expr = from_rpn(&rpn)?;

    // 4) Évaluation (finitude garantie par l’arbre)
    expr.evaluer()
}

/// Application directe d’une fonction du registre (sans passer par le parse).
/// Utilisée par le contrôle “Appliquer la fonction” de l’UI.
pub fn appliquer_fonction(valeur: f64, nom: &str) -> Result<f64, ErreurEval> {
    let nom = nom.trim().to_lowercase();
    registre::appliquer(&nom, valeur)
}

/// Noms des fonctions du registre, dans un ordre stable (pour l’UI).
pub fn noms_fonctions() -> &'static [&'static str] {
    &registre::NOMS
}

#[cfg(test)]
mod tests {
    use super::{appliquer_fonction, evaluer, noms_fonctions};
    use crate::noyau::erreur::ErreurEval;

    fn ok(s: &str) -> f64 {
        evaluer(s, true).unwrap_or_else(|e| panic!("evaluer({s:?}) erreur: {e}"))
    }

    /// Tolérance relative 1e-9 (absolue près de zéro).
    fn assert_proche(obtenu: f64, attendu: f64) {
        let tol = 1e-9 * attendu.abs().max(1.0);
        assert!(
            (obtenu - attendu).abs() <= tol,
            "obtenu={obtenu} attendu={attendu}"
        );
    }

    // --- Arithmétique de base ---

    #[test]
    fn priorites() {
        assert_proche(ok("2+3*4"), 14.0);
        assert_proche(ok("(2+3)*4"), 20.0);
        assert_proche(ok("2^10"), 1024.0);
        assert_proche(ok("10-4-3"), 3.0); // associativité gauche
        assert_proche(ok("100/10/2"), 5.0);
        assert_proche(ok("2^3^2"), 512.0); // associativité droite
    }

    #[test]
    fn signes() {
        assert_proche(ok("-5+8"), 3.0);
        assert_proche(ok("-(2+3)"), -5.0);
        assert_proche(ok("--5"), 5.0);
        assert_proche(ok("2^-3"), 0.125);
        assert_proche(ok("-2^2"), 4.0); // le signe lie plus fort que ^
    }

    #[test]
    fn decimaux() {
        assert_proche(ok("3.5*2"), 7.0);
        assert_proche(ok(".5+.5"), 1.0);
    }

    #[test]
    fn constantes() {
        assert_proche(ok("pi"), std::f64::consts::PI);
        assert_proche(ok("2*pi"), 2.0 * std::f64::consts::PI);
        assert_proche(ok("e"), std::f64::consts::E);
        // disponibles aussi en mode basique
        assert_proche(evaluer("pi + e", false).unwrap(), {
            std::f64::consts::PI + std::f64::consts::E
        });
    }

    // --- Erreurs classées ---

    #[test]
    fn division_par_zero() {
        assert!(matches!(
            evaluer("10/0", true),
            Err(ErreurEval::Arithmetique(_))
        ));
        assert!(matches!(
            evaluer("1/(2-2)", true),
            Err(ErreurEval::Arithmetique(_))
        ));
    }

    #[test]
    fn entree_vide() {
        assert!(matches!(evaluer("", true), Err(ErreurEval::Syntaxe(_))));
        assert!(matches!(evaluer("   ", true), Err(ErreurEval::Syntaxe(_))));
    }

    #[test]
    fn parentheses_non_equilibrees() {
        assert!(matches!(
            evaluer("(2+3", true),
            Err(ErreurEval::Syntaxe(_))
        ));
        assert!(matches!(
            evaluer("2+3)", true),
            Err(ErreurEval::Syntaxe(_))
        ));
    }

    #[test]
    fn nom_inconnu() {
        assert!(matches!(evaluer("foo(1)", true), Err(ErreurEval::Nom(_))));
        assert!(matches!(evaluer("x + 1", true), Err(ErreurEval::Nom(_))));
    }

    #[test]
    fn operateur_pendant() {
        assert!(matches!(evaluer("2+", true), Err(ErreurEval::Syntaxe(_))));
        assert!(matches!(evaluer("2 3", true), Err(ErreurEval::Syntaxe(_))));
    }

    #[test]
    fn jamais_non_fini() {
        assert!(matches!(
            evaluer("10^400", true),
            Err(ErreurEval::Arithmetique(_))
        ));
        assert!(matches!(
            evaluer("(-2)^0.5", true),
            Err(ErreurEval::Arithmetique(_))
        ));
    }

    // --- Fonctions via le parse ---

    #[test]
    fn fonctions_scientifiques() {
        assert_proche(ok("sqrt(16)"), 4.0);
        assert_proche(ok("sin(0)"), 0.0);
        assert_proche(ok("sin(pi/2)"), 1.0);
        assert_proche(ok("log(e)"), 1.0);
        assert_proche(ok("log10(1000)"), 3.0);
        assert_proche(ok("factorial(5)"), 120.0);
        assert_proche(ok("sin(pi/6) + sqrt(16)"), 4.5);
        assert_proche(ok("sqrt(sqrt(16))"), 2.0);
    }

    #[test]
    fn mode_basique() {
        assert!(matches!(
            evaluer("sqrt(16)", false),
            Err(ErreurEval::Nom(_))
        ));
        assert_proche(evaluer("2+3*4", false).unwrap(), 14.0);
    }

    // --- Application directe ---

    #[test]
    fn application_directe() {
        assert_proche(appliquer_fonction(16.0, "sqrt").unwrap(), 4.0);
        assert_proche(appliquer_fonction(1.0, "asin").unwrap(), {
            std::f64::consts::FRAC_PI_2
        });
        assert!(matches!(
            appliquer_fonction(2.0, "asin"),
            Err(ErreurEval::Domaine(_))
        ));
        // normalisation comme le parse : casse + espaces
        assert_proche(appliquer_fonction(16.0, " SQRT ").unwrap(), 4.0);
    }

    #[test]
    fn liste_des_noms() {
        let noms = noms_fonctions();
        assert_eq!(noms.first(), Some(&"sin"));
        assert!(noms.contains(&"factorial"));
        // ordre stable entre deux appels
        assert_eq!(noms, noms_fonctions());
    }
}
