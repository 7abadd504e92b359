// src/noyau/registre.rs
//
// Registre FERMÉ des fonctions scientifiques.
// - catalogue fixe : aucune inscription de fonction externe, ni maintenant
//   ni plus tard (c’est le point qui évite de rouvrir l’exécution arbitraire)
// - chaque fonction : f64 -> f64, garde de domaine évaluée AVANT le calcul
// - entrée non finie refusée, sortie non finie convertie en erreur
//
// Les constantes pi / e ne vivent PAS ici : elles sont résolues par le
// lexing/parsing comme littéraux (voir jetons.rs / rpn.rs).

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::erreur::ErreurEval;

/// Noms des fonctions, dans l’ordre d’affichage UI (stable).
pub const NOMS: [&str; 13] = [
    "sin",
    "cos",
    "tan",
    "asin",
    "acos",
    "atan",
    "sqrt",
    "log",
    "log10",
    "exp",
    "factorial",
    "degrees",
    "radians",
];

/// Identificateurs reconnus comme fonctions (unaire).
pub fn est_enregistree(nom: &str) -> bool {
    NOMS.contains(&nom)
}

/// Applique `nom` à `x`, garde de domaine comprise.
///
/// Contrat :
/// - argument non fini  => Arithmetique (avant tout calcul)
/// - hors domaine       => Domaine
/// - résultat non fini  => Arithmetique (jamais retourné tel quel)
pub fn appliquer(nom: &str, x: f64) -> Result<f64, ErreurEval> {
    if !x.is_finite() {
        return Err(ErreurEval::arithmetique(format!(
            "argument non fini pour {nom}"
        )));
    }

    let v = match nom {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),

        "asin" => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(ErreurEval::domaine(format!(
                    "asin : argument hors de [-1, 1] : {x}"
                )));
            }
            x.asin()
        }
        "acos" => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(ErreurEval::domaine(format!(
                    "acos : argument hors de [-1, 1] : {x}"
                )));
            }
            x.acos()
        }
        "atan" => x.atan(),

        "sqrt" => {
            if x < 0.0 {
                return Err(ErreurEval::domaine(format!("sqrt : argument négatif : {x}")));
            }
            x.sqrt()
        }

        // log = logarithme népérien (log10 pour la base 10)
        "log" => {
            if x <= 0.0 {
                return Err(ErreurEval::domaine(format!(
                    "log : argument non strictement positif : {x}"
                )));
            }
            x.ln()
        }
        "log10" => {
            if x <= 0.0 {
                return Err(ErreurEval::domaine(format!(
                    "log10 : argument non strictement positif : {x}"
                )));
            }
            x.log10()
        }

        "exp" => x.exp(),

        "factorial" => factorielle(x)?,

        "degrees" => x.to_degrees(),
        "radians" => x.to_radians(),

        _ => return Err(ErreurEval::nom(nom)),
    };

    if !v.is_finite() {
        return Err(ErreurEval::arithmetique(format!(
            "{nom} : résultat non fini"
        )));
    }
    Ok(v)
}

/// n! exact via BigUint, converti une seule fois en f64.
///
/// Domaine : entier EXACT et >= 0 (fract() == 0.0, pas de tolérance —
/// un flottant “presque entier” est refusé).
/// Borne : n <= 170, car 171! dépasse f64::MAX.
fn factorielle(x: f64) -> Result<f64, ErreurEval> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurEval::domaine(format!(
            "factorial : entier non négatif attendu : {x}"
        )));
    }
    if x > 170.0 {
        return Err(ErreurEval::arithmetique(format!(
            "factorial : {x} trop grand (171! dépasse f64)"
        )));
    }

    let n = x as u64;
    let mut acc = BigUint::one();
    for k in 2..=n {
        acc *= k;
    }

    acc.to_f64()
        .ok_or_else(|| ErreurEval::arithmetique("factorial : résultat non fini"))
}

#[cfg(test)]
mod tests {
    use super::{appliquer, est_enregistree, NOMS};
    use crate::noyau::erreur::ErreurEval;

    #[test]
    fn catalogue_ferme() {
        assert!(est_enregistree("sin"));
        assert!(est_enregistree("factorial"));
        assert!(!est_enregistree("eval"));
        assert!(!est_enregistree("abs"));
        assert_eq!(NOMS.len(), 13);
    }

    #[test]
    fn gardes_arc() {
        assert!(matches!(appliquer("asin", 2.0), Err(ErreurEval::Domaine(_))));
        assert!(matches!(appliquer("acos", -1.5), Err(ErreurEval::Domaine(_))));
        // bornes incluses
        assert!(appliquer("asin", 1.0).is_ok());
        assert!(appliquer("acos", -1.0).is_ok());
    }

    #[test]
    fn gardes_log_sqrt() {
        assert!(matches!(appliquer("sqrt", -1.0), Err(ErreurEval::Domaine(_))));
        assert!(matches!(appliquer("log", 0.0), Err(ErreurEval::Domaine(_))));
        assert!(matches!(appliquer("log10", -3.0), Err(ErreurEval::Domaine(_))));
        assert_eq!(appliquer("sqrt", 16.0).unwrap(), 4.0);
    }

    #[test]
    fn factorielle_exacte() {
        assert_eq!(appliquer("factorial", 0.0).unwrap(), 1.0);
        assert_eq!(appliquer("factorial", 5.0).unwrap(), 120.0);
        assert_eq!(appliquer("factorial", 10.0).unwrap(), 3_628_800.0);

        // entier exact exigé, pas de tolérance
        assert!(matches!(
            appliquer("factorial", 3.5),
            Err(ErreurEval::Domaine(_))
        ));
        assert!(matches!(
            appliquer("factorial", -3.0),
            Err(ErreurEval::Domaine(_))
        ));
        assert!(matches!(
            appliquer("factorial", 5.000000001),
            Err(ErreurEval::Domaine(_))
        ));

        // 170! fini, 171! refusé avant calcul
        assert!(appliquer("factorial", 170.0).unwrap().is_finite());
        assert!(matches!(
            appliquer("factorial", 171.0),
            Err(ErreurEval::Arithmetique(_))
        ));
    }

    #[test]
    fn sortie_non_finie_convertie() {
        // exp(1000) déborde f64 => erreur, jamais inf
        assert!(matches!(
            appliquer("exp", 1000.0),
            Err(ErreurEval::Arithmetique(_))
        ));
    }

    #[test]
    fn entree_non_finie_refusee() {
        assert!(matches!(
            appliquer("sin", f64::NAN),
            Err(ErreurEval::Arithmetique(_))
        ));
        assert!(matches!(
            appliquer("cos", f64::INFINITY),
            Err(ErreurEval::Arithmetique(_))
        ));
    }

    #[test]
    fn nom_inconnu() {
        assert!(matches!(appliquer("foo", 1.0), Err(ErreurEval::Nom(_))));
    }
}
