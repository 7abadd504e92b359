//! Tests scientifiques (campagne) : fonctions du registre + gardes de domaine.
//!
//! But : couvrir chaque fonction du catalogue, dans les deux chemins
//! (expression parsée ET application directe), avec la même tolérance.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Tolérance relative 1e-9 (absolue près de zéro).
//! - `log` est le logarithme NÉPÉRIEN (log10 pour la base 10).
//! - factorial exige un entier EXACT (fract() == 0.0, aucune tolérance) :
//!   un flottant “presque entier” est hors domaine.
//! - Les sorties non finies (exp(1000), 171!) sont des erreurs Arithmetique,
//!   jamais des valeurs retournées.

use super::erreur::ErreurEval;
use super::eval::{appliquer_fonction, evaluer, noms_fonctions};

use std::f64::consts::{E, FRAC_PI_2, PI};

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr, true).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(obtenu: f64, attendu: f64) {
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!(
        (obtenu - attendu).abs() <= tol,
        "obtenu={obtenu} attendu={attendu}"
    );
}

fn assert_domaine(expr: &str) {
    match evaluer(expr, true) {
        Err(ErreurEval::Domaine(_)) => {}
        autre => panic!("expr={expr:?} : Domaine attendu, obtenu {autre:?}"),
    }
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_trig_directe() {
    assert_proche(eval_ok("sin(pi/2)"), 1.0);
    assert_proche(eval_ok("cos(pi)"), -1.0);
    assert_proche(eval_ok("tan(pi/4)"), 1.0);
    assert_proche(eval_ok("sin(pi/6)"), 0.5);
    assert_proche(eval_ok("cos(pi/3)"), 0.5);
}

#[test]
fn sci_trig_inverse() {
    assert_proche(eval_ok("asin(1)"), FRAC_PI_2);
    assert_proche(eval_ok("acos(0)"), FRAC_PI_2);
    assert_proche(eval_ok("atan(1)"), PI / 4.0);
    assert_proche(eval_ok("asin(-1)"), -FRAC_PI_2);
}

#[test]
fn sci_trig_inverse_hors_domaine() {
    assert_domaine("asin(2)");
    assert_domaine("asin(-1.0000001)");
    assert_domaine("acos(1.5)");
    // atan : tout réel est admis
    assert!(evaluer("atan(1000000)", true).is_ok());
}

#[test]
fn sci_conversions_angles() {
    assert_proche(eval_ok("degrees(pi)"), 180.0);
    assert_proche(eval_ok("radians(180)"), PI);
    // aller-retour
    assert_proche(eval_ok("degrees(radians(37.5))"), 37.5);
}

/* ------------------------ Racines, logs, exp ------------------------ */

#[test]
fn sci_sqrt() {
    assert_proche(eval_ok("sqrt(16)"), 4.0);
    assert_proche(eval_ok("sqrt(2)"), 2.0_f64.sqrt());
    assert_proche(eval_ok("sqrt(0)"), 0.0);
    assert_domaine("sqrt(-1)");
}

#[test]
fn sci_logs() {
    assert_proche(eval_ok("log(e)"), 1.0);
    assert_proche(eval_ok("log(1)"), 0.0);
    assert_proche(eval_ok("log10(1000)"), 3.0);
    assert_domaine("log(0)");
    assert_domaine("log(-2)");
    assert_domaine("log10(0)");
}

#[test]
fn sci_exp() {
    assert_proche(eval_ok("exp(0)"), 1.0);
    assert_proche(eval_ok("exp(1)"), E);
    assert_proche(eval_ok("log(exp(3))"), 3.0);
    // débordement => Arithmetique, pas inf
    assert!(matches!(
        evaluer("exp(1000)", true),
        Err(ErreurEval::Arithmetique(_))
    ));
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle() {
    assert_proche(eval_ok("factorial(0)"), 1.0);
    assert_proche(eval_ok("factorial(3)"), 6.0);
    assert_proche(eval_ok("factorial(5)"), 120.0);
    // entier EXACT exigé
    assert_domaine("factorial(3.5)");
    assert_domaine("factorial(-3)");
    // un argument calculé qui tombe exactement sur un entier passe
    assert_proche(eval_ok("factorial(sqrt(16))"), 24.0);
}

/* ------------------------ Composition ------------------------ */

#[test]
fn sci_composition() {
    assert_proche(eval_ok("sin(pi/6) + sqrt(16)"), 4.5);
    assert_proche(eval_ok("2*cos(0) + 3^2"), 11.0);
    assert_proche(eval_ok("sqrt(sqrt(81))"), 3.0);
    assert_proche(eval_ok("log10(10^5)"), 5.0);
    // la garde s’applique aussi au résultat d’un sous-arbre
    assert_domaine("sqrt(2-3)");
    assert_domaine("asin(1+1)");
}

/* ------------------------ Application directe (sans parse) ------------------------ */

#[test]
fn sci_application_directe_equivalente() {
    // même garde, même valeur que le chemin parsé
    for nom in noms_fonctions() {
        let via_parse = evaluer(&format!("{nom}(0.5)"), true);
        let directe = appliquer_fonction(0.5, nom);
        match (via_parse, directe) {
            (Ok(a), Ok(b)) => assert_proche(a, b),
            (Err(a), Err(b)) => assert_eq!(
                std::mem::discriminant(&a),
                std::mem::discriminant(&b),
                "fonction {nom}"
            ),
            (a, b) => panic!("fonction {nom} : chemins divergents {a:?} / {b:?}"),
        }
    }
}

#[test]
fn sci_application_directe_gardes() {
    assert!(matches!(
        appliquer_fonction(-1.0, "sqrt"),
        Err(ErreurEval::Domaine(_))
    ));
    assert!(matches!(
        appliquer_fonction(2.0, "acos"),
        Err(ErreurEval::Domaine(_))
    ));
    assert!(matches!(
        appliquer_fonction(1.0, "inconnu"),
        Err(ErreurEval::Nom(_))
    ));
}

/* ------------------------ Registre : catalogue fermé ------------------------ */

#[test]
fn sci_catalogue_fige() {
    let noms = noms_fonctions();
    assert_eq!(
        noms,
        &[
            "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "log", "log10", "exp",
            "factorial", "degrees", "radians",
        ]
    );
}
