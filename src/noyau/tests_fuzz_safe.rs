//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : succès => valeur FINIE ; échec => une des quatre
//!   erreurs classées (jamais de panic, jamais d’inf/NaN)

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::eval::evaluer;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits entiers + quelques décimaux, incluant 0 (utile pour / et log)
    match rng.pick(8) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "3".to_string(),
        4 => "7".to_string(),
        5 => "0.5".to_string(),
        6 => "2.5".to_string(),
        _ => "10".to_string(),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => gen_nombre(rng),
        2 => "pi".to_string(),
        _ => "e".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("-({})", gen_expr(rng, depth - 1)),
        6 => format!("sin({})", gen_expr(rng, depth - 1)),
        7 => format!("cos({})", gen_expr(rng, depth - 1)),
        8 => format!("sqrt({})", gen_expr(rng, depth - 1)),
        _ => {
            // exposant borné : pas d’explosion 10^10^10
            format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4))
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_succes_finis_echecs_classes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);

        match evaluer(&expr, true) {
            Ok(v) => {
                assert!(v.is_finite(), "valeur non finie: expr={expr:?} v={v}");
                seen_ok += 1;
            }
            Err(
                ErreurEval::Syntaxe(_)
                | ErreurEval::Nom(_)
                | ErreurEval::Domaine(_)
                | ErreurEval::Arithmetique(_),
            ) => {
                // division par zéro, sqrt(négatif), débordement… : attendu en fuzz
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    // Même seed => mêmes expressions => mêmes sorties.
    let gen = |seed: u64| {
        let mut rng = Rng::new(seed);
        (0..60)
            .map(|_| {
                let expr = gen_expr(&mut rng, 4);
                (expr.clone(), evaluer(&expr, true))
            })
            .collect::<Vec<_>>()
    };

    let a = gen(0xBADC0DE_u64);
    let b = gen(0xBADC0DE_u64);
    assert_eq!(a.len(), b.len());
    for ((ea, ra), (eb, rb)) in a.iter().zip(b.iter()) {
        assert_eq!(ea, eb);
        assert_eq!(ra, rb, "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_purete_reentrance() {
    // L’évaluateur est sans état : 3 appels identiques, 3 réponses identiques,
    // même entrecoupés d’appels en échec.
    let r1 = evaluer("2^10 + sqrt(16)", true);
    let _ = evaluer("10/0", true);
    let _ = evaluer("(((", true);
    let r2 = evaluer("2^10 + sqrt(16)", true);
    let r3 = evaluer("2^10 + sqrt(16)", true);
    assert_eq!(r1, r2);
    assert_eq!(r2, r3);
    assert_eq!(r1.unwrap(), 1028.0);
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    // 800*(0.5) = 400
    let v = evaluer(&expr, true).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_entrees_hostiles() {
    // Jamais de panic, toujours une erreur classée.
    let hostiles = [
        "",
        "   ",
        "(((((((",
        ")))))))",
        "()()()",
        "++++",
        "2**3",
        "1//2",
        "__import__('os')",
        "eval(1)",
        "exec(1)",
        "sin()",
        "sin",
        "sin 1",
        "2 3 4",
        "pi pi",
        "0x10",
        "1e5",
        "nan",
        "inf",
    ];

    for s in hostiles {
        assert!(evaluer(s, true).is_err(), "accepté à tort: {s:?}");
    }
}
