//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : chiffres + délimiteurs par défaut => somme (invalides et > borne comptent 0)
//! - même entrée, même politique => même résultat, même formule

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::{add, Politique};

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

/// Segment entre deux délimiteurs, avec sa contribution attendue à la somme.
fn gen_segment(rng: &mut Rng, borne: i64) -> (String, i64) {
    match rng.pick(6) {
        // vide (",,")
        0 => (String::new(), 0),
        // jeton invalide
        1 => {
            let mots = ["tytyt", "hh", "1.5", "12ab", "x"];
            (mots[rng.pick(mots.len() as u32) as usize].to_string(), 0)
        }
        // au-delà de la borne
        2 => {
            let n = borne + 1 + i64::from(rng.pick(5000));
            (n.to_string(), 0)
        }
        // très grand (hors i64)
        3 if rng.coin() => ("9".repeat(25), 0),
        _ => {
            let n = i64::from(rng.pick(1001)).min(borne);
            (n.to_string(), n)
        }
    }
}

fn gen_somme(rng: &mut Rng, borne: i64) -> (String, i64) {
    let n = 1 + rng.pick(12) as usize;
    let mut s = String::new();
    let mut total = 0;
    for k in 0..n {
        if k > 0 {
            s.push(if rng.coin() { ',' } else { '\n' });
        }
        let (seg, v) = gen_segment(rng, borne);
        s.push_str(&seg);
        total += v;
    }
    (s, total)
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0 => "0".to_string(),
        1 => "tytyt".to_string(),
        2 => format!("-{}", 1 + rng.pick(20)),
        _ => (1 + rng.pick(50)).to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({a}+{b})"),
        2 | 3 => format!("{a}-{b}"),
        4 | 5 => format!("{a}*{b}"),
        6 => format!("{a}/{b}"),
        7 | 8 => format!("{a},{b}"),
        _ => format!("({a}"), // parenthèse laissée ouverte exprès
    }
}

fn is_erreur_attendue(e: &ErreurCalc) -> bool {
    // Liste blanche : erreurs normales pour un fuzz sur ce domaine.
    matches!(
        e,
        ErreurCalc::DivisionByZero
            | ErreurCalc::MismatchedParentheses
            | ErreurCalc::InvalidExpression(_)
            | ErreurCalc::Overflow
    )
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_somme_par_defaut() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let p = Politique::default();
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let (entree, attendu) = gen_somme(&mut rng, p.borne_sup);
        let c = add(Some(entree.as_str()), &p).unwrap_or_else(|e| panic!("entree={entree:?} err={e}"));
        assert_eq!(c.valeur, attendu, "entree={entree:?}");
    }
}

#[test]
fn fuzz_safe_somme_borne_variable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xB0B_u64);

    for _ in 0..100 {
        budget(t0, max);

        let borne = i64::from(rng.pick(1500));
        let p = Politique::default().avec_borne(borne);
        let (entree, attendu) = gen_somme(&mut rng, borne);
        let c = add(Some(entree.as_str()), &p).unwrap_or_else(|e| panic!("entree={entree:?} err={e}"));
        assert_eq!(c.valeur, attendu, "entree={entree:?} borne={borne}");
    }
}

#[test]
fn fuzz_safe_determinisme_et_erreurs_attendues() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let p = Politique::default().autoriser_negatifs();
    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let premier = add(Some(expr.as_str()), &p);
        let second = add(Some(expr.as_str()), &p);
        assert_eq!(premier, second, "non déterministe: expr={expr:?}");

        match premier {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_negatifs_tous_signales() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let p = Politique::default();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..100 {
        budget(t0, max);

        let n = 1 + rng.pick(8);
        let valeurs: Vec<i64> = (0..n).map(|_| i64::from(rng.pick(30)) - 15).collect();
        let entree = valeurs
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let mut attendus: Vec<i64> = Vec::new();
        for v in &valeurs {
            if *v < 0 && !attendus.contains(v) {
                attendus.push(*v);
            }
        }

        match add(Some(entree.as_str()), &p) {
            Ok(c) => {
                assert!(attendus.is_empty(), "entree={entree:?}");
                assert_eq!(c.valeur, valeurs.iter().sum::<i64>());
            }
            Err(ErreurCalc::NegativesNotAllowed(neg)) => {
                let neg: Vec<String> = neg.iter().map(|v| v.to_string()).collect();
                let att: Vec<String> = attendus.iter().map(|v| v.to_string()).collect();
                assert_eq!(neg, att, "entree={entree:?}");
            }
            Err(e) => panic!("erreur non attendue: entree={entree:?} err={e}"),
        }
    }
}

#[test]
fn fuzz_safe_longue_somme_et_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 2000 termes : évaluation itérative, pas de récursion
    let entree = vec!["1"; 2000].join(",");
    let c = add(Some(entree.as_str()), &Politique::default()).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(c.valeur, 2000);
    budget(t0, max);

    // 2000 niveaux de parenthèses
    let entree = format!("{}7{}", "(".repeat(2000), ")".repeat(2000));
    let c = add(Some(entree.as_str()), &Politique::default()).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!((c.valeur, c.formule.as_str()), (7, "7"));
    budget(t0, max);
}
