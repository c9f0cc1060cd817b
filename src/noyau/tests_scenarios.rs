//! Scénarios (campagne) : comportements observables de `add`, politique comprise.
//!
//! But : figer les cas de référence et les équivalences de grammaire
//! (délimiteurs et opérateurs partagent une seule grammaire).

use num_bigint::BigInt;

use super::erreur::{EnteteInvalide, ErreurCalc};
use super::{add, Delimiteurs, Politique};

fn eval_ok(entree: &str, p: &Politique) -> (i64, String) {
    let c = add(Some(entree), p).unwrap_or_else(|e| panic!("entree={entree:?} err={e}"));
    (c.valeur, c.formule)
}

fn valeur(entree: &str) -> i64 {
    eval_ok(entree, &Politique::default()).0
}

fn assert_meme_calcul(a: &str, b: &str) {
    let p = Politique::default();
    assert_eq!(eval_ok(a, &p), eval_ok(b, &p), "a={a:?} b={b:?}");
}

fn negatifs(v: &[i64]) -> ErreurCalc {
    ErreurCalc::NegativesNotAllowed(v.iter().copied().map(BigInt::from).collect())
}

/* ------------------------ Table de référence ------------------------ */

#[test]
fn sc_table_de_reference() {
    let p = Politique::default();
    let cas: &[(&str, Result<i64, ErreurCalc>)] = &[
        ("", Ok(0)),
        ("1,5", Ok(6)),
        ("1,2,3,4,5,6", Ok(21)),
        ("5,tytyt", Ok(5)),
        ("1,,2", Ok(3)),
        ("1\n2,3", Ok(6)),
        ("1,-2,3,-4", Err(negatifs(&[-2, -4]))),
        ("2,1001,6", Ok(8)),
        ("//#\n2#5", Ok(7)),
        ("//[*][!!][r9r]\n11r9r22*hh*33!!44", Ok(110)),
        (
            "//[***\n1***2***3",
            Err(ErreurCalc::MalformedHeader(
                EnteteInvalide::MismatchedBrackets,
            )),
        ),
        ("2+3*4-5/5", Ok(13)),
        ("(2+3)*(4-1)", Ok(15)),
        ("10/0", Err(ErreurCalc::DivisionByZero)),
    ];

    for (entree, attendu) in cas {
        let obtenu = add(Some(*entree), &p).map(|c| c.valeur);
        assert_eq!(&obtenu, attendu, "entree={entree:?}");
    }

    assert!(matches!(
        add(Some("2+*3"), &p),
        Err(ErreurCalc::InvalidExpression(_))
    ));
}

/* ------------------------ Une seule grammaire ------------------------ */

#[test]
fn sc_delimiteurs_equivalents_a_plus() {
    assert_meme_calcul("2,3+4", "//;\n2;3+4");
    assert_meme_calcul("2\n3*4", "2+3*4");
    assert_meme_calcul("//[::]\n1::2::3", "1+2+3");
}

#[test]
fn sc_delimiteur_qui_masque_un_operateur() {
    // '*' déclaré délimiteur : il n’est plus une multiplication
    assert_eq!(valeur("//[*]\n2*3"), 5);
    // '-' déclaré délimiteur : plus de soustraction ni de négatif
    assert_eq!(valeur("//-\n5-3"), 8);
    assert_eq!(valeur("//-\n-3"), 3);
}

#[test]
fn sc_delimiteurs_unicode() {
    assert_eq!(valeur("//[→][€€]\n1→2€€3"), 6);
}

#[test]
fn sc_entete_crlf() {
    assert_eq!(valeur("//;\r\n4;5"), 9);
}

#[test]
fn sc_entete_remplace_les_defauts() {
    // la virgule n’est plus un délimiteur : "1,2" est un jeton invalide
    assert_eq!(valeur("//;\n1,2;3"), 3);
}

/* ------------------------ Politique ------------------------ */

#[test]
fn sc_borne_personnalisee() {
    let p = Politique::default().avec_borne(0);
    assert_eq!(eval_ok("1,2,3", &p), (0, "((0 + 0) + 0)".to_string()));

    let p = Politique::default().avec_borne(1_000_000);
    assert_eq!(eval_ok("2,1001,6", &p).0, 1009);
}

#[test]
fn sc_negatifs_bornes_toujours_signales() {
    // -5000 dépasse la borne (compte 0) mais reste un négatif
    assert_eq!(add(Some("1,-5000"), &Politique::default()), Err(negatifs(&[-5000])));

    let p = Politique::default().autoriser_negatifs();
    assert_eq!(eval_ok("1,-5000", &p), (1, "(1 + 0)".to_string()));
}

#[test]
fn sc_negatifs_autorises_dans_l_arithmetique() {
    let p = Politique::default().autoriser_negatifs();
    assert_eq!(eval_ok("-2*-3", &p), (6, "(-2 * -3)".to_string()));
    assert_eq!(eval_ok("(1-5)/2", &p).0, -2);
}

#[test]
fn sc_delimiteur_en_ligne_de_commande() {
    let extra = Delimiteurs::new(["|"]).unwrap();
    let p = Politique::default().avec_delimiteurs(&extra);
    assert_eq!(eval_ok("1|2,3\n4", &p).0, 10);
}

/* ------------------------ Parenthèses et tolérances ------------------------ */

#[test]
fn sc_parentheses_imbriquees() {
    assert_eq!(
        eval_ok("((1+2)*(3+4))/7", &Politique::default()),
        (3, "(((1 + 2) * (3 + 4)) / 7)".to_string())
    );
}

#[test]
fn sc_operande_final_manquant() {
    assert_eq!(
        eval_ok("3*", &Politique::default()),
        (0, "(3 * 0)".to_string())
    );
    assert_eq!(valeur("1,2,"), 3);
}

#[test]
fn sc_parenthese_ouverte_en_fin() {
    assert_eq!(
        add(Some("2+("), &Politique::default()),
        Err(ErreurCalc::MismatchedParentheses)
    );
}

#[test]
fn sc_division_par_zero_via_borne() {
    // 5000 > 1000 : le diviseur vaut 0
    assert_eq!(
        add(Some("10/5000"), &Politique::default()),
        Err(ErreurCalc::DivisionByZero)
    );
}
