// src/noyau/jetons.rs
//
// Tokenisation.
// 1) Chaque délimiteur déclaré devient l’opérateur '+' (correspondance littérale, la plus longue d’abord).
//    Délimiteurs et opérateurs partagent donc une seule grammaire : "2,3+4" ≡ "//;\n2;3+4".
// 2) Balayage gauche -> droite en runs maximaux :
//    - chiffres               -> Num
//    - + - * / ( )            -> un jeton chacun
//    - tout autre run         -> jeton invalide, compte pour 0 (sans erreur)
//
// Moins unaire : si '-' arrive quand on attend une valeur, son signe passe au nombre suivant.
// Plus unaire : ignoré.

use std::fmt;

use log::debug;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use super::delimiteurs::Delimiteurs;
use super::erreur::ErreurCalc;
use super::politique::Politique;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(i64),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
}

impl Tok {
    pub fn est_operateur(&self) -> bool {
        matches!(self, Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash)
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(n) => write!(f, "{n}"),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

/// Réécrit chaque occurrence de chaque délimiteur en '+'.
/// Correspondance littérale (pas d’expression régulière), la plus longue gagne.
pub fn normaliser(expr: &str, delims: &Delimiteurs) -> String {
    let motifs = delims.by_length();
    let mut out = String::with_capacity(expr.len());
    let mut reste = expr;

    'scan: while let Some(c) = reste.chars().next() {
        for motif in &motifs {
            if let Some(apres) = reste.strip_prefix(*motif) {
                out.push('+');
                reste = apres;
                continue 'scan;
            }
        }
        out.push(c);
        reste = &reste[c.len_utf8()..];
    }

    out
}

/// Tokenise une expression (sans en-tête).
///
/// Rend les jetons et le journal des négatifs (valeurs d’origine, sans doublon,
/// ordre de première apparition). Le refus des négatifs est décidé par l’appelant,
/// une fois toute l’entrée lue.
pub fn tokenize(
    expr: &str,
    delims: &Delimiteurs,
    politique: &Politique,
) -> Result<(Vec<Tok>, Vec<BigInt>), ErreurCalc> {
    let normal = normaliser(expr, delims);
    let chars: Vec<char> = normal.chars().collect();

    let mut out: Vec<Tok> = Vec::new();
    let mut negatifs: Vec<BigInt> = Vec::new();

    let mut attend_operande = true;
    let mut moins_unaire = false;
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                if !attend_operande {
                    return Err(ErreurCalc::invalide("'(' where an operator was expected"));
                }
                if moins_unaire {
                    return Err(ErreurCalc::invalide(
                        "unary minus must be followed by a number",
                    ));
                }
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                if attend_operande {
                    return Err(ErreurCalc::invalide("')' where an operand was expected"));
                }
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                // plus unaire : rien à faire
                if !attend_operande {
                    out.push(Tok::Plus);
                    attend_operande = true;
                }
                i += 1;
                continue;
            }
            '-' => {
                if attend_operande {
                    if moins_unaire {
                        return Err(ErreurCalc::invalide("repeated unary minus"));
                    }
                    moins_unaire = true;
                } else {
                    out.push(Tok::Minus);
                    attend_operande = true;
                }
                i += 1;
                continue;
            }
            '*' | '/' => {
                if attend_operande {
                    return Err(ErreurCalc::invalide(format!(
                        "operator '{c}' where an operand was expected"
                    )));
                }
                out.push(if c == '*' { Tok::Star } else { Tok::Slash });
                attend_operande = true;
                i += 1;
                continue;
            }
            _ => {}
        }

        // Run maximal : nombre ou jeton invalide
        let start = i;
        while i < chars.len() && !est_separateur(chars[i]) {
            i += 1;
        }
        let mot: String = chars[start..i].iter().collect();

        if !attend_operande {
            return Err(ErreurCalc::invalide(format!(
                "operand '{mot}' where an operator was expected"
            )));
        }

        let magnitude = lire_magnitude(&mot);
        let valeur = if moins_unaire { -magnitude } else { magnitude };
        moins_unaire = false;

        out.push(Tok::Num(retenir(valeur, politique, &mut negatifs)));
        attend_operande = false;
    }

    // Opérande final manquant : 0 implicite
    if out.last().map_or(false, Tok::est_operateur) {
        out.push(Tok::Num(0));
    }

    Ok((out, negatifs))
}

fn est_separateur(c: char) -> bool {
    c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')')
}

/// Run de chiffres -> entier exact (même hors i64) ; tout autre run -> 0.
fn lire_magnitude(mot: &str) -> BigInt {
    if mot.bytes().all(|b| b.is_ascii_digit()) {
        BigInt::parse_bytes(mot.as_bytes(), 10).unwrap_or_else(BigInt::zero)
    } else {
        debug!("jeton invalide {mot:?} compté pour 0");
        BigInt::zero()
    }
}

/// Journalise le signe d’origine, puis applique la borne sur la magnitude.
fn retenir(valeur: BigInt, politique: &Politique, negatifs: &mut Vec<BigInt>) -> i64 {
    if valeur.is_negative() && !negatifs.contains(&valeur) {
        negatifs.push(valeur.clone());
    }

    if valeur.abs() > BigInt::from(politique.borne_sup) {
        debug!("{valeur} dépasse la borne {} : compté pour 0", politique.borne_sup);
        return 0;
    }

    // |valeur| <= borne_sup <= i64::MAX
    valeur.to_i64().unwrap_or(0)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
