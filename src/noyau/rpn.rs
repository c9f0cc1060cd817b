// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> (valeur, formule)
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer en reconstruisant la formule au même pas
//
// Règles:
// - * et / lient plus fort que + et - ; tout est associatif à gauche.
// - Chaque combinaison est entourée d’une paire de parenthèses, quelle que soit
//   la précédence autour : "((2 + 1) + (3 - 1))", ou "(2 + 5)" pour deux opérandes.
// - Aucune E/S ici : l’appelant affiche "Formula: {formule} = {valeur}".

use super::erreur::ErreurCalc;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Plus, Num(3), Star, Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for &tok in tokens {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu’à '(' ; les deux parenthèses disparaissent
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(ErreurCalc::MismatchedParentheses),
                    }
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                // associativité gauche : on sort tout opérateur de précédence >=
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    out.push(*top);
                    ops.pop();
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::RPar) {
            return Err(ErreurCalc::MismatchedParentheses);
        }
        out.push(op);
    }

    Ok(out)
}

/// Cadre d’évaluation : valeur partielle + fragment de formule, toujours ensemble.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Cadre {
    valeur: i64,
    formule: String,
}

/// Évalue une RPN : pile de cadres (valeur, formule).
pub fn eval_rpn(rpn: &[Tok]) -> Result<(i64, String), ErreurCalc> {
    let mut pile: Vec<Cadre> = Vec::new();

    for tok in rpn {
        match *tok {
            Tok::Num(n) => pile.push(Cadre {
                valeur: n,
                formule: n.to_string(),
            }),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = pile.pop().ok_or_else(operande_manquant)?;
                let a = pile.pop().ok_or_else(operande_manquant)?;

                let valeur = combiner(*tok, a.valeur, b.valeur)?;
                pile.push(Cadre {
                    valeur,
                    formule: format!("({} {tok} {})", a.formule, b.formule),
                });
            }

            Tok::LPar | Tok::RPar => return Err(ErreurCalc::MismatchedParentheses),
        }
    }

    if pile.len() != 1 {
        return Err(ErreurCalc::invalide(format!(
            "expected one result, found {}",
            pile.len()
        )));
    }
    let Cadre { valeur, formule } = pile.remove(0);
    Ok((valeur, formule))
}

fn operande_manquant() -> ErreurCalc {
    ErreurCalc::invalide("missing operand")
}

/// Arithmétique entière vérifiée (division tronquée vers zéro).
fn combiner(op: Tok, a: i64, b: i64) -> Result<i64, ErreurCalc> {
    let r = match op {
        Tok::Plus => a.checked_add(b),
        Tok::Minus => a.checked_sub(b),
        Tok::Star => a.checked_mul(b),
        Tok::Slash => {
            if b == 0 {
                return Err(ErreurCalc::DivisionByZero);
            }
            a.checked_div(b)
        }
        _ => return Err(ErreurCalc::invalide(format!("'{op}' is not an operator"))),
    };
    r.ok_or(ErreurCalc::Overflow)
}
