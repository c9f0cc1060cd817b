//! Noyau — évaluation (pipeline réel)
//!
//! en-tête -> délimiteurs -> jetons (+ journal des négatifs) -> contrôle des négatifs
//!        -> RPN -> (valeur, formule)
//!
//! Fonction pure : aucun état entre deux appels, la politique n’est jamais modifiée.
//! L’affichage ("Formula: ... = ...") appartient aux interfaces.

use std::fmt;

use log::debug;

use super::delimiteurs::resolve;
use super::erreur::ErreurCalc;
use super::jetons::{format_tokens, tokenize};
use super::politique::Politique;
use super::rpn::{eval_rpn, to_rpn};

/// Trace lisible d’un calcul (délimiteurs actifs, jetons, RPN).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub delimiteurs: String,
    pub jetons: String,
    pub rpn: String,
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Calcul {
    pub valeur: i64,
    /// Formule entièrement parenthésée ; vide si l’entrée est vide.
    pub formule: String,
    pub demarche: Demarche,
}

impl fmt::Display for Calcul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Formula: {} = {}", self.formule, self.valeur)
    }
}

/// API publique : évalue une entrée selon la politique.
///
/// - Entrée absente ou blanche -> 0, formule vide.
/// - Expression vide après l’en-tête (ou réduite à des séparateurs) -> 0, formule vide.
/// - Les négatifs sont tous signalés ensemble, avant toute évaluation.
pub fn add(entree: Option<&str>, politique: &Politique) -> Result<Calcul, ErreurCalc> {
    let raw = match entree {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(Calcul::default()),
    };

    // 1) En-tête
    let (delims, expr) = resolve(raw, &politique.delimiteurs)?;

    // 2) Jetons
    let (jetons, negatifs) = tokenize(expr, &delims, politique)?;
    debug!("jetons: {}", format_tokens(&jetons));

    // 3) Négatifs : contrôle global, après lecture complète
    if politique.refuser_negatifs && !negatifs.is_empty() {
        return Err(ErreurCalc::NegativesNotAllowed(negatifs));
    }

    let mut demarche = Demarche {
        delimiteurs: delims.to_string(),
        jetons: format_tokens(&jetons),
        rpn: String::new(),
    };

    if jetons.is_empty() {
        return Ok(Calcul {
            demarche,
            ..Calcul::default()
        });
    }

    // 4) RPN + évaluation
    let rpn = to_rpn(&jetons)?;
    demarche.rpn = format_tokens(&rpn);
    debug!("rpn: {}", demarche.rpn);

    let (valeur, formule) = eval_rpn(&rpn)?;
    debug!("résultat: {formule} = {valeur}");

    Ok(Calcul {
        valeur,
        formule,
        demarche,
    })
}
