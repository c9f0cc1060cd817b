// src/noyau/erreur.rs
//
// Erreurs du noyau : un seul enum fermé, porté par Result.
// Aucun résultat partiel n’est jamais rendu : toute erreur fait échouer l’appel entier.

use num_bigint::BigInt;
use thiserror::Error;

/// Raison d’un en-tête de délimiteurs mal formé (`//...\n`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EnteteInvalide {
    #[error("missing terminator")]
    MissingTerminator,
    #[error("empty delimiter")]
    EmptyDelimiter,
    #[error("bracket syntax")]
    BracketSyntax,
    #[error("mismatched brackets")]
    MismatchedBrackets,
    #[error("bracket in plain delimiter")]
    BracketInPlainDelimiter,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("Malformed delimiter header: {0}")]
    MalformedHeader(EnteteInvalide),

    /// Valeurs négatives d’origine, ordre de première apparition.
    #[error("Negatives not allowed: {}", joindre(.0))]
    NegativesNotAllowed(Vec<BigInt>),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    #[error("Attempted to divide by zero")]
    DivisionByZero,

    /// Dépassement de capacité i64 (jamais de wrap silencieux).
    #[error("Arithmetic overflow")]
    Overflow,
}

impl From<EnteteInvalide> for ErreurCalc {
    fn from(e: EnteteInvalide) -> Self {
        ErreurCalc::MalformedHeader(e)
    }
}

impl ErreurCalc {
    pub(crate) fn invalide(raison: impl Into<String>) -> Self {
        ErreurCalc::InvalidExpression(raison.into())
    }
}

fn joindre(valeurs: &[BigInt]) -> String {
    valeurs
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
