//! Noyau calculatrice à chaîne
//!
//! Organisation interne :
//! - delimiteurs.rs : en-tête `//...\n` + ensemble de délimiteurs actif
//! - jetons.rs      : normalisation des délimiteurs + tokenisation (bornes, négatifs)
//! - rpn.rs         : shunting-yard + évaluation avec formule
//! - politique.rs   : politique de calcul (immuable pendant un appel)
//! - erreur.rs      : erreurs du noyau (enum fermé)
//! - eval.rs        : pipeline complet

pub mod delimiteurs;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod politique;
pub mod rpn;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use delimiteurs::Delimiteurs;
pub use eval::{add, Calcul, Demarche};
pub use politique::{Politique, BORNE_SUP_DEFAUT};
