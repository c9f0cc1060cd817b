// src/noyau/politique.rs
//
// Politique de calcul : instantané immuable fourni par l’appelant à chaque appel.
// Le noyau ne la modifie jamais.

use super::delimiteurs::Delimiteurs;

/// Borne haute par défaut (au-delà : le nombre compte pour 0).
pub const BORNE_SUP_DEFAUT: i64 = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Politique {
    /// Refuser toute valeur négative (erreur groupée après tokenisation).
    pub refuser_negatifs: bool,
    /// Magnitude maximale retenue ; au-delà, le nombre vaut 0.
    pub borne_sup: i64,
    /// Délimiteurs actifs quand l’entrée n’a pas d’en-tête.
    pub delimiteurs: Delimiteurs,
}

impl Default for Politique {
    fn default() -> Self {
        Self {
            refuser_negatifs: true,
            borne_sup: BORNE_SUP_DEFAUT,
            delimiteurs: Delimiteurs::default(),
        }
    }
}

impl Politique {
    pub fn autoriser_negatifs(mut self) -> Self {
        self.refuser_negatifs = false;
        self
    }

    pub fn avec_borne(mut self, borne_sup: i64) -> Self {
        self.borne_sup = borne_sup;
        self
    }

    /// Ajoute des délimiteurs DEVANT ceux par défaut (ils restent actifs).
    pub fn avec_delimiteurs(mut self, extra: &Delimiteurs) -> Self {
        self.delimiteurs = extra.fusion(&self.delimiteurs);
        self
    }
}
