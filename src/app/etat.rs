//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, formule, erreur, démarche,
//! politique éditable) et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - La politique de départ (ligne de commande) est conservée pour AC.

use crate::console::normaliser_saisie;
use crate::noyau::{Calcul, Delimiteurs, Demarche, Politique};

/// Garde-fou : borne haute maximale réglable depuis l’UI
/// (relevée jusqu’à la borne de départ si celle-ci est plus haute).
pub const BORNE_MAX_UI: i64 = 1_000_000_000;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // valeur entière
    pub formule: String,  // formule parenthésée
    pub erreur: String,   // message d’erreur (si le calcul échoue)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- politique éditable ---
    pub autoriser_negatifs: bool,
    pub borne_sup: i64,
    pub delimiteur_extra: String,

    // politique reçue au lancement (AC y revient)
    depart: Politique,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Politique::default())
    }
}

impl AppCalc {
    pub fn new(depart: Politique) -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            formule: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            autoriser_negatifs: !depart.refuser_negatifs,
            borne_sup: depart.borne_sup,
            delimiteur_extra: String::new(),
            depart,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + politique de départ).
    pub fn reset_total(&mut self) {
        let depart = self.depart.clone();
        *self = Self::new(depart);
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + formule + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.formule.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Plafond de la borne réglable : jamais sous la borne reçue au lancement.
    pub fn borne_max(&self) -> i64 {
        BORNE_MAX_UI.max(self.depart.borne_sup)
    }

    /// Politique effective : celle de départ, modifiée par les réglages UI.
    ///
    /// Un délimiteur extra vide est ignoré ; `\n` tapé littéralement vaut un saut de ligne.
    pub fn politique(&self) -> Politique {
        let mut p = self.depart.clone();
        p.refuser_negatifs = !self.autoriser_negatifs;
        p.borne_sup = self.borne_sup.clamp(0, self.borne_max());

        if let Ok(extra) = Delimiteurs::new([normaliser_saisie(&self.delimiteur_extra)]) {
            p = p.avec_delimiteurs(&extra);
        }
        p
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE le dernier résultat pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe la démarche (non fiable si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un calcul réussi.
    pub fn set_resultats(&mut self, calcul: Calcul) {
        self.erreur.clear();
        self.resultat = calcul.valeur.to_string();
        self.formule = calcul.formule;
        self.demarche = calcul.demarche;
        self.focus_entree = true;
    }
}
