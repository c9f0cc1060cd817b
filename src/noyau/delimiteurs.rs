// src/noyau/delimiteurs.rs
//
// En-tête de délimiteurs + ensemble de délimiteurs actif.
//
// Grammaire de l’en-tête :
//   "//" <corps> "\n" <expression>
//   <corps> = un délimiteur littéral
//           | un ou plusieurs groupes "[" <délimiteur> "]"
//
// Sans en-tête : ensemble par défaut de la politique (jamais celui d’un appel précédent).

use std::fmt;

use log::debug;

use super::erreur::EnteteInvalide;

/// Marqueur d’en-tête (deux caractères).
const MARQUEUR: &str = "//";

/// Fin de l’en-tête.
const TERMINATEUR: char = '\n';

/// Ensemble ordonné de délimiteurs distincts et non vides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delimiteurs(Vec<String>);

impl Default for Delimiteurs {
    fn default() -> Self {
        Self(vec![",".to_string(), "\n".to_string()])
    }
}

impl Delimiteurs {
    /// Construit l’ensemble (doublons retirés, ordre conservé).
    pub fn new<I, S>(items: I) -> Result<Self, EnteteInvalide>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for item in items {
            let d = item.into();
            if d.is_empty() {
                return Err(EnteteInvalide::EmptyDelimiter);
            }
            if !out.contains(&d) {
                out.push(d);
            }
        }
        Ok(Self(out))
    }

    /// Union ordonnée : `self` d’abord, puis ce qui manque de `autre`.
    pub fn fusion(&self, autre: &Delimiteurs) -> Delimiteurs {
        let mut out = self.0.clone();
        for d in &autre.0 {
            if !out.contains(d) {
                out.push(d.clone());
            }
        }
        Delimiteurs(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Du plus long au plus court (tri stable) : sert à la correspondance la plus longue.
    pub fn by_length(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.iter().collect();
        v.sort_by(|a, b| b.len().cmp(&a.len()));
        v
    }
}

impl fmt::Display for Delimiteurs {
    /// Affichage lisible : `"," "\n"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|d| format!("{d:?}")).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Détecte et retire l’en-tête optionnel.
///
/// Rend l’ensemble actif et le texte restant (l’expression brute).
pub fn resolve<'a>(
    raw: &'a str,
    defaults: &Delimiteurs,
) -> Result<(Delimiteurs, &'a str), EnteteInvalide> {
    let Some(apres_marqueur) = raw.strip_prefix(MARQUEUR) else {
        return Ok((defaults.clone(), raw));
    };

    let fin = apres_marqueur
        .find(TERMINATEUR)
        .ok_or(EnteteInvalide::MissingTerminator)?;

    // CRLF : le '\r' appartient au terminateur, pas au corps.
    let corps = apres_marqueur[..fin]
        .strip_suffix('\r')
        .unwrap_or(&apres_marqueur[..fin]);
    let reste = &apres_marqueur[fin + TERMINATEUR.len_utf8()..];

    let delims = lire_corps(corps)?;
    debug!("en-tête: délimiteurs {delims}");
    Ok((delims, reste))
}

fn lire_corps(corps: &str) -> Result<Delimiteurs, EnteteInvalide> {
    if corps.is_empty() {
        return Err(EnteteInvalide::EmptyDelimiter);
    }

    let ouvre = corps.starts_with('[');
    let ferme = corps.ends_with(']');

    match (ouvre, ferme) {
        (true, true) => {
            let segments = extraire_groupes(corps)?;
            if segments.is_empty() {
                return Err(EnteteInvalide::BracketSyntax);
            }
            Delimiteurs::new(segments)
        }
        (true, false) | (false, true) => Err(EnteteInvalide::MismatchedBrackets),
        (false, false) => {
            if corps.contains(|c: char| c == '[' || c == ']') {
                return Err(EnteteInvalide::BracketInPlainDelimiter);
            }
            Delimiteurs::new([corps])
        }
    }
}

/// Extrait chaque groupe `[...]` par appariement des crochets (profondeur comptée).
/// Tout texte hors groupe est une erreur de syntaxe.
fn extraire_groupes(corps: &str) -> Result<Vec<&str>, EnteteInvalide> {
    let mut out = Vec::new();
    let mut reste = corps;

    while !reste.is_empty() {
        if !reste.starts_with('[') {
            return Err(EnteteInvalide::BracketSyntax);
        }

        let mut profondeur: usize = 0;
        let mut fin = None;
        for (i, c) in reste.char_indices() {
            match c {
                '[' => profondeur += 1,
                ']' => {
                    profondeur -= 1;
                    if profondeur == 0 {
                        fin = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }

        let fin = fin.ok_or(EnteteInvalide::BracketSyntax)?;
        let segment = &reste[1..fin];
        if segment.is_empty() {
            return Err(EnteteInvalide::EmptyDelimiter);
        }
        out.push(segment);
        reste = &reste[fin + 1..];
    }

    Ok(out)
}
