// src/console.rs
//
// Interface console : boucle lecture -> évaluation -> affichage.
// - "exit" (insensible à la casse) ou fin d’entrée : on sort proprement
// - Ctrl+C : message puis sortie immédiate (code 0)
// - une erreur de calcul est affichée, la boucle continue
//
// La boucle est générique (BufRead / Write) : testable sans terminal.

use std::io::{BufRead, Write};

use anyhow::Context;
use log::{debug, info};

use crate::noyau::{add, Politique};

const BANNIERE: &str = "\
String Calculator
Enter a mathematical expression using numbers, operators (+, -, *, /), parentheses and delimiters.
You can also use custom delimiters in the format: //[delimiter]\\n[expression] (type \\n literally).
Available command-line options:
--delimiter=\"[delimiter]\" to add a delimiter to the defaults.
--allow-negative to allow negative numbers.
--upper-bound=[number] to set the upper bound for numbers.
Type 'exit' or press Ctrl+C to quit.";

/// Un `\n` tapé littéralement (deux caractères) vaut un saut de ligne :
/// seul moyen de saisir un en-tête sur une seule ligne.
pub fn normaliser_saisie(ligne: &str) -> String {
    ligne.replace("\\n", "\n")
}

/// Message d’interruption (écrit depuis le thread du gestionnaire Ctrl+C).
pub fn signaler_ctrl_c<W: Write>(sortie: &mut W) -> std::io::Result<()> {
    writeln!(sortie, "\nCtrl+C detected. Exiting the program...")?;
    sortie.flush()
}

/// Installe le gestionnaire Ctrl+C (une seule fois par processus).
///
/// Le gestionnaire tourne sur son propre thread : la boucle ne doit pas garder
/// stdout verrouillé pendant qu’elle attend une ligne.
pub fn installer_ctrl_c() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        let _ = signaler_ctrl_c(&mut std::io::stdout());
        std::process::exit(0);
    })
    .context("failed to set up the Ctrl+C handler")?;

    info!("gestionnaire Ctrl+C installé");
    Ok(())
}

/// Évalue une ligne et écrit le résultat (ou l’erreur).
/// Rend `true` si le calcul a réussi.
pub fn traiter_ligne<W: Write>(
    ligne: &str,
    politique: &Politique,
    sortie: &mut W,
) -> anyhow::Result<bool> {
    let entree = normaliser_saisie(ligne);

    match add(Some(entree.as_str()), politique) {
        Ok(calcul) => {
            if !calcul.formule.is_empty() {
                writeln!(sortie, "{calcul}")?;
            }
            writeln!(sortie, "Result: {}", calcul.valeur)?;
            Ok(true)
        }
        Err(e) => {
            debug!("échec pour {entree:?}: {e:?}");
            writeln!(sortie, "Error: {e}")?;
            Ok(false)
        }
    }
}

/// Boucle interactive.
pub fn boucle<R: BufRead, W: Write>(
    mut entree: R,
    mut sortie: W,
    politique: &Politique,
) -> anyhow::Result<()> {
    writeln!(sortie, "{BANNIERE}")?;

    let mut ligne = String::new();
    loop {
        write!(sortie, "\nInput: ")?;
        sortie.flush()?;

        ligne.clear();
        let lus = entree
            .read_line(&mut ligne)
            .context("failed to read from standard input")?;

        // retire uniquement le terminateur de ligne
        let saisie = ligne.trim_end_matches(['\r', '\n']);

        if lus == 0 || saisie.trim().eq_ignore_ascii_case("exit") {
            writeln!(sortie, "Exiting the program...")?;
            break;
        }

        traiter_ligne(saisie, politique, &mut sortie)?;
    }

    Ok(())
}
