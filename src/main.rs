// src/main.rs
//
// Calculatrice à chaîne — point d’entrée
// --------------------------------------
// Modes:
// - EXPRESSION en argument : un seul calcul, puis sortie (code 1 si erreur)
// - par défaut             : boucle console interactive
// - --gui                  : fenêtre eframe
//
// La politique (négatifs, borne haute, délimiteur extra) vient de la ligne de commande
// et reste la même pour toute la session.

use anyhow::{bail, Context};
use clap::Parser;
use eframe::egui;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

mod app;
mod console;
mod noyau;

use app::AppCalc;
use noyau::{Delimiteurs, Politique, BORNE_SUP_DEFAUT};

/// Titre unique (console + fenêtre).
const TITRE_APP: &str = "String Calculator";

/// String Calculator
#[derive(Parser, Debug)]
#[clap(name = "calculatrice_chaine")]
#[clap(about = "Adds numbers and evaluates + - * / expressions from a delimited string", version)]
struct Cli {
    /// Extra delimiter, active in addition to ',' and newline
    #[clap(long)]
    delimiter: Option<String>,

    /// Accept negative numbers instead of rejecting them
    #[clap(long)]
    allow_negative: bool,

    /// Numbers above this value count as 0
    #[clap(long, default_value_t = BORNE_SUP_DEFAUT)]
    upper_bound: i64,

    /// Open the graphical calculator
    #[clap(long)]
    gui: bool,

    #[clap(short, long, help = "Enable debug logging")]
    debug: bool,

    /// Evaluate this expression once and exit (a literal \n stands for a newline)
    expression: Option<String>,
}

impl Cli {
    fn politique(&self) -> anyhow::Result<Politique> {
        if self.upper_bound < 0 {
            bail!("--upper-bound must be zero or positive, got {}", self.upper_bound);
        }

        let mut p = Politique::default().avec_borne(self.upper_bound);
        if self.allow_negative {
            p = p.autoriser_negatifs();
        }
        if let Some(d) = &self.delimiter {
            let extra = Delimiteurs::new([console::normaliser_saisie(d)])
                .map_err(|e| anyhow::anyhow!("invalid --delimiter: {e}"))?;
            p = p.avec_delimiteurs(&extra);
        }
        Ok(p)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init()
        .context("failed to initialize the logger")?;

    let politique = cli.politique()?;
    info!(
        "politique: négatifs {}, borne {}, délimiteurs {}",
        if politique.refuser_negatifs { "refusés" } else { "acceptés" },
        politique.borne_sup,
        politique.delimiteurs
    );

    if let Some(expression) = &cli.expression {
        let stdout = std::io::stdout();
        let ok = console::traiter_ligne(expression, &politique, &mut stdout.lock())?;
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    if cli.gui {
        return lancer_fenetre(politique);
    }

    console::installer_ctrl_c()?;
    let stdin = std::io::stdin();
    // stdout non verrouillé : le gestionnaire Ctrl+C écrit pendant que read_line bloque
    console::boucle(stdin.lock(), std::io::stdout(), &politique)
}

/* ------------------------ Fenêtre (eframe) ------------------------ */

fn lancer_fenetre(politique: Politique) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(politique)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the window: {e}"))
}
