use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;

use crate::config::Config;
use crate::core::corpus::read_corpus;
use crate::core::regressor::FitOptions;
use crate::core::schema::FeatureRow;
use crate::core::train::{train, TrainOptions};
use crate::core::ModelArtifact;

#[derive(Parser)]
#[command(name = "amorcast")]
#[command(about = "Rule-augmented relationship outcome scoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a model from a historical corpus and persist the artifact
    Train {
        /// Path to the CSV corpus (feature columns plus raw label columns)
        #[arg(long)]
        data: PathBuf,
        /// Where to write the model artifact (defaults to the config dir)
        #[arg(long)]
        model: Option<PathBuf>,
        /// Shuffle seed for the train/holdout split
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Fraction of rows held out for evaluation
        #[arg(long, default_value_t = 0.2)]
        holdout: f64,
    },
    /// Score one relationship described as a JSON object of named fields
    Predict {
        /// Path to the JSON input row
        #[arg(long)]
        input: PathBuf,
        /// Model artifact to load (defaults to the config dir)
        #[arg(long)]
        model: Option<PathBuf>,
        /// Also print the regressor's raw prediction before rule adjustment
        #[arg(long)]
        show_base: bool,
    },
    /// Show metadata of the persisted model artifact
    Inspect {
        /// Model artifact to load (defaults to the config dir)
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn resolve_model_path(model: Option<PathBuf>) -> Result<PathBuf> {
    match model {
        Some(path) => Ok(path),
        None => Ok(Config::new(None)?.model_file()),
    }
}

pub fn handle_train(
    data: PathBuf,
    model: Option<PathBuf>,
    seed: u64,
    holdout: f64,
) -> Result<()> {
    let model_path = resolve_model_path(model)?;

    println!("{}", "📚 Loading corpus...".cyan());
    let rows = read_corpus(&data)?;
    println!("Rows: {}", rows.len());

    let options = TrainOptions {
        holdout_fraction: holdout,
        seed,
        fit: FitOptions::default(),
    };

    println!("{}", "🔧 Training model...".cyan());
    let (artifact, report) = train(rows, &options)?;
    artifact.save(&model_path)?;

    println!("\n{}", "Training Report".green().bold());
    println!(
        "Split: {} train / {} holdout",
        report.train_rows, report.holdout_rows
    );
    match report.holdout_mae {
        Some([happy, cheat]) => {
            println!("Holdout MAE: happy {:.2} | cheat {:.2}", happy, cheat);
        }
        None => println!("Holdout MAE: n/a (corpus too small)"),
    }
    println!("Model ID: {}", artifact.id.to_string().yellow());
    println!(
        "{} {}",
        "✅ Saved model artifact to".green(),
        model_path.display()
    );

    Ok(())
}

pub fn handle_predict(input: PathBuf, model: Option<PathBuf>, show_base: bool) -> Result<()> {
    let model_path = resolve_model_path(model)?;
    let artifact = ModelArtifact::load(&model_path)?;

    let content = std::fs::read_to_string(&input)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let row = match value {
        serde_json::Value::Object(fields) => FeatureRow::from_named(&fields)?,
        _ => bail!("input must be a JSON object of named fields"),
    };

    if show_base {
        let base = artifact.predict_base(&row);
        println!(
            "{} happy {:.1} | cheat {:.1}",
            "Base prediction:".dimmed(),
            base.happy,
            base.cheat
        );
    }

    let scores = artifact.score(&row);
    println!(
        "{} {}",
        "Happy Marriage:".cyan(),
        format!("{:.1}%", scores.happy).green().bold()
    );
    println!(
        "{} {}",
        "Cheating:".cyan(),
        format!("{:.1}%", scores.cheat).red().bold()
    );

    Ok(())
}

pub fn handle_inspect(model: Option<PathBuf>) -> Result<()> {
    let model_path = resolve_model_path(model)?;
    let artifact = ModelArtifact::load(&model_path)?;

    println!("{}", "Model Artifact".cyan().bold());
    println!("Path: {}", model_path.display());
    println!("ID: {}", artifact.id.to_string().yellow());
    println!(
        "Trained: {}",
        artifact.trained_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Encoded feature width: {}", artifact.encoder.width());

    Ok(())
}
