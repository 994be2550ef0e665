//! classify - soil erosion severity from a single photograph

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use soilscan::classify_image;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the field photograph to classify.
    image_path: PathBuf,
    /// Emit the full result as a JSON document instead of the text summary.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let result = classify_image(&args.image_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Prediction: {}", result.prediction);
    println!("Confidence: {:.2}%", result.confidence * 100.0);
    println!("Soil Type: {} ({})", result.soil_type, result.soil_color);
    println!("Reasoning: {}", result.reasoning.join(", "));
    println!(
        "Processing Metrics: {}",
        serde_json::to_string(&result.metrics)?
    );
    Ok(())
}
