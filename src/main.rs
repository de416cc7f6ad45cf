use clap::{Parser, Subcommand};
use std::path::PathBuf;

use micrograin::{
    AnalysisConfig, DirectoryRenderer, FileImageLoader, ParticleDetector, RegionClassifier, RenderRequest, Renderer,
};

#[derive(Parser)]
#[command(name = "micrograin")]
#[command(about = "Measure region classes and particle populations in micrographs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding the default thresholds
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Save mask and annotation panels to directory (must be empty)
    #[arg(long, value_name = "DIR", global = true)]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Split a grayscale micrograph into air, hollow-solid, non-hollow-solid and void
    Regions {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,
    },
    /// Count circular and non-circular particles and report their sizes
    Particles {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    let renderer = args.debug_out.as_ref().map(DirectoryRenderer::new).transpose()?;
    let loader = FileImageLoader;

    let request: RenderRequest = match &args.command {
        Command::Regions { image_path } => {
            let classifier = RegionClassifier::new(config.regions);
            let analysis = classifier.analyze_file(&loader, image_path)?;
            println!("{}", analysis.statistics);
            analysis.render_request()
        }
        Command::Particles { image_path } => {
            let detector = ParticleDetector::new(config.particles);
            let analysis = detector.analyze_file(&loader, image_path)?;
            println!("{}", analysis.statistics);
            analysis.render_request()
        }
    };

    if let Some(renderer) = renderer {
        renderer.render(&request)?;
        log::info!("Saved {} panels to {}", request.panels.len(), renderer.output_dir().display());
    }

    Ok(())
}
