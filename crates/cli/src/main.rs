use clap::{Parser, Subcommand};
use std::path::PathBuf;
use pixelcrush_cli::commands::{init, inspect, render};

#[derive(Parser)]
#[command(name = "pixelcrush")]
#[command(about = "Offline tooling for pixelcrush canvas snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a snapshot to seed a fresh canvas, uniform or from an image.
    Init {
        /// Where to write the snapshot.
        #[arg(default_value = "place.data")]
        path: PathBuf,

        /// Cell color as 6 hex characters (default ffffff)
        #[arg(long, conflicts_with = "from_image")]
        color: Option<String>,

        /// Cell hardness as 64 hex characters (default all zero)
        #[arg(long, conflicts_with = "from_image")]
        hardness: Option<String>,

        /// Seed from a 1024x1024 RGBA PNG; alpha must be 0 or 255
        #[arg(long)]
        from_image: Option<PathBuf>,

        /// Hardness for alpha-0 pixels (default ff then zeros)
        #[arg(long, requires = "from_image")]
        hardness_transparent: Option<String>,

        /// Hardness for alpha-255 pixels (default ffffff then zeros)
        #[arg(long, requires = "from_image")]
        hardness_opaque: Option<String>,

        /// Replace an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Summarize the hardness distribution of a snapshot
    Inspect {
        #[arg(default_value = "place.data")]
        path: PathBuf,
    },
    /// Render a snapshot to place.png and heatmap.png
    Render {
        #[arg(default_value = "place.data")]
        path: PathBuf,

        /// Output directory
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            path,
            color,
            hardness,
            from_image,
            hardness_transparent,
            hardness_opaque,
            force,
        } => match from_image {
            Some(image) => init::from_image(
                &image,
                &path,
                hardness_transparent.as_deref(),
                hardness_opaque.as_deref(),
                force,
            ),
            None => init::run(&path, color.as_deref(), hardness.as_deref(), force),
        },
        Commands::Inspect { path } => inspect::run(&path),
        Commands::Render { path, out } => render::run(&path, &out),
    }
}
