use anyhow::Context;
use clap::{Parser, Subcommand};
use cosine_palette::Slot;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cospal::models::AppConfig;
use cospal::services::PaletteService;

#[derive(Parser)]
#[command(name = "cospal")]
#[command(about = "Cosine gradient palettes: sample, fit, share and deduplicate")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample colors from a preset or seed
    Sample {
        /// Preset name or seed
        source: String,

        /// Number of colors (defaults to `default_steps` from the config)
        #[arg(short = 'n', long)]
        steps: Option<usize>,

        /// Ignore the global modifiers stored in the seed
        #[arg(long)]
        raw: bool,
    },
    /// Fit a palette to hex colors, in order
    Fit {
        /// Colors as "#rrggbb", separate arguments or comma-separated
        #[arg(required = true, num_args = 1..)]
        colors: Vec<String>,

        /// Refine the best grid frequency with a local search
        #[arg(long)]
        refine: bool,
    },
    /// Encode coefficients into a seed
    Encode {
        /// Coefficient rows as JSON: [[ar,ag,ab,1],[br,..],[cr,..],[dr,..]]
        #[arg(long)]
        coeffs: String,

        /// Globals as JSON: [exposure, contrast, frequency_scale, phase_shift]
        #[arg(long)]
        globals: Option<String>,
    },
    /// Decode a seed into coefficients, globals and colors
    Decode {
        seed: String,
    },
    /// Check whether a seed decodes; exits with status 1 if not
    Validate {
        seed: String,
    },
    /// Print the similarity key of a preset or seed
    Fingerprint {
        /// Preset name or seed
        source: String,
    },
    /// Fold global modifiers into the base coefficients
    Tare {
        /// Preset name or seed
        source: String,

        /// Slot to tare: offset, amplitude, frequency, phase (or the global's name)
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        slot: Option<Slot>,

        /// Tare every slot
        #[arg(long)]
        all: bool,
    },
    /// Print the share URL of a preset or seed
    Share {
        /// Preset name or seed
        source: String,
    },
    /// Print the average brightness (0..1) of a preset or seed
    Brightness {
        /// Preset name or seed
        source: String,

        #[arg(short = 'n', long)]
        steps: Option<usize>,
    },
    /// List configured presets
    Presets,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cospal=warn,cosine_palette=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let config = Arc::new(AppConfig::load(config_path.as_deref()));
    let service = PaletteService::new(config);
    let json = cli.json;

    let Some(command) = cli.command else {
        run_status_command(&service, config_path);
        return Ok(());
    };

    match command {
        Commands::Sample { source, steps, raw } => {
            let colors = service.sample(&source, steps, !raw)?;
            emit(json, &colors, |colors| {
                for color in colors {
                    println!("{color}");
                }
            })
        }
        Commands::Fit { colors, refine } => {
            let colors: Vec<&str> = colors
                .iter()
                .flat_map(|arg| arg.split(','))
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();
            // Only override the configured default when the flag is given
            let outcome = service.fit(&colors, refine.then_some(true))?;
            emit(json, &outcome, |outcome| {
                println!("{}", outcome.seed);
                println!(
                    "max error {:.2}/255, mean error {:.2}/255",
                    outcome.report.max_error, outcome.report.mean_error
                );
            })
        }
        Commands::Encode { coeffs, globals } => {
            let rows: Vec<Vec<f64>> =
                serde_json::from_str(&coeffs).context("--coeffs is not a JSON array of rows")?;
            let globals: Vec<f64> = match globals {
                Some(g) => serde_json::from_str(&g).context("--globals is not a JSON array")?,
                None => cosine_palette::GlobalModifiers::IDENTITY.to_array().to_vec(),
            };
            let seed = service.encode_rows(&rows, &globals)?;
            emit(json, &seed, |seed| println!("{seed}"))
        }
        Commands::Decode { seed } => {
            let decoded = service.decode(&seed)?;
            emit(json, &decoded, |d| {
                let g = &d.globals;
                for (name, row) in ["offset", "amplitude", "frequency", "phase"]
                    .iter()
                    .zip(d.coeffs.to_rows())
                {
                    println!("{name:<10} {:.3} {:.3} {:.3}", row[0], row[1], row[2]);
                }
                println!(
                    "globals    exposure={} contrast={} frequency_scale={} phase_shift={}",
                    g.exposure, g.contrast, g.frequency_scale, g.phase_shift
                );
                if d.legacy_phase {
                    println!("           (legacy radian phase shift converted)");
                }
                println!("key        {}", d.fingerprint);
                println!("colors     {}", d.colors.join(" "));
            })
        }
        Commands::Validate { seed } => {
            let valid = cosine_palette::is_valid_seed(&seed);
            emit(json, &valid, |valid| {
                println!("{}", if *valid { "valid" } else { "invalid" });
            })?;
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Fingerprint { source } => {
            let key = service.fingerprint(&source)?;
            emit(json, &key, |key| println!("{key}"))
        }
        Commands::Tare { source, slot, all } => {
            let seed = match (slot, all) {
                (_, true) => service.tare_all(&source)?,
                (Some(slot), false) => service.tare(&source, slot)?,
                (None, false) => anyhow::bail!("either --slot or --all is required"),
            };
            emit(json, &seed, |seed| println!("{seed}"))
        }
        Commands::Share { source } => {
            let (coeffs, globals) = service.resolve(&source)?;
            let seed = service.encode(&coeffs, &globals)?;
            let url = service.share_url(&seed)?;
            emit(json, &url, |url| println!("{url}"))
        }
        Commands::Brightness { source, steps } => {
            let brightness = service.brightness(&source, steps)?;
            emit(json, &brightness, |b| println!("{b:.3}"))
        }
        Commands::Presets => {
            let presets = service.presets();
            emit(json, &presets, |presets| {
                if presets.is_empty() {
                    println!("No presets configured");
                }
                for preset in presets {
                    match &preset.seed {
                        Ok(seed) => println!("{:<16} {seed}", preset.name),
                        Err(e) => println!("{:<16} (invalid: {e})", preset.name),
                    }
                    if let Some(description) = &preset.description {
                        println!("{:<16} {description}", "");
                    }
                }
            })
        }
    }
}

/// Print `value` as JSON, or hand it to `plain` for text output
fn emit<T: Serialize>(json: bool, value: &T, plain: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        plain(value);
    }
    Ok(())
}

/// Show version and configuration (no subcommand)
fn run_status_command(service: &PaletteService, config_path: Option<PathBuf>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    let config = service.config();

    println!("Cospal v{VERSION} - cosine gradient palettes\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        std::env::var("CONFIG_FILE").as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    let source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("  Source:         {source}");
    println!("  Default steps:  {}", config.default_steps);
    println!("  Cache capacity: {}", config.cache_capacity);
    println!("  Fit refinement: {}", if config.fit.refine { "on" } else { "off" });
    println!(
        "  Share URL:      {}",
        config.share_base_url.as_deref().unwrap_or("(not set)")
    );
    println!("  Presets:        {}", config.preset_names().join(", "));

    println!("\nRun 'cospal --help' for commands.");
}
