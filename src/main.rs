//! Command-line shell for longqr.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use longqr::encoder::{DEFAULT_BORDER, DEFAULT_MODULE_SCALE};
use longqr::render::to_terminal_string;
use longqr::{EncodingPolicy, Session, DEFAULT_LABEL, DEFAULT_MAX_CHARS};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "longqr")]
#[command(about = "Split long text into a sequence of QR code images")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    policy: PolicyArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PolicyArgs {
    /// Maximum characters per code
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_CHARS)]
    max_chars: usize,

    /// Pixels per module in exported images
    #[arg(long, global = true, default_value_t = DEFAULT_MODULE_SCALE)]
    scale: u32,

    /// Quiet zone width in modules
    #[arg(long, global = true, default_value_t = DEFAULT_BORDER)]
    border: u32,
}

impl PolicyArgs {
    fn policy(&self) -> EncodingPolicy {
        EncodingPolicy::new(self.max_chars)
            .with_module_scale(self.scale)
            .with_border(self.border)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the text would be split
    Split {
        /// Input file, or `-` for stdin
        input: String,
    },
    /// Generate codes and write them all as PNG files
    Generate {
        /// Input file, or `-` for stdin
        input: String,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// File name prefix
        #[arg(long, default_value = DEFAULT_LABEL)]
        label: String,
    },
    /// Print one code to the terminal
    Preview {
        /// Input file, or `-` for stdin
        input: String,

        /// 1-based code number
        #[arg(long, default_value_t = 1)]
        index: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = cli.policy.policy();

    match cli.command {
        Commands::Split { input } => {
            let text = read_input(&input)?;
            policy.validate()?;
            let segments = longqr::Segment::collect(&text, policy.max_chars());
            for seg in &segments {
                println!(
                    "{}/{}\t{} chars\t{} bytes",
                    seg.index() + 1,
                    seg.total(),
                    seg.char_count(),
                    seg.byte_len()
                );
            }
        }
        Commands::Generate { input, out, label } => {
            let text = read_input(&input)?;
            let mut session = Session::new(policy);
            session.generate(&text).context("Failed to generate codes")?;
            let report = session
                .export_all(&out, &label)
                .with_context(|| format!("Failed to export codes to {}", out.display()))?;
            println!("Saved {} codes to {}", report.count(), report.directory.display());
        }
        Commands::Preview { input, index } => {
            let text = read_input(&input)?;
            let mut session = Session::new(policy);
            let set = session.generate(&text).context("Failed to generate codes")?;
            if index == 0 || index > set.len() {
                bail!("Code {} does not exist, there are {}", index, set.len());
            }
            let artifact = set.get(index - 1).context("Code missing from result set")?;
            print!("{}", to_terminal_string(artifact.symbol(), DEFAULT_BORDER as i32));
            println!(
                "{}/{}  {} chars  version {}",
                index,
                set.len(),
                artifact.segment().char_count(),
                artifact.version().value()
            );
        }
    }

    Ok(())
}

/// Reads the whole input and trims surrounding whitespace, as a text box would.
fn read_input(input: &str) -> Result<String> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };
    Ok(text.trim().to_owned())
}
