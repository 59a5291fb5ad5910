use std::borrow::Cow;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use levelforge_core::campaign::CampaignArtifact;
use levelforge_core::progression::campaign_seed;
use levelforge_core::types::LevelKey;
use levelforge_core::world::WorldContracts;
use levelforge_gen::{assemble_authored_level, generate_level, LevelRequest};
use levelforge_rules::loader::{
    load_campaign_file, load_catalog_file, load_config_file, load_world_rules_file,
};
use levelforge_rules::{
    builtin_campaign, builtin_catalog, campaign_level, check_mirror, validate_campaign,
    RecoveryPolicy, ValidatorConfig,
};

use levelforge_cli::export::{export_authored, export_generated, ExportOptions, ExportSummary};
use levelforge_cli::{artifacts, preview, report};

const DEFAULT_BASE_SEED: u32 = 1337;

/// Generate platformer levels and validate campaign pacing.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate platformer levels and validate campaign pacing",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pacing validator over a campaign.
    Validate {
        /// Validator config (RON). Flags below override its values.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Treat cross-world tag allowlist findings as blocking.
        #[arg(long)]
        strict: bool,
        /// Recovery-gap counting policy.
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Location prefix used in failure reports.
        #[arg(long)]
        source: Option<String>,
        /// Campaign JSON to validate instead of the builtin table.
        #[arg(long, value_name = "FILE")]
        campaign: Option<PathBuf>,
        /// Chunk catalog (RON, or JSON artifact) instead of the builtin one.
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// World-rules JSON artifact instead of the builtin contracts.
        #[arg(long, value_name = "FILE")]
        world_rules: Option<PathBuf>,
        /// Persisted campaign JSON mirror to compare against the builtin table.
        #[arg(long, value_name = "FILE")]
        mirror: Option<PathBuf>,
        /// Write the JSON report here.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
        /// Print a markdown summary table instead of one line per failure.
        #[arg(long)]
        markdown: bool,
    },
    /// Export levels as JSON documents.
    Export {
        /// Output directory.
        #[arg(long, default_value = "artifacts/levels")]
        out: PathBuf,
        /// Export every campaign level (ignores --world/--levels).
        #[arg(long)]
        all: bool,
        #[arg(long, default_value_t = 1)]
        world: u32,
        /// Comma-separated level indices.
        #[arg(long, value_delimiter = ',', default_value = "2")]
        levels: Vec<u32>,
        #[arg(long)]
        bonus: bool,
        /// Base seed mixed with world and level (decimal or 0x hex).
        #[arg(long, value_parser = parse_u32, default_value_t = DEFAULT_BASE_SEED)]
        seed: u32,
        /// Assemble the authored campaign instead of generating.
        #[arg(long, conflicts_with = "bonus")]
        authored: bool,
        /// With --authored: treat tag allowlist findings as blocking.
        #[arg(long, requires = "authored")]
        strict: bool,
    },
    /// Print an ASCII preview of one level.
    Preview {
        #[arg(long, default_value_t = 1)]
        world: u32,
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Base seed mixed with world and level (decimal or 0x hex).
        #[arg(long, value_parser = parse_u32, default_value_t = DEFAULT_BASE_SEED)]
        seed: u32,
        #[arg(long)]
        bonus: bool,
        /// Preview the authored layout instead of a generated one.
        #[arg(long, conflicts_with = "bonus")]
        authored: bool,
        /// First column to show.
        #[arg(long, default_value_t = 0)]
        from: usize,
        /// Number of columns to show (default: the whole level).
        #[arg(long)]
        cols: Option<usize>,
    },
    /// Write the campaign, chunk catalog and world-rules JSON artifacts.
    Artifacts {
        #[arg(long, default_value = "artifacts")]
        out: PathBuf,
        /// Chunk catalog (RON, or JSON artifact) instead of the builtin one.
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Window,
    Countdown,
}

impl From<PolicyArg> for RecoveryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Window => RecoveryPolicy::Window,
            PolicyArg::Countdown => RecoveryPolicy::Countdown,
        }
    }
}

fn parse_u32(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|err| format!("invalid number '{value}': {err}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let code = match cli.command {
        Command::Validate {
            config,
            strict,
            policy,
            source,
            campaign,
            catalog,
            world_rules,
            mirror,
            report: report_path,
            markdown,
        } => {
            let mut config = match config {
                Some(path) => load_config_file(&path)?,
                None => ValidatorConfig::default(),
            };
            config.strict |= strict;
            if let Some(policy) = policy {
                config.recovery_policy = policy.into();
            }
            if let Some(source) = source {
                config.source = source;
            }

            let campaign: Cow<'_, CampaignArtifact> = match campaign {
                Some(path) => Cow::Owned(load_campaign_file(&path)?),
                None => Cow::Borrowed(builtin_campaign()),
            };
            let catalog = match catalog {
                Some(path) => load_catalog_file(&path)?,
                None => builtin_catalog()?,
            };
            let contracts = match world_rules {
                Some(path) => load_world_rules_file(&path)?,
                None => WorldContracts::builtin(),
            };

            let failures = validate_campaign(&campaign, &catalog, &contracts, &config);
            let mut summary =
                report::ValidationReport::new(&config.source, campaign.levels.len(), &failures);
            if let Some(path) = mirror {
                let mirrored = load_campaign_file(&path)?;
                summary = summary.with_drift(&check_mirror(builtin_campaign(), &mirrored));
            }

            if markdown {
                println!("{}", report::format_markdown(&summary));
            } else {
                print!("{}", report::format_text(&summary));
            }
            if let Some(path) = report_path {
                report::save_report(&path, &summary)
                    .with_context(|| format!("saving report to {}", path.display()))?;
                log::info!("Saved report to {}", path.display());
            }
            summary.exit_code()
        }

        Command::Export {
            out,
            all,
            world,
            levels,
            bonus,
            seed,
            authored,
            strict,
        } => {
            let summary = if authored {
                let config = ValidatorConfig {
                    strict,
                    ..ValidatorConfig::default()
                };
                export_authored(
                    &out,
                    builtin_campaign(),
                    &builtin_catalog()?,
                    &WorldContracts::builtin(),
                    &config,
                    seed,
                )?
            } else {
                export_generated(&ExportOptions {
                    out_dir: out,
                    world,
                    levels,
                    all,
                    bonus,
                    base_seed: seed,
                })?
            };
            print_export(&summary);
            if summary.is_clean() {
                0
            } else {
                1
            }
        }

        Command::Preview {
            world,
            level,
            seed,
            bonus,
            authored,
            from,
            cols,
        } => {
            let mixed = campaign_seed(seed, world, level, bonus);
            let generated = if authored {
                let key = LevelKey::new(world, level);
                let Some(spec) = campaign_level(key) else {
                    bail!("No authored level {}", key);
                };
                assemble_authored_level(spec, &builtin_catalog()?, mixed)?
            } else {
                generate_level(&LevelRequest::new(world, level, mixed).bonus(bonus))
            };
            print!("{}", preview::render_ascii(&generated, from, cols));
            0
        }

        Command::Artifacts { out, catalog } => {
            let catalog = match catalog {
                Some(path) => load_catalog_file(&path)?,
                None => builtin_catalog()?,
            };
            for path in artifacts::write_artifacts(&out, &catalog)? {
                println!("{}", path.display());
            }
            0
        }
    };

    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

fn print_export(summary: &ExportSummary) {
    for path in &summary.written {
        println!("{}", path.display());
    }
    for rejection in &summary.rejected {
        eprintln!("rejected {}: {}", rejection.key, rejection.reasons.join("; "));
    }
    if !summary.is_clean() {
        eprintln!(
            "ERROR: {} level(s) rejected, exiting with code 1",
            summary.rejected.len()
        );
    }
}
