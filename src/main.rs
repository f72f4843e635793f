use clap::{Parser, Subcommand};
use format_web_templates::config::{self, SiteConfig};
use format_web_templates::format::{self, FormatOptions};
use format_web_templates::{output, paths, scan, version};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "format-web-templates")]
#[command(about = "Copy a templated site tree, filling in nav bar, version and analytics markers")]
#[command(long_about = "\
Copy a templated site tree, filling in nav bar, version and analytics markers

Every file under the input directory is mirrored into the output directory.
Files with a binary extension (wasm, png by default) are copied byte-for-byte.
All other files are read as UTF-8 text and these markers are replaced:

  <!-- BJ_TMPL_NAV_BAR -->   site navigation bar
  <!-- BJ_TMPL_VERSION -->   \"<commit date> (<short hash>)\" from git
  <!-- GOOGLE_SHIT -->       analytics snippet (unless --no-analytics)

Existing files in the output directory are overwritten; files with no
counterpart in the input are left alone.

Run 'format-web-templates gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Input directory [default: www]
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Output directory [default: www-out]
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Config file [default: format-web.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Leave the analytics marker untouched
    #[arg(long, global = true)]
    no_analytics: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Format the input tree into the output directory (default)
    Build,
    /// List what would be written without touching the output directory
    Check,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.as_ref().unwrap_or(&Command::Build) {
        Command::Build => {
            let (site_config, input, output_dir) = resolve_roots(&cli)?;
            scan::validate_input_root(&input)?;
            let version = version::resolve_version(&input);
            log::info!("Version string: {version:?}");
            let options = FormatOptions::from_site_config(&site_config, version);
            let report = format::format_tree(&input, &output_dir, &options)?;
            output::print_build_output(&report, &output_dir);
        }
        Command::Check => {
            let (site_config, input, output_dir) = resolve_roots(&cli)?;
            let entries =
                format::plan_tree(&input, &output_dir, &site_config.files.binary_extensions())?;
            output::print_check_output(&entries, &input);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Route `log` records to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Load the config file, apply flags that override it, and resolve both roots.
fn resolve_roots(cli: &Cli) -> Result<(SiteConfig, PathBuf, PathBuf), Box<dyn Error>> {
    let loaded = match &cli.config {
        Some(path) => config::load_config(path, true)?,
        None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE), false)?,
    };
    let site_config = config::apply_overrides(
        loaded,
        cli.input.as_deref(),
        cli.output.as_deref(),
        cli.no_analytics,
    );
    let input = paths::resolve_dir(&site_config.input)?;
    let output_dir = paths::resolve_dir(&site_config.output)?;
    Ok((site_config, input, output_dir))
}
