use clap::{Parser, Subcommand};
use langpress::{config, output, pipeline};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "langpress")]
#[command(about = "Static site builder for multilingual HTML pages with partials")]
#[command(long_about = "\
Static site builder for multilingual HTML pages with partials

Pages are plain HTML. A token like {{> header}} is replaced by the partial
of that name. Fragments are wrapped into a standard page skeleton; pages
that start with <!doctype html> or <html> are written as they are.

Source structure:

  src/
  ├── shared/
  │   ├── partials/                # head.html, header.html, ... for every language
  │   └── assets/                  # copied to dist/assets/
  ├── en/
  │   ├── partials/                # required; overrides shared partials by name
  │   ├── index.html               # fragment → wrapped
  │   ├── print.html               # full document → rendered only
  │   └── img/diagram.svg          # copied as-is
  └── pt/
      └── ...

The output root is deleted and rebuilt on every run, and gets a root
index.html that redirects to the default language.

Run 'langpress gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (optional; stock defaults apply when it is missing)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Source directory (overrides `source` in the config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides `output` in the config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: reset output, render every language, copy assets, write redirect
    Build,
    /// Run the whole build without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build => {
            let options = resolve_options(&cli.config, cli.source, cli.output)?;
            println!(
                "==> Building {} → {}",
                options.source_root.display(),
                options.output_root.display()
            );
            let report = pipeline::build(&options)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", options.output_root.display());
        }
        Command::Check => {
            let options = resolve_options(&cli.config, cli.source, cli.output)?;
            println!("==> Checking {}", options.source_root.display());
            let report = pipeline::check(&options)?;
            output::print_build_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config, apply command-line root overrides, and re-check the roots.
fn resolve_options(
    config_path: &std::path::Path,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<pipeline::BuildOptions, config::ConfigError> {
    let site_config = config::load_config(config_path)?;
    let mut options = pipeline::BuildOptions::from_config(&site_config);
    if let Some(source) = source {
        options.source_root = source;
    }
    if let Some(output) = output {
        options.output_root = output;
    }
    config::validate_roots(&options.source_root, &options.output_root)?;
    Ok(options)
}
