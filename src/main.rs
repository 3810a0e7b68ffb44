use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use patch_series::cli::orchestration::{open_repository, run_series_workflow};
use patch_series::config::{self, Backend, Config};
use patch_series::ui;

#[derive(clap::Parser)]
#[command(
    name = "patch-series",
    version,
    about = "Cumulative counts of filtered commits per release tag, written as CSV"
)]
struct Args {
    #[arg(short, long, help = "Commit message filter [default: syzkaller.appspotmail.com]")]
    filter: Option<String>,

    #[arg(short, long, help = "Output file prefix [default: syzkaller]")]
    prefix: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Repository to analyze")]
    repo: PathBuf,

    #[arg(long, help = "File listing maintenance lines [default: lts_versions]")]
    lts_file: Option<PathBuf>,

    #[arg(short, long, help = "Directory for the CSV files [default: .]")]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "How to query the repository [default: git2]")]
    backend: Option<Backend>,

    #[arg(long, help = "Fail if consecutive tags do not build on each other")]
    verify_history: bool,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,
}

impl Args {
    /// Command-line values take precedence over the config file.
    fn apply(self, mut config: Config) -> Config {
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(prefix) = self.prefix {
            config.prefix = prefix;
        }
        if let Some(lts_file) = self.lts_file {
            config.lts_file = lts_file;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        config.verify_history |= self.verify_history;
        config
    }
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("patch_series")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let repo_path = args.repo.clone();
    let config = args.apply(config);

    let repo = match open_repository(config.backend, &repo_path) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    match run_series_workflow(repo.as_ref(), &config) {
        Ok(result) => ui::display_summary(&result),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
