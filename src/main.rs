use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use release_range::cli::orchestration::{run_plan_workflow, PlanWorkflowArgs};
use release_range::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "release-range",
    version,
    about = "Show the commits since the latest release and propose the next version"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = ".", help = "Path inside the repository")]
    repo: PathBuf,

    #[arg(short, long, help = "Version of the new release; proposed when omitted")]
    semver: Option<String>,

    #[arg(short, long, help = "Open the changelog draft in your editor")]
    edit: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    init_logging(args.verbose || config.debug);

    ui::display_status(&format!("Inspecting repository at {}", args.repo.display()));

    let workflow_args = PlanWorkflowArgs {
        repo_path: args.repo,
        semver: args.semver,
        edit: args.edit,
    };

    let result = match run_plan_workflow(&workflow_args, &config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    ui::display_plan(&result.plan);

    if let Some(changelog) = &result.changelog {
        ui::display_changelog(changelog);
    }

    ui::display_success("Release range resolved");
    Ok(())
}
