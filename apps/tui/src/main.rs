use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use clap::Parser;
use log::{info, LevelFilter};
use radar_core::{Jitter, RandomJitter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tech_radar_tui::cli::CliArgs;
use tech_radar_tui::config::{debug_enabled, init_app_config};
use tech_radar_tui::{event, export, terminal, App};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    init_logging();

    let app_config = init_app_config()?;
    let jitter: Box<dyn Jitter> = match args.seed {
        Some(seed) => {
            info!("Seeding placement with {seed}");
            Box::new(RandomJitter::with_rng(StdRng::seed_from_u64(seed)))
        }
        None => Box::new(RandomJitter::new()),
    };
    let mut app = App::new(app_config.radar, app_config.theme, jitter)
        .wrap_err_with(|| format!("Failed to render {}", app_config.config_path.display()))?;

    if args.is_batch() {
        return run_batch(&args, &app);
    }

    if !is_terminal() {
        return event::run_headless(&app, false, &mut std::io::stdout().lock());
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup(true, true);
    result
}

fn run_batch(args: &CliArgs, app: &App) -> Result<()> {
    if let Some(path) = &args.svg {
        export::export_svg(&app.scene, path)?;
    }
    if let Some(path) = &args.html {
        export::export_html(&app.scene, &app.legend, path)?;
    }
    if args.headless || args.json {
        event::run_headless(app, args.json, &mut std::io::stdout().lock())?;
    }
    Ok(())
}

/// Logs go to stderr so they never mix with headless output.
fn init_logging() {
    let level = if debug_enabled() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
