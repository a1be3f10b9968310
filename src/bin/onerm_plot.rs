use anyhow::Context;
use log::{debug, info};
use onerm_plot::chart::ChartSpec;
use onerm_plot::plot::parse_cli;
use onerm_plot::{viewer, Progress};

fn main() -> anyhow::Result<()> {
    let (csvin, verbose) = parse_cli();
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    info!("read data from {}", csvin.display());
    let progress = Progress::from_csv(&csvin)
        .with_context(|| format!("loading {}", csvin.display()))?;
    info!("loaded {} rows", progress.len());
    debug!("\n{}", progress);

    let spec = ChartSpec::default();
    let (width, height) = spec.pixel_size();
    info!("render chart {}x{}", width, height);
    let chart = spec.render(&progress).context("rendering the chart")?;

    viewer::show(&spec.title, &chart).context("showing the chart")?;
    Ok(())
}
