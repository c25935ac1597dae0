use circle_sample::config;
use circle_sample::gui::app::AppModel;
use circle_sample::sys::runtime;
use circle_visualizer::RadialLineVisualizer;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "circle-sample", version, about, long_about = None)]
struct Cli {
    /// Read the configuration from this file instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the default configuration file (if missing) and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => std::path::absolute(path)?,
        None => config::get_config_path()?,
    };

    if cli.write_default_config {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);
    let visualizer = RadialLineVisualizer::with_settings(config.settings()?)?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config_path.clone());

    // GTK would reject our own flags, so it gets no arguments.
    let app = RelmApp::new("org.circlevisualizer.sample").with_args(Vec::new());

    app.run::<AppModel>((visualizer, config, config_path, rx));
    Ok(())
}
