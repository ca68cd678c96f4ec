use anyhow::{Context, Result};
use clap::Parser;
use movies_demo::{DemoOptions, ScriptedSession};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = DemoOptions::parse();
    log::info!("playing {:?} scenario", options.scenario);

    let mut session = ScriptedSession::new(&options)
        .context("failed to start the movie screen")?;
    let gestures = options.scenario.gestures();
    let report = session.run(&gestures).context("scripted session failed")?;

    println!(
        "{} gestures, {} animation frames",
        report.gestures, report.frames
    );
    for title in &report.dismissed {
        println!("  dismissed  {title}");
    }
    for (index, title) in report.remaining.iter().enumerate() {
        println!("  {index:>2}. {title}");
    }
    Ok(())
}
