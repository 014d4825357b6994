use crate::cli;
use std::time::{Duration, Instant};
use stratus_core::{
    config::{sync, Config},
    runner::{cancellation, Batch, Failure, Observer, Outcome, Runner},
    transfer::Transfer,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn setup_logger() -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    Registry::default()
        .with(LevelFilter::from(Level::WARN))
        .with(layer().with_ansi(true).with_target(false).without_time())
        .try_init()?;
    Ok(())
}

fn write_color(text: &str, fg_color: Color) -> std::io::Result<()> {
    use std::io::Write as _;

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(fg_color)))?;
    let result = stdout.write_all(text.as_bytes());
    stdout.reset().ok();
    result
}

#[derive(Debug)]
struct Reporter {
    started: Instant,
}

impl Reporter {
    fn new() -> Self {
        Reporter {
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> String {
        let elapsed = Duration::from_secs(self.started.elapsed().as_secs());
        humantime::format_duration(elapsed).to_string()
    }
}

impl Observer for Reporter {
    fn source_started(&mut self, source: &sync::Source) {
        println!("Backing up '{}'", source.path.0);
    }

    fn progress(&mut self, percent: u8) {
        use std::io::Write as _;

        print!("\r{:>3}%", percent);
        std::io::stdout().flush().ok();
    }

    fn source_succeeded(&mut self, _source: &sync::Source) {
        print!("\r");
        write_color("done.\n", Color::Green).ok();
    }

    fn completed(&mut self) {
        write_color("Sync completed successfully.", Color::Green).ok();
        println!(" ({})", self.elapsed());
    }

    fn failed(&mut self, failure: &Failure) {
        print!("\r");
        write_color(&format!("error: {}\n", failure.diagnostic()), Color::Red).ok();
    }

    fn cancelled(&mut self) {
        write_color("Sync canceled.\n", Color::Yellow).ok();
    }
}

pub async fn run(transfer: Transfer, config: &Config, args: cli::sync::Cli) -> eyre::Result<()> {
    setup_logger()?;

    let sync_name = sync::Name(args.sync);
    let sync = config.sync(&sync_name)?;
    let destination = config.destination_for_sync(sync)?;
    tokio::fs::create_dir_all(&destination.path.0).await?;

    let (handle, token) = cancellation::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let batch = Batch::from_definitions(sync, destination);
    let runner = Runner::new(transfer);
    let mut reporter = Reporter::new();
    match runner.execute(&batch, &mut reporter, &token).await {
        Outcome::Completed | Outcome::Cancelled => Ok(()),
        Outcome::Failed(failure) => Err(failure.into()),
        Outcome::Invalid(invalid) => Err(invalid.into()),
    }
}
