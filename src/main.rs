use clap::Parser;
use dr_demod::logger;

use tracing::info;

mod cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    logger::init(if args.verbose { "debug" } else { "info" });

    info!("Starting dr_demod...");

    let settings = cli::Settings::from_args(&args)?;
    for job in cli::plan_jobs(&args)? {
        let summary = cli::convert(&settings, &job)?;
        println!(
            "Size of demodulated image: {} {}",
            summary.demodulated_width, summary.height
        );
        println!("Image written to {}", job.output.display());
    }

    Ok(())
}
