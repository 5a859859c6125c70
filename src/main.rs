/*!
 * Command-line interface for codedump
 */

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use codedump::config::{Args, Config, DEFAULT_PROJECT_ROOT};
use codedump::error::Result;
use codedump::report::{Reporter, RunReport};
use codedump::utils::project_name;
use codedump::writer::ReportWriter;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();
    init_logger(args.verbose, args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Export aborted: {:?}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8, quiet: bool) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(mut args: Args) -> Result<()> {
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    if args.directory_path.is_none() && interactive {
        args.directory_path = Some(prompt_for_root()?);
    }
    let quiet = args.quiet;

    // Create and validate configuration before touching the output file
    let config = Config::from_args(args);
    config.validate()?;

    let project = project_name(&config.target_dir);
    log::info!("Starting codebase extraction...");
    log::info!("Project: {}", project);
    log::info!("Root: {}", config.target_dir.display());

    let progress = if quiet || !std::io::stderr().is_terminal() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg:.dim.white}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix("📄 Exporting");
        bar
    };

    let start_time = Instant::now();
    let writer = ReportWriter::new(&config, Arc::new(progress.clone()));
    let summary = writer.write()?;
    progress.finish_and_clear();

    if !quiet {
        let run_report = RunReport {
            output_file: config.output_file.display().to_string(),
            project_name: project,
            duration: start_time.elapsed(),
            summary,
        };
        Reporter::new().print_report(&run_report);
    }

    Ok(())
}

fn prompt_for_root() -> Result<String> {
    let answer: String = Input::new()
        .with_prompt(format!(
            "Press Enter to use default path ({}) or enter new path",
            DEFAULT_PROJECT_ROOT
        ))
        .default(DEFAULT_PROJECT_ROOT.to_string())
        .show_default(false)
        .interact_text()?;

    let answer = answer.trim();
    Ok(if answer.is_empty() {
        DEFAULT_PROJECT_ROOT.to_string()
    } else {
        answer.to_string()
    })
}
