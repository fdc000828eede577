use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;
use std::thread;
use tag_projection_cli::{RenderOptions, load_jobs, run_jobs};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("tag-project")
        .version("0.1.0")
        .about("Project inline markup from source sentences onto their translations")
        .arg(
            Arg::new("jobs")
                .help("JSON file holding one job or an array of jobs")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .short('p')
                .help("Render words only, without markup")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .short('t')
                .help("Join tokens with single spaces instead of the original spacing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .short('j')
                .help("Print a JSON array of outcomes, projected tags included")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('n')
                .help("Number of worker threads (default: available parallelism)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log projection details to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = matches
        .get_one::<PathBuf>("jobs")
        .ok_or("missing job file")?;
    let options = RenderOptions {
        include_tags: !matches.get_flag("plain"),
        include_whitespace: !matches.get_flag("tokens"),
    };
    let threads = match matches.get_one::<usize>("threads") {
        Some(&n) => n.max(1),
        None => thread::available_parallelism().map_or(1, |n| n.get()),
    };

    let jobs = load_jobs(path)?;
    info!(jobs = jobs.len(), threads, "projecting tags");

    let outcomes = run_jobs(&jobs, options, threads);
    let failed = outcomes.iter().filter(|o| !o.is_success()).count();

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            match (&outcome.rendered, &outcome.error) {
                (Some(rendered), _) => println!("{}", rendered),
                (None, Some(error)) => {
                    println!();
                    eprintln!("job {}: {}", outcome.index, error);
                }
                (None, None) => println!(),
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} jobs failed", failed, outcomes.len()).into());
    }

    info!(jobs = outcomes.len(), "done");
    Ok(())
}
