//! file-factory's entry point.
//! Parses arguments, configures logging and reports the outcome of a run.

use file_factory::{
    cli::{execute, get_args, Args, Outcome},
    error::{default_error_handler, Result},
    prompt::DialoguerPrompter,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let dry_run = args.dry_run;
    let outcome = execute(args, &DialoguerPrompter)?;
    report(&outcome, dry_run);
    Ok(())
}

fn report(outcome: &Outcome, dry_run: bool) {
    let Outcome { artifact_type, name, package_root, result } = outcome;
    let display = |path: &std::path::Path| {
        path.strip_prefix(package_root).unwrap_or(path).display().to_string()
    };

    if dry_run {
        println!("Dry run: nothing was written.");
    }
    println!("✓ Created {artifact_type}: {name}");
    for file in &result.files {
        println!("  {}", display(file));
    }
    for barrel in result.barrels.iter().filter(|barrel| barrel.updated) {
        let action = if barrel.created { "created" } else { "updated" };
        println!("  {} ({action}): {}", display(&barrel.file_path), barrel.export_line.trim());
    }
}
