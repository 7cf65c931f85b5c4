use anyhow::Result;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tickli::context::{AppContext, StandardContext};
use tickli::storage::ListStorage;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        tickli::cli::print_help("tickli");
        return Ok(());
    }

    // Optional config/data root override, shared by all commands.
    let root = args
        .iter()
        .position(|a| a == "--root" || a == "-r")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);
    let ctx = Arc::new(StandardContext::new(root));

    // CLI Command: tickli export
    if args.iter().any(|a| a == "export") {
        let tasks = ListStorage::load(ctx.as_ref())?;
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    // The TUI owns the terminal, so logging goes to a file.
    if let Ok(log_path) = ctx.get_log_file_path()
        && let Ok(file) = std::fs::File::create(&log_path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, LogConfig::default(), file);
    }

    tickli::tui::run(ctx)
}
