//! Command-line entry point.

use overmark_app::AppError;
use std::path::PathBuf;

const USAGE: &str = "overmark <script.json> <output.png> [background-image]";

fn run() -> Result<(), AppError> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(script), Some(output)) = (args.next(), args.next()) else {
        return Err(AppError::Usage(USAGE.to_string()));
    };
    let background = args.next();
    overmark_app::render_file(&script, &output, background.as_deref())
}

fn main() {
    env_logger::init();
    log::info!("Starting Overmark");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
