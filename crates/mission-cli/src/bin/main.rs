//! mission - lesson plan outlines, exports and signal gauges

use anyhow::Result;
use mission_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
