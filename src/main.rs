//! `voronoi-vertices`: reads a point count and coordinate pairs from stdin,
//! writes the sorted Voronoi vertices of their Delaunay triangulation to
//! stdout.
//!
//! ```bash
//! printf '4\n0 0\n4 0\n4.5 4\n0.5 3.5\n' | cargo run --release
//! ```
//!
//! Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).

use std::io::{self, BufWriter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    match delaunay_dual::io::run(io::stdin().lock(), BufWriter::new(stdout.lock())) {
        Ok(count) => {
            tracing::debug!("Wrote {count} Voronoi vertices");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
