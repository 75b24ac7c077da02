use anyhow::Result;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};
use worldimport::{app, config::Config};

fn main() -> Result<()> {
    // ─── logging goes to stderr; stdout carries the report ──────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(&config, &mut out)?;
    Ok(())
}
