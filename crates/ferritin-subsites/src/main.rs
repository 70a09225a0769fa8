use clap::Parser;
mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    // The report table prints every row and column. Set while the process is still
    // single-threaded, before the polars and rayon pools start.
    std::env::set_var("POLARS_FMT_MAX_COLS", "-1");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "-1");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = cli::Cli::parse();
    cli.execute()?;
    Ok(())
}
