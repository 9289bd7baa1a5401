use clap::Parser;

use tileset_georef::cli::{run_cli, Args};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let args = Args::parse();
    std::process::exit(run_cli(args));
}
