use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = svg2scad::cli::Cli::parse();

    // logging is configured here, never in the library
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    svg2scad::run(&args)
}
