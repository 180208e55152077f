use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input .svg files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (defaults to each input's directory)
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Output file name; only valid with a single input
    #[arg(long)]
    pub out: Option<String>,

    /// Points generated per curve segment
    #[arg(long)]
    pub detail: Option<u32>,

    /// Do not instantiate the generated modules at the end of the file
    #[arg(long)]
    pub no_footer: bool,

    /// Include/use line for the output header (repeatable, replaces the defaults)
    #[arg(long = "import", value_name = "LINE")]
    pub imports: Vec<String>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the resolved path documents as JSON
    #[arg(long)]
    pub dump_ast: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
