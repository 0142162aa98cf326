use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Filesystem helpers around a manuscript build.
#[derive(Parser, Debug)]
#[command(name = "rxiv-files", version, about = "Manuscript build file helpers")]
pub struct Cli {
    /// Run as if started in this directory.
    #[arg(short = 'C', long = "chdir", global = true)]
    pub chdir: Option<PathBuf>,
    /// Manuscript directory; overrides `MANUSCRIPT_PATH` and `.env`.
    #[arg(short = 'm', long = "manuscript-path", global = true)]
    pub manuscript_path: Option<String>,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the output directory if it does not exist yet.
    OutputDir { dir: PathBuf },
    /// Print the path of the main manuscript file.
    Locate,
    /// Write generated LaTeX into the output directory.
    WriteTex(WriteTexArgs),
    /// Print the custom PDF filename derived from the manuscript metadata.
    PdfName(PdfNameArgs),
    /// Copy the generated PDF into the manuscript folder.
    CopyPdf(OutputArgs),
    /// Print the resolved file layout as JSON.
    Info(OutputArgs),
}

#[derive(Args, Debug)]
pub struct WriteTexArgs {
    pub output_dir: PathBuf,
    /// File holding the generated LaTeX; `-` or omitted reads stdin.
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PdfNameArgs {
    /// YAML file to read instead of the manuscript's own metadata.
    #[arg(long = "metadata")]
    pub metadata: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    pub output_dir: PathBuf,
}

pub fn parse() -> Cli {
    Cli::parse()
}
