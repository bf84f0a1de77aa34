use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "svntl")]
#[command(about = "Subversion LOC timeline: growth charts and HTML reports")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Repository URL (or local path with file://)")]
    pub url: String,

    #[arg(long, default_value = "timeline", help = "Output directory for charts and report")]
    pub output: PathBuf,

    #[arg(long, help = "Chart and report title (defaults to the URL)")]
    pub title: Option<String>,

    #[arg(long, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the reconstructed LOC timeline
    Loc {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Render the timeline charts as PNG files
    Charts,
    /// Write the HTML report (expects charts to exist already)
    Html,
    /// Full statistics run: charts plus HTML report
    Report,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Loc { json, ndjson } => crate::loc::exec(self.common, json, ndjson),
            Commands::Charts => crate::chart::exec(self.common),
            Commands::Html => crate::report::exec_html(self.common),
            Commands::Report => crate::report::exec_report(self.common),
        }
    }
}
