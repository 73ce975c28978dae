use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "unadat")]
#[command(version)]
#[command(about = "List and extract ADAT archives, local or over HTTP", long_about = None)]
#[command(after_help = "Examples:\n  \
  unadat ls game.adat                      list entry names\n  \
  unadat x game.adat 'maps\\level1.bin'    extract to data/maps/level1.bin\n  \
  unadat x -p game.adat readme.txt | more  send an entry to a pipe\n  \
  unadat ls https://example.com/game.adat  list a remote archive")]
pub struct Cli {
    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// List entry names in TOC order
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        source: SourceArgs,

        /// List verbosely with sizes and offsets
        #[arg(short = 'v')]
        verbose: bool,
    },

    /// Extract one entry
    #[command(visible_alias = "x")]
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        /// Entry name as stored in the archive
        #[arg(value_name = "ENTRY")]
        entry: String,

        #[command(flatten)]
        output: OutputArgs,

        /// Extract to pipe, no messages
        #[arg(short = 'p')]
        pipe: bool,
    },

    /// Extract every entry
    #[command(name = "extract-all", visible_alias = "xa")]
    ExtractAll {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// ADAT file path or HTTP URL
    #[arg(value_name = "ARCHIVE")]
    pub archive: String,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR", default_value = crate::adat::DEFAULT_OUTPUT_ROOT)]
    pub extract_dir: String,

    /// Quiet mode
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl SourceArgs {
    pub fn is_http_url(&self) -> bool {
        self.archive.starts_with("http://") || self.archive.starts_with("https://")
    }
}

impl Action {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Action::List { source, .. }
            | Action::Extract { source, .. }
            | Action::ExtractAll { source, .. } => source,
        }
    }

    /// No status output on stdout or stderr
    pub fn is_quiet(&self) -> bool {
        match self {
            Action::List { .. } => false,
            Action::Extract { output, pipe, .. } => output.quiet || *pipe,
            Action::ExtractAll { output, .. } => output.quiet,
        }
    }
}
