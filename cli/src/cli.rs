use clap::Parser;
use frameseq::DEFAULT_FORMAT;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lss", about = "List a directory with numbered files collapsed into sequences")]
pub struct Args {
    /// Directory to list
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Output pattern (%l %s %e %f %m %p %r %R %h %t, optional width like %4l)
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// End a sequence at the first file that does not fit instead of skipping it
    #[arg(long)]
    pub stop_at_gap: bool,

    /// Print one JSON object per sequence instead of formatted lines
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
