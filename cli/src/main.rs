mod cli;
mod fs;

use clap::Parser;
use cli::Args;
use eyre::{Result, WrapErr};
use frameseq::{BuildOptions, ScanPolicy, Template, group_sequences};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let template: Template = args
        .format
        .parse()
        .wrap_err_with(|| format!("invalid --format {:?}", args.format))?;

    let cwd = std::env::current_dir()?;
    let dir = cwd.join(&args.dir);
    let policy = if args.stop_at_gap {
        ScanPolicy::StopAtFirstMismatch
    } else {
        ScanPolicy::SkipAndContinue
    };
    let options = BuildOptions::new(&dir).with_policy(policy);

    let names = fs::list_file_names(&dir)?;
    for seq in group_sequences(names, &options) {
        if args.json {
            println!("{}", serde_json::to_string(&seq.attrs())?);
        } else {
            println!("{}", template.render(&seq));
        }
    }

    Ok(())
}
