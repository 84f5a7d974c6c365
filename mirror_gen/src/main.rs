use clap::{Parser, Subcommand};
use cmds::analyze::TreeFormat;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cmds;

#[derive(Parser)]
#[command(name = "mirror-gen")]
#[command(
    about = "Generates layout-identical mirrors of Go types with unsafe conversion functions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate mirror types and conversion functions into a Go file */
    Generate {
        /* Namespace files describing the module's packages */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported namespace files */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Output Go file */
        #[arg(short = 'o', long = "output", value_name = "FILE", required = true)]
        output: PathBuf,

        /* Package clause of the generated file (defaults to the namespace's package) */
        #[arg(short = 'p', long = "package", value_name = "NAME")]
        package: Option<String>,

        /* Don't include the go:generate comment */
        #[arg(short = 'x', long = "exclude-comment")]
        exclude_comment: bool,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,

        /* Qualified struct names, e.g. vimagination.zapto.org/httpreaderat.Request */
        #[arg(value_name = "TYPE", required = true)]
        types: Vec<String>,
    },

    /* Print the declaration tree synthesized for the requested types */
    Analyze {
        /* Namespace files describing the module's packages */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported namespace files */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Format to use when printing the tree */
        #[arg(long = "format", value_enum, default_value = "json")]
        format: TreeFormat,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,

        /* Qualified struct names */
        #[arg(value_name = "TYPE", required = true)]
        types: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            files,
            include_dirs,
            output,
            package,
            exclude_comment,
            verbose,
            types,
        } => {
            init_tracing(verbose);
            cmds::generate::run(cmds::generate::GenerateOptions {
                files,
                include_dirs,
                output,
                package,
                exclude_comment,
                types,
            })?;
        }

        Commands::Analyze {
            files,
            include_dirs,
            format,
            verbose,
            types,
        } => {
            init_tracing(verbose);
            cmds::analyze::run(files, include_dirs, format, types)?;
        }
    }

    Ok(())
}
