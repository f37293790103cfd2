use clap::{Parser, Subcommand};

/// laserup - bootstrap a Python environment and launch the laser vectorizer
#[derive(Parser, Debug)]
#[command(name = "laserup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the environment, then run the vectorizer engine
    Run {
        /// Input directory with images to vectorize
        #[arg(long, value_name = "DIR")]
        input: Option<String>,

        /// Output directory, passed to the engine via --out
        #[arg(long, value_name = "DIR")]
        out: Option<String>,

        /// Required Python version (MAJOR.MINOR, e.g. 3.11)
        #[arg(long, value_name = "VERSION")]
        python: Option<String>,

        /// Virtual environment directory
        #[arg(long, value_name = "DIR")]
        venv: Option<String>,

        /// Dependency manifest file (requirements.txt)
        #[arg(long, value_name = "FILE")]
        manifest: Option<String>,

        /// Engine entry script
        #[arg(long, value_name = "FILE")]
        entry: Option<String>,

        /// Reinstall dependencies even when the manifest is unchanged
        #[arg(long, default_value = "false")]
        sync: bool,

        /// Never pause for a keypress (for scripted use)
        #[arg(long, default_value = "false")]
        no_pause: bool,
    },

    /// Provision the environment and input scaffold without launching
    Setup {
        /// Required Python version (MAJOR.MINOR, e.g. 3.11)
        #[arg(long, value_name = "VERSION")]
        python: Option<String>,

        /// Virtual environment directory
        #[arg(long, value_name = "DIR")]
        venv: Option<String>,

        /// Dependency manifest file (requirements.txt)
        #[arg(long, value_name = "FILE")]
        manifest: Option<String>,

        /// Input directory to scaffold
        #[arg(long, value_name = "DIR")]
        input: Option<String>,

        /// Reinstall dependencies even when the manifest is unchanged
        #[arg(long, default_value = "false")]
        sync: bool,
    },

    /// Report environment health without changing anything
    Doctor {
        /// Output the report as JSON on stdout
        #[arg(long, default_value = "false")]
        json: bool,

        /// Required Python version (MAJOR.MINOR, e.g. 3.11)
        #[arg(long, value_name = "VERSION")]
        python: Option<String>,

        /// Virtual environment directory
        #[arg(long, value_name = "DIR")]
        venv: Option<String>,

        /// Dependency manifest file (requirements.txt)
        #[arg(long, value_name = "FILE")]
        manifest: Option<String>,

        /// Input directory
        #[arg(long, value_name = "DIR")]
        input: Option<String>,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: Option<String>,

        /// Engine entry script
        #[arg(long, value_name = "FILE")]
        entry: Option<String>,
    },

    /// Remove the virtual environment
    Clean {
        /// Virtual environment directory
        #[arg(long, value_name = "DIR")]
        venv: Option<String>,

        /// Show what would be removed without deleting anything
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(long, default_value = "false")]
        force: bool,
    },
}
