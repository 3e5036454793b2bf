use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Project directory containing the root manifest
    #[clap(short = 'd', long, global = true, env = "ASSETSYNC_WORKING_DIR")]
    pub(crate) working_dir: Option<PathBuf>,
    /// File name of the root and dependency manifests
    #[clap(long, global = true, default_value = "composer.json")]
    pub(crate) manifest: String,
    /// Only print warnings and errors
    #[clap(short, long, global = true)]
    pub(crate) quiet: bool,
    #[command(subcommand)]
    pub(crate) command: AssetsCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum AssetsCommand {
    /// Copies the asset directories of every dependency into the project.
    /// Existing copies are replaced
    Install {
        /// Print the per-dependency status report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Print the project's namespaces and where their assets are installed
    Dirs,
    /// List the asset directories each dependency declares, without copying anything
    List,
}
