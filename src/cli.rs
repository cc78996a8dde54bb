use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dropmaker")]
#[command(about = "Build data-placement injection drops and query the site directory")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct Output {
    /// Write the drop to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Treat --output as a directory and name the file after the current time
    #[arg(long, requires = "output")]
    pub stamp: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drop for fileblocks of one dataset
    Blocks {
        /// Target service, defaults to the config file's
        #[arg(short, long)]
        service: Option<String>,

        /// Dataset the blocks belong to
        #[arg(short, long)]
        dataset: String,

        /// JSON manifest with the content of every block
        #[arg(short, long, value_name = "FILE")]
        metadata: PathBuf,

        #[command(flatten)]
        output: Output,

        /// Blocks to announce, in this order
        #[arg(required = true)]
        blocks: Vec<String>,
    },

    /// Drop announcing datasets without blocks
    Datasets {
        /// Target service, defaults to the config file's
        #[arg(short, long)]
        service: Option<String>,

        #[command(flatten)]
        output: Output,

        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Site directory lookups
    Site {
        /// Drop the cached replies first
        #[arg(long)]
        clear_cache: bool,

        #[command(subcommand)]
        query: SiteQuery,
    },
}

#[derive(Subcommand)]
pub enum SiteQuery {
    /// CEs of the sites matching a CMS name pattern
    CmsToCe { name: String },
    /// SEs of the sites matching a CMS name pattern
    CmsToSe { name: String },
    /// CMS names of the sites owning a CE
    CeToCms { host: String },
    /// CMS names of the sites owning an SE
    SeToCms { host: String },
    /// PhEDEx nodes of a CMS site
    CmsToNode { name: String },
    /// CMS site of a PhEDEx node
    NodeToCms { node: String },
    AllCe,
    AllSe,
    AllCms,
    /// Account name for a certificate DN
    User { dn: String },
    /// Group responsibilities for a certificate DN
    Groups { dn: String },
    /// Legacy se_node_map.ini report
    SeNodeMap,
}
