//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "bitext-curator", about = "parallel corpus curation tool.")]
/// Holds every command that is callable by the `bitext-curator` command.
pub enum Curator {
    #[structopt(about = "Resolve, merge, split and deduplicate the sources of a config")]
    Curate(Curate),
    #[structopt(about = "Split an aligned corpus into training and validation files")]
    Split(Split),
    #[structopt(about = "Remove duplicate pairs from an aligned corpus, in place")]
    Dedup(Dedup),
    #[structopt(about = "Search the sources of a config")]
    Find(Find),
    #[structopt(about = "Print the JSON schema of the config file")]
    Schema,
}

#[derive(Debug, StructOpt)]
/// Curate command and parameters.
///
/// ```sh
/// USAGE:
///     bitext-curator curate [FLAGS] [OPTIONS]
///
/// FLAGS:
///         --reverse    swap source and target languages
///         --rerun      remove the run directory first
///
/// OPTIONS:
///     -c, --config <config>                           [default: model-config.json]
///         --run-dir <run-dir>                         default is run/<from>_<to>-<version>
///         --cache-dir <cache-dir>                     [default: cache]
///         --max-eval-sentences <max-eval-sentences>
///     -t, --threads <threads>
///         --seed <seed>
/// ```
pub struct Curate {
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "config",
        help = "configuration file",
        default_value = "model-config.json"
    )]
    pub config: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "run-dir",
        help = "run directory. Default is run/<from>_<to>-<version>."
    )]
    pub run_dir: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "cache-dir",
        help = "where remote sources are extracted",
        default_value = "cache"
    )]
    pub cache_dir: PathBuf,
    #[structopt(long = "reverse", help = "swap source and target languages")]
    pub reverse: bool,
    #[structopt(long = "rerun", help = "remove the run directory first")]
    pub rerun: bool,
    #[structopt(
        long = "max-eval-sentences",
        help = "maximum size of the validation set. Overrides the config."
    )]
    pub max_eval_sentences: Option<usize>,
    #[structopt(short = "t", long = "threads", help = "worker threads. Default is the number of CPUs.")]
    pub threads: Option<usize>,
    #[structopt(long = "seed", help = "seed of the split random generator")]
    pub seed: Option<u64>,
}

#[derive(Debug, StructOpt)]
pub struct Split {
    #[structopt(parse(from_os_str), help = "source side of the corpus")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "target side of the corpus")]
    pub tgt: PathBuf,
    #[structopt(parse(from_os_str), help = "destination directory")]
    pub dst: PathBuf,
    #[structopt(
        long = "max-eval-sentences",
        help = "maximum size of the validation set",
        default_value = "5000"
    )]
    pub max_eval_sentences: usize,
    #[structopt(
        long = "shuffle-buffer",
        help = "number of training pairs held for shuffling",
        default_value = "100000"
    )]
    pub shuffle_buffer: usize,
    #[structopt(long = "seed", help = "seed of the random generator")]
    pub seed: Option<u64>,
}

#[derive(Debug, StructOpt)]
/// Dedup command and parameters.
pub struct Dedup {
    #[structopt(parse(from_os_str), help = "source side of the corpus")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "target side of the corpus")]
    pub tgt: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Find {
    #[structopt(help = "text to look for (case insensitive)")]
    pub text: String,
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "config",
        help = "configuration file",
        default_value = "model-config.json"
    )]
    pub config: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "cache-dir",
        help = "where remote sources are extracted",
        default_value = "cache"
    )]
    pub cache_dir: PathBuf,
    #[structopt(long = "reverse", help = "swap source and target languages")]
    pub reverse: bool,
}
