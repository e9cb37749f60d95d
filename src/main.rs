//! # bitext-curator
//!
//! Curation of parallel corpora for machine translation training:
//! sources declared in a config file are cleaned by their rules, merged,
//! split into training and validation sets and deduplicated.
//!
//! ## Getting started
//!
//! ```sh
//! USAGE:
//!     bitext-curator <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     curate    Resolve, merge, split and deduplicate the sources of a config
//!     dedup     Remove duplicate pairs from an aligned corpus, in place
//!     find      Search the sources of a config
//!     help      Prints this message or the help of the given subcommand(s)
//!     schema    Print the JSON schema of the config file
//!     split     Split an aligned corpus into training and validation files
//! ```
use std::path::Path;

use structopt::StructOpt;

use bitext_curator::config::Config;
use bitext_curator::error::Error;
use bitext_curator::pipelines::{Curate, CurateOptions, Pipeline};
use bitext_curator::processing::{dedup, SplitPaths, Splitter};
use bitext_curator::sources::{find, resolve_sources, ResolveOptions};

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Curator::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Curator::Curate(c) => {
            let config = Config::from_path(&c.config)?;
            let mut curate_config = config.clone();
            if c.reverse {
                curate_config.reverse();
            }
            let run_dir = c
                .run_dir
                .unwrap_or_else(|| curate_config.run_dir(Path::new(".")));
            let options = CurateOptions {
                run_dir,
                cache_dir: c.cache_dir,
                reverse: c.reverse,
                rerun: c.rerun,
                max_eval_sentences: c.max_eval_sentences,
                threads: c.threads,
                seed: c.seed,
            };
            let report = Curate::new(config, options).run()?;
            info!(
                "done: {:?} ({} training, {} validation pairs)",
                report.files.train_src, report.split.train, report.split.validation
            );
        }

        cli::Curator::Split(s) => {
            std::fs::create_dir_all(&s.dst)?;
            let report = Splitter::new(s.max_eval_sentences, s.shuffle_buffer)
                .seed(s.seed)
                .run(&s.src, &s.tgt, &SplitPaths::in_dir(&s.dst))?;
            info!("{:?}", report);
        }

        cli::Curator::Dedup(d) => {
            let removed = dedup(&d.src, &d.tgt)?;
            println!("{}", removed);
        }

        cli::Curator::Find(f) => {
            let mut config = Config::from_path(&f.config)?;
            if f.reverse {
                config.reverse();
            }
            let options = ResolveOptions {
                cache_dir: f.cache_dir,
                reverse: f.reverse,
            };
            let specs = resolve_sources(&config, &options)?;
            for m in find(&specs, &f.text)? {
                println!("{}", m);
            }
        }

        cli::Curator::Schema => {
            println!("{}", Config::schema()?);
        }
    };
    Ok(())
}
