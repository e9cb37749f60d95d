/*! Sources

Turns the declared sources of a [crate::config::Config] into validated [SourceSpec]s:
locates the source/target files of each declaration and attaches its rules,
run-level rules first.

Locations are either local directories (`file://<dir>` or a plain existing directory path)
or remote locations, which have to be already present in the cache directory
under `<cache_dir>/<content_hash>`. Fetching remote locations is not done here.
!*/
mod find;
mod locate;
mod spec;

pub use find::{find, FindMatch};
pub use locate::{locate_pair, Location};
pub use spec::{content_hash, resolve_sources, ResolveOptions, SourceSpec};
