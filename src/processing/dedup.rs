/*! Deduplication

Removes exact duplicate pairs from an aligned pair of files, keeping first occurrences in order.

Pairs are tracked by digest (see [runiq::filters::DigestFilter]), so memory grows with
the number of unique pairs, not with their size.
!*/
use std::path::{Path, PathBuf};

use log::info;
use runiq::filters::{DigestFilter, Filter};

use crate::error::Error;
use crate::io::{PairReader, PairWriter, WriterTrait};
use crate::pair::SentencePair;

/// Temporary sibling of `path`.
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".dedup");
    path.with_file_name(name)
}

/// Deduplicate `src`/`tgt` in place, returning the number of removed pairs.
pub fn dedup(src: &Path, tgt: &Path) -> Result<usize, Error> {
    let src_partial = partial_path(src);
    let tgt_partial = partial_path(tgt);

    let mut filter = DigestFilter::default();
    let mut writer = PairWriter::create(&src_partial, &tgt_partial)?;
    let mut removed = 0;

    for line in PairReader::open(src, tgt)? {
        let (_, s, t) = line?;
        let pair = SentencePair::new(s, t);
        if filter.detect(&pair.dedup_key()) {
            writer.write_single(&pair)?;
        } else {
            removed += 1;
        }
    }
    writer.flush()?;
    drop(writer);

    std::fs::rename(&src_partial, src)?;
    std::fs::rename(&tgt_partial, tgt)?;

    info!("removed {} duplicate pairs from {:?}", removed, src);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, src: &str, tgt: &str) -> (PathBuf, PathBuf) {
        let s = dir.join("src-train.txt");
        let t = dir.join("tgt-train.txt");
        fs::write(&s, src).unwrap();
        fs::write(&t, tgt).unwrap();
        (s, t)
    }

    #[test]
    fn dedup_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let (s, t) = write(
            dir.path(),
            "Hello.\nHi.\nHello.\nHello.\nBye.\n",
            "Bonjour.\nSalut.\nBonjour.\nAllo.\nAu revoir.\n",
        );

        assert_eq!(dedup(&s, &t).unwrap(), 1);
        // same source, different target is not a duplicate
        assert_eq!(
            fs::read_to_string(&s).unwrap(),
            "Hello.\nHi.\nHello.\nBye.\n"
        );
        assert_eq!(
            fs::read_to_string(&t).unwrap(),
            "Bonjour.\nSalut.\nAllo.\nAu revoir.\n"
        );
        assert!(!partial_path(&s).exists());
    }

    #[test]
    fn idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (s, t) = write(dir.path(), "a\nb\na\na\n", "x\ny\nx\nx\n");
        assert_eq!(dedup(&s, &t).unwrap(), 2);
        assert_eq!(dedup(&s, &t).unwrap(), 0);
        assert_eq!(fs::read_to_string(&s).unwrap(), "a\nb\n");
    }

    #[test]
    fn separator_is_not_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        let (s, t) = write(dir.path(), "a b\na\n", "c\nb c\n");
        assert_eq!(dedup(&s, &t).unwrap(), 0);
    }
}
