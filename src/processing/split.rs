/*! Train/validation splitting

Splits an aligned pair of files into a training pair and a validation pair.

The validation set is a uniform sample of exactly [validation_count] line indices, drawn before
reading: only the sampled indices are kept in memory.
Training pairs go through a bounded shuffle buffer, which approximates a full shuffle
without loading the corpus.
!*/
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::Error;
use crate::io::{count_lines, PairReader, PairWriter, WriterTrait};
use crate::pair::SentencePair;

/// Share of the corpus kept for validation, unless capped.
const VALIDATION_RATIO: usize = 5;

/// `min(max_eval, round(total * 0.2))`.
pub fn validation_count(total: usize, max_eval: usize) -> usize {
    // no ties: total / 5 never ends with .5
    ((total + VALIDATION_RATIO / 2) / VALIDATION_RATIO).min(max_eval)
}

/// Locations of the four split files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitPaths {
    pub train_src: PathBuf,
    pub train_tgt: PathBuf,
    pub val_src: PathBuf,
    pub val_tgt: PathBuf,
}

impl SplitPaths {
    /// `src-train.txt`, `tgt-train.txt`, `src-val.txt`, `tgt-val.txt` in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            train_src: dir.join("src-train.txt"),
            train_tgt: dir.join("tgt-train.txt"),
            val_src: dir.join("src-val.txt"),
            val_tgt: dir.join("tgt-val.txt"),
        }
    }

    pub fn all_exist(&self) -> bool {
        [&self.train_src, &self.train_tgt, &self.val_src, &self.val_tgt]
            .iter()
            .all(|p| p.is_file())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SplitReport {
    pub train: usize,
    pub validation: usize,
}

pub struct Splitter {
    max_eval: usize,
    shuffle_buffer: usize,
    seed: Option<u64>,
}

impl Splitter {
    pub fn new(max_eval: usize, shuffle_buffer: usize) -> Self {
        Self {
            max_eval,
            shuffle_buffer: shuffle_buffer.max(1),
            seed: None,
        }
    }

    /// Fix the random generator seed, for reproducible splits.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Split `src`/`tgt` into `dst`.
    pub fn run(&self, src: &Path, tgt: &Path, dst: &SplitPaths) -> Result<SplitReport, Error> {
        let total = count_lines(src)?;
        let nb_val = validation_count(total, self.max_eval);
        info!(
            "splitting {} pairs: {} for validation, {} for training",
            total,
            nb_val,
            total - nb_val
        );

        let mut rng = self.rng();
        let mut val_indices = rand::seq::index::sample(&mut rng, total, nb_val).into_vec();
        val_indices.sort_unstable();
        let mut val_indices = val_indices.into_iter().peekable();

        let mut train = PairWriter::create(&dst.train_src, &dst.train_tgt)?;
        let mut val = PairWriter::create(&dst.val_src, &dst.val_tgt)?;
        let mut buffer: Vec<SentencePair> = Vec::with_capacity(self.shuffle_buffer.min(total));

        for line in PairReader::open(src, tgt)? {
            let (idx, s, t) = line?;
            let pair = SentencePair::new(s, t);

            if val_indices.peek() == Some(&idx) {
                val_indices.next();
                val.write_single(&pair)?;
                continue;
            }

            // a full buffer hands out a random pair to make room
            if buffer.len() >= self.shuffle_buffer {
                let pick = rng.gen_range(0..buffer.len());
                let out = std::mem::replace(&mut buffer[pick], pair);
                train.write_single(&out)?;
            } else {
                buffer.push(pair);
            }
        }

        buffer.shuffle(&mut rng);
        train.write(&buffer)?;
        train.flush()?;
        val.flush()?;

        let report = SplitReport {
            train: train.nb_pairs(),
            validation: val.nb_pairs(),
        };
        debug!("split: {:?}", report);

        if report.train + report.validation != total || report.validation != nb_val {
            return Err(Error::Custom(format!(
                "split of {} pairs ended with {} train and {} validation pairs",
                total, report.train, report.validation
            )));
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use super::*;

    fn corpus(dir: &Path, nb: usize) -> (PathBuf, PathBuf) {
        let src = dir.join("merge-src.txt");
        let tgt = dir.join("merge-tgt.txt");
        let s: String = (0..nb).map(|i| format!("src {}\n", i)).collect();
        let t: String = (0..nb).map(|i| format!("tgt {}\n", i)).collect();
        fs::write(&src, s).unwrap();
        fs::write(&tgt, t).unwrap();
        (src, tgt)
    }

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn counts() {
        assert_eq!(validation_count(100, 30), 20);
        assert_eq!(validation_count(10, 5000), 2);
        assert_eq!(validation_count(1000, 30), 30);
        assert_eq!(validation_count(0, 5000), 0);
        assert_eq!(validation_count(2, 5000), 0);
        assert_eq!(validation_count(3, 5000), 1);
        assert_eq!(validation_count(12, 5000), 2);
        assert_eq!(validation_count(13, 5000), 3);
    }

    fn check_split(nb: usize, max_eval: usize, shuffle_buffer: usize, expected_val: usize) {
        let dir = tempfile::tempdir().unwrap();
        let (src, tgt) = corpus(dir.path(), nb);
        let paths = SplitPaths::in_dir(dir.path());
        let report = Splitter::new(max_eval, shuffle_buffer)
            .seed(Some(42))
            .run(&src, &tgt, &paths)
            .unwrap();
        assert_eq!(report.validation, expected_val);
        assert_eq!(report.train, nb - expected_val);
        assert!(paths.all_exist());

        let train_src = lines(&paths.train_src);
        let train_tgt = lines(&paths.train_tgt);
        let val_src = lines(&paths.val_src);
        let val_tgt = lines(&paths.val_tgt);
        assert_eq!(val_src.len(), expected_val);
        assert_eq!(train_src.len(), nb - expected_val);

        // alignment is kept
        for (s, t) in train_src.iter().zip(&train_tgt).chain(val_src.iter().zip(&val_tgt)) {
            assert_eq!(s.replace("src", "tgt"), *t);
        }

        // every line lands in exactly one split
        let all: HashSet<&String> = train_src.iter().chain(val_src.iter()).collect();
        assert_eq!(all.len(), nb);
    }

    #[test]
    fn split_100() {
        check_split(100, 30, 1000, 20);
    }

    #[test]
    fn split_10() {
        check_split(10, 5000, 1000, 2);
    }

    #[test]
    fn split_small_shuffle_buffer() {
        check_split(500, 5000, 7, 100);
    }

    #[test]
    fn split_empty() {
        check_split(0, 5000, 10, 0);
    }

    #[test]
    fn seeded_split_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let (src, tgt) = corpus(dir.path(), 200);
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        let pa = SplitPaths::in_dir(&a);
        let pb = SplitPaths::in_dir(&b);
        Splitter::new(10, 16).seed(Some(7)).run(&src, &tgt, &pa).unwrap();
        Splitter::new(10, 16).seed(Some(7)).run(&src, &tgt, &pb).unwrap();
        assert_eq!(lines(&pa.val_src), lines(&pb.val_src));
        assert_eq!(lines(&pa.train_src), lines(&pb.train_src));
    }

    #[test]
    fn misaligned_input() {
        let dir = tempfile::tempdir().unwrap();
        let (src, tgt) = corpus(dir.path(), 10);
        fs::write(&tgt, "tgt 0\n").unwrap();
        let res = Splitter::new(5000, 10).run(&src, &tgt, &SplitPaths::in_dir(dir.path()));
        assert!(matches!(res, Err(Error::Alignment { .. })));
    }
}
