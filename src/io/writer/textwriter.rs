//! Aligned source/target file writer.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use super::WriterTrait;
use crate::error::Error;
use crate::pair::SentencePair;

/// Writes [SentencePair]s to a source and a target file.
///
/// Files are truncated on creation. Each pair takes exactly one line in each file.
pub struct PairWriter {
    src: BufWriter<File>,
    tgt: BufWriter<File>,
    nb_pairs: usize,
}

impl PairWriter {
    pub fn create(src_path: &Path, tgt_path: &Path) -> Result<Self, Error> {
        debug!("creating {:?} and {:?}", src_path, tgt_path);
        Ok(Self {
            src: BufWriter::new(File::create(src_path)?),
            tgt: BufWriter::new(File::create(tgt_path)?),
            nb_pairs: 0,
        })
    }

    /// Number of pairs written so far.
    pub fn nb_pairs(&self) -> usize {
        self.nb_pairs
    }
}

impl WriterTrait for PairWriter {
    type Item = SentencePair;

    /// Writes all sources, then all targets.
    fn write(&mut self, vals: &[SentencePair]) -> Result<(), Error> {
        for pair in vals {
            self.src.write_all(pair.src.as_bytes())?;
            self.src.write_all(b"\n")?;
        }
        for pair in vals {
            self.tgt.write_all(pair.tgt.as_bytes())?;
            self.tgt.write_all(b"\n")?;
        }
        self.nb_pairs += vals.len();
        Ok(())
    }

    fn write_single(&mut self, val: &SentencePair) -> Result<(), Error> {
        writeln!(self.src, "{}", val.src)?;
        writeln!(self.tgt, "{}", val.tgt)?;
        self.nb_pairs += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.src.flush()?;
        self.tgt.flush()?;
        Ok(())
    }
}
