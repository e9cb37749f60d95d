/*! Reading facilities

[PairReader] implements [Iterator] over the aligned lines of a source/target file couple.
Lines are yielded with their terminator stripped, along with their (0-based) index.

The two files are assumed to be line-aligned: if one of them ends before the other,
the reader yields an [Error::Alignment] and stops.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Read},
    path::{Path, PathBuf},
};

use crate::error::Error;

/// Aligned line reader.
#[derive(Debug)]
pub struct PairReader<T> {
    src_path: PathBuf,
    tgt_path: PathBuf,
    src: Lines<BufReader<T>>,
    tgt: Lines<BufReader<T>>,
    idx: usize,
    done: bool,
}

impl<T: Read> PairReader<T> {
    /// Build a reader from two already opened streams.
    /// Paths are only used to report errors.
    pub fn new(src: T, tgt: T, src_path: &Path, tgt_path: &Path) -> Self {
        Self {
            src_path: src_path.to_path_buf(),
            tgt_path: tgt_path.to_path_buf(),
            src: BufReader::new(src).lines(),
            tgt: BufReader::new(tgt).lines(),
            idx: 0,
            done: false,
        }
    }
}

impl PairReader<File> {
    pub fn open(src: &Path, tgt: &Path) -> Result<Self, Error> {
        let src_file = File::open(src)?;
        let tgt_file = File::open(tgt)?;
        Ok(Self::new(src_file, tgt_file, src, tgt))
    }
}

impl<T: Read> Iterator for PairReader<T> {
    type Item = Result<(usize, String, String), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = match (self.src.next(), self.tgt.next()) {
            (None, None) => {
                self.done = true;
                return None;
            }
            (Some(Ok(src)), Some(Ok(tgt))) => Ok((self.idx, src, tgt)),
            (Some(Err(e)), _) | (_, Some(Err(e))) => Err(Error::Io(e)),
            // the side that returned None is the shorter one
            (Some(_), None) => Err(Error::Alignment {
                path: self.tgt_path.clone(),
                line: self.idx + 1,
            }),
            (None, Some(_)) => Err(Error::Alignment {
                path: self.src_path.clone(),
                line: self.idx + 1,
            }),
        };

        match item {
            Ok(_) => self.idx += 1,
            Err(_) => self.done = true,
        }
        Some(item)
    }
}

/// Count lines of a file without loading it, reading blocks of 64KiB.
///
/// A last line without a trailing newline is counted, consistently with [PairReader].
pub fn count_lines(path: &Path) -> Result<usize, Error> {
    let mut f = File::open(path)?;
    let mut buf = vec![0u8; 1 << 16];
    let mut count = 0;
    let mut last = None;

    loop {
        let n = f.read(&mut buf)?;
        if n == 0 {
            break;
        }
        count += buf[..n].iter().filter(|b| **b == b'\n').count();
        last = Some(buf[n - 1]);
    }

    match last {
        Some(b) if b != b'\n' => Ok(count + 1),
        _ => Ok(count),
    }
}
