//! # Climate Q&A Augmentation
//!
//! Turns a two column `question,answer` CSV (no header) into augmented
//! corpora:
//! * each question goes to the augmented encoder corpus;
//! * each answer is replaced by a random uppercase metatoken, which goes to
//!   the augmented decoder corpus;
//! * both are appended to the training corpora;
//! * the `{ metatoken -> answer }` map is saved as JSON.
//!
//! The training corpus lengths are journaled before appending; a run
//! interrupted part way truncates them back before appending again.

use std::{
    collections::BTreeMap,
    fs::{self, File, OpenOptions},
    io::{BufWriter, ErrorKind, Write},
    ops::Range,
    path::{Path, PathBuf},
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use wordbank_build_cache::{atomic_write, path_utils::with_suffix};

use crate::errors::{WBResult, WordbankError, require_path};

/// The metatoken length range.
pub const METATOKEN_LENGTHS: Range<usize> = 15..20;

/// Input and output paths for [`ClimateAugmentation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateAugmentationPaths {
    /// The `question,answer` CSV.
    pub csv: PathBuf,

    /// The augmented encoder corpus (questions).
    pub augmented_enc: PathBuf,

    /// The augmented decoder corpus (metatokens).
    pub augmented_dec: PathBuf,

    /// The training encoder corpus; appended to.
    pub train_enc: PathBuf,

    /// The training decoder corpus; appended to.
    pub train_dec: PathBuf,

    /// The `{ metatoken -> answer }` JSON file.
    pub metatokens: PathBuf,
}

/// Training corpus lengths before an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct AppendJournal {
    train_enc: u64,
    train_dec: u64,
}

impl ClimateAugmentationPaths {
    /// The conventional layout in a working directory.
    ///
    /// * `working_dir/climate_augmented_data.csv`
    /// * `working_dir/augmented.{enc,dec}`
    /// * `working_dir/climate_augmented_metatokens.json`
    pub fn in_working_dir<W, E, D>(
        working_dir: W,
        train_enc: E,
        train_dec: D,
    ) -> Self
    where
        W: AsRef<Path>,
        E: AsRef<Path>,
        D: AsRef<Path>,
    {
        let dir = working_dir.as_ref();
        Self {
            csv: dir.join("climate_augmented_data.csv"),
            augmented_enc: dir.join("augmented.enc"),
            augmented_dec: dir.join("augmented.dec"),
            train_enc: train_enc.as_ref().to_path_buf(),
            train_dec: train_dec.as_ref().to_path_buf(),
            metatokens: dir.join("climate_augmented_metatokens.json"),
        }
    }

    /// Set the CSV path.
    pub fn with_csv<P: AsRef<Path>>(
        self,
        csv: P,
    ) -> Self {
        Self {
            csv: csv.as_ref().to_path_buf(),
            ..self
        }
    }

    /// The append journal; present only while a run is incomplete.
    pub fn journal_path(&self) -> PathBuf {
        with_suffix(&self.augmented_enc, ".pending.json")
    }
}

/// Climate CSV augmentation step.
pub struct ClimateAugmentation<R: Rng = StdRng> {
    rng: R,
}

impl Default for ClimateAugmentation<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> ClimateAugmentation<R> {
    /// Create a new augmentation step with the given metatoken source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a random uppercase metatoken.
    pub fn metatoken(&mut self) -> String {
        let len = self.rng.random_range(METATOKEN_LENGTHS);
        (0..len)
            .map(|_| char::from(b'A' + self.rng.random_range(0..26u8)))
            .collect()
    }

    /// Run the augmentation, unless either augmented corpus already exists.
    ///
    /// ## Returns
    /// The number of rows written; `None` if skipped.
    ///
    /// ## Errors
    /// * [`WordbankError::NotFound`] if the CSV is missing.
    /// * [`WordbankError::CorpusFormat`] if a row has fewer than two columns.
    pub fn run(
        &mut self,
        paths: &ClimateAugmentationPaths,
    ) -> WBResult<Option<usize>> {
        let journal_path = paths.journal_path();
        let interrupted = journal_path.exists();
        if !interrupted && (paths.augmented_enc.exists() || paths.augmented_dec.exists()) {
            log::debug!("augmented corpora already present");
            return Ok(None);
        }
        require_path(&paths.csv)?;
        log::info!("Augmenting corpora from {}", paths.csv.display());

        let rows = read_rows(&paths.csv)?;

        let mut questions: Vec<String> = Vec::with_capacity(rows.len());
        let mut metatokens: Vec<String> = Vec::with_capacity(rows.len());
        let mut answers: BTreeMap<String, String> = BTreeMap::new();
        for (question, answer) in rows {
            let mut metatoken = self.metatoken();
            while answers.contains_key(&metatoken) {
                metatoken = self.metatoken();
            }
            questions.push(question);
            metatokens.push(metatoken.clone());
            answers.insert(metatoken, answer);
        }

        let journal = if interrupted {
            let journal: AppendJournal = serde_json::from_reader(File::open(&journal_path)?)?;
            log::warn!(
                "resuming interrupted augmentation; restoring {} and {}",
                paths.train_enc.display(),
                paths.train_dec.display()
            );
            truncate_to(&paths.train_enc, journal.train_enc)?;
            truncate_to(&paths.train_dec, journal.train_dec)?;
            journal
        } else {
            AppendJournal {
                train_enc: file_len(&paths.train_enc)?,
                train_dec: file_len(&paths.train_dec)?,
            }
        };
        atomic_write(&journal_path, |writer| -> WBResult<()> {
            serde_json::to_writer(&mut *writer, &journal)?;
            Ok(())
        })?;

        append_lines(&paths.train_enc, &questions)?;
        append_lines(&paths.train_dec, &metatokens)?;

        atomic_write(&paths.metatokens, |writer| -> WBResult<()> {
            serde_json::to_writer_pretty(&mut *writer, &answers)?;
            writeln!(writer)?;
            Ok(())
        })?;
        atomic_write(&paths.augmented_dec, |writer| write_lines(writer, &metatokens))?;
        atomic_write(&paths.augmented_enc, |writer| write_lines(writer, &questions))?;
        fs::remove_file(&journal_path)?;

        log::info!("augmented {} rows", questions.len());
        Ok(Some(questions.len()))
    }
}

/// Replace newlines with spaces; drop carriage returns.
fn flatten_field(field: &str) -> String {
    field.replace('\n', " ").replace('\r', "")
}

fn read_rows(path: &Path) -> WBResult<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        match (record.get(0), record.get(1)) {
            (Some(question), Some(answer)) => {
                rows.push((flatten_field(question), flatten_field(answer)));
            }
            _ => {
                return Err(WordbankError::CorpusFormat {
                    line: record.position().map_or(0, |p| p.line() as usize),
                    message: format!("expected 2 columns, found {}", record.len()),
                });
            }
        }
    }
    Ok(rows)
}

fn write_lines<W: Write + ?Sized>(
    writer: &mut W,
    lines: &[String],
) -> std::io::Result<()> {
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

fn file_len(path: &Path) -> WBResult<u64> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.len()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
        Err(err) => Err(err.into()),
    }
}

/// Cut a file back to `len` bytes; missing files are left alone.
fn truncate_to(
    path: &Path,
    len: u64,
) -> WBResult<()> {
    if file_len(path)? > len {
        OpenOptions::new().write(true).open(path)?.set_len(len)?;
    }
    Ok(())
}

fn append_lines(
    path: &Path,
    lines: &[String],
) -> WBResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, lines)?;
    writer.flush()?;
    Ok(())
}
