//! # Data Preparation Pipeline
//!
//! [`prepare_custom_data`] turns four raw corpora into two vocabularies and
//! four encoded corpora:
//!
//! | output                      | built from                                  |
//! | --------------------------- | ------------------------------------------- |
//! | `working_dir/vocab{N}.enc`  | `train_enc`, `working_dir/augmented.enc`    |
//! | `working_dir/vocab{M}.dec`  | `train_dec`, `working_dir/augmented.dec`    |
//! | `train_enc.ids{N}`          | `train_enc`, `vocab{N}.enc`                 |
//! | `train_dec.ids{M}`          | `train_dec`, `vocab{M}.dec`                 |
//! | `test_enc.ids{N}`           | `test_enc`, `vocab{N}.enc`                  |
//! | `test_dec.ids{M}`           | `test_dec`, `vocab{M}.dec`                  |
//!
//! Every output is a [`BuildStep`]; it is reused while its inputs and
//! parameters are unchanged, and rebuilt otherwise.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use wordbank_build_cache::{BuildFingerprint, BuildStep, extend_path, path_utils::with_suffix};

use crate::{
    augmentation::{ClimateAugmentation, ClimateAugmentationPaths},
    encoders::{CorpusEncoder, SentenceEncoderOptions},
    errors::{WBResult, require_path},
    tokenizer::WordTokenizer,
    training::{
        AugmentedVocabMerger, FrequencyCounter, FrequencyCounterOptions, VocabBuilderOptions,
        try_max_size,
    },
    vocab::io::save_vocab_path,
};

/// Augmented encoder corpus file name, in the working directory.
pub const AUGMENTED_ENC: &str = "augmented.enc";

/// Augmented decoder corpus file name, in the working directory.
pub const AUGMENTED_DEC: &str = "augmented.dec";

/// Inputs and parameters for [`prepare_custom_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory for vocabularies and augmented corpora.
    pub working_dir: PathBuf,

    /// Training encoder corpus.
    pub train_enc: PathBuf,

    /// Training decoder corpus.
    pub train_dec: PathBuf,

    /// Test encoder corpus.
    pub test_enc: PathBuf,

    /// Test decoder corpus.
    pub test_dec: PathBuf,

    /// Encoder vocabulary size.
    pub enc_vocab_size: usize,

    /// Decoder vocabulary size.
    pub dec_vocab_size: usize,

    /// Replace digits with `0` when counting and encoding.
    pub normalize_digits: bool,

    /// Optional `question,answer` CSV to augment the training corpora with.
    pub climate_csv: Option<PathBuf>,
}

impl PipelineConfig {
    /// Create a config with digit normalization and no augmentation CSV.
    pub fn new<D: AsRef<Path>>(
        working_dir: D,
        train: (PathBuf, PathBuf),
        test: (PathBuf, PathBuf),
        enc_vocab_size: usize,
        dec_vocab_size: usize,
    ) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            train_enc: train.0,
            train_dec: train.1,
            test_enc: test.0,
            test_dec: test.1,
            enc_vocab_size,
            dec_vocab_size,
            normalize_digits: true,
            climate_csv: None,
        }
    }

    /// Set digit normalization.
    pub fn with_normalize_digits(
        self,
        normalize_digits: bool,
    ) -> Self {
        Self {
            normalize_digits,
            ..self
        }
    }

    /// Set the augmentation CSV.
    pub fn with_climate_csv<P: AsRef<Path>>(
        self,
        climate_csv: Option<P>,
    ) -> Self {
        Self {
            climate_csv: climate_csv.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// The encoder vocabulary path, `working_dir/vocab{N}.enc`.
    pub fn enc_vocab_path(&self) -> PathBuf {
        self.working_path(format!("vocab{}.enc", self.enc_vocab_size))
    }

    /// The decoder vocabulary path, `working_dir/vocab{M}.dec`.
    pub fn dec_vocab_path(&self) -> PathBuf {
        self.working_path(format!("vocab{}.dec", self.dec_vocab_size))
    }

    /// The augmented encoder corpus path.
    pub fn augmented_enc_path(&self) -> PathBuf {
        self.working_path(AUGMENTED_ENC)
    }

    /// The augmented decoder corpus path.
    pub fn augmented_dec_path(&self) -> PathBuf {
        self.working_path(AUGMENTED_DEC)
    }

    /// Check the vocabulary sizes.
    pub fn validate(&self) -> WBResult<()> {
        try_max_size(self.enc_vocab_size)?;
        try_max_size(self.dec_vocab_size)?;
        Ok(())
    }

    fn working_path<F: AsRef<Path>>(
        &self,
        file: F,
    ) -> PathBuf {
        extend_path(&self.working_dir, &[] as &[&str], file)
    }
}

/// Paths produced by [`prepare_custom_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedData {
    /// Encoded training encoder corpus.
    pub train_enc_ids: PathBuf,

    /// Encoded training decoder corpus.
    pub train_dec_ids: PathBuf,

    /// Encoded test encoder corpus.
    pub test_enc_ids: PathBuf,

    /// Encoded test decoder corpus.
    pub test_dec_ids: PathBuf,

    /// Encoder vocabulary.
    pub enc_vocab: PathBuf,

    /// Decoder vocabulary.
    pub dec_vocab: PathBuf,
}

/// The encoded corpus path for a corpus and vocabulary size: `<corpus>.ids{N}`.
pub fn ids_path<P: AsRef<Path>>(
    corpus: P,
    vocab_size: usize,
) -> PathBuf {
    with_suffix(corpus, &format!(".ids{vocab_size}"))
}

/// Run the pipeline with OS-seeded metatokens.
pub fn prepare_custom_data<W>(
    config: &PipelineConfig,
    tokenizer: &W,
) -> WBResult<PreparedData>
where
    W: WordTokenizer + ?Sized,
{
    prepare_custom_data_with(
        config,
        tokenizer,
        &mut ClimateAugmentation::<StdRng>::default(),
    )
}

/// Run the pipeline with the given augmentation step.
///
/// ## Errors
/// * [`WordbankError::Config`](crate::errors::WordbankError::Config) for
///   vocabulary sizes below 4, or augmented corpora too large to merge.
/// * [`WordbankError::NotFound`](crate::errors::WordbankError::NotFound) for
///   missing corpora.
pub fn prepare_custom_data_with<W, R>(
    config: &PipelineConfig,
    tokenizer: &W,
    augmentation: &mut ClimateAugmentation<R>,
) -> WBResult<PreparedData>
where
    W: WordTokenizer + ?Sized,
    R: Rng,
{
    config.validate()?;
    for corpus in [
        &config.train_enc,
        &config.train_dec,
        &config.test_enc,
        &config.test_dec,
    ] {
        require_path(corpus)?;
    }
    fs::create_dir_all(&config.working_dir)?;

    if let Some(csv) = &config.climate_csv {
        let paths =
            ClimateAugmentationPaths::in_working_dir(&config.working_dir, &config.train_enc, &config.train_dec)
                .with_csv(csv);
        augmentation.run(&paths)?;
    }

    let enc_vocab = config.enc_vocab_path();
    let dec_vocab = config.dec_vocab_path();
    build_vocabulary(
        config,
        tokenizer,
        &config.train_enc,
        &config.augmented_enc_path(),
        config.enc_vocab_size,
        &enc_vocab,
    )?;
    build_vocabulary(
        config,
        tokenizer,
        &config.train_dec,
        &config.augmented_dec_path(),
        config.dec_vocab_size,
        &dec_vocab,
    )?;

    let prepared = PreparedData {
        train_enc_ids: encode_corpus(config, tokenizer, &config.train_enc, &enc_vocab, config.enc_vocab_size)?,
        train_dec_ids: encode_corpus(config, tokenizer, &config.train_dec, &dec_vocab, config.dec_vocab_size)?,
        test_enc_ids: encode_corpus(config, tokenizer, &config.test_enc, &enc_vocab, config.enc_vocab_size)?,
        test_dec_ids: encode_corpus(config, tokenizer, &config.test_dec, &dec_vocab, config.dec_vocab_size)?,
        enc_vocab,
        dec_vocab,
    };
    Ok(prepared)
}

fn tokenizer_param<W: WordTokenizer + ?Sized>(tokenizer: &W) -> String {
    tokenizer.fingerprint().unwrap_or_else(|| "custom".to_string())
}

fn build_vocabulary<W: WordTokenizer + ?Sized>(
    config: &PipelineConfig,
    tokenizer: &W,
    corpus: &Path,
    augmented: &Path,
    max_size: usize,
    target: &Path,
) -> WBResult<()> {
    let fingerprint = BuildFingerprint::new("vocabulary")
        .with_param("max_size", max_size)
        .with_param("normalize_digits", config.normalize_digits)
        .with_param("tokenizer", tokenizer_param(tokenizer))
        .with_input(corpus)?
        .with_optional_input(augmented)?;

    BuildStep::new(target, fingerprint).ensure(|target| -> WBResult<()> {
        log::info!(
            "Creating vocabulary {} from {}",
            target.display(),
            corpus.display()
        );
        let options = FrequencyCounterOptions::default().with_normalize_digits(config.normalize_digits);
        let mut counter = FrequencyCounter::new(tokenizer, options);
        counter.count_path(corpus)?;

        let mut vocab = VocabBuilderOptions::new(max_size)
            .init()
            .build(&counter.release())?;

        if augmented.exists() {
            let (merged, report) = AugmentedVocabMerger::new(tokenizer).merge_path(vocab, augmented)?;
            log::debug!(
                "{}: added {} augmented tokens",
                target.display(),
                report.added.len()
            );
            vocab = merged;
        }

        save_vocab_path(&vocab, target)?;
        Ok(())
    })?;
    Ok(())
}

fn encode_corpus<W: WordTokenizer + ?Sized>(
    config: &PipelineConfig,
    tokenizer: &W,
    corpus: &Path,
    vocab: &Path,
    vocab_size: usize,
) -> WBResult<PathBuf> {
    let target = ids_path(corpus, vocab_size);
    let fingerprint = BuildFingerprint::new("encode")
        .with_param("normalize_digits", config.normalize_digits)
        .with_param("tokenizer", tokenizer_param(tokenizer))
        .with_input(corpus)?
        .with_input(vocab)?;

    let options = SentenceEncoderOptions::default().with_normalize_digits(config.normalize_digits);
    BuildStep::new(&target, fingerprint).ensure(|target| -> WBResult<()> {
        CorpusEncoder::new(tokenizer, options).encode_path(corpus, target, vocab)?;
        Ok(())
    })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{
        errors::WordbankError,
        tokenizer::{BasicTokenizer, BasicTokenizerOptions, TextNormalization},
        vocab::io::load_vocab_path,
    };

    struct Fixture {
        dir: tempdir::TempDir,
        config: PipelineConfig,
    }

    fn fixture(
        enc_vocab_size: usize,
        dec_vocab_size: usize,
    ) -> Fixture {
        let dir = tempdir::TempDir::new("pipeline_test").unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();

        let corpus = |name: &str, text: &str| {
            let path = data.join(name);
            fs::write(&path, text).unwrap();
            path
        };
        let train = (
            corpus("train.enc", "the cat sat.\nthe dog ran\n"),
            corpus("train.dec", "a b\nb c\n"),
        );
        let test = (
            corpus("test.enc", "the cat ran\n"),
            corpus("test.dec", "c b a\n"),
        );

        let config = PipelineConfig::new(dir.path().join("work"), train, test, enc_vocab_size, dec_vocab_size);
        Fixture { dir, config }
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_ids_path() {
        assert_eq!(
            ids_path("data/train.enc", 20000),
            PathBuf::from("data/train.enc.ids20000")
        );
    }

    #[test]
    fn test_prepare() {
        let Fixture { dir: _dir, config } = fixture(10, 6);
        let tokenizer = BasicTokenizer::default();

        let prepared = prepare_custom_data(&config, &tokenizer).unwrap();
        assert_eq!(prepared.enc_vocab, config.working_dir.join("vocab10.enc"));
        assert_eq!(prepared.dec_vocab, config.working_dir.join("vocab6.dec"));
        assert_eq!(prepared.train_enc_ids, ids_path(&config.train_enc, 10));
        assert_eq!(prepared.test_dec_ids, ids_path(&config.test_dec, 6));

        assert_eq!(
            read(&prepared.enc_vocab),
            "_PAD\n_GO\n_EOS\n_UNK\nthe\ncat\nsat\n.\ndog\nran\n"
        );
        assert_eq!(read(&prepared.dec_vocab), "_PAD\n_GO\n_EOS\n_UNK\nb\na\n");

        assert_eq!(read(&prepared.train_enc_ids), "4 5 6 7\n4 8 9\n");
        assert_eq!(read(&prepared.test_enc_ids), "4 5 9\n");
        assert_eq!(read(&prepared.train_dec_ids), "5 4\n4 3\n");
        assert_eq!(read(&prepared.test_dec_ids), "3 4 5\n");

        // A second run reuses every artifact.
        let stamp_before = fs::metadata(&prepared.train_enc_ids).unwrap().modified().unwrap();
        let again = prepare_custom_data(&config, &tokenizer).unwrap();
        assert_eq!(again, prepared);
        let stamp_after = fs::metadata(&prepared.train_enc_ids).unwrap().modified().unwrap();
        assert_eq!(stamp_before, stamp_after);
    }

    #[test]
    fn test_prepare_rebuilds_on_parameter_change() {
        let Fixture { dir: _dir, config } = fixture(10, 6);
        let tokenizer = BasicTokenizer::default();
        prepare_custom_data(&config, &tokenizer).unwrap();

        fs::write(&config.test_enc, "the 42 kittens\n").unwrap();
        let prepared = prepare_custom_data(&config, &tokenizer).unwrap();
        assert_eq!(read(&prepared.test_enc_ids), "4 3 3\n");

        let config = config.with_normalize_digits(false);
        let prepared = prepare_custom_data(&config, &tokenizer).unwrap();
        assert_eq!(read(&prepared.test_enc_ids), "4 3 3\n");
        assert!(BuildStep::new(
            &prepared.enc_vocab,
            BuildFingerprint::new("vocabulary")
                .with_param("max_size", 10)
                .with_param("normalize_digits", false)
                .with_param("tokenizer", "basic:nfc")
                .with_input(&config.train_enc)
                .unwrap()
        )
        .is_fresh()
        .unwrap());
    }

    #[test]
    fn test_prepare_rebuilds_on_tokenizer_change() {
        let Fixture { dir: _dir, config } = fixture(10, 6);
        fs::write(&config.train_enc, "cafe\u{301} cafe\u{301}\n").unwrap();
        fs::write(&config.test_enc, "cafe\u{301}\n").unwrap();

        let nfc = BasicTokenizer::default();
        let prepared = prepare_custom_data(&config, &nfc).unwrap();
        let vocab = load_vocab_path(&prepared.enc_vocab).unwrap();
        assert!(vocab.contains("caf\u{e9}"));
        assert!(!vocab.contains("cafe\u{301}"));

        let raw = BasicTokenizerOptions::default()
            .with_normalization(TextNormalization::None)
            .build();
        let prepared = prepare_custom_data(&config, &raw).unwrap();
        let vocab = load_vocab_path(&prepared.enc_vocab).unwrap();
        assert!(vocab.contains("cafe\u{301}"));
        assert!(!vocab.contains("caf\u{e9}"));
        assert_eq!(read(&prepared.test_enc_ids), "4\n");
    }

    #[test]
    fn test_prepare_with_augmentation() {
        let Fixture { dir, config } = fixture(10, 6);
        let csv = dir.path().join("climate.csv");
        fs::write(&csv, "is it warm?,Yes.\n").unwrap();
        let config = config.with_climate_csv(Some(&csv));

        let tokenizer = BasicTokenizer::default();
        let mut augmentation = ClimateAugmentation::new(StdRng::seed_from_u64(7));
        let prepared = prepare_custom_data_with(&config, &tokenizer, &mut augmentation).unwrap();

        assert!(config.augmented_enc_path().exists());
        assert!(config.augmented_dec_path().exists());
        assert!(config.working_dir.join("climate_augmented_metatokens.json").exists());

        let metatoken = read(&config.augmented_dec_path()).trim().to_string();
        let enc_vocab = load_vocab_path(&prepared.enc_vocab).unwrap();
        let dec_vocab = load_vocab_path(&prepared.dec_vocab).unwrap();
        assert_eq!(enc_vocab.len(), 10);
        assert_eq!(dec_vocab.len(), 6);
        for token in ["is", "it", "warm", "?"] {
            assert!(enc_vocab.contains(token), "missing {token}");
        }
        assert!(dec_vocab.contains(&metatoken));

        // The training corpora carry the augmented rows.
        assert!(read(&config.train_enc).ends_with("is it warm?\n"));
        assert!(read(&config.train_dec).ends_with(&format!("{metatoken}\n")));
    }

    #[test]
    fn test_prepare_errors() {
        let Fixture { dir: _dir, config } = fixture(3, 6);
        let tokenizer = BasicTokenizer::default();
        assert!(matches!(
            prepare_custom_data(&config, &tokenizer),
            Err(WordbankError::Config(_))
        ));

        let Fixture { dir: _dir, config } = fixture(10, 6);
        fs::remove_file(&config.test_dec).unwrap();
        assert!(matches!(
            prepare_custom_data(&config, &tokenizer),
            Err(WordbankError::NotFound { .. })
        ));
    }
}
