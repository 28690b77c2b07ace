use std::path::PathBuf;

use wordbank::{
    build_cache::WORDBANK_DATA_CONFIG,
    pipeline::{PipelineConfig, prepare_custom_data},
};

use crate::{logging::LogArgs, tokenizer_args::TokenizerArgs};

/// Args for the prepare command.
#[derive(clap::Args, Debug)]
pub struct PrepareArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Directory for vocabularies and augmented corpora.
    ///
    /// Defaults to `$WORDBANK_WORK_DIR`, then the user data directory.
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Training encoder corpus.
    #[arg(long)]
    train_enc: PathBuf,

    /// Training decoder corpus.
    #[arg(long)]
    train_dec: PathBuf,

    /// Test encoder corpus.
    #[arg(long)]
    test_enc: PathBuf,

    /// Test decoder corpus.
    #[arg(long)]
    test_dec: PathBuf,

    /// Encoder vocab size.
    #[arg(long, default_value = "20000")]
    enc_vocab_size: usize,

    /// Decoder vocab size.
    #[arg(long, default_value = "20000")]
    dec_vocab_size: usize,

    /// Question/answer CSV to augment the training corpora with.
    #[arg(long)]
    climate_csv: Option<PathBuf>,

    #[command(flatten)]
    tokenizer: TokenizerArgs,
}

impl PrepareArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let working_dir = WORDBANK_DATA_CONFIG
            .resolve_dir(self.working_dir.as_ref())
            .ok_or("failed to resolve working directory")?;
        log::info!("working dir: {}", working_dir.display());

        let config = PipelineConfig::new(
            working_dir,
            (self.train_enc.clone(), self.train_dec.clone()),
            (self.test_enc.clone(), self.test_dec.clone()),
            self.enc_vocab_size,
            self.dec_vocab_size,
        )
        .with_normalize_digits(self.tokenizer.normalize_digits())
        .with_climate_csv(self.climate_csv.as_ref());

        let prepared = prepare_custom_data(&config, &self.tokenizer.tokenizer())?;
        println!("{}", serde_json::to_string_pretty(&prepared)?);

        Ok(())
    }
}
