use std::path::PathBuf;

use wordbank::{
    training::{AugmentedVocabMerger, FrequencyCounter, VocabBuilderOptions},
    vocab::io::save_vocab_path,
};

use crate::{logging::LogArgs, tokenizer_args::TokenizerArgs};

/// Args for the build-vocab command.
#[derive(clap::Args, Debug)]
pub struct BuildVocabArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Training corpus; one sentence per line.
    #[arg(long)]
    corpus: PathBuf,

    /// Vocabulary file to write; left untouched if it exists.
    #[arg(long)]
    vocab: PathBuf,

    /// Max vocab size, including the 4 reserved symbols.
    #[arg(long)]
    max_size: usize,

    /// Augmented corpus whose tokens are forced into the vocabulary.
    #[arg(long)]
    augmented: Option<PathBuf>,

    #[command(flatten)]
    tokenizer: TokenizerArgs,
}

impl BuildVocabArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        if self.vocab.exists() {
            log::info!("vocabulary already present: {}", self.vocab.display());
            return Ok(());
        }

        log::info!(
            "Creating vocabulary {} from {}",
            self.vocab.display(),
            self.corpus.display()
        );
        let tokenizer = self.tokenizer.tokenizer();

        let mut counter = FrequencyCounter::new(&tokenizer, self.tokenizer.counter_options());
        counter.count_path(&self.corpus)?;
        let mut vocab = VocabBuilderOptions::new(self.max_size)
            .init()
            .build(&counter.release())?;

        if let Some(augmented) = &self.augmented {
            let (merged, report) = AugmentedVocabMerger::new(&tokenizer).merge_path(vocab, augmented)?;
            log::info!(
                "augmented: added {}, evicted {}",
                report.added.len(),
                report.evicted.len()
            );
            vocab = merged;
        }

        save_vocab_path(&vocab, &self.vocab)?;
        log::info!("Vocabulary Size: {}", vocab.len());

        Ok(())
    }
}
