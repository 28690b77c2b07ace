use std::{io::Write, path::PathBuf};

use wordbank::{build_cache::atomic_write, encoders::CorpusEncoder, vocab::io::load_vocab_path};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    tokenizer_args::TokenizerArgs,
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Vocabulary file.
    #[arg(long)]
    vocab: PathBuf,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    tokenizer: TokenizerArgs,
}

impl EncodeArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let output = self.output.path();
        if let Some(path) = output
            && path.exists()
        {
            log::info!("encoded corpus already present: {}", path.display());
            return Ok(());
        }

        let vocab = load_vocab_path(&self.vocab)?;
        let tokenizer = self.tokenizer.tokenizer();
        let encoder = CorpusEncoder::new(&tokenizer, self.tokenizer.encoder_options());
        let reader = self.input.open_reader()?;

        let lines = match output {
            Some(path) => {
                log::info!("output: {}", path.display());
                let mut lines = 0;
                atomic_write(path, |writer| -> wordbank::WBResult<()> {
                    lines = encoder.encode_stream(vocab.lookup(), reader, writer)?;
                    Ok(())
                })?;
                lines
            }
            None => {
                let mut writer = self.output.open_stdout();
                let lines = encoder.encode_stream(vocab.lookup(), reader, &mut writer)?;
                writer.flush()?;
                lines
            }
        };
        log::info!("encoded {lines} lines");

        Ok(())
    }
}
