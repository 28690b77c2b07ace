use wordbank::{
    encoders::SentenceEncoderOptions,
    tokenizer::{BasicTokenizer, BasicTokenizerOptions, TextNormalization},
    training::FrequencyCounterOptions,
};

/// Tokenizer argument group.
#[derive(clap::Args, Debug)]
pub struct TokenizerArgs {
    /// Unicode normalization applied to each line: "nfc" or "none".
    #[arg(long, default_value_t = TextNormalization::Nfc)]
    pub normalization: TextNormalization,

    /// Keep digits as written, rather than replacing each with "0".
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_normalize_digits: bool,
}

impl TokenizerArgs {
    /// Should digits be normalized?
    pub fn normalize_digits(&self) -> bool {
        !self.no_normalize_digits
    }

    /// Build the tokenizer.
    pub fn tokenizer(&self) -> BasicTokenizer {
        BasicTokenizerOptions::default()
            .with_normalization(self.normalization)
            .build()
    }

    /// Counter options for these args.
    pub fn counter_options(&self) -> FrequencyCounterOptions {
        FrequencyCounterOptions::default().with_normalize_digits(self.normalize_digits())
    }

    /// Encoder options for these args.
    pub fn encoder_options(&self) -> SentenceEncoderOptions {
        SentenceEncoderOptions::default().with_normalize_digits(self.normalize_digits())
    }
}
