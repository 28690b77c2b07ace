//! # Vocabulary Builder

use crate::{
    errors::{WBResult, WordbankError},
    reserved::{RESERVED_COUNT, ReservedSymbol},
    training::FrequencyTable,
    types::Token,
    vocab::Vocabulary,
};

/// Options for [`VocabBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabBuilderOptions {
    /// The maximum vocabulary size, including reserved symbols.
    pub max_size: usize,
}

impl VocabBuilderOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `max_size` - the maximum vocabulary size; must be >= 4.
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// Sets the maximum vocabulary size.
    pub fn with_max_size(
        self,
        max_size: usize,
    ) -> Self {
        Self { max_size }
    }

    /// Initializes a [`VocabBuilder`] from these options.
    pub fn init(self) -> VocabBuilder {
        VocabBuilder::new(self)
    }
}

/// Validates `max_size` against the reserved prefix.
pub fn try_max_size(max_size: usize) -> WBResult<usize> {
    if max_size < RESERVED_COUNT {
        Err(WordbankError::Config(format!(
            "max_size ({max_size}) must be >= {RESERVED_COUNT} to hold the reserved symbols"
        )))
    } else {
        Ok(max_size)
    }
}

/// Ranks counted tokens into a [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct VocabBuilder {
    options: VocabBuilderOptions,
}

impl VocabBuilder {
    /// Create a new builder.
    pub fn new(options: VocabBuilderOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &VocabBuilderOptions {
        &self.options
    }

    /// Build a vocabulary.
    ///
    /// Tokens are ranked by descending count (ties by first occurrence),
    /// placed after the reserved symbols, and truncated to `max_size`.
    /// Corpus tokens spelled like a reserved symbol keep the reserved id.
    ///
    /// ## Errors
    /// * [`WordbankError::Config`] if `max_size < 4`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, table)))]
    pub fn build(
        &self,
        table: &FrequencyTable,
    ) -> WBResult<Vocabulary> {
        let max_size = try_max_size(self.options.max_size)?;

        let ranked = table.ranked();
        let mut tokens: Vec<Token> = Vec::with_capacity(max_size.min(ranked.len() + RESERVED_COUNT));
        tokens.extend(ReservedSymbol::ALL.iter().map(|s| s.token()));

        let ranked = ranked
            .into_iter()
            .filter(|(token, _)| ReservedSymbol::from_text(token).is_none());

        let mut full_size = RESERVED_COUNT;
        for (token, _) in ranked {
            full_size += 1;
            if tokens.len() < max_size {
                tokens.push(token.clone());
            }
        }
        log::info!(">> Full Vocabulary Size : {full_size}");
        if full_size > max_size {
            log::debug!("truncated vocabulary to {max_size} tokens");
        }

        Vocabulary::from_tokens(tokens)
    }
}
