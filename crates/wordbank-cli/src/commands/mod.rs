mod augment;
mod build_vocab;
mod chart;
mod encode;
mod prepare;

/// Subcommands for wordbank
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a vocabulary from a corpus.
    BuildVocab(build_vocab::BuildVocabArgs),

    /// Encode a corpus into token ids.
    Encode(encode::EncodeArgs),

    /// Build vocabularies and encoded corpora for a train/test data set.
    Prepare(prepare::PrepareArgs),

    /// Augment training corpora from a question/answer CSV.
    Augment(augment::AugmentArgs),

    /// Chart the bucket distribution of an encoded corpus pair.
    Chart(chart::ChartArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::BuildVocab(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Prepare(cmd) => cmd.run(),
            Commands::Augment(cmd) => cmd.run(),
            Commands::Chart(cmd) => cmd.run(),
        }
    }
}
