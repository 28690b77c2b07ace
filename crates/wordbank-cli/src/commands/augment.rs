use std::path::PathBuf;

use wordbank::{
    augmentation::{ClimateAugmentation, ClimateAugmentationPaths},
    build_cache::WORDBANK_DATA_CONFIG,
};

use crate::logging::LogArgs;

/// Args for the augment command.
#[derive(clap::Args, Debug)]
pub struct AugmentArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Question/answer CSV; no header.
    #[arg(long)]
    csv: PathBuf,

    /// Directory for the augmented corpora and metatoken map.
    ///
    /// Defaults to `$WORDBANK_WORK_DIR`, then the user data directory.
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Training encoder corpus; questions are appended.
    #[arg(long)]
    train_enc: PathBuf,

    /// Training decoder corpus; metatokens are appended.
    #[arg(long)]
    train_dec: PathBuf,
}

impl AugmentArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let working_dir = WORDBANK_DATA_CONFIG
            .resolve_dir(self.working_dir.as_ref())
            .ok_or("failed to resolve working directory")?;
        std::fs::create_dir_all(&working_dir)?;

        let paths = ClimateAugmentationPaths::in_working_dir(&working_dir, &self.train_enc, &self.train_dec)
            .with_csv(&self.csv);

        match ClimateAugmentation::default().run(&paths)? {
            Some(rows) => log::info!("wrote {rows} rows to {}", paths.augmented_enc.display()),
            None => log::info!("augmented corpora already present in {}", working_dir.display()),
        }

        Ok(())
    }
}
