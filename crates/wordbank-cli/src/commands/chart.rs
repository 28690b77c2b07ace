use std::path::PathBuf;

use wordbank::{build_cache::extend_path, buckets::BucketHistogram};
use wordbank_charts::{bucket_chart_title, bucket_label, chart_file_name, render_bucket_chart};

use crate::logging::LogArgs;

/// Args for the chart command.
#[derive(clap::Args, Debug)]
pub struct ChartArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Encoded source corpus.
    #[arg(long)]
    source: PathBuf,

    /// Encoded target corpus.
    #[arg(long)]
    target: PathBuf,

    /// Data set name; the chart is titled "<title> Bucket Distribution".
    #[arg(long)]
    title: String,

    /// Stop after this many pairs.
    #[arg(long)]
    max_pairs: Option<usize>,

    /// Directory for the SVG file.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl ChartArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let histogram = BucketHistogram::from_paths(&self.source, &self.target, self.max_pairs)?;
        for (idx, (bucket, count)) in histogram
            .buckets()
            .iter()
            .zip(histogram.counts())
            .enumerate()
        {
            log::info!(
                "{} ({}, {}): {count}",
                bucket_label(idx),
                bucket.source_size,
                bucket.target_size
            );
        }
        log::info!("overflow: {}", histogram.overflow());

        let title = bucket_chart_title(&self.title);
        let path = extend_path(&self.output_dir, &[] as &[&str], chart_file_name(&title));
        std::fs::create_dir_all(&self.output_dir)?;
        render_bucket_chart(&histogram, &title, &path)?;

        Ok(())
    }
}
