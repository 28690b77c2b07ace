//! # wordbank-charts
//!
//! SVG bar charts of [`BucketHistogram`] distributions.
//!
//! ```rust,no_run
//! use wordbank::buckets::BucketHistogram;
//! use wordbank_charts::{bucket_chart_title, chart_file_name, render_bucket_chart};
//!
//! fn example() -> anyhow::Result<()> {
//!     let histogram =
//!         BucketHistogram::from_paths("train.enc.ids20000", "train.dec.ids20000", None)?;
//!     let title = bucket_chart_title("Vocabulary 20000");
//!     render_bucket_chart(&histogram, &title, chart_file_name(&title))?;
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

use std::path::Path;

use plotters::prelude::*;
use wordbank::buckets::BucketHistogram;

/// Chart size, in pixels.
pub const CHART_SIZE: (u32, u32) = (640, 480);

/// The title for a bucket chart of the named data set.
pub fn bucket_chart_title(name: &str) -> String {
    format!("{name} Bucket Distribution")
}

/// The bar label for a bucket index: `A`, `B`, ..., `Z`, `AA`, `AB`, ...
pub fn bucket_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Kebab-case a title into an SVG file name.
///
/// `"Vocabulary 20000 Bucket Distribution"` -> `vocabulary-20000-bucket-distribution.svg`.
pub fn chart_file_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 4);
    let mut prev: Option<char> = None;
    for c in title.chars() {
        if c.is_alphanumeric() {
            let camel_break = c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase());
            if camel_break || (prev.is_none() && !name.is_empty()) {
                name.push('-');
            }
            name.extend(c.to_lowercase());
            prev = Some(c);
        } else {
            prev = None;
        }
    }
    name.push_str(".svg");
    name
}

/// Draw one bar per bucket of `histogram` into an SVG file at `path`.
///
/// Bars are labelled `A`, `B`, `C`, ...; pairs fitting no bucket are not drawn.
pub fn render_bucket_chart<P: AsRef<Path>>(
    histogram: &BucketHistogram,
    title: &str,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    log::info!("plot={}", path.display());

    let counts = histogram.counts();
    let bucket_count = counts.len().max(1) as u32;
    let max_count = counts.iter().copied().max().unwrap_or(0) as u64;
    let y_max = (max_count + max_count / 10).max(1);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..bucket_count).into_segmented(), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Bucket")
        .y_desc("Frequency")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(idx) => bucket_label(*idx as usize),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .margin(10)
            .data(
                counts
                    .iter()
                    .enumerate()
                    .map(|(idx, &count)| (idx as u32, count as u64)),
            ),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_file_name() {
        assert_eq!(
            chart_file_name("Vocabulary 20000 Bucket Distribution"),
            "vocabulary-20000-bucket-distribution.svg"
        );
        assert_eq!(chart_file_name("  Train/Test  ratio "), "train-test-ratio.svg");
        assert_eq!(chart_file_name("bucketDistribution"), "bucket-distribution.svg");
    }

    #[test]
    fn test_bucket_label() {
        let labels: Vec<String> = (0..4).map(bucket_label).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
        assert_eq!(bucket_label(25), "Z");
        assert_eq!(bucket_label(26), "AA");
    }

    #[test]
    fn test_render_bucket_chart() {
        let dir = tempdir::TempDir::new("charts_test").unwrap();

        let mut histogram = BucketHistogram::default();
        histogram.add_pair(&[4, 5], &[6]);
        histogram.add_pair(&[4, 5, 6, 7, 8, 9], &[6]);
        histogram.add_pair(&[4; 60], &[6]);

        let title = bucket_chart_title("Vocabulary 10");
        let path = dir.path().join(chart_file_name(&title));
        render_bucket_chart(&histogram, &title, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Vocabulary 10 Bucket Distribution"));
        assert!(svg.contains("<rect"));
    }
}
