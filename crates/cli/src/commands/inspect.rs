use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use pixelcrush_kernel::config::{HEIGHT, WIDTH};
use pixelcrush_kernel::heatmap::{band_index, heat_value, BANDS};
use pixelcrush_kernel::snapshot::fingerprint;
use pixelcrush_kernel::Digest;
use std::path::Path;

use super::load_canvas;

/// Hardness summary of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub cells: usize,
    /// Cells with a non-zero digest.
    pub claimed: usize,
    /// Cell counts per heatmap band: black-red, red-yellow, yellow-white, white-blue, magenta.
    pub bands: [usize; BANDS],
    pub hardest: Option<(usize, usize, Digest)>,
    pub fingerprint: [u8; 32],
}

pub fn run(path: &Path) -> anyhow::Result<()> {
    let report = analyze::<WIDTH, HEIGHT>(path)?;
    print_report(path, &report);
    Ok(())
}

pub fn analyze<const W: usize, const H: usize>(path: &Path) -> anyhow::Result<Report> {
    let canvas = load_canvas::<W, H>(path)?;

    let mut report = Report {
        cells: W * H,
        claimed: 0,
        bands: [0; BANDS],
        hardest: None,
        fingerprint: fingerprint(&canvas.snapshot()),
    };

    canvas.for_each_row(|y, _, digests| {
        for (x, digest) in digests.iter().enumerate() {
            if *digest != Digest::ZERO {
                report.claimed += 1;
            }
            report.bands[band_index(heat_value(digest))] += 1;

            let harder = report.hardest.map_or(true, |(_, _, best)| *digest > best);
            if harder {
                report.hardest = Some((x, y, *digest));
            }
        }
    });

    Ok(report)
}

fn print_report(path: &Path, report: &Report) {
    println!("\nPixelcrush Snapshot Report");
    println!("--------------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339())
        .unwrap_or_else(|_| "unknown".to_string());

    table.add_row(vec!["File".to_string(), path.display().to_string()]);
    table.add_row(vec!["Modified".to_string(), modified]);
    table.add_row(vec!["BLAKE3".to_string(), hex::encode(report.fingerprint)]);
    table.add_row(vec!["Cells".to_string(), report.cells.to_string()]);
    table.add_row(vec!["Claimed".to_string(), report.claimed.to_string()]);

    let labels: [&str; BANDS] = ["black-red", "red-yellow", "yellow-white", "white-blue", "magenta"];
    for (label, count) in labels.iter().zip(report.bands) {
        table.add_row(vec![format!("Band {}", label), count.to_string()]);
    }
    if let Some((x, y, digest)) = report.hardest {
        table.add_row(vec![
            "Hardest".to_string(),
            format!("({}, {}) {} [{} leading ones]", x, y, digest, digest.leading_ones()),
        ]);
    }

    println!("{table}");
}
