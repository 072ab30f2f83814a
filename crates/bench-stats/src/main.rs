mod bootstrap;

use anyhow::{Context, Result};
use stats_core::histogram::Histogram;
use stats_core::settings::{ReportKind, Settings};
use stats_data::analysis::{analyze_compound, analyze_keyed, collect_latencies};
use stats_data::reader::{open_input, DelimitedFormat};
use stats_data::writer::{
    render_compound_report, render_keyed_report, render_latency_csv, write_output,
};
use stats_ui::app::HistogramApp;

fn main() -> Result<()> {
    let settings = Settings::load()?;

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("bench-stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Settings: {:?}", settings);

    println!(
        "Parsing {}, and outputting in {}",
        settings.input.display(),
        settings.out.display()
    );

    let reader = open_input(&settings.input)?;

    match settings.report {
        ReportKind::Keyed => {
            let format = DelimitedFormat {
                delimiter: settings.delimiter_char(),
                key_field: settings.key_field,
                value_field: settings.value_field,
            };
            let analysis = analyze_keyed(reader, &format)
                .with_context(|| format!("failed to parse {}", settings.input.display()))?;
            let report = render_keyed_report(&analysis.summaries);
            write_output(&settings.out, report.as_bytes())?;
        }

        ReportKind::Latency => {
            let analysis = collect_latencies(reader)
                .with_context(|| format!("failed to parse {}", settings.input.display()))?;
            let csv = render_latency_csv(&analysis.rows)?;
            write_output(&settings.out, &csv)?;

            if !settings.no_plot {
                let histogram = Histogram::from_samples(&analysis.times(), settings.bins);
                let title = settings
                    .input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| settings.input.display().to_string());
                HistogramApp::new(&settings.theme, title, histogram)
                    .run()
                    .context("histogram viewer failed")?;
            }
        }

        ReportKind::Compound => {
            let analysis = analyze_compound(reader)
                .with_context(|| format!("failed to parse {}", settings.input.display()))?;
            let report = render_compound_report(&analysis.summaries);
            write_output(&settings.out, report.as_bytes())?;
        }
    }

    println!("Done");
    Ok(())
}
