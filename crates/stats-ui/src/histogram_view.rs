//! Latency histogram view.
//!
//! The histogram is binned once at full resolution; at draw time it is
//! downsampled to the plot width and rendered as a [`Sparkline`].

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};
use stats_core::formatting::format_float;
use stats_core::histogram::Histogram;

use crate::header::Header;
use crate::themes::Theme;

/// Sparkline resolution: the tallest column maps to this value.
const BAR_SCALE: f64 = 1_000_000.0;

/// Everything the view needs to draw one frame.
#[derive(Debug, Clone)]
pub struct HistogramViewData {
    pub title: String,
    pub histogram: Histogram,
}

impl HistogramViewData {
    pub fn new(title: impl Into<String>, histogram: Histogram) -> Self {
        Self {
            title: title.into(),
            histogram,
        }
    }
}

/// Render header, plot, axis labels and footer into `area`.
pub fn render_histogram_view(
    frame: &mut Frame,
    area: Rect,
    data: &HistogramViewData,
    theme: &Theme,
) {
    let hist = &data.histogram;
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Header::new(
        &data.title,
        hist.total(),
        hist.counts.len(),
        (hist.start, hist.end()),
        theme,
    );
    frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

    let plot_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" density ");
    let inner_width = plot_block.inner(chunks[1]).width as usize;
    let bars = scaled_bars(hist, inner_width);
    frame.render_widget(
        Sparkline::default()
            .block(plot_block)
            .style(theme.bar)
            .data(bars.iter().copied()),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(axis_line(hist, chunks[2].width as usize, theme)),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Press 'q' or Ctrl+C to exit",
            theme.dim,
        ))),
        chunks[3],
    );
}

/// Shown when there are no samples to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No latency samples found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text))
            .block(Block::default().borders(Borders::ALL).title(" bench-stats ")),
        area,
    );
}

/// Downsample densities to `width` columns and scale them to integer bar
/// heights, tallest column = [`BAR_SCALE`].
pub fn scaled_bars(hist: &Histogram, width: usize) -> Vec<u64> {
    let columns = hist.downsample(width);
    let peak = columns.iter().copied().fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return vec![0; columns.len()];
    }
    columns
        .iter()
        .map(|d| (d / peak * BAR_SCALE).round() as u64)
        .collect()
}

/// `start` flush left, `end` flush right, midpoint centred when it fits.
fn axis_line<'a>(hist: &Histogram, width: usize, theme: &Theme) -> Line<'a> {
    let left = format_float(hist.start);
    let right = format_float(hist.end());
    let mid = format_float((hist.start + hist.end()) / 2.0);

    let used = left.len() + right.len();
    if width <= used {
        return Line::from(Span::styled(left, theme.axis));
    }

    let gap = width - used;
    let text = if gap > mid.len() + 2 {
        let pad_left = (gap - mid.len()) / 2;
        let pad_right = gap - mid.len() - pad_left;
        format!(
            "{}{}{}{}{}",
            left,
            " ".repeat(pad_left),
            mid,
            " ".repeat(pad_right),
            right
        )
    } else {
        format!("{}{}{}", left, " ".repeat(gap), right)
    };
    Line::from(Span::styled(text, theme.axis))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
