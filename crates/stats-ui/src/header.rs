use crate::themes::Theme;
use ratatui::text::{Line, Span};
use stats_core::formatting::format_float;

/// Histogram viewer header rendering four lines:
///
/// 1. Title (the input file name).
/// 2. A 60-column `=` separator.
/// 3. `[ samples: N | bins: B | range: lo .. hi ]`
/// 4. An empty line.
pub struct Header<'a> {
    pub title: &'a str,
    pub samples: u64,
    pub bins: usize,
    pub range: (f64, f64),
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        title: &'a str,
        samples: u64,
        bins: usize,
        range: (f64, f64),
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            samples,
            bins,
            range,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(Span::styled(
                format!(" LATENCY DISTRIBUTION: {} ", self.title),
                self.theme.header,
            )),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ samples: ", self.theme.label),
                Span::styled(self.samples.to_string(), self.theme.value),
                Span::styled(" | bins: ", self.theme.label),
                Span::styled(self.bins.to_string(), self.theme.value),
                Span::styled(" | range: ", self.theme.label),
                Span::styled(format_float(self.range.0), self.theme.value),
                Span::styled(" .. ", self.theme.label),
                Span::styled(format_float(self.range.1), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
