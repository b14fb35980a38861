use crate::models::Entry;

/// How an entry is rendered into a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// `"{rank}. {title} - {link}"`
    Plain,
    /// Plain line followed by the posting time.
    Timed,
}

pub fn format_entry(entry: &Entry, style: LineStyle) -> String {
    let rank = entry
        .rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| "?".to_string());
    let link = entry.link.as_deref().unwrap_or("(no link)");
    let line = format!("{}. {} - {}", rank, entry.title, link);

    match style {
        LineStyle::Plain => line,
        LineStyle::Timed => {
            let when = entry
                .timestamp
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "unknown time".to_string());
            format!("{} ({})", line, when)
        }
    }
}

/// Ordered report lines, one per processed entry.
#[derive(Debug, Default)]
pub struct ReportCollector {
    lines: Vec<String>,
}

impl ReportCollector {
    pub fn record(&mut self, entry: &Entry, style: LineStyle) {
        self.lines.push(format_entry(entry, style));
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
impl ReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
