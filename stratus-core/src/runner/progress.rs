#[derive(Debug, Default)]
pub(super) struct Tracker {
    last_percent: u8,
}

impl Tracker {
    pub(super) fn new() -> Self {
        Tracker::default()
    }

    /// Scans an output line for a progress token and returns the percentage to
    /// report, clamped so that reported values never decrease within one source.
    pub(super) fn update(&mut self, line: &str) -> Option<u8> {
        let percent = percent_token(line)?;
        self.last_percent = self.last_percent.max(percent);
        Some(self.last_percent)
    }
}

/// A progress token is a whitespace-delimited word ending in '%' whose prefix
/// parses as an integer in 0..=100; the last such token in the line wins.
fn percent_token(line: &str) -> Option<u8> {
    line.split_whitespace()
        .filter_map(|word| word.strip_suffix('%'))
        .filter_map(|word| word.parse::<u8>().ok())
        .filter(|percent| *percent <= 100)
        .last()
}
