use std::ops::AddAssign;

/// Counters for one reconciliation of a locale dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of extracted keys (leaves in namespace mode).
    pub total: usize,
    /// Extracted keys missing from the persisted dictionary.
    pub new: usize,
    /// Persisted keys no longer extracted, whether or not safe mode kept them.
    pub deleted: usize,
    /// Extracted keys whose persisted value was carried over.
    pub updated: usize,
    /// Extracted keys that had no text before the empty-value policy ran.
    pub empty: usize,
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.new += other.new;
        self.deleted += other.deleted;
        self.updated += other.updated;
        self.empty += other.empty;
    }
}

impl Stats {
    /// Share of empty entries, in percent.
    pub fn empty_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.empty as f64 * 100.0 / self.total as f64
        }
    }

    /// `"<locale> statistics: Updated: <n> / Deleted: <n> / New: <n>"`
    pub fn summary_line(&self, locale: &str) -> String {
        format!(
            "{} statistics: Updated: {} / Deleted: {} / New: {}",
            locale, self.updated, self.deleted, self.new
        )
    }

    /// `"<locale> empty: <n> / <total> (<pct>%)"`
    pub fn empty_line(&self, locale: &str) -> String {
        format!(
            "{} empty: {} / {} ({:.1}%)",
            locale,
            self.empty,
            self.total,
            self.empty_percent()
        )
    }
}
