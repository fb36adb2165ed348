//! Inclusive date ranges used as reporting periods.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive `[start, end]` reporting window.
///
/// A window whose `end` precedes its `start` is *empty*: it contains no dates,
/// has zero days, and overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period from inclusive bounds.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if the period contains at least one day.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the period, counting both ends.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        if self.is_valid() {
            (self.end - self.start).num_days() + 1
        } else {
            0
        }
    }

    /// Intersects this period with `[from, to]`, where `to = None` is open-ended.
    ///
    /// Returns `None` when the intersection is empty.
    #[must_use]
    pub fn overlap(&self, from: NaiveDate, to: Option<NaiveDate>) -> Option<Self> {
        let start = self.start.max(from);
        let end = to.map_or(self.end, |to| self.end.min(to));
        let overlap = Self::new(start, end);
        overlap.is_valid().then_some(overlap)
    }

    /// The calendar month containing `date`.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Option<Self> {
        let first = date.with_day(1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self::new(first, last))
    }

    /// The `months` calendar months ending with the month of `anchor`, oldest first.
    #[must_use]
    pub fn trailing_months(anchor: NaiveDate, months: u32) -> Vec<Self> {
        let Some(anchor_month) = Self::month_of(anchor) else {
            return Vec::new();
        };

        (0..months)
            .rev()
            .filter_map(|back| {
                anchor_month
                    .start
                    .checked_sub_months(Months::new(back))
                    .and_then(Self::month_of)
            })
            .collect()
    }

    /// Returns true if the period spans exactly one calendar month.
    #[must_use]
    pub fn is_calendar_month(&self) -> bool {
        Self::month_of(self.start).is_some_and(|month| month == *self)
    }

    /// Short label: `2026-01` for calendar months, `start..end` otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_calendar_month() {
            self.start.format("%Y-%m").to_string()
        } else {
            format!("{}..{}", self.start, self.end)
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
