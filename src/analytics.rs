//! Series transformations — trailing moving average, window filtering,
//! period price change, and calendar gap detection.
//!
//! All operations are pure: they take a [`Series`] by reference (or by value
//! when they attach a column) and never touch the network.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::error::WindowUnresolvable;
use crate::types::enums::Window;
use crate::types::series::{PriceChange, Series};

/// Mean of each trailing `period`-long run of `values`, ending at and
/// including index `i`.
///
/// The first `period - 1` entries are `None`. A `period` of zero yields all
/// `None`.
pub fn trailing_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for (end, window) in (period - 1..).zip(values.windows(period)) {
        out[end] = Some(window.iter().sum::<f64>() / period as f64);
    }
    out
}

impl Series {
    /// Attach the trailing `period`-bar mean of close to every bar.
    pub fn with_moving_average(self, period: usize) -> Series {
        let closes: Vec<f64> = self.closes().collect();
        let means = trailing_mean(&closes, period);
        let symbol = self.symbol().to_owned();
        let bars = self
            .into_bars()
            .into_iter()
            .zip(means)
            .map(|(mut bar, mean)| {
                bar.moving_average = mean;
                bar
            })
            .collect();
        Series::from_sorted(symbol, bars)
    }

    /// Bars dated on or after `last.date - window`, or every bar for
    /// [`Window::All`].
    ///
    /// The result is always a contiguous suffix of `self`.
    pub fn windowed(&self, window: Window) -> Series {
        let cutoff = match (self.last(), window.days()) {
            (Some(last), Some(days)) => last.date.checked_sub_days(Days::new(days)),
            _ => None,
        };
        let start = match cutoff {
            Some(cutoff) => self.bars().partition_point(|b| b.date < cutoff),
            None => 0,
        };
        Series::from_sorted(self.symbol().to_owned(), self.bars()[start..].to_vec())
    }

    /// Close-to-close change over `window`, ending at the last bar.
    ///
    /// For a fixed window the start bar is the latest bar dated on or before
    /// `last.date - window`. When no such bar exists (history shorter than
    /// the window, or an empty series) the window is unresolvable.
    pub fn price_change(&self, window: Window) -> Result<PriceChange, WindowUnresolvable> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Err(WindowUnresolvable {
                window,
                cutoff: None,
            });
        };

        let Some(days) = window.days() else {
            return Ok(PriceChange::between(window, first.date, first, last));
        };

        let cutoff = last.date.checked_sub_days(Days::new(days));
        let idx = cutoff.map_or(0, |c| self.bars().partition_point(|b| b.date <= c));
        match (cutoff, idx) {
            (Some(cutoff), idx) if idx > 0 => Ok(PriceChange::between(
                window,
                cutoff,
                &self.bars()[idx - 1],
                last,
            )),
            _ => Err(WindowUnresolvable { window, cutoff }),
        }
    }

    /// Calendar days between the first and last bar (inclusive) that have no
    /// bar: weekends, holidays, and provider gaps.
    pub fn missing_calendar_dates(&self) -> BTreeSet<NaiveDate> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return BTreeSet::new();
        };
        let traded: BTreeSet<NaiveDate> = self.bars().iter().map(|b| b.date).collect();
        first
            .date
            .iter_days()
            .take_while(|d| *d <= last.date)
            .filter(|d| !traded.contains(d))
            .collect()
    }
}
