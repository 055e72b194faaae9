//! Statistics Accumulator

use crate::raytrace::*;
use std::collections::BTreeMap;

/// Distribution statistic.
#[derive(Default, Copy, Clone, Debug)]
pub struct StatsDistribution {
    /// Sum of all values.
    sum: Float,

    /// Count of all values.
    count: u64,

    /// Minimum value.
    min: Option<Float>,

    /// Maximum value.
    max: Option<Float>,
}

impl StatsDistribution {
    /// Report a sample value.
    ///
    /// * `val`  - Sample value.
    pub fn report(&mut self, val: Float) {
        self.sum += val;
        self.count += 1;
        self.min = Some(self.min.map_or(val, |m| min(m, val)));
        self.max = Some(self.max.map_or(val, |m| max(m, val)));
    }

    /// Returns the mean of the samples, if any.
    pub fn mean(&self) -> Option<Float> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as Float)
        }
    }
}

/// Aggregate statistics about a trace and print them grouped by category.
/// Titles use `/` to separate the category, e.g. `"Trace/Generations"`.
#[derive(Default, Clone, Debug)]
pub struct StatsAccumulator {
    /// Counters.
    counters: BTreeMap<String, i64>,

    /// Float distribution.
    distributions: BTreeMap<String, StatsDistribution>,

    /// Ratios.
    ratios: BTreeMap<String, (i64, i64)>,

    /// Free-form values such as result metrics.
    values: BTreeMap<String, Float>,
}

impl StatsAccumulator {
    /// Create a new instance of `StatsAccumulator`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates a counter value.
    ///
    /// * `name` - Statistic name.
    /// * `val`  - Counter value.
    pub fn report_counter(&mut self, name: &str, val: i64) {
        *self.counters.entry(name.to_string()).or_insert(0) += val;
    }

    /// Accumulates a distribution sample.
    ///
    /// * `name` - Statistic name.
    /// * `val`  - Sample value.
    pub fn report_sample(&mut self, name: &str, val: Float) {
        self.distributions
            .entry(name.to_string())
            .or_default()
            .report(val);
    }

    /// Accumulates a ratio value.
    ///
    /// * `name`  - Statistic name.
    /// * `num`   - Numerator.
    /// * `denom` - Denominator.
    pub fn report_ratio(&mut self, name: &str, num: i64, denom: i64) {
        let v = self.ratios.entry(name.to_string()).or_insert((0, 0));
        v.0 += num;
        v.1 += denom;
    }

    /// Records a value, replacing any previous one.
    ///
    /// * `name` - Statistic name.
    /// * `val`  - The value.
    pub fn report_value(&mut self, name: &str, val: Float) {
        self.values.insert(name.to_string(), val);
    }

    /// Returns a counter's value.
    ///
    /// * `name` - Statistic name.
    pub fn counter(&self, name: &str) -> Option<i64> {
        self.counters.get(name).copied()
    }

    /// Returns the report lines grouped by category.
    pub fn report(&self) -> BTreeMap<String, Vec<String>> {
        let mut to_print: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (k, v) in self.counters.iter() {
            let (category, title) = get_category_and_title(k);
            to_print
                .entry(category)
                .or_default()
                .push(format!("{title:<42}               {v:12}"));
        }

        for (k, v) in self.distributions.iter() {
            if let (Some(avg), Some(mn), Some(mx)) = (v.mean(), v.min, v.max) {
                let (category, title) = get_category_and_title(k);
                to_print.entry(category).or_default().push(format!(
                    "{title:<42}                      {avg:.3} avg [range {mn} - {mx}]"
                ));
            }
        }

        for (k, &(num, denom)) in self.ratios.iter() {
            let (category, title) = get_category_and_title(k);
            let ratio = safe_ratio(num as Float, denom as Float);
            to_print
                .entry(category)
                .or_default()
                .push(format!("{title:<42}{num:12} / {denom:12} ({ratio:.2}x)"));
        }

        for (k, v) in self.values.iter() {
            let (category, title) = get_category_and_title(k);
            to_print
                .entry(category)
                .or_default()
                .push(format!("{title:<42}               {v:12.6}"));
        }

        to_print
    }

    /// Prints the report.
    pub fn print(&self) {
        println!("Statistics:");
        for (category, items) in self.report() {
            println!("  {category}");
            for item in items {
                println!("    {item}");
            }
        }
    }
}

/// Split a statistic name into category and title at the first `/`.
///
/// * `s` - Statistic name.
fn get_category_and_title(s: &str) -> (String, String) {
    match s.split_once('/') {
        Some((category, title)) => (category.to_string(), title.to_string()),
        None => (String::new(), s.to_string()),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
