use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Duration;
use tracing::info;

use crate::common::{Cell, Path};
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub cost: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub pushed_nodes: usize,
}

impl Stats {
    /// Adds `elapsed` to `time_us`, saturating instead of wrapping.
    pub fn add_elapsed(&mut self, elapsed: Duration) {
        let micros = usize::try_from(elapsed.as_micros()).unwrap_or(usize::MAX);
        self.time_us = self.time_us.saturating_add(micros);
    }

    pub fn print(&self) {
        info!(
            "Cost {:?} Time(microseconds) {:?} Expanded nodes number: {:?} Pushed nodes number {:?}",
            self.cost, self.time_us, self.expanded_nodes, self.pushed_nodes
        );
    }
}

/// Summary of one run, written as JSON when an output path is configured.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub height: usize,
    pub width: usize,
    pub seed: Option<u64>,
    pub start: Cell,
    pub goal: Cell,
    pub found: bool,
    pub cost: Option<usize>,
    pub path: Option<Path>,
    pub stats: Stats,
}

impl Report {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_json()?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_elapsed_saturates() {
        let mut stats = Stats::default();
        stats.add_elapsed(Duration::from_micros(1500));
        stats.add_elapsed(Duration::from_millis(2));
        assert_eq!(stats.time_us, 3500);

        stats.add_elapsed(Duration::MAX);
        assert_eq!(stats.time_us, usize::MAX);
        stats.add_elapsed(Duration::from_micros(1));
        assert_eq!(stats.time_us, usize::MAX);
    }

    #[test]
    fn test_report_json() {
        let report = Report {
            height: 5,
            width: 5,
            seed: Some(3),
            start: (1, 1),
            goal: (1, 3),
            found: true,
            cost: Some(2),
            path: Some(vec![(1, 1), (1, 2), (1, 3)]),
            stats: Stats {
                cost: 2,
                expanded_nodes: 3,
                pushed_nodes: 4,
                ..Stats::default()
            },
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["cost"], 2);
        assert_eq!(value["path"][1], serde_json::json!([1, 2]));
        assert_eq!(value["stats"]["pushed_nodes"], 4);
    }

    #[test]
    fn test_report_json_not_found() {
        let report = Report {
            height: 6,
            width: 7,
            seed: None,
            start: (1, 1),
            goal: (4, 5),
            found: false,
            cost: None,
            path: None,
            stats: Stats::default(),
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["found"], false);
        assert!(value["path"].is_null());
        assert!(value["seed"].is_null());
    }
}
