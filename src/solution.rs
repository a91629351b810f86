//! Solution records exchanged with the surrounding tooling.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The best solution found by one run.
///
/// Serializes to `{"result": [...], "total_weight": w}` for LSCP and
/// `{"result": [...], "total_points_covered": c}` for MCLP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolutionRecord {
    Lscp { result: Vec<usize>, total_weight: u64 },
    Mclp { result: Vec<usize>, total_points_covered: usize },
}

impl SolutionRecord {
    /// Selected facility ids.
    pub fn result(&self) -> &[usize] {
        match self {
            SolutionRecord::Lscp { result, .. } | SolutionRecord::Mclp { result, .. } => result,
        }
    }

    /// The objective value, weight for LSCP and covered points for MCLP.
    pub fn objective(&self) -> u64 {
        match self {
            SolutionRecord::Lscp { total_weight, .. } => *total_weight,
            SolutionRecord::Mclp {
                total_points_covered,
                ..
            } => *total_points_covered as u64,
        }
    }

    /// Render the record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the record to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
