use crate::error::Result;
use crate::evaluation::preview::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CurveFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

/// Snapshots taken during one evaluation run, oldest first.
#[derive(Clone, Debug, Default)]
pub struct LearningCurve {
    snapshots: Vec<Snapshot>,
}

impl LearningCurve {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn write_to<W: Write>(&self, mut out: W, format: CurveFormat) -> Result<()> {
        match format {
            CurveFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &self.snapshots)?;
                writeln!(out)?;
            }
            CurveFormat::Csv => self.write_delimited(&mut out, ',')?,
            CurveFormat::Tsv => self.write_delimited(&mut out, '\t')?,
        }
        Ok(())
    }

    fn write_delimited<W: Write>(&self, out: &mut W, sep: char) -> Result<()> {
        let extra_keys: BTreeSet<&str> = self
            .snapshots
            .iter()
            .flat_map(|s| s.extras.keys().map(String::as_str))
            .collect();

        let mut header = vec!["instances_seen", "accuracy", "kappa", "seconds"];
        header.extend(extra_keys.iter().copied());
        writeln!(out, "{}", header.join(&sep.to_string()))?;

        for s in &self.snapshots {
            let mut row = vec![
                s.instances_seen.to_string(),
                s.accuracy.to_string(),
                s.kappa.to_string(),
                s.seconds.to_string(),
            ];
            row.extend(
                extra_keys
                    .iter()
                    .map(|k| s.extras.get(*k).map(f64::to_string).unwrap_or_default()),
            );
            writeln!(out, "{}", row.join(&sep.to_string()))?;
        }
        Ok(())
    }
}
