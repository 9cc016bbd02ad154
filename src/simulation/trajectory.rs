use serde::{Deserialize, Serialize};

use crate::kinetics::Sample;

/// The samples emitted over one run, in emission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// `(time_min, fi_pct)` pairs for plotting
    pub fn fi_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.time_minutes, s.fi_percent))
    }

    /// `(time_min, fa_pct)` pairs for plotting
    pub fn fa_series(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.time_minutes, s.fa_percent))
    }

    /// FA/FI ratio at each sample, the classic uptake curve; zero while FI is zero
    pub fn fa_fi_ratio(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| {
            let ratio = if s.fi_percent > 0.0 {
                s.fa_percent / s.fi_percent
            } else {
                0.0
            };
            (s.time_minutes, ratio)
        })
    }
}

impl From<Vec<Sample>> for Trajectory {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}
