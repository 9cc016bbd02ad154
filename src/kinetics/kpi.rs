use std::fmt;

use serde::{Deserialize, Serialize};

use super::SimulationState;
use crate::parameters::DerivedParameters;

/// Clinical indicators reported when a run is paused or completes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub time_to_mac_minutes: Option<f64>,
    pub fa_final_percent: f64,
    pub age_adjusted_mac_percent: f64,
}

impl Kpis {
    pub fn snapshot(state: &SimulationState, derived: &DerivedParameters) -> Self {
        Self {
            time_to_mac_minutes: state.time_to_mac_minutes,
            fa_final_percent: state.fa * 100.0,
            age_adjusted_mac_percent: derived.age_adjusted_mac(),
        }
    }
}

impl fmt::Display for Kpis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_to_mac_minutes {
            Some(t) => writeln!(f, "Time to MAC: {:.1} min", t)?,
            None => writeln!(f, "Time to MAC: N/A")?,
        }
        writeln!(f, "Final FA: {:.2} %", self.fa_final_percent)?;
        write!(f, "MAC (age): {:.2} %", self.age_adjusted_mac_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AgentTable, PatientProfile};
    use approx::assert_relative_eq;

    #[test]
    fn snapshot_reports_percentages() {
        let agent = AgentTable::builtin().get("Halothane").unwrap();
        let derived = DerivedParameters::derive(agent, &PatientProfile::years(40.0, 70.0)).unwrap();
        let state = SimulationState {
            elapsed_seconds: 600,
            fi: 0.01,
            fa: 0.0075,
            time_to_mac_minutes: Some(4.5),
            is_running: false,
        };
        let kpis = Kpis::snapshot(&state, &derived);
        assert_relative_eq!(kpis.fa_final_percent, 0.75, epsilon = 1e-12);
        assert_eq!(kpis.age_adjusted_mac_percent, 0.75);

        let text = kpis.to_string();
        assert!(text.contains("Time to MAC: 4.5 min"));
        assert!(text.contains("Final FA: 0.75 %"));
    }

    #[test]
    fn unreached_mac_displays_na() {
        let agent = AgentTable::builtin().get("Sevoflurane").unwrap();
        let derived = DerivedParameters::derive(agent, &PatientProfile::default()).unwrap();
        let kpis = Kpis::snapshot(&SimulationState::new(), &derived);
        assert!(kpis.to_string().starts_with("Time to MAC: N/A"));
    }
}
