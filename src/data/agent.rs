use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::data_error::AgentError;
use crate::error::InhalsolError;

/// Name of the agent selected after a reset
pub const DEFAULT_AGENT: &str = "Sevoflurane";

/// Reference data for one inhaled anesthetic agent
///
/// Values are for an adult of 30-40 years. `mac_base` and `max_vaporizer_setting`
/// are percentages (e.g. `2.0` means 2 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    name: String,
    #[serde(alias = "blood_gas")]
    blood_gas_partition_coefficient: f64,
    #[serde(alias = "mac")]
    mac_base: f64,
    #[serde(alias = "max_vaporizer")]
    max_vaporizer_setting: f64,
}

impl Agent {
    /// Create a new agent record, rejecting values the model cannot use
    pub fn new(
        name: impl Into<String>,
        blood_gas_partition_coefficient: f64,
        mac_base: f64,
        max_vaporizer_setting: f64,
    ) -> Result<Self, AgentError> {
        let agent = Agent {
            name: name.into(),
            blood_gas_partition_coefficient,
            mac_base,
            max_vaporizer_setting,
        };
        agent.validate()?;
        Ok(agent)
    }

    fn validate(&self) -> Result<(), AgentError> {
        let invalid = |reason: &str| AgentError::InvalidAgentData {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !(self.blood_gas_partition_coefficient.is_finite()
            && self.blood_gas_partition_coefficient > 0.0)
        {
            return Err(invalid("blood/gas partition coefficient must be > 0"));
        }
        if !(self.mac_base.is_finite() && self.mac_base > 0.0) {
            return Err(invalid("base MAC must be > 0"));
        }
        if !(self.max_vaporizer_setting.is_finite() && self.max_vaporizer_setting > 0.0) {
            return Err(invalid("maximum vaporizer setting must be > 0"));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blood/gas partition coefficient (dimensionless)
    pub fn blood_gas_partition_coefficient(&self) -> f64 {
        self.blood_gas_partition_coefficient
    }

    /// MAC at the reference age of 40 years, in percent
    pub fn mac_base(&self) -> f64 {
        self.mac_base
    }

    /// Upper bound of the vaporizer dial, in percent
    pub fn max_vaporizer_setting(&self) -> f64 {
        self.max_vaporizer_setting
    }
}

lazy_static! {
    static ref BUILTIN_AGENTS: AgentTable = AgentTable {
        agents: vec![
            Agent {
                name: "Sevoflurane".to_string(),
                blood_gas_partition_coefficient: 0.65,
                mac_base: 2.0,
                max_vaporizer_setting: 8.0,
            },
            Agent {
                name: "Desflurane".to_string(),
                blood_gas_partition_coefficient: 0.42,
                mac_base: 6.0,
                max_vaporizer_setting: 18.0,
            },
            Agent {
                name: "Isoflurane".to_string(),
                blood_gas_partition_coefficient: 1.46,
                mac_base: 1.17,
                max_vaporizer_setting: 5.0,
            },
            Agent {
                name: "Halothane".to_string(),
                blood_gas_partition_coefficient: 2.54,
                mac_base: 0.75,
                max_vaporizer_setting: 5.0,
            },
        ],
    };
}

/// An immutable, ordered catalogue of agents keyed by name
///
/// Lookup ignores ASCII case. Names are unique within a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentTable {
    agents: Vec<Agent>,
}

impl AgentTable {
    /// The four agents shipped with the crate, in display order
    pub fn builtin() -> &'static AgentTable {
        &BUILTIN_AGENTS
    }

    /// Build a table from agent records, checking each record and name uniqueness
    pub fn new(agents: Vec<Agent>) -> Result<Self, AgentError> {
        for (i, agent) in agents.iter().enumerate() {
            agent.validate()?;
            if agents[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&agent.name))
            {
                return Err(AgentError::DuplicateAgent {
                    name: agent.name.clone(),
                });
            }
        }
        Ok(AgentTable { agents })
    }

    /// Parse a JSON list of agent records
    ///
    /// ```json
    /// [{ "name": "Sevoflurane", "blood_gas_partition_coefficient": 0.65,
    ///    "mac_base": 2.0, "max_vaporizer_setting": 8.0 }]
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, InhalsolError> {
        let agents: Vec<Agent> = serde_json::from_str(json)?;
        Ok(AgentTable::new(agents)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InhalsolError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Look up an agent by name
    pub fn get(&self, name: &str) -> Result<&Agent, AgentError> {
        self.agents
            .iter()
            .find(|agent| agent.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| AgentError::UnknownAgent {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_reference_values() {
        let table = AgentTable::builtin();
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            vec!["Sevoflurane", "Desflurane", "Isoflurane", "Halothane"]
        );

        let iso = table.get("Isoflurane").unwrap();
        assert_eq!(iso.blood_gas_partition_coefficient(), 1.46);
        assert_eq!(iso.mac_base(), 1.17);
        assert_eq!(iso.max_vaporizer_setting(), 5.0);

        let des = table.get("Desflurane").unwrap();
        assert_eq!(des.max_vaporizer_setting(), 18.0);
    }

    #[test]
    fn lookup_ignores_case() {
        let table = AgentTable::builtin();
        assert_eq!(table.get("halothane").unwrap().mac_base(), 0.75);
        assert!(table.get(DEFAULT_AGENT).is_ok());
    }

    #[test]
    fn unknown_agent_is_rejected() {
        let err = AgentTable::builtin().get("Xenon").unwrap_err();
        assert_eq!(
            err,
            AgentError::UnknownAgent {
                name: "Xenon".to_string()
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let a = Agent::new("Enflurane", 1.9, 1.68, 5.0).unwrap();
        let b = Agent::new("ENFLURANE", 1.9, 1.68, 5.0).unwrap();
        let err = AgentTable::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, AgentError::DuplicateAgent { .. }));
    }

    #[test]
    fn invalid_records_are_rejected() {
        assert!(Agent::new("Bad", 0.0, 1.0, 5.0).is_err());
        assert!(Agent::new("Bad", 1.0, -1.0, 5.0).is_err());
        assert!(Agent::new("Bad", 1.0, 1.0, f64::NAN).is_err());
        assert!(Agent::new("  ", 1.0, 1.0, 5.0).is_err());
    }

    #[test]
    fn table_from_json() {
        let json = r#"[
            {"name": "Enflurane", "blood_gas_partition_coefficient": 1.9, "mac_base": 1.68, "max_vaporizer_setting": 5},
            {"name": "Methoxyflurane", "blood_gas": 12.0, "mac": 0.16, "max_vaporizer": 3}
        ]"#;
        let table = AgentTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("methoxyflurane").unwrap().mac_base(), 0.16);
    }

    #[test]
    fn table_from_json_validates_records() {
        let json = r#"[{"name": "Broken", "blood_gas": 0.0, "mac": 1.0, "max_vaporizer": 5}]"#;
        let err = AgentTable::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            InhalsolError::Agent(AgentError::InvalidAgentData { .. })
        ));
    }
}
