//! Age adjustment of the minimum alveolar concentration

use crate::data::Agent;

/// Age at which an agent's MAC equals its tabulated base value
pub const MAC_REFERENCE_AGE: f64 = 40.0;

/// Log10 decline of MAC per year of age
pub const MAC_DECAY_PER_YEAR: f64 = 0.00269;

/// MAC multiplier applied up to and including one year of age
pub const INFANT_MAC_FACTOR: f64 = 1.5;

/// Age-adjusted MAC in percent
///
/// Infants (`age_years <= 1`) peak at 1.5 × base MAC. Above one year MAC decays
/// log-linearly with age: `mac_base * 10^(-0.00269 * (age - 40))`.
///
/// `age_years` is expected to be validated (finite, >= 0) by the caller.
pub fn derive_age_adjusted_mac(agent: &Agent, age_years: f64) -> f64 {
    let mac_base = agent.mac_base();
    if age_years <= 1.0 {
        mac_base * INFANT_MAC_FACTOR
    } else {
        mac_base * 10f64.powf(-MAC_DECAY_PER_YEAR * (age_years - MAC_REFERENCE_AGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AgentTable;
    use approx::assert_relative_eq;

    #[test]
    fn infants_get_peak_mac() {
        for agent in AgentTable::builtin().iter() {
            for age in [0.0, 0.25, 0.5, 1.0] {
                assert_eq!(
                    derive_age_adjusted_mac(agent, age),
                    1.5 * agent.mac_base(),
                    "{} at {} years",
                    agent.name(),
                    age
                );
            }
        }
    }

    #[test]
    fn reference_age_returns_base_mac() {
        for agent in AgentTable::builtin().iter() {
            assert_eq!(derive_age_adjusted_mac(agent, 40.0), agent.mac_base());
        }
    }

    #[test]
    fn mac_decreases_with_age_after_infancy() {
        let agent = AgentTable::builtin().get("Isoflurane").unwrap();
        let ages: Vec<f64> = (0..=100).map(|i| 1.01 + i as f64 * 0.99).collect();
        for pair in ages.windows(2) {
            assert!(
                derive_age_adjusted_mac(agent, pair[1]) < derive_age_adjusted_mac(agent, pair[0]),
                "MAC not decreasing between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn adult_sevoflurane_mac() {
        let agent = AgentTable::builtin().get("Sevoflurane").unwrap();
        let mac = derive_age_adjusted_mac(agent, 30.0);
        assert_relative_eq!(mac, 2.0 * 10f64.powf(0.0269), epsilon = 1e-12);
        assert_relative_eq!(mac, 2.128, epsilon = 1e-3);
    }
}
