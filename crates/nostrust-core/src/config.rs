// crates/nostrust-core/src/config.rs
//
// Run-wide tunables for the trust engine. Passed by reference into every
// pass; none of them change control flow, only the numbers.

use serde::{Deserialize, Serialize};

use crate::error::NostrustError;

/// Parameters of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Floor below which a positive follow contribution is discarded, and
    /// below which a per-mute penalty is not recorded.
    pub minimum_trust_score: f64,
    /// Use follows to spread trust.
    pub follow_enable: bool,
    /// Share of a follower's score passed to its followees (split evenly).
    pub follow_weight: f64,
    /// Follow traversal depth. 1 = direct followees only. Keep at 3 or
    /// below: cycles in the graph are not detected.
    pub follow_ttl: u32,
    /// Skip re-expanding an identity already walked during this run.
    /// Off by default: the default walk recomputes through cycles.
    pub follow_visit_once: bool,
    /// Use mute lists to distrust.
    pub mute_enable: bool,
    /// Use reports to distrust.
    pub reports_enable: bool,
    /// A reporter must score strictly above this for its reports to count.
    pub report_eligibility_threshold: f64,
    /// Flat penalty for being reported by someone outside the scored set.
    pub untrusted_reports_weight: f64,
    /// Use reposts to boost trust.
    pub reposts_enable: bool,
    /// Fraction of a reposter's score given to the reposted identity.
    pub repost_weight: f64,
    /// Lookups a single pass keeps in flight at once.
    pub fetch_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            minimum_trust_score: 0.000002,
            follow_enable: true,
            follow_weight: 1.0,
            follow_ttl: 2,
            follow_visit_once: false,
            mute_enable: true,
            reports_enable: true,
            report_eligibility_threshold: 0.00005,
            untrusted_reports_weight: 0.000001,
            reposts_enable: true,
            repost_weight: 0.001,
            fetch_concurrency: 8,
        }
    }
}

impl EngineConfig {
    /// Score a reposter must exceed before its reposts count.
    pub fn repost_eligibility_threshold(&self) -> f64 {
        100.0 * self.minimum_trust_score
    }

    /// Reject weights that would poison the ledger with NaN or flip signs.
    pub fn validate(&self) -> Result<(), NostrustError> {
        let weights = [
            ("minimum_trust_score", self.minimum_trust_score),
            ("follow_weight", self.follow_weight),
            ("report_eligibility_threshold", self.report_eligibility_threshold),
            ("untrusted_reports_weight", self.untrusted_reports_weight),
            ("repost_weight", self.repost_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(NostrustError::Config(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.fetch_concurrency == 0 {
            return Err(NostrustError::Config(
                "fetch_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_parameters() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.minimum_trust_score, 0.000002);
        assert_eq!(cfg.follow_ttl, 2);
        assert!(!cfg.follow_visit_once);
        assert!((cfg.repost_eligibility_threshold() - 0.0002).abs() < 1e-12);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_and_negative() {
        let cfg = EngineConfig {
            follow_weight: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = EngineConfig {
            repost_weight: -0.1,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = EngineConfig {
            fetch_concurrency: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"follow_ttl": 1, "mute_enable": false}"#).unwrap();
        assert_eq!(cfg.follow_ttl, 1);
        assert!(!cfg.mute_enable);
        assert_eq!(cfg.repost_weight, 0.001);
    }
}
