//! Governance profile defaults: the coarse audit/anomaly-detection knobs
//! a deployment picks by naming a level rather than setting each flag.

use serde::{Deserialize, Serialize};

/// A deployment's governance posture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceProfile {
    /// The (lowercased) level name this profile was resolved for.
    pub level: String,
    /// Whether tool invocations are appended to the audit log.
    pub audit_enabled: bool,
    /// Whether anomaly detection runs over the audit stream.
    pub anomaly_detection: bool,
}

/// Resolves `level` (case-insensitively) to its governance defaults.
///
/// `development -> {false,false}`, `production -> {true,false}`,
/// `enterprise -> {true,true}`, `paranoid -> {true,true}`. Unknown levels
/// pass through with both flags `false`.
#[must_use]
pub fn governance_defaults(level: &str) -> GovernanceProfile {
    let level = level.to_ascii_lowercase();
    let (audit_enabled, anomaly_detection) = match level.as_str() {
        "development" => (false, false),
        "production" => (true, false),
        "enterprise" => (true, true),
        "paranoid" => (true, true),
        _ => (false, false),
    };
    GovernanceProfile {
        level,
        audit_enabled,
        anomaly_detection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_named_profile() {
        assert_eq!(governance_defaults("development"), GovernanceProfile {
            level: "development".to_string(), audit_enabled: false, anomaly_detection: false,
        });
        assert_eq!(governance_defaults("production"), GovernanceProfile {
            level: "production".to_string(), audit_enabled: true, anomaly_detection: false,
        });
        assert_eq!(governance_defaults("enterprise"), GovernanceProfile {
            level: "enterprise".to_string(), audit_enabled: true, anomaly_detection: true,
        });
        assert_eq!(governance_defaults("paranoid"), GovernanceProfile {
            level: "paranoid".to_string(), audit_enabled: true, anomaly_detection: true,
        });
    }

    #[test]
    fn level_strings_are_lowercased() {
        assert_eq!(governance_defaults("PRODUCTION").level, "production");
    }

    #[test]
    fn unknown_levels_pass_through_with_flags_false() {
        let profile = governance_defaults("YOLO");
        assert_eq!(profile.level, "yolo");
        assert!(!profile.audit_enabled);
        assert!(!profile.anomaly_detection);
    }
}
