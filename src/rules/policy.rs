use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Finding, Severity};

/// Pass/fail decision after applying the ignore list
/// and severity overrides to raw findings. The findings themselves are never
/// changed; the policy only decides the exit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_findings: usize,
    pub effective_findings: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
}

/// Policy configuration loaded from `.appassess.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum severity to fail the run.
    #[serde(default = "default_fail_on", with = "severity_name")]
    pub fail_on: Severity,
    /// Rule IDs to ignore entirely.
    #[serde(default)]
    pub ignore_rules: HashSet<String>,
    /// Per-rule severity overrides.
    #[serde(default, with = "severity_overrides")]
    pub overrides: HashMap<String, Severity>,
}

fn default_fail_on() -> Severity {
    Severity::High
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: Severity::High,
            ignore_rules: HashSet::new(),
            overrides: HashMap::new(),
        }
    }
}

impl Policy {
    /// Evaluate findings against this policy and produce a verdict.
    pub fn evaluate(&self, findings: &[Finding]) -> PolicyVerdict {
        let effective: Vec<Severity> = findings
            .iter()
            .filter(|f| !self.ignore_rules.contains(&f.rule_id))
            .map(|f| self.effective_severity(f))
            .collect();

        let highest = effective.iter().copied().max();
        let failed = effective.iter().any(|&sev| sev >= self.fail_on);

        PolicyVerdict {
            pass: !failed,
            total_findings: findings.len(),
            effective_findings: effective.len(),
            highest_severity: highest,
            fail_threshold: self.fail_on,
        }
    }

    fn effective_severity(&self, finding: &Finding) -> Severity {
        self.overrides
            .get(&finding.rule_id)
            .copied()
            .unwrap_or(finding.severity)
    }
}

/// Severities are written lowercase in config files (`fail_on = "high"`).
mod severity_name {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::rules::Severity;

    pub fn serialize<S: Serializer>(sev: &Severity, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&sev.as_str().to_lowercase())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Severity, D::Error> {
        let raw = String::deserialize(d)?;
        Severity::from_str_lenient(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown severity '{}'", raw)))
    }
}

mod severity_overrides {
    use std::collections::HashMap;

    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::rules::Severity;

    pub fn serialize<S: Serializer>(
        overrides: &HashMap<String, Severity>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.collect_map(
            overrides
                .iter()
                .map(|(id, sev)| (id, sev.as_str().to_lowercase())),
        )
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<HashMap<String, Severity>, D::Error> {
        let raw = HashMap::<String, String>::deserialize(d)?;
        raw.into_iter()
            .map(|(id, sev)| match Severity::from_str_lenient(&sev) {
                Some(parsed) => Ok((id, parsed)),
                None => Err(de::Error::custom(format!(
                    "unknown severity '{}' for rule {}",
                    sev, id
                ))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Category;

    fn make_finding(rule_id: &str, severity: Severity) -> Finding {
        Finding {
            rule_id: rule_id.into(),
            app_service: "web".into(),
            category: Category::Security,
            severity,
            title: "Test".into(),
            description: "test".into(),
            recommendation: "fix".into(),
            reference: None,
        }
    }

    #[test]
    fn default_policy_fails_on_high() {
        let policy = Policy::default();
        let findings = vec![make_finding("APPSVC-002", Severity::High)];
        let verdict = policy.evaluate(&findings);
        assert!(!verdict.pass);
    }

    #[test]
    fn default_policy_passes_on_medium() {
        let policy = Policy::default();
        let findings = vec![make_finding("APPSVC-003", Severity::Medium)];
        let verdict = policy.evaluate(&findings);
        assert!(verdict.pass);
        assert_eq!(verdict.highest_severity, Some(Severity::Medium));
    }

    #[test]
    fn ignore_rule_removes_finding() {
        let mut policy = Policy::default();
        policy.ignore_rules.insert("APPSVC-001".into());
        let findings = vec![make_finding("APPSVC-001", Severity::Critical)];
        let verdict = policy.evaluate(&findings);
        assert!(verdict.pass);
        assert_eq!(verdict.effective_findings, 0);
    }

    #[test]
    fn override_downgrades_severity() {
        let mut policy = Policy::default();
        policy.overrides.insert("APPSVC-001".into(), Severity::Low);
        let findings = vec![make_finding("APPSVC-001", Severity::Critical)];
        let verdict = policy.evaluate(&findings);
        assert!(verdict.pass);
    }

    #[test]
    fn evaluate_leaves_findings_untouched() {
        let mut policy = Policy::default();
        policy.ignore_rules.insert("APPSVC-018".into());
        policy.overrides.insert("APPSVC-001".into(), Severity::Medium);
        let findings = vec![
            make_finding("APPSVC-001", Severity::Critical),
            make_finding("APPSVC-018", Severity::Low),
            make_finding("APPSVC-002", Severity::High),
        ];
        let verdict = policy.evaluate(&findings);
        assert_eq!(verdict.total_findings, 3);
        assert_eq!(verdict.effective_findings, 2);
        assert_eq!(verdict.highest_severity, Some(Severity::High));
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn parses_lowercase_severities_from_toml() {
        let policy: Policy = toml::from_str(
            r#"
            fail_on = "critical"
            ignore_rules = ["APPSVC-015"]
            [overrides]
            "APPSVC-007" = "medium"
            "#,
        )
        .unwrap();
        assert_eq!(policy.fail_on, Severity::Critical);
        assert!(policy.ignore_rules.contains("APPSVC-015"));
        assert_eq!(policy.overrides["APPSVC-007"], Severity::Medium);
    }

    #[test]
    fn rejects_unknown_severity() {
        let parsed: Result<Policy, _> = toml::from_str(r#"fail_on = "urgent""#);
        assert!(parsed.is_err());
    }
}
