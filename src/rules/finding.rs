use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AssessError, Result};

/// A best-practice violation on one app service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Catalog identifier of the rule that fired (e.g., "APPSVC-001").
    pub rule_id: String,
    /// Name of the app service the finding is about.
    pub app_service: String,
    pub category: Category,
    pub severity: Severity,
    pub title: String,
    /// What was observed.
    pub description: String,
    /// What to change.
    pub recommendation: String,
    /// Documentation link.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Ordered urgency: `Critical > High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Most urgent first.
    pub const ALL: [Severity; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which quality dimension a rule guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Security,
    Performance,
    Reliability,
    Monitoring,
    DevOps,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::Reliability => "Reliability",
            Self::Monitoring => "Monitoring",
            Self::DevOps => "DevOps",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a catalog rule, used for `list-rules` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    pub id: String,
    pub name: String,
    pub title: String,
    pub severity: Severity,
    pub category: Category,
    pub recommendation: String,
    pub reference: Option<String>,
}

/// Finding count per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeverityTally {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityTally {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut tally = Self::default();
        for f in findings {
            *tally.slot(f.severity) += 1;
        }
        tally
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    fn slot(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        }
    }
}

/// Result of one assessment run: findings in canonical order plus the
/// subscription header and a severity tally that always matches the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingCollection {
    pub subscription: Option<String>,
    pub subscription_id: Option<String>,
    /// Snapshot capture time, copied from the input.
    pub assessment_date: Option<String>,
    /// When the findings were generated.
    pub analysis_date: DateTime<Utc>,
    total_findings: usize,
    findings_by_severity: SeverityTally,
    findings: Vec<Finding>,
}

/// Subscription header carried from a snapshot into its findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionHeader {
    pub subscription: Option<String>,
    pub subscription_id: Option<String>,
    pub assessment_date: Option<String>,
    pub analysis_date: DateTime<Utc>,
}

impl FindingCollection {
    /// Build a collection; the tally is derived from `findings`.
    pub fn new(header: CollectionHeader, findings: Vec<Finding>) -> Self {
        Self {
            subscription: header.subscription,
            subscription_id: header.subscription_id,
            assessment_date: header.assessment_date,
            analysis_date: header.analysis_date,
            total_findings: findings.len(),
            findings_by_severity: SeverityTally::from_findings(&findings),
            findings,
        }
    }

    pub fn header(&self) -> CollectionHeader {
        CollectionHeader {
            subscription: self.subscription.clone(),
            subscription_id: self.subscription_id.clone(),
            assessment_date: self.assessment_date.clone(),
            analysis_date: self.analysis_date,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn tally(&self) -> SeverityTally {
        self.findings_by_severity
    }

    pub fn total_findings(&self) -> usize {
        self.total_findings
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Findings with exactly this severity, in canonical order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Findings grouped by app service name. Groups are keyed by name and
    /// keep canonical order inside.
    pub fn by_app_service(&self) -> BTreeMap<&str, Vec<&Finding>> {
        let mut groups: BTreeMap<&str, Vec<&Finding>> = BTreeMap::new();
        for f in &self.findings {
            groups.entry(f.app_service.as_str()).or_default().push(f);
        }
        groups
    }

    /// Findings grouped by category, keyed in category order.
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&Finding>> {
        let mut groups: BTreeMap<Category, Vec<&Finding>> = BTreeMap::new();
        for f in &self.findings {
            groups.entry(f.category).or_default().push(f);
        }
        groups
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved findings document and check that its stored counts
    /// agree with its finding list.
    pub fn from_json(content: &str) -> Result<Self> {
        let collection: Self = serde_json::from_str(content)?;
        collection.verify()?;
        Ok(collection)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn verify(&self) -> Result<()> {
        let actual = self.findings.len();
        if self.total_findings != actual {
            return Err(AssessError::TallyMismatch {
                field: "totalFindings".into(),
                declared: self.total_findings,
                actual,
            });
        }
        let recomputed = SeverityTally::from_findings(&self.findings);
        for severity in Severity::ALL {
            let declared = self.findings_by_severity.get(severity);
            let actual = recomputed.get(severity);
            if declared != actual {
                return Err(AssessError::TallyMismatch {
                    field: format!("findingsBySeverity.{}", severity),
                    declared,
                    actual,
                });
            }
        }
        Ok(())
    }
}
