pub mod builtin;
pub mod finding;
pub mod policy;

use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::snapshot::{ResourceRecord, Snapshot};

pub use finding::{
    Category, CollectionHeader, Finding, FindingCollection, RuleMetadata, Severity, SeverityTally,
};

/// Predicate of a rule: the finding description when the rule fires.
pub type Check = fn(&ResourceRecord) -> Option<Cow<'static, str>>;

/// One entry of the rule catalog.
///
/// Everything but the description is fixed per rule; the check decides
/// whether the rule fires and says what it observed.
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub recommendation: &'static str,
    pub reference: Option<&'static str>,
    /// Remediation command with `{rg}` and `{app}` placeholders.
    pub command: Option<&'static str>,
    pub check: Check,
}

impl Rule {
    /// Apply the rule to one resource.
    pub fn evaluate(&self, resource: &ResourceRecord) -> Option<Finding> {
        let description = (self.check)(resource)?;
        Some(Finding {
            rule_id: self.id.into(),
            app_service: resource.name.clone(),
            category: self.category,
            severity: self.severity,
            title: self.title.into(),
            description: description.into_owned(),
            recommendation: self.recommendation.into(),
            reference: self.reference.map(Into::into),
        })
    }

    pub fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: self.id.into(),
            name: self.name.into(),
            title: self.title.into(),
            severity: self.severity,
            category: self.category,
            recommendation: self.recommendation.into(),
            reference: self.reference.map(Into::into),
        }
    }

    /// The remediation command for one app service, if the rule has one.
    pub fn remediation_command(&self, resource_group: &str, app: &str) -> Option<String> {
        self.command
            .map(|template| template.replace("{rg}", resource_group).replace("{app}", app))
    }
}

static RULE_INDEX: Lazy<HashMap<&'static str, &'static Rule>> =
    Lazy::new(|| builtin::CATALOG.iter().map(|r| (r.id, r)).collect());

/// Look up a catalog rule by id.
pub fn rule_by_id(id: &str) -> Option<&'static Rule> {
    RULE_INDEX.get(id).copied()
}

/// The rule engine runs the catalog against every resource of a snapshot.
pub struct RuleEngine {
    rules: &'static [Rule],
}

impl RuleEngine {
    /// Create a new engine over the full built-in catalog.
    pub fn new() -> Self {
        Self {
            rules: &builtin::CATALOG,
        }
    }

    /// Create an engine over a subset of rules, kept in the given order.
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// Run every rule against one resource, in catalog order.
    pub fn run(&self, resource: &ResourceRecord) -> Vec<Finding> {
        self.rules.iter().filter_map(|r| r.evaluate(resource)).collect()
    }

    /// Evaluate a snapshot, stamping the result with the current time.
    pub fn evaluate(&self, snapshot: &Snapshot) -> FindingCollection {
        self.evaluate_at(snapshot, Utc::now())
    }

    /// Evaluate a snapshot with a caller-supplied generation time.
    ///
    /// Findings come out in resource order, then catalog order.
    pub fn evaluate_at(&self, snapshot: &Snapshot, generated_at: DateTime<Utc>) -> FindingCollection {
        let mut findings = Vec::new();
        for resource in &snapshot.resources {
            let found = self.run(resource);
            tracing::debug!(
                app_service = %resource.name,
                findings = found.len(),
                "evaluated app service"
            );
            findings.extend(found);
        }

        let header = CollectionHeader {
            subscription: snapshot.subscription.clone(),
            subscription_id: snapshot.subscription_id.clone(),
            assessment_date: snapshot.assessment_date.clone(),
            analysis_date: generated_at,
        };
        FindingCollection::new(header, findings)
    }

    /// List metadata for all rules of this engine.
    pub fn list_rules(&self) -> Vec<RuleMetadata> {
        self.rules.iter().map(Rule::metadata).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a snapshot against the full catalog.
pub fn evaluate(snapshot: &Snapshot) -> FindingCollection {
    RuleEngine::new().evaluate(snapshot)
}
