use crate::rules::{Finding, FindingCollection, Severity, SeverityTally};

const RULE: usize = 80;

/// Render a plain-text digest: header, tally, per-app and per-category
/// counts, then details of the Critical and High findings.
pub fn render(collection: &FindingCollection) -> String {
    let heavy = "=".repeat(RULE);
    let light = "-".repeat(RULE);
    let tally = collection.tally();
    let mut out = Vec::new();

    out.push(heavy.clone());
    out.push("AZURE APP SERVICE ASSESSMENT - EXECUTIVE SUMMARY".to_string());
    out.push(heavy.clone());
    out.push(String::new());
    out.push(format!("Subscription: {}", or_na(&collection.subscription)));
    out.push(format!(
        "Subscription ID: {}",
        or_na(&collection.subscription_id)
    ));
    out.push(format!(
        "Assessment Date: {}",
        or_na(&collection.assessment_date)
    ));
    out.push(String::new());
    out.push("FINDINGS SUMMARY BY SEVERITY".to_string());
    out.push(light.clone());
    out.push(format!("  Critical: {}", tally.critical));
    out.push(format!("  High:     {}", tally.high));
    out.push(format!("  Medium:   {}", tally.medium));
    out.push(format!("  Low:      {}", tally.low));
    out.push(format!("  TOTAL:    {}", collection.total_findings()));
    out.push(String::new());

    out.push("FINDINGS BY APP SERVICE".to_string());
    out.push(light.clone());
    for (app, findings) in collection.by_app_service() {
        push_group(&mut out, app, &findings);
    }
    out.push(String::new());
    out.push(String::new());

    let mut categories: Vec<_> = collection.by_category().into_iter().collect();
    categories.sort_by_key(|(c, _)| c.as_str());
    out.push("FINDINGS BY CATEGORY".to_string());
    out.push(light);
    for (category, findings) in categories {
        push_group(&mut out, category.as_str(), &findings);
    }
    out.push(String::new());
    out.push(String::new());

    push_details(
        &mut out,
        collection,
        Severity::Critical,
        "CRITICAL FINDINGS (Immediate Action Required)",
    );
    out.push(String::new());
    out.push(String::new());
    push_details(&mut out, collection, Severity::High, "HIGH PRIORITY FINDINGS");

    out.push(String::new());
    out.push(heavy.clone());
    out.push("For complete details, see the HTML report.".to_string());
    out.push(heavy);

    out.join("\n")
}

fn push_group(out: &mut Vec<String>, label: &str, findings: &[&Finding]) {
    let counts = SeverityTally::from_findings(findings.iter().copied());
    out.push(format!("\n{}", label));
    out.push(format!(
        "  Critical: {}, High: {}, Medium: {}, Low: {}",
        counts.critical, counts.high, counts.medium, counts.low
    ));
    out.push(format!("  Total: {} findings", counts.total()));
}

fn push_details(
    out: &mut Vec<String>,
    collection: &FindingCollection,
    severity: Severity,
    heading: &str,
) {
    let mut findings = collection.with_severity(severity).peekable();
    if findings.peek().is_none() {
        return;
    }
    out.push(heading.to_string());
    out.push("=".repeat(RULE));
    for f in findings {
        out.push(format!("\n[{}] {}", f.app_service, f.title));
        out.push(format!("  Category: {}", f.category));
        out.push(format!("  Issue: {}", f.description));
        out.push(format!("  Action: {}", f.recommendation));
        if let Some(reference) = &f.reference {
            out.push(format!("  Ref: {}", reference));
        }
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}
