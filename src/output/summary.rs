use std::fmt::Write;

use super::group_by_title;
use crate::rules::{FindingCollection, Severity};

/// Render the executive summary Markdown document. `app_count` is the
/// number of app services in the assessed snapshot.
pub fn render(collection: &FindingCollection, app_count: usize) -> String {
    let tally = collection.tally();
    let total = collection.total_findings();
    let mut out = String::new();

    let _ = write!(
        out,
        "# Azure App Service Assessment - Executive Summary\n\n\
         **Subscription:** {subscription}  \n\
         **Assessment Date:** {date}  \n\
         **App Services Assessed:** {app_count}  \n\
         **Total Findings:** {total}\n\n\
         ---\n\n\
         ## Executive Overview\n\n\
         This assessment evaluated **{app_count} Azure App Services** against Microsoft best \
         practices across Security, Performance, Reliability, and Monitoring dimensions.\n\n\
         ### Key Statistics\n\n\
         | Severity | Count | Percentage |\n\
         |----------|-------|------------|\n",
        subscription = collection.subscription.as_deref().unwrap_or("N/A"),
        date = collection.assessment_date.as_deref().unwrap_or("N/A"),
    );
    for severity in Severity::ALL {
        let count = tally.get(severity);
        let _ = writeln!(
            out,
            "| {} **{}** | {} | {:.1}% |",
            marker(severity),
            severity,
            count,
            percentage(count, total)
        );
    }

    out.push_str("\n---\n\n## Critical Findings (Immediate Action Required)\n\n");
    let critical = group_by_title(collection.with_severity(Severity::Critical));
    if critical.is_empty() {
        out.push_str("✅ No critical findings!\n\n");
    }
    for (title, findings) in &critical {
        let example = findings[0];
        let _ = write!(
            out,
            "### {} {}\n\n**Affected Services:** {} of {}\n\n**Issue:** {}\n\n\
             **Recommendation:** {}\n\n**Priority:** IMMEDIATE (24-48 hours)\n\n",
            marker(Severity::Critical),
            title,
            findings.len(),
            app_count,
            example.description,
            example.recommendation,
        );
    }

    out.push_str("---\n\n## High Priority Findings\n\n");
    let high = group_by_title(collection.with_severity(Severity::High));
    if high.is_empty() {
        out.push_str("✅ No high-priority findings!\n\n");
    }
    for (title, findings) in &high {
        let _ = write!(
            out,
            "### {} {}\n\n**Affected Services:** {} of {}\n\n**Issue:** {}\n\n\
             **Priority:** HIGH (Within 1 week)\n\n",
            marker(Severity::High),
            title,
            findings.len(),
            app_count,
            findings[0].description,
        );
    }

    out.push_str(ACTION_PLAN);
    out
}

const ACTION_PLAN: &str = "---

## Recommended Action Plan

### Phase 1: Immediate (This Week)
- Fix all Critical findings
- Cost: $0
- Effort: 30-60 minutes

### Phase 2: High Priority (Within 2 Weeks)
- Fix all High findings
- Cost: $0
- Effort: 1-2 hours

### Phase 3: Medium Priority (Within 30 Days)
- Address security hardening
- Enable monitoring and logging
- Cost: $0-100/month

---

## Next Steps

1. Review the complete HTML report for all findings
2. Share REMEDIATION-GUIDE.md with DevOps team
3. Schedule remediation work
4. Re-assess after fixes to measure improvement
";

fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🔵",
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
