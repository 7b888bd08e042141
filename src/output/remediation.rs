use std::fmt::Write;

use super::group_by_title;
use crate::rules::{rule_by_id, Finding, FindingCollection, Severity};
use crate::snapshot::Snapshot;

const UNKNOWN_GROUP: &str = "<resource-group>";

/// Render the remediation guide: per-app commands for every Critical and
/// High finding group, then all findings per app service.
///
/// Resource groups are resolved from `snapshot`; apps missing from it get a
/// `<resource-group>` placeholder.
pub fn render(collection: &FindingCollection, snapshot: &Snapshot) -> String {
    let resource_group = |app: &str| snapshot.resource_group_of(app).unwrap_or(UNKNOWN_GROUP);
    let mut out = String::from(PREAMBLE);

    for (severity, heading) in [
        (Severity::Critical, "### Fix All Critical Issues\n\n"),
        (Severity::High, "### Fix All High Priority Issues\n\n"),
    ] {
        out.push_str(heading);
        for (title, findings) in group_by_title(collection.with_severity(severity)) {
            let example = findings[0];
            let _ = write!(
                out,
                "#### {}\n\n**Affected:** {} service(s)\n\n{}\n\n**Apply to all affected services:**\n\n```bash\n",
                title,
                findings.len(),
                example.recommendation,
            );
            for f in &findings {
                if let Some(cmd) = command_for(f, resource_group(&f.app_service)) {
                    out.push_str(&cmd);
                    out.push('\n');
                }
            }
            out.push_str("```\n\n");
        }
    }

    out.push_str(
        "---\n\n## Service-Specific Remediation\n\n\
         Below are all findings organized by App Service for systematic remediation.\n\n",
    );
    for (app, mut findings) in collection.by_app_service() {
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));
        let _ = write!(
            out,
            "### {}\n\n**Resource Group:** `{}`  \n**Findings:** {}  \n\n",
            app,
            resource_group(app),
            findings.len(),
        );
        for (i, f) in findings.iter().enumerate() {
            let _ = write!(
                out,
                "#### {}. {} ({})\n\n**Issue:** {}\n\n**Fix:** {}\n\n",
                i + 1,
                f.title,
                f.severity,
                f.description,
                f.recommendation,
            );
            if let Some(reference) = &f.reference {
                let _ = write!(out, "**Reference:** {}\n\n", reference);
            }
        }
        out.push_str("---\n\n");
    }

    out.push_str(VERIFICATION);
    out
}

fn command_for(finding: &Finding, resource_group: &str) -> Option<String> {
    rule_by_id(&finding.rule_id)?.remediation_command(resource_group, &finding.app_service)
}

const PREAMBLE: &str = "# Azure App Service Remediation Guide

This guide provides exact commands to fix each finding category.

**Before you begin:**
- Ensure you have Contributor access to the subscription
- Test changes in non-production first if possible
- Have a rollback plan
- Notify stakeholders of changes

---

## Quick Fixes (Zero Cost, Minimal Risk)

";

const VERIFICATION: &str = "## Verification

After applying fixes, verify changes:

```bash
# Check TLS version
az webapp config show --resource-group <rg> --name <app> --query minTlsVersion

# Check HTTPS-only
az webapp show --resource-group <rg> --name <app> --query httpsOnly

# Check logging
az webapp log config show --resource-group <rg> --name <app>
```

## Re-Assessment

After remediation, run the assessment again to verify improvements:

```bash
appassess analyze <snapshot.json>
```

Compare the findings count before and after to measure progress.
";
