use chrono::{DateTime, NaiveDateTime, Utc};

use crate::rules::{Finding, FindingCollection, Severity};

const DATE_FORMAT: &str = "%B %d, %Y %H:%M UTC";

/// Render findings as a self-contained HTML report.
pub fn render(collection: &FindingCollection) -> String {
    let tally = collection.tally();
    let assessment_date = collection
        .assessment_date
        .as_deref()
        .map(format_assessment_date)
        .unwrap_or_else(|| "N/A".into());
    let report_date = collection.analysis_date.format(DATE_FORMAT).to_string();

    let content = if collection.is_empty() {
        "<div class=\"no-findings\"><h3>✅ No issues found! All App Services follow best practices.</h3></div>"
            .to_string()
    } else {
        format!(
            "{}{}{}{}",
            TOC,
            by_severity(collection),
            by_app_service(collection),
            by_category(collection)
        )
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Azure App Service Assessment Report</title>
<style>
  :root {{
    --accent: #0078d4; --fg: #333; --muted: #666; --border: #e1e1e1;
    --crit: #dc3545; --high: #fd7e14; --med: #ffc107; --low: #17a2b8; --total: #6c757d;
  }}
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    line-height: 1.6; color: var(--fg); background: #f5f5f5; padding: 20px; }}
  .container {{ max-width: 1200px; margin: 0 auto; background: #fff; padding: 40px;
    border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
  header {{ border-bottom: 3px solid var(--accent); padding-bottom: 20px; margin-bottom: 30px; }}
  h1 {{ color: var(--accent); font-size: 2.5em; margin-bottom: 10px; }}
  h2 {{ color: var(--accent); font-size: 1.8em; margin: 30px 0 15px; padding-bottom: 10px;
    border-bottom: 2px solid var(--border); }}
  h3 {{ font-size: 1.3em; margin: 20px 0 10px; }}
  .meta-info {{ background: #f8f9fa; padding: 15px; border-radius: 4px; }}
  .meta-info p {{ margin: 5px 0; color: var(--muted); }}
  .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 20px; margin: 30px 0; }}
  .summary-card {{ padding: 20px; border-radius: 8px; text-align: center; color: #fff; }}
  .summary-card h3 {{ color: #fff; font-size: 2.5em; margin: 10px 0; }}
  .summary-card.critical {{ background: var(--crit); }}
  .summary-card.high {{ background: var(--high); }}
  .summary-card.medium {{ background: var(--med); }}
  .summary-card.low {{ background: var(--low); }}
  .summary-card.total {{ background: var(--total); }}
  .finding {{ border: 1px solid var(--border); border-left: 4px solid var(--accent);
    border-radius: 6px; padding: 20px; margin-bottom: 20px; background: #fff; }}
  .finding.critical {{ border-left-color: var(--crit); background: #fff5f5; }}
  .finding.high {{ border-left-color: var(--high); background: #fff8f0; }}
  .finding.medium {{ border-left-color: var(--med); background: #fffbf0; }}
  .finding.low {{ border-left-color: var(--low); background: #f0f9fb; }}
  .finding-header {{ display: flex; justify-content: space-between; margin-bottom: 15px; }}
  .finding-title {{ font-size: 1.2em; font-weight: 600; flex: 1; }}
  .severity-badge {{ padding: 5px 12px; border-radius: 20px; font-size: 0.85em; font-weight: 600;
    text-transform: uppercase; margin-left: 10px; color: #fff; }}
  .severity-badge.critical {{ background: var(--crit); }}
  .severity-badge.high {{ background: var(--high); }}
  .severity-badge.medium {{ background: var(--med); color: var(--fg); }}
  .severity-badge.low {{ background: var(--low); }}
  .finding-meta {{ display: flex; gap: 20px; margin-bottom: 15px; font-size: 0.9em; color: var(--muted); }}
  .finding-section h4, .recommendation h4 {{ color: var(--accent); font-size: 0.95em;
    margin-bottom: 8px; text-transform: uppercase; letter-spacing: 0.5px; }}
  .recommendation {{ background: #e7f3ff; border-left: 3px solid var(--accent); padding: 12px;
    margin: 10px 0; border-radius: 4px; }}
  .reference {{ font-size: 0.9em; margin-top: 10px; }}
  .reference a, .toc a, footer a {{ color: var(--accent); text-decoration: none; }}
  .no-findings {{ text-align: center; padding: 40px; background: #e7f3ff; border-radius: 8px;
    color: var(--accent); }}
  .category-section {{ margin-top: 40px; }}
  .app-service-group {{ margin-top: 30px; }}
  .app-service-header {{ background: var(--accent); color: #fff; padding: 15px 20px;
    border-radius: 6px 6px 0 0; font-size: 1.2em; font-weight: 600; }}
  .findings-list {{ border: 1px solid var(--border); border-top: none; border-radius: 0 0 6px 6px;
    padding: 20px; background: #fafafa; }}
  .toc {{ background: #f8f9fa; padding: 20px; border-radius: 6px; margin: 20px 0; }}
  .toc ul {{ list-style: none; padding-left: 20px; }}
  footer {{ margin-top: 40px; padding-top: 20px; border-top: 2px solid var(--border);
    text-align: center; color: var(--muted); font-size: 0.9em; }}
  @media print {{
    body {{ background: #fff; padding: 0; }}
    .container {{ box-shadow: none; padding: 20px; }}
    .finding {{ page-break-inside: avoid; }}
  }}
</style>
</head>
<body>
<div class="container">
  <header>
    <h1>🔍 Azure App Service Assessment Report</h1>
    <div class="meta-info">
      <p><strong>Subscription:</strong> {subscription}</p>
      <p><strong>Subscription ID:</strong> {subscription_id}</p>
      <p><strong>Assessment Date:</strong> {assessment_date}</p>
      <p><strong>Report Generated:</strong> {report_date}</p>
    </div>
  </header>

  <section>
    <h2>Executive Summary</h2>
    <div class="summary">
      <div class="summary-card critical"><p>Critical</p><h3>{critical}</h3></div>
      <div class="summary-card high"><p>High</p><h3>{high}</h3></div>
      <div class="summary-card medium"><p>Medium</p><h3>{medium}</h3></div>
      <div class="summary-card low"><p>Low</p><h3>{low}</h3></div>
      <div class="summary-card total"><p>Total Findings</p><h3>{total}</h3></div>
    </div>
  </section>

  {content}

  <footer>
    <p>This report was generated automatically based on Microsoft Azure best practices.</p>
    <p>For more information, visit <a href="https://learn.microsoft.com/en-us/azure/app-service/">Azure App Service Documentation</a></p>
    <p>Generated by appassess {version} on {report_date}</p>
  </footer>
</div>
</body>
</html>"##,
        subscription = html_escape(collection.subscription.as_deref().unwrap_or("N/A")),
        subscription_id = html_escape(collection.subscription_id.as_deref().unwrap_or("N/A")),
        assessment_date = html_escape(&assessment_date),
        report_date = report_date,
        critical = tally.critical,
        high = tally.high,
        medium = tally.medium,
        low = tally.low,
        total = collection.total_findings(),
        content = content,
        version = env!("CARGO_PKG_VERSION"),
    )
}

const TOC: &str = r##"<div class="toc">
<h3>Table of Contents</h3>
<ul>
<li><a href="#severity">Findings by Severity</a></li>
<li><a href="#appservice">Findings by App Service</a></li>
<li><a href="#category">Findings by Category</a></li>
</ul>
</div>
"##;

fn by_severity(collection: &FindingCollection) -> String {
    let mut html = String::from("<section id=\"severity\">\n<h2>Findings by Severity</h2>\n");
    for severity in Severity::ALL {
        let findings: Vec<&Finding> = collection.with_severity(severity).collect();
        if findings.is_empty() {
            continue;
        }
        html.push_str(&format!(
            "<div class=\"category-section\">\n<h3>{} Severity ({} findings)</h3>\n",
            severity,
            findings.len()
        ));
        for f in findings {
            html.push_str(&finding_card(f));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
    html
}

fn by_app_service(collection: &FindingCollection) -> String {
    let mut apps: Vec<_> = collection.by_app_service().into_iter().collect();
    apps.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut html = String::from("<section id=\"appservice\">\n<h2>Findings by App Service</h2>\n");
    for (app, findings) in apps {
        html.push_str(&format!(
            "<div class=\"app-service-group\">\n<div class=\"app-service-header\">{} ({} findings)</div>\n<div class=\"findings-list\">\n",
            html_escape(app),
            findings.len()
        ));
        for f in most_severe_first(findings) {
            html.push_str(&finding_card(f));
        }
        html.push_str("</div>\n</div>\n");
    }
    html.push_str("</section>\n");
    html
}

fn by_category(collection: &FindingCollection) -> String {
    let mut categories: Vec<_> = collection.by_category().into_iter().collect();
    categories.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut html = String::from("<section id=\"category\">\n<h2>Findings by Category</h2>\n");
    for (category, findings) in categories {
        html.push_str(&format!(
            "<div class=\"category-section\">\n<h3>📋 {} ({} findings)</h3>\n",
            category,
            findings.len()
        ));
        for f in most_severe_first(findings) {
            html.push_str(&finding_card(f));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");
    html
}

fn most_severe_first(mut findings: Vec<&Finding>) -> Vec<&Finding> {
    findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    findings
}

fn finding_card(f: &Finding) -> String {
    let class = severity_class(f.severity);
    let reference = f
        .reference
        .as_deref()
        .map(|r| {
            let r = html_escape(r);
            format!(
                "<div class=\"reference\">\n<strong>Reference:</strong> <a href=\"{r}\" target=\"_blank\">{r}</a>\n</div>\n"
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="finding {class}">
<div class="finding-header">
<div class="finding-title">{title}</div>
<span class="severity-badge {class}">{severity}</span>
</div>
<div class="finding-meta">
<span><strong>App Service:</strong> {app}</span>
<span><strong>Category:</strong> {category}</span>
</div>
<div class="finding-section">
<h4>Description</h4>
<p>{description}</p>
</div>
<div class="recommendation">
<h4>Recommendation</h4>
<p>{recommendation}</p>
</div>
{reference}</div>
"#,
        class = class,
        title = html_escape(&f.title),
        severity = f.severity,
        app = html_escape(&f.app_service),
        category = f.category,
        description = html_escape(&f.description),
        recommendation = html_escape(&f.recommendation),
        reference = reference,
    )
}

/// RFC 3339 or naive ISO timestamps are shown as `January 15, 2026 10:00 UTC`;
/// anything else is shown verbatim.
fn format_assessment_date(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).format(DATE_FORMAT).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive.format(DATE_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

fn severity_class(s: Severity) -> &'static str {
    match s {
        Severity::Critical => "critical",
        Severity::High => "high",
        Severity::Medium => "medium",
        Severity::Low => "low",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
