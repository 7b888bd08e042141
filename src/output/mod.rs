pub mod html;
pub mod json;
pub mod remediation;
pub mod summary;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::{Finding, FindingCollection};

/// Output format selection for `report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "html" => Some(Self::Html),
            "text" | "txt" | "console" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension for reports written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Render a findings collection into the specified format.
pub fn render(collection: &FindingCollection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(html::render(collection)),
        OutputFormat::Text => Ok(text::render(collection)),
        OutputFormat::Json => json::render(collection),
    }
}

/// Group findings by title, keeping first-seen order of titles and of
/// findings within a group.
pub(crate) fn group_by_title<'a>(
    findings: impl IntoIterator<Item = &'a Finding>,
) -> Vec<(&'a str, Vec<&'a Finding>)> {
    let mut groups: Vec<(&str, Vec<&Finding>)> = Vec::new();
    for f in findings {
        match groups.iter_mut().find(|(title, _)| *title == f.title) {
            Some((_, group)) => group.push(f),
            None => groups.push((f.title.as_str(), vec![f])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Category, Severity};

    fn titled(title: &str, app: &str) -> Finding {
        Finding {
            rule_id: "APPSVC-000".into(),
            app_service: app.into(),
            category: Category::Security,
            severity: Severity::High,
            title: title.into(),
            description: String::new(),
            recommendation: String::new(),
            reference: None,
        }
    }

    #[test]
    fn parses_format_names() {
        assert_eq!(OutputFormat::from_str_lenient("HTML"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::from_str_lenient("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str_lenient("sarif"), None);
    }

    #[test]
    fn title_groups_keep_first_seen_order() {
        let findings = vec![titled("B", "x"), titled("A", "x"), titled("B", "y")];
        let groups = group_by_title(&findings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "B");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].app_service, "y");
        assert_eq!(groups[1].0, "A");
    }
}
