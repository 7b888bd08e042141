use crate::error::Result;
use crate::rules::FindingCollection;

/// Render the findings document as pretty-printed JSON.
pub fn render(collection: &FindingCollection) -> Result<String> {
    collection.to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CollectionHeader;

    #[test]
    fn empty_collection_renders_zero_counts() {
        let c = FindingCollection::new(CollectionHeader::default(), vec![]);
        let value: serde_json::Value = serde_json::from_str(&render(&c).unwrap()).unwrap();
        assert_eq!(value["totalFindings"], 0);
        assert_eq!(value["findingsBySeverity"]["Low"], 0);
        assert!(value["findings"].as_array().unwrap().is_empty());
    }
}
