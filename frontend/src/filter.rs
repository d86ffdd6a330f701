use crate::models::Conversation;

/// Keeps the conversations whose title or summary contains `query`,
/// ignoring case. Missing fields count as empty text; an empty query keeps
/// everything. Order is preserved.
pub fn filter_conversations(conversations: &[Conversation], query: &str) -> Vec<Conversation> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return conversations.to_vec();
    }

    conversations
        .iter()
        .filter(|conv| contains(conv.title.as_deref(), &needle) || contains(conv.summary.as_deref(), &needle))
        .cloned()
        .collect()
}

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|text| text.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(id: &str, title: Option<&str>, summary: Option<&str>) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: title.map(str::to_string),
            summary: summary.map(str::to_string),
            started_at: None,
            messages: Vec::new(),
        }
    }

    fn ids(list: &[Conversation]) -> Vec<&str> {
        list.iter().map(|c| c.id.as_str()).collect()
    }

    fn sample() -> Vec<Conversation> {
        vec![
            conv("1", Some("Trip to Lisbon"), Some("Flights and hotels")),
            conv("2", Some("Rust lifetimes"), None),
            conv("3", None, Some("Discussed a TRIP budget")),
            conv("4", None, None),
        ]
    }

    #[test]
    fn empty_query_keeps_everything() {
        assert_eq!(ids(&filter_conversations(&sample(), "")), vec!["1", "2", "3", "4"]);
        assert_eq!(ids(&filter_conversations(&sample(), "   ")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn matches_title_or_summary_case_insensitively() {
        assert_eq!(ids(&filter_conversations(&sample(), "trip")), vec!["1", "3"]);
        assert_eq!(ids(&filter_conversations(&sample(), "HOTELS")), vec!["1"]);
        assert_eq!(ids(&filter_conversations(&sample(), "lifetimes")), vec!["2"]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(ids(&filter_conversations(&sample(), "  rust ")), vec!["2"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter_conversations(&sample(), "kubernetes").is_empty());
    }
}
