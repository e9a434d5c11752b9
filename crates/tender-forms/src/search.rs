//! Incremental client-side search over rendered items
//!
//! Filtering is visual only: non-matching items are dimmed, never removed or
//! reordered, so counts stay correct and the next query starts from the full
//! set. A blank query is a separate fast path that restores everything and
//! hides the summary panel without running the match predicate.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tender_validation::contains_ignore_case;
use tracing::debug;

use crate::debounce::Debouncer;

/// Default quiet period before a query is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Rendering hint for an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub opacity: f32,
    pub scale: f32,
}

impl Emphasis {
    pub const FULL: Emphasis = Emphasis {
        opacity: 1.0,
        scale: 1.0,
    };
    pub const DIMMED: Emphasis = Emphasis {
        opacity: 0.3,
        scale: 0.95,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Dimmed,
}

impl Visibility {
    pub fn emphasis(&self) -> Emphasis {
        match self {
            Visibility::Visible => Emphasis::FULL,
            Visibility::Dimmed => Emphasis::DIMMED,
        }
    }
}

/// One card in the result grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableItem {
    pub text: String,
    #[serde(default)]
    visibility: Visibility,
}

impl SearchableItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visibility: Visibility::Visible,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_dimmed(&self) -> bool {
        self.visibility == Visibility::Dimmed
    }
}

/// Derived "showing N of M" figures for a non-blank query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultSummary {
    pub query: String,
    pub visible_count: usize,
    pub total_count: usize,
}

impl SearchResultSummary {
    pub fn message(&self) -> String {
        format!(
            "Showing {} of {} items for \"{}\"",
            self.visible_count, self.total_count, self.query
        )
    }
}

/// Results panel shown above the grid
///
/// Created on the first non-blank query and reused afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPanel {
    summary: Option<SearchResultSummary>,
}

impl SummaryPanel {
    pub fn is_visible(&self) -> bool {
        self.summary.is_some()
    }

    pub fn summary(&self) -> Option<&SearchResultSummary> {
        self.summary.as_ref()
    }

    fn show(&mut self, summary: SearchResultSummary) {
        self.summary = Some(summary);
    }

    fn hide(&mut self) {
        self.summary = None;
    }
}

/// The searchable container: its items plus the lazily created panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollection {
    items: Vec<SearchableItem>,
    panel: Option<SummaryPanel>,
}

impl ItemCollection {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: texts.into_iter().map(SearchableItem::new).collect(),
            panel: None,
        }
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn panel(&self) -> Option<&SummaryPanel> {
        self.panel.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items not currently dimmed
    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|i| !i.is_dimmed()).count()
    }

    /// Restore every item and hide the panel, if one was ever created
    fn clear(&mut self) {
        for item in &mut self.items {
            item.visibility = Visibility::Visible;
        }
        if let Some(panel) = self.panel.as_mut() {
            panel.hide();
        }
    }

    fn apply(&mut self, query: &str) -> SearchResultSummary {
        for item in &mut self.items {
            item.visibility = if contains_ignore_case(&item.text, query) {
                Visibility::Visible
            } else {
                Visibility::Dimmed
            };
        }
        let summary = SearchResultSummary {
            query: query.to_string(),
            visible_count: self.visible_count(),
            total_count: self.items.len(),
        };
        self.panel
            .get_or_insert_with(SummaryPanel::default)
            .show(summary.clone());
        summary
    }
}

/// What one evaluation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchOutcome {
    /// No searchable container on the page
    NoContainer,
    /// Blank query; everything restored
    Cleared,
    /// Query applied
    Filtered(SearchResultSummary),
}

/// Apply a settled query to a container
///
/// A missing container is a no-op rather than an error.
pub fn evaluate(query: &str, container: Option<&mut ItemCollection>) -> SearchOutcome {
    let Some(container) = container else {
        return SearchOutcome::NoContainer;
    };

    if query.trim().is_empty() {
        container.clear();
        debug!(total = container.len(), "search cleared");
        return SearchOutcome::Cleared;
    }

    let summary = container.apply(query);
    debug!(
        query = %summary.query,
        visible = summary.visible_count,
        total = summary.total_count,
        "search applied"
    );
    SearchOutcome::Filtered(summary)
}

/// A search input wired to a debouncer
#[derive(Debug, Clone)]
pub struct SearchBox {
    debouncer: Debouncer<String>,
    evaluations: usize,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchBox {
    pub fn new(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            evaluations: 0,
        }
    }

    /// Keystroke: supersede any pending query
    pub fn on_input(&mut self, query: impl Into<String>, now: Duration) {
        self.debouncer.schedule(query.into(), now);
    }

    /// When the pending query becomes due
    pub fn deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Evaluate the pending query if it has settled
    pub fn poll(
        &mut self,
        now: Duration,
        container: Option<&mut ItemCollection>,
    ) -> Option<SearchOutcome> {
        let query = self.debouncer.poll(now)?;
        self.evaluations += 1;
        Some(evaluate(&query, container))
    }

    /// How many evaluations have run so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> ItemCollection {
        ItemCollection::new(["Road Construction", "Bridge Repair", "Road Maintenance"])
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn dimmed(items: &ItemCollection) -> Vec<&str> {
        items
            .items()
            .iter()
            .filter(|i| i.is_dimmed())
            .map(|i| i.text.as_str())
            .collect()
    }

    #[test]
    fn test_filter_dims_non_matches() {
        let mut items = grid();
        let outcome = evaluate("road", Some(&mut items));
        assert_eq!(
            outcome,
            SearchOutcome::Filtered(SearchResultSummary {
                query: "road".to_string(),
                visible_count: 2,
                total_count: 3,
            })
        );
        assert_eq!(dimmed(&items), vec!["Bridge Repair"]);
        assert_eq!(items.items()[1].visibility().emphasis(), Emphasis::DIMMED);
        assert_eq!(items.items()[0].visibility().emphasis(), Emphasis::FULL);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_filter_keeps_order() {
        let mut items = grid();
        evaluate("MAINT", Some(&mut items));
        let texts: Vec<_> = items.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Road Construction", "Bridge Repair", "Road Maintenance"]);
        assert_eq!(items.visible_count(), 1);
    }

    #[test]
    fn test_match_ignores_case_but_summary_keeps_query() {
        let mut items = grid();
        let outcome = evaluate("rOaD c", Some(&mut items));
        assert_eq!(dimmed(&items), vec!["Bridge Repair", "Road Maintenance"]);
        match outcome {
            SearchOutcome::Filtered(summary) => {
                assert_eq!(summary.message(), "Showing 1 of 3 items for \"rOaD c\"")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_clearing_restores_everything_and_hides_panel() {
        let mut items = grid();
        evaluate("bridge", Some(&mut items));
        assert!(items.panel().unwrap().is_visible());
        assert_eq!(
            items.panel().unwrap().summary().unwrap().message(),
            "Showing 1 of 3 items for \"bridge\""
        );

        assert_eq!(evaluate("   ", Some(&mut items)), SearchOutcome::Cleared);
        assert_eq!(items.visible_count(), 3);
        assert!(dimmed(&items).is_empty());
        assert!(!items.panel().unwrap().is_visible());
    }

    #[test]
    fn test_blank_query_never_creates_panel() {
        let mut items = grid();
        evaluate("", Some(&mut items));
        assert!(items.panel().is_none());
    }

    #[test]
    fn test_missing_container_is_noop() {
        assert_eq!(evaluate("road", None), SearchOutcome::NoContainer);
    }

    #[test]
    fn test_no_matches() {
        let mut items = grid();
        let outcome = evaluate("tunnel", Some(&mut items));
        match outcome {
            SearchOutcome::Filtered(summary) => assert_eq!(summary.visible_count, 0),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_search_box_debounces_keystrokes() {
        let mut items = grid();
        let mut search = SearchBox::default();
        search.on_input("b", ms(0));
        search.on_input("br", ms(50));
        search.on_input("road", ms(100));

        assert_eq!(search.poll(ms(350), Some(&mut items)), None);
        let outcome = search.poll(ms(400), Some(&mut items));
        assert!(matches!(
            outcome,
            Some(SearchOutcome::Filtered(ref s)) if s.query == "road" && s.visible_count == 2
        ));
        assert_eq!(search.poll(ms(2000), Some(&mut items)), None);
        assert_eq!(search.evaluations(), 1);
    }
}
