//! State of the results section: cards, subtitle and staggered reveal.

use crate::domain::{results_subtitle, CardView, RecommendationItem};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    pub cards: Vec<CardView>,
    pub subtitle: String,
    /// When the current cards were handed over; reveal delays count from here.
    pub shown_at: Option<Instant>,
    /// Index of the first card on screen.
    pub scroll: usize,
    pub visible: bool,
}

impl ResultsView {
    /// Replaces the cards with one per item, in order, and brings the section
    /// into view at its top.
    pub fn display(&mut self, items: &[RecommendationItem]) {
        self.display_at(items, Instant::now());
    }

    pub fn display_at(&mut self, items: &[RecommendationItem], now: Instant) {
        self.cards = items
            .iter()
            .enumerate()
            .map(|(index, item)| CardView::from_item(index, item))
            .collect();
        self.subtitle = results_subtitle(self.cards.len());
        self.shown_at = Some(now);
        self.scroll = 0;
        self.visible = true;
    }

    /// Number of leading cards whose reveal delay has passed at `now`.
    pub fn revealed_count(&self, now: Instant) -> usize {
        let Some(shown_at) = self.shown_at else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(shown_at);
        self.cards
            .iter()
            .take_while(|card| card.reveal_delay <= elapsed)
            .count()
    }

    pub fn is_fully_revealed(&self, now: Instant) -> bool {
        self.revealed_count(now) == self.cards.len()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.cards.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn items(titles: &[&str]) -> Vec<RecommendationItem> {
        titles
            .iter()
            .map(|t| RecommendationItem {
                title: t.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_display_keeps_input_order() {
        let mut view = ResultsView::default();
        view.display(&items(&["First", "Second"]));

        assert!(view.visible);
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].title, "First");
        assert_eq!(view.cards[1].title, "Second");
        assert_eq!(view.subtitle, "We found 2 perfect matches for you!");
    }

    #[test]
    fn test_staggered_reveal() {
        let mut view = ResultsView::default();
        let start = Instant::now();
        view.display_at(&items(&["a", "b", "c"]), start);

        assert_eq!(view.revealed_count(start), 1);
        assert_eq!(view.revealed_count(start + Duration::from_millis(149)), 1);
        assert_eq!(view.revealed_count(start + Duration::from_millis(150)), 2);
        assert_eq!(view.revealed_count(start + Duration::from_millis(300)), 3);
        assert!(view.is_fully_revealed(start + Duration::from_secs(1)));
        assert!(!view.is_fully_revealed(start + Duration::from_millis(299)));
    }

    #[test]
    fn test_nothing_revealed_before_display() {
        let view = ResultsView::default();
        assert_eq!(view.revealed_count(Instant::now()), 0);
    }

    #[test]
    fn test_display_resets_scroll() {
        let mut view = ResultsView::default();
        view.display(&items(&["a", "b", "c"]));
        view.scroll_by(2);
        assert_eq!(view.scroll, 2);

        view.display(&items(&["x"]));
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = ResultsView::default();
        view.display(&items(&["a", "b"]));
        view.scroll_by(10);
        assert_eq!(view.scroll, 1);
        view.scroll_by(-10);
        assert_eq!(view.scroll, 0);
    }
}
