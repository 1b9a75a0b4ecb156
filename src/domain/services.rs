//! Presentation transforms applied to recommendation results.
//!
//! These are pure functions over the data the service returns. The
//! constants reproduce the numbers the web front end has always shown, so
//! cards look the same in every front end.

use super::models::RecommendationItem;
use std::fmt;
use std::time::Duration;

/// Internal match scores are nominally in `0..=15`.
pub const MATCH_SCORE_SCALE: f64 = 15.0;
pub const MIN_DISPLAY_MATCH: u8 = 60;
pub const MAX_DISPLAY_MATCH: u8 = 99;

pub const MAX_STARS: usize = 5;
pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '½';
pub const EMPTY_STAR: char = '☆';

/// Delay between two consecutive cards appearing.
pub const REVEAL_STEP: Duration = Duration::from_millis(150);

/// Maps an internal match score onto the 60-99% band shown on cards.
///
/// This is cosmetic and not a probability.
///
/// # Examples
///
/// ```
/// use internmatch::domain::calculate_display_score;
///
/// assert_eq!(calculate_display_score(0.0), 60);
/// assert_eq!(calculate_display_score(12.0), 80);
/// assert_eq!(calculate_display_score(15.0), 99);
/// ```
pub fn calculate_display_score(score: f64) -> u8 {
    let percentage = ((score / MATCH_SCORE_SCALE) * 100.0).round();
    // f64::max discards NaN, so a NaN score lands on the lower bound
    percentage
        .max(f64::from(MIN_DISPLAY_MATCH))
        .min(f64::from(MAX_DISPLAY_MATCH)) as u8
}

/// Five star positions split into full, half and empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: usize,
    pub half: usize,
    pub empty: usize,
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.full {
            write!(f, "{FULL_STAR}")?;
        }
        for _ in 0..self.half {
            write!(f, "{HALF_STAR}")?;
        }
        for _ in 0..self.empty {
            write!(f, "{EMPTY_STAR}")?;
        }
        Ok(())
    }
}

/// Builds the star row for a rating in `[0, 5]`.
///
/// A fractional part of 0.5 or more adds one half star; anything less is
/// dropped, so 4.7 shows as four and a half.
pub fn generate_stars(rating: f64) -> StarRating {
    let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, MAX_STARS as f64) };
    let full = rating.floor() as usize;
    let half = usize::from(rating % 1.0 >= 0.5);
    StarRating {
        full,
        half,
        empty: MAX_STARS - full - half,
    }
}

pub fn results_subtitle(count: usize) -> String {
    format!("We found {} perfect matches for you!", count)
}

/// How long after the results appear the card at `index` is revealed.
pub fn reveal_delay(index: usize) -> Duration {
    REVEAL_STEP * index as u32
}

/// CSS `animation-delay` in seconds for the card at `index`.
pub fn animation_delay_secs(index: usize) -> f64 {
    index as f64 / 10.0
}

/// Formats a JSON number the way a browser would print it.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Everything a front end needs to draw one recommendation card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub index: usize,
    pub title: String,
    pub company: String,
    pub sector: String,
    pub location: String,
    pub duration: String,
    pub stipend: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub match_percentage: u8,
    pub stars: StarRating,
    pub rating_label: String,
    pub opportunities_label: String,
    pub reveal_delay: Duration,
}

impl CardView {
    pub fn from_item(index: usize, item: &RecommendationItem) -> Self {
        Self {
            index,
            title: item.title.clone(),
            company: item.company.clone(),
            sector: item.sector.clone(),
            location: item.location.clone(),
            duration: item.duration.clone(),
            stipend: item.stipend.clone(),
            description: item.description.clone(),
            skills_required: item.skills_required.clone(),
            match_percentage: calculate_display_score(item.match_score),
            stars: generate_stars(item.rating),
            rating_label: format!("{}/5", format_number(item.rating)),
            opportunities_label: format!("{} positions", format_number(item.opportunities)),
            reveal_delay: reveal_delay(index),
        }
    }
}
