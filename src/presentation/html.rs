//! HTML markup for skill tags and recommendation cards.
//!
//! Mirrors the structure and class names of the web front end so exported
//! pages pick up the same stylesheet. Every interpolated value is escaped.

use crate::application::ResultsView;
use crate::domain::{animation_delay_secs, CardView, SkillSet};
use std::fmt::Write;

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn skill_tags(skills: &SkillSet) -> String {
    let mut html = String::new();
    for skill in skills.iter() {
        let skill = escape_html(skill);
        let _ = write!(
            html,
            r#"<div class="skill-tag fade-in-up"><span>{skill}</span><button type="button" class="remove-skill" data-skill="{skill}">&times;</button></div>"#
        );
    }
    html
}

pub fn recommendation_card(card: &CardView) -> String {
    let skills: String = card
        .skills_required
        .iter()
        .map(|s| format!(r#"<span class="skill-chip">{}</span>"#, escape_html(s)))
        .collect();

    format!(
        r#"<div class="recommendation-card" style="animation-delay: {delay}s">
    <div class="card-header">
        <div>
            <h3 class="card-title">{title}</h3>
            <p class="card-company">{company}</p>
        </div>
        <div class="card-match">{score}% Match</div>
    </div>
    <div class="card-details">
        <div class="card-detail"><i class="fas fa-industry"></i><span>{sector}</span></div>
        <div class="card-detail"><i class="fas fa-map-marker-alt"></i><span>{location}</span></div>
        <div class="card-detail"><i class="fas fa-clock"></i><span>{duration}</span></div>
        <div class="card-detail"><i class="fas fa-rupee-sign"></i><span>{stipend}</span></div>
    </div>
    <div class="card-description">{description}</div>
    <div class="card-skills">
        <h4>Skills Required:</h4>
        <div class="skill-chips">{skills}</div>
    </div>
    <div class="card-footer">
        <div class="card-rating">
            <span class="rating-stars">{stars}</span>
            <span>{rating}</span>
        </div>
        <div class="card-opportunities">{opportunities}</div>
    </div>
</div>
"#,
        delay = animation_delay_secs(card.index),
        title = escape_html(&card.title),
        company = escape_html(&card.company),
        score = card.match_percentage,
        sector = escape_html(&card.sector),
        location = escape_html(&card.location),
        duration = escape_html(&card.duration),
        stipend = escape_html(&card.stipend),
        description = escape_html(&card.description),
        stars = card.stars,
        rating = escape_html(&card.rating_label),
        opportunities = escape_html(&card.opportunities_label),
    )
}

pub fn recommendation_cards(cards: &[CardView]) -> String {
    cards.iter().map(recommendation_card).collect()
}

/// A standalone page with the submitted skills, the subtitle and every card.
pub fn results_document(results: &ResultsView, skills: &SkillSet) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Internship Recommendations</title>
<link rel="stylesheet" href="static/css/style.css">
</head>
<body>
<div id="skillTags">{tags}</div>
<section id="resultsSection">
<p id="resultsSubtitle">{subtitle}</p>
<div id="recommendationCards">
{cards}</div>
</section>
</body>
</html>
"#,
        tags = skill_tags(skills),
        subtitle = escape_html(&results.subtitle),
        cards = recommendation_cards(&results.cards),
    )
}
