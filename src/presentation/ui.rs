use crate::application::{App, AppMode, ErrorSurface, Focus, SelectField};
use crate::domain::CardView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

pub fn render_ui(f: &mut Frame, app: &App<ErrorSurface>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(48), Constraint::Min(0)])
        .split(chunks[1]);

    render_form(f, app, body[0]);
    render_results(f, app, body[1]);
    render_status_bar(f, app, chunks[2]);

    if app.submit_control.overlay_visible {
        render_loading_overlay(f);
    }
    if let Some(modal) = app.notifier.modal().filter(|m| m.visible) {
        render_error_modal(f, &modal.message);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

pub fn error_modal_area(area: Rect) -> Rect {
    centered(area, 60, 7)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn focus_style(app: &App<ErrorSurface>, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Color::Black).bg(Color::LightBlue)
    } else {
        Style::default()
    }
}

fn render_header(f: &mut Frame, app: &App<ErrorSurface>, area: Rect) {
    let header = Line::from(vec![
        Span::styled("PM Internship Matcher", Style::default().fg(Color::Cyan)),
        Span::raw(" | Language: "),
        Span::styled(app.language.to_string(), focus_style(app, Focus::Language)),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn select_line<'a>(app: &App<ErrorSurface>, field: &'a SelectField, focus: Focus) -> Line<'a> {
    let shown = if field.value().is_empty() {
        Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(field.value())
    };
    Line::from(vec![
        Span::styled(format!("{:<10}", field.label), Style::default().fg(Color::Yellow)),
        Span::styled("< ", focus_style(app, focus)),
        shown,
        Span::styled(" >", focus_style(app, focus)),
    ])
}

fn render_form(f: &mut Frame, app: &App<ErrorSurface>, area: Rect) {
    let mut lines = vec![
        select_line(app, &app.education, Focus::Education),
        select_line(app, &app.sector, Focus::Sector),
        select_line(app, &app.location, Focus::Location),
        Line::raw(""),
    ];

    let input_style = if app.focus == Focus::SkillInput {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", "Skills"), Style::default().fg(Color::Yellow)),
        Span::styled(format!("[{}]", app.skill_input), input_style),
    ]));

    let mut tags = vec![Span::raw(format!("{:<10}", ""))];
    if app.selection.skills().is_empty() {
        tags.push(Span::styled("no skills added", Style::default().fg(Color::DarkGray)));
    }
    for (index, skill) in app.selection.skills().iter().enumerate() {
        let style = if app.focus == Focus::SkillTags && index == app.tag_index {
            Style::default().fg(Color::Black).bg(Color::LightBlue)
        } else {
            Style::default().fg(Color::Magenta)
        };
        tags.push(Span::styled(format!("{} ×", skill), style));
        tags.push(Span::raw(" "));
    }
    lines.push(Line::from(tags));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Suggestions", Style::default().fg(Color::Yellow)));
    let mut chips = Vec::new();
    for (index, suggestion) in app.suggestions.iter().enumerate() {
        let style = if app.focus == Focus::Suggestions && index == app.suggestion_index {
            Style::default().fg(Color::Black).bg(Color::LightBlue)
        } else if app.selection.skills().contains(suggestion) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        chips.push(Span::styled(format!("+{}", suggestion), style));
        chips.push(Span::raw(" "));
    }
    lines.push(Line::from(chips));
    lines.push(Line::raw(""));

    let spinner = if app.submit_control.spinner_active {
        let tick = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() / 100)
            .unwrap_or(0);
        format!(" {}", SPINNER_FRAMES[tick as usize % SPINNER_FRAMES.len()])
    } else {
        String::new()
    };
    let mut button_style = focus_style(app, Focus::Submit).add_modifier(Modifier::BOLD);
    if !app.submit_control.enabled {
        button_style = button_style.fg(Color::DarkGray);
    }
    lines.push(Line::styled(
        format!("[ {}{} ]", app.submit_control.label, spinner),
        button_style,
    ));

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Find Your Internship"));
    f.render_widget(form, area);
}

fn card_lines(card: &CardView) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled(card.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{}% Match", card.match_percentage),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::styled(card.company.as_str(), Style::default().fg(Color::Cyan)),
        Line::raw(format!(
            "{} | {} | {} | {}",
            card.sector, card.location, card.duration, card.stipend
        )),
        Line::raw(card.description.as_str()),
        Line::raw(format!("Skills Required: {}", card.skills_required.join(", "))),
        Line::from(vec![
            Span::styled(card.stars.to_string(), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}   {}", card.rating_label, card.opportunities_label)),
        ]),
        Line::raw(""),
    ]
}

fn render_results(f: &mut Frame, app: &App<ErrorSurface>, area: Rect) {
    let now = Instant::now();
    let revealed = app.results.revealed_count(now);
    let mut title = String::from("Results");
    if app.results.visible && !app.results.is_fully_revealed(now) {
        title.push_str(&format!(" ({}/{})", revealed, app.results.cards.len()));
    }
    if app.focus == Focus::Results {
        title.push_str(" *");
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    if !app.results.visible {
        let hint = Paragraph::new("Fill in the form and submit to see matching internships.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let mut lines = vec![
        Line::styled(app.results.subtitle.as_str(), Style::default().fg(Color::Cyan)),
        Line::raw(""),
    ];
    for card in app.results.cards.iter().take(revealed).skip(app.results.scroll) {
        lines.extend(card_lines(card));
    }

    let results = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(results, area);
}

fn render_status_bar(f: &mut Frame, app: &App<ErrorSurface>, area: Rect) {
    let text = match &app.status_message {
        Some(status) => status.clone(),
        None => "Tab: next field | ←→: change | Enter: add/activate | Ctrl+R: submit | Ctrl+E: export | F1: help | Ctrl+Q: quit"
            .to_string(),
    };
    let status = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}

fn render_loading_overlay(f: &mut Frame) {
    let popup = centered(f.area(), 30, 3);
    f.render_widget(Clear, popup);
    let overlay = Paragraph::new("Finding Matches...")
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(overlay, popup);
}

fn render_error_modal(f: &mut Frame, message: &str) {
    let popup = error_modal_area(f.area());
    f.render_widget(Clear, popup);
    let lines = vec![
        Line::raw(message),
        Line::raw(""),
        Line::styled("Enter/Esc: close", Style::default().fg(Color::DarkGray)),
    ];
    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(modal, popup);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;
    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let help_widget = Paragraph::new(help_lines[start_line..end_line].join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"INTERNSHIP MATCHER

=== FILLING IN THE FORM ===
Tab / Shift+Tab   Move between fields
← →               Change education, sector, location or language
Type + Enter      Add the typed skill (leaving the field also adds it)
← → on tags       Pick a skill tag; Delete or Enter removes it
← → on chips      Pick a suggestion; Enter adds it

=== SUBMITTING ===
Enter on button   Get recommendations
Ctrl+R            Get recommendations from any field
                  Education, sector, location and one skill are required

=== RESULTS ===
PgUp / PgDn       Scroll cards
Ctrl+E            Export the cards to recommendations.html

=== OTHER ===
F1                Show or hide this help
Esc               Close an error message
Ctrl+Q / Ctrl+C   Quit"#;
