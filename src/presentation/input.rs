use crate::application::{App, AppMode, Command, ErrorSurface, Focus, Notifier};
use crate::infrastructure::FileRepository;
use crate::presentation::html;
use crate::presentation::ui::error_modal_area;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App<ErrorSurface>, key: KeyCode, modifiers: KeyModifiers) -> Vec<Command> {
        if app.notifier.is_visible() {
            return Self::handle_modal(key);
        }
        if matches!(app.mode, AppMode::Help) {
            Self::handle_help_mode(app, key);
            return Vec::new();
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('r') => {
                    // leaving the input commits it, as a click on the button would
                    let mut commands = Self::blur_skill_input(app);
                    commands.push(Command::Submit);
                    return commands;
                }
                KeyCode::Char('e') => {
                    Self::export_results(app);
                    return Vec::new();
                }
                _ => return Vec::new(),
            }
        }

        app.status_message = None;

        match key {
            KeyCode::Tab => {
                let commands = Self::blur_skill_input(app);
                app.focus = app.focus.next();
                commands
            }
            KeyCode::BackTab => {
                let commands = Self::blur_skill_input(app);
                app.focus = app.focus.previous();
                commands
            }
            KeyCode::F(1) => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
                Vec::new()
            }
            KeyCode::PageUp => vec![Command::ScrollResults(-1)],
            KeyCode::PageDown => vec![Command::ScrollResults(1)],
            _ => match app.focus {
                Focus::SkillInput => Self::handle_skill_input(app, key),
                _ => Self::handle_focused(app, key),
            },
        }
    }

    pub fn handle_mouse_event(app: &mut App<ErrorSurface>, mouse: MouseEvent, screen: Rect) -> Vec<Command> {
        if !app.notifier.is_visible() {
            return Vec::new();
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let dialog = error_modal_area(screen);
            if !dialog.contains(Position::new(mouse.column, mouse.row)) {
                return vec![Command::DismissError];
            }
        }
        Vec::new()
    }

    fn handle_modal(key: KeyCode) -> Vec<Command> {
        match key {
            KeyCode::Esc | KeyCode::Enter => vec![Command::DismissError],
            _ => Vec::new(),
        }
    }

    fn blur_skill_input(app: &mut App<ErrorSurface>) -> Vec<Command> {
        if app.focus != Focus::SkillInput {
            return Vec::new();
        }
        app.take_skill_input().map(Command::AddSkill).into_iter().collect()
    }

    fn handle_focused(app: &mut App<ErrorSurface>, key: KeyCode) -> Vec<Command> {
        match (app.focus, key) {
            (Focus::Results, KeyCode::Up) => vec![Command::ScrollResults(-1)],
            (Focus::Results, KeyCode::Down) => vec![Command::ScrollResults(1)],
            (_, KeyCode::Up) => {
                app.focus = app.focus.previous();
                Vec::new()
            }
            (_, KeyCode::Down) => {
                app.focus = app.focus.next();
                Vec::new()
            }

            (Focus::Language, KeyCode::Left) => vec![Command::SelectLanguage(app.language.previous())],
            (Focus::Language, KeyCode::Right) => vec![Command::SelectLanguage(app.language.next())],

            (Focus::Education, KeyCode::Left) => vec![Command::SetEducation(app.education.previous_value())],
            (Focus::Education, KeyCode::Right) => vec![Command::SetEducation(app.education.next_value())],
            (Focus::Sector, KeyCode::Left) => vec![Command::SetSector(app.sector.previous_value())],
            (Focus::Sector, KeyCode::Right) => vec![Command::SetSector(app.sector.next_value())],
            (Focus::Location, KeyCode::Left) => vec![Command::SetLocation(app.location.previous_value())],
            (Focus::Location, KeyCode::Right) => vec![Command::SetLocation(app.location.next_value())],

            (Focus::SkillTags, KeyCode::Left) => {
                app.tag_index = app.tag_index.saturating_sub(1);
                Vec::new()
            }
            (Focus::SkillTags, KeyCode::Right) => {
                if app.tag_index + 1 < app.selection.skills().len() {
                    app.tag_index += 1;
                }
                Vec::new()
            }
            (Focus::SkillTags, KeyCode::Delete | KeyCode::Backspace | KeyCode::Enter) => app
                .selected_tag()
                .map(|skill| Command::RemoveSkill(skill.to_string()))
                .into_iter()
                .collect(),

            (Focus::Suggestions, KeyCode::Left) => {
                app.suggestion_index = app.suggestion_index.saturating_sub(1);
                Vec::new()
            }
            (Focus::Suggestions, KeyCode::Right) => {
                if app.suggestion_index + 1 < app.suggestions.len() {
                    app.suggestion_index += 1;
                }
                Vec::new()
            }
            (Focus::Suggestions, KeyCode::Enter) => app
                .selected_suggestion()
                .map(|skill| Command::AddSkill(skill.to_string()))
                .into_iter()
                .collect(),

            (Focus::Submit, KeyCode::Enter) if app.submit_control.enabled => vec![Command::Submit],
            _ => Vec::new(),
        }
    }

    fn handle_skill_input(app: &mut App<ErrorSurface>, key: KeyCode) -> Vec<Command> {
        match key {
            KeyCode::Enter => return app.take_skill_input().map(Command::AddSkill).into_iter().collect(),
            KeyCode::Up => {
                Self::blur_then(app, Focus::previous);
            }
            KeyCode::Down => {
                Self::blur_then(app, Focus::next);
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    let at = byte_index(&app.skill_input, app.cursor_position - 1);
                    app.skill_input.remove(at);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.skill_input.chars().count() {
                    let at = byte_index(&app.skill_input, app.cursor_position);
                    app.skill_input.remove(at);
                }
            }
            KeyCode::Left => {
                app.cursor_position = app.cursor_position.saturating_sub(1);
            }
            KeyCode::Right => {
                if app.cursor_position < app.skill_input.chars().count() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.skill_input.chars().count();
            }
            KeyCode::Char(c) => {
                let at = byte_index(&app.skill_input, app.cursor_position);
                app.skill_input.insert(at, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
        Vec::new()
    }

    fn blur_then(app: &mut App<ErrorSurface>, step: fn(Focus) -> Focus) {
        // Up/Down leave the input too; the pending skill is committed directly
        if let Some(skill) = app.take_skill_input() {
            app.add_skill(&skill);
        }
        app.focus = step(app.focus);
    }

    fn handle_help_mode(app: &mut App<ErrorSurface>, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.mode = AppMode::Form;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn export_results(app: &mut App<ErrorSurface>) {
        if app.results.cards.is_empty() {
            app.status_message = Some("Nothing to export yet".to_string());
            return;
        }
        let document = html::results_document(&app.results, app.selection.skills());
        let result = FileRepository::save_results_html(&document, &app.export_path);
        app.set_export_result(result);
    }
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::tests::{filled_app, item, FakeService};
    use crossterm::event::KeyModifiers as Mods;

    fn press(app: &mut App<ErrorSurface>, key: KeyCode) -> Vec<Command> {
        InputHandler::handle_key_event(app, key, Mods::NONE)
    }

    fn type_text(app: &mut App<ErrorSurface>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: Mods::NONE,
        }
    }

    #[test]
    fn test_enter_in_skill_input_adds_trimmed_skill() {
        let mut app = App::default();
        app.focus = Focus::SkillInput;
        type_text(&mut app, "  Rust ");

        let commands = press(&mut app, KeyCode::Enter);

        assert_eq!(commands, vec![Command::AddSkill("Rust".to_string())]);
        assert!(app.skill_input.is_empty());
    }

    #[test]
    fn test_tab_out_of_skill_input_commits_it() {
        let mut app = App::default();
        app.focus = Focus::SkillInput;
        type_text(&mut app, "Go");

        let commands = press(&mut app, KeyCode::Tab);

        assert_eq!(commands, vec![Command::AddSkill("Go".to_string())]);
        assert_eq!(app.focus, Focus::SkillTags);
    }

    #[test]
    fn test_tab_with_blank_input_adds_nothing() {
        let mut app = App::default();
        app.focus = Focus::SkillInput;
        type_text(&mut app, "   ");

        assert!(press(&mut app, KeyCode::Tab).is_empty());
    }

    #[test]
    fn test_editing_multibyte_input() {
        let mut app = App::default();
        app.focus = Focus::SkillInput;
        type_text(&mut app, "डेटा");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);

        assert_eq!(app.skill_input, "ेट");
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_right_arrow_on_select_sets_next_option() {
        let mut app = App::default();
        app.focus = Focus::Sector;

        let commands = press(&mut app, KeyCode::Right);

        assert_eq!(commands, vec![Command::SetSector("Information Technology".to_string())]);
    }

    #[test]
    fn test_suggestion_enter_adds_exact_skill() {
        let mut app = App::default();
        app.focus = Focus::Suggestions;
        press(&mut app, KeyCode::Right);

        let commands = press(&mut app, KeyCode::Enter);

        assert_eq!(commands, vec![Command::AddSkill("JavaScript".to_string())]);
    }

    #[test]
    fn test_delete_on_tag_removes_it() {
        let mut app = App::default();
        app.add_skill("Python");
        app.add_skill("SQL");
        app.focus = Focus::SkillTags;
        press(&mut app, KeyCode::Right);

        let commands = press(&mut app, KeyCode::Delete);

        assert_eq!(commands, vec![Command::RemoveSkill("SQL".to_string())]);
    }

    #[test]
    fn test_ctrl_r_commits_pending_skill_then_submits() {
        let service = FakeService::replying(Ok(vec![item("One")]));
        let mut app = filled_app();
        app.focus = Focus::SkillInput;
        type_text(&mut app, "Excel");

        let commands = InputHandler::handle_key_event(&mut app, KeyCode::Char('r'), Mods::CONTROL);
        assert_eq!(commands, vec![Command::AddSkill("Excel".to_string()), Command::Submit]);

        for command in commands {
            let _ = app.dispatch(command, &service);
        }
        assert_eq!(service.requests.borrow()[0].skills, vec!["Excel".to_string()]);
        assert_eq!(app.results.cards.len(), 1);
    }

    #[test]
    fn test_enter_on_disabled_submit_does_nothing() {
        let mut app = filled_app();
        app.focus = Focus::Submit;
        app.set_loading_state(true);

        assert!(press(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn test_escape_dismisses_visible_modal() {
        let mut app = App::default();
        app.show_error("Please add at least one skill");

        assert_eq!(press(&mut app, KeyCode::Esc), vec![Command::DismissError]);
        // other keys are swallowed while the modal is up
        assert!(press(&mut app, KeyCode::Tab).is_empty());
        assert_eq!(app.focus, Focus::Education);
    }

    #[test]
    fn test_escape_without_modal_is_ignored() {
        let mut app = App::default();
        assert!(press(&mut app, KeyCode::Esc).is_empty());
    }

    #[test]
    fn test_click_outside_modal_dismisses() {
        let mut app = App::default();
        app.show_error("boom");
        let screen = Rect::new(0, 0, 100, 40);

        assert_eq!(
            InputHandler::handle_mouse_event(&mut app, click(0, 0), screen),
            vec![Command::DismissError]
        );

        let dialog = error_modal_area(screen);
        assert!(InputHandler::handle_mouse_event(&mut app, click(dialog.x + 1, dialog.y + 1), screen).is_empty());
    }

    #[test]
    fn test_export_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::default();
        app.export_path = dir.path().join("cards.html");
        app.display_recommendations(&[item("Exported")]);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), Mods::CONTROL);

        let page = std::fs::read_to_string(&app.export_path).unwrap();
        assert!(page.contains("Exported"));
        assert!(app.status_message.as_deref().unwrap().starts_with("Exported to"));
    }

    #[test]
    fn test_export_without_results() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), Mods::CONTROL);
        assert_eq!(app.status_message.as_deref(), Some("Nothing to export yet"));
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::default();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Form);
    }
}
