//! Form controller state for the recommendation form.
//!
//! This module owns everything the form needs between events: the selected
//! skills, the three select fields, focus, the Idle/Submitting phase and the
//! results section.

use super::notifier::{ErrorSurface, Notifier};
use super::results::ResultsView;
use crate::domain::{validate, FormError, FormResult, FormSnapshot, Language, RecommendationItem, SelectionState};
use crate::infrastructure::{FormConfig, RecommendationService};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

pub const SUBMIT_LABEL: &str = "Get My Recommendations";
pub const SUBMITTING_LABEL: &str = "Finding Matches...";
pub const DEFAULT_EXPORT_FILE: &str = "recommendations.html";

/// Whether a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

/// Overlay currently drawn over the form, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Form,
    Help,
}

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Language,
    Education,
    Sector,
    Location,
    SkillInput,
    SkillTags,
    Suggestions,
    Submit,
    Results,
}

impl Focus {
    const ORDER: [Focus; 9] = [
        Focus::Language,
        Focus::Education,
        Focus::Sector,
        Focus::Location,
        Focus::SkillInput,
        Focus::SkillTags,
        Focus::Suggestions,
        Focus::Submit,
        Focus::Results,
    ];

    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// A drop-down with a fixed option list. Empty value means nothing chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub options: Vec<String>,
    pub value: String,
}

impl SelectField {
    pub fn new(label: &'static str, placeholder: &'static str, options: Vec<String>) -> Self {
        Self {
            label,
            placeholder,
            options,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The option after the current one; wraps back to the placeholder after the last.
    pub fn next_value(&self) -> String {
        match self.position() {
            None => self.options.first().cloned().unwrap_or_default(),
            Some(i) if i + 1 < self.options.len() => self.options[i + 1].clone(),
            Some(_) => String::new(),
        }
    }

    pub fn previous_value(&self) -> String {
        match self.position() {
            None => self.options.last().cloned().unwrap_or_default(),
            Some(0) => String::new(),
            Some(i) => self.options[i - 1].clone(),
        }
    }

    /// Swaps in a new option list, keeping the current value if it still exists.
    pub fn replace_options(&mut self, options: Vec<String>) {
        if !options.contains(&self.value) {
            self.value.clear();
        }
        self.options = options;
    }

    fn position(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.value)
    }
}

/// Visible state of the submit button and loading indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
    pub spinner_active: bool,
    pub overlay_visible: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL,
            spinner_active: false,
            overlay_visible: false,
        }
    }
}

/// Main application state.
///
/// Generic over the notifier so tests and headless runs can swap the error
/// modal for something else.
///
/// # Examples
///
/// ```
/// use internmatch::application::{App, SubmitPhase};
///
/// let mut app = App::default();
/// app.add_skill("Python");
/// app.add_skill("Python");
/// assert_eq!(app.selection.skills().len(), 1);
/// assert_eq!(app.phase, SubmitPhase::Idle);
/// ```
#[derive(Debug)]
pub struct App<N: Notifier = ErrorSurface> {
    pub selection: SelectionState,
    pub education: SelectField,
    pub sector: SelectField,
    pub location: SelectField,
    /// Text typed into the skill input
    pub skill_input: String,
    /// Cursor position within the skill input, in chars
    pub cursor_position: usize,
    pub suggestions: Vec<String>,
    pub suggestion_index: usize,
    /// Highlighted tag when the tag list has focus
    pub tag_index: usize,
    pub focus: Focus,
    pub mode: AppMode,
    pub language: Language,
    pub phase: SubmitPhase,
    pub submit_control: SubmitControl,
    pub results: ResultsView,
    pub notifier: N,
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Target of the HTML export
    pub export_path: PathBuf,
}

impl Default for App<ErrorSurface> {
    fn default() -> Self {
        App::new(&FormConfig::default(), ErrorSurface::with_modal())
    }
}

impl<N: Notifier> App<N> {
    pub fn new(form: &FormConfig, notifier: N) -> Self {
        Self {
            selection: SelectionState::default(),
            education: SelectField::new(
                "Education",
                "Select your education",
                form.education_options.clone(),
            ),
            sector: SelectField::new("Sector", "Select preferred sector", form.sector_options.clone()),
            location: SelectField::new(
                "Location",
                "Select preferred location",
                form.location_options.clone(),
            ),
            skill_input: String::new(),
            cursor_position: 0,
            suggestions: form.skill_suggestions.clone(),
            suggestion_index: 0,
            tag_index: 0,
            focus: Focus::Education,
            mode: AppMode::Form,
            language: Language::default(),
            phase: SubmitPhase::Idle,
            submit_control: SubmitControl::default(),
            results: ResultsView::default(),
            notifier,
            help_scroll: 0,
            status_message: None,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        self.selection.add(skill)
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let changed = self.selection.remove(skill);
        let len = self.selection.skills().len();
        if self.tag_index >= len {
            self.tag_index = len.saturating_sub(1);
        }
        changed
    }

    /// Takes the trimmed skill input, clearing the buffer. `None` if blank.
    pub fn take_skill_input(&mut self) -> Option<String> {
        let skill = self.skill_input.trim().to_string();
        self.skill_input.clear();
        self.cursor_position = 0;
        (!skill.is_empty()).then_some(skill)
    }

    pub fn selected_suggestion(&self) -> Option<&str> {
        self.suggestions.get(self.suggestion_index).map(String::as_str)
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selection.skills().get(self.tag_index)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            education: self.education.value().to_string(),
            sector: self.sector.value().to_string(),
            location: self.location.value().to_string(),
            skills: self.selection.skills().clone(),
        }
    }

    /// Moves between Idle and Submitting together with the button, spinner and overlay.
    pub fn set_loading_state(&mut self, loading: bool) {
        self.phase = if loading { SubmitPhase::Submitting } else { SubmitPhase::Idle };
        self.submit_control = SubmitControl {
            enabled: !loading,
            label: if loading { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            spinner_active: loading,
            overlay_visible: loading,
        };
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn submit<S>(&mut self, service: &S) -> FormResult<usize>
    where
        S: RecommendationService + ?Sized,
    {
        self.submit_observed(service, |_| {})
    }

    /// Validates, sends one request and shows either the cards or the error.
    ///
    /// `on_submitting` runs once the Submitting state is set and before the
    /// request goes out, so a front end can paint the spinner. The phase is
    /// back to Idle when this returns or unwinds.
    pub fn submit_observed<S, F>(&mut self, service: &S, on_submitting: F) -> FormResult<usize>
    where
        S: RecommendationService + ?Sized,
        F: FnOnce(&App<N>),
    {
        if self.is_submitting() {
            tracing::debug!("submit ignored while a request is in flight");
            return Err(FormError::Busy);
        }

        let snapshot = self.snapshot();
        if let Err(err) = validate(&snapshot) {
            self.show_error(&err.to_string());
            return Err(err.into());
        }

        let request = snapshot.into_request();
        tracing::info!(
            education = %request.education,
            sector = %request.sector,
            location = %request.location,
            skills = request.skills.len(),
            "requesting recommendations"
        );

        let mut guard = SubmittingGuard::enter(self);
        on_submitting(&*guard);

        match service.recommend(&request) {
            Ok(items) => {
                guard.display_recommendations(&items);
                Ok(items.len())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to get recommendations");
                guard.show_error(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Hands results to the results section and scrolls it into view.
    pub fn display_recommendations(&mut self, items: &[RecommendationItem]) {
        self.results.display(items);
        self.focus = Focus::Results;
    }

    pub fn show_error(&mut self, message: &str) {
        self.notifier.show(message);
    }

    pub fn dismiss_error(&mut self) {
        self.notifier.dismiss();
    }

    pub fn select_language(&mut self, language: Language) {
        self.language = language;
        tracing::info!(language = language.code(), "language switched");
        self.status_message = Some(format!("Language: {}", language));
    }

    /// Pulls sector and location choices from the service. Configured
    /// choices stay when a call fails or returns nothing.
    pub fn load_catalog<S>(&mut self, service: &S)
    where
        S: RecommendationService + ?Sized,
    {
        match service.sectors() {
            Ok(sectors) if !sectors.is_empty() => self.sector.replace_options(sectors),
            Ok(_) => tracing::warn!("service returned no sectors, keeping configured list"),
            Err(err) => tracing::warn!(error = %err, "could not load sectors, keeping configured list"),
        }
        match service.locations() {
            Ok(locations) if !locations.is_empty() => self.location.replace_options(locations),
            Ok(_) => tracing::warn!("service returned no locations, keeping configured list"),
            Err(err) => tracing::warn!(error = %err, "could not load locations, keeping configured list"),
        }
    }

    /// Processes the result of an HTML export.
    pub fn set_export_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported to {}", filename),
            Err(error) => format!("Export failed: {}", error),
        });
    }
}

/// Holds the controller in Submitting; dropping it restores Idle.
struct SubmittingGuard<'a, N: Notifier> {
    app: &'a mut App<N>,
}

impl<'a, N: Notifier> SubmittingGuard<'a, N> {
    fn enter(app: &'a mut App<N>) -> Self {
        app.set_loading_state(true);
        Self { app }
    }
}

impl<N: Notifier> Deref for SubmittingGuard<'_, N> {
    type Target = App<N>;

    fn deref(&self) -> &Self::Target {
        self.app
    }
}

impl<N: Notifier> DerefMut for SubmittingGuard<'_, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.app
    }
}

impl<N: Notifier> Drop for SubmittingGuard<'_, N> {
    fn drop(&mut self) {
        self.app.set_loading_state(false);
    }
}
