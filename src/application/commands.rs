use super::notifier::Notifier;
use super::state::App;
use crate::domain::{FormError, FormResult, Language};
use crate::infrastructure::RecommendationService;

/// Something the user asked the form to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddSkill(String),
    RemoveSkill(String),
    SetEducation(String),
    SetSector(String),
    SetLocation(String),
    SelectLanguage(Language),
    Submit,
    DismissError,
    /// Move the results list by this many cards.
    ScrollResults(isize),
}

impl<N: Notifier> App<N> {
    pub fn dispatch<S>(&mut self, command: Command, service: &S) -> FormResult<()>
    where
        S: RecommendationService + ?Sized,
    {
        match command {
            Command::AddSkill(skill) => {
                self.add_skill(&skill);
            }
            Command::RemoveSkill(skill) => {
                self.remove_skill(&skill);
            }
            Command::SetEducation(value) => self.education.set_value(value),
            Command::SetSector(value) => self.sector.set_value(value),
            Command::SetLocation(value) => self.location.set_value(value),
            Command::SelectLanguage(language) => self.select_language(language),
            Command::Submit => {
                self.submit(service)?;
            }
            Command::DismissError => self.dismiss_error(),
            Command::ScrollResults(delta) => self.results.scroll_by(delta),
        }
        Ok(())
    }
}

/// Logs a command that did not complete. Validation failures only reach
/// the error surface.
pub fn log_command_error(err: &FormError) {
    match err {
        FormError::Validation(_) => {}
        other => tracing::debug!(error = %other, "command did not complete"),
    }
}
