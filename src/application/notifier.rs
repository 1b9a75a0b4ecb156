//! Where error messages are shown to the user.

/// Capability for surfacing a message and dismissing it again.
pub trait Notifier {
    fn show(&mut self, message: &str);

    fn dismiss(&mut self);

    /// Whether a message is currently on screen.
    fn is_visible(&self) -> bool;

    /// The last message shown, if any.
    fn message(&self) -> Option<&str>;
}

/// A dismissable dialog drawn over the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorModal {
    pub message: String,
    pub visible: bool,
}

/// Shows errors in a modal when the front end has one, otherwise falls
/// back to a blocking alert on stderr.
pub struct ErrorSurface {
    modal: Option<ErrorModal>,
    last_alert: Option<String>,
    alert: Box<dyn FnMut(&str)>,
}

impl std::fmt::Debug for ErrorSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorSurface")
            .field("modal", &self.modal)
            .field("last_alert", &self.last_alert)
            .finish_non_exhaustive()
    }
}

impl Default for ErrorSurface {
    fn default() -> Self {
        Self::with_modal()
    }
}

impl ErrorSurface {
    pub fn with_modal() -> Self {
        Self {
            modal: Some(ErrorModal::default()),
            last_alert: None,
            alert: Box::new(stderr_alert),
        }
    }

    pub fn alert_only() -> Self {
        Self {
            modal: None,
            last_alert: None,
            alert: Box::new(stderr_alert),
        }
    }

    /// Replaces the fallback alert, e.g. to capture it.
    pub fn with_alert(mut self, alert: impl FnMut(&str) + 'static) -> Self {
        self.alert = Box::new(alert);
        self
    }

    pub fn modal(&self) -> Option<&ErrorModal> {
        self.modal.as_ref()
    }
}

fn stderr_alert(message: &str) {
    eprintln!("Error: {}", message);
}

impl Notifier for ErrorSurface {
    fn show(&mut self, message: &str) {
        match self.modal.as_mut() {
            Some(modal) => {
                modal.message = message.to_string();
                modal.visible = true;
            }
            None => {
                self.last_alert = Some(message.to_string());
                (self.alert)(message);
            }
        }
    }

    fn dismiss(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.visible = false;
        }
    }

    fn is_visible(&self) -> bool {
        self.modal.as_ref().is_some_and(|m| m.visible)
    }

    fn message(&self) -> Option<&str> {
        match &self.modal {
            Some(modal) if !modal.message.is_empty() => Some(&modal.message),
            Some(_) => None,
            None => self.last_alert.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::tests::{captured_logs, FakeService};
    use crate::application::App;
    use crate::infrastructure::FormConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_modal_show_and_dismiss() {
        let mut surface = ErrorSurface::with_modal();
        assert!(!surface.is_visible());

        surface.show("Please select your preferred sector");
        assert!(surface.is_visible());
        assert_eq!(surface.message(), Some("Please select your preferred sector"));

        surface.dismiss();
        assert!(!surface.is_visible());
    }

    #[test]
    fn test_show_replaces_previous_message() {
        let mut surface = ErrorSurface::with_modal();
        surface.show("first");
        surface.show("second");
        assert_eq!(surface.modal().unwrap().message, "second");
    }

    #[test]
    fn test_falls_back_to_alert_without_modal() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut surface =
            ErrorSurface::alert_only().with_alert(move |m| sink.borrow_mut().push(m.to_string()));

        surface.show("no matches");

        assert_eq!(*seen.borrow(), vec!["no matches".to_string()]);
        assert!(!surface.is_visible());
        assert_eq!(surface.message(), Some("no matches"));
    }

    #[test]
    fn test_alert_fallback_does_not_log_validation_message() {
        let mut app = App::new(&FormConfig::default(), ErrorSurface::alert_only());

        let logs = captured_logs(|| {
            let _ = app.submit(&FakeService::replying(Ok(Vec::new())));
        });

        assert_eq!(app.notifier.message(), Some("Please select your education background"));
        assert!(logs.is_empty(), "unexpected log output: {logs}");
    }
}
