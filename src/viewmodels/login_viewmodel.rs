// ============================================================================
// LOGIN VIEWMODEL - Login form state machine
// ============================================================================
// Editing -> Submitting -> (session established | Failed(message))
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::{AppState, Route};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoginPhase {
    Editing,
    Submitting,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// Nothing sent: a submission is already running or a field is empty.
    Ignored,
    LoggedIn,
    Rejected(String),
}

/// Lives in `AppState` so the draft survives re-renders of the login view.
#[derive(Clone)]
pub struct LoginViewModel {
    draft: Rc<RefCell<LoginDraft>>,
    phase: Rc<RefCell<LoginPhase>>,
}

impl Default for LoginViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginViewModel {
    /// Blank draft in `Editing`.
    pub fn new() -> Self {
        Self {
            draft: Rc::new(RefCell::new(LoginDraft::default())),
            phase: Rc::new(RefCell::new(LoginPhase::Editing)),
        }
    }

    /// Snapshot of the entered values.
    pub fn draft(&self) -> LoginDraft {
        self.draft.borrow().clone()
    }

    /// Current phase
    pub fn phase(&self) -> LoginPhase {
        self.phase.borrow().clone()
    }

    /// Message of the last rejected attempt.
    pub fn error(&self) -> Option<String> {
        match &*self.phase.borrow() {
            LoginPhase::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        *self.phase.borrow() == LoginPhase::Submitting
    }

    /// Both fields filled and nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.draft.borrow().is_complete()
    }

    /// Draft setters do not notify: the view keeps its inputs.
    pub fn set_email(&self, email: &str) {
        self.draft.borrow_mut().email = email.to_string();
    }

    pub fn set_password(&self, password: &str) {
        self.draft.borrow_mut().password = password.to_string();
    }

    /// Back to a blank form (logout, successful login).
    pub fn reset(&self) {
        *self.draft.borrow_mut() = LoginDraft::default();
        *self.phase.borrow_mut() = LoginPhase::Editing;
    }

    /// Send the credentials. A no-op while a submission runs.
    pub async fn submit(&self, state: &AppState) -> LoginOutcome {
        if !self.can_submit() {
            return LoginOutcome::Ignored;
        }

        let draft = self.draft();
        *self.phase.borrow_mut() = LoginPhase::Submitting;
        state.notify_subscribers();

        log::info!("🔐 [LOGIN] Submitting credentials");
        match state.api.login(draft.email.trim(), &draft.password).await {
            Ok(token) => {
                log::info!("✅ [LOGIN] Login accepted");
                self.reset();
                state.take_notice();
                state.session.establish(token);
                state.navigate(Route::Dashboard);
                LoginOutcome::LoggedIn
            }
            Err(err) => {
                let message = err.user_message();
                log::warn!("⚠️ [LOGIN] Login rejected: {}", message);
                *self.phase.borrow_mut() = LoginPhase::Failed(message.clone());
                state.notify_subscribers();
                LoginOutcome::Rejected(message)
            }
        }
    }
}
