#![allow(dead_code)]

use tracing::{debug, warn};

use crate::models::session::Session;
use crate::privacy::{Privacy, PrivacyCell};
use crate::router::{Intent, Surface, UsageModal, View};
use crate::session::SessionManager;

/// The application-state object owned by the root of the shell.
///
/// Holds the current view, session, privacy classification, and modal
/// state; single-writer by construction. Hosts feed it intents and draw
/// whatever `render` returns.
pub struct Shell {
    sessions: SessionManager,
    view: View,
    session: Option<Session>,
    privacy: PrivacyCell,
    modal: UsageModal,
    session_loaded: bool,
}

impl Shell {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            sessions,
            view: View::Main,
            session: None,
            privacy: PrivacyCell::new(),
            modal: UsageModal::default(),
            session_loaded: false,
        }
    }

    /// Feeds the joined startup results into the shell. After this the
    /// shell is ready and `render` stops returning `Loading`.
    pub fn complete_startup(&mut self, session: Option<Session>, privacy: Privacy) {
        self.session = session;
        self.session_loaded = true;
        self.classify(privacy);
    }

    /// Records the privacy classification. The first terminal value sticks;
    /// any later completion is dropped.
    pub fn classify(&mut self, privacy: Privacy) {
        self.privacy.set(privacy);
    }

    /// Ready once the session-load attempt finished and the privacy
    /// classification is terminal.
    pub fn is_ready(&self) -> bool {
        self.session_loaded && self.privacy.is_terminal()
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Navigate(target) => self.navigate(target),
            Intent::LoginSucceeded(session) => self.login(session),
            Intent::Logout => self.logout(),
            Intent::OpenUsageModal { upgrade } => self.modal.open(upgrade),
            Intent::CloseUsageModal => self.modal.close(),
        }
    }

    fn navigate(&mut self, target: View) {
        // Auth guard for the admin view. Unauthorized attempts are redirected
        // to the admin login, not rejected.
        if target == View::Admin && !self.session.as_ref().is_some_and(Session::is_superadmin) {
            debug!("Admin navigation without a superadmin session; redirecting to admin login");
            self.view = View::AdminLogin;
            return;
        }
        self.view = target;
    }

    fn login(&mut self, session: Session) {
        if let Err(e) = self.sessions.save(&session) {
            // The in-memory session stays authoritative for this process.
            warn!("Could not persist session for {}: {e}", session.email);
        }
        // Superadmins land in the admin panel, everyone else on the main
        // view, regardless of which surface the login came from.
        self.view = if session.is_superadmin() {
            View::Admin
        } else {
            View::Main
        };
        self.session = Some(session);
    }

    fn logout(&mut self) {
        if let Err(e) = self.sessions.clear() {
            warn!("Could not clear persisted session: {e}");
        }
        self.session = None;
        self.view = View::Main;
    }

    /// Maps the current state to the surface the host should draw.
    ///
    /// `None` only falls out of the defensive admin-without-session case,
    /// which the guard makes unreachable through the public API.
    pub fn render(&self) -> Option<Surface> {
        if !self.is_ready() {
            return Some(Surface::Loading);
        }
        match self.view {
            View::UserLogin => Some(Surface::UserLogin),
            View::AdminLogin => Some(Surface::AdminLogin),
            View::Admin => self.session.as_ref().map(|_| Surface::Admin),
            View::Main => {
                // Anonymous users in a private session get the blocking
                // surface; a logged-in user bypasses the block entirely.
                if self.privacy.get() == Privacy::Private && self.session.is_none() {
                    Some(Surface::Blocked)
                } else {
                    Some(Surface::Main)
                }
            }
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn privacy(&self) -> Privacy {
        self.privacy.get()
    }

    pub fn modal(&self) -> &UsageModal {
        &self.modal
    }

    #[cfg(test)]
    fn force_view(&mut self, view: View) {
        self.view = view;
    }
}
