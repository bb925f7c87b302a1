use crate::models::session::Session;
use crate::router::View;

/// A user action emitted by a host surface and fed to the shell reducer.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Navigation request from a header/footer affordance. Subject to the
    /// admin auth guard.
    Navigate(View),

    /// A login surface completed successfully and supplies the fully-formed
    /// session record. The shell persists it and forces the follow-up view.
    LoginSucceeded(Session),

    /// Clear the session and return to the main view.
    Logout,

    /// Show the usage-limit modal. `upgrade` marks the upgrade flow, e.g.
    /// when entered from the private-browsing blocking surface.
    OpenUsageModal { upgrade: bool },

    /// Dismiss the usage-limit modal.
    CloseUsageModal,
}
