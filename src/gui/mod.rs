pub mod app;
pub mod message_overlay;
pub mod theme;

mod add_term_screen;
mod auth_screen;
mod home_screen;
mod language_screen;
mod quiz_screen;
mod search_screen;
mod settings_screen;

pub use app::MedidictApp;

/// Which screen is currently visible. The router is nothing more than this
/// plus a match in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Language,
    Auth,
    Home,
    Search,
    AddTerm,
    Quiz,
    Settings,
}
