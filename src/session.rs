//! Who is signed in. One process-wide [`Identity`] context wraps the
//! current session in a signal, so every view that reads it re-renders on
//! login and logout; localStorage keeps the session across reloads.

use leptos::*;

use crate::types::{AuthSession, AuthUser, UserRole};

const AUTH_SESSION_KEY: &str = "ironcoach_auth_session";

#[derive(Clone, Copy)]
pub struct Identity {
    session: RwSignal<Option<AuthSession>>,
}

impl Identity {
    /// Creates the context from the persisted session and provides it to
    /// the component tree. Called once, at the root.
    pub fn provide() -> Self {
        let identity = Self {
            session: create_rw_signal(load_auth_session()),
        };
        provide_context(identity);
        identity
    }

    pub fn use_context() -> Self {
        expect_context::<Identity>()
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.session.get()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.session.get().map(|s| s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    pub fn is_trainer(&self) -> bool {
        self.session
            .with(|s| s.as_ref().is_some_and(|s| s.user.role == UserRole::Trainer))
    }

    pub fn login(&self, session: AuthSession) {
        save_auth_session(&session);
        self.session.set(Some(session));
    }

    pub fn logout(&self) {
        clear_auth_session();
        self.session.set(None);
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_auth_session() -> Option<AuthSession> {
    let storage = get_local_storage()?;
    let json = storage.get_item(AUTH_SESSION_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_auth_session(session: &AuthSession) {
    if let Some(storage) = get_local_storage() {
        if let Ok(json) = serde_json::to_string(session) {
            let _ = storage.set_item(AUTH_SESSION_KEY, &json);
        }
    }
}

/// Also called by the API layer when the server answers 401, so a stale
/// token never survives a reload.
pub fn clear_auth_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(AUTH_SESSION_KEY);
    }
}
