mod auth;
mod clients;
mod dashboard;
mod exercises;
mod plan_builder;
mod plans;
mod workout;

pub use auth::{Login, Register};
pub use clients::Clients;
pub use dashboard::Dashboard;
pub use exercises::Exercises;
pub use plan_builder::PlanBuilder;
pub use plans::Plans;
pub use workout::Workout;

use leptos::*;

use crate::api::ApiError;
use crate::session::Identity;
use crate::types::AppView;

/// Folds an API failure into the page: an expired session routes back to
/// login, everything else becomes a message the view renders next to a
/// retry control.
pub(crate) fn surface_error(
    err: ApiError,
    identity: Identity,
    set_view: WriteSignal<AppView>,
) -> Option<String> {
    if err == ApiError::Unauthorized {
        identity.logout();
        set_view.set(AppView::Login);
        None
    } else {
        Some(err.to_string())
    }
}
