use chrono::NaiveDate;
use leptos::*;

use crate::pages;
use crate::session::Identity;
use crate::types::AppView;

#[component]
pub fn App() -> impl IntoView {
    let identity = Identity::provide();
    let initial = if identity.is_signed_in() {
        AppView::Dashboard
    } else {
        AppView::Login
    };
    let (view, set_view) = create_signal(initial);

    view! {
        <div class="app">
            {move || match view.get() {
                AppView::Login => view! { <pages::Login set_view=set_view/> }.into_view(),
                AppView::Register => view! { <pages::Register set_view=set_view/> }.into_view(),
                AppView::Dashboard => view! { <pages::Dashboard set_view=set_view/> }.into_view(),
                AppView::Clients => view! { <pages::Clients set_view=set_view/> }.into_view(),
                AppView::Exercises => view! { <pages::Exercises set_view=set_view/> }.into_view(),
                AppView::Plans => view! { <pages::Plans set_view=set_view/> }.into_view(),
                AppView::PlanBuilder(mode) => view! {
                    <pages::PlanBuilder mode=mode set_view=set_view/>
                }.into_view(),
                AppView::Workout => view! { <pages::Workout set_view=set_view/> }.into_view(),
            }}
        </div>
    }
}

/// "45 s", "2 min" or "1:30 min".
pub fn format_rest(seconds: u32) -> String {
    if seconds < 60 {
        format!("{seconds} s")
    } else if seconds % 60 == 0 {
        format!("{} min", seconds / 60)
    } else {
        format!("{}:{:02} min", seconds / 60, seconds % 60)
    }
}

/// Renders an ISO date like "2026-09-01" as "Tuesday 1 September". Dates
/// the server sends in any other shape pass through unchanged.
pub fn format_training_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%A %-d %B").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_formats() {
        assert_eq!(format_rest(45), "45 s");
        assert_eq!(format_rest(60), "1 min");
        assert_eq!(format_rest(90), "1:30 min");
        assert_eq!(format_rest(120), "2 min");
    }

    #[test]
    fn training_date_formats() {
        assert_eq!(format_training_date("2026-09-01"), "Tuesday 1 September");
    }

    #[test]
    fn unparseable_date_passes_through() {
        assert_eq!(format_training_date("tomorrow"), "tomorrow");
    }
}
