use leptos::*;

use crate::api;
use crate::pages::surface_error;
use crate::session::Identity;
use crate::types::{AppView, TodayWorkout, UserRole};

#[component]
pub fn Dashboard(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();

    let Some(user) = identity.user() else {
        set_view.set(AppView::Login);
        return view! { <div class="loading">"Session expired..."</div> }.into_view();
    };

    let display = user.display_name.clone().unwrap_or_else(|| user.email.clone());
    let role = user.role;

    view! {
        <div class="dashboard">
            <div class="logo">"IRONCOACH"</div>
            <div class="dashboard-greeting">{format!("Hi, {}", display)}</div>

            {match role {
                UserRole::Trainer => view! { <TrainerHome set_view=set_view /> }.into_view(),
                UserRole::Client => view! { <ClientHome set_view=set_view /> }.into_view(),
            }}

            <div class="logged-in-info">
                "signed in: "{user.email.clone()}<br/>
                <button class="logout-link" on:click=move |_| {
                    identity.logout();
                    set_view.set(AppView::Login);
                }>"sign out"</button>
            </div>
        </div>
    }
    .into_view()
}

#[component]
fn TrainerHome(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (client_count, set_client_count) = create_signal(Option::<usize>::None);
    let (plan_count, set_plan_count) = create_signal(Option::<usize>::None);
    let (exercise_count, set_exercise_count) = create_signal(Option::<usize>::None);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_clients().await {
                Ok(clients) => set_client_count.set(Some(clients.len())),
                Err(e) => set_error.set(surface_error(e, identity, set_view)),
            }
            if let Ok(plans) = api::fetch_plans().await {
                set_plan_count.set(Some(plans.len()));
            }
            if let Ok(exercises) = api::fetch_exercises().await {
                set_exercise_count.set(Some(exercises.len()));
            }
        });
    });

    let count_label = |count: Option<usize>| match count {
        Some(n) => n.to_string(),
        None => "–".to_string(),
    };

    view! {
        <div class="trainer-home">
            {move || error.get().map(|e| view! { <div class="page-error">{e}</div> })}

            <div class="nav-cards">
                <button class="nav-card" on:click=move |_| set_view.set(AppView::Clients)>
                    <span class="nav-card-value">{move || count_label(client_count.get())}</span>
                    <span class="nav-card-label">"Clients"</span>
                </button>
                <button class="nav-card" on:click=move |_| set_view.set(AppView::Plans)>
                    <span class="nav-card-value">{move || count_label(plan_count.get())}</span>
                    <span class="nav-card-label">"Training plans"</span>
                </button>
                <button class="nav-card" on:click=move |_| set_view.set(AppView::Exercises)>
                    <span class="nav-card-value">{move || count_label(exercise_count.get())}</span>
                    <span class="nav-card-label">"Exercises"</span>
                </button>
            </div>
        </div>
    }
}

#[component]
fn ClientHome(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (today, set_today) = create_signal(Option::<TodayWorkout>::None);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_today().await {
                Ok(day) => set_today.set(Some(day)),
                Err(e) => set_error.set(surface_error(e, identity, set_view)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="client-home">
            {move || error.get().map(|e| view! { <div class="page-error">{e}</div> })}

            {move || if loading.get() {
                view! { <p class="loading-text">"Checking today's schedule..."</p> }.into_view()
            } else {
                match today.get() {
                    Some(TodayWorkout::Training { plan_name, exercises, .. }) => view! {
                        <div class="today-card">
                            <div class="today-plan">{plan_name}</div>
                            <div class="today-count">{format!("{} exercises scheduled", exercises.len())}</div>
                            <button class="start-btn" on:click=move |_| set_view.set(AppView::Workout)>
                                "Start today's workout"
                            </button>
                        </div>
                    }.into_view(),
                    Some(TodayWorkout::Rest { .. }) => view! {
                        <div class="today-card rest">
                            <div class="today-plan">"Rest day"</div>
                            <button class="start-btn secondary" on:click=move |_| set_view.set(AppView::Workout)>
                                "Details"
                            </button>
                        </div>
                    }.into_view(),
                    None => view! { <p class="loading-text">"No plan assigned yet."</p> }.into_view(),
                }
            }}
        </div>
    }
}
