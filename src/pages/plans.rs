use leptos::*;

use crate::api;
use crate::pages::surface_error;
use crate::session::Identity;
use crate::types::{AppView, PlanBuilderMode, PlanSummary};

#[component]
pub fn Plans(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (plans, set_plans) = create_signal(Vec::<PlanSummary>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_plans().await {
                Ok(list) => set_plans.set(list),
                Err(e) => set_error.set(surface_error(e, identity, set_view)),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="list-page">
            <header class="list-header">
                <button class="back-btn" on:click=move |_| set_view.set(AppView::Dashboard)>
                    "← Back"
                </button>
                <h1>"Training plans"</h1>
                <button
                    class="add-btn"
                    on:click=move |_| set_view.set(AppView::PlanBuilder(PlanBuilderMode::New))
                >
                    "+ New"
                </button>
            </header>

            {move || error.get().map(|e| view! { <div class="page-error">{e}</div> })}

            {move || if loading.get() {
                view! { <p class="loading-text">"Loading plans..."</p> }.into_view()
            } else if plans.get().is_empty() {
                view! { <p class="empty-text">"No plans yet. Create your first one."</p> }.into_view()
            } else {
                view! {
                    <div class="plan-list">
                        {move || plans.get().into_iter().map(|p| {
                            let id = p.id;
                            view! {
                                <div class="plan-row">
                                    <div class="plan-row-main">
                                        <span class="plan-row-name">{p.name.clone()}</span>
                                        <span class="plan-row-meta">
                                            {format!(
                                                "{} weeks · {} clients",
                                                p.duration_weeks, p.assigned_clients
                                            )}
                                        </span>
                                        {(!p.description.is_empty()).then(|| view! {
                                            <span class="plan-row-desc">{p.description.clone()}</span>
                                        })}
                                    </div>
                                    <div class="plan-row-actions">
                                        <button
                                            class="plan-edit-btn"
                                            on:click=move |_| set_view.set(
                                                AppView::PlanBuilder(PlanBuilderMode::Edit(id))
                                            )
                                        >"Edit"</button>
                                        <button
                                            class="plan-copy-btn"
                                            title="Use as template for a new plan"
                                            on:click=move |_| set_view.set(
                                                AppView::PlanBuilder(PlanBuilderMode::Copy(id))
                                            )
                                        >"Duplicate"</button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_view()
            }}
        </div>
    }
}
