use leptos::*;

use crate::api;
use crate::pages::surface_error;
use crate::planner::{self, ClientAssignmentSet, PlanDraft, DAYS_PER_WEEK};
use crate::session::Identity;
use crate::table;
use crate::types::{AppView, Client, Exercise, PlanBuilderMode};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[component]
pub fn PlanBuilder(mode: PlanBuilderMode, set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();

    let (draft, set_draft) = create_signal(PlanDraft::empty(1));
    let (assignments, set_assignments) = create_signal(ClientAssignmentSet::default());
    let (loading, set_loading) = create_signal(!matches!(mode, PlanBuilderMode::New));
    let (saving, set_saving) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (selected_week, set_selected_week) = create_signal(1u32);

    let (library, set_library) = create_signal(Vec::<Exercise>::new());
    let (clients, set_clients) = create_signal(Vec::<Client>::new());

    // (week, day) the exercise picker is adding to
    let (picker_target, set_picker_target) = create_signal(Option::<(u32, u32)>::None);
    let (search_query, set_search_query) = create_signal(String::new());
    let (show_assignments, set_show_assignments) = create_signal(false);
    let (show_delete_confirm, set_show_delete_confirm) = create_signal(false);
    let (deleting, set_deleting) = create_signal(false);

    let is_editing = matches!(mode, PlanBuilderMode::Edit(_));

    // Hydrate the draft in edit and copy mode. Copying strips every
    // server id so saving creates a fresh plan, and starts with no
    // clients selected.
    if let PlanBuilderMode::Edit(id) | PlanBuilderMode::Copy(id) = mode {
        create_effect(move |_| {
            spawn_local(async move {
                match api::fetch_plan(id).await {
                    Ok(plan) => {
                        let hydrated = PlanDraft::hydrate(&plan);
                        if matches!(mode, PlanBuilderMode::Copy(_)) {
                            set_draft.set(hydrated.as_template());
                        } else {
                            set_draft.set(hydrated);
                            set_assignments
                                .set(ClientAssignmentSet::from_assigned(plan.client_ids));
                        }
                    }
                    Err(e) => set_error.set(surface_error(e, identity, set_view)),
                }
                set_loading.set(false);
            });
        });
    }

    create_effect(move |_| {
        spawn_local(async move {
            if let Ok(list) = api::fetch_exercises().await {
                set_library.set(list);
            }
            if let Ok(list) = api::fetch_clients().await {
                set_clients.set(list);
            }
        });
    });

    // Re-filtering a large library on every keystroke feels sluggish, so
    // the picker search waits for a pause in typing. Storing the handle
    // drops (and cancels) the previous timer.
    let debounce_handle = store_value(None::<gloo_timers::callback::Timeout>);

    let add_week = move |_| {
        let next = draft.get().add_week();
        set_selected_week.set(next.duration_weeks);
        set_draft.set(next);
    };

    let remove_selected_week = move |_| {
        let d = draft.get();
        // A plan always keeps at least one week; the button is disabled
        // at one but the guard stays for keyboard-triggered clicks.
        if d.duration_weeks <= 1 {
            return;
        }
        let week = selected_week.get();
        let next = d.remove_week(week);
        set_selected_week.set(week.min(next.duration_weeks));
        set_draft.set(next);
    };

    let trigger_save = move |_| {
        let d = draft.get();
        if d.name.trim().is_empty() {
            set_error.set(Some("The plan needs a name".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let assignment = assignments.get();
        spawn_local(async move {
            let payload = d.build_save_payload();
            let saved = match d.id {
                Some(id) => api::update_plan(id, &payload).await,
                None => api::create_plan(&payload).await,
            };

            match saved {
                Ok(plan) => {
                    // Keep the persisted id in the draft so a retry after
                    // an assignment failure updates this plan instead of
                    // creating another one.
                    set_draft.update(|dr| dr.id = Some(plan.id));

                    // The diff is only meaningful now that the plan has
                    // an id. Both calls must settle before the save flow
                    // reports success.
                    let diff = assignment.diff();
                    let mut assignments_failed = false;
                    if !diff.to_assign.is_empty()
                        && api::assign_plan(plan.id, &diff.to_assign).await.is_err()
                    {
                        assignments_failed = true;
                    }
                    if !diff.to_unassign.is_empty()
                        && api::unassign_plan(plan.id, &diff.to_unassign).await.is_err()
                    {
                        assignments_failed = true;
                    }

                    if assignments_failed {
                        set_error.set(Some(
                            "The plan was saved, but the client assignments were not \
                             updated. Save again to retry."
                                .into(),
                        ));
                        set_saving.set(false);
                    } else {
                        set_view.set(AppView::Plans);
                    }
                }
                Err(e) => {
                    set_error.set(surface_error(e, identity, set_view));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="plan-builder">
            <header class="builder-header">
                <button class="back-btn" on:click=move |_| set_view.set(AppView::Plans)>
                    "← Cancel"
                </button>
                <h1>{match mode {
                    PlanBuilderMode::New => "New plan",
                    PlanBuilderMode::Edit(_) => "Edit plan",
                    PlanBuilderMode::Copy(_) => "New plan from template",
                }}</h1>
                <button class="assign-btn" on:click=move |_| set_show_assignments.set(true)>
                    {move || format!("Clients ({})", assignments.get().selected_count())}
                </button>
            </header>

            {move || error.get().map(|e| view! { <div class="page-error">{e}</div> })}

            {move || if loading.get() {
                view! { <p class="loading-text">"Loading plan..."</p> }.into_view()
            } else {
                view! {
                    <div class="builder-content">
                        <div class="builder-meta">
                            <input
                                type="text"
                                placeholder="Plan name"
                                class="plan-name-input"
                                prop:value=move || draft.get().name
                                on:input=move |ev| {
                                    let val = event_target_value(&ev);
                                    set_draft.update(|d| d.name = val);
                                }
                            />
                            <input
                                type="text"
                                placeholder="Goal (e.g. 8 week strength base)"
                                class="plan-desc-input"
                                prop:value=move || draft.get().description
                                on:input=move |ev| {
                                    let val = event_target_value(&ev);
                                    set_draft.update(|d| d.description = val);
                                }
                            />
                        </div>

                        <div class="week-tabs">
                            {move || (1..=draft.get().duration_weeks).map(|week| {
                                let is_selected = selected_week.get() == week;
                                view! {
                                    <button
                                        class=format!("week-tab {}", if is_selected { "selected" } else { "" })
                                        on:click=move |_| set_selected_week.set(week)
                                    >
                                        {format!("Week {}", week)}
                                    </button>
                                }
                            }).collect_view()}
                            <button class="add-week-btn" on:click=add_week>"+"</button>
                            <button
                                class="remove-week-btn"
                                title="Remove this week"
                                disabled=move || draft.get().duration_weeks <= 1
                                on:click=remove_selected_week
                            >"×"</button>
                        </div>

                        <div class="week-editor">
                            {move || {
                                let week = selected_week.get();
                                let d = draft.get();
                                (1..=DAYS_PER_WEEK).map(|day| {
                                    let slot = d.day(week, day).cloned().unwrap_or_else(|| {
                                        crate::types::PlanDay::empty(week, day)
                                    });
                                    let description = slot.description.clone().unwrap_or_default();
                                    view! {
                                        <div class="day-card">
                                            <div class="day-card-header">
                                                <span class="day-name">{WEEKDAYS[(day - 1) as usize]}</span>
                                                <input
                                                    type="text"
                                                    class="day-desc-input"
                                                    placeholder="Focus (e.g. Lower body)"
                                                    value=description
                                                    on:blur=move |ev| {
                                                        let val = event_target_value(&ev);
                                                        set_draft.set(draft.get().set_day_description(week, day, &val));
                                                    }
                                                />
                                            </div>

                                            {slot.exercises.iter().enumerate().map(|(i, entry)| {
                                                let sets = entry.sets.to_string();
                                                let reps = entry.reps.to_string();
                                                let rest = entry.rest_seconds.to_string();
                                                let tempo = entry.tempo.clone();
                                                let notes = entry.notes.clone().unwrap_or_default();
                                                let prev_sets = entry.sets;
                                                let prev_reps = entry.reps;
                                                let prev_rest = entry.rest_seconds;
                                                view! {
                                                    <div class="entry-row">
                                                        <span class="entry-name">{entry.exercise_name.clone()}</span>
                                                        <div class="entry-edit">
                                                            <label class="entry-field">
                                                                "Sets"
                                                                <input type="number" min="1" class="entry-input" value=sets
                                                                    on:blur=move |ev| {
                                                                        let val = event_target_value(&ev)
                                                                            .parse::<u32>().unwrap_or(prev_sets).max(1);
                                                                        set_draft.set(draft.get()
                                                                            .update_exercise(week, day, i, |e| e.sets = val));
                                                                    }
                                                                />
                                                            </label>
                                                            <label class="entry-field">
                                                                "Reps"
                                                                <input type="number" min="1" class="entry-input" value=reps
                                                                    on:blur=move |ev| {
                                                                        let val = event_target_value(&ev)
                                                                            .parse::<u32>().unwrap_or(prev_reps).max(1);
                                                                        set_draft.set(draft.get()
                                                                            .update_exercise(week, day, i, |e| e.reps = val));
                                                                    }
                                                                />
                                                            </label>
                                                            <label class="entry-field">
                                                                "Rest (s)"
                                                                <input type="number" min="0" class="entry-input" value=rest
                                                                    on:blur=move |ev| {
                                                                        let val = event_target_value(&ev)
                                                                            .parse::<u32>().unwrap_or(prev_rest);
                                                                        set_draft.set(draft.get()
                                                                            .update_exercise(week, day, i, |e| e.rest_seconds = val));
                                                                    }
                                                                />
                                                            </label>
                                                            <label class="entry-field">
                                                                "Tempo"
                                                                <input type="text" class="entry-input tempo" value=tempo
                                                                    on:blur=move |ev| {
                                                                        let val = event_target_value(&ev);
                                                                        if planner::is_valid_tempo(&val) {
                                                                            set_error.set(None);
                                                                            set_draft.set(draft.get()
                                                                                .update_exercise(week, day, i, |e| e.tempo = val));
                                                                        } else {
                                                                            set_error.set(Some(
                                                                                "Tempo must be four numbers like 2-0-2-0".into(),
                                                                            ));
                                                                        }
                                                                    }
                                                                />
                                                            </label>
                                                        </div>
                                                        <input
                                                            type="text"
                                                            class="entry-notes"
                                                            placeholder="Notes for the client"
                                                            value=notes
                                                            on:blur=move |ev| {
                                                                let val = event_target_value(&ev);
                                                                set_draft.set(draft.get()
                                                                    .update_exercise(week, day, i, |e| {
                                                                        e.notes = (!val.trim().is_empty())
                                                                            .then(|| val.trim().to_string());
                                                                    }));
                                                            }
                                                        />
                                                        <button class="entry-remove-btn" on:click=move |_| {
                                                            set_draft.set(draft.get().remove_exercise(week, day, i));
                                                        }>"×"</button>
                                                    </div>
                                                }
                                            }).collect_view()}

                                            <button class="add-entry-btn" on:click=move |_| {
                                                set_search_query.set(String::new());
                                                set_picker_target.set(Some((week, day)));
                                            }>
                                                "+ Add exercise"
                                            </button>
                                        </div>
                                    }
                                }).collect_view()
                            }}
                        </div>

                        <button
                            class="save-plan-btn"
                            on:click=trigger_save
                            disabled=saving
                        >
                            {move || if saving.get() { "Saving..." } else { "Save plan" }}
                        </button>

                        {is_editing.then(|| view! {
                            <button
                                class="delete-plan-btn"
                                on:click=move |_| set_show_delete_confirm.set(true)
                            >
                                "Delete plan"
                            </button>
                        })}
                    </div>
                }.into_view()
            }}

            // Exercise picker modal
            {move || picker_target.get().map(|(week, day)| {
                view! {
                    <div class="picker-modal">
                        <div class="picker-dialog">
                            <h3>"Add exercise"</h3>
                            <input
                                type="search"
                                class="picker-search"
                                placeholder="Search the library"
                                on:input=move |ev| {
                                    let val = event_target_value(&ev);
                                    debounce_handle.set_value(Some(
                                        gloo_timers::callback::Timeout::new(250, move || {
                                            set_search_query.set(val);
                                        })
                                    ));
                                }
                            />
                            <div class="picker-results">
                                {move || {
                                    let hits = table::filter(&library.get(), &search_query.get(), |e| {
                                        vec![e.name.clone()]
                                    });
                                    if hits.is_empty() {
                                        view! { <p class="empty-text">"No match in the library"</p> }.into_view()
                                    } else {
                                        hits.into_iter().take(30).map(|ex| {
                                            let ex_clone = ex.clone();
                                            view! {
                                                <button class="picker-item" on:click=move |_| {
                                                    set_draft.set(draft.get().add_exercise(week, day, &ex_clone));
                                                    set_picker_target.set(None);
                                                }>
                                                    <span class="picker-name">{ex.name.clone()}</span>
                                                    {ex.description.clone().map(|d| view! {
                                                        <span class="picker-desc">{d}</span>
                                                    })}
                                                </button>
                                            }
                                        }).collect_view()
                                    }
                                }}
                            </div>
                            <button class="close-modal-btn" on:click=move |_| {
                                set_picker_target.set(None);
                            }>"Close"</button>
                        </div>
                    </div>
                }
            })}

            // Client assignment modal
            {move || show_assignments.get().then(|| view! {
                <div class="picker-modal">
                    <div class="picker-dialog">
                        <h3>"Assign to clients"</h3>
                        <div class="assign-list">
                            {move || {
                                let current = assignments.get();
                                clients.get().into_iter().map(|c| {
                                    let id = c.id;
                                    let checked = current.is_selected(id);
                                    view! {
                                        <label class="assign-row">
                                            <input
                                                type="checkbox"
                                                checked=checked
                                                on:change=move |_| {
                                                    set_assignments.set(assignments.get().toggle(id));
                                                }
                                            />
                                            <span class="assign-name">{c.full_name()}</span>
                                            <span class="assign-email">{c.email.clone()}</span>
                                        </label>
                                    }
                                }).collect_view()
                            }}
                        </div>
                        <p class="assign-hint">
                            "Changes are applied when the plan is saved."
                        </p>
                        <button class="close-modal-btn" on:click=move |_| {
                            set_show_assignments.set(false);
                        }>"Done"</button>
                    </div>
                </div>
            })}

            // Delete confirmation
            {move || show_delete_confirm.get().then(|| {
                let plan_name = draft.get().name.clone();
                view! {
                    <div class="modal-overlay">
                        <div class="confirm-dialog">
                            <div class="confirm-title">"Delete plan?"</div>
                            <div class="confirm-text">
                                "Delete " <strong>{plan_name}</strong>
                                "? Assigned clients will lose their schedule. This cannot be undone."
                            </div>
                            <div class="confirm-buttons">
                                <button
                                    class="confirm-cancel"
                                    on:click=move |_| set_show_delete_confirm.set(false)
                                    disabled=deleting
                                >"Cancel"</button>
                                <button
                                    class="confirm-ok"
                                    disabled=deleting
                                    on:click=move |_| {
                                        let Some(id) = draft.get().id else { return };
                                        set_deleting.set(true);
                                        spawn_local(async move {
                                            match api::delete_plan(id).await {
                                                Ok(()) => set_view.set(AppView::Plans),
                                                Err(e) => {
                                                    set_error.set(surface_error(e, identity, set_view));
                                                    set_deleting.set(false);
                                                    set_show_delete_confirm.set(false);
                                                }
                                            }
                                        });
                                    }
                                >
                                    {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
