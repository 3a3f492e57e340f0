use leptos::*;

use crate::api::{self, ApiError};
use crate::app::{format_rest, format_training_date};
use crate::pages::surface_error;
use crate::runner::{DifficultyReport, SessionPhase, WorkoutSession, MAX_RATING, MIN_RATING};
use crate::session::Identity;
use crate::types::{AppView, TodayWorkout};

#[derive(Clone, Debug, PartialEq)]
enum TodayView {
    Loading,
    Failed(String),
    /// Rest day, with the next scheduled training date when known.
    Rest(Option<String>),
    NothingScheduled,
    Active {
        plan_name: String,
        week: u32,
        day: u32,
        session: WorkoutSession,
    },
}

#[component]
pub fn Workout(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();

    let (today, set_today) = create_signal(TodayView::Loading);
    // One completion call in flight at a time; the button is disabled
    // while this is set, so calls stay strictly sequential.
    let (submitting, set_submitting) = create_signal(false);
    let (action_error, set_action_error) = create_signal(Option::<String>::None);
    // Some(report) keeps the difficulty dialog open.
    let (difficulty, set_difficulty) = create_signal(Option::<DifficultyReport>::None);
    let (reporting, set_reporting) = create_signal(false);

    let load = move || {
        set_today.set(TodayView::Loading);
        spawn_local(async move {
            match api::fetch_today().await {
                Ok(TodayWorkout::Rest {
                    next_training_date, ..
                }) => set_today.set(TodayView::Rest(next_training_date)),
                Ok(TodayWorkout::Training {
                    plan_name,
                    week,
                    day,
                    exercises,
                }) => match WorkoutSession::start(exercises) {
                    Some(session) => set_today.set(TodayView::Active {
                        plan_name,
                        week,
                        day,
                        session,
                    }),
                    None => set_today.set(TodayView::NothingScheduled),
                },
                Err(e) => match surface_error(e, identity, set_view) {
                    Some(msg) => set_today.set(TodayView::Failed(msg)),
                    None => {}
                },
            }
        });
    };

    create_effect(move |_| load());

    let complete_current = move |_| {
        if submitting.get() {
            return;
        }
        let TodayView::Active {
            plan_name,
            week,
            day,
            session,
        } = today.get()
        else {
            return;
        };
        let Some(current) = session.current() else {
            return;
        };
        let log_id = current.log_id;

        set_submitting.set(true);
        set_action_error.set(None);

        spawn_local(async move {
            match api::complete_exercise(log_id, true).await {
                Ok(()) => {
                    let advanced = session.advance();
                    if matches!(advanced.phase(), SessionPhase::Summarizing) {
                        set_today.set(TodayView::Active {
                            plan_name: plan_name.clone(),
                            week,
                            day,
                            session: advanced.clone(),
                        });
                        // Best effort: a failed summary fetch still ends
                        // the session.
                        let summary = api::fetch_day_summary().await.ok();
                        set_today.set(TodayView::Active {
                            plan_name,
                            week,
                            day,
                            session: advanced.finish(summary),
                        });
                    } else {
                        set_today.set(TodayView::Active {
                            plan_name,
                            week,
                            day,
                            session: advanced,
                        });
                    }
                }
                Err(ApiError::Unauthorized) => {
                    let _ = surface_error(ApiError::Unauthorized, identity, set_view);
                }
                // The session snapshot is untouched, so pressing the
                // button again retries the same exercise.
                Err(e) => set_action_error.set(Some(e.to_string())),
            }
            set_submitting.set(false);
        });
    };

    let submit_difficulty = move |_| {
        if reporting.get() {
            return;
        }
        let Some(report) = difficulty.get() else {
            return;
        };
        if !report.is_submittable() {
            return;
        }
        let TodayView::Active { session, .. } = today.get() else {
            return;
        };
        let Some(current) = session.current() else {
            return;
        };
        let log_id = current.log_id;

        set_reporting.set(true);
        spawn_local(async move {
            let comment = report.comment().map(str::to_string);
            match api::report_difficulty(log_id, report.rating, comment.as_deref()).await {
                Ok(()) => {
                    set_difficulty.set(None);
                    set_action_error.set(None);
                }
                Err(ApiError::Unauthorized) => {
                    let _ = surface_error(ApiError::Unauthorized, identity, set_view);
                }
                // Dialog stays open with the chosen rating for a retry.
                Err(e) => set_action_error.set(Some(e.to_string())),
            }
            set_reporting.set(false);
        });
    };

    view! {
        <div class="workout">
            <div class="workout-header">
                <button class="back-btn" on:click=move |_| set_view.set(AppView::Dashboard)>
                    "← Leave"
                </button>
                {move || match today.get() {
                    TodayView::Active { plan_name, week, day, .. } => view! {
                        <div class="workout-title">
                            <span class="workout-plan">{plan_name}</span>
                            <span class="workout-slot">{format!("Week {} · Day {}", week, day)}</span>
                        </div>
                    }.into_view(),
                    _ => view! { <div class="workout-title">"Today"</div> }.into_view(),
                }}
            </div>

            {move || match today.get() {
                TodayView::Active { ref session, .. } => {
                    let total = session.len();
                    let done = session.completed_count();
                    let current = session.current_index();
                    let in_progress = matches!(session.phase(), SessionPhase::InProgress);
                    view! {
                        <div class="progress-dots">
                            {(0..total).map(|i| {
                                let dot_class = if i < done {
                                    "progress-dot done"
                                } else if in_progress && i == current {
                                    "progress-dot current"
                                } else {
                                    "progress-dot"
                                };
                                view! { <span class=dot_class></span> }
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
                _ => ().into_view(),
            }}

            {move || action_error.get().map(|e| view! {
                <div class="action-error">
                    {e}
                    <span class="action-error-hint">" Nothing was lost — try again."</span>
                </div>
            })}

            <div class="workout-main">
                {move || match today.get() {
                    TodayView::Loading => view! {
                        <p class="loading-text">"Loading today's workout..."</p>
                    }.into_view(),

                    TodayView::Failed(msg) => view! {
                        <div class="load-failed">
                            <p class="page-error">{msg}</p>
                            <button class="retry-btn" on:click=move |_| load()>"Try again"</button>
                        </div>
                    }.into_view(),

                    TodayView::Rest(next_date) => view! {
                        <div class="rest-screen">
                            <div class="rest-label">"REST DAY"</div>
                            <p class="rest-text">"No exercises scheduled for today."</p>
                            {next_date.map(|d| view! {
                                <p class="rest-next">
                                    "Next training: " {format_training_date(&d)}
                                </p>
                            })}
                        </div>
                    }.into_view(),

                    TodayView::NothingScheduled => view! {
                        <p class="empty-text">"Your plan has no exercises today."</p>
                    }.into_view(),

                    TodayView::Active { session, .. } => match session.phase() {
                        SessionPhase::InProgress => {
                            let exercise = session.current().cloned();
                            let position = session.current_index() + 1;
                            let total = session.len();
                            match exercise {
                                Some(ex) => view! {
                                    <div class="exercise-screen">
                                        <div class="exercise-progress">
                                            {format!("Exercise {} of {}", position, total)}
                                        </div>
                                        <div class="exercise-name-big">{ex.exercise_name.clone()}</div>
                                        <div class="exercise-scheme">
                                            {format!("{} × {} reps", ex.sets, ex.reps)}
                                        </div>
                                        <div class="exercise-details">
                                            <span class="detail">{format!("Rest {}", format_rest(ex.rest_seconds))}</span>
                                            <span class="detail">{format!("Tempo {}", ex.tempo)}</span>
                                        </div>
                                        {ex.notes.clone().map(|n| view! {
                                            <div class="exercise-notes">{n}</div>
                                        })}
                                        {ex.video_url.clone().map(|url| view! {
                                            <a class="video-link" href=url target="_blank">"▶ Watch technique video"</a>
                                        })}

                                        <button
                                            class="complete-btn"
                                            on:click=complete_current
                                            disabled=submitting
                                        >
                                            {move || if submitting.get() { "Saving..." } else { "Done ✓" }}
                                        </button>

                                        <button class="difficulty-btn" on:click=move |_| {
                                            set_difficulty.set(Some(DifficultyReport::default()));
                                        }>
                                            "How did it feel?"
                                        </button>
                                    </div>
                                }.into_view(),
                                None => ().into_view(),
                            }
                        }

                        SessionPhase::Summarizing => view! {
                            <p class="loading-text">"Wrapping up your session..."</p>
                        }.into_view(),

                        SessionPhase::Finished(summary) => {
                            let (done, total, progress) = match summary {
                                Some(s) => (s.done, s.total, s.progress),
                                None => {
                                    // Summary endpoint failed; show local
                                    // counts instead.
                                    let n = session.len() as u32;
                                    (n, n, 100)
                                }
                            };
                            view! {
                                <div class="finish-screen">
                                    <div class="finish-icon">"✓"</div>
                                    <div class="finish-title">"Workout complete!"</div>
                                    <div class="finish-stats">
                                        <span class="finish-stat">{format!("{} / {} exercises", done, total)}</span>
                                        <span class="finish-stat">{format!("{}%", progress)}</span>
                                    </div>
                                    <button class="finish-btn" on:click=move |_| {
                                        set_view.set(AppView::Dashboard);
                                    }>
                                        "Back to home"
                                    </button>
                                </div>
                            }.into_view()
                        }
                    },
                }}
            </div>

            // Difficulty dialog
            {move || difficulty.get().map(|report| {
                let rating = report.rating;
                let comment = report.comment.clone();
                view! {
                    <div class="modal-overlay">
                        <div class="difficulty-dialog">
                            <div class="confirm-title">"How did it feel?"</div>
                            <div class="star-row">
                                {(MIN_RATING..=MAX_RATING).map(|r| {
                                    let selected = rating >= r;
                                    view! {
                                        <button
                                            class=if selected { "star selected" } else { "star" }
                                            on:click=move |_| {
                                                set_difficulty.update(|d| {
                                                    if let Some(d) = d {
                                                        d.rating = r;
                                                    }
                                                });
                                            }
                                        >
                                            {if selected { "★" } else { "☆" }}
                                        </button>
                                    }
                                }).collect_view()}
                            </div>
                            <textarea
                                class="difficulty-comment"
                                placeholder="Anything your trainer should know? (optional)"
                                prop:value=comment
                                on:input=move |ev| {
                                    let val = event_target_value(&ev);
                                    set_difficulty.update(|d| {
                                        if let Some(d) = d {
                                            d.comment = val;
                                        }
                                    });
                                }
                            ></textarea>
                            <div class="confirm-buttons">
                                <button
                                    class="confirm-cancel"
                                    on:click=move |_| set_difficulty.set(None)
                                    disabled=reporting
                                >"Cancel"</button>
                                <button
                                    class="confirm-ok"
                                    on:click=submit_difficulty
                                    disabled=move || {
                                        reporting.get()
                                            || !difficulty.get().is_some_and(|d| d.is_submittable())
                                    }
                                >
                                    {move || if reporting.get() { "Sending..." } else { "Send" }}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
