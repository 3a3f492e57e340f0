use leptos::*;

use crate::api;
use crate::pages::surface_error;
use crate::session::Identity;
use crate::table;
use crate::types::{AppView, Exercise};

#[component]
pub fn Exercises(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (exercises, set_exercises) = create_signal(Vec::<Exercise>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (query, set_query) = create_signal(String::new());
    let (page, set_page) = create_signal(0usize);

    // Create form
    let (show_form, set_show_form) = create_signal(false);
    let (name, set_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (video_url, set_video_url) = create_signal(String::new());
    let (form_error, set_form_error) = create_signal(Option::<String>::None);
    let (saving, set_saving) = create_signal(false);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_exercises().await {
                Ok(list) => set_exercises.set(list),
                Err(e) => set_error.set(surface_error(e, identity, set_view)),
            }
            set_loading.set(false);
        });
    });

    let filtered = create_memo(move |_| {
        table::filter(&exercises.get(), &query.get(), |e| {
            vec![e.name.clone(), e.description.clone().unwrap_or_default()]
        })
    });
    let pages = move || table::page_count(filtered.get().len(), table::DEFAULT_PAGE_SIZE);
    let visible = move || table::paginate(&filtered.get(), page.get(), table::DEFAULT_PAGE_SIZE);

    let save_exercise = move |_| {
        let name = name.get();
        if name.trim().is_empty() {
            set_form_error.set(Some("The exercise needs a name".into()));
            return;
        }

        set_saving.set(true);
        set_form_error.set(None);

        let description = description.get();
        let video_url = video_url.get();
        spawn_local(async move {
            let new_exercise = api::NewExercise {
                name: name.trim().to_string(),
                description: (!description.trim().is_empty()).then(|| description.trim().to_string()),
                video_url: (!video_url.trim().is_empty()).then(|| video_url.trim().to_string()),
            };
            match api::create_exercise(&new_exercise).await {
                Ok(created) => {
                    set_exercises.update(|list| list.push(created));
                    set_name.set(String::new());
                    set_description.set(String::new());
                    set_video_url.set(String::new());
                    set_show_form.set(false);
                }
                Err(e) => set_form_error.set(surface_error(e, identity, set_view)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="list-page">
            <header class="list-header">
                <button class="back-btn" on:click=move |_| set_view.set(AppView::Dashboard)>
                    "← Back"
                </button>
                <h1>"Exercise library"</h1>
                <button class="add-btn" on:click=move |_| set_show_form.update(|v| *v = !*v)>
                    "+ New"
                </button>
            </header>

            {move || error.get().map(|e| view! { <div class="page-error">{e}</div> })}

            {move || show_form.get().then(|| view! {
                <div class="exercise-form">
                    {move || form_error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Name"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <textarea
                        class="form-textarea"
                        placeholder="Coaching cues (optional)"
                        prop:value=description
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                    <input
                        type="url"
                        class="form-input"
                        placeholder="Video URL (optional)"
                        prop:value=video_url
                        on:input=move |ev| set_video_url.set(event_target_value(&ev))
                    />
                    <button class="form-save-btn" on:click=save_exercise disabled=saving>
                        {move || if saving.get() { "Saving..." } else { "Save exercise" }}
                    </button>
                </div>
            })}

            <input
                type="search"
                class="list-search"
                placeholder="Search exercises"
                prop:value=query
                on:input=move |ev| {
                    set_query.set(event_target_value(&ev));
                    set_page.set(0);
                }
            />

            {move || if loading.get() {
                view! { <p class="loading-text">"Loading exercises..."</p> }.into_view()
            } else if filtered.get().is_empty() {
                view! { <p class="empty-text">"No exercises found"</p> }.into_view()
            } else {
                view! {
                    <div class="exercise-list">
                        {move || visible().into_iter().map(|e| {
                            let video = e.video_url.clone();
                            view! {
                                <div class="exercise-row">
                                    <div class="exercise-row-main">
                                        <span class="exercise-row-name">{e.name.clone()}</span>
                                        {e.description.clone().map(|d| view! {
                                            <span class="exercise-row-desc">{d}</span>
                                        })}
                                    </div>
                                    {video.map(|url| view! {
                                        <a class="video-link" href=url target="_blank">"▶ video"</a>
                                    })}
                                </div>
                            }
                        }).collect_view()}
                    </div>

                    <div class="pager">
                        <button
                            class="pager-btn"
                            disabled=move || page.get() == 0
                            on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1))
                        >"‹"</button>
                        <span class="pager-label">
                            {move || format!("{} / {}", page.get() + 1, pages())}
                        </span>
                        <button
                            class="pager-btn"
                            disabled=move || page.get() + 1 >= pages()
                            on:click=move |_| set_page.update(|p| *p += 1)
                        >"›"</button>
                    </div>
                }.into_view()
            }}
        </div>
    }
}
