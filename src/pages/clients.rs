use leptos::*;

use crate::api;
use crate::pages::surface_error;
use crate::session::Identity;
use crate::table::{self, SortDirection};
use crate::types::{AppView, Client};

#[component]
pub fn Clients(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (clients, set_clients) = create_signal(Vec::<Client>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (query, set_query) = create_signal(String::new());
    let (sort_dir, set_sort_dir) = create_signal(SortDirection::Ascending);
    let (page, set_page) = create_signal(0usize);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_clients().await {
                Ok(list) => set_clients.set(list),
                Err(e) => set_error.set(surface_error(e, identity, set_view)),
            }
            set_loading.set(false);
        });
    });

    let filtered = create_memo(move |_| {
        let mut rows = table::filter(&clients.get(), &query.get(), |c| {
            vec![c.full_name(), c.email.clone()]
        });
        table::sort_by_key(&mut rows, sort_dir.get(), |c| {
            (c.last_name.to_lowercase(), c.first_name.to_lowercase())
        });
        rows
    });

    let pages = move || table::page_count(filtered.get().len(), table::DEFAULT_PAGE_SIZE);
    let visible = move || table::paginate(&filtered.get(), page.get(), table::DEFAULT_PAGE_SIZE);

    view! {
        <div class="list-page">
            <header class="list-header">
                <button class="back-btn" on:click=move |_| set_view.set(AppView::Dashboard)>
                    "← Back"
                </button>
                <h1>"Clients"</h1>
            </header>

            {move || error.get().map(|e| view! { <div class="page-error">{e}</div> })}

            <input
                type="search"
                class="list-search"
                placeholder="Search name or email"
                prop:value=query
                on:input=move |ev| {
                    set_query.set(event_target_value(&ev));
                    set_page.set(0);
                }
            />

            {move || if loading.get() {
                view! { <p class="loading-text">"Loading clients..."</p> }.into_view()
            } else if filtered.get().is_empty() {
                view! { <p class="empty-text">"No clients found"</p> }.into_view()
            } else {
                view! {
                    <table class="list-table">
                        <thead>
                            <tr>
                                <th>
                                    <button class="sort-toggle" on:click=move |_| {
                                        set_sort_dir.update(|d| *d = d.toggled());
                                    }>
                                        "Name "
                                        {move || match sort_dir.get() {
                                            SortDirection::Ascending => "▲",
                                            SortDirection::Descending => "▼",
                                        }}
                                    </button>
                                </th>
                                <th>"Email"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || visible().into_iter().map(|c| view! {
                                <tr>
                                    <td>{c.full_name()}</td>
                                    <td>{c.email.clone()}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>

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
