use leptos::*;

use crate::api;
use crate::session::Identity;
use crate::types::AppView;

#[component]
pub fn Login(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let do_login = move |_| {
        let email = email.get();
        let password = password.get();

        if email.trim().is_empty() || password.is_empty() {
            set_error.set(Some("Enter your email and password".into()));
            return;
        }

        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::sign_in(&email, &password).await {
                Ok(session) => {
                    identity.login(session);
                    set_view.set(AppView::Dashboard);
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"IRONCOACH"</div>
            <div class="auth-card">
                <h2 class="auth-title">"Sign in"</h2>

                {move || error.get().map(|e| view! { <div class="auth-error">{e}</div> })}

                <input
                    type="email"
                    class="auth-input"
                    placeholder="Email"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                />

                <input
                    type="password"
                    class="auth-input"
                    placeholder="Password"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />

                <button
                    class="auth-button"
                    on:click=do_login
                    disabled=move || loading.get()
                >
                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                </button>

                <div class="auth-switch">
                    "No account yet? "
                    <button class="auth-link" on:click=move |_| set_view.set(AppView::Register)>
                        "Register"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn Register(set_view: WriteSignal<AppView>) -> impl IntoView {
    let identity = Identity::use_context();
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (password2, set_password2) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let do_register = move |_| {
        let name = name.get();
        let email = email.get();
        let password = password.get();
        let password2 = password2.get();

        if name.trim().is_empty() {
            set_error.set(Some("Enter your name".into()));
            return;
        }
        if password != password2 {
            set_error.set(Some("The passwords do not match".into()));
            return;
        }
        if password.len() < 8 {
            set_error.set(Some("The password must be at least 8 characters".into()));
            return;
        }

        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let registration = api::Registration {
                email,
                password,
                display_name: name.trim().to_string(),
            };
            match api::sign_up(&registration).await {
                Ok(session) => {
                    identity.login(session);
                    set_view.set(AppView::Dashboard);
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"IRONCOACH"</div>
            <div class="auth-card">
                <h2 class="auth-title">"Create account"</h2>

                {move || error.get().map(|e| view! { <div class="auth-error">{e}</div> })}

                <input
                    type="text"
                    class="auth-input"
                    placeholder="Name"
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    prop:value=name
                />

                <input
                    type="email"
                    class="auth-input"
                    placeholder="Email"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                />

                <input
                    type="password"
                    class="auth-input"
                    placeholder="Password"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />

                <input
                    type="password"
                    class="auth-input"
                    placeholder="Confirm password"
                    on:input=move |ev| set_password2.set(event_target_value(&ev))
                    prop:value=password2
                />

                <button
                    class="auth-button"
                    on:click=do_register
                    disabled=move || loading.get()
                >
                    {move || if loading.get() { "Creating account..." } else { "Create account" }}
                </button>

                <div class="auth-switch">
                    "Already registered? "
                    <button class="auth-link" on:click=move |_| set_view.set(AppView::Login)>
                        "Sign in"
                    </button>
                </div>
            </div>
        </div>
    }
}
