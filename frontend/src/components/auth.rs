use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::loading_screen;
use crate::api;
use crate::forms::{validate_login, validate_registration};
use crate::notify::{Notifier, Notify};
use crate::routes::{gate, Gate, Navigator, Route, Shell};
use crate::session::{self, SessionHandle};

/// Evaluates the guard for `shell` and performs its redirect once rendering settles.
#[hook]
pub fn use_gate(shell: Shell) -> Gate {
    let session = use_context::<SessionHandle>();
    let navigator = use_context::<Navigator>().unwrap_or_else(Callback::noop);
    let verdict = session.as_ref().map_or(Gate::Loading, |session| gate(shell, session));

    use_effect_with_deps(
        move |verdict: &Gate| {
            if let Gate::Redirect(route) = *verdict {
                log::debug!("guard redirect to {:?}", route);
                navigator.emit(route);
            }
            || ()
        },
        verdict,
    );
    verdict
}

#[derive(Properties, PartialEq)]
pub struct AuthShellProps {
    pub children: Children,
}

/// Wraps the sign-in pages; signed-in visitors are sent to the dashboard.
#[function_component(AuthShell)]
pub fn auth_shell(props: &AuthShellProps) -> Html {
    match use_gate(Shell::Auth) {
        Gate::Loading => loading_screen("Loading..."),
        Gate::Render => html! {
            <div class="min-h-screen flex items-center justify-center bg-background px-4">
                <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                    { for props.children.iter() }
                </div>
            </div>
        },
        Gate::Redirect(_) => html! {},
    }
}

fn text_input(kind: &'static str, label: &'static str, value: &UseStateHandle<String>) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input
                type={kind}
                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                value={(**value).clone()}
                {oninput}
            />
        </div>
    }
}

fn switch_link(prompt: &'static str, label: &'static str, target: Route, navigator: &Navigator) -> Html {
    let onclick = {
        let navigator = navigator.clone();
        Callback::from(move |_| navigator.emit(target))
    };
    html! {
        <div class="mt-6 text-center text-sm text-muted-foreground">
            { prompt }
            <button type="button" class="ml-2 text-primary font-semibold" {onclick}>{ label }</button>
        </div>
    }
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_context::<SessionHandle>();
    let notifier = use_context::<Notifier>();
    let navigator = use_context::<Navigator>().unwrap_or_else(Callback::noop);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();
            if let Err(err) = validate_login(&email_val, &password_val) {
                error.set(Some(err.to_string()));
                return;
            }

            error.set(None);
            loading.set(true);
            let session = session.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match session::login(&api::client(), &email_val, &password_val).await {
                    Ok(action) => {
                        if let Some(session) = &session {
                            session.dispatch(action);
                        }
                        notifier.success("Logged in successfully");
                        navigator.emit(Route::Dashboard);
                    }
                    Err(err) => {
                        let message = err.to_string();
                        notifier.error_with("Login failed", &message);
                        error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <>
            <div class="text-center mb-6">
                <h1 class="text-2xl font-bold text-[#173E63]">{"Sign in"}</h1>
                <p class="text-sm text-muted-foreground mt-2">{"Sign in to manage your expenses."}</p>
            </div>
            <form class="space-y-4" onsubmit={on_submit}>
                { text_input("email", "Email", &email) }
                { text_input("password", "Password", &password) }
                if let Some(msg) = &*error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }
                <button
                    type="submit"
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                    disabled={*loading}
                >
                    { if *loading { "Signing in..." } else { "Sign in" } }
                </button>
            </form>
            { switch_link("No account?", "Create one", Route::Register, &navigator) }
        </>
    }
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let session = use_context::<SessionHandle>();
    let notifier = use_context::<Notifier>();
    let navigator = use_context::<Navigator>().unwrap_or_else(Callback::noop);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();
            if let Err(err) = validate_registration(&email_val, &password_val, &confirm_password) {
                error.set(Some(err.to_string()));
                return;
            }

            error.set(None);
            loading.set(true);
            let session = session.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match session::register(&api::client(), &email_val, &password_val).await {
                    Ok(action) => {
                        if let Some(session) = &session {
                            session.dispatch(action);
                        }
                        notifier.success("Account created");
                        navigator.emit(Route::Dashboard);
                    }
                    Err(err) => {
                        let message = err.to_string();
                        notifier.error_with("Registration failed", &message);
                        error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <>
            <div class="text-center mb-6">
                <h1 class="text-2xl font-bold text-[#173E63]">{"Create account"}</h1>
                <p class="text-sm text-muted-foreground mt-2">{"Start tracking invoices and receipts."}</p>
            </div>
            <form class="space-y-4" onsubmit={on_submit}>
                { text_input("email", "Email", &email) }
                { text_input("password", "Password", &password) }
                { text_input("password", "Confirm password", &confirm_password) }
                if let Some(msg) = &*error {
                    <div class="text-sm text-red-500">{ msg.clone() }</div>
                }
                <button
                    type="submit"
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                    disabled={*loading}
                >
                    { if *loading { "Creating account..." } else { "Sign up" } }
                </button>
            </form>
            { switch_link("Already have an account?", "Sign in", Route::Login, &navigator) }
        </>
    }
}
