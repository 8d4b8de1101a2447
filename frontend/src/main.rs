mod api;
mod components;
mod config;
mod error;
mod expenses;
mod filters;
mod format;
mod forms;
mod logging;
mod models;
mod notify;
mod routes;
mod session;
mod storage;
mod ui;
mod upload;

use yew::prelude::*;

use components::auth::{AuthShell, LoginPage, RegisterPage};
use components::dashboard::DashboardPage;
use notify::{Notifier, Toasts};
use routes::{Navigator, Route};
use session::{Session, SessionHandle};
use ui::toaster::Toaster;

#[function_component(App)]
fn app() -> Html {
    let session = use_reducer(Session::default);
    let toasts = use_reducer(Toasts::default);
    let route = use_state(|| Route::Dashboard);

    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                session.dispatch(session::restore(&api::client()));
                || ()
            },
            (),
        );
    }

    let navigator: Navigator = {
        let route = route.clone();
        Callback::from(move |next: Route| route.set(next))
    };

    let content = match *route {
        Route::Login => html! { <AuthShell><LoginPage /></AuthShell> },
        Route::Register => html! { <AuthShell><RegisterPage /></AuthShell> },
        Route::Dashboard => html! { <DashboardPage /> },
    };

    html! {
        <ContextProvider<SessionHandle> context={session}>
            <ContextProvider<Notifier> context={toasts}>
                <ContextProvider<Navigator> context={navigator}>
                    { content }
                    <Toaster />
                </ContextProvider<Navigator>>
            </ContextProvider<Notifier>>
        </ContextProvider<SessionHandle>>
    }
}

fn main() {
    logging::init(config::log_level());
    log::info!("api base url {}", config::api_base_url());
    yew::Renderer::<App>::new().render();
}
