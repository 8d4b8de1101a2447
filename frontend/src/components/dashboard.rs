use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::auth::use_gate;
use super::expenses_filters::ExpensesFilters;
use super::expenses_table::ExpensesTable;
use super::icons::icon_log_out;
use super::loading_screen;
use super::upload_form::UploadForm;
use crate::api;
use crate::expenses;
use crate::filters::ExpenseFilters;
use crate::models::{Expense, PaginatedExpenses};
use crate::notify::{Notifier, Notify};
use crate::routes::{Gate, Navigator, Route, Shell};
use crate::session::{self, SessionHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Upload,
    Manage,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Tab::Upload => "Upload invoices",
            Tab::Manage => "Manage expenses",
        }
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let verdict = use_gate(Shell::Dashboard);
    let session = use_context::<SessionHandle>();
    let notifier = use_context::<Notifier>();
    let navigator = use_context::<Navigator>().unwrap_or_else(Callback::noop);
    let tab = use_state(|| Tab::Upload);
    let filters = use_state(ExpenseFilters::default);
    let items = use_state(Vec::<Expense>::new);
    let loading = use_state(|| false);
    let reload = use_state(|| 0u32);

    {
        let items = items.clone();
        let loading = loading.clone();
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |(tab, filters, _, verdict): &(Tab, ExpenseFilters, u32, Gate)| {
                if *tab == Tab::Manage && *verdict == Gate::Render {
                    loading.set(true);
                    let filters = filters.clone();
                    spawn_local(async move {
                        match expenses::load(&api::client(), &filters).await {
                            Ok(page) => items.set(page.items),
                            Err(err) => notifier.error_with("Could not load expenses", &err.to_string()),
                        }
                        loading.set(false);
                    });
                }
                || ()
            },
            (*tab, (*filters).clone(), *reload, verdict),
        );
    }

    match verdict {
        Gate::Loading => return loading_screen("Loading..."),
        Gate::Redirect(_) => return html! {},
        Gate::Render => {}
    }

    let email = session
        .as_ref()
        .and_then(|s| s.email().map(str::to_string))
        .unwrap_or_default();
    let on_logout = {
        let notifier = notifier.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let action = session::logout(&api::client());
            if let Some(session) = &session {
                session.dispatch(action);
            }
            notifier.success("Logged out");
            navigator.emit(Route::Login);
        })
    };
    let on_uploaded = {
        let reload = reload.clone();
        Callback::from(move |_: ()| reload.set(*reload + 1))
    };
    let on_apply = {
        let filters = filters.clone();
        Callback::from(move |next: ExpenseFilters| filters.set(next))
    };
    let on_refreshed = {
        let items = items.clone();
        Callback::from(move |page: PaginatedExpenses| items.set(page.items))
    };
    let tab_button = |target: Tab| {
        let selected = *tab == target;
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_: MouseEvent| tab.set(target))
        };
        let tone = if selected {
            "bg-white text-[#173E63] shadow-sm"
        } else {
            "text-muted-foreground hover:text-foreground"
        };
        html! {
            <button type="button" class={classes!("px-4", "py-2", "rounded-md", "text-sm", "font-medium", "transition-colors", tone)} {onclick}>
                { target.label() }
            </button>
        }
    };

    html! {
        <div class="min-h-screen bg-background">
            <header class="border-b border-border bg-white">
                <div class="max-w-6xl mx-auto flex items-center justify-between px-6 py-4">
                    <h1 class="text-xl font-bold text-[#173E63]">{"Expense Desk"}</h1>
                    <div class="flex items-center gap-4">
                        <span class="text-sm text-muted-foreground">{ email }</span>
                        <button type="button" class="inline-flex items-center gap-2 px-3 py-2 rounded-lg border border-border text-sm hover:bg-muted" onclick={on_logout}>
                            { icon_log_out() }
                            {"Log out"}
                        </button>
                    </div>
                </div>
            </header>

            <main class="max-w-6xl mx-auto px-6 py-8 space-y-6">
                <div class="inline-flex gap-1 rounded-lg bg-muted p-1">
                    { tab_button(Tab::Upload) }
                    { tab_button(Tab::Manage) }
                </div>

                if *tab == Tab::Upload {
                    <UploadForm on_success={on_uploaded} />
                } else {
                    <div class="space-y-4">
                        <ExpensesFilters applied={(*filters).clone()} {on_apply} />
                        <ExpensesTable
                            expenses={(*items).clone()}
                            filters={(*filters).clone()}
                            loading={*loading}
                            {on_refreshed}
                        />
                    </div>
                }
            </main>
        </div>
    }
}
