use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::edit_expense_dialog::EditExpenseDialog;
use super::icons::{icon_edit, icon_file_text, icon_more_vertical, icon_trash};
use crate::api;
use crate::expenses::{self, CategoryChange, LockAction, RowLocks};
use crate::filters::ExpenseFilters;
use crate::format::{format_currency, format_date, or_dash};
use crate::models::{Category, Expense, PaginatedExpenses};
use crate::notify::{Notifier, Notify};
use crate::ui::dropdown::{DropdownMenu, DropdownMenuContent, DropdownMenuItem, DropdownMenuTrigger};

#[derive(Properties, PartialEq)]
pub struct ExpensesTableProps {
    pub expenses: Vec<Expense>,
    pub filters: ExpenseFilters,
    pub loading: bool,
    pub on_refreshed: Callback<PaginatedExpenses>,
}

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message("Are you sure you want to delete this expense?").ok())
        .unwrap_or(false)
}

fn empty_state() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center gap-2 rounded-2xl border border-dashed border-border bg-card p-12 text-center">
            <span class="text-muted-foreground">{ icon_file_text() }</span>
            <p class="text-sm font-medium text-foreground">{"No expenses found"}</p>
            <p class="text-xs text-muted-foreground">{"Upload an invoice or change the filters."}</p>
        </div>
    }
}

#[function_component(ExpensesTable)]
pub fn expenses_table(props: &ExpensesTableProps) -> Html {
    let locks = use_reducer(RowLocks::default);
    let editing = use_state(|| None::<Expense>);
    let notifier = use_context::<Notifier>();

    let on_category = {
        let locks = locks.clone();
        let notifier = notifier.clone();
        let filters = props.filters.clone();
        let on_refreshed = props.on_refreshed.clone();
        move |id: String, previous: Category| {
            let locks = locks.clone();
            let notifier = notifier.clone();
            let filters = filters.clone();
            let on_refreshed = on_refreshed.clone();
            Callback::from(move |e: Event| {
                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                let Some(requested) = Category::from_code(&select.value()) else {
                    return;
                };
                if locks.is_locked(&id) {
                    select.set_value(previous.code());
                    return;
                }
                locks.dispatch(LockAction::Updating(id.clone()));
                let change = CategoryChange { expense_id: id.clone(), previous, requested };
                let (locks, notifier, filters, on_refreshed) =
                    (locks.clone(), notifier.clone(), filters.clone(), on_refreshed.clone());
                spawn_local(async move {
                    let outcome =
                        expenses::change_category(&api::client(), &change.expense_id, change.requested, &filters).await;
                    // A failed change leaves the vdom untouched, so the element is reset here.
                    select.set_value(change.shown(&outcome).code());
                    match outcome {
                        Ok(page) => {
                            on_refreshed.emit(page);
                            notifier.success("Category updated");
                        }
                        Err(err) => notifier.error_with("Could not update the category", &err.to_string()),
                    }
                    locks.dispatch(LockAction::Release(change.expense_id));
                });
            })
        }
    };

    let on_delete = {
        let locks = locks.clone();
        let notifier = notifier.clone();
        let filters = props.filters.clone();
        let on_refreshed = props.on_refreshed.clone();
        move |id: String| {
            let locks = locks.clone();
            let notifier = notifier.clone();
            let filters = filters.clone();
            let on_refreshed = on_refreshed.clone();
            Callback::from(move |_: ()| {
                let Some(lock) = expenses::begin_delete(&locks, &id, confirm_delete) else {
                    log::debug!("delete of {} not started", id);
                    return;
                };
                locks.dispatch(lock);
                let (id, locks, notifier, filters, on_refreshed) =
                    (id.clone(), locks.clone(), notifier.clone(), filters.clone(), on_refreshed.clone());
                spawn_local(async move {
                    match expenses::delete(&api::client(), &id, || true, &filters).await {
                        Ok(Some(page)) => {
                            on_refreshed.emit(page);
                            notifier.success("Expense deleted");
                        }
                        Ok(None) => {}
                        Err(err) => notifier.error_with("Could not delete the expense", &err.to_string()),
                    }
                    locks.dispatch(LockAction::Release(id));
                });
            })
        }
    };

    let on_edit = {
        let editing = editing.clone();
        move |expense: Expense| {
            let editing = editing.clone();
            Callback::from(move |_: ()| editing.set(Some(expense.clone())))
        }
    };
    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    if props.loading {
        return html! { <p class="py-12 text-center text-sm text-muted-foreground">{"Loading expenses..."}</p> };
    }
    if props.expenses.is_empty() {
        return empty_state();
    }

    let rows = props.expenses.iter().map(|expense| {
        let locked = locks.is_locked(&expense.id);
        let deleting = locks.deleting_id.as_deref() == Some(expense.id.as_str());
        html! {
            <tr key={expense.id.clone()} class={classes!("border-b", "border-border", deleting.then_some("opacity-50"))}>
                <td class="px-4 py-3 font-medium text-foreground">{ or_dash(&expense.business_name) }</td>
                <td class="px-4 py-3">{ or_dash(&expense.business_id) }</td>
                <td class="px-4 py-3">{ or_dash(&expense.invoice_number) }</td>
                <td class="px-4 py-3">{ format_date(&expense.transaction_date) }</td>
                <td class="px-4 py-3">{ expense.doc_type.label() }</td>
                <td class="px-4 py-3 text-right">{ format_currency(expense.amount_before_vat) }</td>
                <td class="px-4 py-3 text-right font-semibold">{ format_currency(expense.amount_after_vat) }</td>
                <td class="px-4 py-3">
                    <select
                        class="px-2 py-1 bg-input border border-input rounded-md text-sm disabled:opacity-50"
                        disabled={locked}
                        onchange={on_category(expense.id.clone(), expense.category)}
                    >
                        { for Category::ALL.iter().map(|c| html! {
                            <option value={c.code()} selected={*c == expense.category}>{ c.label() }</option>
                        }) }
                    </select>
                </td>
                <td class="px-4 py-3 text-right">
                    <DropdownMenu>
                        <DropdownMenuTrigger class="h-8 w-8" disabled={locked} label="Row actions">
                            { icon_more_vertical() }
                        </DropdownMenuTrigger>
                        <DropdownMenuContent>
                            <DropdownMenuItem onclick={on_edit(expense.clone())} disabled={locked}>
                                { icon_edit() }{"Edit"}
                            </DropdownMenuItem>
                            <DropdownMenuItem onclick={on_delete(expense.id.clone())} disabled={locked} destructive=true>
                                { icon_trash() }{"Delete"}
                            </DropdownMenuItem>
                        </DropdownMenuContent>
                    </DropdownMenu>
                </td>
            </tr>
        }
    });

    html! {
        <div class="space-y-3">
            <p class="text-sm text-muted-foreground">{ format!("{} expenses found", props.expenses.len()) }</p>
            <div class="overflow-x-auto rounded-2xl border border-border bg-card">
                <table class="w-full text-sm">
                    <thead class="bg-muted/50 text-left text-xs uppercase text-muted-foreground">
                        <tr>
                            <th class="px-4 py-3">{"Business"}</th>
                            <th class="px-4 py-3">{"Business ID"}</th>
                            <th class="px-4 py-3">{"Invoice #"}</th>
                            <th class="px-4 py-3">{"Date"}</th>
                            <th class="px-4 py-3">{"Type"}</th>
                            <th class="px-4 py-3 text-right">{"Before VAT"}</th>
                            <th class="px-4 py-3 text-right">{"After VAT"}</th>
                            <th class="px-4 py-3">{"Category"}</th>
                            <th class="px-4 py-3"></th>
                        </tr>
                    </thead>
                    <tbody>{ for rows }</tbody>
                </table>
            </div>
            <EditExpenseDialog
                expense={(*editing).clone()}
                filters={props.filters.clone()}
                locks={locks.clone()}
                {on_close}
                on_refreshed={props.on_refreshed.clone()}
            />
        </div>
    }
}
