use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::invoice_fields::{FieldEdit, InvoiceFields};
use crate::api;
use crate::expenses::{self, LockAction, RowLocks};
use crate::filters::ExpenseFilters;
use crate::forms::InvoiceForm;
use crate::models::{Expense, PaginatedExpenses};
use crate::notify::{Notifier, Notify};
use crate::ui::dialog::{Dialog, DialogContent, DialogHeader};

#[derive(Properties, PartialEq)]
pub struct EditExpenseDialogProps {
    /// The row being edited; `None` keeps the dialog closed.
    pub expense: Option<Expense>,
    pub filters: ExpenseFilters,
    pub locks: UseReducerHandle<RowLocks>,
    pub on_close: Callback<()>,
    pub on_refreshed: Callback<PaginatedExpenses>,
}

#[function_component(EditExpenseDialog)]
pub fn edit_expense_dialog(props: &EditExpenseDialogProps) -> Html {
    let form = use_state(InvoiceForm::default);
    let saving = use_state(|| false);
    let notifier = use_context::<Notifier>();

    {
        let form = form.clone();
        use_effect_with_deps(
            move |expense: &Option<Expense>| {
                if let Some(expense) = expense {
                    form.set(InvoiceForm::from_expense(expense));
                }
                || ()
            },
            props.expense.clone(),
        );
    }

    let on_open_change = {
        let on_close = props.on_close.clone();
        Callback::from(move |open: bool| {
            if !open {
                on_close.emit(());
            }
        })
    };
    let on_edit = {
        let form = form.clone();
        Callback::from(move |(field, value): FieldEdit| {
            let mut next = (*form).clone();
            next.set(field, &value);
            form.set(next);
        })
    };
    let on_save = {
        let form = form.clone();
        let saving = saving.clone();
        let locks = props.locks.clone();
        let filters = props.filters.clone();
        let on_close = props.on_close.clone();
        let on_refreshed = props.on_refreshed.clone();
        let expense_id = props.expense.as_ref().map(|e| e.id.clone());
        Callback::from(move |_: MouseEvent| {
            let Some(id) = expense_id.clone() else {
                return;
            };
            saving.set(true);
            locks.dispatch(LockAction::Updating(id.clone()));
            let form = (*form).clone();
            let (saving, locks, notifier, filters, on_close, on_refreshed) = (
                saving.clone(),
                locks.clone(),
                notifier.clone(),
                filters.clone(),
                on_close.clone(),
                on_refreshed.clone(),
            );
            spawn_local(async move {
                match expenses::update(&api::client(), &id, &form, &filters).await {
                    Ok(page) => {
                        on_refreshed.emit(page);
                        notifier.success("Expense updated");
                        on_close.emit(());
                    }
                    Err(err) => notifier.error_with("Could not update the expense", &err.to_string()),
                }
                saving.set(false);
                locks.dispatch(LockAction::Release(id));
            });
        })
    };
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Dialog open={Some(props.expense.is_some())} {on_open_change}>
            <DialogContent class="max-w-2xl">
                <DialogHeader title="Edit expense" description="Update the details of this expense." />
                <InvoiceFields form={(*form).clone()} {on_edit} show_classification=true disabled={*saving} />
                <div class="flex justify-end gap-3 mt-6">
                    <button
                        type="button"
                        class="px-4 py-2 rounded-lg border border-border text-sm font-medium hover:bg-muted disabled:opacity-50"
                        disabled={*saving}
                        onclick={on_cancel}
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 rounded-lg bg-primary text-primary-foreground text-sm font-semibold hover:opacity-90 disabled:opacity-50"
                        disabled={*saving}
                        onclick={on_save}
                    >
                        { if *saving { "Saving..." } else { "Save changes" } }
                    </button>
                </div>
            </DialogContent>
        </Dialog>
    }
}
