pub mod auth;
pub mod dashboard;
pub mod edit_expense_dialog;
pub mod expenses_filters;
pub mod expenses_table;
pub mod icons;
pub mod invoice_fields;
pub mod invoice_preview;
pub mod upload_form;

use yew::prelude::*;

fn loading_screen(message: &'static str) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
            { message }
        </div>
    }
}
