use yew::prelude::*;

use super::icons::icon_check;
use super::invoice_fields::{FieldEdit, InvoiceFields};
use crate::forms::InvoiceForm;
use crate::upload::SelectedFile;

#[derive(Properties, PartialEq)]
pub struct InvoicePreviewProps {
    pub file: SelectedFile,
    pub form: InvoiceForm,
    pub saving: bool,
    pub on_edit: Callback<FieldEdit>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(InvoicePreview)]
pub fn invoice_preview(props: &InvoicePreviewProps) -> Html {
    let on_save = props.on_save.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div class="bg-card border border-border rounded-2xl shadow-sm p-6 space-y-6">
            <div class="flex items-center gap-3">
                <span class="text-green-600">{ icon_check() }</span>
                <div>
                    <h2 class="text-lg font-semibold text-[#173E63]">{"Review extracted data"}</h2>
                    <p class="text-sm text-muted-foreground">
                        { format!("Check the fields read from {} before saving.", props.file.name) }
                    </p>
                </div>
            </div>

            <InvoiceFields form={props.form.clone()} on_edit={props.on_edit.clone()} disabled={props.saving} />

            <div class="flex justify-end gap-3">
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg border border-border text-sm font-medium hover:bg-muted disabled:opacity-50"
                    disabled={props.saving}
                    onclick={on_cancel}
                >
                    {"Cancel"}
                </button>
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg bg-primary text-primary-foreground text-sm font-semibold hover:opacity-90 disabled:opacity-50"
                    disabled={props.saving}
                    onclick={on_save}
                >
                    { if props.saving { "Saving..." } else { "Save expense" } }
                </button>
            </div>
        </div>
    }
}
