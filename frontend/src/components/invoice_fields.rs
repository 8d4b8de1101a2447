use yew::prelude::*;

use crate::forms::{InvoiceField, InvoiceForm};
use crate::models::{Category, DocType};

pub type FieldEdit = (InvoiceField, String);

#[derive(Properties, PartialEq)]
pub struct InvoiceFieldsProps {
    pub form: InvoiceForm,
    pub on_edit: Callback<FieldEdit>,
    /// Category and service description; the upload preview leaves them out.
    #[prop_or_default]
    pub show_classification: bool,
    #[prop_or_default]
    pub disabled: bool,
}

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-input border border-input rounded-lg text-sm text-foreground focus:outline-none focus:ring-2 focus:ring-primary disabled:opacity-50";

fn amount_text(amount: f64) -> String {
    if amount == 0.0 {
        String::new()
    } else {
        amount.to_string()
    }
}

fn labeled(label: &'static str, required: bool, control: Html) -> Html {
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">
                { label }
                if required {
                    <span class="text-red-500">{" *"}</span>
                }
            </label>
            { control }
        </div>
    }
}

#[function_component(InvoiceFields)]
pub fn invoice_fields(props: &InvoiceFieldsProps) -> Html {
    let input = |kind: &'static str, field: InvoiceField, value: String| {
        let on_edit = props.on_edit.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_edit.emit((field, input.value()));
        });
        html! {
            <input type={kind} step={(kind == "number").then_some("0.01")} class={INPUT_CLASS} {value} disabled={props.disabled} {oninput} />
        }
    };
    let select = |field: InvoiceField, options: Vec<(&'static str, &'static str)>, current: &'static str| {
        let on_edit = props.on_edit.clone();
        let onchange = Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_edit.emit((field, select.value()));
        });
        html! {
            <select class={INPUT_CLASS} disabled={props.disabled} {onchange}>
                { for options.into_iter().map(|(code, label)| html! {
                    <option value={code} selected={code == current}>{ label }</option>
                }) }
            </select>
        }
    };

    let form = &props.form;
    let doc_types = DocType::ALL.iter().map(|d| (d.code(), d.label())).collect();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            { labeled("Business name", false, input("text", InvoiceField::BusinessName, form.business_name.clone())) }
            { labeled("Business ID", false, input("text", InvoiceField::BusinessId, form.business_id.clone())) }
            { labeled("Invoice number", false, input("text", InvoiceField::InvoiceNumber, form.invoice_number.clone())) }
            { labeled("Transaction date", true, input("date", InvoiceField::TransactionDate, form.transaction_date.clone())) }
            { labeled("Amount before VAT", false, input("number", InvoiceField::AmountBeforeVat, amount_text(form.amount_before_vat))) }
            { labeled("Amount after VAT", true, input("number", InvoiceField::AmountAfterVat, amount_text(form.amount_after_vat))) }
            { labeled("Document type", false, select(InvoiceField::DocType, doc_types, form.doc_type.code())) }
            if props.show_classification {
                { labeled("Category", false, select(
                    InvoiceField::Category,
                    Category::ALL.iter().map(|c| (c.code(), c.label())).collect(),
                    form.category.code(),
                )) }
                <div class="md:col-span-2">
                    { labeled("Service description", false, html! {
                        <textarea
                            class={INPUT_CLASS}
                            rows="3"
                            value={form.service_desc.clone()}
                            disabled={props.disabled}
                            oninput={{
                                let on_edit = props.on_edit.clone();
                                Callback::from(move |e: InputEvent| {
                                    let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                    on_edit.emit((InvoiceField::ServiceDesc, area.value()));
                                })
                            }}
                        />
                    }) }
                </div>
            }
        </div>
    }
}
