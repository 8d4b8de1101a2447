use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::{icon_file_text, icon_image, icon_upload};
use super::invoice_fields::FieldEdit;
use super::invoice_preview::InvoicePreview;
use crate::api;
use crate::format::format_file_size;
use crate::notify::{Notifier, Notify};
use crate::upload::{self, SelectedFile, UploadAction, UploadState};

#[derive(Properties, PartialEq)]
pub struct UploadFormProps {
    /// Fired after an expense is saved.
    pub on_success: Callback<()>,
}

#[function_component(UploadForm)]
pub fn upload_form(props: &UploadFormProps) -> Html {
    let state = use_reducer(UploadState::default);
    let dragging = use_state(|| false);
    let notifier = use_context::<Notifier>();
    let file_input = use_node_ref();

    // Picker and drop zone feed the same check.
    let on_file = {
        let state = state.clone();
        let notifier = notifier.clone();
        Callback::from(move |file: web_sys::File| match state.select(SelectedFile::from_browser(file)) {
            Ok(action) => state.dispatch(action),
            Err(err) => notifier.error_with("Invalid file", &err.to_string()),
        })
    };

    let on_change = {
        let on_file = on_file.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file.emit(file);
            }
            input.set_value("");
        })
    };
    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };
    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(false))
    };
    let on_drop = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dragging.set(false);
            let dropped = e.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0));
            if let Some(file) = dropped {
                on_file.emit(file);
            }
        })
    };
    let on_browse = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_upload = {
        let state = state.clone();
        let notifier = notifier.clone();
        Callback::from(move |_: MouseEvent| {
            let UploadState::FileSelected(file) = &*state else {
                return;
            };
            let file = file.clone();
            state.dispatch(UploadAction::UploadStarted);
            let state = state.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                match upload::extract(&api::client(), &file).await {
                    Ok(extracted) => {
                        state.dispatch(UploadAction::Extracted(extracted));
                        notifier.success("Invoice data extracted");
                    }
                    Err(err) => {
                        log::warn!("extraction of {} failed: {}", file.name, err);
                        state.dispatch(UploadAction::UploadFailed);
                        notifier.error_with("Upload failed", &err.to_string());
                    }
                }
            });
        })
    };
    let on_clear = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(UploadAction::ClearFile))
    };

    let on_edit = {
        let state = state.clone();
        Callback::from(move |(field, value): FieldEdit| state.dispatch(UploadAction::Edit(field, value)))
    };
    let on_save = {
        let state = state.clone();
        let notifier = notifier.clone();
        let on_success = props.on_success.clone();
        Callback::from(move |_: ()| {
            let Some(form) = state.form().cloned() else {
                return;
            };
            state.dispatch(UploadAction::SaveStarted);
            let state = state.clone();
            let notifier = notifier.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                match upload::save(&api::client(), &form).await {
                    Ok(_) => {
                        state.dispatch(UploadAction::Saved);
                        notifier.success("Expense saved");
                        on_success.emit(());
                    }
                    Err(err) => {
                        state.dispatch(UploadAction::SaveFailed);
                        notifier.error_with("Could not save the expense", &err.to_string());
                    }
                }
            });
        })
    };
    let on_cancel = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(UploadAction::Cancel))
    };

    match &*state {
        UploadState::Preview { file, form } | UploadState::Saving { file, form } => {
            return html! {
                <InvoicePreview
                    file={file.clone()}
                    form={form.clone()}
                    saving={matches!(&*state, UploadState::Saving { .. })}
                    {on_edit}
                    {on_save}
                    {on_cancel}
                />
            };
        }
        _ => {}
    }

    let uploading = state.is_busy();
    let zone_tone = if *dragging {
        "border-primary bg-primary/5"
    } else {
        "border-border hover:border-primary/60"
    };

    html! {
        <div class="bg-card border border-border rounded-2xl shadow-sm p-6 space-y-6">
            <div>
                <h2 class="text-lg font-semibold text-[#173E63]">{"Upload an invoice"}</h2>
                <p class="text-sm text-muted-foreground">{"PDF, JPG or PNG up to 10 MB. The fields are read automatically."}</p>
            </div>

            if let Some(file) = state.file() {
                <div class="flex items-center justify-between gap-4 rounded-xl border border-border p-4">
                    <div class="flex items-center gap-3">
                        <span class="text-primary">{ if file.is_pdf() { icon_file_text() } else { icon_image() } }</span>
                        <div>
                            <p class="text-sm font-medium text-foreground">{ file.name.clone() }</p>
                            <p class="text-xs text-muted-foreground">{ format_file_size(file.size) }</p>
                        </div>
                    </div>
                    <div class="flex gap-2">
                        <button
                            type="button"
                            class="px-3 py-2 rounded-lg border border-border text-sm hover:bg-muted disabled:opacity-50"
                            disabled={uploading}
                            onclick={on_clear}
                        >
                            {"Choose another file"}
                        </button>
                        <button
                            type="button"
                            class="px-4 py-2 rounded-lg bg-primary text-primary-foreground text-sm font-semibold hover:opacity-90 disabled:opacity-50"
                            disabled={uploading}
                            onclick={on_upload}
                        >
                            { if uploading { "Extracting..." } else { "Upload and extract" } }
                        </button>
                    </div>
                </div>
            } else {
                <div
                    class={classes!("flex", "flex-col", "items-center", "justify-center", "gap-3", "rounded-xl", "border-2", "border-dashed", "p-10", "cursor-pointer", "transition-colors", zone_tone)}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                    onclick={on_browse}
                >
                    <span class="text-muted-foreground">{ icon_upload() }</span>
                    <p class="text-sm font-medium text-foreground">{"Drag a file here or click to browse"}</p>
                </div>
            }
            <input
                type="file"
                class="hidden"
                accept="application/pdf,image/jpeg,image/jpg,image/png"
                ref={file_input}
                onchange={on_change}
            />
        </div>
    }
}
