use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::TOAST_TTL_MS;
use crate::notify::{Notifier, Toast, ToastAction, ToastKind};

struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    fn schedule(millis: i32, callback: impl FnOnce() + 'static) -> Option<Timeout> {
        let window = web_sys::window()?;
        let callback = Closure::<dyn FnMut()>::once(callback);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), millis)
            .ok()?;
        Some(Timeout { handle, _callback: callback })
    }

    fn cancel(self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |id: &u32| {
                let id = *id;
                let timer = Timeout::schedule(TOAST_TTL_MS, move || on_dismiss.emit(id));
                move || {
                    if let Some(timer) = timer {
                        timer.cancel();
                    }
                }
            },
            props.toast.id,
        );
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        Callback::from(move |_| on_dismiss.emit(id))
    };
    let tone = match props.toast.kind {
        ToastKind::Success => "border-green-200 bg-green-50 text-green-800",
        ToastKind::Error => "border-red-200 bg-red-50 text-red-700",
    };

    html! {
        <div class={classes!("w-80", "rounded-xl", "border", "px-4", "py-3", "shadow-lg", "cursor-pointer", tone)} role="status" {onclick}>
            <p class="text-sm font-bold">{ props.toast.title.clone() }</p>
            if let Some(description) = &props.toast.description {
                <p class="text-xs mt-1">{ description.clone() }</p>
            }
        </div>
    }
}

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let notifier = use_context::<Notifier>();
    let Some(notifier) = notifier else {
        return html! {};
    };
    let on_dismiss = {
        let notifier = notifier.clone();
        Callback::from(move |id: u32| notifier.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <div class="fixed top-4 left-1/2 -translate-x-1/2 z-[60] flex flex-col gap-2">
            { for notifier.items.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
            }) }
        </div>
    }
}
