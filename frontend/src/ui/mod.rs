pub mod dialog;
pub mod dropdown;
pub mod popover;
pub mod toaster;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Open flag plus its setter, shared with a primitive's parts through context.
#[derive(Clone, PartialEq)]
pub struct OpenState {
    pub open: bool,
    pub set_open: Callback<bool>,
}

impl OpenState {
    pub fn close(&self) {
        self.set_open.emit(false);
    }

    pub fn toggle(&self) {
        self.set_open.emit(!self.open);
    }
}

/// A controlled flag wins over the internal one.
pub fn resolve_open(controlled: Option<bool>, internal: bool) -> bool {
    controlled.unwrap_or(internal)
}

#[hook]
pub fn use_open_state(controlled: Option<bool>, on_open_change: Option<Callback<bool>>) -> OpenState {
    let internal = use_state(|| false);
    let open = resolve_open(controlled, *internal);
    let set_open = match on_open_change {
        Some(callback) => callback,
        None => {
            let internal = internal.clone();
            Callback::from(move |next: bool| internal.set(next))
        }
    };
    OpenState { open, set_open }
}

struct DocumentListener {
    document: web_sys::Document,
    closure: Closure<dyn Fn(web_sys::MouseEvent)>,
}

impl DocumentListener {
    fn remove(self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mousedown", self.closure.as_ref().unchecked_ref());
    }
}

fn listen_outside(region: NodeRef, on_outside: Callback<()>) -> Option<DocumentListener> {
    let document = web_sys::window()?.document()?;
    let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |event: web_sys::MouseEvent| {
        let target = event.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let inside = match (region.get(), target) {
            (Some(region), Some(target)) => region.contains(Some(&target)),
            _ => false,
        };
        if !inside {
            on_outside.emit(());
        }
    });
    document
        .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
        .ok()?;
    Some(DocumentListener { document, closure })
}

/// Calls `on_outside` for every mouse press outside `region` while `active`.
#[hook]
pub fn use_outside_click(region: NodeRef, active: bool, on_outside: Callback<()>) {
    use_effect_with_deps(
        move |(active, on_outside): &(bool, Callback<()>)| {
            let listener = if *active { listen_outside(region, on_outside.clone()) } else { None };
            move || {
                if let Some(listener) = listener {
                    listener.remove();
                }
            }
        },
        (active, on_outside),
    );
}

fn set_body_overflow(value: &str) {
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", value);
    }
}

/// Suppresses page scrolling while `locked`.
#[hook]
pub fn use_scroll_lock(locked: bool) {
    use_effect_with_deps(
        |locked: &bool| {
            set_body_overflow(if *locked { "hidden" } else { "" });
            || set_body_overflow("")
        },
        locked,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controlled_flag_overrides_internal_state() {
        assert!(resolve_open(Some(true), false));
        assert!(!resolve_open(Some(false), true));
        assert!(resolve_open(None, true));
    }
}
