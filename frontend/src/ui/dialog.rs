use yew::prelude::*;

use super::{use_open_state, use_scroll_lock, OpenState};
use crate::components::icons::icon_x;

#[derive(Clone, PartialEq)]
struct DialogContext(OpenState);

#[derive(Properties, PartialEq)]
pub struct DialogProps {
    #[prop_or_default]
    pub open: Option<bool>,
    #[prop_or_default]
    pub on_open_change: Option<Callback<bool>>,
    pub children: Children,
}

#[function_component(Dialog)]
pub fn dialog(props: &DialogProps) -> Html {
    let state = use_open_state(props.open, props.on_open_change.clone());
    use_scroll_lock(state.open);

    html! {
        <ContextProvider<DialogContext> context={DialogContext(state)}>
            { for props.children.iter() }
        </ContextProvider<DialogContext>>
    }
}

#[derive(Properties, PartialEq)]
pub struct DialogContentProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

#[function_component(DialogContent)]
pub fn dialog_content(props: &DialogContentProps) -> Html {
    let context = use_context::<DialogContext>();
    let Some(DialogContext(state)) = context else {
        log::error!("DialogContent rendered outside a Dialog");
        return html! {};
    };
    if !state.open {
        return html! {};
    }

    let on_backdrop = {
        let state = state.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                state.close();
            }
        })
    };
    let on_close = {
        let state = state.clone();
        Callback::from(move |_| state.close())
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center" onclick={on_backdrop}>
            <div class="fixed inset-0 bg-black/50 pointer-events-none"></div>
            <div
                class={classes!("relative", "z-50", "w-full", "max-w-lg", "max-h-[90vh]", "overflow-y-auto", "bg-white", "rounded-[10px]", "shadow-lg", "border", "border-border", "p-6", props.class.clone())}
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <button type="button" class="absolute right-4 top-4 h-6 w-6 rounded-sm opacity-70 hover:opacity-100" aria-label="Close" onclick={on_close}>
                    { icon_x() }
                </button>
                { for props.children.iter() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DialogHeaderProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
}

#[function_component(DialogHeader)]
pub fn dialog_header(props: &DialogHeaderProps) -> Html {
    html! {
        <div class="flex flex-col space-y-1.5 mb-4">
            <h2 class="text-lg font-semibold leading-none tracking-tight text-[#173E63]">{ props.title.clone() }</h2>
            if let Some(description) = &props.description {
                <p class="text-sm text-muted-foreground">{ description.clone() }</p>
            }
        </div>
    }
}
