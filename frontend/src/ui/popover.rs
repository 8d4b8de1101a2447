use yew::prelude::*;

use super::{use_open_state, use_outside_click, OpenState};

#[derive(Clone, PartialEq)]
struct PopoverContext(OpenState);

#[derive(Properties, PartialEq)]
pub struct PopoverProps {
    #[prop_or_default]
    pub open: Option<bool>,
    #[prop_or_default]
    pub on_open_change: Option<Callback<bool>>,
    pub children: Children,
}

/// The trigger and the content share one region, so pressing either never counts as outside.
#[function_component(Popover)]
pub fn popover(props: &PopoverProps) -> Html {
    let state = use_open_state(props.open, props.on_open_change.clone());
    let region = use_node_ref();
    let on_outside = {
        let state = state.clone();
        Callback::from(move |_| state.close())
    };
    use_outside_click(region.clone(), state.open, on_outside);

    html! {
        <ContextProvider<PopoverContext> context={PopoverContext(state)}>
            <div class="relative inline-block" ref={region}>
                { for props.children.iter() }
            </div>
        </ContextProvider<PopoverContext>>
    }
}

#[derive(Properties, PartialEq)]
pub struct PopoverTriggerProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

#[function_component(PopoverTrigger)]
pub fn popover_trigger(props: &PopoverTriggerProps) -> Html {
    let state = use_context::<PopoverContext>().map(|PopoverContext(state)| state);
    let onclick = Callback::from(move |e: MouseEvent| {
        e.stop_propagation();
        if let Some(state) = &state {
            state.toggle();
        }
    });

    html! {
        <button type="button" class={props.class.clone()} {onclick}>
            { for props.children.iter() }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct PopoverContentProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

#[function_component(PopoverContent)]
pub fn popover_content(props: &PopoverContentProps) -> Html {
    let open = use_context::<PopoverContext>().map_or(false, |PopoverContext(state)| state.open);
    if !open {
        return html! {};
    }

    html! {
        <div class={classes!("absolute", "left-0", "z-50", "mt-2", "rounded-[10px]", "border", "border-border", "bg-white", "p-4", "shadow-lg", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}
