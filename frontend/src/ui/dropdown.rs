use yew::prelude::*;

use super::{use_open_state, use_outside_click, OpenState};

#[derive(Clone, PartialEq)]
struct DropdownContext(OpenState);

#[derive(Properties, PartialEq)]
pub struct DropdownMenuProps {
    pub children: Children,
}

#[function_component(DropdownMenu)]
pub fn dropdown_menu(props: &DropdownMenuProps) -> Html {
    let state = use_open_state(None, None);
    let region = use_node_ref();
    let on_outside = {
        let state = state.clone();
        Callback::from(move |_| state.close())
    };
    use_outside_click(region.clone(), state.open, on_outside);

    html! {
        <ContextProvider<DropdownContext> context={DropdownContext(state)}>
            <div class="relative inline-block" ref={region}>
                { for props.children.iter() }
            </div>
        </ContextProvider<DropdownContext>>
    }
}

#[derive(Properties, PartialEq)]
pub struct DropdownMenuTriggerProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    pub children: Children,
}

#[function_component(DropdownMenuTrigger)]
pub fn dropdown_menu_trigger(props: &DropdownMenuTriggerProps) -> Html {
    let state = use_context::<DropdownContext>().map(|DropdownContext(state)| state);
    let onclick = Callback::from(move |_| {
        if let Some(state) = &state {
            state.toggle();
        }
    });

    html! {
        <button
            type="button"
            class={classes!("inline-flex", "items-center", "justify-center", "rounded-md", "transition-colors", "hover:bg-muted", "disabled:pointer-events-none", "disabled:opacity-50", props.class.clone())}
            aria-label={props.label.clone()}
            disabled={props.disabled}
            {onclick}
        >
            { for props.children.iter() }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct DropdownMenuContentProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

/// Anchored to the trigger's right edge.
#[function_component(DropdownMenuContent)]
pub fn dropdown_menu_content(props: &DropdownMenuContentProps) -> Html {
    let open = use_context::<DropdownContext>().map_or(false, |DropdownContext(state)| state.open);
    if !open {
        return html! {};
    }
    html! {
        <div class={classes!("absolute", "z-50", "mt-1", "min-w-[8rem]", "overflow-hidden", "rounded-md", "border", "border-border", "bg-white", "p-1", "shadow-md", "right-0", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DropdownMenuItemProps {
    pub onclick: Callback<()>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub destructive: bool,
    pub children: Children,
}

/// Closes the menu, then runs `onclick`.
#[function_component(DropdownMenuItem)]
pub fn dropdown_menu_item(props: &DropdownMenuItemProps) -> Html {
    let state = use_context::<DropdownContext>().map(|DropdownContext(state)| state);
    let onclick = {
        let action = props.onclick.clone();
        Callback::from(move |_| {
            if let Some(state) = &state {
                state.close();
            }
            action.emit(());
        })
    };
    let tone = if props.destructive { "text-red-600" } else { "text-foreground" };

    html! {
        <button
            type="button"
            class={classes!("relative", "flex", "w-full", "cursor-pointer", "select-none", "items-center", "gap-2", "rounded-sm", "px-2", "py-1.5", "text-sm", "hover:bg-slate-100", "disabled:opacity-50", tone)}
            disabled={props.disabled}
            {onclick}
        >
            { for props.children.iter() }
        </button>
    }
}
