use yew::prelude::*;

use super::icons::icon_filter;
use crate::filters::{ExpenseFilters, FilterField, FilterPanel};
use crate::models::Category;
use crate::ui::popover::{Popover, PopoverContent, PopoverTrigger};

#[derive(Properties, PartialEq)]
pub struct ExpensesFiltersProps {
    pub applied: ExpenseFilters,
    pub on_apply: Callback<ExpenseFilters>,
}

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-input border border-input rounded-lg text-sm text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[function_component(ExpensesFilters)]
pub fn expenses_filters(props: &ExpensesFiltersProps) -> Html {
    let panel = use_state_eq(|| FilterPanel::new(&props.applied));

    {
        let panel = panel.clone();
        use_effect_with_deps(
            move |applied: &ExpenseFilters| {
                let mut next = (*panel).clone();
                next.sync(applied);
                panel.set(next);
                || ()
            },
            props.applied.clone(),
        );
    }

    let on_open_change = {
        let panel = panel.clone();
        Callback::from(move |open: bool| {
            let mut next = (*panel).clone();
            next.open = open;
            panel.set(next);
        })
    };
    let edit = |field: FilterField| {
        let panel = panel.clone();
        Callback::from(move |raw: String| {
            let mut next = (*panel).clone();
            next.edit(field, &raw);
            panel.set(next);
        })
    };
    let input = |kind: &'static str, label: &'static str, field: FilterField| {
        let on_edit = edit(field);
        let oninput = Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_edit.emit(input.value());
        });
        html! {
            <div class="space-y-1">
                <label class="text-xs font-medium text-muted-foreground">{ label }</label>
                <input type={kind} class={INPUT_CLASS} value={panel.draft.field_text(field)} {oninput} />
            </div>
        }
    };

    let on_category = {
        let on_edit = edit(FilterField::Category);
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_edit.emit(select.value());
        })
    };
    let on_apply = {
        let panel = panel.clone();
        let apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*panel).clone();
            let filters = next.apply();
            panel.set(next);
            apply.emit(filters);
        })
    };
    let on_reset = {
        let panel = panel.clone();
        let apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*panel).clone();
            let filters = next.reset();
            panel.set(next);
            apply.emit(filters);
        })
    };

    let active = props.applied.is_active();
    let current_category = panel.draft.category;

    html! {
        <Popover open={Some(panel.open)} {on_open_change}>
            <PopoverTrigger class="inline-flex items-center gap-2 px-3 py-2 rounded-lg border border-border text-sm font-medium hover:bg-muted">
                { icon_filter() }
                {"Filters"}
                if active {
                    <span class="ml-1 rounded-full bg-primary px-2 py-0.5 text-xs text-primary-foreground">{"Active"}</span>
                }
            </PopoverTrigger>
            <PopoverContent class="w-80 space-y-3">
                <div class="grid grid-cols-2 gap-3">
                    { input("date", "From", FilterField::From) }
                    { input("date", "To", FilterField::To) }
                    { input("number", "Min amount", FilterField::Min) }
                    { input("number", "Max amount", FilterField::Max) }
                </div>
                <div class="space-y-1">
                    <label class="text-xs font-medium text-muted-foreground">{"Category"}</label>
                    <select class={INPUT_CLASS} onchange={on_category}>
                        <option value="" selected={current_category.is_none()}>{"All categories"}</option>
                        { for Category::ALL.iter().map(|c| html! {
                            <option value={c.code()} selected={current_category == Some(*c)}>{ c.label() }</option>
                        }) }
                    </select>
                </div>
                { input("text", "Business", FilterField::Business) }
                <div class="flex justify-end gap-2 pt-2">
                    if active {
                        <button type="button" class="px-3 py-2 rounded-lg border border-border text-sm hover:bg-muted" onclick={on_reset}>
                            {"Reset"}
                        </button>
                    }
                    <button type="button" class="px-3 py-2 rounded-lg bg-primary text-primary-foreground text-sm font-semibold hover:opacity-90" onclick={on_apply}>
                        {"Apply"}
                    </button>
                </div>
            </PopoverContent>
        </Popover>
    }
}
