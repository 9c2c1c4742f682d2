//! Unit Select Component

use leptos::prelude::*;

use crate::context::FormContext;

/// Options for the unit dropdown. A current value missing from the catalog
/// list is kept so an existing row never loses its unit.
pub fn unit_options(units: &[String], current: &str) -> Vec<String> {
    let mut options = units.to_vec();
    if !current.is_empty() && !options.iter().any(|unit| unit == current) {
        options.insert(0, current.to_string());
    }
    options
}

#[component]
pub fn UnitSelect(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] placeholder: String,
    #[prop(optional, into)] name: Option<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");

    view! {
        <select
            class="form-select form-select-sm"
            name=name
            id=id
            required=required
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            {move || {
                let current = value.get();
                ctx.units.with(|units| unit_options(units, &current))
                    .into_iter()
                    .map(|unit| {
                        let selected = unit == current;
                        let label = unit.clone();
                        view! { <option value=unit selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_unit_kept() {
        let units = vec!["бр.".to_string(), "л".to_string()];
        assert_eq!(unit_options(&units, "л"), units);
        assert_eq!(unit_options(&units, "к-т"), vec!["к-т", "бр.", "л"]);
        assert_eq!(unit_options(&units, ""), units);
        assert_eq!(unit_options(&[], "бр."), vec!["бр."]);
    }
}
