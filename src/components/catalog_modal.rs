//! Catalog Picker Modal
//!
//! Searchable, filterable, paginated stock listing. Picking an entry fills
//! the row the modal was opened for.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_autocomplete::{float_text, ready_query, DEFAULT_DELAY_MS, DEFAULT_MIN_LENGTH};

use crate::api::{self, CatalogQuery};
use crate::components::PaginationNav;
use crate::context::FormContext;
use crate::models::{CatalogItem, CatalogPage};
use crate::money::to_fixed2;
use crate::store::{store_update_row, use_order_store};

/// Columns in the listing, including the select button
const COLUMNS: &str = "7";

/// What the listing body shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListingRows {
    /// Single "nothing found" row
    Placeholder,
    Items(Vec<CatalogItem>),
}

pub fn listing_rows(page: Option<&CatalogPage>) -> ListingRows {
    match page {
        Some(page) if !page.items.is_empty() => ListingRows::Items(page.items.clone()),
        _ => ListingRows::Placeholder,
    }
}

/// Pagination only for a non-empty listing spanning several pages
pub fn shows_pagination(page: Option<&CatalogPage>) -> bool {
    page.is_some_and(|page| !page.items.is_empty() && page.pagination.total_pages > 1)
}

/// Numbers listing requests so only the newest response is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestRequest(u64);

impl LatestRequest {
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn accepts(self, generation: u64) -> bool {
        self.0 == generation
    }
}

#[component]
fn CatalogRow(item: CatalogItem, #[prop(into)] on_select: Callback<CatalogItem>) -> impl IntoView {
    let price = format!("{} лв.", to_fixed2(item.purchase_price));
    let total = format!("{} лв.", to_fixed2(item.total_value));
    let quantity = float_text(item.quantity);
    let article_number = item.article_number.clone();
    let name = item.name.clone();
    let unit = item.unit.clone();

    view! {
        <tr>
            <td>{article_number}</td>
            <td>{name}</td>
            <td>{unit}</td>
            <td>{quantity}</td>
            <td>{price}</td>
            <td>{total}</td>
            <td>
                <button
                    type="button"
                    class="btn btn-sm btn-primary select-sklad-item"
                    on:click=move |_| on_select.run(item.clone())
                >
                    <i class="fas fa-check me-1"></i>
                    "Избери"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn CatalogModal() -> impl IntoView {
    let ctx = use_context::<FormContext>().expect("FormContext should be provided");
    let store = use_order_store();

    let (search, set_search) = signal(String::new());
    let (unit, set_unit) = signal(String::new());
    let (listing, set_listing) = signal::<Option<CatalogPage>>(None);
    let latest = StoredValue::new(LatestRequest::default());
    let debounce = StoredValue::new_local(None::<Timeout>);

    // Only the response to the newest request is shown
    let load = move |page: u32| {
        let query = CatalogQuery::new(page, &search.get_untracked(), &unit.get_untracked());
        let mut request = latest.get_value();
        let current = request.begin();
        latest.set_value(request);
        let base = ctx.endpoints().catalog;
        spawn_local(async move {
            let result = api::fetch_catalog_page(&base, &query).await;
            if !latest.get_value().accepts(current) {
                return;
            }
            match result {
                Ok(page) => set_listing.set(Some(page)),
                Err(e) => web_sys::console::error_1(&format!("[Catalog] Sklad data error: {}", e).into()),
            }
        });
    };

    let is_open = move || ctx.picking_for.with(|row| row.is_some());

    // Every opening starts from the first page
    Effect::new(move |was_open: Option<bool>| {
        let open = is_open();
        if open && was_open != Some(true) {
            load(1);
        }
        open
    });

    let close = move || {
        debounce.set_value(None);
        ctx.close_picker();
    };

    let on_search = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let short = ready_query(&value, DEFAULT_MIN_LENGTH).is_none();
        set_search.set(value);
        if short {
            debounce.set_value(None);
            load(1);
        } else {
            debounce.set_value(Some(Timeout::new(DEFAULT_DELAY_MS, move || load(1))));
        }
    };

    let select = move |item: CatalogItem| {
        if let Some(index) = ctx.picking_for.get_untracked() {
            web_sys::console::log_1(&format!("[Catalog] Row {} <- item {}", index, item.id).into());
            store_update_row(&store, index, |row| row.apply_catalog_item(&item));
        }
        close();
    };


    view! {
        <Show when=is_open>
            <div class="modal fade show" id="skladModal" tabindex="-1" style="display: block;">
                <div class="modal-dialog modal-xl">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">"Избери от склад"</h5>
                            <button type="button" class="btn-close" on:click=move |_| close()></button>
                        </div>
                        <div class="modal-body">
                            <div class="row mb-3">
                                <div class="col-md-6">
                                    <input
                                        type="text"
                                        class="form-control"
                                        id="skladSearch"
                                        placeholder="Търси по артикул или наименование..."
                                        prop:value=move || search.get()
                                        on:input=on_search
                                    />
                                </div>
                                <div class="col-md-4">
                                    <select
                                        class="form-select"
                                        id="skladUnitFilter"
                                        prop:value=move || unit.get()
                                        on:change=move |ev| {
                                            set_unit.set(event_target_value(&ev));
                                            load(1);
                                        }
                                    >
                                        <option value="">"Всички мерни единици"</option>
                                        {move || ctx.units.get().into_iter().map(|u| {
                                            let label = u.clone();
                                            view! { <option value=u>{label}</option> }
                                        }).collect_view()}
                                    </select>
                                </div>
                                <div class="col-md-2">
                                    <button
                                        type="button"
                                        class="btn btn-outline-secondary w-100"
                                        id="skladClearBtn"
                                        on:click=move |_| {
                                            debounce.set_value(None);
                                            set_search.set(String::new());
                                            set_unit.set(String::new());
                                            load(1);
                                        }
                                    >
                                        "Изчисти"
                                    </button>
                                </div>
                            </div>
                            <table class="table table-sm table-hover">
                                <thead>
                                    <tr>
                                        <th>"Артикул №"</th>
                                        <th>"Наименование"</th>
                                        <th>"Мярка"</th>
                                        <th>"Наличност"</th>
                                        <th>"Ед. цена"</th>
                                        <th>"Стойност"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody id="skladTableBody">
                                    {move || match listing.with(|page| listing_rows(page.as_ref())) {
                                        ListingRows::Placeholder => view! {
                                            <tr>
                                                <td colspan=COLUMNS class="text-center text-muted">"Няма намерени артикули"</td>
                                            </tr>
                                        }.into_any(),
                                        ListingRows::Items(items) => items.into_iter().map(|item| {
                                            view! { <CatalogRow item=item on_select=select /> }
                                        }).collect_view().into_any(),
                                    }}
                                </tbody>
                            </table>
                            <Show when=move || listing.with(|page| shows_pagination(page.as_ref()))>
                                <PaginationNav
                                    info=Signal::derive(move || listing.with(|page| page.as_ref().map(|page| page.pagination.clone())))
                                    on_page=move |page: u32| load(page)
                                />
                            </Show>
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop fade show" on:click=move |_| close()></div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageInfo;

    fn item(id: u64) -> CatalogItem {
        CatalogItem {
            id,
            article_number: format!("A-{}", id),
            name: "Масло".to_string(),
            unit: "л".to_string(),
            quantity: 5.0,
            purchase_price: 10.0,
            total_value: 50.0,
        }
    }

    fn page(items: Vec<CatalogItem>, total_pages: u32) -> CatalogPage {
        CatalogPage {
            items,
            pagination: PageInfo { current_page: 1, total_pages, ..Default::default() },
        }
    }

    #[test]
    fn test_empty_result_shows_placeholder_only() {
        let empty = page(Vec::new(), 3);
        assert_eq!(listing_rows(Some(&empty)), ListingRows::Placeholder);
        assert!(!shows_pagination(Some(&empty)));
        assert_eq!(listing_rows(None), ListingRows::Placeholder);
        assert!(!shows_pagination(None));
    }

    #[test]
    fn test_single_page_hides_pagination() {
        let single = page(vec![item(1), item(2)], 1);
        assert_eq!(listing_rows(Some(&single)), ListingRows::Items(vec![item(1), item(2)]));
        assert!(!shows_pagination(Some(&single)));
        assert!(shows_pagination(Some(&page(vec![item(1)], 2))));
    }

    #[test]
    fn test_stale_response_rejected() {
        let mut latest = LatestRequest::default();
        let first = latest.begin();
        let second = latest.begin();
        assert!(!latest.accepts(first));
        assert!(latest.accepts(second));
    }
}
