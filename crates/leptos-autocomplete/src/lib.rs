//! Leptos Autocomplete
//!
//! Debounced search-as-you-type suggestions for text inputs.
//! Attaches to any `<input>`: ones rendered by Leptos (`use_autocomplete`)
//! and plain server-rendered ones (`Autocomplete::attach`).
//! The widget owns its listeners and removes them on drop.

mod record;
mod state;
mod url;

pub use record::{field_text, float_text, suggestion_label, value_text};
pub use state::{ready_query, InputAction, KeyOutcome, NavKey, SuggestState};
pub use url::{encode_component, with_query};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Queries shorter than this (after trimming) never hit the server
pub const DEFAULT_MIN_LENGTH: usize = 2;
/// Debounce window between the last keystroke and the request
pub const DEFAULT_DELAY_MS: u32 = 300;
/// How long the list survives a blur, so a click on it still lands
pub const DEFAULT_BLUR_GRACE_MS: u32 = 150;

const LIST_CLASS: &str = "autocomplete-suggestions";
const ITEM_CLASS: &str = "autocomplete-item";

#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteOptions {
    pub min_length: usize,
    pub delay_ms: u32,
    pub blur_grace_ms: u32,
    /// Suggestion endpoint, queried with `q` (and `field` when `send_field`)
    pub api_url: String,
    /// Record field copied into the input on selection
    pub field: String,
    pub send_field: bool,
}

impl AutocompleteOptions {
    pub fn new(api_url: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            delay_ms: DEFAULT_DELAY_MS,
            blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
            api_url: api_url.into(),
            field: field.into(),
            send_field: true,
        }
    }

    /// Domain endpoints that only understand `q`
    pub fn without_field_param(mut self) -> Self {
        self.send_field = false;
        self
    }

    pub fn request_url(&self, query: &str) -> String {
        if self.send_field {
            with_query(&self.api_url, &[("q", query), ("field", self.field.as_str())])
        } else {
            with_query(&self.api_url, &[("q", query)])
        }
    }
}

#[derive(Deserialize)]
struct SuggestionsBody {
    #[serde(default)]
    suggestions: Vec<Value>,
}

async fn fetch_suggestions(url: &str) -> Result<Vec<Value>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    let text = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
    let body: SuggestionsBody =
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(body.suggestions)
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Event listener removed again when dropped
struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn add<F>(target: &web_sys::EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

struct Widget {
    this: Weak<Widget>,
    options: AutocompleteOptions,
    input: web_sys::HtmlInputElement,
    list: web_sys::HtmlElement,
    state: RefCell<SuggestState>,
    debounce: RefCell<Option<Timeout>>,
    blur: RefCell<Option<Timeout>>,
    on_select: Box<dyn Fn(Value)>,
}

impl Widget {
    fn handle_input(&self) {
        let action = self.state.borrow_mut().on_input(&self.input.value(), self.options.min_length);
        match action {
            InputAction::Close => {
                self.debounce.borrow_mut().take();
                self.render();
            }
            InputAction::Schedule(query) => {
                let this = self.this.clone();
                let timeout = Timeout::new(self.options.delay_ms, move || {
                    if let Some(widget) = this.upgrade() {
                        widget.search(query);
                    }
                });
                // Replacing the old timeout cancels it
                *self.debounce.borrow_mut() = Some(timeout);
            }
        }
    }

    fn handle_focus(&self) {
        self.blur.borrow_mut().take();
        if let Some(query) = ready_query(&self.input.value(), self.options.min_length) {
            self.debounce.borrow_mut().take();
            self.search(query);
        }
    }

    fn handle_blur(&self) {
        let this = self.this.clone();
        let timeout = Timeout::new(self.options.blur_grace_ms, move || {
            if let Some(widget) = this.upgrade() {
                widget.debounce.borrow_mut().take();
                widget.state.borrow_mut().close();
                widget.render();
            }
        });
        *self.blur.borrow_mut() = Some(timeout);
    }

    fn handle_keydown(&self, event: &web_sys::KeyboardEvent) {
        let Some(key) = NavKey::from_key(&event.key()) else {
            return;
        };
        let outcome = self.state.borrow_mut().key(key);
        if outcome.prevents_default() {
            event.prevent_default();
        }
        match outcome {
            KeyOutcome::Ignored | KeyOutcome::Held => {}
            KeyOutcome::Highlight | KeyOutcome::Closed => self.render(),
            KeyOutcome::Commit(record) => self.commit(record),
        }
    }

    fn handle_pointer_down(&self, event: &web_sys::Event) {
        // Keep focus in the input so blur doesn't race the selection
        event.prevent_default();
        let Some(index) = item_index(event) else {
            return;
        };
        let record = self.state.borrow_mut().take(index);
        if let Some(record) = record {
            self.commit(record);
        }
    }

    fn handle_hover(&self, event: &web_sys::Event) {
        let Some(index) = item_index(event) else {
            return;
        };
        let changed = self.state.borrow_mut().hover(index);
        if changed {
            self.render();
        }
    }

    fn search(&self, query: String) {
        let generation = self.state.borrow_mut().begin_request();
        let url = self.options.request_url(&query);
        let this = self.this.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_suggestions(&url).await;
            let Some(widget) = this.upgrade() else {
                return;
            };
            let changed = match result {
                Ok(suggestions) => widget.state.borrow_mut().apply_results(generation, suggestions),
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[Autocomplete] Search error for {}: {}", url, describe(&err)).into(),
                    );
                    widget.state.borrow_mut().fail(generation)
                }
            };
            if changed {
                widget.render();
            }
        });
    }

    /// State is already closed; copy the field, redraw, notify
    fn commit(&self, record: Value) {
        self.input.set_value(&field_text(&record, &self.options.field));
        self.render();
        (self.on_select)(record);
    }

    fn render(&self) {
        let state = self.state.borrow();
        self.list.set_inner_html("");
        if !state.is_open() {
            let _ = self.list.style().set_property("display", "none");
            return;
        }
        let Some(document) = self.list.owner_document() else {
            return;
        };
        for (index, record) in state.suggestions().iter().enumerate() {
            let highlighted = state.highlighted() == Some(index);
            if let Err(err) = self.append_item(&document, index, record, highlighted) {
                web_sys::console::error_1(
                    &format!("[Autocomplete] Render error: {}", describe(&err)).into(),
                );
            }
        }
        let _ = self.list.style().set_property("display", "block");
    }

    fn append_item(
        &self,
        document: &web_sys::Document,
        index: usize,
        record: &Value,
        highlighted: bool,
    ) -> Result<(), JsValue> {
        let item = document.create_element("div")?;
        item.set_class_name(if highlighted { "autocomplete-item selected" } else { ITEM_CLASS });
        item.set_attribute("data-index", &index.to_string())?;

        // Text only: server data never goes through innerHTML
        let (primary, secondary) = suggestion_label(record, &self.options.field);
        let main = document.create_element("div")?;
        main.set_class_name("autocomplete-primary");
        main.set_text_content(Some(&primary));
        item.append_child(&main)?;
        if let Some(secondary) = secondary {
            let detail = document.create_element("div")?;
            detail.set_class_name("autocomplete-secondary");
            detail.set_text_content(Some(&secondary));
            item.append_child(&detail)?;
        }

        self.list.append_child(&item)?;
        Ok(())
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.list.remove();
    }
}

fn item_index(event: &web_sys::Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    let item = target.closest(&format!(".{}", ITEM_CLASS)).ok()??;
    item.get_attribute("data-index")?.parse().ok()
}

fn listen<F>(
    widget: &Rc<Widget>,
    target: &web_sys::EventTarget,
    kind: &'static str,
    handler: F,
) -> Result<Listener, JsValue>
where
    F: Fn(&Widget, web_sys::Event) + 'static,
{
    let this = Rc::downgrade(widget);
    Listener::add(target, kind, move |event| {
        if let Some(widget) = this.upgrade() {
            handler(&widget, event);
        }
    })
}

/// Suggestion dropdown bound to one input.
///
/// Dropping it detaches every listener, cancels pending timers and removes
/// the list element.
pub struct Autocomplete {
    widget: Rc<Widget>,
    _listeners: Vec<Listener>,
}

impl Autocomplete {
    pub fn attach<F>(
        input: web_sys::HtmlInputElement,
        options: AutocompleteOptions,
        on_select: F,
    ) -> Result<Self, JsValue>
    where
        F: Fn(Value) + 'static,
    {
        let document = input
            .owner_document()
            .ok_or_else(|| JsValue::from_str("input has no owner document"))?;
        let list: web_sys::HtmlElement = document.create_element("div")?.dyn_into()?;
        list.set_class_name(LIST_CLASS);
        list.style().set_property("display", "none")?;
        match input.parent_node() {
            Some(parent) => {
                parent.insert_before(&list, input.next_sibling().as_ref())?;
            }
            None => {
                document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?
                    .append_child(&list)?;
            }
        }
        let _ = input.set_attribute("autocomplete", "off");

        let widget = Rc::new_cyclic(|this| Widget {
            this: this.clone(),
            options,
            input: input.clone(),
            list: list.clone(),
            state: RefCell::new(SuggestState::new()),
            debounce: RefCell::new(None),
            blur: RefCell::new(None),
            on_select: Box::new(on_select),
        });

        let listeners = vec![
            listen(&widget, &input, "input", |w, _| w.handle_input())?,
            listen(&widget, &input, "keydown", |w, event| {
                if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                    w.handle_keydown(event);
                }
            })?,
            listen(&widget, &input, "focus", |w, _| w.handle_focus())?,
            listen(&widget, &input, "blur", |w, _| w.handle_blur())?,
            listen(&widget, &list, "mousedown", |w, event| w.handle_pointer_down(&event))?,
            listen(&widget, &list, "mouseover", |w, event| w.handle_hover(&event))?,
        ];

        Ok(Self { widget, _listeners: listeners })
    }

    /// Keep the widget alive for the rest of the page
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        self.widget.debounce.borrow_mut().take();
        self.widget.blur.borrow_mut().take();
    }
}

/// Attach an autocomplete to a Leptos-rendered input once it mounts.
/// The widget is torn down with the calling component.
pub fn use_autocomplete<F>(
    input_ref: NodeRef<leptos::html::Input>,
    options: AutocompleteOptions,
    on_select: F,
) where
    F: Fn(Value) + 'static,
{
    let handle = StoredValue::new_local(None::<Autocomplete>);
    let mut pending = Some((options, on_select));
    Effect::new(move |_| {
        let Some(input) = input_ref.get() else {
            return;
        };
        if let Some((options, on_select)) = pending.take() {
            match Autocomplete::attach(input, options, on_select) {
                Ok(widget) => handle.set_value(Some(widget)),
                Err(err) => web_sys::console::error_1(
                    &format!("[Autocomplete] Attach error: {}", describe(&err)).into(),
                ),
            }
        }
    });
}
