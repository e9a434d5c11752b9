//! Tender client WASM
//!
//! WebAssembly bindings for the page scripts. Field checks, the search filter
//! and grid metrics run the same Rust code as the native client; the page only
//! reads the returned state and applies it to the DOM.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tender_forms::{
    evaluate_search, FieldKind, ItemCollection, LayoutMetrics, SearchBox, SearchOutcome,
    ValidationRules,
};
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Field check result handed to JavaScript
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldCheck {
    pub valid: bool,
    /// Text for the annotation below the field; empty when valid
    pub message: String,
}

/// Per-item rendering state after a search
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ItemState {
    pub dimmed: bool,
    pub opacity: f32,
    pub scale: f32,
}

/// Everything the page needs to render one search evaluation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRender {
    pub outcome: SearchOutcome,
    pub items: Vec<ItemState>,
    /// "Showing N of M ..." text, `None` when the panel is hidden
    pub summary: Option<String>,
}

/// Grid metrics for the page's stylesheet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridStyle {
    pub grid_template_columns: String,
    pub gap: String,
    pub card_padding: String,
}

fn kind_from_js(kind: &str) -> FieldKind {
    match kind.trim().to_ascii_lowercase().as_str() {
        "textarea" => FieldKind::TextArea,
        other => FieldKind::from_html("input", Some(other)),
    }
}

fn check_field(value: &str, kind: &str, required: bool, min_length: Option<usize>) -> FieldCheck {
    let mut rules = ValidationRules::default();
    if let Some(min) = min_length {
        rules.description_min_length = min;
    }
    let result = rules.evaluate(value, kind_from_js(kind), required);
    FieldCheck {
        valid: result.valid,
        message: result.message_or_empty().to_string(),
    }
}

fn render(outcome: SearchOutcome, items: Option<&ItemCollection>) -> SearchRender {
    let (items, summary) = match items {
        Some(collection) => (
            collection
                .items()
                .iter()
                .map(|item| {
                    let emphasis = item.visibility().emphasis();
                    ItemState {
                        dimmed: item.is_dimmed(),
                        opacity: emphasis.opacity,
                        scale: emphasis.scale,
                    }
                })
                .collect(),
            collection
                .panel()
                .and_then(|p| p.summary())
                .map(|s| s.message()),
        ),
        None => (Vec::new(), None),
    };
    SearchRender {
        outcome,
        items,
        summary,
    }
}

fn grid_style(width: u32) -> GridStyle {
    let metrics = LayoutMetrics::for_width(width);
    GridStyle {
        grid_template_columns: metrics.columns.template(),
        gap: format!("{}rem", metrics.gap_rem),
        card_padding: format!("{}rem", metrics.card_padding_rem),
    }
}

fn millis(now_ms: f64) -> Duration {
    Duration::from_millis(now_ms.max(0.0) as u64)
}

/// Validate one field value
///
/// `kind` is the input `type` (`"email"`, `"date"`, ...) or `"textarea"`.
///
/// # Example (JavaScript)
/// ```javascript
/// const { valid, message } = validateField(input.value, input.type, input.required);
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(
    value: &str,
    kind: &str,
    required: bool,
    min_length: Option<usize>,
) -> Result<JsValue, JsValue> {
    let check = check_field(value, kind, required, min_length);
    Ok(serde_wasm_bindgen::to_value(&check)?)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    tender_validation::is_valid_email(email)
}

/// Quick date validation (`YYYY-MM-DD`)
#[wasm_bindgen(js_name = isValidDate)]
pub fn is_valid_date_js(date: &str) -> bool {
    tender_validation::is_valid_date(date)
}

/// One-shot filter over item texts, without debounce
#[wasm_bindgen(js_name = filterItems)]
pub fn filter_items(query: &str, texts: Vec<String>) -> Result<JsValue, JsValue> {
    let mut items = ItemCollection::new(texts);
    let outcome = evaluate_search(query, Some(&mut items));
    Ok(serde_wasm_bindgen::to_value(&render(outcome, Some(&items)))?)
}

/// Grid metrics for a viewport width
#[wasm_bindgen(js_name = layoutFor)]
pub fn layout_for(width: u32) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(&grid_style(width))?)
}

/// Debounced search bound to the page's item grid
///
/// The page feeds keystrokes with `input` and calls `poll` from a timer
/// scheduled at `deadline()`. Timestamps are `performance.now()` values.
#[wasm_bindgen]
pub struct SearchController {
    search: SearchBox,
    items: Option<ItemCollection>,
}

#[wasm_bindgen]
impl SearchController {
    #[wasm_bindgen(constructor)]
    pub fn new(debounce_ms: Option<u32>) -> SearchController {
        let search = match debounce_ms {
            Some(ms) => SearchBox::new(Duration::from_millis(u64::from(ms))),
            None => SearchBox::default(),
        };
        SearchController {
            search,
            items: None,
        }
    }

    /// Register the grid's item texts in display order
    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&mut self, texts: Vec<String>) {
        self.items = Some(ItemCollection::new(texts));
    }

    /// The page has no grid (for example, after navigation)
    #[wasm_bindgen(js_name = clearItems)]
    pub fn clear_items(&mut self) {
        self.items = None;
    }

    pub fn input(&mut self, query: &str, now_ms: f64) {
        self.search.on_input(query, millis(now_ms));
    }

    /// When the pending query settles, in milliseconds
    pub fn deadline(&self) -> Option<f64> {
        self.search.deadline().map(|d| d.as_millis() as f64)
    }

    /// Render state if a query settled, `undefined` otherwise
    pub fn poll(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        match self.poll_render(now_ms) {
            Some(render) => Ok(serde_wasm_bindgen::to_value(&render)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

impl SearchController {
    fn poll_render(&mut self, now_ms: f64) -> Option<SearchRender> {
        let outcome = self.search.poll(millis(now_ms), self.items.as_mut())?;
        #[cfg(target_arch = "wasm32")]
        if let SearchOutcome::Filtered(summary) = &outcome {
            web_sys::console::debug_1(&JsValue::from_str(&summary.message()));
        }
        Some(render(outcome, self.items.as_ref()))
    }
}
