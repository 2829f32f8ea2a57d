use wasm_bindgen::JsCast;
use web_sys as web;
use zen_core::HandIndicator;

/// Update the page's openness gauge (`#hand-fill`) and caption (`#hand-label`).
pub fn show_indicator(document: &web::Document, indicator: &HandIndicator) {
    if let Some(fill) = document
        .get_element_by_id("hand-fill")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        let height = format!("{:.1}%", indicator.fill * 100.0);
        let _ = fill.style().set_property("height", &height);
    }
    if let Some(label) = document.get_element_by_id("hand-label") {
        label.set_text_content(Some(indicator.label.as_str()));
    }
}
