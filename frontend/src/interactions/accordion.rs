use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::HtmlDetailsElement;

use crate::dom;
use crate::error::FxError;
use crate::init::Page;

/// Items to close after `toggled` changed state. Empty unless it was just opened.
pub fn items_to_close(open: &[bool], toggled: usize) -> Vec<usize> {
    if !open.get(toggled).copied().unwrap_or(false) {
        return Vec::new();
    }
    open.iter()
        .enumerate()
        .filter(|&(index, &is_open)| index != toggled && is_open)
        .map(|(index, _)| index)
        .collect()
}

pub fn install(page: &Page) -> Result<(), FxError> {
    let items: Rc<Vec<HtmlDetailsElement>> = Rc::new(
        dom::query_all(&page.document, &page.config.accordion.selector)?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlDetailsElement>().ok())
            .collect(),
    );
    debug!("Accordion over {} item(s)", items.len());

    for (index, item) in items.iter().enumerate() {
        let group = items.clone();
        dom::listen(item, "toggle", false, move |_| {
            let open: Vec<bool> = group.iter().map(|item| item.open()).collect();
            for other in items_to_close(&open, index) {
                group[other].set_open(false);
            }
        })?;
    }
    Ok(())
}
