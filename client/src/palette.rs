#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use pixelplace_shared::PackedColor;

use crate::events::Topic;

#[derive(Clone, Debug, PartialEq)]
pub struct Swatch {
    pub index: usize,
    pub color: PackedColor,
    pub background: String,
    pub label: String,
}

pub fn swatches(colors: &[PackedColor]) -> Vec<Swatch> {
    colors
        .iter()
        .enumerate()
        .map(|(index, color)| {
            let background = color.css();
            Swatch {
                index,
                color: *color,
                label: format!("Use color {background}"),
                background,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct PaletteModel {
    colors: Vec<PackedColor>,
    selected: Option<usize>,
}

impl PaletteModel {
    pub fn colors(&self) -> &[PackedColor] {
        &self.colors
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replaces the colors and drops the selection.
    pub fn set_colors(&mut self, colors: Vec<PackedColor>) {
        self.colors = colors;
        self.selected = None;
    }

    /// Selects `index` and publishes its color.
    pub fn activate(&mut self, index: usize, topic: &Topic<PackedColor>) -> Option<PackedColor> {
        let color = *self.colors.get(index)?;
        self.selected = Some(index);
        topic.emit(&color);
        Some(color)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

pub fn render_palette(
    document: &Document,
    palette_el: &HtmlElement,
    swatches: &[Swatch],
    selected: Option<usize>,
) {
    palette_el.set_inner_html("");
    for swatch in swatches {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-index", &swatch.index.to_string());
        let _ = button.set_attribute("aria-label", &swatch.label);
        let class_name = if selected == Some(swatch.index) {
            "swatch active"
        } else {
            "swatch"
        };
        let _ = button.set_attribute("class", class_name);
        let _ = button.style().set_property("background", &swatch.background);
        let _ = palette_el.append_child(&button);
    }
}

pub fn palette_index_from_event(event: &Event) -> Option<usize> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(index) = element.get_attribute("data-index") {
            return index.parse::<usize>().ok();
        }
        current = element.parent_element();
    }
    None
}
