use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, MouseEvent, WheelEvent,
};

use pixelplace_shared::{PackedColor, Pixel};

use crate::api::Api;
use crate::config::ClientConfig;
use crate::dom::{
    cursor_from_event, find_element, get_element, set_status, wheel_from_event, DomSurface,
};
use crate::error::ClientError;
use crate::events::Events;
use crate::net::Endpoints;
use crate::palette::{palette_index_from_event, render_palette, swatches, PaletteModel};
use crate::reconnect::ConnectionState;
use crate::state::CanvasState;

type SharedState = Rc<RefCell<CanvasState<DomSurface>>>;

fn document_ready_state(document: &Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app().map_err(JsValue::from);
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            log::error!("Failed to start: {err}");
            web_sys::console::error_1(&JsValue::from(err));
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), ClientError> {
    let window = web_sys::window().ok_or_else(|| ClientError::Js("Missing window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ClientError::Js("Missing document".to_string()))?;

    let config = ClientConfig::from_window(&window)?;
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Starting pixelplace client against {}", config.base_url);

    let surface = DomSurface::from_document(&document)?;
    let camera_el = surface.camera_element().clone();
    let palette_el: HtmlElement = get_element(&document, "palette")?;
    let deselect_el: Option<HtmlElement> = find_element(&document, "deselect");
    let status_el: Option<Element> = find_element(&document, "status");

    let events = Rc::new(Events::default());
    let state: SharedState = Rc::new(RefCell::new(CanvasState::new(
        surface,
        config.scale_bounds,
        events.clone(),
    )));
    let palette = Rc::new(RefCell::new(PaletteModel::default()));
    let api = Api::new(
        window.clone(),
        Endpoints::new(&config.base_url)?,
        config.reconnect,
        events.clone(),
    );

    wire_canvas_events(&events, &state);
    wire_palette(&document, &events, &palette, &palette_el, deselect_el.as_ref())?;
    wire_network(&events, &api, status_el);
    wire_camera_listeners(&camera_el, &state)?;

    api.connect()?;
    {
        let api = api.clone();
        spawn_local(async move {
            if let Err(err) = api.load_palette().await {
                log::error!("Palette fetch failed: {err}");
            }
        });
    }

    log::debug!("Client ready");
    Ok(())
}

fn wire_canvas_events(events: &Rc<Events>, state: &SharedState) {
    {
        let state = state.clone();
        events.draw_canvas.subscribe(move |bitmap| {
            state.borrow_mut().draw_all_canvas(bitmap);
        });
    }
    {
        let state = state.clone();
        events.pixel_updated.subscribe(move |pixel: &Pixel| {
            state.borrow_mut().paint_pixel(pixel.x, pixel.y, pixel.color);
        });
    }
    {
        let state = state.clone();
        events.color_selected.subscribe(move |color: &PackedColor| {
            state.borrow_mut().set_color(*color);
        });
    }
    {
        let state = state.clone();
        events.color_cleared.subscribe(move |_| {
            state.borrow_mut().hide_px();
        });
    }
}

fn wire_palette(
    document: &Document,
    events: &Rc<Events>,
    palette: &Rc<RefCell<PaletteModel>>,
    palette_el: &HtmlElement,
    deselect_el: Option<&HtmlElement>,
) -> Result<(), ClientError> {
    {
        let document = document.clone();
        let palette = palette.clone();
        let palette_el = palette_el.clone();
        events.palette_ready.subscribe(move |colors: &Vec<PackedColor>| {
            let mut palette = palette.borrow_mut();
            palette.set_colors(colors.clone());
            render_palette(&document, &palette_el, &swatches(palette.colors()), None);
        });
    }

    {
        let document = document.clone();
        let events = events.clone();
        let palette = palette.clone();
        let palette_cb = palette_el.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(index) = palette_index_from_event(&event) else {
                return;
            };
            let mut palette = palette.borrow_mut();
            if palette.activate(index, &events.color_selected).is_some() {
                render_palette(
                    &document,
                    &palette_cb,
                    &swatches(palette.colors()),
                    palette.selected(),
                );
            }
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    if let Some(deselect_el) = deselect_el {
        let document = document.clone();
        let events = events.clone();
        let palette = palette.clone();
        let palette_el = palette_el.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            {
                let mut palette = palette.borrow_mut();
                palette.clear();
                render_palette(&document, &palette_el, &swatches(palette.colors()), None);
            }
            events.color_cleared.emit(&());
        });
        deselect_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    Ok(())
}

fn wire_network(events: &Rc<Events>, api: &Rc<Api>, status_el: Option<Element>) {
    if let Some(status_el) = status_el.clone() {
        events.connection.subscribe(move |connection: &ConnectionState| {
            set_status(&status_el, connection.label(), &connection.message());
        });
    }

    let api = api.clone();
    events.place_pixel.subscribe(move |pixel: &Pixel| {
        let api = api.clone();
        let status_el = status_el.clone();
        let pixel = *pixel;
        spawn_local(async move {
            if let Err(err) = api.send_pixel(&pixel).await {
                log::warn!("Pixel placement failed: {err}");
                if let Some(status_el) = status_el {
                    set_status(&status_el, "error", "Pixel was not placed");
                }
            }
        });
    });
}

fn wire_camera_listeners(camera_el: &HtmlElement, state: &SharedState) -> Result<(), ClientError> {
    {
        let state = state.clone();
        let onmousedown = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            state.borrow_mut().init_pan(&cursor_from_event(&event));
        });
        camera_el.add_event_listener_with_callback(
            "mousedown",
            onmousedown.as_ref().unchecked_ref(),
        )?;
        onmousedown.forget();
    }

    {
        let state = state.clone();
        let onstop = Closure::<dyn FnMut(Event)>::new(move |_| {
            state.borrow_mut().set_dragging(false);
        });
        camera_el.add_event_listener_with_callback("mouseup", onstop.as_ref().unchecked_ref())?;
        camera_el.add_event_listener_with_callback("mouseout", onstop.as_ref().unchecked_ref())?;
        onstop.forget();
    }

    {
        let state = state.clone();
        let onmousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            state.borrow_mut().pan_camera(&cursor_from_event(&event));
        });
        camera_el.add_event_listener_with_callback(
            "mousemove",
            onmousemove.as_ref().unchecked_ref(),
        )?;
        onmousemove.forget();
    }

    {
        let state = state.clone();
        let onwheel = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Ok(wheel_event) = event.dyn_into::<WheelEvent>() else {
                return;
            };
            wheel_event.prevent_default();
            state.borrow_mut().toggle_zoom(&wheel_from_event(&wheel_event));
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        camera_el.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            onwheel.as_ref().unchecked_ref(),
            &options,
        )?;
        onwheel.forget();
    }

    {
        let state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            state.borrow_mut().click_pixel();
        });
        camera_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    Ok(())
}
