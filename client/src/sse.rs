use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventSource, MessageEvent};

use pixelplace_shared::Pixel;

use crate::net::parse_pixel;

#[derive(Debug)]
pub enum PushEvent {
    Open,
    Error,
    Message(Pixel),
}

/// A server-sent event stream. Closing or dropping it detaches the handlers.
pub struct PushConnection {
    source: EventSource,
    _onopen: Closure<dyn FnMut(Event)>,
    _onerror: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
}

impl PushConnection {
    pub fn open(url: &str, on_event: impl 'static + FnMut(PushEvent)) -> Result<Self, JsValue> {
        let source = EventSource::new(url)?;
        let on_event = Rc::new(RefCell::new(on_event));

        let onopen = {
            let on_event = on_event.clone();
            Closure::<dyn FnMut(Event)>::new(move |_| {
                on_event.borrow_mut()(PushEvent::Open);
            })
        };
        source.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let onerror = {
            let on_event = on_event.clone();
            Closure::<dyn FnMut(Event)>::new(move |_| {
                on_event.borrow_mut()(PushEvent::Error);
            })
        };
        source.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let onmessage = {
            let on_event = on_event.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    log::error!("SSE message data is not a string");
                    return;
                };
                match parse_pixel(&text) {
                    Ok(pixel) => on_event.borrow_mut()(PushEvent::Message(pixel)),
                    Err(error) => {
                        let snippet = if text.len() <= 200 {
                            text
                        } else {
                            format!("{}...", text.chars().take(200).collect::<String>())
                        };
                        log::error!("SSE message parse error: {error} payload={snippet:?}");
                    }
                }
            })
        };
        source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        Ok(Self {
            source,
            _onopen: onopen,
            _onerror: onerror,
            _onmessage: onmessage,
        })
    }

    pub fn url(&self) -> String {
        self.source.url()
    }

    pub fn close(&self) {
        self.source.close();
    }
}

impl Drop for PushConnection {
    fn drop(&mut self) {
        self.source.close();
        self.source.set_onopen(None);
        self.source.set_onerror(None);
        self.source.set_onmessage(None);
    }
}
