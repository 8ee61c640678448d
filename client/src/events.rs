//! Typed publish/subscribe hub connecting the camera, palette and network
//! code.
//!
//! Every topic carries one payload type and may have any number of
//! subscribers. Handlers run synchronously on `emit`, in subscription order.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pixelplace_shared::{CanvasBitmap, PackedColor, Pixel};

use crate::reconnect::ConnectionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Rc<RefCell<dyn FnMut(&T)>>;

pub struct Topic<T> {
    name: &'static str,
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Topic<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: Handler<T> = Rc::new(RefCell::new(handler));
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers `value` to the subscribers registered when the call starts.
    /// Returns how many handlers ran.
    pub fn emit(&self, value: &T) -> usize {
        let snapshot: Vec<(SubscriptionId, Handler<T>)> = self
            .handlers
            .borrow()
            .iter()
            .map(|(id, handler)| (*id, handler.clone()))
            .collect();
        let mut delivered = 0;
        for (id, handler) in snapshot {
            let still_subscribed = self
                .handlers
                .borrow()
                .iter()
                .any(|(existing, _)| *existing == id);
            if !still_subscribed {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    handler(value);
                    delivered += 1;
                }
                Err(_) => {
                    log::warn!("Skipping re-entrant handler on topic {}", self.name);
                }
            }
        }
        delivered
    }
}

pub struct Events {
    pub draw_canvas: Topic<CanvasBitmap>,
    pub pixel_updated: Topic<Pixel>,
    pub palette_ready: Topic<Vec<PackedColor>>,
    pub color_selected: Topic<PackedColor>,
    pub color_cleared: Topic<()>,
    pub place_pixel: Topic<Pixel>,
    pub connection: Topic<ConnectionState>,
}

impl Default for Events {
    fn default() -> Self {
        Self {
            draw_canvas: Topic::new("draw_canvas"),
            pixel_updated: Topic::new("pixel_updated"),
            palette_ready: Topic::new("palette_ready"),
            color_selected: Topic::new("color_selected"),
            color_cleared: Topic::new("color_cleared"),
            place_pixel: Topic::new("place_pixel"),
            connection: Topic::new("connection"),
        }
    }
}
