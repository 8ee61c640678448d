use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Window;

use pixelplace_shared::{PackedColor, Pixel};

use crate::error::ClientError;
use crate::events::Events;
use crate::net::{fetch_canvas, fetch_palette, post_pixel, Endpoints};
use crate::reconnect::{ConnectionState, ReconnectPolicy, Supervisor, Transport};
use crate::sse::{PushConnection, PushEvent};

/// Owns the push connection and issues the HTTP requests. Results reach the
/// rest of the client through [`Events`].
pub struct Api {
    window: Window,
    endpoints: Endpoints,
    events: Rc<Events>,
    supervisor: Supervisor,
    connection: RefCell<Option<PushConnection>>,
}

impl Api {
    pub fn new(
        window: Window,
        endpoints: Endpoints,
        policy: ReconnectPolicy,
        events: Rc<Events>,
    ) -> Rc<Self> {
        Rc::new(Self {
            window,
            endpoints,
            events,
            supervisor: Supervisor::new(policy),
            connection: RefCell::new(None),
        })
    }

    pub fn connect(self: &Rc<Self>) -> Result<(), ClientError> {
        self.supervisor.start(self)
    }

    fn handle(self: &Rc<Self>, event: PushEvent) {
        match event {
            PushEvent::Open => self.on_open(),
            PushEvent::Error => {
                self.supervisor.failed(self);
            }
            PushEvent::Message(pixel) => {
                log::debug!("Pixel update {pixel:?}");
                self.events.pixel_updated.emit(&pixel);
            }
        }
    }

    fn on_open(self: &Rc<Self>) {
        log::info!("Connected to {}", self.endpoints.events);
        self.supervisor.opened(self);

        let api = self.clone();
        spawn_local(async move {
            match fetch_canvas(&api.window, &api.endpoints.canvas).await {
                Ok(bitmap) => {
                    api.events.draw_canvas.emit(&bitmap);
                }
                Err(err) => log::error!("Canvas fetch failed: {err}"),
            }
        });
    }

    pub async fn send_pixel(&self, pixel: &Pixel) -> Result<(), ClientError> {
        post_pixel(&self.window, &self.endpoints.pixel, pixel).await
    }

    /// Fetches the palette and publishes it on success.
    pub async fn load_palette(&self) -> Result<Vec<PackedColor>, ClientError> {
        let colors = fetch_palette(&self.window, &self.endpoints.palette).await?;
        log::debug!("Palette loaded with {} colors", colors.len());
        self.events.palette_ready.emit(&colors);
        Ok(colors)
    }
}

impl Transport for Rc<Api> {
    fn connect(&self) -> Result<(), ClientError> {
        let url = self.endpoints.events.as_str();
        log::info!("Connecting to {url}");
        let api = Rc::downgrade(self);
        let connection = PushConnection::open(url, move |event| {
            if let Some(api) = api.upgrade() {
                api.handle(event);
            }
        })?;
        self.connection.replace(Some(connection));
        Ok(())
    }

    fn close(&self) {
        // The handler of this connection may be running, so it is closed
        // here and only dropped on the next connect.
        if let Some(connection) = self.connection.borrow().as_ref() {
            log::warn!("Push connection error, closing {}", connection.url());
            connection.close();
        }
    }

    fn schedule_retry(&self, delay_ms: u32) {
        let api: Weak<Api> = Rc::downgrade(self);
        let onretry = Closure::once_into_js(move || {
            if let Some(api) = api.upgrade() {
                api.supervisor.retry_due(&api);
            }
        });
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(onretry.unchecked_ref(), timeout)
        {
            log::error!("Failed to schedule reconnect: {}", ClientError::from(err));
        }
    }

    fn publish(&self, state: ConnectionState) {
        self.events.connection.emit(&state);
    }
}
