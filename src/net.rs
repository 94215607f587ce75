//! WebSocket link to the game server.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, MessageEvent, WebSocket};
use yew::Callback;

use crate::protocol::{Request, ServerEvent};
use crate::rust_error;
use crate::state::Connection;
use crate::util::{JsResult, clog, cwarn, js_error_text};

/// Requests written before the socket finished opening, oldest first.
#[derive(Debug, Default)]
pub struct Outbox {
    queued: Vec<String>,
}

impl Outbox {
    pub fn push(&mut self, text: String) {
        self.queued.push(text);
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.queued)
    }
}

pub struct ServerConnection {
    socket: WebSocket,
    outbox: Rc<RefCell<Outbox>>,
    _on_open: Closure<dyn FnMut()>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl ServerConnection {
    /// Connects to `url`. Decoded events go to `on_event`, socket state
    /// changes to `on_status`.
    pub fn open(url: &str, on_event: Callback<ServerEvent>, on_status: Callback<Connection>) -> JsResult<Self> {
        let socket = WebSocket::new(url)?;
        let outbox = Rc::new(RefCell::new(Outbox::default()));

        let on_open = {
            let socket = socket.clone();
            let on_status = on_status.clone();
            let outbox = outbox.clone();
            Closure::wrap(Box::new(move || {
                on_status.emit(Connection::Open);
                let queued = outbox.borrow_mut().drain();
                for text in queued {
                    if let Err(e) = socket.send_with_str(&text) {
                        cwarn(&format!("send failed: {}", js_error_text(&e)));
                    }
                }
            }) as Box<dyn FnMut()>)
        };
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            let Some(text) = e.data().as_string() else {
                cwarn("ignoring non-text server message");
                return;
            };
            match ServerEvent::parse(&text) {
                Ok(event) => on_event.emit(event),
                Err(err) => cwarn(&err.to_string()),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            clog(&format!("socket closed with code {}", e.code()));
            on_status.emit(Connection::Closed);
        }) as Box<dyn FnMut(CloseEvent)>);
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(Self { socket, outbox, _on_open: on_open, _on_message: on_message, _on_close: on_close })
    }

    /// Sends `request` now, or once the socket opens.
    pub fn send(&self, request: &Request) -> JsResult<()> {
        let text = request.to_json().map_err(|e| rust_error!("could not encode {}: {}", request.action, e))?;
        match self.socket.ready_state() {
            WebSocket::OPEN => self.socket.send_with_str(&text),
            WebSocket::CONNECTING => {
                self.outbox.borrow_mut().push(text);
                Ok(())
            }
            _ => Err(rust_error!("connection closed, {} not sent", request.action)),
        }
    }
}

impl Drop for ServerConnection {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        let _ = self.socket.close();
    }
}
