use std::rc::Rc;

use yew::prelude::*;

use super::{notice_bar::NoticeBar, page_view::PageView, top_bar::TopBar};
use crate::calls;
use crate::config::ClientConfig;
use crate::cookie::CookieStore;
use crate::model::User;
use crate::net::ServerConnection;
use crate::protocol::{Request, ServerEvent};
use crate::rust_error;
use crate::state::{ClientAction, ClientState, Connection, Notice, Page};
use crate::util::{clog, cwarn, js_error_text};
use crate::validate::Validated;

const USER_STORAGE_KEY: &str = "tt_user";

/// Shared with every page: the client state and the way to reach the server.
#[derive(Clone, PartialEq)]
pub struct ClientContext {
    pub state: UseReducerHandle<ClientState>,
    pub call: Callback<Request>,
    pub config: Rc<ClientConfig>,
}

impl ClientContext {
    pub fn session(&self) -> Option<&str> {
        self.state.session()
    }

    pub fn dispatch(&self, action: ClientAction) {
        self.state.dispatch(action);
    }

    pub fn goto(&self, page: Page) {
        self.dispatch(ClientAction::Goto(page));
    }

    /// Sends a validated form, or shows why it was rejected.
    pub fn submit(&self, validated: Validated) -> bool {
        match validated {
            Ok(request) => {
                self.call.emit(request);
                true
            }
            Err(e) => {
                self.dispatch(ClientAction::Notify(Notice::error(e.to_string())));
                false
            }
        }
    }
}

fn stored_user() -> Option<User> {
    let store = web_sys::window()?.local_storage().ok()??;
    let raw = store.get_item(USER_STORAGE_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

fn store_user(user: Option<&User>) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = match user.map(serde_json::to_string) {
                Some(Ok(raw)) => store.set_item(USER_STORAGE_KEY, &raw),
                _ => store.remove_item(USER_STORAGE_KEY),
            };
        }
    }
}

fn location_page() -> Option<Page> {
    let hash = web_sys::window()?.location().hash().ok()?;
    Page::from_slug(&hash)
}

/// Keeps the session cookie and stored account in step with the server.
fn remember_session(cookies: &CookieStore, event: &ServerEvent) {
    let result = match event {
        ServerEvent::LoginSuccess(login) => {
            store_user(Some(&login.user));
            cookies.set(&login.session_id)
        }
        ServerEvent::UserUpdated(user) => {
            let role = stored_user().map(|u| u.role).unwrap_or_default();
            store_user(Some(&User { role, ..user.clone() }));
            Ok(())
        }
        ServerEvent::LogoutSuccess => {
            store_user(None);
            cookies.delete()
        }
        _ => Ok(()),
    };
    if let Err(e) = result {
        cwarn(&format!("session cookie: {}", js_error_text(&e)));
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::load());
    let state = use_reducer(ClientState::default);
    let connection = use_mut_ref(|| None::<ServerConnection>);

    let call = {
        let connection = connection.clone();
        let dispatcher = state.dispatcher();
        use_callback((), move |request: Request, _| {
            let sent = match &*connection.borrow() {
                Some(conn) => conn.send(&request),
                None => Err(rust_error!("not connected, {} not sent", request.action)),
            };
            if let Err(e) = sent {
                let text = js_error_text(&e);
                cwarn(&text);
                dispatcher.dispatch(ClientAction::Notify(Notice::error(text)));
            }
        })
    };

    // Connect once, then pick up a session left by an earlier visit.
    {
        let dispatcher = state.dispatcher();
        let connection = connection.clone();
        let config = config.clone();
        let call = call.clone();
        use_effect_with((), move |_| {
            let cookies = CookieStore::new(&config);
            let on_event = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |event: ServerEvent| {
                    remember_session(&cookies, &event);
                    dispatcher.dispatch(ClientAction::Server(event));
                })
            };
            let on_status = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |status| dispatcher.dispatch(ClientAction::Connection(status)))
            };
            match config.socket_url() {
                Some(url) => match ServerConnection::open(&url, on_event, on_status) {
                    Ok(conn) => {
                        clog(&format!("connecting to {}", url));
                        *connection.borrow_mut() = Some(conn);
                    }
                    Err(e) => {
                        cwarn(&js_error_text(&e));
                        dispatcher.dispatch(ClientAction::Connection(Connection::Unsupported));
                    }
                },
                None => dispatcher.dispatch(ClientAction::Connection(Connection::Unsupported)),
            }

            if let Some(session) = CookieStore::new(&config).get() {
                call.emit(calls::set_push_receiver(Some(&session)));
                dispatcher.dispatch(ClientAction::Restore { session, user: stored_user(), page: location_page() });
            }

            move || {
                connection.borrow_mut().take();
            }
        });
    }

    // Mirror the current page in the location hash.
    {
        let page = state.nav.page;
        use_effect_with(page, move |page| {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_hash(page.slug());
                if let Some(doc) = win.document() {
                    doc.set_title(&format!("Treacherous Talks - {}", page.title()));
                }
            }
            || ()
        });
    }

    let ctx = ClientContext { state, call, config };

    html! {
        <ContextProvider<ClientContext> context={ctx}>
            <div id="tt-client" style="min-height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
                <TopBar />
                <NoticeBar />
                <main style="padding:16px 24px; max-width:1200px; margin:0 auto;">
                    <PageView />
                </main>
            </div>
        </ContextProvider<ClientContext>>
    }
}
