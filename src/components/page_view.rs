use yew::prelude::*;

use super::dashboard::DashboardPage;
use super::game_settings::{GameSearchPage, GameSettingsPage};
use super::game_view::GamePage;
use super::help::UserHelpPage;
use super::home::{HomePage, LoginPage};
use super::moderator::{AddRemoveModeratorPage, BlacklistWhitelistPage, ModeratorPage};
use super::operator::OperatorPage;
use super::user_pages::{RegisterPage, UpdateUserPage};
use super::ClientContext;
use crate::state::Page;

#[function_component]
pub fn PageView() -> Html {
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let page = ctx.state.nav.page;
    let body = match page {
        Page::Home => html! { <HomePage /> },
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Login => html! { <LoginPage /> },
        Page::Register => html! { <RegisterPage /> },
        Page::UpdateUser => html! { <UpdateUserPage /> },
        Page::CreateGame => html! { <GameSettingsPage reconfigure={false} /> },
        Page::ReconfigGame => html! { <GameSettingsPage reconfigure={true} /> },
        Page::GameSearch => html! { <GameSearchPage /> },
        Page::Game => html! { <GamePage /> },
        Page::UserHelp => html! { <UserHelpPage /> },
        Page::Operator => html! { <OperatorPage /> },
        Page::Moderator => html! { <ModeratorPage /> },
        Page::AddRemoveModerator => html! { <AddRemoveModeratorPage /> },
        Page::BlacklistWhitelist => html! { <BlacklistWhitelistPage /> },
    };
    html! {
        <section id="page" data-page={page.slug()}>
            <h2 style="margin:8px 0 12px;">{ page.title() }</h2>
            { body }
        </section>
    }
}
