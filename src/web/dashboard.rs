use axum::extract::State;
use axum::response::Html;

use super::views::render_page;
use super::AppState;

pub(super) struct ActivityCard {
    pub(super) name: String,
    pub(super) description: String,
    pub(super) schedule: String,
    pub(super) spots_left: u32,
    pub(super) participants: Vec<String>,
}

pub(crate) async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    let cards: Vec<ActivityCard> = state
        .roster
        .list()
        .into_iter()
        .map(|(name, a)| ActivityCard {
            spots_left: a.spots_left(),
            name,
            description: a.description,
            schedule: a.schedule,
            participants: a.participants,
        })
        .collect();

    Html(render_page(&state.school, &cards))
}
