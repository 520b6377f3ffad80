use chrono::Local;
use leptos::prelude::*;

use super::dashboard::ActivityCard;

const STYLE: &str = include_str!("../style.css");
const SCRIPT: &str = include_str!("../app.js");

pub(super) fn render_page(school: &str, cards: &[ActivityCard]) -> String {
    let title = format!("{school} Activities");
    let heading = title.clone();
    let cards_html = render_cards(cards);
    let options_html = render_options(cards);
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title}</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <h1>{heading}</h1>
                <p class="timestamp">"Updated: " {now}</p>
                <section>
                    <h2>"Available Activities"</h2>
                    <div id="activities-list" inner_html=cards_html />
                </section>
                <section>
                    <h2>"Sign Up for an Activity"</h2>
                    <form id="signup-form">
                        <label for="email">"Student Email:"</label>
                        <input type="email" id="email" required=true placeholder="your-email@mergington.edu" />
                        <label for="activity">"Select Activity:"</label>
                        <select id="activity" required=true inner_html=options_html />
                        <button type="submit">"Sign Up"</button>
                    </form>
                    <div id="message" class="hidden" />
                </section>
                <script inner_html=SCRIPT />
            </body>
        </html>
    }
    .to_html()
}

fn render_options(cards: &[ActivityCard]) -> String {
    let placeholder = view! { <option value="">"-- Select an activity --"</option> }.to_html();
    let options: String = cards
        .iter()
        .map(|c| {
            let value = c.name.clone();
            let label = c.name.clone();
            view! { <option value=value>{label}</option> }.to_html()
        })
        .collect();
    placeholder + &options
}

fn render_cards(cards: &[ActivityCard]) -> String {
    if cards.is_empty() {
        return view! { <p class="empty">"No activities available."</p> }.to_html();
    }
    cards.iter().map(render_card).collect()
}

fn render_card(card: &ActivityCard) -> String {
    let name = card.name.clone();
    let description = card.description.clone();
    let schedule = card.schedule.clone();
    let availability = format!("{} spots left", card.spots_left);
    let css = if card.spots_left == 0 {
        "availability full"
    } else {
        "availability"
    }
    .to_string();
    let participants_html = render_participants(&card.name, &card.participants);

    view! {
        <div class="activity-card">
            <h4>{name}</h4>
            <p>{description}</p>
            <p><strong>"Schedule:"</strong> " " {schedule}</p>
            <p class=css><strong>"Availability:"</strong> " " {availability}</p>
            <div inner_html=participants_html />
        </div>
    }
    .to_html()
}

fn render_participants(activity: &str, participants: &[String]) -> String {
    if participants.is_empty() {
        return view! { <p class="no-participants">"No participants yet"</p> }.to_html();
    }

    let items_html: String = participants
        .iter()
        .map(|p| {
            let email = p.clone();
            let data_email = p.clone();
            let data_activity = activity.to_string();
            let label = format!("Unregister {p} from {activity}");
            view! {
                <li class="participant">
                    <span class="participant-email">{email}</span>
                    <button
                        class="participant-delete"
                        data-activity=data_activity
                        data-email=data_email
                        aria-label=label
                    >
                        "✖"
                    </button>
                </li>
            }
            .to_html()
        })
        .collect();

    view! {
        <p class="participants-header"><strong>"Participants:"</strong></p>
        <ul class="participants-list" inner_html=items_html />
    }
    .to_html()
}
