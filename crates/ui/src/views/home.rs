use dioxus::prelude::*;

use services::Session;

use crate::context::AppContext;
use crate::views::ActiveOverlay;
use crate::vm::{CourseCardVm, course_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();

    let achievements = ctx.achievements();
    let earned_resource = use_resource(move || {
        let achievements = achievements.clone();
        let session = session();
        async move {
            match session {
                Some(session) => achievements.earned_ids(session.user_id()).await.ok(),
                None => None,
            }
        }
    });

    let earned = earned_resource
        .value()
        .read()
        .as_ref()
        .and_then(Clone::clone);
    let cards = course_cards(&ctx.catalog(), earned.as_ref());

    rsx! {
        div { class: "page home-page",
            section { class: "hero",
                h2 { class: "hero__title", "Discover the world of oil and gas" }
                p { class: "hero__subtitle",
                    "Short courses for curious schoolchildren: read the lessons, pass the final test, earn your certificate."
                }
            }
            section { class: "course-grid",
                for card in cards.iter() {
                    CourseCard { key: "{card.id}", card: card.clone() }
                }
            }
        }
    }
}

#[component]
fn CourseCard(card: CourseCardVm) -> Element {
    let mut overlay = use_context::<Signal<ActiveOverlay>>();
    let id = card.id;

    rsx! {
        article { class: "course-card",
            header { class: "course-card__header",
                h3 { class: "course-card__title", "{card.title}" }
                if card.completed {
                    span { class: "course-card__badge", "Completed" }
                }
            }
            p { class: "course-card__description", "{card.description}" }
            p { class: "course-card__meta",
                "{card.lessons} lessons · {card.questions} questions in the final test"
            }
            button {
                class: "btn",
                onclick: move |_| overlay.set(ActiveOverlay::Course(id)),
                "Open course"
            }
        }
    }
}
