use dioxus::prelude::*;
use dioxus_router::Router;

use services::Session;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ActiveOverlay;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // Session snapshot plus the single active-overlay value, provided once
    // at the root so any view can reach them without prop threading.
    let mut session = use_signal(|| None::<Session>);
    use_context_provider(|| session);
    let overlay = use_signal(ActiveOverlay::default);
    use_context_provider(|| overlay);

    let auth = ctx.auth();
    use_future(move || {
        let auth = auth.clone();
        let mut session = session;
        async move {
            if let Ok(restored) = auth.restore().await {
                session.set(restored);
            }
            let mut changes = auth.subscribe();
            while changes.changed().await.is_ok() {
                let snapshot = changes.borrow().clone();
                session.set(snapshot);
            }
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title; per-view headings live in the pages.
        document::Title { "Oilfield Academy" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
