use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use services::Session;

use crate::context::AppContext;
use crate::views::{
    AboutView, ActiveOverlay, CourseOverlay, HomeView, LoginOverlay, ProfileView, RegisterOverlay,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/about", AboutView)] About {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
            OverlayHost {}
        }
    }
}

/// The one shared piece of chrome: brand, navigation, session control.
#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();
    let mut overlay = use_context::<Signal<ActiveOverlay>>();
    let auth = ctx.auth();

    rsx! {
        header { class: "header",
            h1 { class: "header__brand", "Oilfield Academy" }
            nav { class: "header__nav",
                Link { to: Route::Home {}, "Courses" }
                Link { to: Route::About {}, "About" }
                Link { to: Route::Profile {}, "My profile" }
            }
            div { class: "header__session",
                if let Some(active) = session() {
                    span { class: "header__user", "{active.display_name()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = auth.clone();
                            spawn(async move {
                                let _ = auth.sign_out().await;
                            });
                        },
                        "Sign out"
                    }
                } else {
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| overlay.set(ActiveOverlay::Login),
                        "Sign in"
                    }
                }
            }
        }
    }
}

/// Renders whichever overlay is active; exactly one can be open.
#[component]
fn OverlayHost() -> Element {
    let overlay = use_context::<Signal<ActiveOverlay>>();

    match overlay() {
        ActiveOverlay::None => rsx! {},
        ActiveOverlay::Login => rsx! {
            LoginOverlay {}
        },
        ActiveOverlay::Register => rsx! {
            RegisterOverlay {}
        },
        ActiveOverlay::Course(course_id) => rsx! {
            CourseOverlay { course_id: course_id.value() }
        },
    }
}
