use dioxus::prelude::*;

#[component]
pub fn AboutView() -> Element {
    rsx! {
        div { class: "page about-page",
            h2 { "About Oilfield Academy" }
            p {
                "Oilfield Academy is a small learning platform for schoolchildren about the world of oil and gas: where hydrocarbons come from, how they are produced, and how to treat them safely."
            }
            p {
                "Every course is a handful of short illustrated lessons followed by a final test. Score 70% or better and you can download a certificate to show your class."
            }
            p {
                "The catalog is curated by hand and ships with the application, so everything works offline too."
            }
        }
    }
}
