use dioxus::prelude::*;

use academy_core::model::Profile;
use services::{Session, achievements_for_catalog};

use crate::context::AppContext;
use crate::views::{ActiveOverlay, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, PartialEq)]
struct EarnedBadge {
    title: String,
    description: String,
    earned_on: String,
}

#[derive(Clone, PartialEq)]
struct ProfileData {
    display_name: String,
    grade_level: Option<u8>,
    achievements: Vec<EarnedBadge>,
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();
    let mut overlay = use_context::<Signal<ActiveOverlay>>();

    let mut name = use_signal(String::new);
    let mut grade = use_signal(String::new);
    let mut status = use_signal(|| None::<String>);
    let mut filled = use_signal(|| false);

    // Switching accounts refills the form from the new profile.
    let current_user = session().map(|active| active.user_id());
    let mut last_user = use_signal(|| current_user);
    if last_user() != current_user {
        last_user.set(current_user);
        filled.set(false);
        status.set(None);
    }

    let profiles = ctx.profiles();
    let achievements = ctx.achievements();
    let catalog = ctx.catalog();
    let resource = use_resource(move || {
        let profiles = profiles.clone();
        let achievements = achievements.clone();
        let catalog = catalog.clone();
        let session = session();
        async move {
            let Some(active) = session else {
                return Ok(None);
            };
            let profile = profiles
                .ensure(&active)
                .await
                .map_err(|_| ViewError::Unknown)?;
            let earned = achievements
                .earned(active.user_id())
                .await
                .map_err(|_| ViewError::Unknown)?;
            let descriptions =
                achievements_for_catalog(&catalog).map_err(|_| ViewError::Unknown)?;

            let badges = earned
                .iter()
                .map(|entry| {
                    let found = descriptions
                        .iter()
                        .find(|achievement| achievement.id() == &entry.achievement_id);
                    EarnedBadge {
                        title: found.map_or_else(
                            || entry.achievement_id.to_string(),
                            |achievement| achievement.title().to_string(),
                        ),
                        description: found
                            .map(|achievement| achievement.description().to_string())
                            .unwrap_or_default(),
                        earned_on: entry.earned_at.format("%Y-%m-%d").to_string(),
                    }
                })
                .collect();

            Ok::<_, ViewError>(Some(ProfileData {
                display_name: profile.display_name().to_string(),
                grade_level: profile.grade_level(),
                achievements: badges,
            }))
        }
    });

    use_effect(move || {
        if filled() {
            return;
        }
        if let Some(Ok(Some(data))) = resource.value().read().as_ref() {
            name.set(data.display_name.clone());
            grade.set(
                data.grade_level
                    .map(|grade| grade.to_string())
                    .unwrap_or_default(),
            );
            filled.set(true);
        }
    });

    let profiles_for_save = ctx.profiles();
    let save = use_callback(move |()| {
        let mut status = status;

        let Some(active) = session() else {
            return;
        };
        let grade_value = grade();
        let parsed_grade = if grade_value.trim().is_empty() {
            None
        } else {
            match grade_value.trim().parse::<u8>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    status.set(Some("Grade must be a number from 1 to 11.".to_string()));
                    return;
                }
            }
        };

        let profile = match Profile::new(active.user_id(), name(), parsed_grade) {
            Ok(profile) => profile,
            Err(err) => {
                status.set(Some(err.to_string()));
                return;
            }
        };

        let profiles = profiles_for_save.clone();
        spawn(async move {
            match profiles.save(&profile).await {
                Ok(()) => status.set(Some("Profile saved.".to_string())),
                Err(_) => status.set(Some(ViewError::message().to_string())),
            }
        });
    });

    if session().is_none() {
        return rsx! {
            div { class: "page profile-page",
                h2 { "My profile" }
                p { "Sign in to see your profile and achievements." }
                button {
                    class: "btn",
                    onclick: move |_| overlay.set(ActiveOverlay::Login),
                    "Sign in"
                }
            }
        };
    }

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page profile-page",
            h2 { "My profile" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(_) => rsx! {
                    p { "{ViewError::message()}" }
                },
                ViewState::Ready(None) => rsx! {},
                ViewState::Ready(Some(data)) => rsx! {
                    section { class: "profile-form",
                        label { class: "auth-field",
                            span { class: "auth-field__label", "Display name" }
                            input {
                                class: "auth-field__input",
                                value: "{name}",
                                oninput: move |evt| name.set(evt.value()),
                            }
                        }
                        label { class: "auth-field",
                            span { class: "auth-field__label", "Grade (1 to 11, optional)" }
                            input {
                                class: "auth-field__input",
                                value: "{grade}",
                                oninput: move |evt| grade.set(evt.value()),
                            }
                        }
                        button {
                            class: "btn",
                            onclick: move |_| save.call(()),
                            "Save"
                        }
                        if let Some(status) = status() {
                            p { class: "profile-status", "{status}" }
                        }
                    }
                    section { class: "profile-achievements",
                        h3 { "Achievements" }
                        if data.achievements.is_empty() {
                            p { "Nothing here yet. Pass a final test to earn your first one!" }
                        } else {
                            ul { class: "achievement-list",
                                for badge in data.achievements.iter() {
                                    li { key: "{badge.title}", class: "achievement",
                                        span { class: "achievement__title", "{badge.title}" }
                                        span { class: "achievement__description", "{badge.description}" }
                                        span { class: "achievement__date", "{badge.earned_on}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
