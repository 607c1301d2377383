use dioxus::prelude::*;

use academy_core::model::CourseId;
use services::course_run::RunStage;
use services::{RunCompletion, Session, achievements_for_catalog};

use crate::context::AppContext;
use crate::views::ActiveOverlay;
use crate::vm::{CourseRunVm, RunIntent, RunOutcome, markdown_to_html, tier_message};

// Owned snapshots of the run, extracted before rendering so the rsx tree
// never borrows from the signal guard.

struct LessonSnapshot {
    title: String,
    html: String,
    illustration: Option<String>,
    mini_prompt: Option<String>,
    mini_options: Vec<String>,
    mini_selected: Option<usize>,
    mini_feedback: Option<bool>,
    index: usize,
    total: usize,
    next_label: &'static str,
}

struct QuizSnapshot {
    prompt: String,
    options: Vec<String>,
    selected: Option<usize>,
    index: usize,
    total: usize,
    next_label: &'static str,
}

struct ResultsSnapshot {
    score: usize,
    total: usize,
    percentage: u8,
    message: &'static str,
    eligible: bool,
}

#[component]
pub fn CourseOverlay(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let mut overlay = use_context::<Signal<ActiveOverlay>>();
    let session = use_context::<Signal<Option<Session>>>();
    let course_id = CourseId::new(course_id);

    let flow_for_init = ctx.flow();
    let mut vm = use_signal(move || flow_for_init.start(course_id).ok().map(CourseRunVm::new));
    let mut completion = use_signal(|| None::<RunCompletion>);
    let mut saved_note = use_signal(|| None::<String>);
    let mut active_course = use_signal(|| course_id);

    // A different course identity always means a fresh run from lesson 0.
    if active_course() != course_id {
        active_course.set(course_id);
        vm.set(ctx.flow().start(course_id).ok().map(CourseRunVm::new));
        completion.set(None);
        saved_note.set(None);
    }

    let flow_for_complete = ctx.flow();
    let dispatch = use_callback(move |intent: RunIntent| {
        let mut vm = vm;
        let mut completion = completion;
        let mut saved_note = saved_note;

        let outcome = {
            let mut guard = vm.write();
            guard.as_mut().and_then(|vm| vm.apply(intent))
        };

        if let Some(RunOutcome::Completed(_)) = outcome {
            completion.set(None);
            saved_note.set(None);
            let Some(active) = session() else {
                return;
            };
            let flow = flow_for_complete.clone();
            spawn(async move {
                // Take the run out of the signal across the await, then put
                // it back so the view stays usable even after errors.
                let taken = vm.write().take();
                let Some(vm_value) = taken else {
                    return;
                };
                let recorded = flow.complete(vm_value.run(), &active).await;
                *vm.write() = Some(vm_value);
                if let Ok(done) = recorded {
                    completion.set(Some(done));
                }
            });
        }
    });

    let pick_option = use_callback(move |index: usize| {
        dispatch.call(RunIntent::SelectOption(index));
    });
    let pick_mini = use_callback(move |index: usize| {
        dispatch.call(RunIntent::SelectMini(index));
    });

    let flow_for_certificate = ctx.flow();
    let certificates_dir = ctx.certificates_dir();
    let download = use_callback(move |()| {
        let mut vm = vm;
        let mut saved_note = saved_note;

        let Some(active) = session() else {
            return;
        };
        let flow = flow_for_certificate.clone();
        let dir = certificates_dir.clone();
        spawn(async move {
            let taken = vm.write().take();
            let Some(vm_value) = taken else {
                return;
            };
            let issued = flow.issue_certificate(vm_value.run(), &active).await;
            *vm.write() = Some(vm_value);
            match issued {
                Ok(certificate) => match certificate.write_to(&dir) {
                    Ok(path) => {
                        saved_note.set(Some(format!("Certificate saved to {}", path.display())));
                    }
                    Err(_) => {
                        saved_note.set(Some("Could not save the certificate.".to_string()));
                    }
                },
                Err(_) => {
                    saved_note.set(Some("The certificate is not available.".to_string()));
                }
            }
        });
    });

    let guard = vm.read();
    let Some(vm_ref) = guard.as_ref() else {
        // Stale or unknown course reference: render nothing.
        return rsx! {};
    };

    let run = vm_ref.run();
    let course_title = run.course().title().to_string();
    let stage = run.stage();
    let message = vm_ref.message();

    let lesson_view = run.current_lesson().map(|lesson| LessonSnapshot {
        title: lesson.title().to_string(),
        html: markdown_to_html(lesson.body()),
        illustration: lesson
            .illustration()
            .map(|illustration| illustration.as_str().to_string()),
        mini_prompt: lesson
            .mini_question()
            .map(|question| question.prompt().to_string()),
        mini_options: lesson
            .mini_question()
            .map(|question| question.options().to_vec())
            .unwrap_or_default(),
        mini_selected: vm_ref.mini_selected(),
        mini_feedback: vm_ref.mini_feedback(),
        index: run.lesson_index(),
        total: run.course().lesson_count(),
        next_label: if run.is_last_lesson() {
            "Start the final test"
        } else {
            "Next lesson"
        },
    });

    let quiz_view = run.current_question().map(|question| QuizSnapshot {
        prompt: question.prompt().to_string(),
        options: question.options().to_vec(),
        selected: run.selected_answer(),
        index: run.question_index(),
        total: run.course().quiz().question_count(),
        next_label: if run.question_index() + 1 == run.course().quiz().question_count() {
            "Finish the test"
        } else {
            "Next question"
        },
    });

    let results_view = run
        .result()
        .zip(run.classification())
        .map(|(result, classification)| ResultsSnapshot {
            score: result.score,
            total: result.total,
            percentage: result.percentage,
            message: tier_message(classification.tier),
            eligible: run.certificate_eligible(),
        });

    let signed_in = session().is_some();
    let saved = saved_note.read().clone();
    let new_achievement_titles: Vec<String> = completion
        .read()
        .as_ref()
        .map(|done| {
            let descriptions = achievements_for_catalog(&ctx.catalog()).unwrap_or_default();
            done.newly_earned
                .iter()
                .map(|id| {
                    descriptions
                        .iter()
                        .find(|achievement| achievement.id() == id)
                        .map_or_else(|| id.to_string(), |a| a.title().to_string())
                })
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        div { class: "overlay",
            div {
                class: "modal course-modal",
                role: "dialog",
                aria_modal: "true",
                header { class: "modal__header",
                    h2 { class: "modal__title", "{course_title}" }
                    button {
                        class: "modal__close",
                        r#type: "button",
                        onclick: move |_| overlay.set(ActiveOverlay::None),
                        "Close"
                    }
                }
                div { class: "modal__body",
                    match stage {
                        RunStage::Lesson => rsx! {
                            if let Some(lesson) = lesson_view {
                                p { class: "course-progress", "Lesson {lesson.index + 1} of {lesson.total}" }
                                h3 { class: "lesson-title", "{lesson.title}" }
                                if let Some(src) = lesson.illustration {
                                    img { class: "lesson-illustration", src: "{src}", alt: "{lesson.title}" }
                                }
                                div { class: "lesson-body", dangerous_inner_html: "{lesson.html}" }
                                if let Some(prompt) = lesson.mini_prompt {
                                    div { class: "mini-question",
                                        p { class: "mini-question__prompt", "Quick check: {prompt}" }
                                        div { class: "mini-question__options",
                                            for (option_index, option) in lesson.mini_options.iter().enumerate() {
                                                OptionButton {
                                                    key: "{option_index}",
                                                    label: option.clone(),
                                                    index: option_index,
                                                    selected: lesson.mini_selected == Some(option_index),
                                                    on_pick: pick_mini,
                                                }
                                            }
                                        }
                                        match lesson.mini_feedback {
                                            Some(true) => rsx! {
                                                p { class: "mini-question__feedback mini-question__feedback--right", "That's right!" }
                                            },
                                            Some(false) => rsx! {
                                                p { class: "mini-question__feedback mini-question__feedback--wrong", "Not quite. Look through the lesson again." }
                                            },
                                            None => rsx! {},
                                        }
                                    }
                                }
                                footer { class: "modal__footer",
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        disabled: lesson.index == 0,
                                        onclick: move |_| dispatch.call(RunIntent::PrevLesson),
                                        "Back"
                                    }
                                    button {
                                        class: "btn",
                                        r#type: "button",
                                        onclick: move |_| dispatch.call(RunIntent::NextLesson),
                                        "{lesson.next_label}"
                                    }
                                }
                            }
                        },
                        RunStage::Quiz => rsx! {
                            if let Some(quiz) = quiz_view {
                                p { class: "course-progress", "Question {quiz.index + 1} of {quiz.total}" }
                                h3 { class: "quiz-prompt", "{quiz.prompt}" }
                                div { class: "quiz-options",
                                    for (option_index, option) in quiz.options.iter().enumerate() {
                                        OptionButton {
                                            key: "{option_index}",
                                            label: option.clone(),
                                            index: option_index,
                                            selected: quiz.selected == Some(option_index),
                                            on_pick: pick_option,
                                        }
                                    }
                                }
                                if let Some(message) = message {
                                    p { class: "quiz-message", "{message}" }
                                }
                                footer { class: "modal__footer",
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        disabled: quiz.index == 0,
                                        onclick: move |_| dispatch.call(RunIntent::PrevQuestion),
                                        "Back"
                                    }
                                    button {
                                        class: "btn",
                                        r#type: "button",
                                        onclick: move |_| dispatch.call(RunIntent::NextQuestion),
                                        "{quiz.next_label}"
                                    }
                                }
                            }
                        },
                        RunStage::Results => rsx! {
                            if let Some(results) = results_view {
                                div { class: "results",
                                    p { class: "results__score", "{results.score} of {results.total} correct: {results.percentage}%" }
                                    p { class: "results__message", "{results.message}" }
                                    if !new_achievement_titles.is_empty() {
                                        div { class: "results__achievements",
                                            p { "New achievements:" }
                                            ul {
                                                for title in new_achievement_titles.iter() {
                                                    li { key: "{title}", "{title}" }
                                                }
                                            }
                                        }
                                    }
                                    if !signed_in {
                                        p { class: "results__hint", "Sign in to keep your achievements and download certificates." }
                                    }
                                    if let Some(saved) = saved {
                                        p { class: "results__saved", "{saved}" }
                                    }
                                    footer { class: "modal__footer",
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| dispatch.call(RunIntent::ReviewLessons),
                                            "Review the lessons"
                                        }
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| dispatch.call(RunIntent::Retake),
                                            "Try again"
                                        }
                                        if results.eligible && signed_in {
                                            button {
                                                class: "btn",
                                                r#type: "button",
                                                onclick: move |_| download.call(()),
                                                "Download certificate"
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
    }
}

#[component]
fn OptionButton(label: String, index: usize, selected: bool, on_pick: Callback<usize>) -> Element {
    let class = if selected {
        "option option--selected"
    } else {
        "option"
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_pick.call(index),
            "{label}"
        }
    }
}
