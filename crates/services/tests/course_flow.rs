use academy_core::classify::ResultTier;
use academy_core::time::fixed_clock;
use services::course_run::{QuizStep, RunStage};
use services::{AppServices, Catalog, FlowError};

async fn signed_in_services() -> (AppServices, services::Session) {
    let services = AppServices::new_in_memory(Catalog::builtin().unwrap(), fixed_clock());
    let session = services
        .auth()
        .sign_up("dana@example.com", "longenough", "Dana")
        .await
        .unwrap();
    (services, session)
}

#[tokio::test]
async fn full_run_through_a_course_issues_a_certificate() {
    let (services, session) = signed_in_services().await;
    let flow = services.flow();

    let course_id = services.catalog().courses()[0].id();
    let mut run = flow.start(course_id).unwrap();
    assert_eq!(run.stage(), RunStage::Lesson);

    // Read every lesson, then the last advance enters the quiz.
    let lessons = run.course().lesson_count();
    for _ in 0..lessons {
        run.advance_lesson();
    }
    assert_eq!(run.stage(), RunStage::Quiz);

    // Answer everything correctly.
    let mut last_step = None;
    for index in 0..run.course().quiz().question_count() {
        let correct = run.course().quiz().question(index).unwrap().correct();
        run.select_answer(correct).unwrap();
        last_step = Some(run.next_question().unwrap());
    }
    let Some(QuizStep::Scored(result)) = last_step else {
        panic!("expected the final step to score the quiz");
    };
    assert_eq!(result.percentage, 100);
    assert_eq!(run.stage(), RunStage::Results);

    let completion = flow.complete(&run, &session).await.unwrap();
    assert_eq!(completion.classification.tier, ResultTier::Excellent);
    assert!(completion.certificate_eligible);
    let slugs: Vec<&str> = completion
        .newly_earned
        .iter()
        .map(|id| id.as_str())
        .collect();
    assert!(slugs.contains(&"first-course"));
    assert!(slugs.contains(&"top-marks"));

    let issued = flow.issue_certificate(&run, &session).await.unwrap();
    assert!(issued.file_name.ends_with(".svg"));
    let svg = String::from_utf8(issued.bytes).unwrap();
    assert!(svg.contains("Dana"));
    assert!(svg.contains(run.course().title()));

    // The certificate achievement landed too.
    let earned = services
        .achievements()
        .earned_ids(session.user_id())
        .await
        .unwrap();
    assert!(earned.iter().any(|id| id.as_str() == "certified"));
}

#[tokio::test]
async fn failing_run_grants_nothing_and_gets_no_certificate() {
    let (services, session) = signed_in_services().await;
    let flow = services.flow();

    let course_id = services.catalog().courses()[0].id();
    let mut run = flow.start(course_id).unwrap();
    for _ in 0..run.course().lesson_count() {
        run.advance_lesson();
    }

    // Answer everything wrong: pick an option that is not the correct one.
    for index in 0..run.course().quiz().question_count() {
        let correct = run.course().quiz().question(index).unwrap().correct();
        let wrong = if correct == 0 { 1 } else { 0 };
        run.select_answer(wrong).unwrap();
        run.next_question().unwrap();
    }

    let completion = flow.complete(&run, &session).await.unwrap();
    assert_eq!(completion.result.score, 0);
    assert_eq!(completion.classification.tier, ResultTier::NeedsReview);
    assert!(!completion.classification.passed);
    assert!(completion.newly_earned.is_empty());

    let err = flow.issue_certificate(&run, &session).await.unwrap_err();
    assert!(matches!(err, FlowError::Certificate(_)));
}

#[tokio::test]
async fn unknown_course_cannot_be_started() {
    let (services, _session) = signed_in_services().await;
    let err = services
        .flow()
        .start(academy_core::model::CourseId::new(9999))
        .unwrap_err();
    assert!(matches!(err, FlowError::UnknownCourse(_)));
}

#[tokio::test]
async fn completing_before_the_quiz_is_rejected() {
    let (services, session) = signed_in_services().await;
    let flow = services.flow();
    let run = flow.start(services.catalog().courses()[0].id()).unwrap();

    let err = flow.complete(&run, &session).await.unwrap_err();
    assert!(matches!(err, FlowError::NotCompleted));
}
