use interview_core::model::{Candidate, Level, Question, QuestionId};
use interview_core::time::fixed_now;
use services::{Clock, DriverTiming, SessionDriver, SessionUpdate};
use ui::vm::QuizVm;

fn question(id: u64) -> Question {
    Question::new(
        QuestionId::new(id),
        Level::Easy,
        format!("Question {id}"),
        vec!["yes".into(), "no".into()],
        Some(0),
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn quiz_vm_follows_a_driven_session() {
    let mut handle = SessionDriver::spawn(
        Candidate::new("Ann", "ann@example.com", "9876543210"),
        vec![question(1), question(2)],
        Clock::fixed(fixed_now()),
        DriverTiming::default(),
    )
    .unwrap();
    let mut vm = QuizVm::new();

    vm.apply(&handle.next_update().await.unwrap());
    assert_eq!(vm.heading(), "Question 1 / 2");
    assert_eq!(vm.timer_label(), "00:20");
    assert_eq!(vm.submit_label(), "Submit");

    vm.apply(&handle.next_update().await.unwrap());
    assert_eq!(vm.timer_label(), "00:19");
    assert_eq!(vm.timer_percent(), 95);

    handle.select(0).await.unwrap();
    handle.submit().await.unwrap();
    loop {
        let update = handle.next_update().await.unwrap();
        vm.apply(&update);
        if matches!(update, SessionUpdate::QuestionStarted { .. }) {
            break;
        }
    }
    assert_eq!(vm.heading(), "Question 2 / 2");
    assert_eq!(vm.submit_label(), "Submit & Finish");
    assert_eq!(vm.progress_line(), "1 answered • 1 remaining");

    while let Some(update) = handle.next_update().await {
        vm.apply(&update);
    }
    assert!(vm.is_finished());
}
