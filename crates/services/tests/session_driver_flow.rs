use std::time::Duration;

use interview_core::engine::SubmitTrigger;
use interview_core::model::{Candidate, Level, Question, QuestionId};
use interview_core::time::fixed_now;
use services::{Clock, DriverTiming, SessionDriver, SessionEvent, SessionHandle, SessionUpdate};
use tokio::time::Instant;

fn question(id: u64, level: Level, correct: usize) -> Question {
    Question::new(
        QuestionId::new(id),
        level,
        format!("Question {id}"),
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        Some(correct),
    )
    .unwrap()
}

fn spawn(questions: Vec<Question>) -> SessionHandle {
    SessionDriver::spawn(
        Candidate::new("Ann", "ann@example.com", "9876543210"),
        questions,
        Clock::fixed(fixed_now()),
        DriverTiming::default(),
    )
    .unwrap()
}

async fn next_matching(
    handle: &mut SessionHandle,
    wanted: impl Fn(&SessionUpdate) -> bool,
) -> SessionUpdate {
    loop {
        let update = handle.next_update().await.expect("driver still running");
        if wanted(&update) {
            return update;
        }
    }
}

fn is_started(index: usize) -> impl Fn(&SessionUpdate) -> bool {
    move |u: &SessionUpdate| matches!(u, SessionUpdate::QuestionStarted { index: i, .. } if *i == index)
}

fn is_submitted(u: &SessionUpdate) -> bool {
    matches!(u, SessionUpdate::Submitted { .. })
}

#[tokio::test(start_paused = true)]
async fn manual_then_timeout_produces_report() {
    let started = Instant::now();
    let mut handle = spawn(vec![question(1, Level::Easy, 1), question(2, Level::Easy, 0)]);

    let SessionUpdate::QuestionStarted { time_left, progress, .. } =
        next_matching(&mut handle, is_started(0)).await
    else {
        unreachable!()
    };
    assert_eq!(time_left, 20);
    assert_eq!((progress.answered, progress.remaining), (0, 2));

    handle.select(1).await.unwrap();
    tokio::time::sleep(Duration::from_secs(4)).await;
    handle.submit().await.unwrap();

    let SessionUpdate::Submitted { submission, progress } =
        next_matching(&mut handle, is_submitted).await
    else {
        unreachable!()
    };
    assert_eq!(submission.trigger, SubmitTrigger::Manual);
    assert_eq!(submission.selected, Some(1));
    assert_eq!((progress.answered, progress.remaining), (1, 1));

    next_matching(&mut handle, is_started(1)).await;
    assert_eq!(started.elapsed(), Duration::from_millis(4_350));

    let SessionUpdate::Submitted { submission, .. } =
        next_matching(&mut handle, is_submitted).await
    else {
        unreachable!()
    };
    assert_eq!(submission.trigger, SubmitTrigger::Timeout);
    assert_eq!(submission.selected, None);
    assert_eq!(started.elapsed(), Duration::from_millis(24_350));

    let SessionUpdate::Finished(report) =
        next_matching(&mut handle, |u| matches!(u, SessionUpdate::Finished(_))).await
    else {
        unreachable!()
    };
    assert_eq!(started.elapsed(), Duration::from_millis(25_000));
    assert_eq!(report.total, 2);
    assert_eq!(report.score, 1);
    assert_eq!(report.detailed[0].time_taken_secs, 4);
    assert_eq!(report.detailed[0].correct, Some(true));
    assert_eq!(report.detailed[1].time_taken_secs, 20);
    assert_eq!(report.detailed[1].selected_index, None);
    assert_eq!(report.detailed[1].correct, Some(false));

    // the report is emitted once and the driver then stops
    assert_eq!(handle.next_update().await, None);
    assert_eq!(handle.finished().await.unwrap(), report);
}

#[tokio::test(start_paused = true)]
async fn repeated_submit_records_once() {
    let mut handle = spawn(vec![question(1, Level::Medium, 2), question(2, Level::Hard, 3)]);
    next_matching(&mut handle, is_started(0)).await;

    handle.select(2).await.unwrap();
    handle.submit().await.unwrap();
    handle.submit().await.unwrap();
    handle.select(3).await.unwrap();

    let mut submitted = 0;
    loop {
        match handle.next_update().await.unwrap() {
            SessionUpdate::Submitted { submission, .. } => {
                submitted += 1;
                assert_eq!(submission.selected, Some(2));
            }
            SessionUpdate::Selected { option, .. } => assert_eq!(option, 2),
            SessionUpdate::QuestionStarted { index: 1, time_left, .. } => {
                assert_eq!(time_left, 120);
                break;
            }
            _ => {}
        }
    }
    assert_eq!(submitted, 1);
    handle.abandon();
}

#[tokio::test(start_paused = true)]
async fn invalid_selection_and_stale_ticks_are_ignored() {
    let mut handle = spawn(vec![question(1, Level::Easy, 0)]);
    next_matching(&mut handle, is_started(0)).await;

    handle.select(9).await.unwrap();
    handle.send(SessionEvent::Tick { question: 4 }).await.unwrap();
    handle
        .send(SessionEvent::SettleElapsed { question: 0 })
        .await
        .unwrap();
    handle.select(0).await.unwrap();

    assert_eq!(
        handle.next_update().await,
        Some(SessionUpdate::Selected {
            question: 0,
            option: 0
        })
    );
    assert_eq!(
        handle.next_update().await,
        Some(SessionUpdate::Countdown {
            question: 0,
            time_left: 19
        })
    );

    handle.submit().await.unwrap();
    let report = handle.finished().await.unwrap();
    assert_eq!(report.score, 1);
    assert_eq!(report.detailed.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_timing_shortens_settle() {
    let timing = DriverTiming {
        tick: Duration::from_millis(10),
        manual_settle: Duration::from_millis(1),
        timeout_settle: Duration::from_millis(2),
    };
    let started = Instant::now();
    let handle = SessionDriver::spawn(
        Candidate::default(),
        vec![question(1, Level::Easy, 0)],
        Clock::fixed(fixed_now()),
        timing,
    )
    .unwrap();

    let report = handle.finished().await.unwrap();
    // 20 ticks of 10ms, then the timeout settle
    assert_eq!(started.elapsed(), Duration::from_millis(202));
    assert_eq!(report.detailed[0].selected_index, None);
    assert_eq!(report.score, 0);
}
