use std::path::Path;

use interview_core::dialogue::Rejected;
use services::{AppServices, AttendanceCheck, DialogueDriver, SessionEvent, SessionUpdate};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{info, warn};
use ui::vm::{AttendedNoticeVm, CandidateVm, QuizVm, field_prompt, parse_option};

use crate::report;

type Input = Lines<BufReader<Stdin>>;

/// Resume → missing details → eligibility → timed questions → stored result.
pub async fn run_interview(
    app: &AppServices,
    resume: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let candidate = services::read_resume(resume).await?;
    let mut dialogue = DialogueDriver::new(candidate);

    while let Some(field) = dialogue.prompt() {
        println!("🤖 {}", field_prompt(field));
        let Some(line) = input.next_line().await? else {
            dialogue.cancel();
            return Ok(());
        };
        if line.trim().eq_ignore_ascii_case("quit") {
            dialogue.cancel();
            println!("Interview abandoned.");
            return Ok(());
        }
        if let Err(Rejected::EmptyFieldInput { field }) = dialogue.answer(&line).await {
            println!("Please enter your {field}.");
        }
    }
    let candidate = dialogue.finish()?;

    let details = CandidateVm::from(&candidate);
    println!();
    println!("Name:  {}", details.name);
    println!("Email: {}", details.email);
    println!("Phone: {}", details.phone);

    let assessment = app.assessment();
    if let AttendanceCheck::AlreadyAttended(previous) = assessment.begin(&candidate).await? {
        let notice = AttendedNoticeVm::from(previous.as_ref());
        println!();
        println!("{}", notice.message);
        println!("{}", notice.details);
        println!("Type view to see your answers, or press Enter to exit.");
        match input.next_line().await? {
            Some(line) if line.trim().eq_ignore_ascii_case("view") => {
                println!();
                report::print_detail(&previous, false)?;
            }
            _ => println!("Run `{}` to review it later.", notice.show_hint),
        }
        return Ok(());
    }

    println!();
    println!("Press Enter to start the assessment, or type quit.");
    match input.next_line().await? {
        Some(line) if !line.trim().eq_ignore_ascii_case("quit") => {}
        _ => {
            println!("Interview abandoned.");
            return Ok(());
        }
    }

    let mut handle = assessment.start(candidate)?;
    let events = handle.events();
    let mut vm = QuizVm::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            update = handle.next_update() => {
                let Some(update) = update else { break };
                vm.apply(&update);
                render(&vm, &update);
                if matches!(update, SessionUpdate::Finished(_)) {
                    break;
                }
            }
            line = input.next_line(), if input_open => {
                match line? {
                    Some(line) => on_input(&vm, &events, &line).await,
                    // no more input: remaining questions run out on their timers
                    None => input_open = false,
                }
            }
        }
    }

    let report = handle.finished().await?;
    let record = assessment.complete(report).await?;
    info!(result = %record.id, "interview complete");

    println!();
    report::print_detail(&record, false)?;
    Ok(())
}

async fn on_input(vm: &QuizVm, events: &mpsc::Sender<SessionEvent>, line: &str) {
    let trimmed = line.trim();
    let event = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("submit") {
        SessionEvent::Submit
    } else if trimmed.eq_ignore_ascii_case("quit") {
        println!("The assessment is running and cannot be abandoned.");
        return;
    } else {
        let options = vm.question().map_or(0, |q| q.options().len());
        match parse_option(trimmed, options) {
            Some(option) => SessionEvent::Select { option },
            None => {
                println!("Type a letter or number to choose, or press Enter to submit.");
                return;
            }
        }
    };

    if events.send(event).await.is_err() {
        warn!(?event, "session already finished");
    }
}

fn render(vm: &QuizVm, update: &SessionUpdate) {
    match update {
        SessionUpdate::QuestionStarted { question, .. } => {
            println!();
            println!("{}  ({})", vm.heading(), vm.level_line());
            println!("{}", question.text());
            for line in vm.option_lines() {
                println!("  {} {}", line.label, line.text);
            }
            println!("⏱ {}   [{}]", vm.timer_label(), vm.submit_label());
        }
        SessionUpdate::Countdown { time_left, .. } => {
            if *time_left % 10 == 0 || *time_left <= 5 {
                println!("⏱ {} ({}%)", vm.timer_label(), vm.timer_percent());
            }
        }
        SessionUpdate::Selected { option, .. } => {
            if let Some(line) = vm.option_lines().get(*option) {
                println!("Selected {} {}", line.label, line.text);
            }
        }
        SessionUpdate::Submitted { .. } => {
            for line in vm.option_lines() {
                let mark = match line.correct {
                    Some(true) => "✓",
                    Some(false) if line.selected => "✗",
                    _ => " ",
                };
                println!("{mark} {} {}", line.label, line.text);
            }
            println!("{}", vm.progress_line());
        }
        SessionUpdate::Finished(report) => {
            println!();
            println!("Assessment complete: {} / {}", report.score, report.total);
        }
    }
}
