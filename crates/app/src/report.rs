use storage::repository::ResultRecord;
use ui::vm::{ResultDetailVm, detailed_json, map_result_rows};

fn table_line(cells: [&str; 8]) -> String {
    let [id, name, email, phone, score, attempted, correct, date] = cells;
    format!("{id:>4}  {name:<20} {email:<28} {phone:<14} {score:>7} {attempted:>9} {correct:>7}  {date:<16}")
}

fn results_table(records: &[ResultRecord]) -> Vec<String> {
    let mut lines = vec![table_line([
        "ID", "Name", "Email", "Phone", "Score", "Attempted", "Correct", "Date",
    ])];
    lines.extend(map_result_rows(records).into_iter().map(|row| {
        table_line([
            &row.id.to_string(),
            &row.name,
            &row.email,
            &row.phone,
            &row.score,
            &row.attempted.to_string(),
            &row.correct.to_string(),
            &row.taken_at_str,
        ])
    }));
    lines
}

pub fn print_results(records: &[ResultRecord]) {
    if records.is_empty() {
        println!("No results yet.");
        return;
    }
    for line in results_table(records) {
        println!("{line}");
    }
}

pub fn print_detail(record: &ResultRecord, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", detailed_json(record)?);
        return Ok(());
    }

    let detail = ResultDetailVm::from(record);
    println!("{}", detail.heading);
    for row in detail.rows {
        println!();
        println!("Q{}: {}", row.number, row.question);
        println!("   {} · Time: {}", row.verdict, row.time_taken);
        println!("   Your answer:    {}", row.your_answer);
        println!("   Correct answer: {}", row.correct_answer);
        if let Some(solution) = row.solution {
            println!("   Solution: {solution}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::model::{Candidate, ResultId};
    use interview_core::time::fixed_now;
    use storage::repository::NewResult;

    #[test]
    fn table_shows_attempted_and_correct() {
        let record = ResultRecord::new(
            ResultId::new(3),
            NewResult {
                candidate: Candidate::new("ann", "ann@example.com", "9876543210"),
                score: 4,
                total: 6,
                attempted: 5,
                correct: 4,
                detailed: Vec::new(),
                taken_at: fixed_now(),
            },
        );

        let lines = results_table(&[record]);
        assert_eq!(lines.len(), 2);
        let header: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(
            header,
            ["ID", "Name", "Email", "Phone", "Score", "Attempted", "Correct", "Date"]
        );
        let row: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(
            row,
            ["3", "Ann", "ann@example.com", "9876543210", "4", "/", "6", "5", "4", "2023-11-14", "22:13"]
        );
    }
}
