use std::sync::Arc;

use async_trait::async_trait;
use interview_core::model::{Candidate, ResultId};
use interview_core::time::fixed_now;
use services::{
    AppServices, AssessmentService, AttendanceCheck, Clock, InOrder, QuestionBank, ResultQuery,
    ResultSort, WorkflowError,
};
use storage::repository::{
    InMemoryRepository, NewResult, ResultRecord, ResultRepository, Storage, StorageError,
};

const BANK: &str = r#"[
    {"id": 1, "level": "easy", "question": "Binary of decimal 15?",
     "options": ["1110", "1111", "1001", "1101"], "correctIndex": 1,
     "explanation": "15 in binary is 1111."},
    {"id": 2, "level": "medium", "question": "OSI model has how many layers?",
     "options": ["5", "6", "7", "8"], "correctIndex": 2}
]"#;

fn service(repo: Arc<dyn ResultRepository>) -> AssessmentService {
    AssessmentService::new(
        Clock::fixed(fixed_now()),
        Arc::new(QuestionBank::from_json(BANK).unwrap()),
        Arc::new(InOrder),
        repo,
    )
}

#[tokio::test(start_paused = true)]
async fn full_run_is_stored_and_blocks_a_second_attempt() {
    let repo = Arc::new(InMemoryRepository::new());
    let svc = service(repo.clone());
    let candidate = Candidate::new("ann", "Ann@Example.com", "9876543210");

    assert_eq!(svc.begin(&candidate).await.unwrap(), AttendanceCheck::Eligible);

    let handle = svc.start(candidate.clone()).unwrap();
    handle.select(1).await.unwrap();
    handle.submit().await.unwrap();
    let report = handle.finished().await.unwrap();
    assert_eq!(report.score, 1);
    assert_eq!(report.total, 2);

    let stored = svc.complete(report).await.unwrap();
    assert_eq!(stored.attempted, 1);
    assert_eq!(stored.correct, 1);
    assert_eq!(stored.taken_at, fixed_now());

    let again = Candidate::new("Ann", " ann@example.COM ", "9876543210");
    let AttendanceCheck::AlreadyAttended(previous) = svc.begin(&again).await.unwrap() else {
        panic!("second attempt should be blocked");
    };
    assert_eq!(previous.id, stored.id);
}

#[tokio::test]
async fn email_is_required() {
    let svc = service(Arc::new(InMemoryRepository::new()));
    let candidate = Candidate {
        name: Some("Ann".into()),
        email: Some("  ".into()),
        phone: None,
    };
    assert!(matches!(
        svc.begin(&candidate).await,
        Err(WorkflowError::MissingEmail)
    ));
}

struct BrokenRepository;

#[async_trait]
impl ResultRepository for BrokenRepository {
    async fn append_result(&self, _result: &NewResult) -> Result<ResultId, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_result(&self, _id: ResultId) -> Result<ResultRecord, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<ResultRecord>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn clear_results(&self) -> Result<u64, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test]
async fn storage_failures_surface_as_workflow_errors() {
    let svc = service(Arc::new(BrokenRepository));
    let candidate = Candidate::new("Ann", "ann@example.com", "9876543210");
    assert!(matches!(
        svc.begin(&candidate).await,
        Err(WorkflowError::Storage(StorageError::Connection(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn app_services_share_one_store() {
    let storage = Storage::in_memory();
    let app = AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        QuestionBank::from_json(BANK).unwrap(),
        Arc::new(InOrder),
    );

    let handle = app
        .assessment()
        .start(Candidate::new("Bob", "bob@example.com", "9123456789"))
        .unwrap();
    let report = handle.finished().await.unwrap();
    assert_eq!(report.score, 0);
    app.assessment().complete(report).await.unwrap();

    let listed = app
        .results()
        .browse(&ResultQuery {
            sort: ResultSort::ScoreHigh,
            ..ResultQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].attempted, 0);
}
