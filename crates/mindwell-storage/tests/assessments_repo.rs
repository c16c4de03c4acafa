use uuid::Uuid;

use mindwell_core::models::assessment::{AnswerEntry, AssessmentKind};
use mindwell_storage::assessments::AssessmentRepository;
use mindwell_storage::pool::Database;
use mindwell_storage::users::UserRepository;

async fn test_db(dir: &tempfile::TempDir) -> Database {
    let path = dir.path().join("test.db");
    Database::connect(path.to_str().unwrap())
        .await
        .expect("failed to open test database")
}

async fn seed_user(db: &Database) -> Uuid {
    UserRepository::new(db.clone())
        .create_anonymous()
        .await
        .unwrap()
        .id
}

fn answers(values: &[i64]) -> Vec<AnswerEntry> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| AnswerEntry {
            question_id: i as i64,
            value: *v,
        })
        .collect()
}

#[tokio::test]
async fn created_assessment_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = AssessmentRepository::new(db);

    let created = repo
        .create(user_id, AssessmentKind::Phq9, &answers(&[3; 9]), 27, "重度抑郁症状")
        .await
        .unwrap();

    let fetched = repo
        .get(user_id, AssessmentKind::Phq9, created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.kind, AssessmentKind::Phq9);
    assert_eq!(fetched.score, 27);
    assert_eq!(fetched.interpretation, "重度抑郁症状");
    assert_eq!(fetched.answers.len(), 9);
    assert!(fetched.answers.iter().all(|a| a.value == 3));
}

#[tokio::test]
async fn history_is_per_kind_and_capped_at_ten() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = AssessmentRepository::new(db.clone());

    for i in 0..12 {
        let assessment = repo
            .create(user_id, AssessmentKind::Phq9, &answers(&[0; 9]), i, "无抑郁症状")
            .await
            .unwrap();
        // Spread creation times one minute apart so ordering is deterministic.
        sqlx::query("UPDATE assessments SET created_at = created_at + ? WHERE id = ?")
            .bind(i * 60_000)
            .bind(assessment.id.to_string())
            .execute(db.pool())
            .await
            .unwrap();
    }
    repo.create(user_id, AssessmentKind::Gad7, &answers(&[0; 7]), 0, "无焦虑症状")
        .await
        .unwrap();

    let history = repo.list_recent(user_id, AssessmentKind::Phq9).await.unwrap();
    assert_eq!(history.len(), 10);
    // Newest first: scores 11 down to 2.
    assert_eq!(history[0].score, 11);
    assert_eq!(history[9].score, 2);
    assert!(history.iter().all(|a| a.kind == AssessmentKind::Phq9));

    let gad7_history = repo.list_recent(user_id, AssessmentKind::Gad7).await.unwrap();
    assert_eq!(gad7_history.len(), 1);
}

#[tokio::test]
async fn results_are_scoped_to_their_owner() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let alice = seed_user(&db).await;
    let bob = seed_user(&db).await;
    let repo = AssessmentRepository::new(db);

    let assessment = repo
        .create(alice, AssessmentKind::Gad7, &answers(&[1; 7]), 7, "轻度焦虑症状")
        .await
        .unwrap();

    assert!(repo
        .get(bob, AssessmentKind::Gad7, assessment.id)
        .await
        .unwrap()
        .is_none());
    assert!(repo.list_recent(bob, AssessmentKind::Gad7).await.unwrap().is_empty());

    assert_eq!(repo.count(alice).await.unwrap(), 1);
    assert_eq!(repo.count(bob).await.unwrap(), 0);
}

#[tokio::test]
async fn wrong_kind_does_not_match() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = AssessmentRepository::new(db);

    let assessment = repo
        .create(user_id, AssessmentKind::Phq9, &answers(&[1; 9]), 9, "轻度抑郁症状")
        .await
        .unwrap();

    assert!(repo
        .get(user_id, AssessmentKind::Gad7, assessment.id)
        .await
        .unwrap()
        .is_none());
}
