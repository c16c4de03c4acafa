use uuid::Uuid;

use mindwell_core::models::mood_diary::Mood;
use mindwell_storage::diaries::{DiaryListQuery, DiaryUpdate, MoodDiaryRepository};
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

/// Shift an entry's creation time by whole days (negative = into the past).
async fn shift_days(db: &Database, diary_id: Uuid, days: i64) {
    sqlx::query("UPDATE mood_diaries SET created_at = created_at + ? WHERE id = ?")
        .bind(days * 24 * 60 * 60 * 1000)
        .bind(diary_id.to_string())
        .execute(db.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_get_update_delete_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = MoodDiaryRepository::new(db);

    let diary = repo
        .create(
            user_id,
            Mood::Anxious,
            7,
            Some(vec!["工作".to_string(), "考试".to_string()]),
            Some("睡前焦虑".to_string()),
        )
        .await
        .unwrap();

    let fetched = repo.get(user_id, diary.id).await.unwrap().unwrap();
    assert_eq!(fetched.mood, Mood::Anxious);
    assert_eq!(fetched.intensity, 7);
    assert_eq!(
        fetched.triggers.as_deref(),
        Some(&["工作".to_string(), "考试".to_string()][..])
    );

    // Partial update: only intensity changes.
    let updated = repo
        .update(
            user_id,
            diary.id,
            &DiaryUpdate {
                intensity: Some(4),
                ..DiaryUpdate::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.mood, Mood::Anxious);
    assert_eq!(updated.intensity, 4);
    assert_eq!(updated.notes.as_deref(), Some("睡前焦虑"));

    assert!(repo.delete(user_id, diary.id).await.unwrap());
    assert!(repo.get(user_id, diary.id).await.unwrap().is_none());
}

#[tokio::test]
async fn entries_are_scoped_to_their_owner() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let alice = seed_user(&db).await;
    let bob = seed_user(&db).await;
    let repo = MoodDiaryRepository::new(db);

    let diary = repo.create(alice, Mood::Happy, 8, None, None).await.unwrap();

    assert!(repo.get(bob, diary.id).await.unwrap().is_none());
    assert!(repo
        .update(bob, diary.id, &DiaryUpdate::default())
        .await
        .unwrap()
        .is_none());
    assert!(!repo.delete(bob, diary.id).await.unwrap());

    // Still intact for the owner.
    assert!(repo.get(alice, diary.id).await.unwrap().is_some());
}

#[tokio::test]
async fn listing_pages_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = MoodDiaryRepository::new(db.clone());

    let mut ids = Vec::new();
    for i in 0..5 {
        let diary = repo.create(user_id, Mood::Calm, 5, None, None).await.unwrap();
        // Deterministic creation times: one entry per past day.
        shift_days(&db, diary.id, -(4 - i)).await;
        ids.push(diary.id);
    }

    let (page1, total) = repo
        .list(
            user_id,
            &DiaryListQuery {
                page: 1,
                limit: 2,
                ..DiaryListQuery::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(total, 5);
    assert_eq!(page1.len(), 2);
    // Newest first: the last created entry (shifted 0 days) leads.
    assert_eq!(page1[0].id, ids[4]);
    assert_eq!(page1[1].id, ids[3]);

    let (page3, _) = repo
        .list(
            user_id,
            &DiaryListQuery {
                page: 3,
                limit: 2,
                ..DiaryListQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page3.len(), 1);
    assert_eq!(page3[0].id, ids[0]);
}

#[tokio::test]
async fn date_range_filters_the_listing() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = MoodDiaryRepository::new(db.clone());

    let recent = repo.create(user_id, Mood::Happy, 6, None, None).await.unwrap();
    let old = repo.create(user_id, Mood::Sad, 3, None, None).await.unwrap();
    shift_days(&db, old.id, -30).await;

    let start = jiff::Timestamp::now() - jiff::SignedDuration::from_hours(7 * 24);
    let (entries, _) = repo
        .list(
            user_id,
            &DiaryListQuery {
                start: Some(start),
                page: 1,
                limit: 20,
                ..DiaryListQuery::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, recent.id);
}

#[tokio::test]
async fn stats_aggregate_per_mood_and_exclude_entries_outside_the_window() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let user_id = seed_user(&db).await;
    let repo = MoodDiaryRepository::new(db.clone());

    // Inside the 7-day window: three happy (4, 6, 8), two sad (5, 7).
    for intensity in [4, 6, 8] {
        let diary = repo
            .create(user_id, Mood::Happy, intensity, None, None)
            .await
            .unwrap();
        shift_days(&db, diary.id, -1).await;
    }
    for intensity in [5, 7] {
        repo.create(user_id, Mood::Sad, intensity, None, None)
            .await
            .unwrap();
    }
    // Outside the window: must not count.
    let stale = repo.create(user_id, Mood::Happy, 10, None, None).await.unwrap();
    shift_days(&db, stale.id, -8).await;

    let stats = repo.stats(user_id, 7).await.unwrap();

    assert_eq!(stats.stats.len(), 2);
    // Ordered by count, descending.
    assert_eq!(stats.stats[0].mood, Mood::Happy);
    assert_eq!(stats.stats[0].count, 3);
    assert!((stats.stats[0].avg_intensity - 6.0).abs() < 1e-9);
    assert_eq!(stats.stats[1].mood, Mood::Sad);
    assert_eq!(stats.stats[1].count, 2);
    assert!((stats.stats[1].avg_intensity - 6.0).abs() < 1e-9);

    // The daily trend covers the same five entries.
    let trend_total: i64 = stats.trend.iter().map(|d| d.count).sum();
    assert_eq!(trend_total, 5);
    for pair in stats.trend.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
}

#[tokio::test]
async fn stats_are_scoped_to_the_user() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db(&dir).await;
    let alice = seed_user(&db).await;
    let bob = seed_user(&db).await;
    let repo = MoodDiaryRepository::new(db);

    repo.create(alice, Mood::Happy, 9, None, None).await.unwrap();
    repo.create(bob, Mood::Angry, 2, None, None).await.unwrap();

    let stats = repo.stats(alice, 7).await.unwrap();
    assert_eq!(stats.stats.len(), 1);
    assert_eq!(stats.stats[0].mood, Mood::Happy);
}
