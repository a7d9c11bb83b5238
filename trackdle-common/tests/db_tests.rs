//! Repository integration tests against a scratch SQLite database

use chrono::NaiveDate;
use tempfile::TempDir;
use trackdle_common::db::{init_database, DailyInfoRepository, PuzzleRepository};
use trackdle_common::{ActiveEntry, DailyInfo, Error, Puzzle, SnippetRef};
use uuid::Uuid;

async fn scratch_pool(dir: &TempDir) -> sqlx::SqlitePool {
    init_database(&dir.path().join("trackdle.db")).await.unwrap()
}

fn puzzle(id: u128, game: &str, title: &str) -> Puzzle {
    Puzzle {
        id: Uuid::from_u128(id),
        composer: "Nobuo Uematsu".to_string(),
        title: title.to_string(),
        game: game.to_string(),
        release_date: "1997-01-31".to_string(),
        extra_hint: Some("battle theme".to_string()),
        source_path: format!("/audio/{}.flac", id),
        duration_secs: 95.0,
    }
}

#[tokio::test]
async fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trackdle.db");
    let pool = init_database(&path).await.unwrap();
    drop(pool);
    // Second open against the existing file must succeed
    init_database(&path).await.unwrap();
}

#[tokio::test]
async fn puzzle_insert_and_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = PuzzleRepository::new(scratch_pool(&dir).await);

    let original = puzzle(1, "Final Fantasy VII", "One-Winged Angel");
    repo.insert(&original).await.unwrap();

    let loaded = repo.get(original.id).await.unwrap().unwrap();
    assert_eq!(loaded, original);
    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(repo.get(Uuid::from_u128(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn pick_random_honors_exclusions() {
    let dir = TempDir::new().unwrap();
    let repo = PuzzleRepository::new(scratch_pool(&dir).await);

    for i in 1..=5u128 {
        repo.insert(&puzzle(i, "Chrono Trigger", &format!("Track {}", i)))
            .await
            .unwrap();
    }

    let exclude: Vec<Uuid> = (1..=3u128).map(Uuid::from_u128).collect();
    let picked = repo.pick_random_excluding(&exclude, 2).await.unwrap();

    assert_eq!(picked.len(), 2);
    for p in &picked {
        assert!(!exclude.contains(&p.id));
    }
    assert_ne!(picked[0].id, picked[1].id);
}

#[tokio::test]
async fn pick_random_shortfall_is_insufficient_data() {
    let dir = TempDir::new().unwrap();
    let repo = PuzzleRepository::new(scratch_pool(&dir).await);

    repo.insert(&puzzle(1, "Undertale", "Megalovania")).await.unwrap();
    repo.insert(&puzzle(2, "Undertale", "Hopes and Dreams")).await.unwrap();

    let exclude = vec![Uuid::from_u128(1)];
    let result = repo.pick_random_excluding(&exclude, 2).await;
    assert!(matches!(result, Err(Error::InsufficientData(_))));
}

fn sample_info() -> DailyInfo {
    let id = Uuid::from_u128(7);
    DailyInfo {
        active: vec![ActiveEntry {
            puzzle_id: id,
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            snippets: vec![SnippetRef {
                uri: "/snippets/7/tier0.mp3".to_string(),
                start_secs: 12.5,
                length_secs: 0.5,
            }],
        }],
        recent_ids: vec![id],
    }
}

#[tokio::test]
async fn daily_info_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = DailyInfoRepository::new(scratch_pool(&dir).await);

    let (empty, version) = repo.load().await.unwrap();
    assert_eq!(empty, DailyInfo::default());
    assert_eq!(version, 0);

    let info = sample_info();
    repo.save(0, &info).await.unwrap();

    let (loaded, version) = repo.load().await.unwrap();
    assert_eq!(loaded, info);
    assert_eq!(version, 1);
}

#[tokio::test]
async fn daily_info_stale_save_conflicts() {
    let dir = TempDir::new().unwrap();
    let repo = DailyInfoRepository::new(scratch_pool(&dir).await);

    let info = sample_info();
    repo.save(0, &info).await.unwrap();

    // A second writer that still believes version 0 must be rejected,
    // and the committed record must remain untouched
    assert!(matches!(
        repo.save(0, &DailyInfo::default()).await,
        Err(Error::Conflict(_))
    ));
    let (loaded, version) = repo.load().await.unwrap();
    assert_eq!(loaded, info);
    assert_eq!(version, 1);

    // The writer holding the current version succeeds
    repo.save(1, &DailyInfo::default()).await.unwrap();
    let (_, version) = repo.load().await.unwrap();
    assert_eq!(version, 2);
}
