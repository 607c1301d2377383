use academy_core::model::{AchievementId, Profile, UserId};
use academy_core::time::fixed_now;
use chrono::Duration;
use storage::repository::{AchievementRepository, ProfileRecord, ProfileRepository};
use storage::sqlite::SqliteRepository;
use uuid::Uuid;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrips_profiles() {
    let repo = connect("memdb_profiles").await;
    let user_id = UserId::new(Uuid::new_v4());

    let profile = Profile::new(user_id, "Dana", Some(4)).unwrap();
    repo.upsert_profile(&ProfileRecord::from_profile(&profile, fixed_now()))
        .await
        .unwrap();

    let fetched = repo.get_profile(user_id).await.unwrap().expect("profile");
    assert_eq!(fetched.updated_at, fixed_now());
    assert_eq!(fetched.into_profile().unwrap(), profile);

    let updated = Profile::new(user_id, "Dana R.", None).unwrap();
    let later = fixed_now() + Duration::hours(1);
    repo.upsert_profile(&ProfileRecord::from_profile(&updated, later))
        .await
        .unwrap();

    let fetched = repo.get_profile(user_id).await.unwrap().expect("profile");
    assert_eq!(fetched.display_name, "Dana R.");
    assert_eq!(fetched.grade_level, None);
    assert_eq!(fetched.updated_at, later);
}

#[tokio::test]
async fn sqlite_missing_profile_is_none() {
    let repo = connect("memdb_missing_profile").await;
    let missing = repo.get_profile(UserId::new(Uuid::new_v4())).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn sqlite_grants_achievements_once() {
    let repo = connect("memdb_achievements").await;
    let user_id = UserId::new(Uuid::new_v4());
    let first = AchievementId::new("first-course").unwrap();
    let certified = AchievementId::new("certified").unwrap();

    assert!(repo.grant(user_id, &first, fixed_now()).await.unwrap());
    assert!(!repo.grant(user_id, &first, fixed_now()).await.unwrap());
    assert!(
        repo.grant(user_id, &certified, fixed_now() + Duration::minutes(5))
            .await
            .unwrap()
    );

    let earned = repo.list_earned(user_id).await.unwrap();
    assert_eq!(earned.len(), 2);
    assert_eq!(earned[0].achievement_id, first);
    assert_eq!(earned[1].achievement_id, certified);

    // Another learner sees nothing.
    let other = repo.list_earned(UserId::new(Uuid::new_v4())).await.unwrap();
    assert!(other.is_empty());
}
