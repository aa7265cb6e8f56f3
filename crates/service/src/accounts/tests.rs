use std::sync::Arc;

use models::user::{AddFavInput, LoginInput, SignupInput};
use models::{movie, user, Record, RecordId};
use serde_json::{json, Value};

use super::{AccountService, AuthError};
use crate::accounts::TokenIssuer;
use crate::errors::ServiceError;
use crate::query::ListQuery;
use crate::resource::ResourceStore;
use crate::storage::MemoryStore;

struct Fixture {
    svc: AccountService,
    users: Arc<ResourceStore>,
    movie_id: RecordId,
}

async fn fixture() -> Fixture {
    let users = Arc::new(ResourceStore::new(user::definition(), Arc::new(MemoryStore::new())));
    let movies = Arc::new(ResourceStore::new(movie::definition(), Arc::new(MemoryStore::new())));
    let movie = movies
        .create(
            json!({
                "name": "Arrival", "language": "English", "description": "d", "duration": 116,
                "releaseYear": 2016, "genres": ["Sci-Fi"], "directors": ["Villeneuve"],
                "coverImage": "arrival.jpg", "actors": ["Adams"], "price": 12
            })
            .as_object()
            .cloned()
            .unwrap(),
        )
        .await
        .unwrap();
    let svc = AccountService::new(users.clone(), TokenIssuer::new("test-secret", 1)).with_movies(movies);
    Fixture { svc, users, movie_id: movie.id().unwrap() }
}

fn signup_input(email: &str, password: &str, confirm: &str) -> SignupInput {
    SignupInput {
        name: "Ali".into(),
        email: email.into(),
        password: password.into(),
        confirm_password: confirm.into(),
        photo: None,
    }
}

async fn signed_up(f: &Fixture) -> Record {
    f.svc.signup(signup_input("ali@example.com", "Secret123", "Secret123")).await.unwrap().user
}

#[tokio::test]
async fn signup_hashes_password_and_hides_it() {
    let f = fixture().await;
    let session = f.svc.signup(signup_input(" ali@example.com ", "Secret123", "Secret123")).await.unwrap();

    assert!(session.user.get("password").is_none());
    assert_eq!(session.user.get("email"), Some(&json!("ali@example.com")));
    assert_eq!(session.user.get("photo"), Some(&json!("profile.png")));
    assert_eq!(session.user.get("favMovies"), Some(&json!([])));

    let stored = f.users.get_by_id(&session.user.id().unwrap()).await.unwrap();
    let hash = stored.get("password").and_then(Value::as_str).unwrap();
    assert!(hash.starts_with("$argon2"));
    assert_ne!(hash, "Secret123");

    let id = f.svc.authenticate(Some(&session.token)).unwrap();
    assert_eq!(Some(id), session.user.id());
}

#[tokio::test]
async fn signup_rejects_mismatch_duplicates_and_invalid_fields() {
    let f = fixture().await;
    assert!(matches!(
        f.svc.signup(signup_input("ali@example.com", "Secret123", "Secret124")).await,
        Err(AuthError::PasswordMismatch)
    ));

    signed_up(&f).await;
    assert!(matches!(
        f.svc.signup(signup_input("ali@example.com", "Other1234", "Other1234")).await,
        Err(AuthError::Conflict)
    ));

    match f.svc.signup(signup_input("not-an-email", "short", "short")).await {
        Err(AuthError::Service(ServiceError::Validation(v))) => {
            let fields: Vec<_> = v.invalid_fields.iter().map(|i| i.field.as_str()).collect();
            assert_eq!(fields, vec!["email", "password"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(f.users.count(&ListQuery::all()).await.unwrap(), 1);
}

#[tokio::test]
async fn login_distinguishes_missing_unknown_and_wrong_password() {
    let f = fixture().await;
    signed_up(&f).await;

    let login = |email: &str, password: &str| LoginInput { email: email.into(), password: password.into() };
    assert!(matches!(f.svc.login(login("", "Secret123")).await, Err(AuthError::MissingCredentials)));
    assert!(matches!(f.svc.login(login("ali@example.com", "")).await, Err(AuthError::MissingCredentials)));
    assert!(matches!(f.svc.login(login("bob@example.com", "Secret123")).await, Err(AuthError::UserNotFound)));
    assert!(matches!(f.svc.login(login("ali@example.com", "Wrong1234")).await, Err(AuthError::WrongPassword)));

    let session = f.svc.login(login("ali@example.com", "Secret123")).await.unwrap();
    assert!(session.user.get("password").is_none());
    assert!(!session.token.is_empty());
}

#[tokio::test]
async fn authenticate_requires_a_valid_token() {
    let f = fixture().await;
    assert!(matches!(f.svc.authenticate(None), Err(AuthError::NotLoggedIn)));
    assert!(matches!(f.svc.authenticate(Some("  ")), Err(AuthError::NotLoggedIn)));
    assert!(matches!(f.svc.authenticate(Some("abc.def.ghi")), Err(AuthError::InvalidToken(_))));
}

#[tokio::test]
async fn add_favourite_appends_once() {
    let f = fixture().await;
    let user_id = signed_up(&f).await.id().unwrap();
    let input = || AddFavInput { movie_id: f.movie_id.to_string() };

    let updated = f.svc.add_favourite(&user_id, input()).await.unwrap();
    assert_eq!(updated.get("favMovies"), Some(&json!([f.movie_id.to_string()])));
    assert!(updated.get("password").is_none());

    assert!(matches!(f.svc.add_favourite(&user_id, input()).await, Err(AuthError::AlreadyFavourite)));
    let stored = f.users.get_by_id(&user_id).await.unwrap();
    assert_eq!(stored.get("favMovies").and_then(Value::as_array).map(Vec::len), Some(1));
}

#[tokio::test]
async fn add_favourite_reports_missing_user_or_movie() {
    let f = fixture().await;
    let user_id = signed_up(&f).await.id().unwrap();

    let ghost = RecordId::from("no-such-user");
    let fav = AddFavInput { movie_id: f.movie_id.to_string() };
    assert!(matches!(f.svc.add_favourite(&ghost, fav).await, Err(AuthError::Service(ServiceError::NotFound(_)))));

    let unknown = AddFavInput { movie_id: "no-such-movie".into() };
    assert!(matches!(f.svc.add_favourite(&user_id, unknown).await, Err(AuthError::Service(ServiceError::NotFound(_)))));

    let empty = AddFavInput { movie_id: " ".into() };
    assert!(matches!(f.svc.add_favourite(&user_id, empty).await, Err(AuthError::Service(ServiceError::Validation(_)))));
}

#[tokio::test]
async fn list_users_strips_passwords() {
    let f = fixture().await;
    signed_up(&f).await;
    let page = f.svc.list_users(&ListQuery::all()).await.unwrap();
    assert_eq!(page.total, 1);
    assert!(page.records.iter().all(|u| u.get("password").is_none()));
}
