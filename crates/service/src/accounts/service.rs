use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use models::errors::IssueKind;
use models::user::{AddFavInput, LoginInput, SignupInput, EMAIL_FIELD, FAV_MOVIES_FIELD, PASSWORD_FIELD};
use models::validation::validate;
use models::{Record, RecordId, ValidationError};
use rand::rngs::OsRng;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::errors::AuthError;
use super::token::TokenIssuer;
use crate::errors::ServiceError;
use crate::query::ListQuery;
use crate::resource::{ListPage, ResourceStore};

/// A user (secrets stripped) together with a fresh session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: Record,
    pub token: String,
}

/// Account workflows on top of the `users` store.
pub struct AccountService {
    users: Arc<ResourceStore>,
    movies: Option<Arc<ResourceStore>>,
    tokens: TokenIssuer,
}

impl AccountService {
    pub fn new(users: Arc<ResourceStore>, tokens: TokenIssuer) -> Self {
        Self { users, movies: None, tokens }
    }

    /// Check favourites against this movies store.
    pub fn with_movies(mut self, movies: Arc<ResourceStore>) -> Self {
        self.movies = Some(movies);
        self
    }

    fn public(&self, user: &Record) -> Record {
        user.without(self.users.def().hidden_fields)
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    fn verify_password(password: &str, stored: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Hash(e.to_string()))?;
        Argon2::default().verify_password(password.as_bytes(), &parsed).map_err(|_| AuthError::WrongPassword)
    }

    fn session(&self, user: &Record) -> Result<AuthSession, AuthError> {
        let id = user.id().ok_or_else(|| AuthError::Token("user record has no id".into()))?;
        Ok(AuthSession { user: self.public(user), token: self.tokens.issue(&id)? })
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::user::{self, SignupInput};
    /// use service::accounts::{AccountService, TokenIssuer};
    /// use service::resource::ResourceStore;
    /// use service::storage::MemoryStore;
    /// let users = Arc::new(ResourceStore::new(user::definition(), Arc::new(MemoryStore::new())));
    /// let svc = AccountService::new(users, TokenIssuer::new("secret", 1));
    /// let input = SignupInput {
    ///     name: "Ali".into(),
    ///     email: "ali@example.com".into(),
    ///     password: "Secret123".into(),
    ///     confirm_password: "Secret123".into(),
    ///     photo: None,
    /// };
    /// let session = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert!(session.user.get("password").is_none());
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn signup(&self, input: SignupInput) -> Result<AuthSession, AuthError> {
        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let mut fields = Map::new();
        fields.insert("name".into(), Value::String(input.name));
        fields.insert(EMAIL_FIELD.into(), Value::String(input.email));
        fields.insert(PASSWORD_FIELD.into(), Value::String(input.password));
        if let Some(photo) = input.photo {
            fields.insert("photo".into(), Value::String(photo));
        }
        let spec = &self.users.def().spec;
        spec.normalize(&mut fields);
        spec.apply_defaults(&mut fields, Utc::now());
        validate(&fields, spec).map_err(ServiceError::from)?;

        let email = fields.get(EMAIL_FIELD).cloned().unwrap_or(Value::Null);
        if let Some(existing) = self.users.find_one(EMAIL_FIELD, &email).await? {
            debug!(user_id = ?existing.id(), "email already registered");
            return Err(AuthError::Conflict);
        }

        let plain = fields.get(PASSWORD_FIELD).and_then(Value::as_str).unwrap_or_default().to_string();
        fields.insert(PASSWORD_FIELD.into(), Value::String(Self::hash_password(&plain)?));

        let user = self.users.create(fields).await.map_err(|e| match e {
            ServiceError::Validation(v) if v.invalid_fields.iter().any(|i| i.issue == IssueKind::Duplicate) => {
                AuthError::Conflict
            }
            other => AuthError::Service(other),
        })?;
        info!(user_id = ?user.id(), "user_registered");
        self.session(&user)
    }

    /// Check credentials and issue a token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = input.email.trim();
        if email.is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .users
            .find_one(EMAIL_FIELD, &Value::String(email.to_string()))
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let stored = user
            .get(PASSWORD_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| AuthError::Hash("user record has no password hash".into()))?;
        Self::verify_password(&input.password, stored)?;

        info!(user_id = ?user.id(), "user_logged_in");
        self.session(&user)
    }

    /// Resolve a bearer token to the id of the user it was issued for.
    pub fn authenticate(&self, token: Option<&str>) -> Result<RecordId, AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::NotLoggedIn)?;
        let claims = self.tokens.verify(token)?;
        Ok(RecordId::from(claims.sub))
    }

    /// Append a movie to the user's favourites.
    #[instrument(skip(self, input), fields(user_id = %user_id, movie_id = %input.movie_id))]
    pub async fn add_favourite(&self, user_id: &RecordId, input: AddFavInput) -> Result<Record, AuthError> {
        let movie_id = input.movie_id.trim().to_string();
        if movie_id.is_empty() {
            let mut err = ValidationError::new();
            err.missing("movieId");
            return Err(ServiceError::from(err).into());
        }
        if let Some(movies) = &self.movies {
            let id = movies
                .def()
                .id_strategy
                .parse_id(&movie_id)
                .ok_or_else(|| ServiceError::not_found(movies.def().singular, &RecordId::from(movie_id.as_str())))?;
            movies.get_by_id(&id).await?;
        }

        let user = self
            .users
            .modify(user_id, |record| {
                if !matches!(record.get(FAV_MOVIES_FIELD), Some(Value::Array(_))) {
                    record.insert(FAV_MOVIES_FIELD, Value::Array(Vec::new()));
                }
                let Some(Value::Array(favs)) = record.get_mut(FAV_MOVIES_FIELD) else { return Ok(()) };
                if favs.iter().any(|v| v.as_str() == Some(movie_id.as_str())) {
                    return Err(AuthError::AlreadyFavourite);
                }
                favs.push(Value::String(movie_id.clone()));
                Ok(())
            })
            .await?;
        info!(user_id = %user_id, "favourite_added");
        Ok(self.public(&user))
    }

    /// Users with secrets stripped.
    pub async fn list_users(&self, query: &ListQuery) -> Result<ListPage, AuthError> {
        let page = self.users.list_page(query).await?;
        Ok(ListPage { records: page.records.iter().map(|u| self.public(u)).collect(), total: page.total })
    }
}
