//! Main authentication service implementation

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use um_shared::validation::{is_blank, is_valid_email};

use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::AccountDirectory;
use crate::services::attempt_guard::LoginAttemptGuard;
use crate::services::clock::{Clock, SystemClock};
use crate::services::notification::EmailDispatcher;
use crate::services::password::{generate_password, generate_user_id, PasswordEncoder};
use crate::services::token::TokenCodec;

use super::config::AuthServiceConfig;
use super::types::{NewUser, UserUpdate};

/// Authentication service for login, lockout and account lifecycle
pub struct AuthService<D, E>
where
    D: AccountDirectory,
    E: EmailDispatcher,
{
    /// Directory owning the identity records
    directory: Arc<D>,
    /// Delivery of generated passwords
    email_dispatcher: Arc<E>,
    /// Bearer token issuing
    token_codec: Arc<TokenCodec>,
    /// Failed attempt tracking
    attempt_guard: Arc<LoginAttemptGuard>,
    /// Password hash primitive
    password_encoder: Arc<dyn PasswordEncoder>,
    clock: Arc<dyn Clock>,
    config: AuthServiceConfig,
}

impl<D, E> AuthService<D, E>
where
    D: AccountDirectory,
    E: EmailDispatcher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `directory` - Account persistence
    /// * `email_dispatcher` - Sends generated passwords
    /// * `token_codec` - Issues tokens on successful login
    /// * `attempt_guard` - Tracks failed logins; shared with anything that unlocks accounts
    /// * `password_encoder` - Hash primitive
    /// * `config` - Service configuration
    pub fn new(
        directory: Arc<D>,
        email_dispatcher: Arc<E>,
        token_codec: Arc<TokenCodec>,
        attempt_guard: Arc<LoginAttemptGuard>,
        password_encoder: Arc<dyn PasswordEncoder>,
        config: AuthServiceConfig,
    ) -> Self {
        Self::with_clock(
            directory,
            email_dispatcher,
            token_codec,
            attempt_guard,
            password_encoder,
            config,
            Arc::new(SystemClock),
        )
    }

    /// Create a new authentication service with an explicit time source
    pub fn with_clock(
        directory: Arc<D>,
        email_dispatcher: Arc<E>,
        token_codec: Arc<TokenCodec>,
        attempt_guard: Arc<LoginAttemptGuard>,
        password_encoder: Arc<dyn PasswordEncoder>,
        config: AuthServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            email_dispatcher,
            token_codec,
            attempt_guard,
            password_encoder,
            clock,
            config,
        }
    }

    pub fn token_codec(&self) -> &Arc<TokenCodec> {
        &self.token_codec
    }

    pub fn attempt_guard(&self) -> &Arc<LoginAttemptGuard> {
        &self.attempt_guard
    }

    /// Authenticate a user and issue a token
    ///
    /// Steps, in order:
    /// 1. Look the user up; unknown users still cost one hash verification
    /// 2. Check the password; a mismatch is recorded as a failed attempt
    /// 3. Refuse while the attempt threshold is reached, even with the right password
    /// 4. Refuse disabled accounts
    /// 5. Clear the attempt record, stamp the login, persist and issue a token
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome)` - Persisted user snapshot and signed token
    /// * `Err(DomainError)` - `UserNotFound`, `AuthenticationFailed`,
    ///   `AccountLocked`, `AccountDisabled`, or a directory failure
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        let mut user = match self.directory.find_by_username(username).await? {
            Some(user) => user,
            None => {
                self.password_encoder.verify_dummy(password);
                warn!(username = %username, "Login attempt for unknown username");
                return Err(AuthError::UserNotFound.into());
            }
        };

        if !self.password_encoder.verify(password, &user.password_hash) {
            let attempts = self.attempt_guard.record_failed_attempt(username);
            if attempts >= self.attempt_guard.max_attempts() && user.is_not_locked {
                user.lock();
                self.directory.save(user).await?;
                warn!(username = %username, attempts, "Account locked after failed logins");
            } else {
                warn!(username = %username, attempts, "Login failed: bad credentials");
            }
            return Err(AuthError::AuthenticationFailed.into());
        }

        if self.attempt_guard.has_exceeded_max_attempts(username) {
            if user.is_not_locked {
                user.lock();
                self.directory.save(user).await?;
            }
            warn!(username = %username, "Login refused: account locked");
            return Err(AuthError::AccountLocked.into());
        }

        if !user.is_active {
            warn!(username = %username, "Login refused: account disabled");
            return Err(AuthError::AccountDisabled.into());
        }

        self.attempt_guard.evict_on_success(username);
        user.unlock();
        user.record_login(self.clock.now());
        let user = self.directory.save(user).await?;

        let token = self
            .token_codec
            .issue(&user.username, &user.authority_list())?;

        info!(username = %user.username, role = %user.role(), "User logged in");
        Ok(LoginOutcome::new(user, token))
    }

    /// Self-registration with the default role and a generated password
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError)` - Missing fields, invalid email, `UsernameExists`,
    ///   `EmailExists`, or a directory failure
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        username: &str,
        email: &str,
    ) -> DomainResult<User> {
        require("first_name", first_name)?;
        require("last_name", last_name)?;
        require("username", username)?;
        require_email(email)?;

        self.validate_uniqueness("", username, email).await?;

        let password = generate_password();
        let user = User::new(
            generate_user_id(),
            first_name.to_string(),
            last_name.to_string(),
            username.to_string(),
            email.to_string(),
            self.password_encoder.hash(&password)?,
            self.config.default_role,
            self.clock.now(),
        );
        let user = self.directory.save(user).await?;

        info!(username = %user.username, "New user registered");
        self.dispatch_password(&user, &password).await;
        Ok(user)
    }

    /// Check that `new_username` and `new_email` are free
    ///
    /// With a blank `current_username` (registration) any existing record
    /// holding either value is a conflict. Otherwise (update) a record is a
    /// conflict only when its id differs from the current user's id, so
    /// keeping one's own username or email is allowed.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The current user, for updates
    /// * `Ok(None)` - Registration with no conflict
    /// * `Err(DomainError)` - `UserNotFound` for an unknown current user,
    ///   `UsernameExists` or `EmailExists` on conflict
    pub async fn validate_uniqueness(
        &self,
        current_username: &str,
        new_username: &str,
        new_email: &str,
    ) -> DomainResult<Option<User>> {
        let by_username = self.directory.find_by_username(new_username).await?;
        let by_email = self.directory.find_by_email(new_email).await?;

        if is_blank(current_username) {
            if by_username.is_some() {
                return Err(AuthError::UsernameExists.into());
            }
            if by_email.is_some() {
                return Err(AuthError::EmailExists.into());
            }
            return Ok(None);
        }

        let current = self
            .directory
            .find_by_username(current_username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if by_username.is_some_and(|other| other.id != current.id) {
            return Err(AuthError::UsernameExists.into());
        }
        if by_email.is_some_and(|other| other.id != current.id) {
            return Err(AuthError::EmailExists.into());
        }
        Ok(Some(current))
    }

    /// Administrator account creation with an explicit role and status
    pub async fn add_new_user(&self, new_user: NewUser) -> DomainResult<User> {
        require("first_name", &new_user.first_name)?;
        require("last_name", &new_user.last_name)?;
        require("username", &new_user.username)?;
        require_email(&new_user.email)?;
        let role = Role::from_str(&new_user.role)?;

        self.validate_uniqueness("", &new_user.username, &new_user.email)
            .await?;

        let password = generate_password();
        let mut user = User::new(
            generate_user_id(),
            new_user.first_name,
            new_user.last_name,
            new_user.username,
            new_user.email,
            self.password_encoder.hash(&password)?,
            role,
            self.clock.now(),
        );
        user.is_active = new_user.is_active;
        user.is_not_locked = new_user.is_not_locked;
        let user = self.directory.save(user).await?;

        info!(username = %user.username, role = %role, "User created");
        self.dispatch_password(&user, &password).await;
        Ok(user)
    }

    /// Update profile, role and status of `current_username`
    ///
    /// Authorities are recomputed from the requested role. Setting
    /// `is_not_locked` clears any failed attempt record so the account is
    /// really unlocked.
    pub async fn update_user(
        &self,
        current_username: &str,
        update: UserUpdate,
    ) -> DomainResult<User> {
        require("current_username", current_username)?;
        require("first_name", &update.first_name)?;
        require("last_name", &update.last_name)?;
        require("username", &update.username)?;
        require_email(&update.email)?;
        let role = Role::from_str(&update.role)?;

        let mut user = self
            .validate_uniqueness(current_username, &update.username, &update.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.first_name = update.first_name;
        user.last_name = update.last_name;
        user.username = update.username;
        user.email = update.email;
        user.set_role(role);
        user.is_active = update.is_active;
        if update.is_not_locked {
            user.unlock();
            self.attempt_guard.evict_on_success(current_username);
            self.attempt_guard.evict_on_success(&user.username);
        } else {
            user.lock();
        }

        let user = self.directory.save(user).await?;
        info!(
            username = %current_username,
            new_username = %user.username,
            role = %role,
            "User updated"
        );
        Ok(user)
    }

    /// Replace the password of the account bound to `email`
    ///
    /// The new password is persisted before it is emailed; a failed email
    /// does not roll it back.
    pub async fn reset_password(&self, email: &str) -> DomainResult<()> {
        let mut user = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        let password = generate_password();
        user.password_hash = self.password_encoder.hash(&password)?;
        let user = self.directory.save(user).await?;

        info!(username = %user.username, "Password reset");
        self.dispatch_password(&user, &password).await;
        Ok(())
    }

    /// Delete the account named `username`
    pub async fn delete_user(&self, username: &str) -> DomainResult<()> {
        let user = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.directory.delete_by_id(user.id).await? {
            return Err(AuthError::UserNotFound.into());
        }
        self.attempt_guard.evict_on_success(username);

        info!(username = %username, "User deleted");
        Ok(())
    }

    /// Administrative unlock: clears failed attempts and the locked flag
    pub async fn unlock_account(&self, username: &str) -> DomainResult<User> {
        let mut user = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.attempt_guard.evict_on_success(username);
        user.unlock();
        let user = self.directory.save(user).await?;

        info!(username = %username, "Account unlocked");
        Ok(user)
    }

    pub async fn get_users(&self) -> DomainResult<Vec<User>> {
        self.directory.find_all().await
    }

    pub async fn find_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.directory.find_by_username(username).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.directory.find_by_email(email).await
    }

    async fn dispatch_password(&self, user: &User, password: &str) {
        if !self.config.dispatch_passwords {
            debug!(username = %user.username, "Password dispatch disabled");
            return;
        }
        if let Err(e) = self
            .email_dispatcher
            .send_new_password_email(&user.first_name, password, &user.email)
            .await
        {
            error!(username = %user.username, error = %e, "Failed to send password email");
        }
    }
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if is_blank(value) {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

fn require_email(email: &str) -> DomainResult<()> {
    require("email", email)?;
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail.into());
    }
    Ok(())
}
