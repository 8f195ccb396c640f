//! Operator accounts, sign-up input and login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate raw strings before a handler talks to a port.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use zeroize::Zeroizing;

use super::AccountId;
use super::validation::{ValidationError, ViolationCode, Violations, looks_like_email};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 8;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // E.164: optional plus, no leading zero, at most fifteen digits.
        Regex::new(r"^\+?[1-9]\d{1,14}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// How an account signs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    Email,
    Username,
}

impl LoginKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
        }
    }

    /// Inverse of [`LoginKind::as_str`].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "email" => Some(Self::Email),
            "username" => Some(Self::Username),
            _ => None,
        }
    }
}

/// Normalise a login and classify it. Email logins are lower-cased.
pub fn normalise_login(raw: &str) -> (String, LoginKind) {
    let trimmed = raw.trim();
    if looks_like_email(trimmed) {
        (trimmed.to_lowercase(), LoginKind::Email)
    } else {
        (trimmed.to_owned(), LoginKind::Username)
    }
}

/// Outstanding password reset. Only a digest of the token is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub login: String,
    pub login_kind: LoginKind,
    pub phone: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub password_reset: Option<PasswordReset>,
}

impl Account {
    /// Email address to notify, when the account signs in with one.
    pub fn email(&self) -> Option<&str> {
        match self.login_kind {
            LoginKind::Email => Some(self.login.as_str()),
            LoginKind::Username => None,
        }
    }
}

/// Raw sign-up payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub login: Option<String>,
    pub password: Option<Zeroizing<String>>,
    pub phone: Option<String>,
}

/// Sign-up payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    login: String,
    login_kind: LoginKind,
    password: Zeroizing<String>,
    phone: String,
}

fn check_password(violations: &mut Violations, field: &'static str, password: &str) -> bool {
    if password.chars().count() < PASSWORD_MIN_LEN {
        violations.push(
            field,
            ViolationCode::TooShort,
            format!("{field} must be at least {PASSWORD_MIN_LEN} characters"),
        );
        return false;
    }
    true
}

impl Signup {
    /// Validate a raw sign-up payload.
    ///
    /// # Examples
    /// ```
    /// use admissions::domain::{LoginKind, NewAccount, Signup};
    /// use zeroize::Zeroizing;
    ///
    /// let signup = Signup::try_from_input(&NewAccount {
    ///     login: Some("registrar@example.ac.ke".to_owned()),
    ///     password: Some(Zeroizing::new("long enough".to_owned())),
    ///     phone: Some("+254700000001".to_owned()),
    /// })
    /// .expect("valid signup");
    /// assert_eq!(signup.login_kind(), LoginKind::Email);
    /// ```
    pub fn try_from_input(input: &NewAccount) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let login = violations.required_text("login", input.login.as_deref());
        let password = violations
            .required("password", input.password.clone())
            .filter(|password| check_password(&mut violations, "password", password));
        let phone = violations
            .required_text("phone", input.phone.as_deref())
            .map(|phone| phone.replace([' ', '-'], ""));
        if let Some(phone) = &phone
            && !phone_regex().is_match(phone)
        {
            violations.push(
                "phone",
                ViolationCode::InvalidFormat,
                "phone must be an E.164 number",
            );
        }

        violations.finish(|| {
            let (login, login_kind) = normalise_login(&login?);
            Some(Self {
                login,
                login_kind,
                password: password?,
                phone: phone?,
            })
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn login_kind(&self) -> LoginKind {
        self.login_kind
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `login` is trimmed, non-empty, and lower-cased when it is an email.
/// - `password` is non-empty but keeps caller whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let login = violations.required_text("login", Some(login));
        if password.is_empty() {
            violations.push("password", ViolationCode::Empty, "password must not be empty");
        }
        violations.finish(|| {
            Some(Self {
                login: normalise_login(&login?).0,
                password: Zeroizing::new(password.to_owned()),
            })
        })
    }

    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Request to replace a password using a reset token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetConfirmation {
    token: String,
    new_password: Zeroizing<String>,
}

impl PasswordResetConfirmation {
    pub fn try_from_parts(token: &str, new_password: &str) -> Result<Self, ValidationError> {
        let mut violations = Violations::new();
        let token = violations.required_text("token", Some(token));
        let valid_password = check_password(&mut violations, "newPassword", new_password);
        violations.finish(|| {
            valid_password.then(|| Self {
                token: token.unwrap_or_default(),
                new_password: Zeroizing::new(new_password.to_owned()),
            })
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn new_password(&self) -> &str {
        self.new_password.as_str()
    }
}
