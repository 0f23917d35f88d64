//! Sign-in Flow
//!
//! Handles submissions of the `#loginForm` and `#registerForm` views: sends
//! the credentials to the auth API, keeps the returned bearer token and
//! names the path to navigate to afterwards. Registration is followed by a
//! login with the same credentials, since the API only issues tokens on
//! `POST /login`.

use std::rc::Rc;

use crate::api::{ApiError, AuthApi, LoginRequest, RegisterRequest, TokenStore};

/// Id of the sign-in form
pub const LOGIN_FORM_ID: &str = "loginForm";

/// Id of the registration form
pub const REGISTER_FORM_ID: &str = "registerForm";

/// Id of the element inside each form that shows a failed submission
pub const FORM_ERROR_ID: &str = "formError";

/// Where a successful submission lands
pub const SIGNED_IN_PATH: &str = "/profile";

/// A submitted auth form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthForm {
    Login(LoginRequest),
    Register(RegisterRequest),
}

impl AuthForm {
    /// Read a submission from the form's fields
    ///
    /// Returns `None` for forms the shell does not own or when a field is
    /// missing.
    pub fn from_fields<F>(form_id: &str, field: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match form_id {
            LOGIN_FORM_ID => Some(AuthForm::Login(LoginRequest {
                username: field("username")?.trim().to_string(),
                password: field("password")?,
            })),
            REGISTER_FORM_ID => Some(AuthForm::Register(RegisterRequest {
                username: field("username")?.trim().to_string(),
                email: field("email")?.trim().to_string(),
                password: field("password")?,
            })),
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            AuthForm::Login(request) => &request.username,
            AuthForm::Register(request) => &request.username,
        }
    }
}

/// Auth API plus token storage
pub struct Session {
    api: Rc<dyn AuthApi>,
    tokens: Rc<dyn TokenStore>,
}

impl Session {
    pub fn new(api: Rc<dyn AuthApi>, tokens: Rc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    pub fn is_signed_in(&self) -> bool {
        self.tokens.token().is_some()
    }

    /// Submit a form and store the resulting token
    ///
    /// Returns the path to navigate to. On failure no token is kept.
    pub async fn submit(&self, form: AuthForm) -> Result<&'static str, ApiError> {
        let login = match form {
            AuthForm::Login(request) => request,
            AuthForm::Register(request) => {
                self.api.register(&request).await?;
                tracing::info!(username = %request.username, "Account created");
                LoginRequest {
                    username: request.username,
                    password: request.password,
                }
            }
        };

        let token = match self.api.login(&login).await {
            Ok(token) => token,
            Err(e) => {
                self.tokens.clear_token();
                return Err(e);
            }
        };
        self.tokens.set_token(&token)?;

        tracing::info!(username = %login.username, "Signed in");
        Ok(SIGNED_IN_PATH)
    }

    pub fn sign_out(&self) {
        self.tokens.clear_token();
    }
}

/// Message shown under a form whose submission failed
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::NotAuthenticated => "Invalid username or password.".to_string(),
        ApiError::Status { message, .. } => message.clone(),
        ApiError::Network(_) => "Could not reach the server. Try again.".to_string(),
        ApiError::Parse(_) | ApiError::Storage(_) => {
            "Something went wrong. Try again.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryTokenStore;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Auth API accepting one account
    #[derive(Default)]
    struct OneAccount {
        calls: RefCell<Vec<String>>,
        taken: RefCell<Option<String>>,
    }

    #[async_trait(?Send)]
    impl AuthApi for OneAccount {
        async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
            self.calls.borrow_mut().push(format!("login {}", request.username));
            if request.username == "bob" && request.password == "hunter22" {
                Ok("token-bob".to_string())
            } else {
                Err(ApiError::from_status(401, r#"{"error": "invalid credentials"}"#))
            }
        }

        async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("register {}", request.username));
            if self.taken.borrow().as_deref() == Some(request.username.as_str()) {
                return Err(ApiError::from_status(400, r#"{"error": "username taken"}"#));
            }
            Ok(())
        }
    }

    fn session() -> (Session, Rc<OneAccount>, Rc<MemoryTokenStore>) {
        let api = Rc::new(OneAccount::default());
        let tokens = Rc::new(MemoryTokenStore::new());
        let session = Session::new(api.clone(), tokens.clone());
        (session, api, tokens)
    }

    fn login(username: &str, password: &str) -> AuthForm {
        AuthForm::Login(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[test]
    fn test_from_fields() {
        let fields: HashMap<&str, &str> = [
            ("username", " bob "),
            ("email", "bob@example.com"),
            ("password", " secret "),
        ]
        .into_iter()
        .collect();
        let field = |name: &str| fields.get(name).map(|v| v.to_string());

        match AuthForm::from_fields(REGISTER_FORM_ID, field) {
            Some(AuthForm::Register(request)) => {
                assert_eq!(request.username, "bob");
                assert_eq!(request.email, "bob@example.com");
                assert_eq!(request.password, " secret ");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            AuthForm::from_fields(LOGIN_FORM_ID, field),
            Some(AuthForm::Login(_))
        ));
        assert!(AuthForm::from_fields("searchForm", field).is_none());
        assert!(AuthForm::from_fields(REGISTER_FORM_ID, |_: &str| None).is_none());
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (session, _api, tokens) = session();

        let next = session.submit(login("bob", "hunter22")).await.unwrap();
        assert_eq!(next, SIGNED_IN_PATH);
        assert_eq!(tokens.token().as_deref(), Some("token-bob"));
        assert!(session.is_signed_in());

        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_bad_credentials_keep_no_token() {
        let (session, _api, tokens) = session();
        tokens.set_token("stale").unwrap();

        let err = session.submit(login("bob", "wrong")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
        assert_eq!(failure_message(&err), "Invalid username or password.");
        assert!(tokens.token().is_none());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (session, api, tokens) = session();

        let form = AuthForm::Register(RegisterRequest {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "hunter22".to_string(),
        });
        session.submit(form).await.unwrap();

        assert_eq!(*api.calls.borrow(), vec!["register bob", "login bob"]);
        assert_eq!(tokens.token().as_deref(), Some("token-bob"));
    }

    #[tokio::test]
    async fn test_register_failure_skips_login() {
        let (session, api, tokens) = session();
        *api.taken.borrow_mut() = Some("bob".to_string());

        let form = AuthForm::Register(RegisterRequest {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "hunter22".to_string(),
        });
        let err = session.submit(form).await.unwrap_err();

        assert_eq!(failure_message(&err), "username taken");
        assert_eq!(*api.calls.borrow(), vec!["register bob"]);
        assert!(tokens.token().is_none());
    }
}
