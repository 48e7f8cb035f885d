use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{AuthResponse, LoginRequest, Profile, SignupRequest, SignupResponse, User};

impl ApiClient {
    /// `POST /auth/login`. Stores the returned token on success.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.request_json("/auth/login", RequestOptions::post().json(&body)?)?;
        self.session().set_token(&auth.token)?;
        tracing::info!(user_id = auth.user.id, "logged in");
        Ok(auth)
    }

    /// `POST /auth/signup`. Stores a token if the server hands one back.
    pub fn signup(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.request_json("/auth/signup", RequestOptions::post().json(&body)?)? {
            SignupResponse::Session(auth) => {
                self.session().set_token(&auth.token)?;
                tracing::info!(user_id = auth.user.id, "signed up");
                Ok(auth.user)
            }
            SignupResponse::Account(user) => {
                tracing::info!(user_id = user.id, "signed up; login required");
                Ok(user)
            }
        }
    }

    /// `GET /profile`
    pub fn get_profile(&self) -> Result<Profile> {
        self.request_json("/profile", RequestOptions::get())
    }
}
