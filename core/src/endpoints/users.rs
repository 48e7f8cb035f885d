use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{User, UserProfile, UserYearStats};

impl ApiClient {
    pub fn get_user_profile(&self, user_id: i64) -> Result<UserProfile> {
        self.request_json(&format!("/users/{user_id}/profile"), RequestOptions::get())
    }

    pub fn follow_user(&self, user_id: i64) -> Result<()> {
        self.request_unit(&format!("/users/{user_id}/follow"), RequestOptions::post())
    }

    pub fn unfollow_user(&self, user_id: i64) -> Result<()> {
        self.request_unit(&format!("/users/{user_id}/follow"), RequestOptions::delete())
    }

    pub fn get_followers(&self, user_id: i64) -> Result<Vec<User>> {
        self.request_json(&format!("/users/{user_id}/followers"), RequestOptions::get())
    }

    pub fn get_following(&self, user_id: i64) -> Result<Vec<User>> {
        self.request_json(&format!("/users/{user_id}/following"), RequestOptions::get())
    }

    pub fn get_year_stats(&self, user_id: i64, year: i32) -> Result<UserYearStats> {
        self.request_json(&format!("/users/{user_id}/stats/year/{year}"), RequestOptions::get())
    }
}
