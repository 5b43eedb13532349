use reqwest::Method;
use serde::Deserialize;

use crate::api::{endpoint, ApiClient};
use crate::app::{AksharError, Result};
use crate::domain::{Article, User};
use crate::fetcher::{ensure_writable, optimistic, settle, FallbackPolicy, Resource, ScopeHandle};

/// An author together with the articles they have published.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProfileResponse")]
pub struct ProfileData {
    pub user: User,
    pub articles: Vec<Article>,
}

/// `/users/:username` answers with either `{ user, articles }` or the bare user.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileResponse {
    Full {
        user: User,
        #[serde(default)]
        articles: Vec<Article>,
    },
    Bare(User),
}

impl From<ProfileResponse> for ProfileData {
    fn from(response: ProfileResponse) -> Self {
        match response {
            ProfileResponse::Full { user, articles } => Self { user, articles },
            ProfileResponse::Bare(user) => Self {
                user,
                articles: Vec::new(),
            },
        }
    }
}

pub struct Profile {
    api: ApiClient,
    scope: ScopeHandle,
    username: String,
    pub profile: Resource<Option<ProfileData>>,
}

impl Profile {
    pub fn new(api: ApiClient, scope: ScopeHandle, username: &str) -> Self {
        Self {
            api,
            scope,
            username: username.to_string(),
            profile: Resource::new(),
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let api = &self.api;
        let username = self.username.as_str();
        let request = async move {
            let path = endpoint(&["users", username])?;
            api.get::<ProfileData>(&path).await.map(Some)
        };

        settle(&mut self.profile, &self.scope, FallbackPolicy::Strict, request, || None).await
    }

    /// The signed-in viewer is looking at their own profile.
    pub fn is_own(&self) -> bool {
        match (self.api.session().current().user_id(), &self.profile.data) {
            (Some(me), Some(data)) => data.user.id == me,
            _ => false,
        }
    }

    /// The signed-in viewer follows this author.
    pub fn following(&self) -> bool {
        match (self.api.session().current().user_id(), &self.profile.data) {
            (Some(me), Some(data)) => data.user.is_followed_by(me),
            _ => false,
        }
    }

    /// Follow or unfollow the author. The follower set is patched at once
    /// and restored if the request fails.
    pub async fn toggle_follow(&mut self) -> Result<()> {
        let session = self.api.session().require_auth()?;
        let me = session.user_id().unwrap_or_default().to_string();
        if self.is_own() {
            return Err(AksharError::Validation("You cannot follow yourself".into()));
        }
        let following = self.following();

        let data = self
            .profile
            .data
            .as_mut()
            .ok_or_else(|| AksharError::NotFound(format!("No profile for {}", self.username)))?;
        ensure_writable(&data.user.id)?;

        let action = if following { "unfollow" } else { "follow" };
        let path = endpoint(&["users", data.user.id.as_str(), action])?;
        let api = &self.api;
        let viewer = me.clone();

        optimistic(
            &mut data.user.followers,
            &self.scope,
            |followers| {
                if following {
                    followers.remove(&me);
                } else {
                    followers.insert(me);
                }
            },
            |followers| {
                if following {
                    followers.insert(viewer);
                } else {
                    followers.remove(&viewer);
                }
            },
            api.action(Method::POST, &path),
        )
        .await
    }
}
