use crate::api::{ApiError, FavoritesApi};
use uuid::Uuid;

/// Per-article favorite state as a UI component would hold it. A toggle in
/// flight sets `busy`; re-entrant toggles while busy are dropped so one
/// control cannot double-submit. A failed call records the error and leaves
/// the favorite state exactly where it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoriteToggle {
    pub article_id: Option<Uuid>,
    pub is_favorite: bool,
    pub favorite_id: Option<Uuid>,
    pub busy: bool,
    pub error: Option<String>,
}

impl FavoriteToggle {
    pub fn new(article_id: Uuid, is_favorite: bool, favorite_id: Option<Uuid>) -> Self {
        Self {
            article_id: Some(article_id),
            is_favorite,
            favorite_id,
            busy: false,
            error: None,
        }
    }

    /// Flip the favorite state through the API. Not-favorite adds and adopts
    /// the returned id; favorite removes with the held id and clears it.
    pub async fn toggle(&mut self, api: &impl FavoritesApi) {
        if self.busy {
            return;
        }

        let Some(article_id) = self.article_id else {
            self.error = Some("No article bound to this control".to_string());
            return;
        };

        self.busy = true;
        self.error = None;

        let result = if self.is_favorite {
            match self.favorite_id {
                Some(favorite_id) => api.remove_favorite(favorite_id).await,
                None => Err(ApiError {
                    status: None,
                    message: "Favorite id missing".to_string(),
                }),
            }
        } else {
            api.add_favorite(article_id).await
        };

        match result {
            Ok(status) => {
                self.is_favorite = status.is_favorite;
                self.favorite_id = status.is_favorite.then_some(status.favorite_id);
            }
            Err(e) => {
                // Prior state stays untouched; the UI shows the message inline.
                self.error = Some(e.message);
            }
        }

        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FavoriteStatus;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    enum Call {
        Add(Uuid),
        Remove(Uuid),
    }

    struct StubApi {
        calls: Mutex<Vec<Call>>,
        responses: Mutex<Vec<Result<FavoriteStatus, ApiError>>>,
    }

    impl StubApi {
        fn new(responses: Vec<Result<FavoriteStatus, ApiError>>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses),
            }
        }

        fn next(&self) -> Result<FavoriteStatus, ApiError> {
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[async_trait]
    impl FavoritesApi for StubApi {
        async fn add_favorite(&self, article_id: Uuid) -> Result<FavoriteStatus, ApiError> {
            self.calls.lock().unwrap().push(Call::Add(article_id));
            self.next()
        }

        async fn remove_favorite(&self, favorite_id: Uuid) -> Result<FavoriteStatus, ApiError> {
            self.calls.lock().unwrap().push(Call::Remove(favorite_id));
            self.next()
        }
    }

    #[tokio::test]
    async fn toggle_adds_then_removes_with_the_held_id() {
        let article = Uuid::new_v4();
        let favorite = Uuid::new_v4();

        let api = StubApi::new(vec![
            Ok(FavoriteStatus {
                is_favorite: true,
                favorite_id: favorite,
            }),
            Ok(FavoriteStatus {
                is_favorite: false,
                favorite_id: favorite,
            }),
        ]);

        let mut state = FavoriteToggle::new(article, false, None);

        state.toggle(&api).await;
        assert!(state.is_favorite);
        assert_eq!(state.favorite_id, Some(favorite));
        assert!(state.error.is_none());

        state.toggle(&api).await;
        assert!(!state.is_favorite);
        assert_eq!(state.favorite_id, None);

        let calls = api.calls.lock().unwrap();
        assert_eq!(*calls, vec![Call::Add(article), Call::Remove(favorite)]);
    }

    #[tokio::test]
    async fn busy_toggle_is_dropped() {
        let api = StubApi::new(vec![]);

        let mut state = FavoriteToggle::new(Uuid::new_v4(), false, None);
        state.busy = true;

        state.toggle(&api).await;

        assert!(api.calls.lock().unwrap().is_empty());
        assert!(!state.is_favorite);
    }

    #[tokio::test]
    async fn failed_call_keeps_the_previous_state() {
        let article = Uuid::new_v4();
        let api = StubApi::new(vec![Err(ApiError {
            status: Some(500),
            message: "favorites are down".to_string(),
        })]);

        let mut state = FavoriteToggle::new(article, false, None);

        state.toggle(&api).await;

        assert!(!state.is_favorite);
        assert_eq!(state.favorite_id, None);
        assert_eq!(state.error.as_deref(), Some("favorites are down"));
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn repeated_add_adopts_the_same_id() {
        // The backend is idempotent; a stale client re-adding just re-adopts
        // the existing favorite id.
        let article = Uuid::new_v4();
        let favorite = Uuid::new_v4();

        let api = StubApi::new(vec![Ok(FavoriteStatus {
            is_favorite: true,
            favorite_id: favorite,
        })]);

        let mut state = FavoriteToggle::new(article, false, None);
        state.toggle(&api).await;

        assert_eq!(state.favorite_id, Some(favorite));
    }
}
