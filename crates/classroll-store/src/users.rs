//! The user store: the profile shown in the dashboard header.

use crate::api::{ApiError, RosterApi};
use crate::state::{LoadPhase, RequestLedger, Settle};
use classroll_models::{UserId, UserProfile};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Which profile to load.
///
/// Route parameters can arrive as a single id or as a list of segments; a
/// list is resolved to its first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    Single(UserId),
    Many(Vec<UserId>),
}

impl UserQuery {
    /// The id actually queried.
    pub fn primary(&self) -> Option<UserId> {
        match self {
            UserQuery::Single(id) => Some(*id),
            UserQuery::Many(ids) => ids.first().copied(),
        }
    }
}

impl From<UserId> for UserQuery {
    fn from(id: UserId) -> Self {
        UserQuery::Single(id)
    }
}

impl From<Vec<UserId>> for UserQuery {
    fn from(ids: Vec<UserId>) -> Self {
        UserQuery::Many(ids)
    }
}

impl From<&[UserId]> for UserQuery {
    fn from(ids: &[UserId]) -> Self {
        UserQuery::Many(ids.to_vec())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub user: Option<UserProfile>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: LoadPhase,
    ledger: RequestLedger,
}

/// Holds at most one fetched [`UserProfile`].
pub struct UserStore<A> {
    api: A,
    state: watch::Sender<UserState>,
}

impl<A> UserStore<A>
where
    A: RosterApi,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: watch::Sender::new(UserState::default()),
        }
    }

    pub fn snapshot(&self) -> UserState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.state.subscribe()
    }

    /// Loads the profile for `query`.
    ///
    /// A failed lookup records the error but keeps whatever profile was
    /// loaded before. An empty id list fails without contacting the API.
    #[instrument(skip(self, query))]
    pub async fn fetch_by_id(&self, query: impl Into<UserQuery>) {
        let Some(id) = query.into().primary() else {
            warn!("User lookup requested without an id");
            self.state.send_modify(|state| {
                state.error = Some(ApiError::Validation("User ID is required".into()).to_string());
                state.phase = if state.ledger.is_busy() {
                    LoadPhase::Loading
                } else {
                    LoadPhase::Error
                };
            });
            return;
        };

        let mut ticket = None;
        self.state.send_modify(|state| {
            ticket = Some(state.ledger.begin_fetch());
            state.is_loading = true;
            state.error = None;
            state.phase = LoadPhase::Loading;
        });
        let Some(ticket) = ticket else { return };

        let result = self.api.fetch_user(id).await;

        self.state.send_modify(|state| {
            if state.ledger.settle(ticket) == Settle::Discard {
                debug!(user_id = %id, "Discarding superseded user response");
            } else {
                match result {
                    Ok(user) => {
                        info!(user_id = %user.id, "Fetched user profile");
                        state.user = Some(user);
                    }
                    Err(err) => {
                        warn!(user_id = %id, error = %err, "Failed to fetch user");
                        state.error = Some(err.to_string());
                    }
                }
            }
            state.is_loading = state.ledger.is_busy();
            state.phase = state.ledger.phase(state.error.is_some());
        });
    }

    /// Clears the error without touching the profile or loading flag.
    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    pub fn reset(&self) {
        self.state.send_modify(|state| {
            let mut ledger = std::mem::take(&mut state.ledger);
            ledger.invalidate();
            *state = UserState {
                ledger,
                ..UserState::default()
            };
        });
    }
}
