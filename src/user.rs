//! Simulated user
//!
//! Drives one conversation against a skill webhook. The user owns the
//! session and the last response; every operation is one turn: build the
//! request, POST it, parse the reply, advance the session. A tap on a button
//! that carries a URL additionally fetches that URL once the turn is done.

mod extra;


pub use extra::TapExtra;

use crate::buttons::{self, Selector};
use crate::config::UserConfig;
use crate::error::{Error, Result};
use crate::protocol::{build_request, parse_reply, Button, TurnResponse, UserRequest};
use crate::session::Session;
use crate::transport::{HttpTransport, LoggingTransport, Transport};
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;

/// Conversation lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserState {
    /// `enter` has not succeeded yet
    Unstarted,
    /// Conversation under way; `next` is the session of the coming turn
    Active { next: Session },
}

pub struct User {
    config: UserConfig,
    transport: Arc<dyn Transport>,
    state: UserState,
    last_request: Option<Value>,
    last_response: Option<TurnResponse>,
    body: Option<String>,
}

impl User {
    /// User talking to the webhook at `base_url` over HTTP
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] for a non-absolute URL, [`Error::Transport`] if
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(UserConfig::new(base_url)?)
    }

    /// # Errors
    ///
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn with_config(config: UserConfig) -> Result<Self> {
        let http = HttpTransport::new(config.timeout)
            .map_err(|e| e.with_url(config.base_url.as_str()))?;
        let transport = Arc::new(LoggingTransport::new(Arc::new(http)));
        Ok(Self::with_transport(config, transport))
    }

    #[must_use]
    pub fn with_transport(config: UserConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            state: UserState::Unstarted,
            last_request: None,
            last_response: None,
            body: None,
        }
    }

    /// Open the conversation with an empty utterance
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyEntered`] after a successful `enter`; otherwise any
    /// transport or protocol failure of the turn.
    pub async fn enter(&mut self) -> Result<TurnResponse> {
        self.enter_with("").await
    }

    /// Open the conversation with an opening phrase
    ///
    /// # Errors
    ///
    /// Same as [`User::enter`].
    pub async fn enter_with(&mut self, utterance: &str) -> Result<TurnResponse> {
        if matches!(self.state, UserState::Active { .. }) {
            return Err(Error::AlreadyEntered);
        }
        let session = self.config.initial_session();
        self.send_turn(session, UserRequest::utterance(utterance), None)
            .await
    }

    /// Send a free-text utterance
    ///
    /// # Errors
    ///
    /// [`Error::NotEntered`] before `enter`; otherwise any transport or
    /// protocol failure of the turn.
    pub async fn say(&mut self, utterance: &str) -> Result<TurnResponse> {
        let session = self.active_session()?;
        self.send_turn(session, UserRequest::utterance(utterance), None)
            .await
    }

    /// Press one of the buttons offered by the last response
    ///
    /// # Errors
    ///
    /// See [`User::tap_with`].
    pub async fn tap(&mut self, selector: impl Into<Selector>) -> Result<TurnResponse> {
        self.press(selector.into(), None).await
    }

    /// Press a button, changing the request with `extra` before it is sent
    ///
    /// # Errors
    ///
    /// [`Error::NotEntered`] before `enter`, [`Error::NoButtons`] or
    /// [`Error::ButtonNotFound`] from resolution, [`Error::InvalidPatch`] for
    /// a non-object merge, transport or protocol failures of the turn, and
    /// [`Error::Navigation`] when the turn succeeded but fetching the
    /// button URL did not.
    pub async fn tap_with(
        &mut self,
        selector: impl Into<Selector>,
        extra: impl Into<TapExtra>,
    ) -> Result<TurnResponse> {
        self.press(selector.into(), Some(extra.into())).await
    }

    async fn press(&mut self, selector: Selector, extra: Option<TapExtra>) -> Result<TurnResponse> {
        let session = self.active_session()?;
        let button = buttons::resolve(self.offered_buttons(), &selector)?.clone();
        tracing::debug!(selector = %selector, title = %button.title, "button resolved");

        let response = self
            .send_turn(session, UserRequest::button_press(&button), extra)
            .await?;

        // A page belongs to the tap that fetched it
        self.body = None;
        if let Some(url) = &button.url {
            self.navigate(url, &response).await?;
        }
        Ok(response)
    }

    async fn send_turn(
        &mut self,
        session: Session,
        request: UserRequest,
        extra: Option<TapExtra>,
    ) -> Result<TurnResponse> {
        let turn = build_request(&session, request, &session.version);
        tracing::debug!(
            message_id = session.message_id,
            new = session.is_new,
            kind = ?turn.request.kind,
            command = %turn.request.command,
            "sending turn"
        );

        let body = match extra {
            Some(extra) => extra.apply(&turn)?,
            None => extra::to_body(&turn)?,
        };

        let reply = self.transport.post_json(&self.config.base_url, &body).await?;
        let response = parse_reply(&reply)?;

        self.last_request = Some(body);
        self.last_response = Some(response.clone());
        self.state = UserState::Active {
            next: session.advance(),
        };
        Ok(response)
    }

    async fn navigate(&mut self, url: &str, response: &TurnResponse) -> Result<()> {
        let target = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        match self.transport.get_text(&target).await {
            Ok(body) => {
                self.body = Some(body);
                Ok(())
            }
            Err(source) => Err(Error::Navigation {
                url: url.to_string(),
                response: Box::new(response.clone()),
                source,
            }),
        }
    }

    fn active_session(&self) -> Result<Session> {
        match &self.state {
            UserState::Active { next } => Ok(next.clone()),
            UserState::Unstarted => Err(Error::NotEntered),
        }
    }

    fn offered_buttons(&self) -> Option<&[Button]> {
        self.last_response
            .as_ref()
            .and_then(|r| r.response.buttons.as_deref())
    }

    #[must_use]
    pub fn state(&self) -> &UserState {
        &self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, UserState::Active { .. })
    }

    /// Session the next turn will be sent with
    #[must_use]
    pub fn session(&self) -> Session {
        match &self.state {
            UserState::Active { next } => next.clone(),
            UserState::Unstarted => self.config.initial_session(),
        }
    }

    /// Response of the last successful turn
    #[must_use]
    pub fn last_response(&self) -> Option<&TurnResponse> {
        self.last_response.as_ref()
    }

    /// Exact JSON body of the last successful turn
    #[must_use]
    pub fn last_request(&self) -> Option<&Value> {
        self.last_request.as_ref()
    }

    /// Body fetched by the last navigation
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &UserConfig {
        &self.config
    }
}
