//! Alice Tester - simulated user for voice-skill webhooks
//!
//! Drives a conversation against a skill backend the way a person would:
//! enter, say things, tap the buttons the skill offers. Meant for automated
//! test suites, together with the bundled [`mock_server`].
//!
//! ```ignore
//! let mut user = User::new("http://localhost:3000")?;
//! user.enter().await?;
//! user.say("привет").await?;
//! user.tap("Да").await?;
//! user.tap(Selector::pattern("помощь", "i")?).await?;
//! ```

pub mod buttons;
pub mod config;
pub mod error;
pub mod mock_server;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod user;

pub use buttons::{Selector, TitlePattern};
pub use config::UserConfig;
pub use error::{Error, Result, TransportError, TransportErrorKind};
pub use protocol::{Button, RequestKind, SkillResponse, TurnRequest, TurnResponse, UserRequest};
pub use session::Session;
pub use user::{TapExtra, User, UserState};
