//! Button resolution
//!
//! Finds the single button a tap refers to among the buttons offered by the
//! previous response. Matching is deterministic: the first button in
//! document order that satisfies the selector wins.

mod selector;

#[cfg(test)]
mod proptests;

pub use selector::{Selector, TitlePattern};

use crate::error::{Error, Result};
use crate::protocol::Button;

/// Resolve `selector` against the offered `buttons`
///
/// # Errors
///
/// [`Error::NoButtons`] when nothing was offered, [`Error::ButtonNotFound`]
/// (listing every offered title) when no title matches.
pub fn resolve<'a>(buttons: Option<&'a [Button]>, selector: &Selector) -> Result<&'a Button> {
    let buttons = match buttons {
        Some(buttons) if !buttons.is_empty() => buttons,
        _ => return Err(Error::NoButtons),
    };

    buttons
        .iter()
        .find(|button| selector.matches(&button.title))
        .ok_or_else(|| Error::ButtonNotFound {
            selector: selector.to_string(),
            titles: buttons.iter().map(|b| b.title.clone()).collect(),
        })
}
