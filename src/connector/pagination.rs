//! Continuation-token codec for resumable multi-phase enumeration
//!
//! The traversal position is an ordered stack of phase markers, each naming a
//! sub-resource tag and the opaque vendor cursor for that phase. The stack
//! serializes to an opaque JSON token that callers round-trip between calls;
//! enumeration can be suspended and resumed across process restarts.

use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, Result};

/// One phase marker: a sub-resource tag plus the vendor cursor for that phase
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    #[serde(rename = "resource_type")]
    pub resource_tag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub page_token: String,
}

impl PageState {
    /// A marker for a phase that has not fetched any page yet
    pub fn new(resource_tag: impl Into<String>) -> Self {
        Self {
            resource_tag: resource_tag.into(),
            page_token: String::new(),
        }
    }
}

/// Ordered stack of phase markers; the top of the stack is the active phase
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStack {
    states: Vec<PageState>,
}

impl PageStack {
    /// Decode a continuation token.
    ///
    /// An empty token decodes to a stack holding a single marker tagged with
    /// the parent resource kind and an empty cursor, signaling "not yet
    /// started". A malformed token fails with `MalformedContinuation` and is
    /// never partially trusted.
    pub fn decode(token: &str, default_tag: &str) -> Result<Self> {
        if token.is_empty() {
            return Ok(Self {
                states: vec![PageState::new(default_tag)],
            });
        }

        serde_json::from_str(token)
            .map_err(|e| ConnectorError::MalformedContinuation(e.to_string()))
    }

    /// Re-serialize the stack. An empty stack encodes to the empty string,
    /// which callers must treat as "enumeration complete".
    pub fn encode(&self) -> Result<String> {
        if self.states.is_empty() {
            return Ok(String::new());
        }

        Ok(serde_json::to_string(self)?)
    }

    /// The active phase, if any
    pub fn current(&self) -> Option<&PageState> {
        self.states.last()
    }

    /// Tag of the active phase
    pub fn current_tag(&self) -> Option<&str> {
        self.states.last().map(|s| s.resource_tag.as_str())
    }

    /// Vendor cursor of the active phase, empty when the phase has not started
    pub fn page_token(&self) -> &str {
        self.states
            .last()
            .map(|s| s.page_token.as_str())
            .unwrap_or("")
    }

    pub fn push(&mut self, state: PageState) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<PageState> {
        self.states.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Advance the active phase with the vendor's next-page cursor: an empty
    /// cursor means the phase finished all pages and is popped, otherwise the
    /// cursor replaces the phase's current one.
    pub fn advance(&mut self, next_page_token: &str) {
        if next_page_token.is_empty() {
            self.states.pop();
        } else if let Some(top) = self.states.last_mut() {
            top.page_token = next_page_token.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_token_yields_parent_marker() {
        let stack = PageStack::decode("", "org").unwrap();
        assert_eq!(stack.current_tag(), Some("org"));
        assert_eq!(stack.page_token(), "");
    }

    #[test]
    fn test_encode_empty_stack_is_empty_token() {
        let stack = PageStack::default();
        assert_eq!(stack.encode().unwrap(), "");
    }

    #[test]
    fn test_round_trip() {
        let mut stack = PageStack::default();
        stack.push(PageState::new("user"));
        stack.push(PageState {
            resource_tag: "invitations".to_string(),
            page_token: "cursor-abc".to_string(),
        });

        let token = stack.encode().unwrap();
        assert!(!token.is_empty());

        let decoded = PageStack::decode(&token, "org").unwrap();
        assert_eq!(decoded, stack);
        assert_eq!(decoded.current_tag(), Some("invitations"));
        assert_eq!(decoded.page_token(), "cursor-abc");
    }

    #[test]
    fn test_decode_malformed_token_fails() {
        let err = PageStack::decode("not a token", "org").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ConnectorError::MalformedContinuation(_)
        ));
    }

    #[test]
    fn test_advance_replaces_cursor() {
        let mut stack = PageStack::default();
        stack.push(PageState::new("invitations"));

        stack.advance("cursor-2");
        assert_eq!(stack.current_tag(), Some("invitations"));
        assert_eq!(stack.page_token(), "cursor-2");
    }

    #[test]
    fn test_advance_empty_cursor_pops_phase() {
        let mut stack = PageStack::default();
        stack.push(PageState::new("user"));
        stack.push(PageState::new("invitations"));

        stack.advance("");
        assert_eq!(stack.current_tag(), Some("user"));

        stack.advance("");
        assert!(stack.is_empty());
        assert_eq!(stack.encode().unwrap(), "");
    }

    #[test]
    fn test_push_order_makes_last_pushed_active() {
        let mut stack = PageStack::decode("", "org").unwrap();
        stack.pop();
        stack.push(PageState::new("user"));
        stack.push(PageState::new("invitations"));

        // invitations is the active top, user runs after it completes
        assert_eq!(stack.current_tag(), Some("invitations"));
    }
}
