//! Shared UI-state store.
//!
//! Cross-cutting view state (tour open flag, active filters, search query,
//! expanded sections) lives in one [`UiState`] owned by a
//! [`UiStateProvider`]. Consumers never hold the state directly; they hold a
//! cheap [`UiStateHandle`] obtained from the provider. Accessing a handle
//! after its provider has been dropped is a composition bug and fails fast
//! with [`StateError::OutsideProvider`] rather than being silently ignored.
//!
//! The store is deliberately not a process global: multiple independent
//! providers can coexist (one per view tree, or per test).

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use thiserror::Error;

/// Errors from shared-store access.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The handle's provider no longer exists.
    #[error("UI state accessed outside its provider; the UiStateProvider has been dropped")]
    OutsideProvider,
}

/// The shared, session-scoped UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Whether the guided tour overlay is open
    pub is_tour_open: bool,
    /// Active content-filter values, in selection order
    pub active_filters: Vec<String>,
    /// Current search query (empty = no search)
    pub search_query: String,
    /// Identifiers of expanded sections
    expanded_sections: BTreeSet<String>,
}

impl UiState {
    /// Toggle a section id: remove it if present, add it otherwise.
    ///
    /// This is the only mutator for the expanded-section set; there is no
    /// wholesale setter.
    pub fn toggle_section(&mut self, id: &str) {
        if !self.expanded_sections.remove(id) {
            self.expanded_sections.insert(id.to_string());
        }
    }

    /// Whether a section id is currently expanded.
    pub fn is_section_expanded(&self, id: &str) -> bool {
        self.expanded_sections.contains(id)
    }

    /// The expanded-section set.
    pub const fn expanded_sections(&self) -> &BTreeSet<String> {
        &self.expanded_sections
    }
}

/// Owner of a [`UiState`]. Lives as long as the view tree it serves.
#[derive(Debug, Default)]
pub struct UiStateProvider {
    inner: Rc<RefCell<UiState>>,
}

impl UiStateProvider {
    /// Create a provider with default (all-empty) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a consumer handle. Handles are cheap to clone and remain
    /// valid only while this provider is alive.
    pub fn handle(&self) -> UiStateHandle {
        UiStateHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Read or mutate the state directly (owner-side access, infallible).
    pub fn with<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

/// Consumer-side accessor for the shared state.
#[derive(Debug, Clone)]
pub struct UiStateHandle {
    inner: Weak<RefCell<UiState>>,
}

impl UiStateHandle {
    /// Run a closure against the shared state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::OutsideProvider`] if the provider has been
    /// dropped.
    pub fn with<R>(&self, f: impl FnOnce(&UiState) -> R) -> Result<R, StateError> {
        let rc = self.inner.upgrade().ok_or(StateError::OutsideProvider)?;
        let state = rc.borrow();
        Ok(f(&state))
    }

    /// Run a mutating closure against the shared state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::OutsideProvider`] if the provider has been
    /// dropped.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> Result<R, StateError> {
        let rc = self.inner.upgrade().ok_or(StateError::OutsideProvider)?;
        let mut state = rc.borrow_mut();
        Ok(f(&mut state))
    }

    /// Whether the guided tour is open.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn is_tour_open(&self) -> Result<bool, StateError> {
        self.with(|s| s.is_tour_open)
    }

    /// Set the tour open flag.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn set_tour_open(&self, open: bool) -> Result<(), StateError> {
        self.with_mut(|s| s.is_tour_open = open)
    }

    /// The active filter values, in selection order.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn active_filters(&self) -> Result<Vec<String>, StateError> {
        self.with(|s| s.active_filters.clone())
    }

    /// Replace the active filter list wholesale.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn set_active_filters(&self, filters: Vec<String>) -> Result<(), StateError> {
        self.with_mut(|s| s.active_filters = filters)
    }

    /// The current search query.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn search_query(&self) -> Result<String, StateError> {
        self.with(|s| s.search_query.clone())
    }

    /// Replace the search query wholesale.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn set_search_query(&self, query: impl Into<String>) -> Result<(), StateError> {
        let query = query.into();
        self.with_mut(|s| s.search_query = query)
    }

    /// Toggle a section id in the expanded-section set.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn toggle_section(&self, id: &str) -> Result<(), StateError> {
        self.with_mut(|s| s.toggle_section(id))
    }

    /// Whether a section id is currently expanded.
    ///
    /// # Errors
    ///
    /// Fails if the provider has been dropped.
    pub fn is_section_expanded(&self, id: &str) -> Result<bool, StateError> {
        self.with(|s| s.is_section_expanded(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_section_adds_then_removes() {
        let mut state = UiState::default();
        state.toggle_section("x");
        assert!(state.is_section_expanded("x"));
        state.toggle_section("x");
        assert!(!state.is_section_expanded("x"));
    }

    #[test]
    fn test_toggle_section_has_set_semantics() {
        let mut state = UiState::default();
        state.toggle_section("a");
        state.toggle_section("b");
        state.toggle_section("a");
        state.toggle_section("a");
        assert_eq!(state.expanded_sections().len(), 2);
    }

    #[test]
    fn test_handle_reads_and_writes_through_provider() {
        let provider = UiStateProvider::new();
        let handle = provider.handle();

        handle.set_search_query("hello").unwrap();
        handle.set_active_filters(vec!["code".into()]).unwrap();
        handle.set_tour_open(true).unwrap();

        assert_eq!(provider.with(|s| s.search_query.clone()), "hello");
        assert_eq!(handle.active_filters().unwrap(), vec!["code".to_string()]);
        assert!(handle.is_tour_open().unwrap());
    }

    #[test]
    fn test_handle_fails_after_provider_drop() {
        let provider = UiStateProvider::new();
        let handle = provider.handle();
        drop(provider);

        // Every accessor fails, every time.
        assert_eq!(handle.is_tour_open(), Err(StateError::OutsideProvider));
        assert_eq!(handle.is_tour_open(), Err(StateError::OutsideProvider));
        assert_eq!(
            handle.set_search_query("q"),
            Err(StateError::OutsideProvider)
        );
        assert_eq!(handle.toggle_section("x"), Err(StateError::OutsideProvider));
    }

    #[test]
    fn test_independent_providers_do_not_share_state() {
        let a = UiStateProvider::new();
        let b = UiStateProvider::new();
        a.handle().set_search_query("only a").unwrap();

        assert_eq!(b.handle().search_query().unwrap(), "");
        assert_eq!(a.handle().search_query().unwrap(), "only a");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn toggle_twice_is_identity(
                ids in proptest::collection::vec("[a-z]{1,8}", 0..16),
                target in "[a-z]{1,8}",
            ) {
                let mut state = UiState::default();
                for id in &ids {
                    state.toggle_section(id);
                }
                let before = state.expanded_sections().clone();
                state.toggle_section(&target);
                state.toggle_section(&target);
                prop_assert_eq!(state.expanded_sections(), &before);
            }
        }
    }
}
