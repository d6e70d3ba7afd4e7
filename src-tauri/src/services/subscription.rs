//! Hover-gated raw mouse input subscription.
//!
//! A raw input registration is process-wide and delivers every mouse event on the
//! system, so it is held only while the pointer is over the tray icon.

use crate::error::PlatformError;

/// Raw mouse input registration service.
pub trait RawInputRegistrar {
    /// Register the mouse listener against the sink window.
    fn subscribe(&mut self) -> Result<(), PlatformError>;
    /// Remove the mouse listener (global removal, no target window).
    fn unsubscribe(&mut self) -> Result<(), PlatformError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubscriptionState {
    #[default]
    Unsubscribed,
    Subscribed,
}

impl SubscriptionState {
    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed)
    }
}

/// What a single `update_subscription` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Subscribed,
    SubscribeFailed,
    Unsubscribed,
}

pub struct SubscriptionToggle<R> {
    registrar: R,
    state: SubscriptionState,
}

impl<R: RawInputRegistrar> SubscriptionToggle<R> {
    pub fn new(registrar: R) -> Self {
        Self {
            registrar,
            state: SubscriptionState::Unsubscribed,
        }
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    pub fn update_subscription(&mut self, is_hovering: bool) -> Transition {
        match (self.state, is_hovering) {
            (SubscriptionState::Unsubscribed, true) => match self.registrar.subscribe() {
                Ok(()) => {
                    self.state = SubscriptionState::Subscribed;
                    log::debug!("Raw mouse input subscribed (pointer over tray icon)");
                    Transition::Subscribed
                }
                Err(err) => {
                    // Stays unsubscribed; the next hover check retries.
                    log::debug!("Raw mouse input subscribe failed: {}", err);
                    Transition::SubscribeFailed
                }
            },
            (SubscriptionState::Subscribed, false) => {
                self.release();
                Transition::Unsubscribed
            }
            _ => Transition::Unchanged,
        }
    }

    /// Best-effort removal used at teardown. No-op when not subscribed.
    pub fn shutdown(&mut self) -> Transition {
        if self.state.is_subscribed() {
            self.release();
            Transition::Unsubscribed
        } else {
            Transition::Unchanged
        }
    }

    // The state flips even if removal is rejected: a stray second removal is harmless,
    // a listener stuck on is not.
    fn release(&mut self) {
        if let Err(err) = self.registrar.unsubscribe() {
            log::debug!("Raw mouse input unsubscribe failed: {}", err);
        }
        self.state = SubscriptionState::Unsubscribed;
        log::debug!("Raw mouse input unsubscribed");
    }
}
