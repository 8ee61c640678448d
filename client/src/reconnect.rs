#[cfg(test)]
#[path = "reconnect_test.rs"]
mod reconnect_test;

use std::cell::RefCell;

use crate::error::ClientError;

/// Capped exponential backoff for the push connection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconnectPolicy {
    pub initial_delay_ms: u32,
    pub max_delay_ms: u32,
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 3000,
            max_delay_ms: 30_000,
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before retry number `attempt` (1-based), or `None` once the
    /// attempts are exhausted.
    pub fn delay_for(&self, attempt: u32) -> Option<u32> {
        if attempt == 0 {
            return None;
        }
        if let Some(max) = self.max_attempts {
            if attempt > max {
                return None;
            }
        }
        let shift = (attempt - 1).min(31);
        let delay = u64::from(self.initial_delay_ms) << shift;
        Some(delay.min(u64::from(self.max_delay_ms)) as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Retrying { attempt: u32, delay_ms: u32 },
    Failed,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Retrying { .. } => "retrying",
            Self::Failed => "closed",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Connecting => "Connecting...".to_string(),
            Self::Open => "Live connection".to_string(),
            Self::Retrying { attempt, delay_ms } => {
                format!("Reconnecting in {}s (attempt {attempt})", delay_ms / 1000)
            }
            Self::Failed => "Connection lost".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { attempt: u32, delay_ms: u32 },
    /// A retry is already scheduled for an earlier error.
    AlreadyScheduled,
    GiveUp,
}

/// Tracks retries between connection errors and successful opens.
#[derive(Debug)]
pub struct Reconnect {
    policy: ReconnectPolicy,
    attempts: u32,
    pending: bool,
}

impl Reconnect {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
            pending: false,
        }
    }

    pub fn opened(&mut self) {
        self.attempts = 0;
        self.pending = false;
    }

    pub fn failed(&mut self) -> RetryDecision {
        if self.pending {
            return RetryDecision::AlreadyScheduled;
        }
        let attempt = self.attempts + 1;
        match self.policy.delay_for(attempt) {
            Some(delay_ms) => {
                self.attempts = attempt;
                self.pending = true;
                RetryDecision::Retry { attempt, delay_ms }
            }
            None => RetryDecision::GiveUp,
        }
    }

    /// Called when the retry timer fires. Returns whether a reconnect
    /// should happen now.
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

/// Side effects of the push connection lifecycle.
pub trait Transport {
    fn connect(&self) -> Result<(), ClientError>;
    fn close(&self);
    /// Arranges for [`Supervisor::retry_due`] to run after `delay_ms`.
    fn schedule_retry(&self, delay_ms: u32);
    fn publish(&self, state: ConnectionState);
}

/// Drives a [`Transport`] through connect, error and retry.
#[derive(Debug)]
pub struct Supervisor {
    reconnect: RefCell<Reconnect>,
}

impl Supervisor {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            reconnect: RefCell::new(Reconnect::new(policy)),
        }
    }

    pub fn start(&self, transport: &impl Transport) -> Result<(), ClientError> {
        transport.publish(ConnectionState::Connecting);
        transport.connect()
    }

    pub fn opened(&self, transport: &impl Transport) {
        self.reconnect.borrow_mut().opened();
        transport.publish(ConnectionState::Open);
    }

    /// Closes the failed connection and schedules at most one retry.
    pub fn failed(&self, transport: &impl Transport) -> RetryDecision {
        transport.close();
        let decision = self.reconnect.borrow_mut().failed();
        match decision {
            RetryDecision::Retry { attempt, delay_ms } => {
                log::info!("Reconnecting in {delay_ms}ms (attempt {attempt})");
                transport.publish(ConnectionState::Retrying { attempt, delay_ms });
                transport.schedule_retry(delay_ms);
            }
            RetryDecision::AlreadyScheduled => {}
            RetryDecision::GiveUp => {
                log::error!("Giving up on the push connection after repeated errors");
                transport.publish(ConnectionState::Failed);
            }
        }
        decision
    }

    pub fn retry_due(&self, transport: &impl Transport) {
        if !self.reconnect.borrow_mut().fire() {
            return;
        }
        log::info!("Attempting to reconnect");
        if let Err(err) = self.start(transport) {
            log::error!("Reconnect failed: {err}");
            self.failed(transport);
        }
    }
}
