//! Toast notifications
//!
//! [`Notifier`] is the fire-and-forget interface the form gate and status
//! updates talk to. [`NotificationCenter`] is the stock implementation: it keeps
//! the live toasts and moves them through their lifecycle as time passes.
//!
//! ```text
//! notify ──► Entering ──(enter)──► Shown ──(display)──► Leaving ──(exit)──► removed
//!                                     └──── dismiss(id) ────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✕",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Info => "ℹ",
        }
    }

    /// Accent colour hint for renderers
    pub fn accent(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "#10b981",
            NotificationLevel::Error => "#ef4444",
            NotificationLevel::Warning => "#f59e0b",
            NotificationLevel::Info => "#3b82f6",
        }
    }

    /// CSS class for the toast element
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "notification-info",
            NotificationLevel::Success => "notification-success",
            NotificationLevel::Warning => "notification-warning",
            NotificationLevel::Error => "notification-error",
        }
    }
}

/// Fire-and-forget user notification
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotificationLevel);
}

/// How long each toast phase lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    /// Slide-in delay before the toast counts as shown
    pub enter: Duration,
    /// Time from creation until auto-dismiss starts
    pub display: Duration,
    /// Slide-out time before removal
    pub exit: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(100),
            display: Duration::from_millis(5000),
            exit: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

/// Snapshot of a live toast for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastView {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    pub phase: ToastPhase,
}

#[derive(Debug, Clone)]
struct Toast {
    id: u64,
    message: String,
    level: NotificationLevel,
    created_at: Duration,
    leaving_since: Option<Duration>,
}

impl Toast {
    /// Phase at `now`, or `None` once the exit animation is over
    fn phase(&self, now: Duration, timing: &NotificationTiming) -> Option<ToastPhase> {
        let leave_at = match self.leaving_since {
            Some(at) => at,
            None => self.created_at + timing.display,
        };
        if now >= leave_at + timing.exit {
            None
        } else if now >= leave_at {
            Some(ToastPhase::Leaving)
        } else if now < self.created_at + timing.enter {
            Some(ToastPhase::Entering)
        } else {
            Some(ToastPhase::Shown)
        }
    }
}

#[derive(Debug, Default)]
struct CenterState {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Holds live toasts and expires them against a clock
pub struct NotificationCenter<C: Clock> {
    clock: C,
    timing: NotificationTiming,
    state: Mutex<CenterState>,
}

impl<C: Clock> NotificationCenter<C> {
    pub fn new(clock: C) -> Self {
        Self::with_timing(clock, NotificationTiming::default())
    }

    pub fn with_timing(clock: C, timing: NotificationTiming) -> Self {
        Self {
            clock,
            timing,
            state: Mutex::new(CenterState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a toast and return its id
    pub fn push(&self, message: impl Into<String>, level: NotificationLevel) -> u64 {
        let now = self.clock.now();
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        let message = message.into();
        debug!(id, ?level, %message, "notification shown");
        state.toasts.push(Toast {
            id,
            message,
            level,
            created_at: now,
            leaving_since: None,
        });
        id
    }

    /// Start the exit animation early (user clicked the toast)
    ///
    /// Returns false when the toast is unknown, already leaving or gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let now = self.clock.now();
        let timing = self.timing;
        let mut state = self.lock();
        match state.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast)
                if matches!(
                    toast.phase(now, &timing),
                    Some(ToastPhase::Entering | ToastPhase::Shown)
                ) =>
            {
                toast.leaving_since = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Drop finished toasts and return the live ones, oldest first
    pub fn tick(&self) -> Vec<ToastView> {
        let now = self.clock.now();
        let timing = self.timing;
        let mut state = self.lock();
        state.toasts.retain(|t| t.phase(now, &timing).is_some());
        state
            .toasts
            .iter()
            .filter_map(|t| {
                t.phase(now, &timing).map(|phase| ToastView {
                    id: t.id,
                    message: t.message.clone(),
                    level: t.level,
                    phase,
                })
            })
            .collect()
    }

    /// Number of toasts not yet removed (as of the last tick)
    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Clock> Notifier for NotificationCenter<C> {
    fn notify(&self, message: &str, level: NotificationLevel) {
        self.push(message, level);
    }
}
