// File: src/status.rs
// Purpose: Tender status badge, the status picker dialog, and applying a change

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SubmissionError;
use crate::notify::{NotificationLevel, Notifier};

/// Lifecycle state of a tender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TenderStatus {
    Open,
    Closed,
    Awarded,
}

impl TenderStatus {
    /// All states, in the order the picker lists them
    pub const ALL: [TenderStatus; 3] = [
        TenderStatus::Open,
        TenderStatus::Closed,
        TenderStatus::Awarded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TenderStatus::Open => "OPEN",
            TenderStatus::Closed => "CLOSED",
            TenderStatus::Awarded => "AWARDED",
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tender status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TenderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TenderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Changes a tender's status on the server
#[async_trait]
pub trait StatusUpdater: Send + Sync {
    async fn update_status(
        &self,
        tender_id: i64,
        status: TenderStatus,
    ) -> Result<(), SubmissionError>;
}

/// Status indicator shown on a tender card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub tender_id: i64,
    pub status: TenderStatus,
    #[serde(default)]
    pub loading: bool,
}

impl StatusBadge {
    pub fn new(tender_id: i64, status: TenderStatus) -> Self {
        Self {
            tender_id,
            status,
            loading: false,
        }
    }

    /// Only open and closed tenders can be changed from the badge
    pub fn is_clickable(&self) -> bool {
        !self.loading && matches!(self.status, TenderStatus::Open | TenderStatus::Closed)
    }

    /// CSS classes for the badge element
    pub fn css_classes(&self) -> String {
        if self.is_clickable() {
            format!("status {} clickable", self.status)
        } else {
            format!("status {}", self.status)
        }
    }
}

/// One button in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    pub status: TenderStatus,
    pub is_current: bool,
    pub is_selected: bool,
}

/// State of the "Update Status" dialog
///
/// Save stays unavailable until the user explicitly picks a status, even if
/// they pick the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPicker {
    current: TenderStatus,
    selected: Option<TenderStatus>,
}

impl StatusPicker {
    pub fn open(current: TenderStatus) -> Self {
        Self {
            current,
            selected: None,
        }
    }

    pub fn current(&self) -> TenderStatus {
        self.current
    }

    pub fn selected(&self) -> Option<TenderStatus> {
        self.selected
    }

    pub fn select(&mut self, status: TenderStatus) {
        self.selected = Some(status);
    }

    pub fn can_save(&self) -> bool {
        self.selected.is_some()
    }

    /// Buttons to render; the highlighted one is the selection, or the
    /// current status before anything is picked
    pub fn options(&self) -> Vec<StatusOption> {
        let highlighted = self.selected.unwrap_or(self.current);
        TenderStatus::ALL
            .into_iter()
            .map(|status| StatusOption {
                status,
                is_current: status == self.current,
                is_selected: status == highlighted,
            })
            .collect()
    }

    /// Close with the chosen status, or `None` when nothing was picked
    pub fn confirm(self) -> Option<TenderStatus> {
        self.selected
    }
}

/// Send a status change and reflect it on the badge
///
/// The badge shows a loading state while the call is in flight and always
/// leaves it. On failure the previous status stays.
pub async fn apply_status(
    badge: &mut StatusBadge,
    status: TenderStatus,
    updater: &dyn StatusUpdater,
    notifier: &dyn Notifier,
) -> Result<(), SubmissionError> {
    badge.loading = true;
    let result = updater.update_status(badge.tender_id, status).await;
    badge.loading = false;

    match &result {
        Ok(()) => {
            info!(
                tender_id = badge.tender_id,
                from = %badge.status,
                to = %status,
                "status updated"
            );
            badge.status = status;
            notifier.notify(
                &format!("Status updated to {}", status),
                NotificationLevel::Success,
            );
        }
        Err(err) => {
            warn!(tender_id = badge.tender_id, error = %err, "status update failed");
            notifier.notify(
                &format!("Could not update status: {}", err),
                NotificationLevel::Error,
            );
        }
    }
    result
}
