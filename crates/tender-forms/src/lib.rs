// Tender Forms - client presentation core for the e-tendering UI
// Field validation, all-or-nothing submit gating, and debounced search over rendered cards

pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod form;
pub mod layout;
pub mod notify;
pub mod search;
pub mod status;
pub mod validation;

// Re-export core types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::Config;
pub use debounce::Debouncer;
pub use error::SubmissionError;
pub use field::{Field, FieldKind, FieldStatus};
pub use form::{
    submits_on_key, Form, FormGate, FormValues, SubmitIntent, SubmitOutcome, SubmitState, Submitter,
};
pub use layout::{GridColumns, LayoutMetrics, ResponsiveLayout};
pub use notify::{
    NotificationCenter, NotificationLevel, NotificationTiming, Notifier, ToastPhase, ToastView,
};
pub use search::{
    evaluate as evaluate_search, Emphasis, ItemCollection, SearchBox, SearchOutcome,
    SearchResultSummary, SearchableItem, SummaryPanel, Visibility,
};
pub use status::{
    apply_status, StatusBadge, StatusOption, StatusPicker, StatusUpdater, TenderStatus,
};
pub use validation::{validate_value, ValidationResult, ValidationRules};

// Re-export so implementors of the collaborator traits don't need their own dependency
pub use async_trait::async_trait;
