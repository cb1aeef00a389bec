//! Guided transfer flow
//!
//! A linear four-step state machine owning the in-progress draft. Forward
//! transitions are gated by per-step validation; the final step submits the
//! transfer through the `BankingClient` and only then reaches `Success`.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::client::BankingClient;
use crate::models::TransactionKind;

/// How long a success notification stays visible before auto-dismissal.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Recipient,
    Amount,
    Confirmation,
    Success,
}

/// Mutable form data for one wizard run. Discarded with the wizard.
#[derive(Debug, Default, Clone)]
pub struct TransferDraft {
    pub recipient_name: String,
    pub recipient_account: String,
    /// Raw user text; parsed only at the validation gate and on submit.
    pub amount: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient user-facing status message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub visible_until: Instant,
}

type NotificationSlot = Arc<Mutex<Option<Notification>>>;

pub struct TransferWizard {
    step: Step,
    pub draft: TransferDraft,
    is_submitting: bool,
    last_error: Option<String>,
    notification: NotificationSlot,
    dismiss_task: Option<JoinHandle<()>>,
    client: Arc<dyn BankingClient>,
    account_id: String,
}

impl TransferWizard {
    pub fn new(client: Arc<dyn BankingClient>, account_id: &str) -> Self {
        Self {
            step: Step::Recipient,
            draft: TransferDraft::default(),
            is_submitting: false,
            last_error: None,
            notification: Arc::new(Mutex::new(None)),
            dismiss_task: None,
            client,
            account_id: account_id.to_string(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notification.lock().ok().and_then(|guard| guard.clone())
    }

    /// Recipient gate: name filled in and account identifier at least 10
    /// characters. Pure function of the draft, recomputed on every call.
    pub fn recipient_valid(&self) -> bool {
        !self.draft.recipient_name.is_empty() && self.draft.recipient_account.chars().count() >= 10
    }

    /// Amount gate: amount parses as a positive number and title is filled.
    pub fn amount_valid(&self) -> bool {
        parse_amount(&self.draft.amount).is_some() && !self.draft.title.is_empty()
    }

    /// Move forward one step. Blocked (no-op) when the current step's gate
    /// fails; from `Confirmation` this submits the transfer instead of
    /// transitioning directly.
    pub async fn advance(&mut self) {
        match self.step {
            Step::Recipient => {
                if self.recipient_valid() {
                    self.step = Step::Amount;
                }
            }
            Step::Amount => {
                if self.amount_valid() {
                    self.step = Step::Confirmation;
                }
            }
            Step::Confirmation => self.submit_transfer().await,
            Step::Success => {}
        }
    }

    /// Move back one step. Always allowed from `Amount` and `Confirmation`;
    /// there is no way back out of `Recipient` or `Success`.
    pub fn back(&mut self) {
        match self.step {
            Step::Amount => self.step = Step::Recipient,
            Step::Confirmation => self.step = Step::Amount,
            Step::Recipient | Step::Success => {}
        }
    }

    async fn submit_transfer(&mut self) {
        let amount = match parse_amount(&self.draft.amount) {
            Some(amount) => amount,
            None => {
                // Local validation failure, no network call.
                self.last_error = Some("Invalid amount".to_string());
                return;
            }
        };

        self.is_submitting = true;
        self.last_error = None;

        let result = self
            .client
            .submit_transaction(&self.account_id, TransactionKind::Withdrawal, amount)
            .await;
        self.is_submitting = false;

        match result {
            Ok(account) => {
                log::info!(
                    "transfer of {amount} submitted, new balance {}",
                    account.balance
                );
                self.notify(
                    NotificationKind::Success,
                    format!("Transfer to {} has been sent!", self.draft.recipient_name),
                );
                self.step = Step::Success;
            }
            Err(e) => {
                log::warn!("transfer submission failed: {e}");
                self.last_error = Some(e.to_string());
                self.notify(NotificationKind::Error, format!("Error: {e}"));
            }
        }
    }

    /// Show a notification. Success notifications auto-dismiss after
    /// `NOTIFICATION_TTL`; errors stay until replaced.
    fn notify(&mut self, kind: NotificationKind, message: String) {
        if let Some(task) = self.dismiss_task.take() {
            task.abort();
        }

        if let Ok(mut slot) = self.notification.lock() {
            *slot = Some(Notification {
                kind,
                message,
                visible_until: Instant::now() + NOTIFICATION_TTL,
            });
        }

        if kind == NotificationKind::Success {
            self.dismiss_task = Some(spawn_dismiss(Arc::downgrade(&self.notification)));
        }
    }
}

impl Drop for TransferWizard {
    fn drop(&mut self) {
        // The timer must not fire against a disposed wizard.
        if let Some(task) = self.dismiss_task.take() {
            task.abort();
        }
    }
}

fn spawn_dismiss(slot: Weak<Mutex<Option<Notification>>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(NOTIFICATION_TTL).await;
        if let Some(slot) = slot.upgrade() {
            if let Ok(mut guard) = slot.lock() {
                *guard = None;
            }
        }
    })
}

/// Parse a user-entered amount, accepting both `.` and `,` as the decimal
/// separator. Only finite, strictly positive values are valid.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => None,
    }
}
