//! Transfer wizard state machine tests, driven by an in-memory banking
//! client double and the paused tokio clock for timer behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use demobank_client::api::types::LoginResponse;
use demobank_client::client::BankingClient;
use demobank_client::error::ApiError;
use demobank_client::models::{Account, Transaction, TransactionKind};
use demobank_client::transfer::{NotificationKind, Step, TransferWizard, NOTIFICATION_TTL};

const ACCOUNT_ID: &str = "de305d54-75b4-431b-adb2-eb6b9e546014";

fn demo_account(balance: f64) -> Account {
    Account {
        id: ACCOUNT_ID.to_string(),
        owner_id: "test_user".to_string(),
        balance,
        created_at: Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap(),
    }
}

/// Banking client double: counts submissions, optionally failing the next one.
#[derive(Default)]
struct BankDouble {
    submissions: AtomicUsize,
    fail_next: Mutex<Option<ApiError>>,
}

impl BankDouble {
    fn failing_with(error: ApiError) -> Self {
        Self {
            submissions: AtomicUsize::new(0),
            fail_next: Mutex::new(Some(error)),
        }
    }

    fn submission_count(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BankingClient for BankDouble {
    async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        Ok(LoginResponse {
            token: "double-token".to_string(),
        })
    }

    async fn fetch_account(&self, _account_id: &str) -> Result<Account, ApiError> {
        Ok(demo_account(1000.0))
    }

    async fn fetch_transactions(&self, _account_id: &str) -> Result<Vec<Transaction>, ApiError> {
        Ok(Vec::new())
    }

    async fn submit_transaction(
        &self,
        _account_id: &str,
        _kind: TransactionKind,
        amount: f64,
    ) -> Result<Account, ApiError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        Ok(demo_account(1000.0 - amount))
    }
}

fn wizard_with(bank: &Arc<BankDouble>) -> TransferWizard {
    TransferWizard::new(bank.clone() as Arc<dyn BankingClient>, ACCOUNT_ID)
}

/// Drive a fresh wizard to the confirmation step with a valid draft.
async fn at_confirmation(bank: &Arc<BankDouble>) -> TransferWizard {
    let mut wizard = wizard_with(bank);
    wizard.draft.recipient_name = "Jan".to_string();
    wizard.draft.recipient_account = "1234567890".to_string();
    wizard.advance().await;
    wizard.draft.amount = "50".to_string();
    wizard.draft.title = "Rent".to_string();
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Confirmation);
    wizard
}

#[tokio::test]
async fn test_recipient_gate_blocks_short_account_number() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = wizard_with(&bank);

    wizard.draft.recipient_name = "Jan".to_string();
    wizard.draft.recipient_account = "123".to_string();
    assert!(!wizard.recipient_valid());
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Recipient);

    wizard.draft.recipient_account = "1234567890".to_string();
    assert!(wizard.recipient_valid());
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Amount);
}

#[tokio::test]
async fn test_recipient_gate_requires_a_name() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = wizard_with(&bank);

    wizard.draft.recipient_account = "1234567890".to_string();
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Recipient);
}

#[tokio::test]
async fn test_amount_gate_blocks_bad_amount_or_missing_title() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = wizard_with(&bank);
    wizard.draft.recipient_name = "Jan".to_string();
    wizard.draft.recipient_account = "1234567890".to_string();
    wizard.advance().await;

    wizard.draft.amount = "ten".to_string();
    wizard.draft.title = "Rent".to_string();
    assert!(!wizard.amount_valid());
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Amount);

    wizard.draft.amount = "100,50".to_string();
    wizard.draft.title = String::new();
    assert!(!wizard.amount_valid());
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Amount);

    wizard.draft.title = "Rent".to_string();
    assert!(wizard.amount_valid());
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Confirmation);
}

#[tokio::test]
async fn test_back_walks_the_linear_chain() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = at_confirmation(&bank).await;

    wizard.back();
    assert_eq!(wizard.step(), Step::Amount);
    wizard.back();
    assert_eq!(wizard.step(), Step::Recipient);
    wizard.back();
    assert_eq!(wizard.step(), Step::Recipient);
}

#[tokio::test(start_paused = true)]
async fn test_successful_submission_reaches_success_and_toast_expires() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = at_confirmation(&bank).await;

    wizard.advance().await;

    assert_eq!(wizard.step(), Step::Success);
    assert!(!wizard.is_submitting());
    assert_eq!(wizard.last_error(), None);
    assert_eq!(bank.submission_count(), 1);

    let notification = wizard.notification().expect("success notification");
    assert_eq!(notification.kind, NotificationKind::Success);
    assert!(notification.message.contains("Jan"));

    // Still visible just before the TTL...
    tokio::time::advance(NOTIFICATION_TTL - Duration::from_millis(100)).await;
    tokio::task::yield_now().await;
    assert!(wizard.notification().is_some());

    // ...gone right after it.
    tokio::time::advance(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert!(wizard.notification().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_failed_submission_stays_on_confirmation() {
    let bank = Arc::new(BankDouble::failing_with(ApiError::Server(500)));
    let mut wizard = at_confirmation(&bank).await;

    wizard.advance().await;

    assert_eq!(wizard.step(), Step::Confirmation);
    assert!(!wizard.is_submitting());
    assert!(wizard.last_error().unwrap().contains("500"));

    let notification = wizard.notification().expect("error notification");
    assert_eq!(notification.kind, NotificationKind::Error);

    // Error notifications do not auto-dismiss.
    tokio::time::advance(NOTIFICATION_TTL * 2).await;
    tokio::task::yield_now().await;
    assert!(wizard.notification().is_some());

    // No implicit retry happened.
    assert_eq!(bank.submission_count(), 1);
}

#[tokio::test]
async fn test_retry_after_failure_requires_another_advance() {
    let bank = Arc::new(BankDouble::failing_with(ApiError::Network("down".into())));
    let mut wizard = at_confirmation(&bank).await;

    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Confirmation);

    // The user confirms again; this time the double succeeds.
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Success);
    assert_eq!(bank.submission_count(), 2);
}

#[tokio::test]
async fn test_unparseable_amount_never_reaches_the_network() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = at_confirmation(&bank).await;

    // Draft edited out from under the confirmation step.
    wizard.draft.amount = "lots".to_string();
    wizard.advance().await;

    assert_eq!(wizard.step(), Step::Confirmation);
    assert_eq!(wizard.last_error(), Some("Invalid amount"));
    assert_eq!(bank.submission_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_wizard_cancels_the_dismiss_timer() {
    let bank = Arc::new(BankDouble::default());
    let mut wizard = at_confirmation(&bank).await;
    wizard.advance().await;
    assert_eq!(wizard.step(), Step::Success);

    drop(wizard);

    // The timer must not fire against the disposed wizard.
    tokio::time::advance(NOTIFICATION_TTL * 2).await;
    tokio::task::yield_now().await;
}
