//! Recording stand-ins for the external capabilities.
//!
//! Each mock counts its calls, keeps what it was given, and can be told to
//! fail so tests can assert which downstream steps ran.

use crate::gateway::{GatewayError, OrderCreation, OrderGateway};
use crate::ledger::{Ledger, LedgerError, LedgerRow};
use crate::notifier::{NotificationError, NotificationMessage, Notifier};
use async_trait::async_trait;
use guidepay_sdk::objects::PaymentOrder;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

fn snapshot<T: Clone>(items: &Mutex<Vec<T>>) -> Vec<T> {
    items.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

fn record<T>(items: &Mutex<Vec<T>>, item: T) {
    items.lock().unwrap_or_else(|e| e.into_inner()).push(item);
}

/// In-memory ledger.
#[derive(Default)]
pub struct RecordingLedger {
    rows: Mutex<Vec<LedgerRow>>,
    attempts: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingLedger {
    /// A ledger whose every append fails with a 403 quota error.
    pub fn failing() -> Self {
        let ledger = Self::default();
        ledger.set_failing(true);
        ledger
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Rows appended so far, in append order.
    pub fn rows(&self) -> Vec<LedgerRow> {
        snapshot(&self.rows)
    }

    /// Number of `append` calls, successful or not.
    pub fn call_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for RecordingLedger {
    async fn append(&self, row: &LedgerRow) -> Result<(), LedgerError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(LedgerError::Api {
                status: 403,
                body: "quota exceeded".to_string(),
            });
        }
        record(&self.rows, row.clone());
        Ok(())
    }
}

/// In-memory notifier.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<NotificationMessage>>,
    attempts: Mutex<Vec<NotificationMessage>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    /// A notifier whose every send fails with a 503 from the mail API.
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<NotificationMessage> {
        snapshot(&self.sent)
    }

    /// Number of `send` calls, successful or not.
    pub fn call_count(&self) -> usize {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        record(&self.attempts, message.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Api {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        record(&self.sent, message.clone());
        Ok(())
    }
}

/// Gateway that echoes the requested order back with a synthetic id.
#[derive(Default)]
pub struct StaticGateway {
    calls: Mutex<Vec<OrderCreation>>,
    fail: bool,
}

impl StaticGateway {
    /// A gateway that rejects every order with a 401.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<OrderCreation> {
        snapshot(&self.calls)
    }
}

#[async_trait]
impl OrderGateway for StaticGateway {
    async fn create_order(&self, order: &OrderCreation) -> Result<PaymentOrder, GatewayError> {
        if self.fail {
            return Err(GatewayError::Api {
                status: 401,
                description: "Authentication failed".to_string(),
            });
        }
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        calls.push(order.clone());
        let mut extra = serde_json::Map::new();
        extra.insert("entity".to_string(), "order".into());
        extra.insert("status".to_string(), "created".into());
        Ok(PaymentOrder {
            id: format!("order_test{}", calls.len()),
            amount: order.amount,
            currency: order.currency.clone(),
            receipt: order.receipt.clone(),
            extra,
        })
    }
}
