//! In-memory payment log sink.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{PaymentLogEntry, PaymentLogSink};

/// Payment log kept in memory, with an inspection hook for tests.
#[derive(Default)]
pub struct InMemoryPaymentLog {
    entries: RwLock<Vec<PaymentLogEntry>>,
}

impl InMemoryPaymentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<PaymentLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl PaymentLogSink for InMemoryPaymentLog {
    async fn write(&self, entry: PaymentLogEntry) -> Result<(), DomainError> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
