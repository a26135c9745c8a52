//! Callback pipeline - the payment notification state machine.
//!
//! Validation runs as an ordered sequence of short-circuiting steps over a
//! mutable [`CallbackState`]; the first step to return `false` halts the run
//! and skipped steps have no side effects. Exactly one terminal outcome per
//! callback: either every step passes and the purchase request completes
//! exactly once, or the run halts leaving the purchase request untouched.
//!
//! Ordinary validation failures never travel as errors; they are recorded on
//! the state (log type, message) and the step returns `false`.

use std::sync::Arc;

use crate::domain::foundation::amounts_match;
use crate::ports::{CompletionOutcome, PurchasableRegistry, PurchaseRequestStore, UserDirectory};

use super::callback_state::{CallbackState, PaymentResult};
use super::notification::PaymentFields;
use super::profile::PaymentProfile;
use super::PROVIDER_ID;

/// Runs the ordered validation steps for payment notifications.
pub struct CallbackPipeline {
    purchases: Arc<dyn PurchaseRequestStore>,
    registry: Arc<dyn PurchasableRegistry>,
    users: Arc<dyn UserDirectory>,
}

impl CallbackPipeline {
    pub fn new(
        purchases: Arc<dyn PurchaseRequestStore>,
        registry: Arc<dyn PurchasableRegistry>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            purchases,
            registry,
            users,
        }
    }

    /// Drives the state through every step in order.
    ///
    /// The state must come from [`CallbackState::new`], which performs the
    /// setup step (parsed input, source IP, HTTP 200).
    pub async fn run(
        &self,
        state: &mut CallbackState,
        fields: &PaymentFields,
        profile: &PaymentProfile,
    ) {
        if !self.validate_callback(state) {
            return;
        }
        if !self.validate_transaction(state, fields) {
            return;
        }
        if !self.validate_purchase_request(state).await {
            return;
        }
        if !self.validate_purchasable_handler(state).await {
            return;
        }
        if !self.validate_payment_profile(state, profile) {
            return;
        }
        if !self.validate_purchaser(state).await {
            return;
        }
        if !self.validate_purchasable_data(state).await {
            return;
        }
        if !self.validate_cost(state, fields) {
            return;
        }
        self.set_provider_metadata(state);
        self.set_payment_result(state);
        self.complete_transaction(state).await;
    }

    /// The body must have parsed to a non-empty structure. No log entry;
    /// anything unparseable was already rejected upstream or is noise.
    fn validate_callback(&self, state: &CallbackState) -> bool {
        state.input.is_some()
    }

    /// Copies the transaction identifiers onto the state. An empty request
    /// key halts informationally: foreign callbacks and dashboard test pings
    /// are expected traffic, not errors.
    fn validate_transaction(&self, state: &mut CallbackState, fields: &PaymentFields) -> bool {
        state.transaction_id = fields.transaction_id.clone();
        state.request_key = fields.request_key.clone();

        if state.request_key.is_empty() {
            state.halt_info("Metadata is empty!");
            return false;
        }

        true
    }

    async fn validate_purchase_request(&self, state: &mut CallbackState) -> bool {
        match self.purchases.find_by_request_key(&state.request_key).await {
            Ok(Some(purchase_request)) => {
                state.purchase_request = Some(purchase_request);
                true
            }
            Ok(None) => {
                state.halt_error("Invalid purchase request.");
                false
            }
            Err(err) => {
                tracing::error!(
                    request_key = %state.request_key,
                    error = %err,
                    "Purchase request lookup failed"
                );
                state.halt_error("Invalid purchase request.");
                false
            }
        }
    }

    async fn validate_purchasable_handler(&self, state: &mut CallbackState) -> bool {
        let Some(purchase) = state.purchase_request.clone() else {
            return false;
        };

        match self.registry.handler_exists(&purchase.purchasable_type).await {
            Ok(true) => true,
            Ok(false) | Err(_) => {
                state.halt_error("Invalid purchasable handler.");
                false
            }
        }
    }

    fn validate_payment_profile(&self, state: &mut CallbackState, profile: &PaymentProfile) -> bool {
        let Some(purchase) = state.purchase_request.as_ref() else {
            return false;
        };

        if purchase.payment_profile_id != profile.profile_id {
            state.halt_error("Invalid payment profile.");
            return false;
        }

        true
    }

    async fn validate_purchaser(&self, state: &mut CallbackState) -> bool {
        let Some(purchase) = state.purchase_request.clone() else {
            return false;
        };

        match self.users.exists(purchase.user_id).await {
            Ok(true) => true,
            Ok(false) | Err(_) => {
                state.halt_error("Invalid purchaser.");
                false
            }
        }
    }

    async fn validate_purchasable_data(&self, state: &mut CallbackState) -> bool {
        let Some(purchase) = state.purchase_request.clone() else {
            return false;
        };

        match self.registry.validate_data(&purchase).await {
            Ok(true) => true,
            Ok(false) | Err(_) => {
                state.halt_error("Invalid purchasable data.");
                false
            }
        }
    }

    /// Currency must match exactly; amounts are compared at two-decimal
    /// precision so floating point noise in the payload cannot reject a
    /// legitimate payment.
    fn validate_cost(&self, state: &mut CallbackState, fields: &PaymentFields) -> bool {
        let Some(purchase) = state.purchase_request.as_ref() else {
            return false;
        };

        if fields.currency == purchase.cost_currency
            && amounts_match(fields.amount, purchase.cost_amount)
        {
            return true;
        }

        tracing::warn!(
            request_key = %state.request_key,
            claimed_amount = fields.amount,
            claimed_currency = %fields.currency,
            expected_amount = purchase.cost_amount,
            expected_currency = %purchase.cost_currency,
            "Callback cost validation failed"
        );
        state.halt_error("Invalid cost amount.");
        false
    }

    /// Attaches provider context for the audit log. Cannot fail.
    fn set_provider_metadata(&self, state: &mut CallbackState) {
        state.provider_metadata = Some(serde_json::json!({
            "provider": PROVIDER_ID,
            "transaction_id": state.transaction_id,
        }));
    }

    /// Reaching this step is treated as proof of receipt; the provider does
    /// not deliver failed payments through the `payment` notification type.
    fn set_payment_result(&self, state: &mut CallbackState) {
        state.payment_result = Some(PaymentResult::Received);
    }

    /// Commits the purchase request to its completed state. The store
    /// guarantees at-most-once completion per request key, so a duplicate
    /// delivery acknowledges without crediting again.
    async fn complete_transaction(&self, state: &mut CallbackState) {
        match self.purchases.complete(&state.request_key).await {
            Ok(CompletionOutcome::Completed) => {
                state.halt_info("Payment received.");
            }
            Ok(CompletionOutcome::AlreadyCompleted) => {
                tracing::info!(
                    request_key = %state.request_key,
                    transaction_id = %state.transaction_id,
                    "Duplicate delivery for completed purchase request"
                );
                state.halt_info("Transaction already processed.");
            }
            Err(err) => {
                tracing::error!(
                    request_key = %state.request_key,
                    error = %err,
                    "Transaction completion failed"
                );
                state.halt_error("Failed to complete transaction.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;
    use crate::domain::payment::{LogType, PurchaseRequest, PurchaseStatus};
    use crate::ports::ForumUser;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    // ══════════════════════════════════════════════════════════════
    // Test Infrastructure
    // ══════════════════════════════════════════════════════════════

    struct MockPurchaseStore {
        requests: Mutex<HashMap<String, PurchaseRequest>>,
        completions: AtomicU32,
    }

    impl MockPurchaseStore {
        fn with_request(request: PurchaseRequest) -> Self {
            let mut requests = HashMap::new();
            requests.insert(request.request_key.clone(), request);
            Self {
                requests: Mutex::new(requests),
                completions: AtomicU32::new(0),
            }
        }

        fn empty() -> Self {
            Self {
                requests: Mutex::new(HashMap::new()),
                completions: AtomicU32::new(0),
            }
        }

        fn completion_count(&self) -> u32 {
            self.completions.load(Ordering::SeqCst)
        }

        fn status_of(&self, request_key: &str) -> Option<PurchaseStatus> {
            self.requests
                .lock()
                .unwrap()
                .get(request_key)
                .map(|r| r.status)
        }
    }

    #[async_trait]
    impl PurchaseRequestStore for MockPurchaseStore {
        async fn find_by_request_key(
            &self,
            request_key: &str,
        ) -> Result<Option<PurchaseRequest>, DomainError> {
            Ok(self.requests.lock().unwrap().get(request_key).cloned())
        }

        async fn complete(&self, request_key: &str) -> Result<CompletionOutcome, DomainError> {
            let mut requests = self.requests.lock().unwrap();
            let request = requests
                .get_mut(request_key)
                .ok_or_else(|| DomainError::not_found("purchase request"))?;

            match request.status {
                PurchaseStatus::Pending => {
                    request.status = PurchaseStatus::Completed;
                    self.completions.fetch_add(1, Ordering::SeqCst);
                    Ok(CompletionOutcome::Completed)
                }
                PurchaseStatus::Completed => Ok(CompletionOutcome::AlreadyCompleted),
            }
        }
    }

    struct StaticRegistry {
        registered: Vec<&'static str>,
        data_valid: bool,
    }

    impl StaticRegistry {
        fn allowing(purchasable_type: &'static str) -> Self {
            Self {
                registered: vec![purchasable_type],
                data_valid: true,
            }
        }

        fn with_invalid_data(purchasable_type: &'static str) -> Self {
            Self {
                registered: vec![purchasable_type],
                data_valid: false,
            }
        }
    }

    #[async_trait]
    impl PurchasableRegistry for StaticRegistry {
        async fn handler_exists(&self, purchasable_type: &str) -> Result<bool, DomainError> {
            Ok(self.registered.contains(&purchasable_type))
        }

        async fn validate_data(&self, _request: &PurchaseRequest) -> Result<bool, DomainError> {
            Ok(self.data_valid)
        }
    }

    struct MockUsers {
        ids: Vec<u64>,
    }

    #[async_trait]
    impl UserDirectory for MockUsers {
        async fn find_by_public_id(
            &self,
            _public_id: &str,
        ) -> Result<Option<ForumUser>, DomainError> {
            Ok(None)
        }

        async fn find_by_id(&self, user_id: u64) -> Result<Option<ForumUser>, DomainError> {
            Ok(self.ids.contains(&user_id).then(|| ForumUser {
                user_id,
                username: "player".to_string(),
                email: "player@example.com".to_string(),
            }))
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Test Helpers
    // ══════════════════════════════════════════════════════════════

    fn test_request() -> PurchaseRequest {
        PurchaseRequest {
            purchase_request_id: 7,
            request_key: "req_abc".to_string(),
            user_id: 42,
            payment_profile_id: 1,
            purchasable_type: "user_upgrade".to_string(),
            title: "Premium".to_string(),
            cost_amount: 9.99,
            cost_currency: "USD".to_string(),
            status: PurchaseStatus::Pending,
        }
    }

    fn test_profile() -> PaymentProfile {
        PaymentProfile::new(1, "merchant_1", "project_1", "secret", "api_key")
    }

    fn test_fields() -> PaymentFields {
        PaymentFields {
            transaction_id: "tx_1".to_string(),
            request_key: "req_abc".to_string(),
            amount: 9.99,
            currency: "USD".to_string(),
        }
    }

    fn test_state() -> CallbackState {
        let body = serde_json::to_vec(&json!({
            "notification_type": "payment",
            "transaction": {"id": "tx_1"},
            "custom_parameters": {"request_key": "req_abc"},
        }))
        .unwrap();
        CallbackState::new(&body, "203.0.113.7")
    }

    fn pipeline(store: Arc<MockPurchaseStore>, registry: StaticRegistry) -> CallbackPipeline {
        CallbackPipeline::new(
            store,
            Arc::new(registry),
            Arc::new(MockUsers { ids: vec![42] }),
        )
    }

    // ══════════════════════════════════════════════════════════════
    // Full Run
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_payment_completes_purchase_request() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        assert_eq!(state.log_type, LogType::Info);
        assert_eq!(state.log_message, "Payment received.");
        assert_eq!(state.payment_result, Some(PaymentResult::Received));
        assert_eq!(state.response_key(), "result");
        assert_eq!(store.completion_count(), 1);
        assert_eq!(store.status_of("req_abc"), Some(PurchaseStatus::Completed));
    }

    #[tokio::test]
    async fn successful_run_attaches_provider_metadata() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store, StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        let metadata = state.provider_metadata.expect("metadata set");
        assert_eq!(metadata["provider"], "xsolla");
        assert_eq!(metadata["transaction_id"], "tx_1");
    }

    // ══════════════════════════════════════════════════════════════
    // Halting Steps
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unparseable_input_halts_without_log() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = CallbackState::new(b"not json", "203.0.113.7");

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        assert_eq!(state.log_type, LogType::None);
        assert!(!state.should_log());
        assert_eq!(store.completion_count(), 0);
    }

    #[tokio::test]
    async fn empty_request_key_halts_with_info() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();
        let fields = PaymentFields {
            request_key: String::new(),
            ..test_fields()
        };

        pipeline.run(&mut state, &fields, &test_profile()).await;

        assert_eq!(state.log_type, LogType::Info);
        assert_eq!(state.log_message, "Metadata is empty!");
        assert_eq!(state.response_key(), "result");
        assert_eq!(store.completion_count(), 0);
        assert_eq!(store.status_of("req_abc"), Some(PurchaseStatus::Pending));
    }

    #[tokio::test]
    async fn unknown_request_key_halts_with_error() {
        let store = Arc::new(MockPurchaseStore::empty());
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid purchase request.");
        assert_eq!(store.completion_count(), 0);
    }

    #[tokio::test]
    async fn unregistered_handler_halts_with_error() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("resource_license"));
        let mut state = test_state();

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid purchasable handler.");
        assert_eq!(store.completion_count(), 0);
    }

    #[tokio::test]
    async fn profile_mismatch_halts_with_error() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();
        let other_profile = PaymentProfile::new(99, "merchant_2", "project_2", "s", "k");

        pipeline.run(&mut state, &test_fields(), &other_profile).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid payment profile.");
        assert_eq!(store.completion_count(), 0);
    }

    #[tokio::test]
    async fn missing_purchaser_halts_with_error() {
        let store = Arc::new(MockPurchaseStore::with_request(PurchaseRequest {
            user_id: 1000,
            ..test_request()
        }));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid purchaser.");
        assert_eq!(store.completion_count(), 0);
    }

    #[tokio::test]
    async fn invalid_purchasable_data_halts_with_error() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(
            store.clone(),
            StaticRegistry::with_invalid_data("user_upgrade"),
        );
        let mut state = test_state();

        pipeline.run(&mut state, &test_fields(), &test_profile()).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid purchasable data.");
        assert_eq!(store.completion_count(), 0);
    }

    // ══════════════════════════════════════════════════════════════
    // Cost Validation
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn currency_mismatch_fails_cost_validation() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();
        let fields = PaymentFields {
            currency: "EUR".to_string(),
            ..test_fields()
        };

        pipeline.run(&mut state, &fields, &test_profile()).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid cost amount.");
        assert_eq!(store.completion_count(), 0);
        assert_eq!(store.status_of("req_abc"), Some(PurchaseStatus::Pending));
    }

    #[tokio::test]
    async fn currency_comparison_is_case_sensitive() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();
        let fields = PaymentFields {
            currency: "usd".to_string(),
            ..test_fields()
        };

        pipeline.run(&mut state, &fields, &test_profile()).await;

        assert_eq!(state.log_message, "Invalid cost amount.");
        assert_eq!(store.completion_count(), 0);
    }

    #[tokio::test]
    async fn amount_mismatch_fails_cost_validation() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();
        let fields = PaymentFields {
            amount: 10.99,
            ..test_fields()
        };

        pipeline.run(&mut state, &fields, &test_profile()).await;

        assert_eq!(state.log_type, LogType::Error);
        assert_eq!(state.log_message, "Invalid cost amount.");
    }

    #[tokio::test]
    async fn amount_matching_after_rounding_passes() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));
        let mut state = test_state();
        let fields = PaymentFields {
            amount: 9.990000001,
            ..test_fields()
        };

        pipeline.run(&mut state, &fields, &test_profile()).await;

        assert_eq!(state.log_message, "Payment received.");
        assert_eq!(store.completion_count(), 1);
    }

    // ══════════════════════════════════════════════════════════════
    // Idempotence
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn duplicate_delivery_completes_exactly_once() {
        let store = Arc::new(MockPurchaseStore::with_request(test_request()));
        let pipeline = pipeline(store.clone(), StaticRegistry::allowing("user_upgrade"));

        let mut first = test_state();
        pipeline.run(&mut first, &test_fields(), &test_profile()).await;

        let mut second = test_state();
        pipeline
            .run(&mut second, &test_fields(), &test_profile())
            .await;

        assert_eq!(first.log_message, "Payment received.");
        assert_eq!(second.log_message, "Transaction already processed.");
        assert_eq!(second.log_type, LogType::Info);
        assert_eq!(store.completion_count(), 1);
    }
}
