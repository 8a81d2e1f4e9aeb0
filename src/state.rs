// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

use std::sync::Arc;

use crate::auth::{AccessGate, Authenticator, TokenCodec};
use crate::config::AppConfig;
use crate::providers::{CompletionProvider, NoopNotifier, Notifier, PaymentProvider};
use crate::storage::{JsonStorage, StorageError};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<JsonStorage>,
    pub codec: Arc<TokenCodec>,
    pub gate: Arc<AccessGate>,
    pub authenticator: Arc<Authenticator>,
    pub notifier: Arc<dyn Notifier>,
    pub payments: Option<Arc<dyn PaymentProvider>>,
    pub ai: Option<Arc<dyn CompletionProvider>>,
}

impl AppState {
    /// Build state from configuration, initializing the storage tree.
    ///
    /// Providers start disabled; attach them with the `with_*` builders.
    pub fn new(config: &AppConfig) -> Result<Self, StorageError> {
        let mut storage = JsonStorage::new(crate::storage::StoragePaths::new(&config.data_dir));
        storage.initialize()?;
        let storage = Arc::new(storage);

        let codec = Arc::new(TokenCodec::new(&config.jwt_secret));
        let gate = Arc::new(AccessGate::new(codec.clone(), config.access_policy()));
        let authenticator = Arc::new(Authenticator::new(storage.clone(), codec.clone()));

        Ok(Self {
            storage,
            codec,
            gate,
            authenticator,
            notifier: Arc::new(NoopNotifier),
            payments: None,
            ai: None,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_payments(mut self, payments: Arc<dyn PaymentProvider>) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn with_ai(mut self, ai: Arc<dyn CompletionProvider>) -> Self {
        self.ai = Some(ai);
        self
    }
}
