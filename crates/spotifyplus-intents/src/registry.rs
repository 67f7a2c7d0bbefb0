//! Intent registry
//!
//! Maps intent types to their descriptors and dispatches incoming intents
//! to the shared [`IntentHandler`].

use crate::builtin;
use crate::descriptor::IntentDescriptor;
use crate::error::{IntentError, IntentResult};
use crate::handler::IntentHandler;
use crate::intent::{Intent, IntentResponse};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// The intent registry manages every registered intent
pub struct IntentRegistry {
    /// Descriptors indexed by intent type
    descriptors: DashMap<String, Arc<IntentDescriptor>>,
    handler: IntentHandler,
}

impl IntentRegistry {
    /// Create an empty registry
    pub fn new(handler: IntentHandler) -> Self {
        Self {
            descriptors: DashMap::new(),
            handler,
        }
    }

    /// Create a registry holding every builtin intent
    pub fn with_defaults(handler: IntentHandler) -> Self {
        let registry = Self::new(handler);
        for descriptor in builtin::all() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register an intent, replacing any intent of the same type
    #[instrument(skip(self, descriptor), fields(intent_type = descriptor.intent_type))]
    pub fn register(&self, descriptor: IntentDescriptor) {
        debug!("Registering intent");
        self.descriptors
            .insert(descriptor.intent_type.to_string(), Arc::new(descriptor));
    }

    /// Remove an intent; returns true when it was registered
    pub fn unregister(&self, intent_type: &str) -> bool {
        self.descriptors.remove(intent_type).is_some()
    }

    /// Descriptor for an intent type
    pub fn get(&self, intent_type: &str) -> Option<Arc<IntentDescriptor>> {
        self.descriptors.get(intent_type).map(|d| d.clone())
    }

    pub fn has_intent(&self, intent_type: &str) -> bool {
        self.descriptors.contains_key(intent_type)
    }

    /// Registered intent types, sorted
    pub fn intent_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.descriptors.iter().map(|e| e.key().clone()).collect();
        types.sort();
        types
    }

    pub fn handler(&self) -> &IntentHandler {
        &self.handler
    }

    /// Handle an intent
    #[instrument(skip(self, intent), fields(intent_type = %intent.intent_type))]
    pub async fn handle(&self, intent: &Intent) -> IntentResult<IntentResponse> {
        // Clone the Arc so no map guard is held across the await
        let descriptor = self.get(&intent.intent_type).ok_or_else(|| {
            warn!("Intent not registered");
            IntentError::UnknownIntent(intent.intent_type.clone())
        })?;

        self.handler.handle(&descriptor, intent).await
    }
}

impl std::fmt::Debug for IntentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRegistry")
            .field("intents", &self.descriptors.len())
            .finish()
    }
}
