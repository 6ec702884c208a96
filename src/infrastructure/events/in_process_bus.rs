use std::sync::Arc;

use crate::domain::users::events::DomainEvent;
use crate::domain::users::ports::{EventHandler, EventPublisher};

/// In-process publish/subscribe hub
///
/// Handlers are registered once while the application is wired up. Each
/// published event runs every handler on its own spawned task, so `publish`
/// returns before any handler has started. Nothing is persisted or replayed.
#[derive(Default)]
pub struct InProcessEventBus {
  handlers: Vec<Arc<dyn EventHandler>>,
}

impl InProcessEventBus {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a handler for every subsequent event
  pub fn subscribe(mut self, handler: Arc<dyn EventHandler>) -> Self {
    tracing::debug!(handler = handler.name(), "Event handler subscribed");
    self.handlers.push(handler);
    self
  }

  pub fn handler_count(&self) -> usize {
    self.handlers.len()
  }
}

impl EventPublisher for InProcessEventBus {
  fn publish(&self, event: DomainEvent) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
      tracing::error!(event = event.name(), "No async runtime, event dropped");
      return;
    };

    let event = Arc::new(event);
    for handler in &self.handlers {
      let handler = handler.clone();
      let event = event.clone();
      runtime.spawn(async move {
        if let Err(e) = handler.handle(&event).await {
          tracing::error!(
            handler = handler.name(),
            event = event.name(),
            error = %e,
            "Event handler failed"
          );
        }
      });
    }
  }
}
