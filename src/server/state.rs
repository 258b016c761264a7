use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::notification::{NotificationResult, Notifier};
use crate::transport::{create_transport, Transport};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub notifier: Arc<Notifier>,
    pub started_at: Instant,
}

impl AppState {
    /// Build the state with the transport selected by `mail.transport`
    pub fn from_settings(settings: Settings) -> NotificationResult<Self> {
        let transport = create_transport(&settings.mail)?;
        Self::new(settings, transport)
    }

    pub fn new(settings: Settings, transport: Arc<dyn Transport>) -> NotificationResult<Self> {
        let notifier = Arc::new(Notifier::new(settings.mail.template_config(), transport)?);

        Ok(Self {
            settings: Arc::new(settings),
            notifier,
            started_at: Instant::now(),
        })
    }
}
