use crate::adapters::ReqwestTransport;
use crate::app::managers::{AccountManager, FavoriteManager, HistoryManager, ReservationManager};
use crate::config::ClientConfig;
use crate::core::requester::{ResilientRequester, RetryPolicy};
use crate::core::session::SessionCache;
use crate::core::workflow::ReservationWorkflow;
use crate::domain::model::{Credentials, RequestIntent, RequestOutcome};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Wires transport, session cache, requester and workflow for one backend account.
#[derive(Clone)]
pub struct ParkingClient {
    requester: Arc<ResilientRequester>,
    workflow: Arc<ReservationWorkflow>,
}

impl ParkingClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::from_config(config)?);
        Ok(Self::with_transport(
            transport,
            config,
            config.credentials().clone(),
        ))
    }

    pub fn with_transport<C: ConfigProvider + ?Sized>(
        transport: Arc<dyn Transport>,
        config: &C,
        credentials: Credentials,
    ) -> Self {
        let session = Arc::new(SessionCache::new(
            transport.clone(),
            config.base_url(),
            credentials,
        ));
        let requester = Arc::new(ResilientRequester::new(
            session,
            transport,
            config.base_url(),
            RetryPolicy::from_config(config),
        ));
        let workflow = Arc::new(ReservationWorkflow::new(requester.clone()));

        tracing::info!("Parking client initialized for {}", config.base_url());
        Self {
            requester,
            workflow,
        }
    }

    pub async fn execute(&self, intent: &RequestIntent) -> RequestOutcome {
        self.requester.execute(intent).await
    }

    pub async fn execute_with_cancel(
        &self,
        intent: &RequestIntent,
        cancel: &CancellationToken,
    ) -> RequestOutcome {
        self.requester.execute_with_cancel(intent, cancel).await
    }

    pub fn requester(&self) -> &Arc<ResilientRequester> {
        &self.requester
    }

    pub fn workflow(&self) -> &Arc<ReservationWorkflow> {
        &self.workflow
    }

    pub fn account(&self) -> AccountManager {
        AccountManager::new(self.requester.clone())
    }

    pub fn favorites(&self) -> FavoriteManager {
        FavoriteManager::new(self.requester.clone())
    }

    pub fn reservations(&self) -> ReservationManager {
        ReservationManager::new(self.requester.clone(), self.workflow.clone())
    }

    pub fn history(&self) -> HistoryManager {
        HistoryManager::new(self.requester.clone())
    }
}
