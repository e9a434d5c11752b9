//! Form-gate and status-update collaborators backed by the REST client

use async_trait::async_trait;
use tender_forms::{
    FormValues, StatusUpdater, SubmissionError, SubmitIntent, Submitter, TenderStatus,
};
use tracing::info;

use crate::client::ApiClient;
use crate::models::{Bid, Tender};

/// Saves tender forms through the API
#[derive(Debug, Clone)]
pub struct TenderSubmitter {
    client: ApiClient,
}

impl TenderSubmitter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Submitter for TenderSubmitter {
    async fn submit(
        &self,
        intent: SubmitIntent,
        values: &FormValues,
    ) -> Result<(), SubmissionError> {
        match intent {
            SubmitIntent::Create => {
                let created = self.client.create_tender(&Tender::from_form(values)?).await?;
                info!(id = ?created.id, "tender created");
            }
            SubmitIntent::Update(id) => {
                let mut tender = Tender::from_form(values)?;
                tender.id = Some(id);
                self.client.update_tender(&tender).await?;
            }
            SubmitIntent::Delete(id) => {
                if !self.client.delete_tender(id).await? {
                    return Err(SubmissionError::rejected(format!("tender {} was not deleted", id)));
                }
            }
        }
        Ok(())
    }
}

/// Saves bid forms through the API
#[derive(Debug, Clone)]
pub struct BidSubmitter {
    client: ApiClient,
}

impl BidSubmitter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Submitter for BidSubmitter {
    async fn submit(
        &self,
        intent: SubmitIntent,
        values: &FormValues,
    ) -> Result<(), SubmissionError> {
        match intent {
            SubmitIntent::Create => {
                let created = self.client.create_bid(&Bid::from_form(values)?).await?;
                info!(id = ?created.id, tender_id = ?created.tender_id, "bid placed");
            }
            SubmitIntent::Update(id) => {
                let mut bid = Bid::from_form(values)?;
                bid.id = Some(id);
                self.client.update_bid(&bid).await?;
            }
            SubmitIntent::Delete(id) => {
                if !self.client.delete_bid(id).await? {
                    return Err(SubmissionError::rejected(format!("bid {} was not deleted", id)));
                }
            }
        }
        Ok(())
    }
}

/// Status changes are a read-modify-write of the whole tender
#[async_trait]
impl StatusUpdater for ApiClient {
    async fn update_status(
        &self,
        tender_id: i64,
        status: TenderStatus,
    ) -> Result<(), SubmissionError> {
        let mut tender = self.get_tender(tender_id).await?;
        tender.id = Some(tender_id);
        tender.status = Some(status);
        self.update_tender(&tender).await?;
        Ok(())
    }
}
