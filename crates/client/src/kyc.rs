//! `/api/kyc/*` bindings and the submit-then-upload flow.

use futures::future::try_join_all;
use log::{debug, info};

use tunicoin_core::kyc::{
    KycApplication, KycDocument, KycDocumentType, KycPackage, KycSubmission, KycUploadReceipt,
};

use crate::client::ApiClient;
use crate::errors::Result;

/// Outcome of [`ApiClient::submit_kyc_application`].
#[derive(Debug, Clone)]
pub struct KycSubmissionResult {
    pub submission: KycSubmission,
    pub uploads: Vec<KycUploadReceipt>,
}

impl ApiClient {
    /// The current user's submission, or `None` if they never submitted.
    pub async fn kyc_status(&self) -> Result<Option<KycSubmission>> {
        match self.get("/api/kyc/status").await {
            Ok(submission) => Ok(Some(submission)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn submit_kyc(&self, application: &KycApplication) -> Result<KycSubmission> {
        self.post("/api/kyc/submit", application).await
    }

    pub async fn upload_kyc_document(
        &self,
        doc_type: KycDocumentType,
        document: &KycDocument,
    ) -> Result<KycUploadReceipt> {
        debug!(
            "[ApiClient] Uploading KYC document {} ({})",
            doc_type, document.file_name
        );
        self.post_file(
            &format!("/api/kyc/upload-document/{}", doc_type),
            &document.file_name,
            &document.content_type,
            &document.data,
        )
        .await
    }

    /// Sends the application, then uploads every document concurrently.
    ///
    /// The first failing upload fails the whole call; uploads already sent
    /// stay on the server and are replaced on resubmission.
    pub async fn submit_kyc_application(&self, package: &KycPackage) -> Result<KycSubmissionResult> {
        let submission = self.submit_kyc(&package.application).await?;
        info!(
            "[ApiClient] KYC information submitted, uploading {} documents",
            package.documents.len()
        );

        let uploads = try_join_all(
            package
                .documents
                .iter()
                .map(|(doc_type, document)| self.upload_kyc_document(*doc_type, document)),
        )
        .await?;

        Ok(KycSubmissionResult {
            submission,
            uploads,
        })
    }
}
