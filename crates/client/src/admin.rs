//! `/api/admin/*` bindings. The server rejects these for non-admin users.

use tunicoin_core::admin::{
    AdminListQuery, AdminStats, AdminTier, AdminTierList, KycSubmissionPage, PayoutPage,
    PayoutStats, RecentActivity, ReviewAction, ReviewDecision, TierPayload,
};

use crate::client::ApiClient;
use crate::errors::Result;

impl ApiClient {
    pub async fn admin_stats(&self) -> Result<AdminStats> {
        self.get("/api/admin/dashboard/stats").await
    }

    pub async fn admin_activity(&self) -> Result<Vec<RecentActivity>> {
        self.get("/api/admin/dashboard/activity").await
    }

    pub async fn admin_kyc_submissions(&self, query: &AdminListQuery) -> Result<KycSubmissionPage> {
        self.get_with_query("/api/admin/kyc/submissions", query)
            .await
    }

    async fn review_kyc(
        &self,
        submission_id: &str,
        action: ReviewAction,
        decision: &ReviewDecision,
    ) -> Result<serde_json::Value> {
        self.post(
            &format!(
                "/api/admin/kyc/submissions/{}/{}",
                submission_id,
                action.as_str()
            ),
            decision,
        )
        .await
    }

    pub async fn approve_kyc(&self, submission_id: &str, notes: &str) -> Result<serde_json::Value> {
        self.review_kyc(
            submission_id,
            ReviewAction::Approve,
            &ReviewDecision::approve(notes),
        )
        .await
    }

    /// Fails locally when `reason` is blank.
    pub async fn reject_kyc(&self, submission_id: &str, reason: &str) -> Result<serde_json::Value> {
        let decision = ReviewDecision::reject(reason)?;
        self.review_kyc(submission_id, ReviewAction::Reject, &decision)
            .await
    }

    pub async fn admin_payouts(&self, query: &AdminListQuery) -> Result<PayoutPage> {
        self.get_with_query("/api/admin/payouts", query).await
    }

    pub async fn admin_payout_stats(&self) -> Result<PayoutStats> {
        self.get("/api/admin/payouts/stats").await
    }

    async fn review_payout(
        &self,
        payout_id: &str,
        action: ReviewAction,
        decision: &ReviewDecision,
    ) -> Result<serde_json::Value> {
        self.post(
            &format!("/api/admin/payouts/{}/{}", payout_id, action.as_str()),
            decision,
        )
        .await
    }

    pub async fn approve_payout(&self, payout_id: &str, notes: &str) -> Result<serde_json::Value> {
        self.review_payout(
            payout_id,
            ReviewAction::Approve,
            &ReviewDecision::approve(notes),
        )
        .await
    }

    /// Fails locally when `reason` is blank.
    pub async fn reject_payout(&self, payout_id: &str, reason: &str) -> Result<serde_json::Value> {
        let decision = ReviewDecision::reject(reason)?;
        self.review_payout(payout_id, ReviewAction::Reject, &decision)
            .await
    }

    pub async fn admin_tiers(&self) -> Result<Vec<AdminTier>> {
        let list: AdminTierList = self.get("/api/admin/tiers").await?;
        Ok(list.tiers)
    }

    pub async fn create_tier(&self, payload: &TierPayload) -> Result<serde_json::Value> {
        self.post("/api/admin/tiers", payload).await
    }

    pub async fn update_tier(&self, tier_id: &str, payload: &TierPayload) -> Result<serde_json::Value> {
        self.put(&format!("/api/admin/tiers/{}", tier_id), payload)
            .await
    }

    pub async fn toggle_tier_status(&self, tier_id: &str) -> Result<serde_json::Value> {
        self.patch_empty(&format!("/api/admin/tiers/{}/toggle-status", tier_id))
            .await
    }
}
