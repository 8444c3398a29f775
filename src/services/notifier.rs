// Best-effort notification sent after a contact submission is stored

use crate::email_client::EmailError;
use crate::models::contact::ContactSubmission;
use async_trait::async_trait;

#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), EmailError>;
}
