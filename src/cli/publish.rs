//! `twigg publish`: publish a generated draft.

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::client::{DraftsApi, DraftsClient};
use crate::config::ClientConfig;

pub const PUBLISHED_MESSAGE: &str = "Course published successfully!";

/// Handle `twigg publish <draft-id>`.
pub async fn handle_publish_command(draft_id: Option<String>, config: ClientConfig) -> Result<()> {
    let client = DraftsClient::new(config)?;
    publish_with(&client, draft_id.as_deref()).await
}

pub(crate) async fn publish_with<A>(api: &A, draft_id: Option<&str>) -> Result<()>
where
    A: DraftsApi + ?Sized,
{
    api.publish_draft(draft_id).await.map_err(|err| {
        tracing::error!("Error publishing course: {}", err);
        eyre!("{} ({})", err.user_message(), err.recovery_hint())
    })?;
    println!("{}", PUBLISHED_MESSAGE);
    Ok(())
}
