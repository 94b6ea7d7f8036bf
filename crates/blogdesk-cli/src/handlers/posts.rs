#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use blogdesk::application::{
    CancelToken, CreateView, EditView, ListView, LoadOutcome, PreviewRegistry, SubmitOutcome,
};
use blogdesk::domain::FieldUpdate;
use tracing::debug;

use crate::args::{DraftArgs, PostsCmd};
use crate::client::{CliError, Ctx};
use crate::console::Console;
use crate::io::{read_cover, read_text};

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List => list(ctx).await,
        PostsCmd::Show { id } => show(ctx, &id).await,
        PostsCmd::Create { title, fields } => create(ctx, title, fields).await,
        PostsCmd::Edit { id, title, fields } => edit(ctx, id, title, fields).await,
    }
}

async fn list(ctx: &Ctx) -> Result<(), CliError> {
    let console = Arc::new(Console::new(ctx.placeholder_cover()));
    let mut view = ListView::new(ctx.service.clone(), console.clone());
    view.mount()
        .await
        .map_err(|err| CliError::Rejected(err.user_message()))?;
    view.render(console.as_ref());
    Ok(())
}

async fn show(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let response = ctx
        .service
        .get_by_id(id, &CancelToken::new())
        .await
        .map_err(|err| CliError::Rejected(err.user_message()))?;
    let json = serde_json::to_string_pretty(&response.data)
        .map_err(|err| CliError::InvalidInput(format!("failed to render post {id}: {err}")))?;
    println!("{json}");
    Ok(())
}

async fn create(ctx: &Ctx, title: String, fields: DraftArgs) -> Result<(), CliError> {
    let updates = field_updates(Some(title), fields).await?;

    let console = Arc::new(Console::new(ctx.placeholder_cover()));
    let mut view = CreateView::new(
        ctx.service.clone(),
        console.clone(),
        console,
        PreviewRegistry::new(),
        ctx.placeholder_cover(),
    );
    for update in updates {
        view.apply(update);
    }

    finish(view.submit().await)
}

async fn edit(
    ctx: &Ctx,
    id: String,
    title: Option<String>,
    fields: DraftArgs,
) -> Result<(), CliError> {
    let updates = field_updates(title, fields).await?;

    let console = Arc::new(Console::new(ctx.placeholder_cover()));
    let mut view = EditView::new(
        id,
        ctx.settings.session.user(),
        ctx.service.clone(),
        console.clone(),
        console,
    );

    match view.mount().await {
        LoadOutcome::Ready | LoadOutcome::AlreadyMounted => {}
        LoadOutcome::Denied => {
            return Err(CliError::Rejected(
                "post belongs to another author".to_string(),
            ));
        }
        LoadOutcome::Unavailable(err) => return Err(CliError::Rejected(err.user_message())),
        LoadOutcome::Cancelled => return Err(CliError::Rejected("cancelled".to_string())),
    }

    for update in updates {
        view.apply(update);
    }
    finish(view.submit().await)
}

/// Only flags that were given become edits; the rest of the draft is left alone.
async fn field_updates(
    title: Option<String>,
    fields: DraftArgs,
) -> Result<Vec<FieldUpdate>, CliError> {
    let DraftArgs {
        summary,
        summary_file,
        content,
        content_file,
        cover,
    } = fields;

    let mut updates = Vec::new();
    if let Some(title) = title {
        updates.push(FieldUpdate::Title(title));
    }
    if let Some(summary) = read_text(summary, summary_file).await? {
        updates.push(FieldUpdate::Summary(summary));
    }
    if let Some(content) = read_text(content, content_file).await? {
        updates.push(FieldUpdate::Content(content));
    }
    if let Some(path) = cover {
        let cover = read_cover(&path).await?;
        debug!(file = cover.file_name(), bytes = cover.len(), "cover loaded");
        updates.push(FieldUpdate::Cover(Some(cover)));
    }
    Ok(updates)
}

fn finish(outcome: SubmitOutcome) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Succeeded(_) => Ok(()),
        SubmitOutcome::Invalid(err) => Err(CliError::Rejected(err.to_string())),
        SubmitOutcome::Failed(err) => Err(CliError::Rejected(err.user_message())),
        SubmitOutcome::Unexpected { status } => Err(CliError::Rejected(format!(
            "unexpected response status {status}"
        ))),
        SubmitOutcome::Cancelled => Err(CliError::Rejected("cancelled".to_string())),
        SubmitOutcome::NotReady => Err(CliError::Rejected("edit form is not ready".to_string())),
    }
}
