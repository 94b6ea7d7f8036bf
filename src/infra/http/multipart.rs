use blogdesk_api_types::fields;
use reqwest::multipart::{Form, Part};

use crate::application::{PostPayload, ServiceError};

/// Text parts in field order, then the cover when a new file was chosen.
pub fn post_form(payload: PostPayload) -> Result<Form, ServiceError> {
    let PostPayload {
        title,
        summary,
        content,
        cover,
    } = payload;

    let form = Form::new()
        .text(fields::TITLE, title)
        .text(fields::SUMMARY, summary)
        .text(fields::CONTENT, content);

    let Some(cover) = cover else {
        return Ok(form);
    };

    let part = Part::bytes(cover.bytes().to_vec())
        .file_name(cover.file_name().to_string())
        .mime_str(cover.content_type().as_ref())
        .map_err(|err| ServiceError::Request(format!("cover content type: {err}")))?;
    Ok(form.part(fields::COVER, part))
}
