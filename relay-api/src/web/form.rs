//! Form body decoding shared by the verification gate and the contact handler.
//!
//! The browser submits the contact form either URL-encoded or as multipart
//! form data; both decode into the same [`Submission`]. Unknown fields are
//! ignored, missing fields stay empty.

use axum::body::Bytes;
use futures::stream;
use thiserror::Error;
use url::form_urlencoded;

/// Form field carrying the Turnstile token.
pub const TOKEN_FIELD: &str = "cf-turnstile-response";

/// Hidden honeypot field; humans never see it, bots fill it in.
pub const HONEYPOT_FIELD: &str = "website";

/// Raw contact-form fields, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub website: String,
    pub token: String,
}

impl Submission {
    fn set(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = value,
            "email" => self.email = value,
            "message" => self.message = value,
            HONEYPOT_FIELD => self.website = value,
            TOKEN_FIELD => self.token = value,
            _ => {}
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(Option<String>),
    #[error("invalid multipart body: {0}")]
    InvalidMultipart(#[from] multer::Error),
}

/// Decode a buffered request body into a [`Submission`].
pub async fn parse_submission(
    content_type: Option<&str>,
    body: &Bytes,
) -> Result<Submission, FormError> {
    match content_type {
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
            Ok(parse_urlencoded(body))
        }
        Some(ct) if ct.starts_with("multipart/form-data") => parse_multipart(ct, body).await,
        other => Err(FormError::UnsupportedContentType(
            other.map(|s| s.to_string()),
        )),
    }
}

/// Pull just the Turnstile token out of a buffered body.
///
/// Used by the gate middleware; an undecodable body yields `None`, which
/// callers treat the same as a missing token.
pub async fn extract_token(content_type: Option<&str>, body: &Bytes) -> Option<String> {
    let submission = parse_submission(content_type, body).await.ok()?;

    if submission.token.is_empty() {
        None
    } else {
        Some(submission.token)
    }
}

fn parse_urlencoded(body: &Bytes) -> Submission {
    let mut submission = Submission::default();

    for (key, value) in form_urlencoded::parse(body) {
        submission.set(key.as_ref(), value.into_owned());
    }

    submission
}

async fn parse_multipart(content_type: &str, body: &Bytes) -> Result<Submission, FormError> {
    let boundary = multer::parse_boundary(content_type)?;

    // The body is already buffered, so feed multer a single-chunk stream.
    let chunk = body.clone();
    let body_stream = stream::once(async move { Ok::<Bytes, std::convert::Infallible>(chunk) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);

    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = match field.name() {
            Some(n) => n.to_string(),
            None => continue,
        };
        let value = field.text().await?;
        submission.set(&name, value);
    }

    Ok(submission)
}
