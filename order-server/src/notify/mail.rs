//! Outgoing mail
//!
//! SES v2 with a raw MIME message so the quote can ride along as an
//! attachment. `LogMailSender` stands in when quote delivery runs locally.

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types::{Destination, EmailContent, RawMessage};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::NotifyError;
use super::quote::QuoteDocument;

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<QuoteDocument>,
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError>;
}

pub struct SesMailSender {
    client: SesClient,
    from: String,
}

impl SesMailSender {
    pub fn new(client: SesClient, from: impl Into<String>) -> Self {
        Self {
            client,
            from: from.into(),
        }
    }

    /// Build a client from the default AWS credential chain
    pub async fn from_env(from: impl Into<String>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(SesClient::new(&aws_config), from)
    }
}

#[async_trait]
impl MailSender for SesMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let boundary = format!("=_order_{}", uuid::Uuid::new_v4().simple());
        let mime = build_mime(&self.from, mail, &boundary);

        let raw = RawMessage::builder()
            .data(Blob::new(mime))
            .build()
            .map_err(|e| NotifyError::Mail(e.to_string()))?;

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(&mail.to).build())
            .content(EmailContent::builder().raw(raw).build())
            .send()
            .await
            .map_err(|e| {
                NotifyError::Mail(aws_sdk_sesv2::error::DisplayErrorContext(e).to_string())
            })?;

        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail sent");
        Ok(())
    }
}

/// Records mail in the log instead of sending it
#[derive(Debug, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            attachment = mail.attachment.as_ref().map(|a| a.file_name.as_str()),
            "Mail delivery disabled, message logged only"
        );
        Ok(())
    }
}

/// RFC 2047 encoded-word for non-ASCII headers
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value))
    }
}

/// Base64 with 76-column lines
fn encode_body(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    encoded
        .as_bytes()
        .chunks(76)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Assemble a multipart/mixed message
pub fn build_mime(from: &str, mail: &OutgoingMail, boundary: &str) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!("From: {from}\r\n"));
    out.push_str(&format!("To: {}\r\n", mail.to));
    out.push_str(&format!("Subject: {}\r\n", encode_header(&mail.subject)));
    out.push_str("MIME-Version: 1.0\r\n");
    out.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n\r\n"
    ));

    out.push_str(&format!("--{boundary}\r\n"));
    out.push_str("Content-Type: text/plain; charset=UTF-8\r\n");
    out.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
    out.push_str(&encode_body(mail.body.as_bytes()));
    out.push_str("\r\n");

    if let Some(doc) = &mail.attachment {
        let name = encode_header(&doc.file_name);
        out.push_str(&format!("--{boundary}\r\n"));
        out.push_str(&format!(
            "Content-Type: {}; name=\"{name}\"\r\n",
            doc.content_type
        ));
        out.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{name}\"\r\n"
        ));
        out.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
        out.push_str(&encode_body(&doc.bytes));
        out.push_str("\r\n");
    }

    out.push_str(&format!("--{boundary}--\r\n"));
    out.into_bytes()
}
