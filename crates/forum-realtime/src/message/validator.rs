//! Frame and payload validation rules.

use forum_core::error::{AppError, ErrorKind};
use forum_core::types::UserId;

use super::serializer::ProtocolError;
use super::types::SendMessagePayload;

/// Checks the raw frame before decoding.
pub fn validate_frame(raw: &str, max_bytes: usize) -> Result<(), ProtocolError> {
    if raw.len() > max_bytes {
        return Err(ProtocolError::Oversized {
            size: raw.len(),
            max: max_bytes,
        });
    }

    if raw.trim().is_empty() {
        return Err(ProtocolError::Empty);
    }

    Ok(())
}

/// A `send_message` payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSend {
    /// Parsed recipient
    pub receiver_id: UserId,
    /// Text body, possibly empty
    pub content: String,
    /// Image reference; empty strings are normalized to `None`
    pub image_url: Option<String>,
}

/// Requires a receiver and at least one of text or image.
pub fn validate_send_message(payload: SendMessagePayload) -> Result<ValidatedSend, AppError> {
    let image_url = payload.image_url.filter(|url| !url.is_empty());

    if payload.content.is_empty() && image_url.is_none() {
        return Err(AppError::validation("Message has neither content nor image"));
    }

    if payload.receiver_id.is_empty() {
        return Err(AppError::validation("receiver_id is required"));
    }

    let receiver_id = payload
        .receiver_id
        .parse::<UserId>()
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid receiver_id", e))?;

    Ok(ValidatedSend {
        receiver_id,
        content: payload.content,
        image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(receiver: &str, content: &str, image: Option<&str>) -> SendMessagePayload {
        SendMessagePayload {
            receiver_id: receiver.to_string(),
            content: content.to_string(),
            image_url: image.map(str::to_string),
        }
    }

    #[test]
    fn test_frame_limits() {
        assert!(validate_frame("{}", 16).is_ok());
        assert!(matches!(validate_frame("   ", 16), Err(ProtocolError::Empty)));
        assert!(matches!(
            validate_frame(&"x".repeat(17), 16),
            Err(ProtocolError::Oversized { size: 17, max: 16 })
        ));
    }

    #[test]
    fn test_rejects_empty_content_and_image() {
        let id = UserId::new().to_string();
        assert!(validate_send_message(payload(&id, "", None)).is_err());
        assert!(validate_send_message(payload(&id, "", Some(""))).is_err());
    }

    #[test]
    fn test_rejects_missing_or_bad_receiver() {
        assert!(validate_send_message(payload("", "hi", None)).is_err());
        assert!(validate_send_message(payload("bob", "hi", None)).is_err());
    }

    #[test]
    fn test_image_only_is_accepted() {
        let id = UserId::new();
        let ok = validate_send_message(payload(&id.to_string(), "", Some("/uploads/a.png"))).unwrap();
        assert_eq!(ok.receiver_id, id);
        assert_eq!(ok.image_url.as_deref(), Some("/uploads/a.png"));
    }
}
