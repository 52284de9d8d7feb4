use crate::{Client, Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Recipient {
    pub fn new<S: ToString>(email: S) -> Self {
        Self {
            email: email.to_string(),
            name: None,
        }
    }

    pub fn named<S: ToString, N: ToString>(email: S, name: N) -> Self {
        Self {
            email: email.to_string(),
            name: Some(name.to_string()),
        }
    }
}

/// One message in a `/v3.1/send` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub from: Recipient,
    pub to: Vec<Recipient>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<Recipient>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<Recipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Recipient>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_part: Option<String>,
    #[serde(rename = "HTMLPart", skip_serializing_if = "Option::is_none")]
    pub html_part: Option<String>,
}

impl Message {
    pub fn new<S: ToString>(from: Recipient, subject: S) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: None,
            subject: subject.to_string(),
            text_part: None,
            html_part: None,
        }
    }

    pub fn to(mut self, recipient: Recipient) -> Self {
        self.to.push(recipient);
        self
    }

    pub fn cc(mut self, recipient: Recipient) -> Self {
        self.cc.push(recipient);
        self
    }

    pub fn bcc(mut self, recipient: Recipient) -> Self {
        self.bcc.push(recipient);
        self
    }

    pub fn reply_to(mut self, recipient: Recipient) -> Self {
        self.reply_to = Some(recipient);
        self
    }

    pub fn text<S: ToString>(mut self, body: S) -> Self {
        self.text_part = Some(body.to_string());
        self
    }

    pub fn html<S: ToString>(mut self, body: S) -> Self {
        self.html_part = Some(body.to_string());
        self
    }
}

#[derive(Debug, Serialize)]
struct SendRequest {
    #[serde(rename = "Messages")]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct SendResponse {
    #[serde(rename = "Messages", default)]
    pub messages: Vec<MessageResult>,
}

#[derive(Debug, Deserialize)]
pub struct MessageResult {
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<MessageError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageError {
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
    #[serde(rename = "ErrorCode", default)]
    pub error_code: String,
}

impl MessageResult {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Submit a batch of messages. A per-message error status is surfaced as
/// `Error::Rejected`.
pub async fn send(client: &Client, messages: Vec<Message>) -> Result<SendResponse> {
    let request = SendRequest { messages };
    let response: SendResponse = client.post("/v3.1/send", &request).await?;

    for result in &response.messages {
        if !result.is_success() {
            let detail = result
                .errors
                .iter()
                .map(|error| error.error_message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::rejected(format!(
                "status {}: {detail}",
                result.status
            )));
        }
    }

    Ok(response)
}

pub async fn send_one(client: &Client, message: Message) -> Result<SendResponse> {
    send(client, vec![message]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_mailjet_field_names() {
        let message = Message::new(
            Recipient::named("hello@openpathtutoring.com", "Danny"),
            "Reminder for Jane Doe and Tutor Bob - session",
        )
        .to(Recipient::new("jane@example.com"))
        .cc(Recipient::new("parent@example.com"))
        .bcc(Recipient::new("hello@openpathtutoring.com"))
        .reply_to(Recipient::new("bob@example.com"))
        .html("<p>See you soon</p>");

        let json = serde_json::to_value(&message).expect("serialize");
        assert_eq!(json["From"]["Email"], "hello@openpathtutoring.com");
        assert_eq!(json["From"]["Name"], "Danny");
        assert_eq!(json["To"][0]["Email"], "jane@example.com");
        assert_eq!(json["Cc"][0]["Email"], "parent@example.com");
        assert_eq!(json["Bcc"][0]["Email"], "hello@openpathtutoring.com");
        assert_eq!(json["ReplyTo"]["Email"], "bob@example.com");
        assert_eq!(json["HTMLPart"], "<p>See you soon</p>");
        assert!(json.get("TextPart").is_none());
    }

    #[test]
    fn empty_cc_and_bcc_are_omitted() {
        let message = Message::new(Recipient::new("from@example.com"), "subject")
            .to(Recipient::new("to@example.com"));

        let json = serde_json::to_value(&message).expect("serialize");
        assert!(json.get("Cc").is_none());
        assert!(json.get("Bcc").is_none());
    }
}
