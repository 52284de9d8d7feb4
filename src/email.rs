use crate::{settings::MailjetSettings, Result};
use mailjet::send::{self, Message, Recipient};

/// Mail dispatch with the business's from-identity baked in.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: mailjet::Client,
    from: Recipient,
    admin: Recipient,
    support_email: String,
}

impl Mailer {
    pub fn new(settings: &MailjetSettings) -> Result<Self> {
        let client = settings.client()?;
        Ok(Self {
            client,
            from: Recipient::named(&settings.from_email, &settings.from_name),
            admin: Recipient::new(&settings.admin_email),
            support_email: settings
                .support_email
                .clone()
                .unwrap_or_else(|| settings.from_email.clone()),
        })
    }

    /// Outbound message to a student, BCC'd to the admin address.
    pub fn message<S: ToString>(&self, subject: S) -> Message {
        Message::new(self.from.clone(), subject).bcc(self.admin.clone())
    }

    /// Internal report message, addressed to the admin.
    pub fn admin_message<S: ToString>(&self, subject: S) -> Message {
        Message::new(self.from.clone(), subject).to(self.admin.clone())
    }

    pub fn support_email(&self) -> &str {
        &self.support_email
    }

    pub fn signature(&self) -> String {
        let name = self.from.name.as_deref().unwrap_or(&self.from.email);
        format!("Thank you,<br/>{name}")
    }

    pub async fn send(&self, message: Message) -> Result<()> {
        send::send_one(&self.client, message).await?;
        Ok(())
    }
}

/// "a, b, c" or "none" for empty lists, for the literal-string report
/// bodies.
pub fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::Mailer;
    use crate::settings::MailjetSettings;

    pub fn mailer() -> Mailer {
        Mailer::new(&MailjetSettings {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            from_email: "hello@openpathtutoring.com".to_string(),
            from_name: "Open Path Tutoring".to_string(),
            admin_email: "danny@openpathtutoring.com".to_string(),
            support_email: Some("support@openpathtutoring.com".to_string()),
        })
        .expect("mailer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_messages_bcc_the_admin() {
        let mailer = test_util::mailer();
        let message = mailer.message("subject");
        assert_eq!(message.bcc[0].email, "danny@openpathtutoring.com");
        assert!(message.to.is_empty());
    }

    #[test]
    fn admin_messages_go_to_the_admin() {
        let mailer = test_util::mailer();
        let message = mailer.admin_message("subject");
        assert_eq!(message.to[0].email, "danny@openpathtutoring.com");
        assert!(message.bcc.is_empty());
    }

    #[test]
    fn name_lists_render_none_when_empty() {
        assert_eq!(name_list(&[]), "none");
        assert_eq!(
            name_list(&["Jane Doe".to_string(), "Ben".to_string()]),
            "Jane Doe, Ben"
        );
    }
}
