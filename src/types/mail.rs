use serde::Serialize;

/// Wire shape for the mail provider. Bodies are already rendered by the time
/// they get here; this subsystem never templates.
#[derive(Serialize)]
pub struct SendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
}

impl Default for SendEmail {
    fn default() -> Self {
        Self {
            from: "noreply@lantern.dev".to_string(),
            to: vec![],
            subject: "".to_string(),
            html: None,
            text: None,
        }
    }
}
