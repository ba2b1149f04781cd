//! Doctor notification emails.
//!
//! Delivery is best effort: every failure is logged and swallowed, so a
//! missing or broken mail server never fails the triage request that
//! produced the report.

use mail_builder::MessageBuilder;
use mail_send::SmtpClientBuilder;

use crate::config::EmailSettings;
use crate::triage::report::TriageReport;

pub struct DoctorNotifier {
    settings: EmailSettings,
}

impl DoctorNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    /// Email the configured doctor a summary of a freshly generated report.
    pub async fn notify(&self, report: &TriageReport) {
        let (Some(doctor_email), Some(smtp_host)) =
            (&self.settings.doctor_email, &self.settings.smtp_host)
        else {
            tracing::warn!("No doctor email or SMTP host configured, skipping notification");
            return;
        };

        let message = MessageBuilder::new()
            .from((
                self.settings.from_name.as_str(),
                self.settings.from_email.as_str(),
            ))
            .to(doctor_email.as_str())
            .subject(subject(report))
            .text_body(text_body(report))
            .html_body(html_body(report));

        let mut smtp = SmtpClientBuilder::new(smtp_host.as_str(), self.settings.smtp_port)
            .implicit_tls(self.settings.smtp_tls);
        if let (Some(user), Some(pass)) = (
            &self.settings.smtp_username,
            &self.settings.smtp_password,
        ) {
            smtp = smtp.credentials((user.as_str(), pass.as_str()));
        }

        let mut client = match smtp.connect().await {
            Ok(client) => client,
            Err(err) => {
                tracing::error!(error = %err, host = %smtp_host, "SMTP connection failed");
                return;
            }
        };

        match client.send(message).await {
            Ok(()) => {
                tracing::info!(urgency = report.urgency.as_str(), "Notification sent to doctor")
            }
            Err(err) => tracing::error!(error = %err, "Failed to send email"),
        }
    }
}

fn subject(report: &TriageReport) -> String {
    format!(
        "New Triage Report - Urgency: {}",
        report.urgency.as_str().to_uppercase()
    )
}

fn text_body(report: &TriageReport) -> String {
    format!(
        "A new triage report has been generated.\n\n\
         Patient ID: {}\n\
         Urgency: {}\n\
         Recommended Action: {}\n\n\
         Doctor Summary:\n{}\n",
        report.patient_id.as_deref().unwrap_or("unknown"),
        report.urgency.as_str(),
        report.recommended_action,
        report.summary_for_doctor,
    )
}

fn html_body(report: &TriageReport) -> String {
    let json = serde_json::to_string_pretty(report).unwrap_or_default();
    format!(
        "<h2>New Triage Report</h2>\n\
         <p><b>Patient ID:</b> {}</p>\n\
         <p><b>Urgency:</b> {}</p>\n\
         <p><b>Recommended Action:</b> {}</p>\n\
         <p><b>Doctor Summary:</b> {}</p>\n\
         <pre style=\"background:#f4f4f4; padding:10px; border-radius:6px; white-space:pre-wrap;\">{}</pre>\n",
        report.patient_id.as_deref().unwrap_or("unknown"),
        report.urgency.as_str(),
        report.recommended_action,
        report.summary_for_doctor,
        json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::report::Urgency;

    fn report() -> TriageReport {
        TriageReport {
            patient_id: Some("p-42".into()),
            age: None,
            sex: None,
            symptoms: None,
            urgency: Urgency::High,
            red_flags: None,
            possible_conditions: None,
            recommended_action: "ER now".into(),
            summary_for_doctor: "Chest pain radiating to left arm".into(),
            follow_ups: None,
            disclaimers: vec!["This is not medical advice".into()],
        }
    }

    fn unconfigured_settings() -> EmailSettings {
        EmailSettings {
            doctor_email: None,
            from_email: "noreply@pretriage.local".into(),
            from_name: "Pretriage".into(),
            smtp_host: None,
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            smtp_tls: true,
        }
    }

    #[test]
    fn subject_upper_cases_urgency() {
        assert_eq!(subject(&report()), "New Triage Report - Urgency: HIGH");
    }

    #[test]
    fn text_body_lists_key_fields() {
        let body = text_body(&report());
        assert!(body.contains("Patient ID: p-42"));
        assert!(body.contains("Urgency: high"));
        assert!(body.contains("Recommended Action: ER now"));
        assert!(body.contains("Doctor Summary:\nChest pain radiating to left arm"));
    }

    #[test]
    fn text_body_handles_missing_patient_id() {
        let mut r = report();
        r.patient_id = None;
        assert!(text_body(&r).contains("Patient ID: unknown"));
    }

    #[test]
    fn html_body_embeds_pretty_json() {
        let body = html_body(&report());
        assert!(body.contains("<h2>New Triage Report</h2>"));
        assert!(body.contains("<b>Urgency:</b> high"));
        // Pretty-printed JSON of the full report sits in the <pre> block
        assert!(body.contains("<pre"));
        assert!(body.contains("\"urgency\": \"high\""));
        assert!(body.contains("\"patientId\": \"p-42\""));
    }

    #[tokio::test]
    async fn unconfigured_notifier_is_a_no_op() {
        let notifier = DoctorNotifier::new(unconfigured_settings());
        // Must return without attempting any network I/O
        notifier.notify(&report()).await;
    }
}
