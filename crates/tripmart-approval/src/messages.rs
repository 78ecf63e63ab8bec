//! Chat message templates emitted by the approval engine.
//!
//! The wording is part of the vendor-facing contract; tests assert
//! the literal strings.

/// At most this many field names appear in a submission summary; the
/// rest collapse into an "and N more" suffix.
const SUMMARY_FIELD_LIMIT: usize = 5;

/// `"f1, f2, f3, f4, f5 and N more"` — external field names.
pub fn field_summary(changed_fields: &[String]) -> String {
    let mut summary = changed_fields
        .iter()
        .take(SUMMARY_FIELD_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if changed_fields.len() > SUMMARY_FIELD_LIMIT {
        summary.push_str(&format!(
            " and {} more",
            changed_fields.len() - SUMMARY_FIELD_LIMIT
        ));
    }
    summary
}

pub fn profile_update_submitted(summary: &str) -> String {
    format!(
        "Profile update request submitted.\n\nFields to update: {summary}\n\n\
         Please review and approve the changes."
    )
}

pub fn service_update_submitted(summary: &str) -> String {
    format!(
        "Service update request submitted.\n\nFields to update: {summary}\n\n\
         Please review and approve the changes."
    )
}

pub fn service_addition_submitted(service_name: &str) -> String {
    format!(
        "New service addition request: {service_name}.\n\n\
         Please review and approve the new service."
    )
}

pub fn profile_update_approved(reviewer_name: &str) -> String {
    format!(
        "Your profile update request has been approved by {reviewer_name}.\n\n\
         Your profile has been updated successfully."
    )
}

pub fn service_update_approved(reviewer_name: &str) -> String {
    format!(
        "Your service update request has been approved by {reviewer_name}.\n\n\
         Your service has been updated successfully."
    )
}

pub fn service_addition_approved(service_name: &str, reviewer_name: &str) -> String {
    format!(
        "Your new service '{service_name}' has been approved by {reviewer_name}.\n\n\
         The service is now active."
    )
}

pub fn request_rejected(reviewer_name: &str, reason: &str) -> String {
    format!(
        "Your profile update request has been rejected by {reviewer_name}.\n\n\
         Reason: {reason}\n\nPlease review and resubmit if needed."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn summary_lists_all_fields_up_to_limit() {
        assert_eq!(field_summary(&names(&["a", "b"])), "a, b");
        assert_eq!(
            field_summary(&names(&["a", "b", "c", "d", "e"])),
            "a, b, c, d, e"
        );
    }

    #[test]
    fn summary_truncates_past_five_fields() {
        assert_eq!(
            field_summary(&names(&["a", "b", "c", "d", "e", "f", "g"])),
            "a, b, c, d, e and 2 more"
        );
    }

    #[test]
    fn submission_templates() {
        assert_eq!(
            profile_update_submitted("businessName"),
            "Profile update request submitted.\n\nFields to update: businessName\n\n\
             Please review and approve the changes."
        );
        assert_eq!(
            service_addition_submitted("City Tour"),
            "New service addition request: City Tour.\n\n\
             Please review and approve the new service."
        );
    }

    #[test]
    fn review_templates() {
        assert_eq!(
            profile_update_approved("Ann Admin"),
            "Your profile update request has been approved by Ann Admin.\n\n\
             Your profile has been updated successfully."
        );
        assert_eq!(
            service_addition_approved("City Tour", "Ann Admin"),
            "Your new service 'City Tour' has been approved by Ann Admin.\n\n\
             The service is now active."
        );
        assert_eq!(
            request_rejected("Ann Admin", "incomplete documents"),
            "Your profile update request has been rejected by Ann Admin.\n\n\
             Reason: incomplete documents\n\nPlease review and resubmit if needed."
        );
    }
}
