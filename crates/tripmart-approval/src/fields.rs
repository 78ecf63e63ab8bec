//! Field-name translation for the vendor-profile domain.
//!
//! Callers submit camelCase field names; storage uses snake_case.
//! The table is static and must be reviewed whenever the vendor
//! record schema changes. Unknown names pass through unchanged —
//! deliberate tolerance for forward-compatibility; callers log a
//! tagged warning so schema drift stays observable.

/// External (caller-facing) name → internal (storage) name.
pub static PROFILE_FIELD_MAP: &[(&str, &str)] = &[
    ("businessName", "business_name"),
    ("legalName", "legal_name"),
    ("contactPerson", "contact_person"),
    ("phoneNumber", "phone_number"),
    ("operatingAreas", "operating_areas"),
    ("operatingAreasOther", "operating_areas_other"),
    ("vendorType", "vendor_type"),
    ("vendorTypeOther", "vendor_type_other"),
    ("businessAddress", "business_address"),
    ("businessRegNumber", "business_reg_number"),
    ("taxId", "tax_id"),
    ("bankName", "bank_name"),
    ("bankNameOther", "bank_name_other"),
    ("accountHolderName", "account_holder_name"),
    ("accountNumber", "account_number"),
    ("bankBranch", "bank_branch"),
    ("regCertificateUrl", "reg_certificate_url"),
    ("nicPassportUrl", "nic_passport_url"),
    ("tourismLicenseUrl", "tourism_license_url"),
    ("logoUrl", "logo_url"),
    ("coverImageUrl", "cover_image_url"),
    ("galleryUrls", "gallery_urls"),
];

/// Translate an external name to its internal name.
pub fn to_internal(external: &str) -> Option<&'static str> {
    PROFILE_FIELD_MAP
        .iter()
        .find(|(ext, _)| *ext == external)
        .map(|(_, int)| *int)
}

/// Translate an internal name back to its external name.
pub fn to_external(internal: &str) -> Option<&'static str> {
    PROFILE_FIELD_MAP
        .iter()
        .find(|(_, int)| *int == internal)
        .map(|(ext, _)| *ext)
}

/// Whether a name appears in the table on either side.
pub fn is_known(name: &str) -> bool {
    PROFILE_FIELD_MAP
        .iter()
        .any(|(ext, int)| *ext == name || *int == name)
}

/// Resolve a name to its internal form: external names map through
/// the table, internal names map to themselves, and unknown names
/// pass through unchanged (the fallback flagged by [`is_known`]).
pub fn resolve_internal(name: &str) -> &str {
    to_internal(name).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_external_to_internal() {
        assert_eq!(to_internal("businessName"), Some("business_name"));
        assert_eq!(to_internal("galleryUrls"), Some("gallery_urls"));
        assert_eq!(to_internal("business_name"), None);
    }

    #[test]
    fn maps_internal_to_external() {
        assert_eq!(to_external("phone_number"), Some("phoneNumber"));
        assert_eq!(to_external("phoneNumber"), None);
    }

    #[test]
    fn table_is_bijective() {
        for (ext, int) in PROFILE_FIELD_MAP {
            assert_eq!(to_internal(ext), Some(*int));
            assert_eq!(to_external(int), Some(*ext));
        }
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(resolve_internal("customField"), "customField");
        assert!(!is_known("customField"));
    }

    #[test]
    fn internal_names_resolve_to_themselves() {
        assert_eq!(resolve_internal("bank_branch"), "bank_branch");
        assert!(is_known("bank_branch"));
    }
}
