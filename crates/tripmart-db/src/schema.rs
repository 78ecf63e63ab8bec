//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. The update-request snapshot
//! maps are FLEXIBLE objects since their key sets are dynamic.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Vendors (profile records)
-- =======================================================================
DEFINE TABLE vendor SCHEMAFULL;
DEFINE FIELD business_name ON TABLE vendor TYPE string;
DEFINE FIELD legal_name ON TABLE vendor TYPE option<string>;
DEFINE FIELD contact_person ON TABLE vendor TYPE option<string>;
DEFINE FIELD email ON TABLE vendor TYPE option<string>;
DEFINE FIELD phone_number ON TABLE vendor TYPE option<string>;
DEFINE FIELD vendor_type ON TABLE vendor TYPE option<string>;
DEFINE FIELD vendor_type_other ON TABLE vendor TYPE option<string>;
DEFINE FIELD operating_areas ON TABLE vendor TYPE array<string> \
    DEFAULT [];
DEFINE FIELD operating_areas_other ON TABLE vendor TYPE option<string>;
DEFINE FIELD business_address ON TABLE vendor TYPE option<string>;
DEFINE FIELD business_reg_number ON TABLE vendor TYPE option<string>;
DEFINE FIELD tax_id ON TABLE vendor TYPE option<string>;
DEFINE FIELD bank_name ON TABLE vendor TYPE option<string>;
DEFINE FIELD bank_name_other ON TABLE vendor TYPE option<string>;
DEFINE FIELD account_holder_name ON TABLE vendor TYPE option<string>;
DEFINE FIELD account_number ON TABLE vendor TYPE option<string>;
DEFINE FIELD bank_branch ON TABLE vendor TYPE option<string>;
DEFINE FIELD reg_certificate_url ON TABLE vendor TYPE option<string>;
DEFINE FIELD nic_passport_url ON TABLE vendor TYPE option<string>;
DEFINE FIELD tourism_license_url ON TABLE vendor TYPE option<string>;
DEFINE FIELD logo_url ON TABLE vendor TYPE option<string>;
DEFINE FIELD cover_image_url ON TABLE vendor TYPE option<string>;
DEFINE FIELD gallery_urls ON TABLE vendor TYPE array<string> DEFAULT [];
DEFINE FIELD status ON TABLE vendor TYPE string \
    ASSERT $value IN ['pending', 'approved', 'rejected', 'suspended'];
DEFINE FIELD created_at ON TABLE vendor TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE vendor TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Vendor services (listing records, children of a vendor)
-- =======================================================================
DEFINE TABLE vendor_service SCHEMAFULL;
DEFINE FIELD vendor_id ON TABLE vendor_service TYPE string;
DEFINE FIELD service_name ON TABLE vendor_service TYPE string;
DEFINE FIELD service_category ON TABLE vendor_service \
    TYPE option<string>;
DEFINE FIELD short_description ON TABLE vendor_service \
    TYPE option<string>;
DEFINE FIELD whats_included ON TABLE vendor_service TYPE option<string>;
DEFINE FIELD whats_not_included ON TABLE vendor_service \
    TYPE option<string>;
DEFINE FIELD duration_value ON TABLE vendor_service TYPE option<int>;
DEFINE FIELD duration_unit ON TABLE vendor_service TYPE option<string>;
DEFINE FIELD languages_offered ON TABLE vendor_service \
    TYPE array<string> DEFAULT [];
DEFINE FIELD group_size_min ON TABLE vendor_service TYPE option<int>;
DEFINE FIELD group_size_max ON TABLE vendor_service TYPE option<int>;
DEFINE FIELD daily_capacity ON TABLE vendor_service TYPE option<int>;
DEFINE FIELD operating_days ON TABLE vendor_service \
    TYPE array<string> DEFAULT [];
DEFINE FIELD locations_covered ON TABLE vendor_service \
    TYPE array<string> DEFAULT [];
DEFINE FIELD retail_price ON TABLE vendor_service TYPE option<float>;
DEFINE FIELD currency ON TABLE vendor_service TYPE option<string>;
DEFINE FIELD not_suitable_for ON TABLE vendor_service \
    TYPE option<string>;
DEFINE FIELD important_info ON TABLE vendor_service TYPE option<string>;
DEFINE FIELD cancellation_policy ON TABLE vendor_service \
    TYPE option<string>;
DEFINE FIELD accessibility_info ON TABLE vendor_service \
    TYPE option<string>;
DEFINE FIELD image_urls ON TABLE vendor_service TYPE array<string> \
    DEFAULT [];
DEFINE FIELD created_at ON TABLE vendor_service TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE vendor_service TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_vendor_service_vendor ON TABLE vendor_service \
    COLUMNS vendor_id;

-- =======================================================================
-- Update requests (pending change-sets with review lifecycle)
-- =======================================================================
DEFINE TABLE update_request SCHEMAFULL;
DEFINE FIELD vendor_id ON TABLE update_request TYPE string;
DEFINE FIELD service_id ON TABLE update_request TYPE option<string>;
DEFINE FIELD request_type ON TABLE update_request TYPE string \
    ASSERT $value IN ['profile_update', 'service_update', \
    'service_addition'];
DEFINE FIELD requested_by ON TABLE update_request TYPE string;
DEFINE FIELD requested_by_name ON TABLE update_request TYPE string;
DEFINE FIELD current_data ON TABLE update_request TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD requested_data ON TABLE update_request TYPE object \
    FLEXIBLE DEFAULT {};
DEFINE FIELD changed_fields ON TABLE update_request TYPE array<string> \
    DEFAULT [];
DEFINE FIELD status ON TABLE update_request TYPE string \
    ASSERT $value IN ['pending', 'approved', 'rejected'];
DEFINE FIELD reviewed_by ON TABLE update_request TYPE option<string>;
DEFINE FIELD reviewed_by_name ON TABLE update_request \
    TYPE option<string>;
DEFINE FIELD review_reason ON TABLE update_request TYPE option<string>;
DEFINE FIELD created_at ON TABLE update_request TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD reviewed_at ON TABLE update_request TYPE option<datetime>;
DEFINE INDEX idx_update_request_status ON TABLE update_request \
    COLUMNS status;
DEFINE INDEX idx_update_request_vendor ON TABLE update_request \
    COLUMNS vendor_id;

-- =======================================================================
-- Chat messages (append-only vendor↔admin threads)
-- =======================================================================
DEFINE TABLE chat_message SCHEMAFULL;
DEFINE FIELD vendor_id ON TABLE chat_message TYPE string;
DEFINE FIELD sender ON TABLE chat_message TYPE string \
    ASSERT $value IN ['vendor', 'admin'];
DEFINE FIELD sender_id ON TABLE chat_message TYPE string;
DEFINE FIELD sender_name ON TABLE chat_message TYPE string;
DEFINE FIELD message ON TABLE chat_message TYPE string;
DEFINE FIELD message_type ON TABLE chat_message TYPE string \
    ASSERT $value IN ['text', 'update_request', 'system'];
DEFINE FIELD update_request_id ON TABLE chat_message \
    TYPE option<string>;
DEFINE FIELD created_at ON TABLE chat_message TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD read_at ON TABLE chat_message TYPE option<datetime>;
DEFINE INDEX idx_chat_message_vendor ON TABLE chat_message \
    COLUMNS vendor_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn schema_v1_defines_all_tables() {
        for table in [
            "DEFINE TABLE vendor ",
            "DEFINE TABLE vendor_service ",
            "DEFINE TABLE update_request ",
            "DEFINE TABLE chat_message ",
        ] {
            assert!(SCHEMA_V1.contains(table), "missing table DDL: {table}");
        }
    }
}
