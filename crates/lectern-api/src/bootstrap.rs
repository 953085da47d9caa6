use anyhow::Result;
use tracing::{info, warn};

use lectern_db::Database;

use crate::auth::hash_password;

/// Credentials for the administrator account created on first start.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct BootstrapConfig {
    pub admin: Option<AdminCredentials>,
    pub seed_teachers: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub teachers_seeded: usize,
}

/// One-time setup run before the listener binds. Migrations already ran in
/// [`Database::open`]; this adds the admin account and the initial roster.
/// Running it again changes nothing.
pub fn initialize(db: &Database, config: &BootstrapConfig) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();

    match &config.admin {
        Some(admin) => {
            if db.get_account_by_username(&admin.username)?.is_none() {
                let hash = hash_password(&admin.password)?;
                report.admin_created = db.ensure_account(&admin.username, &hash, true)?;
                if report.admin_created {
                    info!("Bootstrap admin '{}' created", admin.username);
                }
            }
        }
        None => warn!("No bootstrap admin configured; admin pages stay unreachable until one exists"),
    }

    if config.seed_teachers {
        report.teachers_seeded = db.seed_teachers_if_empty()?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authenticate;
    use lectern_db::seed::TEACHER_ROSTER;

    fn config() -> BootstrapConfig {
        BootstrapConfig {
            admin: Some(AdminCredentials {
                username: "principal".into(),
                password: "s3cret-pass".into(),
            }),
            seed_teachers: true,
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let db = Database::open_in_memory().unwrap();

        let first = initialize(&db, &config()).unwrap();
        assert_eq!(first, BootstrapReport { admin_created: true, teachers_seeded: TEACHER_ROSTER.len() });

        let second = initialize(&db, &config()).unwrap();
        assert_eq!(second, BootstrapReport::default());

        assert_eq!(db.list_accounts().unwrap().len(), 1);
        assert_eq!(db.count_teachers().unwrap(), TEACHER_ROSTER.len() as i64);
    }

    #[test]
    fn bootstrap_admin_can_sign_in() {
        let db = Database::open_in_memory().unwrap();
        initialize(&db, &config()).unwrap();

        let user = authenticate(&db, "principal", "s3cret-pass").unwrap();
        assert!(user.is_admin);
    }

    #[test]
    fn existing_account_is_left_alone() {
        let db = Database::open_in_memory().unwrap();
        db.create_account("principal", "original-hash", false).unwrap();

        let report = initialize(&db, &config()).unwrap();
        assert!(!report.admin_created);

        let row = db.get_account_by_username("principal").unwrap().unwrap();
        assert_eq!(row.password, "original-hash");
        assert!(!row.is_admin);
    }

    #[test]
    fn seeding_can_be_disabled() {
        let db = Database::open_in_memory().unwrap();
        let report = initialize(&db, &BootstrapConfig::default()).unwrap();
        assert_eq!(report, BootstrapReport::default());
        assert_eq!(db.count_teachers().unwrap(), 0);
    }
}
