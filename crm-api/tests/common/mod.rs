use std::sync::Arc;

use crm_api::Database;
use tempfile::TempDir;

/// Fresh database in a temporary directory. Keep the `TempDir` alive for
/// the duration of the test.
pub fn test_db() -> (Arc<Database>, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(&dir.path().join("crm.sqlite3")).expect("open test database");
    (Arc::new(db), dir)
}

macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db.clone()))
                .configure(crm_api::handlers::configure),
        )
        .await
    };
}
