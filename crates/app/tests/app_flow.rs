use std::sync::Arc;

use orgdir_app::{AppConfig, AppServices, RouteName, StorageBackend};
use orgdir_auth::Role;
use orgdir_core::{CompanyId, EmployeeId};
use orgdir_directory::EmployeeDraft;
use orgdir_storage::{InMemoryKeyValueStore, KeyValueStore, keys};

fn services() -> AppServices {
    AppServices::build(&AppConfig::for_tests()).unwrap()
}

#[test]
fn login_gates_protected_routes() {
    let app = services();

    assert_eq!(app.router.navigate("/all-employees").unwrap().name, RouteName::Login);

    assert!(!app.credentials.login("admin", "wrong"));
    assert!(app.credentials.login("admin", "Admin"));
    let session = app.credentials.current_session().unwrap();
    assert_eq!(session.username, "Admin");
    assert_eq!(session.role, Role::Admin);

    assert_eq!(app.router.navigate("/all-employees").unwrap().name, RouteName::AllEmployees);
    assert_eq!(app.router.navigate("/login").unwrap().name, RouteName::Dashboard);

    app.credentials.logout();
    assert_eq!(app.router.navigate("/").unwrap().name, RouteName::Login);
    assert!(app.storage.get(keys::USER).unwrap().is_none());
}

#[test]
fn a_session_persisted_by_one_instance_is_seen_by_another() {
    let storage: Arc<dyn KeyValueStore> = InMemoryKeyValueStore::arc();
    let first = AppServices::with_storage(storage.clone(), &AppConfig::for_tests()).unwrap();
    let second = AppServices::with_storage(storage, &AppConfig::for_tests()).unwrap();

    assert!(first.credentials.login("jaime", "RRHH"));

    let route = second.router.navigate("/employees/tsn").unwrap();
    assert_eq!(route.name, RouteName::Employees);
    assert_eq!(second.credentials.current_session().map(|s| s.role), Some(Role::Hr));
}

#[tokio::test]
async fn add_get_and_delete_an_employee() {
    let app = services();
    let nsh = CompanyId::from("nsh");

    let before = app.employees.list_employees(&nsh).await.len();

    let added = app
        .employees
        .add_employee(
            &nsh,
            EmployeeDraft::new()
                .with("firstName", "Ana")
                .with("lastName", "Ruiz")
                .with("department", "Finance"),
        )
        .await
        .unwrap();
    assert!(!added.id.is_blank());

    let fetched = app.employees.get_employee(&nsh, &added.id).await.unwrap();
    assert_eq!(fetched.text("firstName"), Some("Ana"));
    assert_eq!(app.employees.list_employees(&nsh).await.len(), before + 1);

    assert!(app.employees.delete_employee(&nsh, &added.id).await.unwrap());
    assert!(app.employees.get_employee(&nsh, &added.id).await.is_none());

    let err = app.employees.delete_employee(&nsh, &added.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn file_backend_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        storage: StorageBackend::File(dir.path().to_path_buf()),
        ..AppConfig::for_tests()
    };
    let oth = CompanyId::from("oth");
    let id = EmployeeId::from("oth-900");

    {
        let app = AppServices::build(&config).unwrap();
        app.employees
            .add_employee(&oth, EmployeeDraft::new().with_id(id.clone()).with("firstName", "Luis"))
            .await
            .unwrap();
        assert!(app.credentials.login("natalia", "Larach"));
        app.set_dark_mode(true);
    }

    let app = AppServices::build(&config).unwrap();
    let restored = app.employees.get_employee(&oth, &id).await.unwrap();
    assert_eq!(restored.text("firstName"), Some("Luis"));
    assert!(app.theme.is_dark_mode());
    assert!(app.root.is_dark_marked());
    assert_eq!(app.router.navigate("/").unwrap().name, RouteName::Dashboard);
}

#[test]
fn persisted_theme_overrides_the_platform_preference() {
    let storage: Arc<dyn KeyValueStore> = InMemoryKeyValueStore::arc();
    storage.set(keys::THEME, "light").unwrap();

    let config = AppConfig {
        prefers_dark: true,
        ..AppConfig::for_tests()
    };
    let app = AppServices::with_storage(storage, &config).unwrap();
    assert!(!app.theme.is_dark_mode());

    app.set_dark_mode(true);
    assert_eq!(app.storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
}
