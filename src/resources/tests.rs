use crate::error::ApiError;
use crate::session::SessionStore;
use crate::storage::MemoryTokenStore;
use crate::testing::{BASE, FakeBackend, PASSWORD};
use crate::ClientConfig;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use workshop_shared::{
    JobStatus, JobSummary, JobUpdate, MaterialUpdate, MonthlyUsage, NewJob, NewMaterial,
    NewSparePartUsage, ValidationError,
};

async fn signed_in(backend: &FakeBackend, email: &str) -> SessionStore<FakeBackend> {
    let store = SessionStore::new(ClientConfig::new(BASE), backend.clone(), MemoryTokenStore::new());
    store.initialize().await;
    store.login(email, PASSWORD).await.unwrap();
    store
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

// =========================================================
// 工单
// =========================================================

#[tokio::test]
async fn test_created_job_appears_in_list() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let jobs = store.api().jobs();

    let created = jobs
        .create(&NewJob {
            title: "Repair pump".to_string(),
            assigned_to: None,
            status: JobStatus::Pending,
            progress: 0,
        })
        .await
        .unwrap();

    let listed = jobs.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    let job = &listed[0];
    assert_eq!(job.id, created.id);
    assert_eq!(job.title, "Repair pump");
    assert_eq!(job.assigned_to, None);
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.progress, 0);
    assert_eq!(job.created_at, job.updated_at);
}

#[tokio::test]
async fn test_status_update_is_reflected_and_other_fields_kept() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let jobs = store.api().jobs();
    let id = jobs
        .create(&NewJob {
            title: "Service compressor".to_string(),
            assigned_to: Some(2),
            ..Default::default()
        })
        .await
        .unwrap()
        .id;
    let before = jobs.list().await.unwrap().remove(0);

    jobs.update(id, JobUpdate::status(JobStatus::InProgress))
        .await
        .unwrap();

    let after = jobs.list().await.unwrap().remove(0);
    assert_eq!(after.status, JobStatus::InProgress);
    assert_eq!(after.title, before.title);
    assert_eq!(after.assigned_to, Some(2));
    assert_eq!(after.assigned_name.as_deref(), Some("Ama Owusu"));
    assert_eq!(after.progress, before.progress);
    assert!(after.updated_at > before.updated_at);

    let sent = backend.requests().pop().unwrap();
    assert!(sent.url.ends_with("/jobs"));
    let put = backend
        .requests()
        .into_iter()
        .find(|r| r.url == format!("{}/jobs/{}", BASE, id))
        .unwrap();
    assert_eq!(put.body.as_deref(), Some(r#"{"status":"in progress"}"#));
}

#[tokio::test]
async fn test_blank_title_is_rejected_before_sending() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let sent_before = backend.request_count();

    let err = store
        .api()
        .jobs()
        .create(&NewJob {
            title: "  ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::Required("job title"))
    ));
    assert_eq!(backend.request_count(), sent_before);
}

#[tokio::test]
async fn test_employee_sees_and_updates_only_own_jobs() {
    let backend = FakeBackend::new();
    let manager = signed_in(&backend, "manager@shop.test").await;
    for (title, assignee) in [("Weld frame", Some(2)), ("Paint door", Some(3)), ("Sweep", None)] {
        manager
            .api()
            .jobs()
            .create(&NewJob {
                title: title.to_string(),
                assigned_to: assignee,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let employee = signed_in(&backend, "ama@shop.test").await;
    let own = employee.api().jobs().list().await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].title, "Weld frame");

    employee
        .api()
        .jobs()
        .update(own[0].id, JobUpdate::progress(40))
        .await
        .unwrap();
    assert_eq!(employee.api().jobs().list().await.unwrap()[0].progress, 40);

    let others = backend
        .jobs()
        .into_iter()
        .find(|j| j.title == "Paint door")
        .unwrap();
    let err = employee
        .api()
        .jobs()
        .update(others.id, JobUpdate::progress(10))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    // 403 不影响会话
    assert!(employee.state().is_authenticated());
}

#[tokio::test]
async fn test_employee_cannot_delete_or_list_employees() {
    let backend = FakeBackend::new();
    let manager = signed_in(&backend, "manager@shop.test").await;
    let id = manager
        .api()
        .jobs()
        .create(&NewJob {
            title: "Replace filter".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id;

    let employees = manager.api().jobs().employees().await.unwrap();
    assert_eq!(
        employees.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec!["Ama Owusu", "Yaw Boateng"]
    );

    let employee = signed_in(&backend, "yaw@shop.test").await;
    assert!(matches!(
        employee.api().jobs().delete(id).await,
        Err(ApiError::Forbidden(_))
    ));
    assert!(matches!(
        employee.api().jobs().employees().await,
        Err(ApiError::Forbidden(_))
    ));

    manager.api().jobs().delete(id).await.unwrap();
    assert!(manager.api().jobs().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unassign_sends_explicit_null() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let jobs = store.api().jobs();
    let id = jobs
        .create(&NewJob {
            title: "Check brakes".to_string(),
            assigned_to: Some(3),
            ..Default::default()
        })
        .await
        .unwrap()
        .id;

    jobs.update(
        id,
        JobUpdate {
            assigned_to: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let job = jobs.list().await.unwrap().remove(0);
    assert_eq!(job.assigned_to, None);
    assert_eq!(job.assigned_name, None);
}

#[tokio::test]
async fn test_update_missing_job_is_not_found() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;

    let err = store
        .api()
        .jobs()
        .update(999, JobUpdate::status(JobStatus::Completed))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m == "Job not found"));
}

// =========================================================
// 物料
// =========================================================

#[tokio::test]
async fn test_material_lifecycle() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let materials = store.api().materials();

    let id = materials
        .create(&NewMaterial {
            name: "Hydraulic oil".to_string(),
            quantity: 12,
            ..Default::default()
        })
        .await
        .unwrap()
        .id;

    let listed = materials.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].minimum_level, 5);
    assert_eq!(listed[0].unit, "pcs");
    assert!(!listed[0].is_low_stock());

    materials
        .update(
            id,
            MaterialUpdate {
                quantity: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let updated = materials.list().await.unwrap().remove(0);
    assert_eq!(updated.name, "Hydraulic oil");
    assert!(updated.is_low_stock());

    materials.delete(id).await.unwrap();
    assert!(materials.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_employee_cannot_change_materials() {
    let backend = FakeBackend::new();
    let id = backend.seed_material("Rivets", 100, 20);
    let store = signed_in(&backend, "ama@shop.test").await;
    let materials = store.api().materials();

    let err = materials
        .update(
            id,
            MaterialUpdate {
                quantity: Some(80),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(materials.list().await.unwrap()[0].quantity, 100);

    let err = materials
        .create(&NewMaterial {
            name: "Bolts".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    let err = materials.delete(id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(materials.list().await.unwrap().len(), 1);
    // 403 不影响会话
    assert!(store.state().is_authenticated());
}

// =========================================================
// 备件
// =========================================================

#[tokio::test]
async fn test_recorded_usage_is_attributed_to_caller() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let parts = store.api().spare_parts();

    parts
        .record(&NewSparePartUsage {
            part_name: "Fan belt".to_string(),
            quantity_used: 2,
        })
        .await
        .unwrap();

    let usages = parts.list().await.unwrap();
    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].used_by, 1);
    assert_eq!(usages[0].used_by_label(), "Kofi Mensah");

    parts.delete(usages[0].id).await.unwrap();
    assert!(parts.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_quantity_usage_is_rejected_locally() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    let sent_before = backend.request_count();

    let err = store
        .api()
        .spare_parts()
        .record(&NewSparePartUsage {
            part_name: "Fan belt".to_string(),
            quantity_used: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(backend.request_count(), sent_before);
}

#[tokio::test]
async fn test_monthly_summary_groups_by_month_and_part() {
    let backend = FakeBackend::new();
    backend.seed_usage("Fan belt", 2, 2, day(2024, 1, 5));
    backend.seed_usage("Fan belt", 3, 3, day(2024, 1, 20));
    backend.seed_usage("Air filter", 1, 2, day(2024, 1, 9));
    backend.seed_usage("Fan belt", 4, 2, day(2024, 2, 2));
    let store = signed_in(&backend, "manager@shop.test").await;

    let summary = store.api().spare_parts().monthly_summary().await.unwrap();

    let row = |month: &str, part: &str, total| MonthlyUsage {
        month: month.to_string(),
        part_name: part.to_string(),
        total_used: total,
    };
    assert_eq!(
        summary,
        vec![
            row("2024-02", "Fan belt", 4),
            row("2024-01", "Air filter", 1),
            row("2024-01", "Fan belt", 5),
        ]
    );
}

// =========================================================
// 仪表盘
// =========================================================

#[tokio::test]
async fn test_dashboard_overview() {
    let backend = FakeBackend::new();
    backend.seed_material("Grease", 3, 5);
    backend.seed_material("Solder", 5, 5);
    backend.seed_material("Tape", 6, 5);
    let store = signed_in(&backend, "manager@shop.test").await;
    let jobs = store.api().jobs();
    for title in ["A", "B", "C"] {
        jobs.create(&NewJob {
            title: title.to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    }
    let first = jobs.list().await.unwrap()[0].id;
    jobs.update(first, JobUpdate::status(JobStatus::Completed))
        .await
        .unwrap();

    let overview = store.api().dashboard_overview().await.unwrap();

    assert_eq!(
        overview.jobs,
        JobSummary {
            total: 3,
            pending: 2,
            in_progress: 0,
            completed: 1,
        }
    );
    assert_eq!(
        overview
            .low_stock
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Grease", "Solder"]
    );
}

#[tokio::test]
async fn test_dashboard_overview_fails_as_a_whole() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "manager@shop.test").await;
    backend.set_offline(true);

    assert!(matches!(
        store.api().dashboard_overview().await,
        Err(ApiError::Network(_))
    ));
    // 网络错误不影响会话
    assert!(store.state().is_authenticated());
}

#[tokio::test]
async fn test_employee_records_usage_but_cannot_delete() {
    let backend = FakeBackend::new();
    let store = signed_in(&backend, "yaw@shop.test").await;
    let parts = store.api().spare_parts();

    parts
        .record(&NewSparePartUsage {
            part_name: "Spark plug".to_string(),
            quantity_used: 4,
        })
        .await
        .unwrap();

    let usage = parts.list().await.unwrap().remove(0);
    assert_eq!(usage.used_by_name.as_deref(), Some("Yaw Boateng"));
    assert!(matches!(
        parts.delete(usage.id).await,
        Err(ApiError::Forbidden(_))
    ));
}
