//! PostgreSQL repository tests
//!
//! Each test starts its own container, so they need Docker:
//!
//! ```bash
//! cargo test -p infra_db -- --ignored
//! ```

use core_kernel::StudentId;
use domain_simulation::{PageRequest, SimulationPort};
use domain_student::StudentPort;
use infra_db::{PgSimulationRepository, PgStudentRepository};
use test_utils::{
    assert_brl, create_isolated_test_database, TemporalFixtures, TestSimulationBuilder,
    TestStudentBuilder,
};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_student_round_trip() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = PgStudentRepository::new(db.pool().clone());

    let student = TestStudentBuilder::new().build();
    repo.create(&student).await.unwrap();

    let found = repo.find_by_email("ana.souza@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, student.id);
    assert_eq!(found.password_hash, student.password_hash);
    assert!(repo.find_by_id(StudentId::new()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_conflict() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = PgStudentRepository::new(db.pool().clone());

    repo.create(&TestStudentBuilder::new().build()).await.unwrap();
    let err = repo
        .create(&TestStudentBuilder::new().build())
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_email_taken_by_other() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = PgStudentRepository::new(db.pool().clone());

    let ana = TestStudentBuilder::new().build();
    let bia = TestStudentBuilder::new().with_email("bia@example.com").build();
    repo.create(&ana).await.unwrap();
    repo.create(&bia).await.unwrap();

    assert!(repo.email_taken_by_other("bia@example.com", ana.id).await.unwrap());
    assert!(!repo.email_taken_by_other("bia@example.com", bia.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_student_is_not_found() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = PgStudentRepository::new(db.pool().clone());

    let err = repo.update_password(StudentId::new(), "hash").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_simulations_paged_newest_first() {
    let db = create_isolated_test_database().await.unwrap();
    let students = PgStudentRepository::new(db.pool().clone());
    let repo = PgSimulationRepository::new(db.pool().clone());

    let student = TestStudentBuilder::new().build();
    students.create(&student).await.unwrap();

    for (days, amount) in [(3, 6_000.0), (2, 7_000.0), (1, 8_000.0)] {
        let sim = TestSimulationBuilder::for_student(student.id)
            .amount(amount)
            .created_at(TemporalFixtures::days_before(days))
            .build();
        repo.save(&sim).await.unwrap();
    }

    let page = repo
        .list_for_student(student.id, PageRequest::new(Some(1), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages(), 2);
    assert_brl(&page.items[0].total_amount, 8_000.0);
    assert_brl(&page.items[1].total_amount, 7_000.0);

    let evolution = repo.evolution_for_student(student.id).await.unwrap();
    assert_brl(&evolution[0].total_amount, 6_000.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_simulation_keeps_stored_installment() {
    let db = create_isolated_test_database().await.unwrap();
    let students = PgStudentRepository::new(db.pool().clone());
    let repo = PgSimulationRepository::new(db.pool().clone());

    let student = TestStudentBuilder::new().build();
    students.create(&student).await.unwrap();
    repo.save(&TestSimulationBuilder::for_student(student.id).build())
        .await
        .unwrap();

    let stored = repo.all_for_student(student.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_brl(&stored[0].monthly_installment, 1034.23);
    assert_eq!(stored[0].monthly_interest_rate.to_f64(), 0.0349);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_simulation_for_unknown_student_is_rejected() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = PgSimulationRepository::new(db.pool().clone());

    let sim = TestSimulationBuilder::for_student(StudentId::new()).build();
    assert!(repo.save(&sim).await.is_err());
}
