//! Sync runner behavior against in-memory collaborators.

use std::io;
use std::sync::{Arc, Mutex};

use tap_model::{
    Contact, ContactId, ContactSource, ContactStore, ContactUpdate, RawContact, SourceError,
    StoreError, SyncOutcome,
};
use tap_sync::{SyncError, SyncGate, SyncOptions, SyncRunner, WritePolicy};

const TYPE_CUSTOM: i32 = 0;
const TYPE_MOBILE: i32 = 2;

// =========================================================================
// Test collaborators
// =========================================================================

struct FakeSource {
    contacts: Vec<RawContact>,
    denied: bool,
}

impl FakeSource {
    fn new(contacts: Vec<RawContact>) -> Self {
        Self {
            contacts,
            denied: false,
        }
    }

    fn denied() -> Self {
        Self {
            contacts: Vec::new(),
            denied: true,
        }
    }
}

impl ContactSource for FakeSource {
    fn fetch_starred(&self) -> Result<Vec<RawContact>, SourceError> {
        if self.denied {
            return Err(SourceError::PermissionDenied);
        }
        Ok(self.contacts.clone())
    }
}

#[derive(Default)]
struct FakeStore {
    contacts: Vec<Contact>,
    fail_load: bool,
    /// Names whose insert or update fails.
    failing_names: Vec<String>,
    writes: usize,
}

impl FakeStore {
    fn failing_on(mut self, name: &str) -> Self {
        self.failing_names.push(name.to_string());
        self
    }

    fn names(&self) -> Vec<&str> {
        self.contacts.iter().map(|c| c.name.as_str()).collect()
    }

    fn refuses(&self, name: &str) -> bool {
        self.failing_names.iter().any(|n| n == name)
    }
}

impl ContactStore for FakeStore {
    fn load_all(&self) -> Result<Vec<Contact>, StoreError> {
        if self.fail_load {
            return Err(StoreError::backend("read failed", io::Error::other("corrupt")));
        }
        Ok(self.contacts.clone())
    }

    fn insert(&mut self, contact: &Contact) -> Result<ContactId, StoreError> {
        if self.refuses(&contact.name) {
            return Err(StoreError::backend("insert failed", io::Error::other("disk full")));
        }
        self.writes += 1;
        let id = self.contacts.len() as ContactId + 1;
        self.contacts.push(contact.clone().with_id(id));
        Ok(id)
    }

    fn update(&mut self, update: &ContactUpdate) -> Result<(), StoreError> {
        if self.refuses(&update.name) {
            return Err(StoreError::backend("update failed", io::Error::other("disk full")));
        }
        self.writes += 1;
        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or(StoreError::NotFound { id: update.id })?;
        contact.apply(update);
        Ok(())
    }
}

fn mobile(name: &str, number: &str) -> RawContact {
    RawContact::new(name, number).with_type(TYPE_MOBILE)
}

fn favorites() -> Vec<RawContact> {
    vec![
        mobile("Ada", "+1 (234) 567-8901"),
        RawContact::new("Grace", "345 678 9012")
            .with_type(TYPE_CUSTOM)
            .with_custom_label("WhatsApp"),
        mobile("Alan", "+44 20 1234 5678"),
    ]
}

// =========================================================================
// Runs
// =========================================================================

#[test]
fn first_run_inserts_and_second_run_changes_nothing() {
    let source = FakeSource::new(favorites());
    let mut store = FakeStore::default();
    let runner = SyncRunner::default();

    let first = runner.run(&source, &mut store).expect("first run");
    assert_eq!(first.outcome, SyncOutcome::new(3, 0));
    assert_eq!(first.fetched, 3);
    assert_eq!(first.processed(), 3);
    assert!(store.contacts[1].is_messaging_contact());

    let second = runner.run(&source, &mut store).expect("second run");
    insta::assert_snapshot!(second.outcome.summary(), @"No changes needed");
    assert_eq!(second.unchanged, 3);
    assert_eq!(store.writes, 3);
}

#[test]
fn changed_favorites_are_updated() {
    let mut store = FakeStore::default();
    let runner = SyncRunner::default();
    runner
        .run(&FakeSource::new(favorites()), &mut store)
        .expect("seed run");

    let mut changed = favorites();
    changed[0] = mobile("Ada Lovelace", "12345678901");
    let report = runner
        .run(&FakeSource::new(changed), &mut store)
        .expect("second run");

    insta::assert_snapshot!(report.outcome.to_string(), @"0 new, 1 updated");
    assert_eq!(store.names(), ["Ada Lovelace", "Grace", "Alan"]);
}

#[test]
fn entries_without_digits_are_skipped_by_default() {
    let source = FakeSource::new(vec![
        mobile("Ada", "2345678901"),
        mobile("Nobody", "n/a"),
        RawContact::default(),
    ]);
    let mut store = FakeStore::default();

    let report = SyncRunner::default().run(&source, &mut store).expect("run");
    assert_eq!(report.skipped, 2);
    assert_eq!(report.processed(), 1);
    assert_eq!(store.names(), ["Ada"]);
}

#[test]
fn unmatchable_entries_can_be_kept() {
    let source = FakeSource::new(vec![mobile("Ada", "2345678901"), mobile("Nobody", "n/a")]);
    let mut store = FakeStore::default();
    let runner = SyncRunner::new(SyncOptions::new().with_skip_unmatchable(false));

    let report = runner.run(&source, &mut store).expect("run");
    assert_eq!(report.skipped, 0);
    assert_eq!(store.names(), ["Ada", "Nobody"]);
}

#[test]
fn dry_run_writes_nothing() {
    let source = FakeSource::new(favorites());
    let mut store = FakeStore::default();
    let runner = SyncRunner::new(SyncOptions::new().with_dry_run(true));

    let report = runner.run(&source, &mut store).expect("dry run");
    assert!(report.dry_run);
    assert_eq!(report.outcome, SyncOutcome::new(3, 0));
    assert_eq!(report.actions.len(), 3);
    assert!(store.contacts.is_empty());
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn abort_policy_stops_at_first_failed_write() {
    let source = FakeSource::new(favorites());
    let mut store = FakeStore::default().failing_on("Grace");

    let err = SyncRunner::default()
        .run(&source, &mut store)
        .expect_err("write should fail");
    match err {
        SyncError::Apply {
            applied, action, ..
        } => {
            assert_eq!(applied, 1);
            assert_eq!(action, "insert");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Writes before the failure are kept; nothing after it was attempted.
    assert_eq!(store.names(), ["Ada"]);
}

#[test]
fn continue_policy_applies_remaining_writes() {
    let source = FakeSource::new(favorites());
    let mut store = FakeStore::default().failing_on("Grace");
    let runner =
        SyncRunner::new(SyncOptions::new().with_write_policy(WritePolicy::ContinueOnError));

    let report = runner.run(&source, &mut store).expect("run completes");
    assert_eq!(report.outcome, SyncOutcome::new(2, 0));
    assert!(report.has_failures());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].action, "insert");
    assert_eq!(report.failures[0].name, "Grace");
    assert_eq!(store.names(), ["Ada", "Alan"]);
}

#[test]
fn fetch_failure_is_reported() {
    let mut store = FakeStore::default();
    let err = SyncRunner::default()
        .run(&FakeSource::denied(), &mut store)
        .expect_err("fetch should fail");
    assert!(matches!(err, SyncError::Fetch(SourceError::PermissionDenied)));
    assert!(err.suggestion().is_some());
}

#[test]
fn load_failure_is_reported() {
    let mut store = FakeStore {
        fail_load: true,
        ..FakeStore::default()
    };
    let err = SyncRunner::default()
        .run(&FakeSource::new(favorites()), &mut store)
        .expect_err("load should fail");
    assert!(matches!(err, SyncError::Load(_)));
}

#[test]
fn overlapping_runs_are_refused() {
    let gate = SyncGate::new();
    let source = FakeSource::new(favorites());
    let mut store = FakeStore::default();
    let runner = SyncRunner::default();

    let permit = gate.try_begin().expect("claim gate");
    let err = runner
        .run_exclusive(&gate, &source, &mut store)
        .expect_err("gate is held");
    assert!(matches!(err, SyncError::Busy));
    drop(permit);

    let report = runner
        .run_exclusive(&gate, &source, &mut store)
        .expect("gate released");
    assert_eq!(report.outcome.inserted, 3);
    assert!(!gate.is_running());
}

// =========================================================================
// Logging
// =========================================================================

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn logs_carry_no_names_or_numbers() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut store = FakeStore::default();
        let runner = SyncRunner::default();
        runner
            .run(&FakeSource::new(favorites()), &mut store)
            .expect("run");
        runner
            .run(&FakeSource::new(favorites()), &mut store)
            .expect("run");
    });

    let logs = String::from_utf8(captured.0.lock().expect("log buffer").clone())
        .expect("utf-8 logs");
    assert!(logs.contains("sync complete"));
    for secret in ["Ada", "Grace", "Alan", "2345678901", "3456789012", "442012345678"] {
        assert!(!logs.contains(secret), "log output leaked {secret}");
    }
}
