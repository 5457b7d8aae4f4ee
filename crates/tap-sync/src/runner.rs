//! Sync runner: fetch, reconcile, apply.

use serde::{Deserialize, Serialize};
use tap_model::{
    Contact, ContactId, ContactSource, ContactStore, ReconciliationAction, StoreError,
    SyncOutcome, UNSAVED_ID,
};
use tracing::{debug, info, info_span, warn};

use crate::error::SyncError;
use crate::gate::SyncGate;
use crate::reconcile::reconcile;

/// What to do when a store write fails mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WritePolicy {
    /// Stop at the first failure. Earlier writes stay applied.
    #[default]
    Abort,
    /// Record the failure and keep applying the remaining actions.
    ContinueOnError,
}

/// Options controlling a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    pub write_policy: WritePolicy,

    /// Drop fetched entries whose number has no digits before reconciling.
    /// Default: true.
    pub skip_unmatchable: bool,

    /// Compute actions without writing them.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            write_policy: WritePolicy::Abort,
            skip_unmatchable: true,
            dry_run: false,
        }
    }
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn with_skip_unmatchable(mut self, skip: bool) -> Self {
        self.skip_unmatchable = skip;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A write that failed under [`WritePolicy::ContinueOnError`].
#[derive(Debug)]
pub struct ApplyFailure {
    /// `"insert"` or `"update"`.
    pub action: &'static str,
    pub id: ContactId,
    pub name: String,
    pub error: StoreError,
}

/// Result of one sync run.
#[derive(Debug)]
pub struct SyncReport {
    /// Writes that succeeded. In a dry run, writes that would have been made.
    pub outcome: SyncOutcome,
    /// Entries returned by the source.
    pub fetched: usize,
    /// Entries dropped because their number had no digits.
    pub skipped: usize,
    /// Entries that needed no write.
    pub unchanged: usize,
    pub failures: Vec<ApplyFailure>,
    pub dry_run: bool,
    /// Every computed action, in fetch order.
    pub actions: Vec<ReconciliationAction>,
}

impl SyncReport {
    /// Entries that reached reconciliation.
    pub fn processed(&self) -> usize {
        self.fetched - self.skipped
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs sync passes with fixed options.
#[derive(Debug, Clone, Default)]
pub struct SyncRunner {
    options: SyncOptions,
}

impl SyncRunner {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run one pass, failing with [`SyncError::Busy`] if `gate` is held.
    pub fn run_exclusive<S, T>(
        &self,
        gate: &SyncGate,
        source: &S,
        store: &mut T,
    ) -> Result<SyncReport, SyncError>
    where
        S: ContactSource + ?Sized,
        T: ContactStore + ?Sized,
    {
        let Some(_permit) = gate.try_begin() else {
            warn!("sync requested while another run is active");
            return Err(SyncError::Busy);
        };
        self.run(source, store)
    }

    /// Fetch starred contacts, reconcile them with the store and apply the
    /// resulting writes.
    pub fn run<S, T>(&self, source: &S, store: &mut T) -> Result<SyncReport, SyncError>
    where
        S: ContactSource + ?Sized,
        T: ContactStore + ?Sized,
    {
        let span = info_span!("sync", dry_run = self.options.dry_run);
        let _guard = span.enter();

        let raw = source.fetch_starred()?;
        let fetched = raw.len();

        let mut fresh: Vec<Contact> = raw.iter().map(Contact::from_raw).collect();
        if self.options.skip_unmatchable {
            fresh.retain(|contact| !contact.normalized_key().is_empty());
        }
        let skipped = fetched - fresh.len();
        if skipped > 0 {
            warn!(skipped, "skipping contacts without a dialable number");
        }

        let existing = store.load_all().map_err(SyncError::Load)?;
        let plan = reconcile(&fresh, &existing);
        let unchanged = plan.actions.iter().filter(|a| a.is_noop()).count();

        if self.options.dry_run {
            info!(planned = %plan.outcome, "dry run, nothing written");
            return Ok(SyncReport {
                outcome: plan.outcome,
                fetched,
                skipped,
                unchanged,
                failures: Vec::new(),
                dry_run: true,
                actions: plan.actions,
            });
        }

        let mut outcome = SyncOutcome::default();
        let mut failures = Vec::new();

        for action in &plan.actions {
            let (result, id, name) = match action {
                ReconciliationAction::Insert(contact) => (
                    store.insert(contact).map(|id| {
                        debug!(id, "inserted contact");
                        outcome.inserted += 1;
                    }),
                    UNSAVED_ID,
                    &contact.name,
                ),
                ReconciliationAction::Update(update) => (
                    store.update(update).map(|()| {
                        debug!(id = update.id, "updated contact");
                        outcome.updated += 1;
                    }),
                    update.id,
                    &update.name,
                ),
                ReconciliationAction::NoOp => continue,
            };

            let Err(error) = result else {
                continue;
            };
            match self.options.write_policy {
                WritePolicy::Abort => {
                    warn!(action = action.kind(), id, "store write failed, aborting sync");
                    return Err(SyncError::Apply {
                        applied: outcome.inserted + outcome.updated,
                        action: action.kind(),
                        id,
                        source: error,
                    });
                }
                WritePolicy::ContinueOnError => {
                    warn!(action = action.kind(), id, error = %error, "store write failed, continuing");
                    failures.push(ApplyFailure {
                        action: action.kind(),
                        id,
                        name: name.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            fetched,
            inserted = outcome.inserted,
            updated = outcome.updated,
            failed = failures.len(),
            "sync complete"
        );
        Ok(SyncReport {
            outcome,
            fetched,
            skipped,
            unchanged,
            failures,
            dry_run: false,
            actions: plan.actions,
        })
    }
}
