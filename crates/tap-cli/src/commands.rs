use anyhow::{Context, Result};
use tracing::{debug, info_span};

use tap_cli::config::resolve_store_path;
use tap_cli::logging::redact_value;
use tap_cli::summary::{classify_table, contacts_table, dial_table, normalize_table};
use tap_ingest::CsvContactSource;
use tap_model::{Contact, ContactStore};
use tap_persistence::{FromSnapshot, JsonContactStore, MemoryContactStore, load_store_or_default};
use tap_phone::{PhoneType, classify, dial_number};
use tap_sync::{SyncOptions, SyncReport, SyncRunner, WritePolicy};

use crate::cli::{ClassifyArgs, ListArgs, NumbersArgs, SyncArgs};

pub fn run_normalize(args: &NumbersArgs) {
    println!("{}", normalize_table(&args.numbers));
}

pub fn run_dial(args: &NumbersArgs) {
    let rows: Vec<_> = args
        .numbers
        .iter()
        .map(|raw| {
            let number = dial_number(raw);
            debug!(input = redact_value(raw), rule = %number.rule, "formatted number");
            (raw.clone(), number)
        })
        .collect();
    println!("{}", dial_table(&rows));
}

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let type_code = match args.phone_type.trim().parse::<i32>() {
        Ok(code) => code,
        Err(_) => args
            .phone_type
            .parse::<PhoneType>()
            .map(|t| t.code())
            .with_context(|| format!("unknown phone type '{}'", args.phone_type))?,
    };
    let label = classify(type_code, args.label.as_deref());
    println!("{}", classify_table(type_code, &label));
    Ok(())
}

fn sync_options(args: &SyncArgs) -> SyncOptions {
    let policy = if args.continue_on_error {
        WritePolicy::ContinueOnError
    } else {
        WritePolicy::Abort
    };
    SyncOptions::new()
        .with_write_policy(policy)
        .with_skip_unmatchable(!args.keep_unmatchable)
        .with_dry_run(args.dry_run)
}

pub fn run_sync(args: &SyncArgs) -> Result<SyncReport> {
    let store_path = resolve_store_path(args.store.as_deref());
    let span = info_span!("sync_command", store = %store_path.display());
    let _guard = span.enter();

    let source = CsvContactSource::new(&args.contacts);
    let runner = SyncRunner::new(sync_options(args));

    let report = if args.dry_run {
        // Preview against a copy so a missing store is never created.
        let file = load_store_or_default(&store_path)
            .with_context(|| format!("load contact store {}", store_path.display()))?;
        let contacts: Vec<Contact> = file
            .contacts
            .into_iter()
            .map(Contact::from_snapshot)
            .collect();
        let mut preview = MemoryContactStore::from_contacts(contacts);
        runner.run(&source, &mut preview)
    } else {
        let mut store = JsonContactStore::open(&store_path)
            .with_context(|| format!("open contact store {}", store_path.display()))?;
        runner.run(&source, &mut store)
    };

    report.with_context(|| format!("sync from {}", args.contacts.display()))
}

pub fn run_list(args: &ListArgs) -> Result<()> {
    let store_path = resolve_store_path(args.store.as_deref());
    let store = JsonContactStore::open(&store_path)
        .with_context(|| format!("open contact store {}", store_path.display()))?;
    let contacts = store.load_all()?;
    if contacts.is_empty() {
        println!("No favorites stored in {}", store_path.display());
        return Ok(());
    }
    println!("{}", contacts_table(&contacts, !args.no_messaging_app));
    Ok(())
}
