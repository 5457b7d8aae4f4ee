//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tap_model::Contact;
use tap_phone::{
    Clarity, DialNumber, LaunchPlan, PhoneLabel, chat_links, normalize, plan_launch,
};
use tap_sync::SyncReport;

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn clarity_cell(clarity: Clarity) -> Cell {
    match clarity {
        Clarity::Clear => Cell::new("clear").fg(Color::Green),
        Clarity::Unclear => Cell::new("unclear").fg(Color::Yellow).add_attribute(Attribute::Bold),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Input numbers and their match keys.
pub fn normalize_table(numbers: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Input"), header_cell("Key")]);
    apply_table_style(&mut table);
    for number in numbers {
        let key = normalize(number);
        let key_cell = if key.is_empty() {
            dim_cell("(none)")
        } else {
            Cell::new(key)
        };
        table.add_row(vec![Cell::new(number), key_cell]);
    }
    table
}

/// Dialable form, rule and first chat link per number.
pub fn dial_table(rows: &[(String, DialNumber)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Dial"),
        header_cell("Rule"),
        header_cell("Clarity"),
        header_cell("Chat link"),
    ]);
    apply_table_style(&mut table);
    for (input, number) in rows {
        let link = chat_links(input)
            .into_iter()
            .next()
            .map_or_else(|| dim_cell("-"), |link| Cell::new(link.uri));
        table.add_row(vec![
            Cell::new(input),
            Cell::new(&number.digits),
            Cell::new(number.rule),
            clarity_cell(number.clarity()),
            link,
        ]);
    }
    table
}

pub fn classify_table(type_code: i32, label: &PhoneLabel) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Label"),
        header_cell("Messaging"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(type_code),
        Cell::new(&label.label),
        flag_cell(label.is_messaging),
    ]);
    table
}

/// Counts from a sync run.
pub fn sync_table(report: &SyncReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Contacts"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let (inserted_label, updated_label) = if report.dry_run {
        ("Would insert", "Would update")
    } else {
        ("Inserted", "Updated")
    };
    table.add_row(vec![Cell::new("Fetched"), Cell::new(report.fetched)]);
    table.add_row(vec![Cell::new("Skipped"), count_cell(report.skipped, Color::Yellow)]);
    table.add_row(vec![
        Cell::new(inserted_label),
        count_cell(report.outcome.inserted, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new(updated_label),
        count_cell(report.outcome.updated, Color::Cyan),
    ]);
    table.add_row(vec![Cell::new("Unchanged"), dim_cell(report.unchanged)]);
    table.add_row(vec![
        Cell::new("Failed"),
        count_cell(report.failures.len(), Color::Red),
    ]);
    table
}

/// Writes that failed under continue-on-error.
pub fn failure_table(report: &SyncReport) -> Option<Table> {
    if report.failures.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Action"),
        header_cell("Contact"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(failure.action).fg(Color::Red),
            Cell::new(&failure.name),
            Cell::new(failure.error.user_message()),
        ]);
    }
    Some(table)
}

fn launch_cell(plan: &LaunchPlan) -> Cell {
    match plan {
        LaunchPlan::Chat { links, fallback_tel } => match links.first() {
            Some(link) => Cell::new(&link.uri).fg(Color::Green),
            None => Cell::new(fallback_tel),
        },
        LaunchPlan::Call { tel_uri } => Cell::new(tel_uri),
    }
}

/// Stored contacts with the action a tap would take.
pub fn contacts_table(contacts: &[Contact], messaging_installed: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Number"),
        header_cell("Label"),
        header_cell("Messaging"),
        header_cell("On tap"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for contact in contacts {
        let plan = plan_launch(
            contact.phone_number(),
            contact.is_messaging_contact(),
            messaging_installed,
        );
        table.add_row(vec![
            Cell::new(contact.id),
            Cell::new(&contact.name),
            Cell::new(contact.phone_number()),
            Cell::new(&contact.phone_label),
            flag_cell(contact.is_messaging_contact()),
            launch_cell(&plan),
        ]);
    }
    table
}
