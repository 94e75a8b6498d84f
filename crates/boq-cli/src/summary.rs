use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use boq_core::ImportSession;
use boq_map::{FieldMappingStatus, HeaderSynonymDictionary, column_letter};
use boq_model::{ColumnMap, FieldKey, ParseWarning, PreviewItem};

use crate::types::ImportOutcome;

/// One-line description of where the header was found.
pub fn detection_line(session: &ImportSession) -> String {
    let detection = session.detection();
    if detection.is_fallback() {
        format!(
            "{}: no header row recognized, assuming columns {}",
            session.file_name(),
            positional_hint()
        )
    } else {
        format!(
            "{}: header on row {} ({} fields detected)",
            session.file_name(),
            detection.header_row + 1,
            detection.auto_detected.len()
        )
    }
}

pub fn mapping_table(session: &ImportSession) -> Table {
    let mapping = session.mapping();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Column"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for field in FieldKey::ALL {
        let column = mapping
            .column_map()
            .get(field)
            .map_or_else(|| dim_cell("-"), |index| column_cell(session, index));
        let field_cell = if field.is_mandatory() {
            Cell::new(format!("{field} *")).add_attribute(Attribute::Bold)
        } else {
            Cell::new(field)
        };
        table.add_row(vec![
            field_cell,
            Cell::new(field.label()),
            column,
            status_cell(mapping.field_status(field), field.is_mandatory()),
        ]);
    }
    table
}

/// Sheet columns and the fields each one feeds.
pub fn columns_table(session: &ImportSession) -> Table {
    let mapping = session.mapping();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Feeds")]);
    apply_table_style(&mut table);
    for option in mapping.columns() {
        let fields = mapping.column_map().fields_for_column(option.index);
        let feeds = if fields.is_empty() {
            dim_cell("-")
        } else {
            let names: Vec<&str> = fields.iter().copied().map(FieldKey::as_str).collect();
            Cell::new(names.join(", "))
        };
        table.add_row(vec![Cell::new(option), feeds]);
    }
    table
}

pub fn preview_table(items: &[PreviewItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell(FieldKey::Category.label()),
        header_cell(FieldKey::Name.label()),
        header_cell(FieldKey::Specification.label()),
        header_cell(FieldKey::Quantity.label()),
        header_cell(FieldKey::Unit.label()),
        header_cell(FieldKey::UnitPrice.label()),
        header_cell(FieldKey::CostPrice.label()),
        header_cell(FieldKey::Amount.label()),
    ]);
    apply_wide_table_style(&mut table);
    for index in [0, 4, 6, 7, 8] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for item in items {
        table.add_row(vec![
            dim_cell(item.seq + 1),
            Cell::new(&item.category),
            Cell::new(&item.name),
            Cell::new(&item.specification),
            Cell::new(&item.quantity),
            Cell::new(item.unit),
            Cell::new(&item.unit_price),
            Cell::new(&item.cost_price),
            Cell::new(format_yen(item.amount)),
        ]);
    }
    table
}

/// `None` when there is nothing to report.
pub fn warnings_table(warnings: &[ParseWarning]) -> Option<Table> {
    if warnings.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Imported as"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for warning in warnings {
        table.add_row(vec![
            Cell::new(warning.row),
            Cell::new(warning.field.label()),
            Cell::new(&warning.value).fg(Color::Yellow),
            dim_cell(0),
        ]);
    }
    Some(table)
}

/// Prints the import result to stderr; stdout may hold the JSON list.
pub fn print_outcome(outcome: &ImportOutcome) {
    eprintln!("{}", outcome_table(outcome));
    for issue in &outcome.issues {
        eprintln!("- {issue}");
    }
    match (&outcome.output, outcome.dry_run) {
        (_, true) => eprintln!("Dry run: {} not committed", outcome.file_name),
        (Some(path), false) => eprintln!("Items written to {}", path.display()),
        (None, false) => {}
    }
}

fn outcome_table(outcome: &ImportOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Import"), header_cell("")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, Cell); 8] = [
        ("Mode", Cell::new(outcome.mode)),
        ("Existing items", Cell::new(outcome.existing)),
        ("Imported items", Cell::new(outcome.imported)),
        ("Warnings", count_cell(outcome.warnings, Color::Yellow)),
        ("Total items", Cell::new(outcome.total_items)),
        ("Subtotal", Cell::new(format_yen(outcome.totals.subtotal))),
        ("Tax", Cell::new(format_yen(outcome.totals.tax))),
        (
            "Total",
            Cell::new(format_yen(outcome.totals.total)).add_attribute(Attribute::Bold),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value]);
    }
    table
}

pub fn fields_table(dictionary: &HeaderSynonymDictionary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Template column"),
        header_cell("Header labels"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for (index, field) in FieldKey::ALL.into_iter().enumerate() {
        let required = if field.is_mandatory() {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("no")
        };
        table.add_row(vec![
            Cell::new(field),
            Cell::new(field.label()),
            required,
            Cell::new(column_letter(index)),
            Cell::new(dictionary.synonyms_for(field).join(", ")),
        ]);
    }
    table
}

/// `50000` -> `¥50,000`.
pub fn format_yen(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("¥{grouped}")
}

fn positional_hint() -> String {
    ColumnMap::positional_fallback()
        .iter()
        .map(|(field, column)| format!("{}={field}", column_letter(column)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn column_cell(session: &ImportSession, index: usize) -> Cell {
    match session.mapping().column(index) {
        Some(option) => Cell::new(option),
        // Positional columns may lie past the sheet's widest row.
        None => Cell::new(format!("{} (empty)", column_letter(index))).fg(Color::DarkGrey),
    }
}

fn status_cell(status: FieldMappingStatus, mandatory: bool) -> Cell {
    match status {
        FieldMappingStatus::Detected => Cell::new("detected").fg(Color::Green),
        FieldMappingStatus::Assigned => Cell::new("assigned").fg(Color::Cyan),
        FieldMappingStatus::Unmapped if mandatory => Cell::new("missing")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        FieldMappingStatus::Unmapped => dim_cell("unmapped"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
