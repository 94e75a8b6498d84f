use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use boq_cli::overrides::apply_overrides;
use boq_core::{ImportConfig, ImportContext, ImportSession};
use boq_ingest::write_template;
use boq_model::{FieldKey, QuoteItem, QuoteItemList};
use boq_transform::MergeMode;

use crate::cli::{FieldsArgs, ImportArgs, PreviewArgs, SessionArgs, TemplateArgs};
use crate::summary::{
    columns_table, detection_line, fields_table, mapping_table, preview_table, warnings_table,
};
use crate::types::ImportOutcome;

pub fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let file = &args.session.file;
    let span = info_span!("import", file = %file.display());
    let _guard = span.enter();

    let session = open_session(&args.session)?;
    // stdout may carry the JSON result, so human-readable output goes to stderr.
    eprintln!("{}", detection_line(&session));
    eprintln!("{}", mapping_table(&session));
    eprintln!("{}", preview_table(session.preview()));
    if let Some(table) = warnings_table(session.warnings()) {
        eprintln!("{table}");
    }

    let mut list = match &args.items {
        Some(path) => load_items(path)?,
        None => QuoteItemList::default(),
    };
    let existing = list.len();
    let mode = MergeMode::from(args.mode);
    if mode.requires_confirmation(existing) && !args.yes {
        bail!("replacing {existing} existing items requires confirmation; pass --yes");
    }

    session
        .confirm_into(&mut list, mode)
        .context("commit import")?;

    let issues = list.validate();
    for issue in &issues {
        warn!(%issue, "item list will not pass quote validation");
    }

    let mut output = None;
    if !args.dry_run {
        let json = serde_json::to_string_pretty(&list).context("serialize item list")?;
        match &args.output {
            Some(path) => {
                fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("write {}", path.display()))?;
                info!(path = %path.display(), items = list.len(), "wrote item list");
                output = Some(path.clone());
            }
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{json}").context("write item list to stdout")?;
            }
        }
    }

    Ok(ImportOutcome {
        file_name: session.file_name().to_string(),
        mode,
        existing,
        imported: session.preview().len(),
        warnings: session.warnings().len(),
        total_items: list.len(),
        totals: list.totals(),
        issues,
        output,
        dry_run: args.dry_run,
    })
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let span = info_span!("preview", file = %args.session.file.display());
    let _guard = span.enter();

    let session = open_session(&args.session)?;
    println!("{}", detection_line(&session));
    println!("{}", mapping_table(&session));
    println!("{}", columns_table(&session));
    println!("{}", preview_table(session.preview()));
    if let Some(table) = warnings_table(session.warnings()) {
        println!("{table}");
    }
    let missing = session.mapping().missing_mandatory();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().copied().map(FieldKey::as_str).collect();
        println!(
            "Map the missing fields before importing, e.g. --map {}=<COLUMN>",
            names.join(" --map ")
        );
    }
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    write_template(&args.output)
        .with_context(|| format!("write template {}", args.output.display()))?;
    println!("Template written to {}", args.output.display());
    Ok(())
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let ctx = load_context(args.config.as_deref())?;
    println!("{}", fields_table(ctx.dictionary()));
    Ok(())
}

fn open_session(args: &SessionArgs) -> Result<ImportSession> {
    let ctx = load_context(args.config.as_deref())?;
    let mut session = ImportSession::open_path(&ctx, &args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    apply_overrides(&mut session, &args.map, &args.unmap).context("apply column mapping")?;
    Ok(session)
}

fn load_context(config: Option<&Path>) -> Result<ImportContext> {
    match config {
        Some(path) => {
            let config = ImportConfig::load(path).context("load config")?;
            Ok(ImportContext::from_config(&config))
        }
        None => Ok(ImportContext::new()),
    }
}

fn load_items(path: &Path) -> Result<QuoteItemList> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read items {}", path.display()))?;
    let items: Vec<QuoteItem> = serde_json::from_str(&contents)
        .with_context(|| format!("parse items {}", path.display()))?;
    Ok(QuoteItemList::new(items))
}
