//! Company command handlers: list, get, delete, export.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use bytesize::ByteSize;
use owo_colors::OwoColorize;
use tabled::Tabled;

use scrapedeck_core::service::CSV_FILE_NAME;
use scrapedeck_core::{Company, ListEngine, or_placeholder};

use crate::cli::{GlobalOpts, ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Company")]
    name: String,
    #[tabled(rename = "Website")]
    website: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Social")]
    social: String,
}

impl From<&Arc<Company>> for CompanyRow {
    fn from(c: &Arc<Company>) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.display_name().to_owned(),
            website: or_placeholder(c.website_url.as_deref()).to_owned(),
            phone: or_placeholder(c.first_phone()).to_owned(),
            email: or_placeholder(c.email.as_deref()).to_owned(),
            social: social_summary(c),
        }
    }
}

/// Compact social presence indicator, e.g. "fb tw li".
fn social_summary(company: &Company) -> String {
    let links = company.social_links();
    if links.is_empty() {
        return scrapedeck_core::PLACEHOLDER.into();
    }
    links
        .iter()
        .map(|(label, _)| match *label {
            "Facebook" => "fb",
            "Twitter" => "tw",
            "LinkedIn" => "li",
            "Instagram" => "ig",
            _ => "?",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── List ────────────────────────────────────────────────────────────

pub async fn list(args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::build_service(global)?;
    let snapshot = service.refresh().await?;

    let mut engine = ListEngine::with_page_size(args.page_size);
    engine.set_collection(snapshot.to_vec());
    if let Some(search) = args.search {
        engine.set_search(search);
    }
    engine.set_page(args.page);

    let rows = if args.all {
        engine.filtered()
    } else {
        engine.visible()
    };

    let out = output::render_list(
        &global.output,
        &rows,
        |c| CompanyRow::from(c),
        |c| c.id.to_string(),
    );
    output::print_output(&out, global.quiet);

    // Pagination footer only makes sense on the human-facing format.
    if matches!(global.output, OutputFormat::Table) && !args.all && !global.quiet {
        let (first, last, total) = engine.showing_range();
        eprintln!(
            "Showing {first}-{last} of {total} (page {}/{})",
            engine.page(),
            engine.total_pages()
        );
    }
    Ok(())
}

// ── Get ─────────────────────────────────────────────────────────────

pub async fn get(id: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::build_service(global)?;
    let company = service.company(id).await?;

    let out = output::render_single(
        &global.output,
        &company,
        detail_view,
        |c| c.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Multi-line detail view for a single company (table format).
pub fn detail_view(company: &Company) -> String {
    let mut out = String::new();
    let mut field = |label: &str, value: &str| {
        let _ = writeln!(out, "{label:<12} {value}");
    };

    field("Name", company.display_name());
    field("ID", company.id.as_str());
    field(
        "Website",
        &company
            .website_host()
            .unwrap_or_else(|| scrapedeck_core::PLACEHOLDER.into()),
    );
    field("Description", or_placeholder(company.description.as_deref()));
    field("Address", or_placeholder(company.address.as_deref()));
    field("Phone", or_placeholder(company.first_phone()));
    field("Email", or_placeholder(company.email.as_deref()));
    for (label, url) in company.social_links() {
        field(label, url);
    }
    field("Screenshot", or_placeholder(company.screenshot_url.as_deref()));
    field("Created", &company.created_date());
    out.trim_end().to_owned()
}

// ── Delete ──────────────────────────────────────────────────────────

pub async fn delete(ids: Vec<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let count = ids.len();
    if !util::confirm(
        &format!("Delete {count} company record(s)? This is destructive."),
        global.yes,
    )? {
        return Ok(());
    }

    let service = util::build_service(global)?;
    let snapshot = service.delete_many(&ids).await?;

    if !global.quiet {
        let msg = format!("Deleted {count} record(s), {} remaining", snapshot.len());
        if output::should_color(&global.color) {
            eprintln!("{}", msg.green());
        } else {
            eprintln!("{msg}");
        }
    }
    Ok(())
}

// ── Export ──────────────────────────────────────────────────────────

pub async fn export(out: Option<PathBuf>, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::build_service(global)?;
    let bytes = service.export_csv().await?;

    let path = out.unwrap_or_else(|| PathBuf::from(CSV_FILE_NAME));
    std::fs::write(&path, &bytes)?;

    if !global.quiet {
        eprintln!(
            "Exported {} to {}",
            ByteSize::b(bytes.len() as u64),
            path.display()
        );
    }
    Ok(())
}
