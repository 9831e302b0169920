//! Scrape command handler: submit a URL, show the result, optionally save.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::{GlobalOpts, OutputFormat, ScrapeArgs};
use crate::error::CliError;
use crate::output;

use super::{companies, util};

pub async fn handle(args: ScrapeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::build_service(global)?;

    // Spinner only on the human-facing format; structured outputs stay clean.
    let spinner = if matches!(global.output, OutputFormat::Table) && !global.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Scraping {}", args.url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = service.scrape(&args.url).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let company = result?;

    let out = output::render_single(
        &global.output,
        &company,
        companies::detail_view,
        |c| c.id.to_string(),
    );
    output::print_output(&out, global.quiet);

    if args.save {
        service.save(&company).await?;
        if !global.quiet {
            let msg = "Saved";
            if output::should_color(&global.color) {
                eprintln!("{}", msg.green());
            } else {
                eprintln!("{msg}");
            }
        }
    }
    Ok(())
}
