//! Screen components.

pub mod companies;
pub mod scrape;

use crate::component::Component;
use crate::screen::ScreenId;

/// Construct every screen, keyed by its id.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Scrape, Box::new(scrape::ScrapeScreen::new())),
        (
            ScreenId::Companies,
            Box::new(companies::CompaniesScreen::new()),
        ),
    ]
}
