use tracing::{info, warn};

use crate::directory::DirectoryApi;
use crate::normalize::{to_episodes, to_shows};
use crate::render::{render_episodes, render_error, render_shows, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(usize),
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Search trigger. The episodes region is hidden before the directory is
/// asked, so it stays hidden whether or not the search succeeds.
pub async fn search_and_display(api: &dyn DirectoryApi, page: &mut Page, term: &str) -> Outcome {
    page.term = Some(term.to_string());
    page.episodes.hide();

    match api.search_shows(term).await {
        Ok(hits) => {
            let shows = to_shows(hits);
            info!("Search '{}' matched {} shows", term, shows.len());
            render_shows(&mut page.shows, &shows, term);
            Outcome::Rendered(shows.len())
        }
        Err(e) => {
            warn!("Search '{}' failed: {}", term, e);
            render_error(
                &mut page.shows,
                "The show directory could not be searched right now. Please try again.",
            );
            Outcome::Failed(e.to_string())
        }
    }
}

/// Episode trigger for one show; replaces whatever the episodes region held.
pub async fn episodes_and_display(
    api: &dyn DirectoryApi,
    page: &mut Page,
    show_id: u64,
) -> Outcome {
    match api.list_episodes(show_id).await {
        Ok(raw) => {
            let episodes = to_episodes(raw);
            info!("Show {} has {} episodes", show_id, episodes.len());
            render_episodes(&mut page.episodes, &episodes);
            Outcome::Rendered(episodes.len())
        }
        Err(e) => {
            warn!("Episode list for show {} failed: {}", show_id, e);
            render_error(
                &mut page.episodes,
                "Episodes for this show could not be loaded right now.",
            );
            page.episodes.show();
            Outcome::Failed(e.to_string())
        }
    }
}
