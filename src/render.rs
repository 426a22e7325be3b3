use crate::normalize::{Episode, Show};
use crate::text::{escape_html, summary_to_text};

pub const SHOWS_REGION_ID: &str = "showsList";
pub const EPISODES_REGION_ID: &str = "episodesArea";

// Swaps the episodes region in place from the trigger's fragment URL, so a
// click asks the directory for episodes only. The href stays as the no-script
// fallback and is also followed when the fetch itself fails.
const EPISODES_SCRIPT: &str = r#"<script>
document.addEventListener("click", async (evt) => {
  const trigger = evt.target.closest(".Show-getEpisodes");
  if (!trigger || !trigger.dataset.episodes) return;
  evt.preventDefault();
  try {
    const res = await fetch(trigger.dataset.episodes);
    const html = await res.text();
    document.getElementById("episodesArea").outerHTML = html;
  } catch (err) {
    window.location.assign(trigger.href);
  }
});
</script>"#;

/// A named area of the page whose content is replaced wholesale on each render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: &'static str,
    element: &'static str,
    class: &'static str,
    html: String,
    visible: bool,
}

impl Region {
    pub fn new(id: &'static str, element: &'static str, class: &'static str) -> Self {
        Self {
            id,
            element,
            class,
            html: String::new(),
            visible: true,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn inner_html(&self) -> &str {
        &self.html
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    pub fn append(&mut self, fragment: &str) {
        self.html.push_str(fragment);
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replaces the content with a single notice line.
    fn notice(&mut self, class: &str, message: &str) {
        let tag = if self.element == "ul" { "li" } else { "p" };
        self.clear();
        self.append(&format!(
            r#"<{tag} class="notice {class}">{}</{tag}>"#,
            escape_html(message)
        ));
    }

    pub fn to_html(&self) -> String {
        let hidden = if self.visible { "" } else { " hidden" };
        format!(
            r#"<{el} id="{id}" class="{class}"{hidden}>{html}</{el}>"#,
            el = self.element,
            id = self.id,
            class = self.class,
            html = self.html,
        )
    }
}

/// The two display regions plus the term echoed back into the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub term: Option<String>,
    pub shows: Region,
    pub episodes: Region,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        let mut episodes = Region::new(EPISODES_REGION_ID, "ul", "episodes");
        episodes.hide();
        Self {
            term: None,
            shows: Region::new(SHOWS_REGION_ID, "div", "row"),
            episodes,
        }
    }

    pub fn to_document(&self) -> String {
        let term = escape_html(self.term.as_deref().unwrap_or_default());
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Show Finder</title>
<style>
body {{ font-family: sans-serif; margin: 2rem auto; max-width: 60rem; }}
.Show {{ display: flex; gap: 1rem; margin-bottom: 1.5rem; }}
.Show img {{ width: 25%; object-fit: cover; }}
.notice-error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>Show Finder</h1>
<form id="searchForm" action="/" method="get">
<input id="searchForm-term" name="term" type="search" placeholder="Show title" value="{term}">
<button type="submit">Search</button>
</form>
{shows}
{episodes}
{script}
</body>
</html>
"#,
            shows = self.shows.to_html(),
            episodes = self.episodes.to_html(),
            script = EPISODES_SCRIPT,
        )
    }
}

/// Episodes region fragment for `show_id`; the only directory call is the episode list.
pub fn episodes_fragment_href(show_id: u64) -> String {
    format!("/fragments/shows/{}/episodes", show_id)
}

/// Link that re-renders the current search with the episode list for `show_id`.
pub fn episodes_href(term: &str, show_id: u64) -> String {
    format!(
        "/?term={}&show={}#{}",
        urlencoding::encode(term),
        show_id,
        EPISODES_REGION_ID
    )
}

pub fn render_shows(region: &mut Region, shows: &[Show], term: &str) {
    region.clear();
    if shows.is_empty() {
        region.notice("notice-empty", "No shows found.");
        return;
    }
    for show in shows {
        region.append(&show_card(show, term));
    }
}

fn show_card(show: &Show, term: &str) -> String {
    let name = escape_html(&show.name);
    format!(
        r#"<div data-show-id="{id}" class="Show col-md-12 col-lg-6 mb-4">
<img src="{image}" alt="{name}" class="w-25 me-3">
<div class="media-body">
<h5 class="text-primary">{name}</h5>
<div><small>{summary}</small></div>
<a class="btn btn-outline-light btn-sm Show-getEpisodes" href="{href}" data-episodes="{fragment}">Episodes</a>
</div>
</div>
"#,
        id = show.id,
        image = escape_html(&show.image),
        summary = escape_html(&summary_to_text(&show.summary)),
        href = escape_html(&episodes_href(term, show.id)),
        fragment = episodes_fragment_href(show.id),
    )
}

pub fn episode_line(episode: &Episode) -> String {
    format!(
        "{} (season {}, number {})",
        episode.name, episode.season, episode.number
    )
}

pub fn render_episodes(region: &mut Region, episodes: &[Episode]) {
    region.clear();
    for episode in episodes {
        region.append(&format!("<li>{}</li>\n", escape_html(&episode_line(episode))));
    }
    region.show();
}

pub fn render_error(region: &mut Region, message: &str) {
    region.notice("notice-error", message);
}
