use serde::Serialize;

use crate::config::MISSING_IMAGE_URL;
use crate::directory::{RawEpisode, RawShow, ShowHit};

pub use crate::directory::Label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: u64,
    pub name: String,
    pub summary: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub season: Label,
    pub number: Label,
}

pub fn to_show(raw: RawShow) -> Show {
    let image = raw
        .image
        .and_then(|i| i.medium)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| MISSING_IMAGE_URL.to_string());
    Show {
        id: raw.id,
        name: raw.name,
        summary: raw.summary.unwrap_or_default(),
        image,
    }
}

pub fn to_shows(hits: Vec<ShowHit>) -> Vec<Show> {
    hits.into_iter().map(|hit| to_show(hit.show)).collect()
}

pub fn to_episode(raw: RawEpisode) -> Episode {
    Episode {
        id: raw.id,
        name: raw.name,
        season: raw.season,
        number: raw.number,
    }
}

pub fn to_episodes(raw: Vec<RawEpisode>) -> Vec<Episode> {
    raw.into_iter().map(to_episode).collect()
}
