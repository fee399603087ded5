mod rest_type;
mod spotify;

pub use rest_type::{
    AlbumType, ArtistType, ExternalUrlsType, ImageType, PagingType, SearchType, TokenType,
    TrackType,
};
pub use spotify::{Credentials, Spotify, ACCOUNTS_URL, API_URL};

use serde::{Deserialize, Serialize};

/// 検索候補として表示する曲
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    id: String,
    title: String,

    // 複数アーティストは ", " で連結
    artist: String,
    album: String,
    thumbnail: Option<String>,
    url: String,
}

impl Track {
    pub(crate) fn new(track_type: &TrackType) -> Self {
        Self {
            id: track_type.id.clone(),
            title: track_type.name.clone(),
            artist: track_type
                .artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: track_type.album.name.clone(),
            thumbnail: track_type
                .album
                .images
                .first()
                .map(|image| image.url.clone()),
            url: track_type.external_urls.spotify.clone(),
        }
    }

    pub fn from_parts<T, U>(id: T, title: U, artist: &str) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.to_string(),
            album: String::new(),
            thumbnail: None,
            url: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
