use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenType {
    pub access_token: String,
    pub token_type: String,

    // 秒
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchType {
    // type=track 以外では返らない
    #[serde(default)]
    pub tracks: Option<PagingType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PagingType {
    pub items: Vec<TrackType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackType {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistType>,
    pub album: AlbumType,
    pub external_urls: ExternalUrlsType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtistType {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlbumType {
    pub name: String,

    #[serde(default)]
    pub images: Vec<ImageType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageType {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExternalUrlsType {
    pub spotify: String,
}

#[cfg(test)]
mod tests {
    use crate::http::{SearchType, TokenType};

    #[test]
    fn deserialize() {
        let data = include_str!("../../res/search.json");
        let search = serde_json::from_str::<SearchType>(data).unwrap();
        let tracks = search.tracks.unwrap().items;
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "4u7EnebtmKWzUH433cf5Qv");
        assert_eq!(tracks[0].name, "Amazing Grace (My Chains Are Gone)");
        assert_eq!(tracks[0].artists.len(), 2);
        assert_eq!(tracks[1].album.images.len(), 0);
    }

    #[test]
    fn deserialize_without_tracks() {
        let search = serde_json::from_str::<SearchType>("{}").unwrap();
        assert!(search.tracks.is_none());
    }

    #[test]
    fn deserialize_token() {
        let data = r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#;
        let token = serde_json::from_str::<TokenType>(data).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3600);
    }
}
