use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use url::Url;

use super::{SearchType, TokenType, Track};
use crate::search::ICatalogSearch;
use crate::{Error, Result};

pub const ACCOUNTS_URL: &str = "https://accounts.spotify.com/";
pub const API_URL: &str = "https://api.spotify.com/";

// 期限ぎりぎりのトークンは使わない
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new<T, U>(client_id: T, client_secret: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

struct AccessToken {
    value: String,

    // expires_in が返らなければ期限なし
    expires_at: Option<Instant>,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() + EXPIRY_MARGIN < expires_at,
            None => true,
        }
    }
}

/// 楽曲カタログの検索クライアント。
/// トークンはインスタンスが持ち、必要になった時点で取得して使い回す
pub struct Spotify {
    client: reqwest::Client,
    accounts_url: Url,
    api_url: Url,
    credentials: Credentials,
    token: Mutex<Option<AccessToken>>,

    // トークンの取得は同時にひとつだけ
    refresh: tokio::sync::Mutex<()>,
}

impl Spotify {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self::with_base_urls(
            credentials,
            Url::parse(ACCOUNTS_URL)?,
            Url::parse(API_URL)?,
        ))
    }

    /// 接続先を差し替えて生成します。URL は `/` で終わっている必要がある
    pub fn with_base_urls(credentials: Credentials, accounts_url: Url, api_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            accounts_url,
            api_url,
            credentials,
            token: Mutex::new(None),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.cached_token().is_some()
    }

    /// 有効なトークンがなければ取得します
    pub async fn ensure_authenticated(&self) -> Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        // 待っている間に別の呼び出しが取得していればそれを使う
        let _refresh = self.refresh.lock().await;
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let token_type = self.request_token().await?;
        let expires_at = (token_type.expires_in > 0)
            .then(|| Instant::now() + Duration::from_secs(token_type.expires_in));
        log::debug!("catalog token acquired (expires_in={}s)", token_type.expires_in);

        let value = token_type.access_token;
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(AccessToken {
            value: value.clone(),
            expires_at,
        });
        Ok(value)
    }

    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let token = self.ensure_authenticated().await?;

        let mut search_url = self.api_url.join("v1/search")?;
        search_url
            .query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "track")
            .append_pair("limit", &limit.to_string());

        let response = self
            .client
            .get(search_url)
            .bearer_auth(token)
            .send()
            .await?;

        // 失効していたら次回取り直す
        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate();
            return Err(Error::Authentication(
                "catalog rejected the access token".to_string(),
            ));
        }

        let search_type = response.error_for_status()?.json::<SearchType>().await?;
        let tracks = search_type
            .tracks
            .map(|paging| paging.items.iter().map(Track::new).collect())
            .unwrap_or_default();
        Ok(tracks)
    }

    pub fn invalidate(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached_token(&self) -> Option<String> {
        let token = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        token
            .as_ref()
            .filter(|token| token.is_fresh())
            .map(|token| token.value.clone())
    }

    async fn request_token(&self) -> Result<TokenType> {
        let token_url = self.accounts_url.join("api/token")?;
        let response = self
            .client
            .post(token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.json::<TokenType>().await?)
    }
}

impl ICatalogSearch for Spotify {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        self.search_tracks(query, limit).await
    }
}
