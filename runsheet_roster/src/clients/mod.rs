use std::path::PathBuf;

use crate::Error;

/// 名簿の CSV を取ってくる
pub trait IClient {
    fn fetch(&mut self) -> Result<String, Error>;
}

// 決まったデータを返すクライアント
#[derive(Default)]
pub struct SampleClient;

impl IClient for SampleClient {
    // 常に成功する
    fn fetch(&mut self) -> Result<String, Error> {
        let data = include_str!("example.csv");
        Ok(data.to_string())
    }
}

pub struct FileClient {
    path: PathBuf,
}

impl FileClient {
    pub fn new<T>(path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        Self { path: path.into() }
    }
}

impl IClient for FileClient {
    fn fetch(&mut self) -> Result<String, Error> {
        log::debug!("reading roster from {}", self.path.display());
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{FileClient, IClient, SampleClient};

    #[test]
    fn sample() {
        let data = SampleClient.fetch().unwrap();
        assert!(data.starts_with("table,id,name,category"));
    }

    #[test]
    fn missing_file() {
        let mut client = FileClient::new("does/not/exist.csv");
        assert!(matches!(client.fetch(), Err(crate::Error::Io(_))));
    }
}
