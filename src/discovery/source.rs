use crate::core::{SwapError, SwapResult};
use crate::discovery::subgraph::{PairRecord, PairsData};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Anything that can produce raw pair records for a snapshot.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_pairs(&self) -> SwapResult<Vec<PairRecord>>;

    /// Identifies the source in the snapshot cache.
    fn cache_key(&self) -> String;
}

/// Accepted on-disk layouts: a saved GraphQL response, its `data` object,
/// or a bare list of pairs.
#[derive(Deserialize)]
#[serde(untagged)]
enum PairsFile {
    Response { data: PairsData },
    Data(PairsData),
    List(Vec<PairRecord>),
}

impl PairsFile {
    fn into_pairs(self) -> Vec<PairRecord> {
        match self {
            PairsFile::Response { data } => data.pairs,
            PairsFile::Data(data) => data.pairs,
            PairsFile::List(pairs) => pairs,
        }
    }
}

/// Pairs read from a JSON file, for offline quoting.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(contents: &str) -> SwapResult<Vec<PairRecord>> {
        let file: PairsFile = serde_json::from_str(contents).map_err(|e| {
            SwapError::SnapshotError(format!("unrecognized pairs file: {}", e))
        })?;
        Ok(file.into_pairs())
    }
}

#[async_trait::async_trait]
impl SnapshotSource for FileSource {
    async fn fetch_pairs(&self) -> SwapResult<Vec<PairRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SwapError::SnapshotError(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let pairs = Self::parse(&contents)?;
        info!("Loaded {} pairs from {}", pairs.len(), self.path.display());
        Ok(pairs)
    }

    fn cache_key(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: &str = r#"{
        "id": "0x01",
        "reserve0": "10",
        "reserve1": "20",
        "token0": {
            "id": "0x760afe86e5de5fa0ee542fc7b7b713e1c5425701",
            "symbol": "WMON",
            "name": "Wrapped Monad",
            "decimals": "18"
        },
        "token1": {
            "id": "0xf817257fed379853cde0fa4f97ab987181b1e5ea",
            "symbol": "USDC",
            "name": "USD Coin",
            "decimals": "6"
        }
    }"#;

    #[test]
    fn test_parse_layouts() {
        let wrapped = format!(r#"{{"data": {{"pairs": [{PAIR}]}}}}"#);
        let data = format!(r#"{{"pairs": [{PAIR}, {PAIR}]}}"#);
        let list = format!("[{PAIR}]");

        assert_eq!(FileSource::parse(&wrapped).unwrap().len(), 1);
        assert_eq!(FileSource::parse(&data).unwrap().len(), 2);
        assert_eq!(FileSource::parse(&list).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            FileSource::parse(r#"{"pools": []}"#),
            Err(SwapError::SnapshotError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileSource::new("/nonexistent/pairs.json");
        assert!(source.fetch_pairs().await.is_err());
        assert_eq!(source.cache_key(), "file:/nonexistent/pairs.json");
    }
}
