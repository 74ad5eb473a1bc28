//! Known remote datasets: the Dropbox mirrors used by the coursework
//! unemployment/index analyses.

use crate::data::fetch::{fetch_cached, FetchError};
use std::path::{Path, PathBuf};

/// A remote dataset with its canonical cache filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSource {
    pub url: &'static str,
    pub filename: &'static str,
}

impl DatasetSource {
    /// Where this dataset lives under a cache directory.
    pub fn cached_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(self.filename)
    }

    /// Fetch into the cache directory if not already present.
    pub fn fetch(
        &self,
        client: &reqwest::blocking::Client,
        cache_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        fetch_cached(client, self.url, &self.cached_path(cache_dir))
    }
}

pub const NATIONAL_UNEMPLOYMENT: DatasetSource = DatasetSource {
    url: "https://www.dropbox.com/s/qw2l5hmu061l8x2/national_unemployment.csv?dl=1",
    filename: "national_unemployment.csv",
};

pub const PORTLAND_UNEMPLOYMENT: DatasetSource = DatasetSource {
    url: "https://www.dropbox.com/s/wvux3d7dcaae5t0/portland_unemployment_2007_2017.csv?dl=1",
    filename: "portland_unemployment_2007_2017.csv",
};

pub const HOUSE_PRICE_INDEX: DatasetSource = DatasetSource {
    url: "https://www.dropbox.com/s/4hu2jpjkhcnr35k/purchase_only_house_price_index.csv?dl=1",
    filename: "purchase_only_house_price_index.csv",
};

pub const SP500_INDEX: DatasetSource = DatasetSource {
    url: "https://www.dropbox.com/s/ojj5zp7feid6wwl/SP500_index.csv?dl=1",
    filename: "SP500_index.csv",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_path_uses_canonical_filename() {
        let path = SP500_INDEX.cached_path(Path::new("/tmp/cache"));
        assert_eq!(path, PathBuf::from("/tmp/cache/SP500_index.csv"));
    }
}
