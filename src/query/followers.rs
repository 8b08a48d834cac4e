use std::collections::HashMap;

use crate::data::model::Dataset;
use crate::error::{ensure_at_least, QueryError};

/// A playlist name with the largest follower count seen under that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistFollowers {
    pub playlist_name: String,
    pub max_followers: u64,
}

/// Top `n` playlist names by their maximum `num_followers`.
///
/// Several playlists may share a name; each name appears once. Equal
/// follower counts are ordered by name. Fewer than `n` names returns them all.
pub fn top_playlists_by_followers(
    dataset: &Dataset,
    n: usize,
) -> Result<Vec<PlaylistFollowers>, QueryError> {
    ensure_at_least("n", n, 1)?;

    let mut max_by_name: HashMap<&str, u64> = HashMap::new();
    for p in &dataset.playlists {
        let entry = max_by_name.entry(p.playlist_name.as_str()).or_insert(0);
        *entry = (*entry).max(p.num_followers);
    }

    let mut ranked: Vec<PlaylistFollowers> = max_by_name
        .into_iter()
        .map(|(name, max_followers)| PlaylistFollowers {
            playlist_name: name.to_string(),
            max_followers,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.max_followers
            .cmp(&a.max_followers)
            .then_with(|| a.playlist_name.cmp(&b.playlist_name))
    });
    ranked.truncate(n);

    log::debug!("top_playlists_by_followers(n={n}) -> {} rows", ranked.len());
    Ok(ranked)
}
