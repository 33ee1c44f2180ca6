//! Per-entity detail levels.
//!
//! Every list/get endpoint takes a `view` query parameter drawn from one of
//! these closed enums. The view decides which related rows get loaded and
//! which response shape comes back; `basic` is always the default and never
//! nests anything.

use serde::{Deserialize, Serialize};

/// Detail levels for media entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaView {
    #[default]
    Basic,
    WithTranslations,
    WithVisualizations,
    Full,
    /// `Full` plus episodes. Only meaningful when the row is a TV show;
    /// for anything else the episode list is simply empty.
    FullWithTvShowEpisodes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaTranslationView {
    #[default]
    Basic,
    WithMedia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaVisualizationView {
    #[default]
    Basic,
    WithMedia,
}

/// Detail levels for TV show episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvShowEpisodeView {
    #[default]
    Basic,
    WithTvShow,
    WithTranslations,
    WithVisualizations,
    Full,
    FullWithTvShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvShowEpisodeTranslationView {
    #[default]
    Basic,
    WithEpisode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvShowEpisodeVisualizationView {
    #[default]
    Basic,
    WithEpisode,
}

/// Detail levels for YouTube channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YtChannelView {
    #[default]
    Basic,
    WithVideos,
    WithPlaylists,
    Full,
}

/// Detail levels for YouTube videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YtVideoView {
    #[default]
    Basic,
    WithChannel,
    WithVisualizations,
    WithPlaylists,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YtVideoVisualizationView {
    #[default]
    Basic,
    WithVideo,
}

/// Detail levels for YouTube playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YtPlaylistView {
    #[default]
    Basic,
    WithChannel,
    WithVideos,
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_deserialize_from_snake_case_query_values() {
        let v: MediaView = serde_json::from_str("\"full_with_tv_show_episodes\"").unwrap();
        assert_eq!(v, MediaView::FullWithTvShowEpisodes);
        let v: YtVideoView = serde_json::from_str("\"with_playlists\"").unwrap();
        assert_eq!(v, YtVideoView::WithPlaylists);
        assert!(serde_json::from_str::<MediaView>("\"everything\"").is_err());
    }

    #[test]
    fn default_view_is_basic() {
        assert_eq!(MediaView::default(), MediaView::Basic);
        assert_eq!(YtChannelView::default(), YtChannelView::Basic);
        assert_eq!(TvShowEpisodeView::default(), TvShowEpisodeView::Basic);
    }
}
