pub mod media;
pub mod media_translations;
pub mod media_visualizations;
pub mod tv_show_episode_translations;
pub mod tv_show_episode_visualizations;
pub mod tv_show_episodes;
pub mod yt_channels;
pub mod yt_playlist_videos;
pub mod yt_playlists;
pub mod yt_video_visualizations;
pub mod yt_videos;
