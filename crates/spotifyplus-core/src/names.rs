//! Well-known names shared between intents, response documents and the host

/// Integration domain; also the platform name of SpotifyPlus players
pub const DOMAIN: &str = "spotifyplus";

/// Platform that SpotifyPlus media player entities register under
pub const PLATFORM_SPOTIFYPLUS: &str = DOMAIN;

pub const DOMAIN_MEDIA_PLAYER: &str = "media_player";

/// Player state values
pub mod states {
    pub const IDLE: &str = "idle";
    pub const OFF: &str = "off";
    pub const ON: &str = "on";
    pub const PAUSED: &str = "paused";
    pub const PLAYING: &str = "playing";
    pub const UNKNOWN: &str = "unknown";
}

/// Slot names understood by the intent handlers and response templates
pub mod slot {
    pub const ALBUM_NAME: &str = "album_name";
    pub const ALBUM_TITLE: &str = "album_title";
    pub const ALBUM_URL: &str = "album_url";
    pub const AREA: &str = "area";
    pub const ARTIST_BIO: &str = "artist_bio";
    pub const ARTIST_NAME: &str = "artist_name";
    pub const ARTIST_TITLE: &str = "artist_title";
    pub const ARTIST_URL: &str = "artist_url";
    pub const AUDIOBOOK_NAME: &str = "audiobook_name";
    pub const AUDIOBOOK_TITLE: &str = "audiobook_title";
    pub const AUDIOBOOK_URL: &str = "audiobook_url";
    pub const AUTHOR_TITLE: &str = "author_title";
    pub const CHAPTER_TITLE: &str = "chapter_title";
    pub const DELAY: &str = "delay";
    pub const DESCRIPTION: &str = "description";
    pub const DEVICE_NAME: &str = "device_name";
    pub const EPISODE_NAME: &str = "episode_name";
    pub const EPISODE_TITLE: &str = "episode_title";
    pub const EPISODE_URL: &str = "episode_url";
    pub const ERROR_FEATURES: &str = "error_features";
    pub const ERROR_INFO: &str = "error_info";
    pub const ERROR_STATES: &str = "error_states";
    pub const FLOOR: &str = "floor";
    pub const IMAGE_PATH: &str = "image_path";
    pub const IS_COLLABORATIVE: &str = "is_collaborative";
    pub const IS_PUBLIC: &str = "is_public";
    pub const LATEST_EPISODE: &str = "latest_episode";
    pub const LIMIT_TOTAL: &str = "limit_total";
    pub const NAME: &str = "name";
    pub const PLAYER_REPEAT_MODE: &str = "player_repeat_mode";
    pub const PLAYER_SHUFFLE_MODE: &str = "player_shuffle_mode";
    pub const PLAYER_VOLUME_LEVEL: &str = "player_volume_level";
    pub const PLAYER_VOLUME_STEP_PCT: &str = "player_volume_step_pct";
    pub const PLAYLIST_NAME: &str = "playlist_name";
    pub const PLAYLIST_TITLE: &str = "playlist_title";
    pub const PLAYLIST_URL: &str = "playlist_url";
    pub const PODCAST_NAME: &str = "podcast_name";
    pub const PODCAST_TITLE: &str = "podcast_title";
    pub const PODCAST_URL: &str = "podcast_url";
    pub const PREFERRED_AREA_ID: &str = "preferred_area_id";
    pub const PREFERRED_FLOOR_ID: &str = "preferred_floor_id";
    pub const SEARCH_CRITERIA: &str = "search_criteria";
    pub const TARGET_PLAYER: &str = "target_player";
    pub const TRACK_NAME: &str = "track_name";
    pub const TRACK_TITLE: &str = "track_title";
    pub const TRACK_URL: &str = "track_url";
}

/// Response keys looked up in the response documents
pub mod response {
    pub const OK: &str = "default";
    pub const ERROR_FAILED_TO_HANDLE: &str = "error_failed_to_handle";
    pub const ERROR_UNHANDLED: &str = "error_unhandled";
    pub const GET_INFO_ARTIST_BIO: &str = "get_info_artist_bio";
    pub const NOWPLAYING_INFO_AUDIOBOOK: &str = "nowplaying_info_audiobook";
    pub const NOWPLAYING_INFO_PODCAST: &str = "nowplaying_info_podcast";
    pub const NOWPLAYING_INFO_TRACK: &str = "nowplaying_info_track";
    pub const NOWPLAYING_NO_MEDIA_ALBUM: &str = "nowplaying_no_media_album";
    pub const NOWPLAYING_NO_MEDIA_ARTIST: &str = "nowplaying_no_media_artist";
    pub const NOWPLAYING_NO_MEDIA_AUDIOBOOK: &str = "nowplaying_no_media_audiobook";
    pub const NOWPLAYING_NO_MEDIA_PLAYLIST: &str = "nowplaying_no_media_playlist";
    pub const NOWPLAYING_NO_MEDIA_PODCAST: &str = "nowplaying_no_media_podcast";
    pub const NOWPLAYING_NO_MEDIA_TRACK: &str = "nowplaying_no_media_track";
    pub const PLAYER_FEATURES_NOT_SUPPORTED: &str = "player_features_not_supported";
    pub const PLAYER_NOT_EXPOSED_TO_VOICE: &str = "player_not_exposed_to_voice";
    pub const PLAYER_NOT_MATCHED: &str = "player_not_matched";
    pub const PLAYER_NOT_MATCHED_AREA: &str = "player_not_matched_area";
    pub const PLAYER_NOT_PLAYING_MEDIA: &str = "player_not_playing_media";
    pub const PLAYER_NOT_SPOTIFYPLUS: &str = "player_not_spotifyplus";
    pub const PLAYLIST_CREATED: &str = "playlist_created";
    pub const PLAY_ALBUM: &str = "play_album";
    pub const PLAY_ALBUM_WITH_ARTIST: &str = "play_album_with_artist";
    pub const PLAY_AUDIOBOOK: &str = "play_audiobook";
    pub const PLAY_AUDIOBOOK_WITH_AUTHOR: &str = "play_audiobook_with_author";
    pub const PLAY_FAVORITE_TRACKS: &str = "play_favorite_tracks";
    pub const PLAY_FAVORITE_TRACKS_FOR_ARTIST: &str = "play_favorite_tracks_for_artist";
    pub const PLAY_PLAYLIST: &str = "play_playlist";
    pub const PLAY_PODCAST: &str = "play_podcast";
    pub const PLAY_PODCAST_EPISODE: &str = "play_podcast_episode";
    pub const PLAY_TRACK: &str = "play_track";
    pub const PLAY_TRACK_WITH_ARTIST: &str = "play_track_with_artist";
    pub const SPOTIFY_NO_ARTIST_INFO: &str = "spotify_no_artist_info";
    pub const SPOTIFY_PREMIUM_REQUIRED: &str = "spotify_premium_required";
    pub const SPOTIFY_SEARCH_NO_ITEMS_ALBUM: &str = "spotify_search_no_items_album";
    pub const SPOTIFY_SEARCH_NO_ITEMS_ARTIST: &str = "spotify_search_no_items_artist";
    pub const SPOTIFY_SEARCH_NO_ITEMS_AUDIOBOOK: &str = "spotify_search_no_items_audiobook";
    pub const SPOTIFY_SEARCH_NO_ITEMS_PLAYLIST: &str = "spotify_search_no_items_playlist";
    pub const SPOTIFY_SEARCH_NO_ITEMS_PODCAST: &str = "spotify_search_no_items_podcast";
    pub const SPOTIFY_SEARCH_NO_ITEMS_PODCAST_EPISODE: &str = "spotify_search_no_items_podcast_episode";
    pub const SPOTIFY_SEARCH_NO_ITEMS_TRACK: &str = "spotify_search_no_items_track";
}

/// Player state attributes read by the intent handlers
pub mod attr {
    pub const FRIENDLY_NAME: &str = "friendly_name";
    pub const MEDIA_ALBUM_NAME: &str = "media_album_name";
    pub const MEDIA_ARTIST: &str = "media_artist";
    pub const MEDIA_CONTENT_ID: &str = "media_content_id";
    pub const MEDIA_TITLE: &str = "media_title";
    pub const SUPPORTED_FEATURES: &str = "supported_features";
    pub const SP_ARTIST_URI: &str = "sp_artist_uri";
    pub const SP_CONTEXT_URI: &str = "sp_context_uri";
    pub const SP_DEVICE_ID: &str = "sp_device_id";
    pub const SP_DEVICE_NAME: &str = "sp_device_name";
    pub const SP_ITEM_TYPE: &str = "sp_item_type";
    pub const SP_PLAYLIST_NAME: &str = "sp_playlist_name";
    pub const SP_PLAYLIST_URI: &str = "sp_playlist_uri";
    pub const SP_TRACK_URI_ORIGIN: &str = "sp_track_uri_origin";
    pub const SP_USER_PRODUCT: &str = "sp_user_product";
}

/// Integration services invoked by intent handlers
pub mod service {
    pub const FOLLOW_ARTISTS: &str = "follow_artists";
    pub const FOLLOW_PLAYLIST: &str = "follow_playlist";
    pub const GET_ARTIST_INFO: &str = "get_artist_info";
    pub const GET_EPISODE: &str = "get_episode";
    pub const GET_SHOW_EPISODES: &str = "get_show_episodes";
    pub const GET_TRACK: &str = "get_track";
    pub const PLAYER_MEDIA_PAUSE: &str = "player_media_pause";
    pub const PLAYER_MEDIA_PLAY_CONTEXT: &str = "player_media_play_context";
    pub const PLAYER_MEDIA_PLAY_TRACK_FAVORITES: &str = "player_media_play_track_favorites";
    pub const PLAYER_MEDIA_PLAY_TRACKS: &str = "player_media_play_tracks";
    pub const PLAYER_MEDIA_RESUME: &str = "player_media_resume";
    pub const PLAYER_MEDIA_SEEK: &str = "player_media_seek";
    pub const PLAYER_MEDIA_SKIP_NEXT: &str = "player_media_skip_next";
    pub const PLAYER_MEDIA_SKIP_PREVIOUS: &str = "player_media_skip_previous";
    pub const PLAYER_SET_REPEAT_MODE: &str = "player_set_repeat_mode";
    pub const PLAYER_SET_SHUFFLE_MODE: &str = "player_set_shuffle_mode";
    pub const PLAYER_SET_VOLUME_LEVEL: &str = "player_set_volume_level";
    pub const PLAYER_TRANSFER_PLAYBACK: &str = "player_transfer_playback";
    pub const PLAYLIST_CREATE: &str = "playlist_create";
    pub const REMOVE_ALBUM_FAVORITES: &str = "remove_album_favorites";
    pub const REMOVE_EPISODE_FAVORITES: &str = "remove_episode_favorites";
    pub const REMOVE_TRACK_FAVORITES: &str = "remove_track_favorites";
    pub const SAVE_AUDIOBOOK_FAVORITES: &str = "save_audiobook_favorites";
    pub const SEARCH_ALBUMS: &str = "search_albums";
    pub const SEARCH_ARTISTS: &str = "search_artists";
    pub const SEARCH_AUDIOBOOKS: &str = "search_audiobooks";
    pub const SEARCH_EPISODES: &str = "search_episodes";
    pub const SEARCH_PLAYLISTS: &str = "search_playlists";
    pub const SEARCH_SHOWS: &str = "search_shows";
    pub const SEARCH_TRACKS: &str = "search_tracks";
    pub const VOLUME_SET_STEP: &str = "volume_set_step";

    /// Host media player services
    pub const MEDIA_PLAYER_VOLUME_DOWN: &str = "volume_down";
    pub const MEDIA_PLAYER_VOLUME_MUTE: &str = "volume_mute";
    pub const MEDIA_PLAYER_VOLUME_UP: &str = "volume_up";
}
