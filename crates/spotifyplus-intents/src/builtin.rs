//! Descriptors of the intents SpotifyPlus ships with
//!
//! Each function builds one [`IntentDescriptor`]; [`all`] returns the full
//! set for registration. Intent types carry the `SpotifyPlus` prefix so they
//! never clash with the host's own media intents.

use crate::descriptor::{CallStep, Condition, IntentDescriptor, ResponseSelector, Source, Step, TargetRequirements};
use crate::schema::SlotSpec;
use spotifyplus_core::names::{attr, response, service, slot, states, DOMAIN_MEDIA_PLAYER};
use spotifyplus_core::{MediaKind, PlayerFeatures as F, SPOTIFY_WEB_URL_PFX};

/// Intent type names
pub mod intent_type {
    pub const FAVORITE_ALBUM_REMOVE: &str = "SpotifyPlusFavoriteAlbumRemove";
    pub const FAVORITE_ARTIST_ADD: &str = "SpotifyPlusFavoriteArtistAdd";
    pub const FAVORITE_AUDIOBOOK_ADD: &str = "SpotifyPlusFavoriteAudiobookAdd";
    pub const FAVORITE_PLAYLIST_ADD: &str = "SpotifyPlusFavoritePlaylistAdd";
    pub const FAVORITE_PODCAST_EPISODE_REMOVE: &str = "SpotifyPlusFavoritePodcastEpisodeRemove";
    pub const FAVORITE_TRACK_REMOVE: &str = "SpotifyPlusFavoriteTrackRemove";
    pub const GET_INFO_ARTIST_BIO: &str = "SpotifyPlusGetInfoArtistBio";
    pub const NOWPLAYING_INFO_ARTIST_BIO: &str = "SpotifyPlusNowPlayingInfoArtistBio";
    pub const NOWPLAYING_INFO_AUDIOBOOK: &str = "SpotifyPlusNowPlayingInfoAudiobook";
    pub const NOWPLAYING_INFO_PODCAST: &str = "SpotifyPlusNowPlayingInfoPodcast";
    pub const NOWPLAYING_INFO_TRACK: &str = "SpotifyPlusNowPlayingInfoTrack";
    pub const PLAYER_MEDIA_PAUSE: &str = "SpotifyPlusPlayerMediaPause";
    pub const PLAYER_MEDIA_RESUME: &str = "SpotifyPlusPlayerMediaResume";
    pub const PLAYER_MEDIA_SKIP_NEXT: &str = "SpotifyPlusPlayerMediaSkipNext";
    pub const PLAYER_MEDIA_SKIP_PREVIOUS: &str = "SpotifyPlusPlayerMediaSkipPrevious";
    pub const PLAYER_MEDIA_SKIP_START: &str = "SpotifyPlusPlayerMediaSkipStart";
    pub const PLAYER_SET_REPEAT_MODE: &str = "SpotifyPlusPlayerSetRepeatMode";
    pub const PLAYER_SET_SHUFFLE_MODE: &str = "SpotifyPlusPlayerSetShuffleMode";
    pub const PLAYER_SET_VOLUME_LEVEL: &str = "SpotifyPlusPlayerSetVolumeLevel";
    pub const PLAYER_TRANSFER_PLAYBACK: &str = "SpotifyPlusPlayerTransferPlayback";
    pub const PLAY_FAVORITE_TRACKS: &str = "SpotifyPlusPlayFavoriteTracks";
    pub const PLAYLIST_CREATE: &str = "SpotifyPlusPlaylistCreate";
    pub const PLAY_PLAYLIST: &str = "SpotifyPlusPlayPlaylist";
    pub const SEARCH_PLAY_ARTIST_ALBUM: &str = "SpotifyPlusSearchPlayArtistAlbum";
    pub const SEARCH_PLAY_ARTIST_TRACK: &str = "SpotifyPlusSearchPlayArtistTrack";
    pub const SEARCH_PLAY_AUDIOBOOK: &str = "SpotifyPlusSearchPlayAudiobook";
    pub const SEARCH_PLAY_PODCAST: &str = "SpotifyPlusSearchPlayPodcast";
    pub const SEARCH_PLAY_PODCAST_EPISODE: &str = "SpotifyPlusSearchPlayPodcastEpisode";
    pub const VOLUME_DOWN: &str = "SpotifyPlusVolumeDown";
    pub const VOLUME_MUTE_OFF: &str = "SpotifyPlusVolumeMuteOff";
    pub const VOLUME_MUTE_ON: &str = "SpotifyPlusVolumeMuteOn";
    pub const VOLUME_SET_STEP: &str = "SpotifyPlusVolumeSetStep";
    pub const VOLUME_UP: &str = "SpotifyPlusVolumeUp";
}

use intent_type as it;

const FIRST_ITEM_NAME: &str = "/result/items/0/name";
const FIRST_ITEM_URI: &str = "/result/items/0/uri";
const FIRST_ITEM_URL: &str = "/result/items/0/external_urls/spotify";
const ITEMS_COUNT: &str = "/result/items_count";

/// Every builtin intent
pub fn all() -> Vec<IntentDescriptor> {
    vec![
        favorite_album_remove(),
        favorite_artist_add(),
        favorite_audiobook_add(),
        favorite_playlist_add(),
        favorite_podcast_episode_remove(),
        favorite_track_remove(),
        get_info_artist_bio(),
        nowplaying_info_artist_bio(),
        nowplaying_info_audiobook(),
        nowplaying_info_podcast(),
        nowplaying_info_track(),
        player_media_pause(),
        player_media_resume(),
        player_media_skip_next(),
        player_media_skip_previous(),
        player_media_skip_start(),
        player_set_repeat_mode(),
        player_set_shuffle_mode(),
        player_set_volume_level(),
        player_transfer_playback(),
        play_favorite_tracks(),
        playlist_create(),
        play_playlist(),
        search_play_artist_album(),
        search_play_artist_track(),
        search_play_audiobook(),
        search_play_podcast(),
        search_play_podcast_episode(),
        volume_down(),
        volume_mute_off(),
        volume_mute_on(),
        volume_set_step(),
        volume_up(),
    ]
}

// ==================== Shared pieces ====================

fn playing_or_paused() -> TargetRequirements {
    TargetRequirements::none().states(&[states::PLAYING, states::PAUSED], response::PLAYER_NOT_PLAYING_MEDIA)
}

fn item_type_is(item_type: &'static str, otherwise: &'static str) -> Step {
    Step::require(Condition::AttributeIs(attr::SP_ITEM_TYPE, item_type), otherwise)
}

fn strings(names: &[&'static str]) -> Vec<SlotSpec> {
    names.iter().copied().map(SlotSpec::string).collect()
}

/// Player command with the usual `device_id` and `delay` arguments
fn player_command(service: &'static str, device_id: Source) -> CallStep {
    CallStep::spotifyplus(service)
        .arg("device_id", device_id)
        .arg("delay", Source::value(slot::DELAY))
}

fn shuffle() -> Source {
    Source::value(slot::PLAYER_SHUFFLE_MODE).or_str("on").is_on()
}

/// `slot` set from what the user said: text and value as given
fn echo(slot: &'static str, from: &'static str) -> Step {
    Step::assign(slot, Source::text(from), Source::value(from))
}

/// Search for one item, stopping with `no_items` when nothing is found
fn search_one(service: &'static str, criteria: Source, no_items: &'static str) -> CallStep {
    CallStep::spotifyplus(service)
        .arg("criteria", criteria)
        .arg("limit_total", Source::Int(1))
        .arg("include_external", Source::Str("audio"))
        .unless_empty(ITEMS_COUNT, no_items)
}

/// Title and link slots from the first search result
fn first_item(title: &'static str, url: &'static str) -> [Step; 2] {
    [
        Step::assign(
            title,
            Source::response(FIRST_ITEM_NAME).or_str("unknown"),
            Source::response(FIRST_ITEM_URI).or_str("unknown"),
        ),
        Step::link(url, Source::response_url(FIRST_ITEM_URL)),
    ]
}

fn nowplaying_artist() -> [Step; 2] {
    [
        Step::assign(
            slot::ARTIST_TITLE,
            Source::attr(attr::MEDIA_ARTIST),
            Source::attr(attr::SP_ARTIST_URI),
        ),
        Step::link(slot::ARTIST_URL, Source::attr(attr::SP_ARTIST_URI).web_url(MediaKind::Artist)),
    ]
}

fn nowplaying_track() -> [Step; 2] {
    [
        Step::assign(
            slot::TRACK_TITLE,
            Source::attr(attr::MEDIA_TITLE),
            Source::attr(attr::SP_TRACK_URI_ORIGIN),
        ),
        Step::link(slot::TRACK_URL, Source::attr(attr::SP_TRACK_URI_ORIGIN).web_url(MediaKind::Track)),
    ]
}

fn nowplaying_audiobook() -> [Step; 4] {
    [
        Step::assign(
            slot::AUDIOBOOK_TITLE,
            Source::attr(attr::MEDIA_ALBUM_NAME),
            Source::attr(attr::SP_CONTEXT_URI),
        ),
        Step::link(slot::AUDIOBOOK_URL, Source::attr(attr::SP_CONTEXT_URI).web_url(MediaKind::Show)),
        Step::assign(slot::AUTHOR_TITLE, Source::attr(attr::MEDIA_ARTIST), Source::Str("")),
        Step::assign(
            slot::CHAPTER_TITLE,
            Source::attr(attr::MEDIA_TITLE),
            Source::attr(attr::MEDIA_CONTENT_ID),
        ),
    ]
}

fn nowplaying_episode() -> [Step; 2] {
    [
        Step::assign(
            slot::EPISODE_TITLE,
            Source::attr(attr::MEDIA_TITLE),
            Source::attr(attr::MEDIA_CONTENT_ID),
        ),
        Step::link(slot::EPISODE_URL, Source::attr(attr::MEDIA_CONTENT_ID).web_url(MediaKind::Episode)),
    ]
}

fn artist_bio_steps() -> Vec<Step> {
    vec![Step::assign(slot::ARTIST_BIO, Source::response("/result/bio"), Source::Str(""))]
}

// ==================== Favorites ====================

fn favorite_album_remove() -> IntentDescriptor {
    let mut steps = vec![item_type_is("track", response::NOWPLAYING_NO_MEDIA_ALBUM)];
    steps.extend(nowplaying_artist());
    steps.push(Step::assign(
        slot::ALBUM_TITLE,
        Source::attr(attr::MEDIA_ALBUM_NAME),
        Source::Str(""),
    ));
    steps.push(Step::call(CallStep::spotifyplus(service::REMOVE_ALBUM_FAVORITES)));

    IntentDescriptor::new(it::FAVORITE_ALBUM_REMOVE, "Removes the playing album from the Spotify favorites")
        .slots(strings(&[slot::ALBUM_TITLE, slot::ARTIST_TITLE, slot::ARTIST_URL]))
        .target(playing_or_paused())
        .steps(steps)
}

fn favorite_artist_add() -> IntentDescriptor {
    let mut steps = vec![item_type_is("track", response::NOWPLAYING_NO_MEDIA_ARTIST)];
    steps.extend(nowplaying_artist());
    steps.push(Step::call(CallStep::spotifyplus(service::FOLLOW_ARTISTS)));

    IntentDescriptor::new(it::FAVORITE_ARTIST_ADD, "Follows the artist of the playing track")
        .slots(strings(&[slot::ARTIST_TITLE, slot::ARTIST_URL]))
        .target(playing_or_paused())
        .steps(steps)
}

fn favorite_audiobook_add() -> IntentDescriptor {
    let mut steps = vec![item_type_is("audiobook", response::NOWPLAYING_NO_MEDIA_AUDIOBOOK)];
    steps.extend(nowplaying_audiobook());
    steps.push(Step::call(CallStep::spotifyplus(service::SAVE_AUDIOBOOK_FAVORITES)));

    IntentDescriptor::new(it::FAVORITE_AUDIOBOOK_ADD, "Adds the playing audiobook to the Spotify favorites")
        .slots(strings(&[
            slot::AUDIOBOOK_TITLE,
            slot::AUDIOBOOK_URL,
            slot::AUTHOR_TITLE,
            slot::CHAPTER_TITLE,
        ]))
        .target(playing_or_paused())
        .steps(steps)
}

fn favorite_playlist_add() -> IntentDescriptor {
    IntentDescriptor::new(it::FAVORITE_PLAYLIST_ADD, "Follows the playing playlist")
        .slots(vec![
            SlotSpec::string(slot::PLAYLIST_TITLE),
            SlotSpec::string(slot::PLAYLIST_URL),
            SlotSpec::bool(slot::IS_PUBLIC),
        ])
        .target(playing_or_paused())
        .steps(vec![
            Step::require(
                Condition::AttributeContains(attr::SP_CONTEXT_URI, "playlist"),
                response::NOWPLAYING_NO_MEDIA_PLAYLIST,
            ),
            Step::assign(
                slot::PLAYLIST_TITLE,
                Source::attr(attr::SP_PLAYLIST_NAME).replace("unknown", "Spotify Algorithmic Playlist"),
                Source::attr(attr::SP_PLAYLIST_URI),
            ),
            Step::link(slot::PLAYLIST_URL, Source::attr(attr::SP_PLAYLIST_URI).web_url(MediaKind::Playlist)),
            Step::call(
                CallStep::spotifyplus(service::FOLLOW_PLAYLIST)
                    .arg("public", Source::value(slot::IS_PUBLIC).or(Source::Bool(true))),
            ),
        ])
}

fn favorite_podcast_episode_remove() -> IntentDescriptor {
    let mut steps = vec![
        item_type_is("podcast", response::NOWPLAYING_NO_MEDIA_PODCAST),
        Step::assign(
            slot::PODCAST_TITLE,
            Source::attr(attr::MEDIA_ALBUM_NAME),
            Source::attr(attr::SP_CONTEXT_URI),
        ),
        Step::link(slot::PODCAST_URL, Source::attr(attr::SP_CONTEXT_URI).web_url(MediaKind::Show)),
    ];
    steps.extend(nowplaying_episode());
    steps.push(Step::call(CallStep::spotifyplus(service::REMOVE_EPISODE_FAVORITES)));

    IntentDescriptor::new(
        it::FAVORITE_PODCAST_EPISODE_REMOVE,
        "Removes the playing podcast episode from the Spotify favorites",
    )
    .slots(strings(&[
        slot::EPISODE_TITLE,
        slot::EPISODE_URL,
        slot::PODCAST_TITLE,
        slot::PODCAST_URL,
    ]))
    .target(playing_or_paused())
    .steps(steps)
}

fn favorite_track_remove() -> IntentDescriptor {
    let mut steps = vec![item_type_is("track", response::NOWPLAYING_NO_MEDIA_TRACK)];
    steps.extend(nowplaying_artist());
    steps.extend(nowplaying_track());
    steps.push(Step::call(CallStep::spotifyplus(service::REMOVE_TRACK_FAVORITES)));

    IntentDescriptor::new(it::FAVORITE_TRACK_REMOVE, "Removes the playing track from the Spotify favorites")
        .slots(strings(&[
            slot::ARTIST_TITLE,
            slot::ARTIST_URL,
            slot::TRACK_TITLE,
            slot::TRACK_URL,
        ]))
        .target(playing_or_paused().features(F::PLAY_MEDIA))
        .steps(steps)
}

// ==================== Information ====================

fn get_info_artist_bio() -> IntentDescriptor {
    let artist = Source::value(slot::ARTIST_NAME).or(Source::text(slot::ARTIST_NAME));

    let mut steps = vec![
        Step::assign(slot::ARTIST_TITLE, artist.clone(), Source::Str("")),
        Step::call(search_one(
            service::SEARCH_ARTISTS,
            Source::Concat(vec![Source::Str("artist:"), artist]),
            response::SPOTIFY_NO_ARTIST_INFO,
        )),
    ];
    steps.extend(first_item(slot::ARTIST_TITLE, slot::ARTIST_URL));
    steps.push(Step::call(
        CallStep::spotifyplus(service::GET_ARTIST_INFO)
            .arg("artist_id", Source::value(slot::ARTIST_TITLE).uri_id())
            .unless_empty("/result/bio", response::SPOTIFY_NO_ARTIST_INFO),
    ));
    steps.extend(artist_bio_steps());

    IntentDescriptor::new(it::GET_INFO_ARTIST_BIO, "Gets biography information for an artist")
        .slots(strings(&[
            slot::ARTIST_BIO,
            slot::ARTIST_NAME,
            slot::ARTIST_TITLE,
            slot::ARTIST_URL,
        ]))
        .steps(steps)
        .respond(ResponseSelector::Fixed(response::GET_INFO_ARTIST_BIO))
}

fn nowplaying_info_artist_bio() -> IntentDescriptor {
    let mut steps = vec![item_type_is("track", response::NOWPLAYING_NO_MEDIA_ARTIST)];
    steps.extend(nowplaying_artist());
    steps.push(Step::call(
        CallStep::spotifyplus(service::GET_ARTIST_INFO)
            .arg("artist_id", Source::attr(attr::SP_ARTIST_URI).uri_id())
            .unless_empty("/result/bio", response::SPOTIFY_NO_ARTIST_INFO),
    ));
    steps.extend(artist_bio_steps());

    IntentDescriptor::new(it::NOWPLAYING_INFO_ARTIST_BIO, "Gets biography information for the playing artist")
        .slots(strings(&[slot::ARTIST_BIO, slot::ARTIST_TITLE, slot::ARTIST_URL]))
        .target(playing_or_paused().features(F::PLAY_MEDIA))
        .steps(steps)
        .respond(ResponseSelector::Fixed(response::GET_INFO_ARTIST_BIO))
}

fn nowplaying_info_audiobook() -> IntentDescriptor {
    let mut steps = vec![item_type_is("audiobook", response::NOWPLAYING_NO_MEDIA_AUDIOBOOK)];
    steps.extend(nowplaying_audiobook());

    IntentDescriptor::new(it::NOWPLAYING_INFO_AUDIOBOOK, "Describes the playing audiobook")
        .slots(strings(&[
            slot::AUDIOBOOK_TITLE,
            slot::AUDIOBOOK_URL,
            slot::AUTHOR_TITLE,
            slot::CHAPTER_TITLE,
        ]))
        .target(playing_or_paused().features(F::PLAY_MEDIA))
        .steps(steps)
        .respond(ResponseSelector::Fixed(response::NOWPLAYING_INFO_AUDIOBOOK))
}

fn nowplaying_info_podcast() -> IntentDescriptor {
    let mut steps = vec![
        item_type_is("podcast", response::NOWPLAYING_NO_MEDIA_PODCAST),
        Step::assign(slot::PODCAST_TITLE, Source::attr(attr::MEDIA_ALBUM_NAME), Source::Str("")),
    ];
    steps.extend(nowplaying_episode());

    IntentDescriptor::new(it::NOWPLAYING_INFO_PODCAST, "Describes the playing podcast episode")
        .slots(strings(&[slot::EPISODE_TITLE, slot::EPISODE_URL, slot::PODCAST_TITLE]))
        .target(playing_or_paused().features(F::PLAY_MEDIA))
        .steps(steps)
        .respond(ResponseSelector::Fixed(response::NOWPLAYING_INFO_PODCAST))
}

fn nowplaying_info_track() -> IntentDescriptor {
    let mut steps = vec![item_type_is("track", response::NOWPLAYING_NO_MEDIA_TRACK)];
    steps.extend(nowplaying_artist());
    steps.extend(nowplaying_track());
    steps.extend([
        Step::call(
            CallStep::spotifyplus(service::GET_TRACK)
                .arg("track_id", Source::attr(attr::SP_TRACK_URI_ORIGIN).uri_id())
                .returning(),
        ),
        Step::assign(
            slot::ALBUM_TITLE,
            Source::attr(attr::MEDIA_ALBUM_NAME),
            Source::response("/result/album/uri"),
        ),
        Step::link(slot::ALBUM_URL, Source::response_url("/result/album/external_urls/spotify")),
        Step::link(slot::ARTIST_URL, Source::response_url("/result/artists/0/external_urls/spotify")),
        Step::link(slot::TRACK_URL, Source::response_url("/result/external_urls/spotify")),
    ]);

    IntentDescriptor::new(it::NOWPLAYING_INFO_TRACK, "Describes the playing track")
        .slots(strings(&[
            slot::ALBUM_TITLE,
            slot::ALBUM_URL,
            slot::ARTIST_TITLE,
            slot::ARTIST_URL,
            slot::TRACK_TITLE,
            slot::TRACK_URL,
        ]))
        .target(playing_or_paused())
        .steps(steps)
        .respond(ResponseSelector::Fixed(response::NOWPLAYING_INFO_TRACK))
}

// ==================== Player control ====================

fn player_media_pause() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_MEDIA_PAUSE, "Pauses the Spotify player")
        .slots(vec![SlotSpec::delay()])
        .target(
            TargetRequirements::none()
                .features(F::PAUSE | F::PLAY_MEDIA)
                .states(&[states::PLAYING], response::PLAYER_NOT_PLAYING_MEDIA),
        )
        .steps(vec![Step::call(player_command(service::PLAYER_MEDIA_PAUSE, Source::Str("")))])
}

fn player_media_resume() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_MEDIA_RESUME, "Resumes the Spotify player")
        .slots(vec![SlotSpec::delay()])
        .target(TargetRequirements::none().features(F::PAUSE | F::PLAY_MEDIA).states(
            &[states::PAUSED, states::OFF, states::ON, states::IDLE, states::UNKNOWN],
            response::PLAYER_NOT_PLAYING_MEDIA,
        ))
        .steps(vec![Step::call(player_command(service::PLAYER_MEDIA_RESUME, Source::Str("")))])
}

fn player_media_skip_next() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_MEDIA_SKIP_NEXT, "Skips to the next track")
        .slots(vec![SlotSpec::delay(), SlotSpec::string(slot::DEVICE_NAME)])
        .target(playing_or_paused().features(F::NEXT_TRACK | F::PLAY_MEDIA))
        .steps(vec![Step::call(player_command(
            service::PLAYER_MEDIA_SKIP_NEXT,
            Source::value(slot::DEVICE_NAME),
        ))])
}

fn player_media_skip_previous() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_MEDIA_SKIP_PREVIOUS, "Skips to the previous track")
        .slots(vec![SlotSpec::delay(), SlotSpec::string(slot::DEVICE_NAME)])
        .target(playing_or_paused().features(F::PREVIOUS_TRACK | F::PLAY_MEDIA))
        .steps(vec![Step::call(player_command(
            service::PLAYER_MEDIA_SKIP_PREVIOUS,
            Source::value(slot::DEVICE_NAME),
        ))])
}

fn player_media_skip_start() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_MEDIA_SKIP_START, "Restarts the playing item from the beginning")
        .slots(vec![SlotSpec::delay()])
        .target(playing_or_paused().features(F::SEEK | F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(
            player_command(service::PLAYER_MEDIA_SEEK, Source::Str("")).arg("position_ms", Source::Int(0)),
        )])
}

fn player_set_repeat_mode() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_SET_REPEAT_MODE, "Sets the repeat mode of the Spotify player")
        .slots(vec![SlotSpec::delay(), SlotSpec::string(slot::PLAYER_REPEAT_MODE)])
        .target(playing_or_paused().features(F::SEEK | F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(
            player_command(service::PLAYER_SET_REPEAT_MODE, Source::Str(""))
                .arg("state", Source::value(slot::PLAYER_REPEAT_MODE).or_str("on")),
        )])
}

fn player_set_shuffle_mode() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_SET_SHUFFLE_MODE, "Turns shuffle on or off")
        .slots(vec![SlotSpec::delay(), SlotSpec::string(slot::PLAYER_SHUFFLE_MODE)])
        .target(playing_or_paused().features(F::SHUFFLE_SET | F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(
            player_command(service::PLAYER_SET_SHUFFLE_MODE, Source::Str("")).arg("state", shuffle()),
        )])
}

fn player_set_volume_level() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_SET_VOLUME_LEVEL, "Sets the volume of the Spotify player")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::int(slot::PLAYER_VOLUME_LEVEL, 0, 100),
        ])
        .target(TargetRequirements::none().features(F::VOLUME_SET | F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(
            player_command(service::PLAYER_SET_VOLUME_LEVEL, Source::Str(""))
                .arg("volume_level", Source::value(slot::PLAYER_VOLUME_LEVEL)),
        )])
}

fn player_transfer_playback() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYER_TRANSFER_PLAYBACK, "Transfers playback to another Spotify Connect device")
        .slots(vec![SlotSpec::delay(), SlotSpec::string(slot::DEVICE_NAME)])
        .target(TargetRequirements::none().features(F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(
            player_command(service::PLAYER_TRANSFER_PLAYBACK, Source::value(slot::DEVICE_NAME))
                .arg("play", Source::Bool(true)),
        )])
}

// ==================== Playback ====================

fn play_favorite_tracks() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAY_FAVORITE_TRACKS, "Plays the favorite tracks, optionally of one artist")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::int(slot::LIMIT_TOTAL, 1, 750).with_default(200),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::ARTIST_NAME),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(vec![
            echo(slot::ARTIST_TITLE, slot::ARTIST_NAME),
            Step::link(slot::ARTIST_URL, Source::Str(SPOTIFY_WEB_URL_PFX)),
            Step::link(slot::ARTIST_URL, Source::value(slot::ARTIST_NAME).web_url(MediaKind::Artist))
                .when(Condition::SlotIsUri(slot::ARTIST_NAME, MediaKind::Artist)),
            Step::call(
                player_command(service::PLAYER_MEDIA_PLAY_TRACK_FAVORITES, Source::value(slot::DEVICE_NAME))
                    .arg("filter_artist", Source::value(slot::ARTIST_NAME))
                    .arg("shuffle", shuffle())
                    .arg("limit_total", Source::value(slot::LIMIT_TOTAL)),
            ),
        ])
        .respond(ResponseSelector::if_slot_text(
            slot::ARTIST_NAME,
            response::PLAY_FAVORITE_TRACKS_FOR_ARTIST,
            response::PLAY_FAVORITE_TRACKS,
        ))
}

fn playlist_create() -> IntentDescriptor {
    IntentDescriptor::new(it::PLAYLIST_CREATE, "Creates a playlist for the current Spotify user")
        .slots(vec![
            SlotSpec::string(slot::DESCRIPTION),
            SlotSpec::string(slot::IMAGE_PATH),
            SlotSpec::bool(slot::IS_COLLABORATIVE),
            SlotSpec::bool(slot::IS_PUBLIC),
            SlotSpec::string(slot::PLAYLIST_NAME),
        ])
        .target(TargetRequirements::none().premium())
        .steps(vec![
            Step::call(
                CallStep::spotifyplus(service::PLAYLIST_CREATE)
                    .arg("name", Source::text(slot::PLAYLIST_NAME))
                    .arg("description", Source::text(slot::DESCRIPTION))
                    .arg("public", Source::value(slot::IS_PUBLIC).or(Source::Bool(false)))
                    .arg("collaborative", Source::value(slot::IS_COLLABORATIVE).or(Source::Bool(false)))
                    .optional_arg("image_path", Source::text(slot::IMAGE_PATH))
                    .returning(),
            ),
            Step::assign(
                slot::PLAYLIST_TITLE,
                Source::text(slot::PLAYLIST_NAME),
                Source::response("/result/uri"),
            ),
            Step::link(slot::PLAYLIST_URL, Source::response_url("/result/external_urls/spotify")),
        ])
        .respond(ResponseSelector::Fixed(response::PLAYLIST_CREATED))
}

fn play_playlist() -> IntentDescriptor {
    let is_uri = Condition::SlotIsUri(slot::PLAYLIST_NAME, MediaKind::Playlist);
    let searched = Condition::not(is_uri.clone());

    let mut steps = vec![
        echo(slot::PLAYLIST_TITLE, slot::PLAYLIST_NAME),
        Step::link(slot::PLAYLIST_URL, Source::value(slot::PLAYLIST_NAME).web_url(MediaKind::Playlist))
            .when(is_uri),
        Step::call(search_one(
            service::SEARCH_PLAYLISTS,
            Source::text(slot::PLAYLIST_NAME),
            response::SPOTIFY_SEARCH_NO_ITEMS_PLAYLIST,
        ))
        .when(searched.clone()),
    ];
    steps.extend(
        first_item(slot::PLAYLIST_TITLE, slot::PLAYLIST_URL).map(|step| step.when(searched.clone())),
    );
    steps.push(Step::call(
        player_command(service::PLAYER_MEDIA_PLAY_CONTEXT, Source::text(slot::DEVICE_NAME))
            .arg("context_uri", Source::value(slot::PLAYLIST_TITLE))
            .arg("shuffle", shuffle()),
    ));

    IntentDescriptor::new(it::PLAY_PLAYLIST, "Searches for a playlist and plays it")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::PLAYLIST_NAME),
            SlotSpec::string(slot::PLAYLIST_TITLE),
            SlotSpec::string(slot::PLAYLIST_URL),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(steps)
        .respond(ResponseSelector::Fixed(response::PLAY_PLAYLIST))
}

/// Album or track by name, optionally narrowed to an artist
fn search_play_artist_item(
    kind: MediaKind,
    name_slot: &'static str,
    title_slot: &'static str,
    url_slot: &'static str,
    search_service: &'static str,
    no_items: &'static str,
) -> Vec<Step> {
    let is_uri = Condition::SlotIsUri(name_slot, kind);
    let searched = Condition::not(is_uri.clone());

    let mut steps = vec![
        echo(slot::ARTIST_TITLE, slot::ARTIST_NAME),
        echo(title_slot, name_slot),
        Step::link(url_slot, Source::value(name_slot).web_url(kind)).when(is_uri.clone()),
        Step::link(slot::ARTIST_URL, Source::Str(SPOTIFY_WEB_URL_PFX)).when(is_uri),
        Step::assign(
            slot::SEARCH_CRITERIA,
            Source::Concat(vec![
                Source::text(name_slot),
                Source::prefixed(" artist:", Source::text(slot::ARTIST_NAME)),
            ]),
            Source::Str(""),
        )
        .when(searched.clone()),
        Step::call(search_one(search_service, Source::text(slot::SEARCH_CRITERIA), no_items)).when(searched.clone()),
    ];
    steps.extend(first_item(title_slot, url_slot).map(|step| step.when(searched.clone())));
    steps.extend(
        [
            Step::assign(
                slot::ARTIST_TITLE,
                Source::response("/result/items/0/artists/0/name").or_str("unknown"),
                Source::response("/result/items/0/artists/0/uri").or_str("unknown"),
            ),
            Step::link(
                slot::ARTIST_URL,
                Source::response_url("/result/items/0/artists/0/external_urls/spotify"),
            ),
        ]
        .map(|step| step.when(searched.clone())),
    );
    steps
}

fn search_play_artist_album() -> IntentDescriptor {
    let mut steps = search_play_artist_item(
        MediaKind::Album,
        slot::ALBUM_NAME,
        slot::ALBUM_TITLE,
        slot::ALBUM_URL,
        service::SEARCH_ALBUMS,
        response::SPOTIFY_SEARCH_NO_ITEMS_ALBUM,
    );
    steps.push(Step::call(
        player_command(service::PLAYER_MEDIA_PLAY_CONTEXT, Source::value(slot::DEVICE_NAME))
            .arg("context_uri", Source::value(slot::ALBUM_TITLE))
            .arg("shuffle", shuffle()),
    ));

    IntentDescriptor::new(it::SEARCH_PLAY_ARTIST_ALBUM, "Searches for an album and plays it")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::ALBUM_NAME),
            SlotSpec::string(slot::ARTIST_NAME),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(steps)
        .respond(ResponseSelector::if_slot_text(
            slot::ARTIST_NAME,
            response::PLAY_ALBUM_WITH_ARTIST,
            response::PLAY_ALBUM,
        ))
}

fn search_play_artist_track() -> IntentDescriptor {
    let mut steps = search_play_artist_item(
        MediaKind::Track,
        slot::TRACK_NAME,
        slot::TRACK_TITLE,
        slot::TRACK_URL,
        service::SEARCH_TRACKS,
        response::SPOTIFY_SEARCH_NO_ITEMS_TRACK,
    );
    steps.push(Step::call(
        player_command(service::PLAYER_MEDIA_PLAY_TRACKS, Source::value(slot::DEVICE_NAME))
            .arg("uris", Source::value(slot::TRACK_TITLE))
            .arg("shuffle", shuffle()),
    ));

    IntentDescriptor::new(it::SEARCH_PLAY_ARTIST_TRACK, "Searches for a track and plays it")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::TRACK_NAME),
            SlotSpec::string(slot::ARTIST_NAME),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(steps)
        .respond(ResponseSelector::if_slot_text(
            slot::ARTIST_NAME,
            response::PLAY_TRACK_WITH_ARTIST,
            response::PLAY_TRACK,
        ))
}

fn search_play_audiobook() -> IntentDescriptor {
    let is_uri = Condition::SlotIsUri(slot::AUDIOBOOK_NAME, MediaKind::Show);
    let searched = Condition::not(is_uri.clone());

    let mut steps = vec![
        echo(slot::AUDIOBOOK_TITLE, slot::AUDIOBOOK_NAME),
        Step::link(slot::AUDIOBOOK_URL, Source::value(slot::AUDIOBOOK_NAME).web_url(MediaKind::Show))
            .when(is_uri),
        Step::assign(slot::SEARCH_CRITERIA, Source::text(slot::AUDIOBOOK_NAME), Source::Str(""))
            .when(searched.clone()),
        Step::call(search_one(
            service::SEARCH_AUDIOBOOKS,
            Source::text(slot::SEARCH_CRITERIA),
            response::SPOTIFY_SEARCH_NO_ITEMS_AUDIOBOOK,
        ))
        .when(searched.clone()),
    ];
    steps.extend(first_item(slot::AUDIOBOOK_TITLE, slot::AUDIOBOOK_URL).map(|step| step.when(searched.clone())));
    steps.extend([
        Step::assign(
            slot::AUTHOR_TITLE,
            Source::response("/result/items/0/authors/0/name").or_str("unknown"),
            Source::response("/result/items/0/authors/0/name").or_str("unknown"),
        )
        .when(searched),
        Step::call(
            player_command(service::PLAYER_MEDIA_PLAY_CONTEXT, Source::value(slot::DEVICE_NAME))
                .arg("context_uri", Source::value(slot::AUDIOBOOK_TITLE))
                .arg("shuffle", shuffle()),
        ),
    ]);

    IntentDescriptor::new(it::SEARCH_PLAY_AUDIOBOOK, "Searches for an audiobook and plays it")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::AUDIOBOOK_NAME),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(steps)
        .respond(ResponseSelector::if_slot_text(
            slot::AUTHOR_TITLE,
            response::PLAY_AUDIOBOOK_WITH_AUTHOR,
            response::PLAY_AUDIOBOOK,
        ))
}

fn search_play_podcast() -> IntentDescriptor {
    let is_uri = Condition::SlotIsUri(slot::PODCAST_NAME, MediaKind::Show);
    let searched = Condition::not(is_uri.clone());
    let latest = Condition::SlotValueIs(slot::LATEST_EPISODE, "on");

    let mut steps = vec![
        echo(slot::PODCAST_TITLE, slot::PODCAST_NAME),
        Step::link(slot::PODCAST_URL, Source::value(slot::PODCAST_NAME).web_url(MediaKind::Show)).when(is_uri),
        Step::assign(slot::SEARCH_CRITERIA, Source::text(slot::PODCAST_NAME), Source::Str(""))
            .when(searched.clone()),
        Step::call(search_one(
            service::SEARCH_SHOWS,
            Source::text(slot::SEARCH_CRITERIA),
            response::SPOTIFY_SEARCH_NO_ITEMS_PODCAST,
        ))
        .when(searched.clone()),
    ];
    steps.extend(first_item(slot::PODCAST_TITLE, slot::PODCAST_URL).map(|step| step.when(searched.clone())));

    steps.push(
        Step::call(
            CallStep::spotifyplus(service::GET_SHOW_EPISODES)
                .arg("show_id", Source::value(slot::PODCAST_TITLE).uri_id())
                .arg("limit_total", Source::Int(1))
                .unless_empty(ITEMS_COUNT, response::SPOTIFY_SEARCH_NO_ITEMS_PODCAST_EPISODE),
        )
        .when(latest.clone()),
    );
    steps.extend(first_item(slot::EPISODE_TITLE, slot::EPISODE_URL).map(|step| step.when(latest.clone())));
    steps.extend([
        Step::call(
            player_command(service::PLAYER_MEDIA_PLAY_TRACKS, Source::value(slot::DEVICE_NAME))
                .arg("uris", Source::value(slot::EPISODE_TITLE))
                .arg("shuffle", shuffle()),
        )
        .when(latest.clone()),
        Step::call(
            player_command(service::PLAYER_MEDIA_PLAY_CONTEXT, Source::value(slot::DEVICE_NAME))
                .arg("context_uri", Source::value(slot::PODCAST_TITLE))
                .arg("shuffle", shuffle()),
        )
        .when(Condition::not(latest.clone())),
    ]);

    IntentDescriptor::new(it::SEARCH_PLAY_PODCAST, "Searches for a podcast and plays it or its latest episode")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::LATEST_EPISODE),
            SlotSpec::string(slot::PODCAST_NAME),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(steps)
        .respond(ResponseSelector::Choose {
            when: latest,
            then: response::PLAY_PODCAST_EPISODE,
            otherwise: response::PLAY_PODCAST,
        })
}

fn search_play_podcast_episode() -> IntentDescriptor {
    let is_uri = Condition::SlotIsUri(slot::EPISODE_NAME, MediaKind::Episode);
    let searched = Condition::not(is_uri.clone());

    let mut steps = vec![
        echo(slot::PODCAST_TITLE, slot::PODCAST_NAME),
        echo(slot::EPISODE_TITLE, slot::EPISODE_NAME),
        Step::link(slot::EPISODE_URL, Source::value(slot::EPISODE_NAME).web_url(MediaKind::Episode))
            .when(is_uri.clone()),
        Step::link(slot::PODCAST_URL, Source::Str(SPOTIFY_WEB_URL_PFX)).when(is_uri),
        Step::assign(
            slot::SEARCH_CRITERIA,
            Source::Concat(vec![
                Source::text(slot::EPISODE_NAME),
                Source::prefixed(", ", Source::text(slot::PODCAST_NAME)),
            ]),
            Source::Str(""),
        )
        .when(searched.clone()),
        Step::call(search_one(
            service::SEARCH_EPISODES,
            Source::text(slot::SEARCH_CRITERIA),
            response::SPOTIFY_SEARCH_NO_ITEMS_PODCAST_EPISODE,
        ))
        .when(searched.clone()),
    ];
    steps.extend(first_item(slot::EPISODE_TITLE, slot::EPISODE_URL).map(|step| step.when(searched.clone())));
    steps.extend([
        Step::call(
            CallStep::spotifyplus(service::GET_EPISODE)
                .arg("episode_id", Source::value(slot::EPISODE_TITLE).uri_id())
                .returning(),
        ),
        Step::assign(
            slot::PODCAST_TITLE,
            Source::response("/result/show/name").or_str("unknown"),
            Source::response("/result/show/uri").or_str("unknown"),
        ),
        Step::link(slot::PODCAST_URL, Source::response_url("/result/show/external_urls/spotify")),
        Step::call(
            player_command(service::PLAYER_MEDIA_PLAY_TRACKS, Source::value(slot::DEVICE_NAME))
                .arg("uris", Source::value(slot::EPISODE_TITLE))
                .arg("shuffle", shuffle()),
        ),
    ]);

    IntentDescriptor::new(it::SEARCH_PLAY_PODCAST_EPISODE, "Searches for a podcast episode and plays it")
        .slots(vec![
            SlotSpec::delay(),
            SlotSpec::string(slot::DEVICE_NAME),
            SlotSpec::string(slot::EPISODE_NAME),
            SlotSpec::string(slot::PODCAST_NAME),
            SlotSpec::string(slot::PLAYER_SHUFFLE_MODE),
        ])
        .target(TargetRequirements::none().premium())
        .steps(steps)
        .respond(ResponseSelector::if_slot_text(
            slot::PODCAST_NAME,
            response::PLAY_PODCAST_EPISODE,
            response::PLAY_PODCAST,
        ))
}

// ==================== Volume ====================

fn volume_down() -> IntentDescriptor {
    IntentDescriptor::new(it::VOLUME_DOWN, "Turns the volume down one step")
        .target(TargetRequirements::none().features(F::VOLUME_STEP | F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(CallStep::new(
            DOMAIN_MEDIA_PLAYER,
            service::MEDIA_PLAYER_VOLUME_DOWN,
        ))])
}

fn volume_mute(intent_type: &'static str, description: &'static str, muted: bool) -> IntentDescriptor {
    IntentDescriptor::new(intent_type, description)
        .target(TargetRequirements::none().features(F::VOLUME_MUTE | F::PLAY_MEDIA))
        .steps(vec![Step::call(
            CallStep::new(DOMAIN_MEDIA_PLAYER, service::MEDIA_PLAYER_VOLUME_MUTE)
                .arg("is_volume_muted", Source::Bool(muted)),
        )])
}

fn volume_mute_off() -> IntentDescriptor {
    volume_mute(it::VOLUME_MUTE_OFF, "Unmutes the Spotify player", false)
}

fn volume_mute_on() -> IntentDescriptor {
    volume_mute(it::VOLUME_MUTE_ON, "Mutes the Spotify player", true)
}

fn volume_set_step() -> IntentDescriptor {
    IntentDescriptor::new(it::VOLUME_SET_STEP, "Sets the volume step percentage")
        .slots(vec![SlotSpec::int(slot::PLAYER_VOLUME_STEP_PCT, 1, 100).with_default(10)])
        .target(TargetRequirements::none().features(F::VOLUME_STEP).premium())
        .steps(vec![Step::call(
            CallStep::spotifyplus(service::VOLUME_SET_STEP)
                .arg("level_percent", Source::value(slot::PLAYER_VOLUME_STEP_PCT)),
        )])
}

fn volume_up() -> IntentDescriptor {
    IntentDescriptor::new(it::VOLUME_UP, "Turns the volume up one step")
        .target(TargetRequirements::none().features(F::VOLUME_STEP | F::PLAY_MEDIA).premium())
        .steps(vec![Step::call(CallStep::new(DOMAIN_MEDIA_PLAYER, service::MEDIA_PLAYER_VOLUME_UP))])
}
