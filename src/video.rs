use serde::Serialize;

const STREAMING_MARKERS: &[&str] = &["youtube.com", "youtu.be"];
const EMBED_SEGMENT: &str = "/embed/";
const DIRECT_FILE_EXTENSIONS: &[&str] = &[".mp4"];
const LOCAL_ASSET_PREFIX: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoMode {
    /// Third-party player inside a sandboxed frame.
    EmbeddableFrame,
    /// Native playback controls against a file URL.
    DirectFile,
    Unsupported,
}

pub fn classify(video_url: &str) -> VideoMode {
    let streaming = STREAMING_MARKERS.iter().any(|m| video_url.contains(m));
    if streaming || video_url.contains(EMBED_SEGMENT) {
        return VideoMode::EmbeddableFrame;
    }

    let direct_file = DIRECT_FILE_EXTENSIONS
        .iter()
        .any(|ext| video_url.ends_with(ext));
    if direct_file || video_url.starts_with(LOCAL_ASSET_PREFIX) {
        return VideoMode::DirectFile;
    }

    VideoMode::Unsupported
}
