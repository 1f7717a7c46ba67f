//! MIME type lookup.
//!
//! Maps a file extension to the Content-Type the response should carry.
//! The table leans toward the assets an isolated WASM page ships: modules,
//! worklets, audio payloads, and the usual web static files.

/// Content-Type for a file extension, `application/octet-stream` when the
/// extension is missing or unknown.
pub fn from_extension(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };

    match ext {
        // Markup and styles
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "application/xml",

        // Scripts and WASM modules
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "opus" => "audio/opus",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Documents and archives
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_assets() {
        assert_eq!(from_extension(Some("html")), "text/html; charset=utf-8");
        assert_eq!(from_extension(Some("css")), "text/css");
        assert_eq!(from_extension(Some("mjs")), "application/javascript");
        assert_eq!(from_extension(Some("svg")), "image/svg+xml");
    }

    #[test]
    fn wasm_and_audio() {
        assert_eq!(from_extension(Some("wasm")), "application/wasm");
        assert_eq!(from_extension(Some("opus")), "audio/opus");
        assert_eq!(from_extension(Some("flac")), "audio/flac");
    }

    #[test]
    fn unknown_falls_back_to_octet_stream() {
        assert_eq!(from_extension(Some("clap")), "application/octet-stream");
        assert_eq!(from_extension(None), "application/octet-stream");
    }
}
