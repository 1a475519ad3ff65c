// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Host location and root resource path resolution.

/// Protocol string of a location served from the local filesystem.
pub const FILE_PROTOCOL: &str = "file:";

/// Where the host says the running application was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Scheme including the trailing colon, e.g. `https:` or `file:`.
    pub protocol: String,
    /// Host name and optional port. Empty for local files.
    pub host: String,
    /// Path of the loaded document, starting with `/`.
    pub pathname: String,
}

impl Location {
    /// Creates a location from its three parts.
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            pathname: pathname.into(),
        }
    }

    /// Creates a `file:` location for a local document path.
    pub fn file(pathname: impl Into<String>) -> Self {
        Self::new(FILE_PROTOCOL, "", pathname)
    }

    /// Returns `true` when the document was loaded from the local filesystem.
    pub fn is_local_file(&self) -> bool {
        self.protocol == FILE_PROTOCOL
    }
}

/// Derives the engine's root resource path from the host location.
///
/// Windows file locations are reported as `/C:/dir/file`; when the third
/// character is the drive separator, the leading slash is dropped. The
/// corrected pathname is only used for `file:` locations. The result is the
/// directory part of the location, without a trailing `/`.
pub fn resolve_root_path(location: &Location) -> String {
    let pathname = location.pathname.as_str();
    let corrected = if pathname.chars().nth(2) == Some(':') {
        let mut chars = pathname.chars();
        chars.next();
        chars.as_str()
    } else {
        pathname
    };

    if location.is_local_file() {
        directory_of(corrected)
    } else {
        directory_of(&format!(
            "{}//{}{}",
            location.protocol, location.host, location.pathname
        ))
    }
}

/// Strips the last path segment (and any query or fragment) from `url`.
///
/// Returns an empty string when `url` has no directory part.
pub fn directory_of(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    match without_query.rfind('/') {
        Some(idx) if idx > 0 => without_query[..idx].to_string(),
        _ => String::new(),
    }
}

/// Resolves `relative` against the directory `base`.
///
/// Absolute URLs, absolute paths and drive paths are returned unchanged.
/// `.` segments are dropped and `..` segments climb out of `base`, never past
/// its root or authority.
pub fn join_path(base: &str, relative: &str) -> String {
    if base.is_empty() || is_absolute(relative) {
        return relative.to_string();
    }

    let floor = if base.contains("://") { 3 } else { 1 };
    let mut segments: Vec<&str> = base.trim_end_matches('/').split('/').collect();
    for part in relative.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if segments.len() > floor {
                    segments.pop();
                }
            }
            segment => segments.push(segment),
        }
    }
    segments.join("/")
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.contains("://") || path.chars().nth(1) == Some(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_file_path_drops_leading_slash() {
        let location = Location::file("/C:/proj/index");
        assert_eq!(resolve_root_path(&location), "C:/proj");
    }

    #[test]
    fn unix_file_path_keeps_leading_slash() {
        let location = Location::file("/home/dev/game/index.html");
        assert_eq!(resolve_root_path(&location), "/home/dev/game");
    }

    #[test]
    fn remote_location_keeps_scheme_and_host() {
        let location = Location::new("https:", "example.com", "/app/index");
        assert_eq!(resolve_root_path(&location), "https://example.com/app");
    }

    #[test]
    fn remote_location_ignores_drive_correction() {
        // Only file locations use the corrected pathname.
        let location = Location::new("http:", "localhost:8080", "/C:/odd/index");
        assert_eq!(resolve_root_path(&location), "http://localhost:8080/C:/odd");
    }

    #[test]
    fn directory_of_strips_query_and_fragment() {
        assert_eq!(
            directory_of("https://example.com/app/index.html?v=2#top"),
            "https://example.com/app"
        );
        assert_eq!(directory_of("index.html"), "");
        assert_eq!(directory_of("/index.html"), "");
    }

    #[test]
    fn join_path_resolves_relative_segments() {
        assert_eq!(
            join_path("https://example.com/app", "libs/tool.js"),
            "https://example.com/app/libs/tool.js"
        );
        assert_eq!(join_path("C:/proj", "./res/../libs/a.js"), "C:/proj/libs/a.js");
        assert_eq!(
            join_path("https://example.com", "../../x.js"),
            "https://example.com/x.js"
        );
    }

    #[test]
    fn join_path_keeps_absolute_targets() {
        assert_eq!(join_path("C:/proj", "/abs/a.js"), "/abs/a.js");
        assert_eq!(join_path("C:/proj", "D:/other/a.js"), "D:/other/a.js");
        assert_eq!(
            join_path("C:/proj", "https://cdn.example.com/a.js"),
            "https://cdn.example.com/a.js"
        );
        assert_eq!(join_path("", "libs/a.js"), "libs/a.js");
    }
}
