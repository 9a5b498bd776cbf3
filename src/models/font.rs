//! Font file recognition
//!
//! A font file is any regular file whose name ends in one of the allow-listed
//! extensions. The check is on the name only; contents are never inspected.

use std::path::Path;

/// Extensions (without the dot) treated as font files
pub const FONT_EXTENSIONS: [&str; 5] = ["ttf", "otf", "woff", "woff2", "eot"];

/// Check whether a file name ends in a font extension (case-insensitive)
pub fn is_font_file_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| is_font_extension(ext))
        .unwrap_or(false)
}

/// Check whether a path's file name is a font file name
pub fn is_font_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(is_font_file_name)
        .unwrap_or(false)
}

fn is_font_extension(ext: &str) -> bool {
    FONT_EXTENSIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_matches_allow_list_case_insensitively() {
        assert!(is_font_file_name("a.ttf"));
        assert!(is_font_file_name("B.OTF"));
        assert!(is_font_file_name("c.Woff"));
        assert!(is_font_file_name("d.woff2"));
        assert!(is_font_file_name("e.eot"));
    }

    #[test]
    fn test_rejects_other_names() {
        assert!(!is_font_file_name("notes.txt"));
        assert!(!is_font_file_name("ttf"));
        assert!(!is_font_file_name("font.ttf.bak"));
        assert!(!is_font_file_name("font.ttc"));
        assert!(!is_font_file_name("fontttf"));
    }

    #[test]
    fn test_suffix_match_includes_dot_names() {
        // A bare ".ttf" still ends with ".ttf"
        assert!(is_font_file_name(".ttf"));
    }

    #[test]
    fn test_is_font_path() {
        assert!(is_font_path(&PathBuf::from("/fonts/Regular.TTF")));
        assert!(!is_font_path(&PathBuf::from("/fonts/readme.md")));
        assert!(!is_font_path(&PathBuf::from("/")));
    }
}
