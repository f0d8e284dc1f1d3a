//! Content-type resolution for served files.

use std::path::Path;

/// Extension fallbacks for package formats, checked when introspection has
/// no answer. Extensions are matched case-insensitively.
const FALLBACK_TYPES: &[(&str, &str)] = &[
    ("apk", "application/vnd.android.package-archive"),
    ("exe", "application/x-msdownload"),
    ("msi", "application/x-msi"),
    ("dmg", "application/x-apple-diskimage"),
    ("deb", "application/x-debian-package"),
    ("pkg", "application/x-newton-compatible-pkg"),
    ("zip", "application/zip"),
    ("rar", "application/x-rar-compressed"),
];

const OCTET_STREAM: &str = "application/octet-stream";

/// Determine the MIME type for a resolved file path.
///
/// `mime_guess` first, then the package-format table, then the generic
/// binary type for anything unknown or extensionless.
pub fn resolve(path: &Path) -> &'static str {
    if let Some(mime) = mime_guess::from_path(path).first_raw() {
        return mime;
    }

    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };

    FALLBACK_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_package() {
        assert_eq!(
            resolve(Path::new("/srv/apps/app1.apk")),
            "application/vnd.android.package-archive"
        );
    }

    #[test]
    fn windows_installer() {
        assert_eq!(
            resolve(Path::new("setup.exe")),
            "application/x-msdownload"
        );
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(
            resolve(Path::new("APP2.APK")),
            "application/vnd.android.package-archive"
        );
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(resolve(Path::new("blob.xyz123")), OCTET_STREAM);
    }

    #[test]
    fn no_extension_is_octet_stream() {
        assert_eq!(resolve(Path::new("README")), OCTET_STREAM);
    }
}
