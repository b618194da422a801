//! gallery-dl command line construction.

use std::path::Path;

use gulp_core::{DownloadOptions, LaunchSpec};

/// Download archive kept in the destination when skipping existing files.
pub const ARCHIVE_FILE_NAME: &str = ".gallery-dl-archive";

/// Build the launch spec for one run.
///
/// Argument order: `--config <cfg> --destination <dir>`, the archive flags
/// when skipping existing files, `--write-metadata` when requested, and the
/// URL last.
pub fn build_invocation(
    binary: &Path,
    config_path: &Path,
    output_directory: &Path,
    options: &DownloadOptions,
    url: &str,
) -> LaunchSpec {
    let mut spec = LaunchSpec::new(binary)
        .arg("--config")
        .arg(config_path)
        .arg("--destination")
        .arg(output_directory);

    if options.skip_existing {
        spec = spec
            .arg("--no-skip")
            .arg("--download-archive")
            .arg(output_directory.join(ARCHIVE_FILE_NAME));
    }

    if options.save_metadata {
        spec = spec.arg("--write-metadata");
    }

    spec.arg(url)
}
