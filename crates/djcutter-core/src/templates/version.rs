//! Version comparison for CLI and template compatibility

use anyhow::Result;
use semver::Version;

/// Parse version string, accepting an optional leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned)
        .map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Compare CLI version against the version a template was written for
/// Returns a warning message if the CLI is older than the template expects
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    // Unparsable versions can't be compared, skip the warning
    let cli_ver = parse_version(cli_version).ok()?;
    let template_ver = parse_version(template_version).ok()?;

    (cli_ver < template_ver).then(|| {
        format!(
            "This template was written for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            template_ver, cli_ver, upgrade_command
        )
    })
}
