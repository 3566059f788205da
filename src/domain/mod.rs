//! Registrable base-domain extraction.
//!
//! Inputs arrive in many shapes: bare names, names with subdomains, full URLs
//! with scheme, port and path. Every lookup in the pipeline is keyed by the
//! registrable domain (public suffix plus one label), which this module derives
//! using the Public Suffix List.

use psl::Psl;

use crate::error_handling::EnrichError;

/// Extracts the registrable base domain from a domain-ish input.
///
/// # Arguments
///
/// * `extractor` - The Public Suffix List instance
/// * `input` - A domain, hostname or URL (e.g. `https://mail.example.co.uk/x`)
///
/// # Returns
///
/// The registrable domain, lowercased (e.g. `example.co.uk`).
///
/// # Errors
///
/// Returns [`EnrichError::InputMalformed`] if the input has no host, the host is
/// an IP address, or the host is itself a public suffix.
pub fn extract_base_domain(extractor: &psl::List, input: &str) -> Result<String, EnrichError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EnrichError::malformed(input, "empty input"));
    }

    // Bare names are parsed as URLs so scheme, port and path noise is handled in one place
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let parsed = url::Url::parse(&candidate)
        .map_err(|e| EnrichError::malformed(input, format!("not a valid hostname: {e}")))?;

    let host = match parsed.host() {
        Some(url::Host::Domain(host)) => host,
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => {
            return Err(EnrichError::malformed(
                input,
                "IP addresses do not have registrable domains",
            ));
        }
        None => return Err(EnrichError::malformed(input, "no host component")),
    };

    let host = host.trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        return Err(EnrichError::malformed(input, "no host component"));
    }

    let domain = extractor
        .domain(host.as_bytes())
        .ok_or_else(|| EnrichError::malformed(input, "no registrable domain below the public suffix"))?;

    Ok(String::from_utf8_lossy(domain.as_bytes()).into_owned())
}
