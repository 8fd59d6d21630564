//! Pre-flight safety checks applied to every URL before it is fetched.
//!
//! The fetcher downloads attacker-influenced URLs, so anything that could
//! reach internal infrastructure (loopback, private ranges, cloud metadata
//! endpoints) is refused here. Hostnames are checked lexically only; DNS
//! resolution is not performed.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::error::AdmissionError;

pub const ALLOWED_SCHEME: &str = "https";

/// Hosts refused outright, compared against the lowercased host literal.
pub const DENIED_HOSTS: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "::1",
    "0.0.0.0",
    // cloud instance metadata service
    "169.254.169.254",
];

const PRIVATE_V4: &[(Ipv4Addr, u32)] = &[
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
    (Ipv4Addr::new(127, 0, 0, 0), 8),
    (Ipv4Addr::new(169, 254, 0, 0), 16),
    (Ipv4Addr::new(0, 0, 0, 0), 8),
    (Ipv4Addr::new(100, 64, 0, 0), 10),
    (Ipv4Addr::new(192, 0, 0, 0), 24),
    (Ipv4Addr::new(192, 0, 2, 0), 24),
    (Ipv4Addr::new(198, 18, 0, 0), 15),
    (Ipv4Addr::new(198, 51, 100, 0), 24),
    (Ipv4Addr::new(203, 0, 113, 0), 24),
    (Ipv4Addr::new(240, 0, 0, 0), 4),
];

const PRIVATE_V6: &[(Ipv6Addr, u32)] = &[
    (Ipv6Addr::LOCALHOST, 128),
    (Ipv6Addr::UNSPECIFIED, 128),
    // discard-only
    (Ipv6Addr::new(0x0100, 0, 0, 0, 0, 0, 0, 0), 64),
    // local-use NAT64
    (Ipv6Addr::new(0x0064, 0xff9b, 0x0001, 0, 0, 0, 0, 0), 48),
    // IETF protocol assignments, including ORCHIDv2 (2001:10::/28)
    (Ipv6Addr::new(0x2001, 0, 0, 0, 0, 0, 0, 0), 23),
    (Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
    (Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10),
    (Ipv6Addr::new(0x2001, 0x0db8, 0, 0, 0, 0, 0, 0), 32),
];

/// A URL that passed [`validate_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedUrl(Url);

impl AdmittedUrl {
    pub fn as_str(&self) -> &str { self.0.as_str() }
}

impl fmt::Display for AdmittedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.0.as_str()) }
}

/// Check that `raw` may be fetched.
///
/// Checks, short-circuiting on the first failure:
///
/// 1. the URL parses and has a host,
/// 2. the scheme is `https`,
/// 3. the host is not in [`DENIED_HOSTS`],
/// 4. an IP-literal host is not loopback, private, link-local or otherwise
///    non-global.
///
/// # Examples
///
/// ```
/// use listvault_fetch::validate_url;
///
/// assert!(validate_url("https://easylist.to/easylist/easylist.txt").is_ok());
/// assert!(validate_url("http://easylist.to/easylist/easylist.txt").is_err());
/// assert!(validate_url("https://169.254.169.254/latest/meta-data").is_err());
/// ```
pub fn validate_url(raw: &str) -> Result<AdmittedUrl, AdmissionError> {
    let url = Url::parse(raw).map_err(|e| AdmissionError::Malformed(e.to_string()))?;

    if url.scheme() != ALLOWED_SCHEME {
        return Err(AdmissionError::Scheme(url.scheme().to_string()));
    }

    let (literal, ip) = match url.host() {
        None => return Err(AdmissionError::MissingHost),
        Some(Host::Domain(d)) => (d.trim_end_matches('.').to_ascii_lowercase(), None),
        Some(Host::Ipv4(a)) => (a.to_string(), Some(IpAddr::V4(a))),
        Some(Host::Ipv6(a)) => (a.to_string(), Some(IpAddr::V6(a))),
    };

    if literal.is_empty() {
        return Err(AdmissionError::MissingHost);
    }

    if DENIED_HOSTS.contains(&literal.as_str()) {
        return Err(AdmissionError::DeniedHost(literal));
    }

    if let Some(ip) = ip
        && is_private_ip(ip)
    {
        return Err(AdmissionError::PrivateAddress(ip));
    }

    Ok(AdmittedUrl(url))
}

/// Returns `true` for addresses that are not publicly routable.
///
/// IPv4-mapped IPv6 addresses are judged by their IPv4 part.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_private_v4(v4),
            None => PRIVATE_V6.iter().any(|&(net, prefix)| {
                mask_u128(u128::from(v6), prefix) == mask_u128(u128::from(net), prefix)
            }),
        },
    }
}

fn is_private_v4(ip: Ipv4Addr) -> bool {
    PRIVATE_V4
        .iter()
        .any(|&(net, prefix)| mask_u32(u32::from(ip), prefix) == mask_u32(u32::from(net), prefix))
}

fn mask_u32(bits: u32, prefix: u32) -> u32 { bits.checked_shr(32 - prefix).unwrap_or(0) }

fn mask_u128(bits: u128, prefix: u32) -> u128 { bits.checked_shr(128 - prefix).unwrap_or(0) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_public_https() {
        let url = validate_url("https://easylist.to/easylist/easylist.txt").unwrap();
        assert_eq!(url.as_str(), "https://easylist.to/easylist/easylist.txt");
        assert!(validate_url("https://8.8.8.8/list.txt").is_ok());
        assert!(validate_url("https://[2606:4700::1111]/list.txt").is_ok());
    }

    #[test]
    fn rejects_non_https_schemes() {
        for raw in [
            "http://example.com/list.txt",
            "file:///etc/passwd",
            "ftp://example.com/list.txt",
            "HTTP://example.com/list.txt",
            "data:text/plain,hello",
        ] {
            assert!(
                matches!(validate_url(raw), Err(AdmissionError::Scheme(_))),
                "{raw} should be rejected by scheme"
            );
        }
    }

    #[test]
    fn rejects_denied_hosts() {
        for raw in [
            "https://localhost/x",
            "https://LOCALHOST./x",
            "https://127.0.0.1/x",
            "https://[::1]/x",
            "https://0.0.0.0/x",
            "https://169.254.169.254/latest/meta-data/",
        ] {
            assert!(
                matches!(validate_url(raw), Err(AdmissionError::DeniedHost(_))),
                "{raw} should be denied"
            );
        }
    }

    #[test]
    fn rejects_private_ranges() {
        for raw in [
            "https://10.0.0.1/x",
            "https://10.255.255.255/x",
            "https://172.16.0.1/x",
            "https://172.31.255.254/x",
            "https://192.168.1.1/x",
            "https://127.0.0.2/x",
            "https://169.254.1.1/x",
            "https://[fd00::1]/x",
            "https://[fdff:ffff::1]/x",
            "https://[fc00::1]/x",
            "https://[fe80::1]/x",
            "https://[::ffff:10.0.0.1]/x",
            "https://[100::1]/x",
            "https://[2001::1]/x",
            "https://[2001:10::1]/x",
            "https://[2001:1ff::1]/x",
            "https://[64:ff9b:1::1]/x",
        ] {
            assert!(
                matches!(validate_url(raw), Err(AdmissionError::PrivateAddress(_))),
                "{raw} should be private"
            );
        }
    }

    #[test]
    fn range_boundaries() {
        assert!(validate_url("https://172.15.255.255/x").is_ok());
        assert!(validate_url("https://172.32.0.0/x").is_ok());
        assert!(validate_url("https://11.0.0.0/x").is_ok());
        assert!(validate_url("https://192.169.0.1/x").is_ok());
        assert!(validate_url("https://[2001:200::1]/x").is_ok());
        assert!(validate_url("https://[100:0:0:1::1]/x").is_ok());
    }

    #[test]
    fn numeric_host_forms_are_normalized() {
        // 2130706433 == 127.0.0.1
        assert!(validate_url("https://2130706433/x").is_err());
        assert!(validate_url("https://0x7f.1/x").is_err());
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(validate_url("not a url"), Err(AdmissionError::Malformed(_))));
        assert!(matches!(validate_url(""), Err(AdmissionError::Malformed(_))));
        assert!(validate_url("https://").is_err());
    }

    #[test]
    fn dns_names_skip_ip_checks() {
        assert!(validate_url("https://10.0.0.1.nip.io/x").is_ok());
    }

    #[test]
    fn private_ip_classification() {
        assert!(is_private_ip("10.1.2.3".parse().unwrap()));
        assert!(is_private_ip("fd12:3456::1".parse().unwrap()));
        assert!(is_private_ip("255.255.255.255".parse().unwrap()));
        assert!(!is_private_ip("1.1.1.1".parse().unwrap()));
        assert!(!is_private_ip("2001:4860::8888".parse().unwrap()));
    }
}
