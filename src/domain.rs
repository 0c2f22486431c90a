//! Registrable-domain extraction and domain allow-list matching.
//!
//! "Registrable domain" here is the label just left of the ICANN public
//! suffix: `www.youtube.com` -> `youtube`, `bbc.co.uk` -> `bbc`. Suffixes
//! from the private section of the list (`github.io`, `readthedocs.io`) are
//! ignored, so `user.github.io` -> `github`.

use url::{Host, Url};

use crate::data_models::SearchItem;

fn host_of(raw: &str) -> Option<Host<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{raw}"))
    };
    parsed.ok()?.host().map(|h| h.to_owned())
}

/// Number of trailing labels of `host` that form its ICANN public suffix.
/// Unknown TLDs have no suffix.
fn icann_suffix_labels(host: &str) -> usize {
    let mut candidate = host;
    loop {
        let Some(suffix) = psl::suffix(candidate.as_bytes()) else {
            return 0;
        };
        let Ok(text) = std::str::from_utf8(suffix.as_bytes()) else {
            return 0;
        };
        match suffix.typ() {
            Some(psl::Type::Icann) => return text.split('.').count(),
            // retry with the private suffix minus its leftmost label
            Some(psl::Type::Private) => match text.split_once('.') {
                Some((_, rest)) => candidate = rest,
                None => return 0,
            },
            None => return 0,
        }
    }
}

/// Registrable domain of a URL or bare host, lower-cased. IP literals are
/// returned whole. `None` when nothing host-like can be parsed or the host
/// is itself a public suffix.
pub fn registrable_domain(raw: &str) -> Option<String> {
    let host = match host_of(raw)? {
        Host::Domain(domain) => domain,
        Host::Ipv4(ip) => return Some(ip.to_string()),
        Host::Ipv6(ip) => return Some(ip.to_string()),
    };

    let host = host.trim_end_matches('.').to_lowercase();
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    let suffix = icann_suffix_labels(&host);
    if labels.len() <= suffix {
        return None;
    }
    Some(labels[labels.len() - suffix - 1].to_string())
}

/// True if the item's link shares a registrable domain with any of `domains`.
/// An empty allow-list accepts every item: no domain filter means the
/// category doesn't gate on domain.
pub fn domain_in_search<S: AsRef<str>>(item: &SearchItem, domains: &[S]) -> bool {
    if domains.is_empty() {
        return true;
    }

    let Some(link_domain) = registrable_domain(&item.link) else {
        return false;
    };

    domains
        .iter()
        .filter_map(|d| registrable_domain(d.as_ref()))
        .any(|required| required == link_domain)
}
