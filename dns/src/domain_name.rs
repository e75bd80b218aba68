use std::fmt;

// https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4
pub const MAX_LABEL_LENGTH: usize = 63;
pub const MAX_NAME_LENGTH: usize = 255;

/// A domain name kept as its sequence of labels.
///
/// Construction never fails: labels are checked when the name is written,
/// so a name built from untrusted text cannot produce a malformed packet.
#[derive(Clone, Debug, Default, Eq)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn new(name: &str) -> Self {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.is_empty() {
            return Self::root();
        }

        let labels = name.split('.').map(String::from).collect();
        Self { labels }
    }

    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    pub(crate) fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Octets taken on the wire when written without compression,
    /// length prefixes and terminator included.
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

// https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.3
impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(other.labels.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        write!(f, "{}", self.labels.join("."))
    }
}

impl From<&str> for DomainName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_test() {
        let name = DomainName::new("www.example.com");
        assert_eq!(name.labels().collect::<Vec<_>>(), vec!["www", "example", "com"]);
        assert_eq!(name.to_string(), "www.example.com");
    }

    #[test]
    fn trailing_dot_test() {
        assert_eq!(DomainName::new("example.com."), DomainName::new("example.com"));
        assert!(DomainName::new(".").is_root());
        assert!(DomainName::new("").is_root());
        assert_eq!(DomainName::root().to_string(), ".");
    }

    #[test]
    fn case_insensitive_eq_test() {
        assert_eq!(DomainName::new("Ahlquist.COM"), DomainName::new("ahlquist.com"));
        assert_ne!(DomainName::new("ahlquist.com"), DomainName::new("ahlquist.org"));
        assert_ne!(DomainName::new("a.ahlquist.com"), DomainName::new("ahlquist.com"));
    }

    #[test]
    fn encoded_len_test() {
        // 7example 3com 0
        assert_eq!(DomainName::new("example.com").encoded_len(), 13);
        assert_eq!(DomainName::root().encoded_len(), 1);
    }
}
