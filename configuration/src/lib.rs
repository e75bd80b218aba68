use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use serde::Deserialize;

pub fn get_config<'de, T: Deserialize<'de>>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path);
    let config = config::Config::builder()
        .add_source(f)
        .build()?;
    config.try_deserialize::<T>()
}

pub fn parse_config<'de, T: Deserialize<'de>>(toml: &str) -> Result<T, config::ConfigError> {
    let f = config::File::from_str(toml, config::FileFormat::Toml);
    let config = config::Config::builder()
        .add_source(f)
        .build()?;
    config.try_deserialize::<T>()
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_ttl() -> u32 {
    3600
}

#[derive(Debug, Deserialize)]
pub struct NameserverConfiguration {
    pub server: ServerConfiguration,
    #[serde(default)]
    pub zone: ZoneConfiguration,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfiguration {
    ip_address: IpAddr,
    port: u16,
    #[serde(default)]
    pub oversize: OversizePolicy,
}

impl ServerConfiguration {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.ip_address, self.port)
    }
}

/// What to do with a response that does not fit in one datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Send the answers that fit and set the TC flag.
    Truncate,
    /// Send nothing.
    Drop,
}

impl Default for OversizePolicy {
    fn default() -> Self {
        OversizePolicy::Truncate
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ZoneConfiguration {
    #[serde(default)]
    pub records: Vec<RecordConfiguration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Mx,
    Ptr,
    Cname,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Address for A records, target name for the others.
    pub value: String,
    /// MX only.
    #[serde(default)]
    pub preference: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test() {
        let toml = r#"
            log_level = "debug"

            [server]
            ip_address = "127.0.0.1"
            port = 5353
            oversize = "drop"

            [[zone.records]]
            name = "ahlquist.com"
            type = "A"
            value = "192.0.2.1"

            [[zone.records]]
            name = "ahlquist.com"
            type = "MX"
            ttl = 300
            value = "mail.ahlquist.com"
            preference = 10
        "#;
        let c: NameserverConfiguration = parse_config(toml).unwrap();

        assert_eq!(c.log_level, "debug");
        assert_eq!(c.server.bind_address(), "127.0.0.1:5353".parse().unwrap());
        assert_eq!(c.server.oversize, OversizePolicy::Drop);
        assert_eq!(c.zone.records.len(), 2);

        let a = &c.zone.records[0];
        assert_eq!(a.kind, RecordKind::A);
        assert_eq!(a.ttl, 3600);
        assert_eq!(a.preference, None);

        let mx = &c.zone.records[1];
        assert_eq!(mx.kind, RecordKind::Mx);
        assert_eq!(mx.ttl, 300);
        assert_eq!(mx.value, "mail.ahlquist.com");
        assert_eq!(mx.preference, Some(10));
    }

    #[test]
    fn defaults_test() {
        let toml = r#"
            [server]
            ip_address = "0.0.0.0"
            port = 53
        "#;
        let c: NameserverConfiguration = parse_config(toml).unwrap();

        assert_eq!(c.log_level, "info");
        assert_eq!(c.server.oversize, OversizePolicy::Truncate);
        assert!(c.zone.records.is_empty());
    }

    #[test]
    fn missing_server_test() {
        let r: Result<NameserverConfiguration, _> = parse_config("log_level = \"info\"");
        assert!(r.is_err());
    }
}
