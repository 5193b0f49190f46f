use serde::Serialize;

use super::{flag_is_set, Meta};

/// Security and NAT rules of one rulebase position (pre or post).
///
/// Rule order is evaluation order (first match wins) and is kept exactly as
/// found in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rulebase {
    pub security: Vec<SecurityRule>,
    pub nat: Vec<NatRule>,
}

impl Rulebase {
    pub fn is_empty(&self) -> bool {
        self.security.is_empty() && self.nat.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.security.len() + self.nat.len()
    }
}

/// Restricts a rule to specific managed devices (`<target>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Device serial numbers from `<devices><entry name="...">`.
    pub devices: Vec<String>,
    pub negate: Option<String>,
}

impl Target {
    pub fn is_negated(&self) -> bool {
        flag_is_set(self.negate.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecurityRule {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub from_zones: Vec<String>,
    pub to_zones: Vec<String>,
    pub sources: Vec<String>,
    pub destinations: Vec<String>,
    pub source_users: Vec<String>,
    pub applications: Vec<String>,
    pub services: Vec<String>,
    pub categories: Vec<String>,
    pub action: Option<String>,
    pub schedule: Option<String>,
    pub log_start: Option<String>,
    pub log_end: Option<String>,
    pub disabled: Option<String>,
    pub negate_source: Option<String>,
    pub negate_destination: Option<String>,
    pub target: Option<Target>,
}

impl SecurityRule {
    pub fn is_disabled(&self) -> bool {
        flag_is_set(self.disabled.as_deref())
    }

    pub fn logs_at_start(&self) -> bool {
        flag_is_set(self.log_start.as_deref())
    }

    /// Session-end logging is on unless explicitly set to `no`.
    pub fn logs_at_end(&self) -> bool {
        self.log_end
            .as_deref()
            .map_or(true, |flag| flag_is_set(Some(flag)))
    }

    pub fn negates_source(&self) -> bool {
        flag_is_set(self.negate_source.as_deref())
    }

    pub fn negates_destination(&self) -> bool {
        flag_is_set(self.negate_destination.as_deref())
    }
}

/// `<static-ip>` source translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaticIp {
    pub translated_address: Option<String>,
    pub bi_directional: Option<String>,
}

/// `<dynamic-ip>` source translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DynamicIp {
    pub translated_addresses: Vec<String>,
}

/// `<dynamic-ip-and-port>` source translation: either an address pool or the
/// egress interface address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DynamicIpAndPort {
    pub translated_addresses: Vec<String>,
    pub interface: Option<String>,
    pub interface_ip: Option<String>,
}

/// Source translation variants. At most one is expected to be populated;
/// that is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceTranslation {
    pub static_ip: Option<StaticIp>,
    pub dynamic_ip: Option<DynamicIp>,
    pub dynamic_ip_and_port: Option<DynamicIpAndPort>,
}

impl SourceTranslation {
    /// Number of populated variants; more than one means the source document
    /// violates variant exclusivity.
    pub fn populated_variants(&self) -> usize {
        usize::from(self.static_ip.is_some())
            + usize::from(self.dynamic_ip.is_some())
            + usize::from(self.dynamic_ip_and_port.is_some())
    }
}

/// Static or dynamic destination translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DestinationTranslation {
    pub translated_address: Option<String>,
    pub translated_port: Option<String>,
    /// Only used by dynamic destination translation.
    pub distribution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NatRule {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub from_zones: Vec<String>,
    pub to_zones: Vec<String>,
    pub sources: Vec<String>,
    pub destinations: Vec<String>,
    pub service: Option<String>,
    pub to_interface: Option<String>,
    pub source_translation: Option<SourceTranslation>,
    pub destination_translation: Option<DestinationTranslation>,
    pub dynamic_destination_translation: Option<DestinationTranslation>,
    pub disabled: Option<String>,
    pub target: Option<Target>,
}

impl NatRule {
    pub fn is_disabled(&self) -> bool {
        flag_is_set(self.disabled.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::{DynamicIp, SecurityRule, SourceTranslation, StaticIp};

    #[test]
    fn flags_read_yes_case_insensitively() {
        let rule = SecurityRule {
            disabled: Some("YES".to_string()),
            negate_source: Some("no".to_string()),
            ..SecurityRule::default()
        };
        assert!(rule.is_disabled());
        assert!(!rule.negates_source());
        assert!(!rule.negates_destination());
    }

    #[test]
    fn log_end_defaults_on_when_unset() {
        let mut rule = SecurityRule::default();
        assert!(rule.logs_at_end());
        assert!(!rule.logs_at_start());

        rule.log_end = Some("no".to_string());
        assert!(!rule.logs_at_end());
    }

    #[test]
    fn populated_variants_counts_each_present_translation() {
        let translation = SourceTranslation {
            static_ip: Some(StaticIp::default()),
            dynamic_ip: Some(DynamicIp::default()),
            dynamic_ip_and_port: None,
        };
        assert_eq!(translation.populated_variants(), 2);
        assert_eq!(SourceTranslation::default().populated_variants(), 0);
    }
}
