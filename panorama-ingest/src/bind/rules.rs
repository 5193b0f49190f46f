use xml_tree_core::XmlNode;

use super::{
    child_of, entries_of, entry_names_of, members_of, meta_of, name_of, text_at, text_of,
    BindError, FromXml,
};
use crate::model::{
    DestinationTranslation, DynamicIp, DynamicIpAndPort, NatRule, Rulebase, SecurityRule,
    SourceTranslation, StaticIp, Target,
};

impl FromXml for Rulebase {
    /// `<pre-rulebase>` or `<post-rulebase>`: rules live under
    /// `<security><rules>` and `<nat><rules>`.
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            security: rules_of(node, "security")?,
            nat: rules_of(node, "nat")?,
        })
    }
}

fn rules_of<T: FromXml>(rulebase: &XmlNode, kind: &str) -> Result<Vec<T>, BindError> {
    match rulebase.get_child(kind) {
        Some(section) => entries_of(section, "rules"),
        None => Ok(Vec::new()),
    }
}

impl FromXml for Target {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            devices: entry_names_of(node, "devices"),
            negate: text_of(node, "negate"),
        })
    }
}

impl FromXml for SecurityRule {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            from_zones: members_of(node, "from"),
            to_zones: members_of(node, "to"),
            sources: members_of(node, "source"),
            destinations: members_of(node, "destination"),
            source_users: members_of(node, "source-user"),
            applications: members_of(node, "application"),
            services: members_of(node, "service"),
            categories: members_of(node, "category"),
            action: text_of(node, "action"),
            schedule: text_of(node, "schedule"),
            log_start: text_of(node, "log-start"),
            log_end: text_of(node, "log-end"),
            disabled: text_of(node, "disabled"),
            negate_source: text_of(node, "negate-source"),
            negate_destination: text_of(node, "negate-destination"),
            target: child_of(node, "target")?,
        })
    }
}

impl FromXml for StaticIp {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            translated_address: text_of(node, "translated-address"),
            bi_directional: text_of(node, "bi-directional"),
        })
    }
}

impl FromXml for DynamicIp {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            translated_addresses: members_of(node, "translated-address"),
        })
    }
}

impl FromXml for DynamicIpAndPort {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            translated_addresses: members_of(node, "translated-address"),
            interface: text_at(node, &["interface-address", "interface"]),
            interface_ip: text_at(node, &["interface-address", "ip"]),
        })
    }
}

impl FromXml for SourceTranslation {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            static_ip: child_of(node, "static-ip")?,
            dynamic_ip: child_of(node, "dynamic-ip")?,
            dynamic_ip_and_port: child_of(node, "dynamic-ip-and-port")?,
        })
    }
}

impl FromXml for DestinationTranslation {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            translated_address: text_of(node, "translated-address"),
            translated_port: text_of(node, "translated-port"),
            distribution: text_of(node, "distribution"),
        })
    }
}

impl FromXml for NatRule {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            from_zones: members_of(node, "from"),
            to_zones: members_of(node, "to"),
            sources: members_of(node, "source"),
            destinations: members_of(node, "destination"),
            service: text_of(node, "service"),
            to_interface: text_of(node, "to-interface"),
            source_translation: child_of(node, "source-translation")?,
            destination_translation: child_of(node, "destination-translation")?,
            dynamic_destination_translation: child_of(node, "dynamic-destination-translation")?,
            disabled: text_of(node, "disabled"),
            target: child_of(node, "target")?,
        })
    }
}
