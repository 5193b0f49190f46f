use xml_tree_core::XmlNode;

use super::{
    child_of, entries_of, entry_names_of, members_at, members_of, meta_of, name_of, text_of,
    BindError, FromXml,
};
use crate::model::{
    DeviceEntry, DeviceGroup, EthernetInterface, Template, TemplateConfig, TemplateStack,
    VirtualSystem, Zone,
};

impl FromXml for DeviceEntry {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            device_groups: entries_of(node, "device-group")?,
            templates: entries_of(node, "template")?,
            template_stacks: entries_of(node, "template-stack")?,
        })
    }
}

impl FromXml for DeviceGroup {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            objects: FromXml::from_xml(node)?,
            pre_rulebase: child_of(node, "pre-rulebase")?.unwrap_or_default(),
            post_rulebase: child_of(node, "post-rulebase")?.unwrap_or_default(),
            devices: entry_names_of(node, "devices"),
        })
    }
}

impl FromXml for Template {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            config: child_of(node, "config")?,
        })
    }
}

impl FromXml for TemplateConfig {
    /// A template's `<config>` repeats the firewall layout: one
    /// `<devices><entry>` per target, each with `<network>` and `<vsys>`.
    /// Entries are flattened in document order.
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        let mut config = Self::default();
        let Some(devices) = node.get_child("devices") else {
            return Ok(config);
        };
        for device in devices.children_named("entry") {
            if let Some(interface) = device.find(&["network", "interface"]) {
                config
                    .interfaces
                    .extend(entries_of::<EthernetInterface>(interface, "ethernet")?);
            }
            config.vsys.extend(entries_of::<VirtualSystem>(device, "vsys")?);
        }
        Ok(config)
    }
}

impl FromXml for TemplateStack {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            templates: members_of(node, "templates"),
            devices: entry_names_of(node, "devices"),
        })
    }
}

impl FromXml for VirtualSystem {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            display_name: text_of(node, "display-name"),
            objects: FromXml::from_xml(node)?,
            zones: entries_of(node, "zone")?,
        })
    }
}

impl FromXml for Zone {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            meta: meta_of(node),
            layer3: members_at(node, &["network", "layer3"]),
        })
    }
}

impl FromXml for EthernetInterface {
    fn from_xml(node: &XmlNode) -> Result<Self, BindError> {
        Ok(Self {
            name: name_of(node)?,
            comment: text_of(node, "comment"),
            layer3: node.get_child("layer3").is_some(),
        })
    }
}
