use serde::Serialize;

use super::{Meta, ObjectContainer, Rulebase};

/// One `<devices><entry>` block of the management server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceEntry {
    pub name: String,
    pub device_groups: Vec<DeviceGroup>,
    pub templates: Vec<Template>,
    pub template_stacks: Vec<TemplateStack>,
}

/// Managed devices sharing policy and objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceGroup {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub objects: ObjectContainer,
    pub pre_rulebase: Rulebase,
    pub post_rulebase: Rulebase,
    /// Serial numbers of attached firewalls.
    pub devices: Vec<String>,
}

/// Reusable network/device configuration fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Template {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    /// Embedded `<config>`; `None` for a template that defines nothing.
    pub config: Option<TemplateConfig>,
}

/// Interfaces and virtual systems gathered from a template's
/// `<config><devices><entry>` blocks, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateConfig {
    pub interfaces: Vec<EthernetInterface>,
    pub vsys: Vec<VirtualSystem>,
}

impl TemplateConfig {
    pub fn interface(&self, name: &str) -> Option<&EthernetInterface> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}

/// Ordered composition of templates applied to devices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateStack {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    /// Template names; earlier entries take precedence.
    pub templates: Vec<String>,
    pub devices: Vec<String>,
}

/// A logical partition (`vsysN`) of a firewall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VirtualSystem {
    pub name: String,
    pub display_name: Option<String>,
    pub objects: ObjectContainer,
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    /// Interfaces bound to the zone through `<network><layer3>`.
    pub layer3: Vec<String>,
}

/// `<network><interface><ethernet><entry>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EthernetInterface {
    pub name: String,
    pub comment: Option<String>,
    /// Presence of a `<layer3>` child; its contents are not modelled.
    pub layer3: bool,
}
