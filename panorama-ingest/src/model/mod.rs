//! Typed representation of a Panorama configuration export.
//!
//! Entities compose two field groups instead of sharing a supertype: every
//! addressable entity carries a verbatim `name`, and most also embed a
//! [`Meta`] block (description plus tag references). Collections keep
//! document order; absent optional elements are empty strings, empty vectors,
//! or `None`.

mod devices;
mod objects;
mod rules;

use serde::Serialize;

pub use devices::{
    DeviceEntry, DeviceGroup, EthernetInterface, Template, TemplateConfig, TemplateStack,
    VirtualSystem, Zone,
};
pub use objects::{
    Address, AddressGroup, ApplicationFilter, ApplicationGroup, ObjectContainer, PortSpec,
    Schedule, Service, ServiceGroup, Tag,
};
pub use rules::{
    DestinationTranslation, DynamicIp, DynamicIpAndPort, NatRule, Rulebase, SecurityRule,
    SourceTranslation, StaticIp, Target,
};

/// Description and tag references shared by most named entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    /// Free text; empty when the source has no `<description>`.
    pub description: String,
    /// `<tag><member>` references in document order.
    pub tags: Vec<String>,
}

/// Root of one ingested export (`<config version="...">`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigurationDocument {
    /// Schema format version from the root `version` attribute.
    pub version: String,
    pub shared: Shared,
    /// `<devices><entry>` blocks, normally a single `localhost.localdomain`.
    pub devices: Vec<DeviceEntry>,
}

/// Global object pool and shared rulebases (`<shared>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shared {
    pub objects: ObjectContainer,
    pub pre_rulebase: Rulebase,
    pub post_rulebase: Rulebase,
}

/// Interpret a raw `yes`/`no` flag. Anything other than `yes` is false.
pub(crate) fn flag_is_set(flag: Option<&str>) -> bool {
    flag.is_some_and(|value| value.trim().eq_ignore_ascii_case("yes"))
}

impl ConfigurationDocument {
    /// Look up a device group by name across all device entries.
    pub fn device_group(&self, name: &str) -> Option<&DeviceGroup> {
        self.devices
            .iter()
            .flat_map(|entry| entry.device_groups.iter())
            .find(|group| group.name == name)
    }

    /// Look up a template by name across all device entries.
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.devices
            .iter()
            .flat_map(|entry| entry.templates.iter())
            .find(|template| template.name == name)
    }

    /// Look up a template stack by name across all device entries.
    pub fn template_stack(&self, name: &str) -> Option<&TemplateStack> {
        self.devices
            .iter()
            .flat_map(|entry| entry.template_stacks.iter())
            .find(|stack| stack.name == name)
    }
}
