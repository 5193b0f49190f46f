use serde::Serialize;

use super::Meta;

/// Object pool found under `<shared>`, each device group, and each vsys.
///
/// Names are unique inside one container but may repeat across containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectContainer {
    pub tags: Vec<Tag>,
    pub addresses: Vec<Address>,
    pub address_groups: Vec<AddressGroup>,
    pub services: Vec<Service>,
    pub service_groups: Vec<ServiceGroup>,
    pub application_groups: Vec<ApplicationGroup>,
    pub application_filters: Vec<ApplicationFilter>,
    pub schedules: Vec<Schedule>,
}

impl ObjectContainer {
    /// Total number of entries across every collection.
    pub fn len(&self) -> usize {
        self.tags.len()
            + self.addresses.len()
            + self.address_groups.len()
            + self.services.len()
            + self.service_groups.len()
            + self.application_groups.len()
            + self.application_filters.len()
            + self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn address(&self, name: &str) -> Option<&Address> {
        self.addresses.iter().find(|a| a.name == name)
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }
}

/// Tag definition. Its description is stored in `<comments>` on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub color: Option<String>,
}

/// Address object. Well-formed input populates exactly one of the three
/// value fields, but nothing here enforces that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub ip_netmask: Option<String>,
    pub ip_range: Option<String>,
    pub fqdn: Option<String>,
}

impl Address {
    /// The populated value, preferring netmask, then range, then FQDN.
    pub fn value(&self) -> Option<&str> {
        self.ip_netmask
            .as_deref()
            .or(self.ip_range.as_deref())
            .or(self.fqdn.as_deref())
    }
}

/// Address group: static member list or dynamic filter expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressGroup {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub static_members: Vec<String>,
    pub dynamic_filter: Option<String>,
}

impl AddressGroup {
    pub fn is_dynamic(&self) -> bool {
        self.dynamic_filter.is_some()
    }
}

/// Port selection for one protocol. Ports stay strings: `80,443` and
/// `1024-65535` are both valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortSpec {
    pub port: String,
    pub source_port: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub tcp: Option<PortSpec>,
    pub udp: Option<PortSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceGroup {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationGroup {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub members: Vec<String>,
}

/// Application filter: each criterion is a member list, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationFilter {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub technologies: Vec<String>,
    pub risks: Vec<String>,
}

/// Schedule object. Only the time windows are kept; recurring schedules
/// list `HH:MM-HH:MM` windows, non-recurring ones list date-time ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub name: String,
    #[serde(flatten)]
    pub meta: Meta,
    pub daily: Vec<String>,
    pub non_recurring: Vec<String>,
}
